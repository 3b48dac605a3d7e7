//! Extraction of observations from alert payloads.
//!
//! The extractor only sees a payload through [`AlertPayload`], so any
//! record shape that can answer three questions (is this an alert, what
//! does it say, what does its first field say) can be fed to it.

use chrono::{DateTime, Utc};
use regex::Regex;

use crate::data::Observation;
use crate::source::Embed;

/// Title marker carried by every Gatus alert.
pub const DEFAULT_MARKER: &str = ":helmet_with_white_cross: Gatus";
/// Token in the first field that means the endpoint is up.
pub const DEFAULT_UP_TOKEN: &str = ":white_check_mark:";
/// Pattern capturing the endpoint name from the alert description.
pub const DEFAULT_NAME_PATTERN: &str = r"alert for (.+?) has been";
/// Entity name used when the description cannot be parsed.
pub const UNKNOWN_ENTITY: &str = "Unknown";

/// Read access to the parts of a payload the extractor needs.
pub trait AlertPayload {
    /// Whether the payload's title carries `marker`.
    fn has_marker_title(&self, marker: &str) -> bool;

    fn description(&self) -> Option<&str>;

    fn first_field_value(&self) -> Option<&str>;
}

impl AlertPayload for Embed {
    fn has_marker_title(&self, marker: &str) -> bool {
        self.title.as_deref().is_some_and(|title| title.contains(marker))
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn first_field_value(&self) -> Option<&str> {
        self.fields.first().map(|f| f.value.as_str())
    }
}

/// Matching rules that turn a payload into an [`Observation`].
#[derive(Debug, Clone)]
pub struct ExtractorRules {
    marker: String,
    up_token: String,
    name_pattern: Regex,
}

impl Default for ExtractorRules {
    fn default() -> Self {
        Self {
            marker: DEFAULT_MARKER.to_string(),
            up_token: DEFAULT_UP_TOKEN.to_string(),
            name_pattern: Regex::new(DEFAULT_NAME_PATTERN).expect("default name pattern is valid"),
        }
    }
}

impl ExtractorRules {
    /// Build rules from raw settings. The name pattern's first capture
    /// group is taken as the entity name.
    pub fn new(marker: &str, up_token: &str, name_pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            marker: marker.to_string(),
            up_token: up_token.to_string(),
            name_pattern: Regex::new(name_pattern)?,
        })
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// Turn a payload into an observation, or `None` if it is not an alert.
    ///
    /// A qualifying payload always yields an observation: an unreadable
    /// name becomes [`UNKNOWN_ENTITY`] and a missing field reads as down.
    pub fn extract<P>(&self, payload: &P, created_at: DateTime<Utc>) -> Option<Observation>
    where
        P: AlertPayload + ?Sized,
    {
        if !payload.has_marker_title(&self.marker) {
            return None;
        }

        let entity = self.entity_name(payload.description());
        let status = payload
            .first_field_value()
            .is_some_and(|value| value.contains(&self.up_token));

        Some(Observation::new(entity, created_at, status))
    }

    fn entity_name(&self, description: Option<&str>) -> String {
        description
            .and_then(|d| self.name_pattern.captures(d))
            .and_then(|c| c.get(1))
            .map_or_else(|| UNKNOWN_ENTITY.to_string(), |m| m.as_str().to_string())
    }
}
