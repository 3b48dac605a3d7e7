//! A single status report extracted from an alert.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One reported status boundary for an entity.
///
/// An observation marks the moment an alert fired, not the span it
/// describes: `status` is the state the entity entered at `timestamp`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    /// Name of the monitored service.
    pub entity: String,
    /// When the alert was posted.
    pub timestamp: DateTime<Utc>,
    /// `true` when the alert reports the service as up.
    pub status: bool,
}

impl Observation {
    /// Create a new observation.
    pub fn new(entity: impl Into<String>, timestamp: DateTime<Utc>, status: bool) -> Self {
        Self {
            entity: entity.into(),
            timestamp,
            status,
        }
    }
}
