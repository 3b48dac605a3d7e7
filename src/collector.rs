//! Observation collection over a look-back window.

use chrono::{DateTime, TimeDelta, Utc};
use tracing::debug;

use crate::data::duration::format_span;
use crate::data::Observation;
use crate::error::UptimeError;
use crate::extract::ExtractorRules;
use crate::source::{FeedRecord, ObservationSource};

/// How far back to look for alerts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookbackWindow {
    span: TimeDelta,
}

impl LookbackWindow {
    pub const DEFAULT_DAYS: u32 = 7;

    /// A window of `days` whole days. Zero is rejected.
    pub fn days(days: u32) -> Result<Self, UptimeError> {
        if days == 0 {
            return Err(UptimeError::InvalidWindow("must be positive, got 0 days".to_string()));
        }
        Ok(Self {
            span: TimeDelta::days(i64::from(days)),
        })
    }

    /// A window of an arbitrary positive span.
    pub fn from_span(span: TimeDelta) -> Result<Self, UptimeError> {
        if span <= TimeDelta::zero() {
            return Err(UptimeError::InvalidWindow(format!(
                "must be positive, got {}",
                format_span(span)
            )));
        }
        Ok(Self { span })
    }

    pub fn span(&self) -> TimeDelta {
        self.span
    }

    /// Whole days covered, rounded down.
    pub fn whole_days(&self) -> i64 {
        self.span.num_days()
    }

    /// Whether the span is an exact number of days.
    pub fn is_whole_days(&self) -> bool {
        self.span.num_seconds() % 86_400 == 0 && self.span.subsec_nanos() == 0
    }

    /// "7 day(s)" for whole days, "0d 12h 0m" otherwise.
    pub fn label(&self) -> String {
        if self.is_whole_days() {
            format!("{} day(s)", self.whole_days())
        } else {
            format_span(self.span)
        }
    }

    /// The instant the window opens, measured back from `now`. Fails when
    /// the span reaches past the earliest representable instant.
    pub fn start(&self, now: DateTime<Utc>) -> Result<DateTime<Utc>, UptimeError> {
        now.checked_sub_signed(self.span)
            .ok_or_else(|| UptimeError::InvalidWindow(format!("{} is out of range", self.label())))
    }
}

impl Default for LookbackWindow {
    fn default() -> Self {
        Self {
            span: TimeDelta::days(i64::from(Self::DEFAULT_DAYS)),
        }
    }
}

/// Fetch the window's records from `source` and extract observations.
pub async fn collect(
    source: &mut dyn ObservationSource,
    window: &LookbackWindow,
    rules: &ExtractorRules,
) -> Result<Vec<Observation>, UptimeError> {
    collect_at(source, window, rules, Utc::now()).await
}

/// [`collect`] with a pinned clock.
pub async fn collect_at(
    source: &mut dyn ObservationSource,
    window: &LookbackWindow,
    rules: &ExtractorRules,
    now: DateTime<Utc>,
) -> Result<Vec<Observation>, UptimeError> {
    let records = source.fetch_after(window.start(now)?).await?;
    let observations = extract_records(&records, rules);

    debug!(
        source = source.description(),
        records = records.len(),
        observations = observations.len(),
        "collected observations"
    );
    Ok(observations)
}

/// Run every payload of every record through the extractor, keeping
/// source order.
pub fn extract_records(records: &[FeedRecord], rules: &ExtractorRules) -> Vec<Observation> {
    records
        .iter()
        .flat_map(|record| {
            record
                .embeds
                .iter()
                .filter_map(move |embed| rules.extract(embed, record.created_at))
        })
        .collect()
}
