//! In-memory observation source.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::{window_records, FeedRecord, ObservationSource, SourceError};

/// A source backed by a list of records already in memory.
///
/// Useful when records come from somewhere else entirely (a bot's own
/// message cache, a test fixture) and only need windowing.
///
/// # Example
///
/// ```
/// use gatus_uptime::{FeedRecord, MemorySource};
///
/// let records: Vec<FeedRecord> = Vec::new();
/// let source = MemorySource::new(records, "fixture");
/// ```
#[derive(Debug, Clone)]
pub struct MemorySource {
    records: Vec<FeedRecord>,
    description: String,
}

impl MemorySource {
    pub fn new(records: Vec<FeedRecord>, source_description: &str) -> Self {
        Self {
            records,
            description: format!("memory: {}", source_description),
        }
    }
}

#[async_trait]
impl ObservationSource for MemorySource {
    async fn fetch_after(&mut self, after: DateTime<Utc>) -> Result<Vec<FeedRecord>, SourceError> {
        Ok(window_records(&self.records, after))
    }

    fn description(&self) -> &str {
        &self.description
    }
}
