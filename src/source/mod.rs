//! Observation source abstraction for fetching raw feed records.
//!
//! This module provides a trait-based abstraction for reading alert history
//! from various places (exported channel files, byte streams such as stdin,
//! in-memory lists).

mod error;
mod file;
mod memory;
mod record;
mod stream;

pub use error::SourceError;
pub use file::FileSource;
pub use memory::MemorySource;
pub use record::{Embed, EmbedField, FeedRecord};
pub use stream::StreamSource;

use std::fmt::Debug;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Trait for fetching feed history from various backends.
///
/// # Example
///
/// ```
/// use chrono::{TimeDelta, Utc};
/// use gatus_uptime::{MemorySource, ObservationSource};
///
/// # tokio_test::block_on(async {
/// let mut source = MemorySource::new(Vec::new(), "empty");
/// let records = source.fetch_after(Utc::now() - TimeDelta::days(7)).await.unwrap();
/// assert!(records.is_empty());
/// # });
/// ```
#[async_trait]
pub trait ObservationSource: Send + Debug {
    /// Fetch every record posted strictly after `after`, oldest first.
    async fn fetch_after(&mut self, after: DateTime<Utc>) -> Result<Vec<FeedRecord>, SourceError>;

    /// Returns a human-readable description of the source.
    fn description(&self) -> &str;
}

/// Keep the records posted after `after`, ordered oldest first.
///
/// The sort is stable, so records sharing a timestamp keep feed order.
pub(crate) fn window_records(records: &[FeedRecord], after: DateTime<Utc>) -> Vec<FeedRecord> {
    let mut selected: Vec<FeedRecord> =
        records.iter().filter(|r| r.created_at > after).cloned().collect();
    selected.sort_by_key(|r| r.created_at);
    selected
}
