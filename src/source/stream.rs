//! Stream-based observation source.
//!
//! Reads newline-delimited JSON records from an async byte stream such as
//! stdin or a socket.

use std::fmt;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tracing::{debug, warn};

use super::{window_records, FeedRecord, ObservationSource, SourceError};

/// A source that drains newline-delimited JSON records from a reader.
///
/// The stream is read to EOF on the first fetch and buffered; later
/// fetches window the buffered records. Lines that fail to parse are
/// logged and skipped, since a live feed may interleave unrelated output.
///
/// # Example
///
/// ```
/// use std::io::Cursor;
/// use gatus_uptime::StreamSource;
///
/// let data = b"{\"created_at\":\"2024-05-01T10:00:00Z\"}\n";
/// let source = StreamSource::new(Cursor::new(data.to_vec()), "example");
/// ```
pub struct StreamSource<R> {
    reader: Option<BufReader<R>>,
    records: Vec<FeedRecord>,
    description: String,
    skipped: usize,
}

impl<R> StreamSource<R>
where
    R: AsyncRead + Unpin + Send,
{
    pub fn new(reader: R, description: &str) -> Self {
        Self {
            reader: Some(BufReader::new(reader)),
            records: Vec::new(),
            description: format!("stream: {}", description),
            skipped: 0,
        }
    }

    /// Number of lines that could not be parsed as records.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    async fn drain(&mut self) -> Result<(), SourceError> {
        let Some(mut reader) = self.reader.take() else {
            return Ok(());
        };

        let mut line = String::new();
        let mut line_no = 0;
        loop {
            line.clear();
            if reader.read_line(&mut line).await? == 0 {
                break;
            }
            line_no += 1;

            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            match serde_json::from_str::<FeedRecord>(trimmed) {
                Ok(record) => self.records.push(record),
                Err(e) => {
                    warn!(line = line_no, error = %e, "skipping unparseable feed line");
                    self.skipped += 1;
                }
            }
        }

        debug!(
            records = self.records.len(),
            skipped = self.skipped,
            "stream drained"
        );
        Ok(())
    }
}

#[async_trait]
impl<R> ObservationSource for StreamSource<R>
where
    R: AsyncRead + Unpin + Send,
{
    async fn fetch_after(&mut self, after: DateTime<Utc>) -> Result<Vec<FeedRecord>, SourceError> {
        self.drain().await?;
        Ok(window_records(&self.records, after))
    }

    fn description(&self) -> &str {
        &self.description
    }
}

impl<R> fmt::Debug for StreamSource<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamSource")
            .field("description", &self.description)
            .field("records", &self.records.len())
            .field("drained", &self.reader.is_none())
            .finish()
    }
}
