//! File-based observation source.
//!
//! Reads an exported channel history from disk.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::debug;

use super::{window_records, FeedRecord, ObservationSource, SourceError};

/// A source that reads feed records from a JSON file.
///
/// The file holds either a JSON array of records or newline-delimited
/// JSON (one record per line). The file is re-read on every fetch, so an
/// exporter can keep appending to it between runs.
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    description: String,
}

impl FileSource {
    /// Create a new file source for the given path.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let description = format!("file: {}", path.display());
        Self { path, description }
    }

    /// Returns the path being read.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_records(&self) -> Result<Vec<FeedRecord>, SourceError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(SourceError::NotFound(self.path.clone()));
            }
            Err(e) => return Err(e.into()),
        };
        parse_records(&content)
    }
}

/// Parse a JSON array or newline-delimited JSON into records.
fn parse_records(content: &str) -> Result<Vec<FeedRecord>, SourceError> {
    let trimmed = content.trim_start();
    if trimmed.starts_with('[') {
        return serde_json::from_str(trimmed).map_err(|e| SourceError::Parse {
            line: e.line(),
            message: e.to_string(),
        });
    }

    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            serde_json::from_str(line).map_err(|e| SourceError::Parse {
                line: i + 1,
                message: e.to_string(),
            })
        })
        .collect()
}

#[async_trait]
impl ObservationSource for FileSource {
    async fn fetch_after(&mut self, after: DateTime<Utc>) -> Result<Vec<FeedRecord>, SourceError> {
        let records = self.read_records().await?;
        let selected = window_records(&records, after);
        debug!(
            path = %self.path.display(),
            total = records.len(),
            in_window = selected.len(),
            "read feed file"
        );
        Ok(selected)
    }

    fn description(&self) -> &str {
        &self.description
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn sample_ndjson() -> &'static str {
        concat!(
            r#"{"created_at":"2024-05-01T10:00:00Z","embeds":[{"title":"t","fields":[{"value":"x"}]}]}"#,
            "\n\n",
            r#"{"created_at":"2024-05-01T09:00:00Z","embeds":[]}"#,
            "\n",
        )
    }

    fn epoch() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_file_source_new() {
        let source = FileSource::new("/tmp/feed.json");
        assert_eq!(source.path(), Path::new("/tmp/feed.json"));
        assert_eq!(source.description(), "file: /tmp/feed.json");
    }

    #[tokio::test]
    async fn test_file_source_reads_ndjson_oldest_first() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", sample_ndjson()).unwrap();

        let mut source = FileSource::new(file.path());
        let records = source.fetch_after(epoch()).await.unwrap();

        assert_eq!(records.len(), 2);
        assert!(records[0].embeds.is_empty());
        assert_eq!(records[1].embeds.len(), 1);
    }

    #[tokio::test]
    async fn test_file_source_reads_json_array() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"[{{"created_at":"2024-05-01T10:00:00Z"}},{{"created_at":"2024-05-02T10:00:00Z"}}]"#
        )
        .unwrap();

        let mut source = FileSource::new(file.path());
        let after = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let records = source.fetch_after(after).await.unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].created_at, Utc.with_ymd_and_hms(2024, 5, 2, 10, 0, 0).unwrap());
    }

    #[tokio::test]
    async fn test_file_source_missing_file() {
        let mut source = FileSource::new("/nonexistent/path/feed.json");

        let err = source.fetch_after(epoch()).await.unwrap_err();
        assert!(matches!(err, SourceError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_file_source_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"created_at":"2024-05-01T10:00:00Z"}}"#).unwrap();
        writeln!(file, "not valid json").unwrap();

        let mut source = FileSource::new(file.path());

        let err = source.fetch_after(epoch()).await.unwrap_err();
        assert!(matches!(err, SourceError::Parse { line: 2, .. }));
        assert!(err.to_string().contains("Parse error"));
    }
}
