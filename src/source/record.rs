//! Shared types for raw feed records.
//!
//! These types match the shape of an exported chat channel history: each
//! message carries a creation time and zero or more rich embeds, and an
//! alerting bot posts its notifications as embeds.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One message from the feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedRecord {
    /// When the message was posted.
    pub created_at: DateTime<Utc>,

    /// Structured payloads attached to the message.
    #[serde(default)]
    pub embeds: Vec<Embed>,
}

/// A structured payload attached to a feed record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Embed {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Ordered fields; only their values are inspected.
    #[serde(default)]
    pub fields: Vec<EmbedField>,
}

/// A single name/value field of an embed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmbedField {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    pub value: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_record() {
        let json = r#"{
            "created_at": "2024-05-01T12:30:00Z",
            "embeds": [
                {
                    "title": ":helmet_with_white_cross: Gatus",
                    "description": "An alert for **api** has been resolved",
                    "fields": [
                        { "name": "Condition results", "value": ":white_check_mark: - [STATUS] == 200" }
                    ]
                }
            ]
        }"#;

        let record: FeedRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.created_at.to_rfc3339(), "2024-05-01T12:30:00+00:00");
        assert_eq!(record.embeds.len(), 1);

        let embed = &record.embeds[0];
        assert!(embed.title.as_deref().unwrap().contains("Gatus"));
        assert_eq!(embed.fields.len(), 1);
        assert_eq!(embed.fields[0].name.as_deref(), Some("Condition results"));
    }

    #[test]
    fn test_deserialize_record_without_embeds() {
        let json = r#"{ "created_at": "2024-05-01T12:30:00+02:00" }"#;

        let record: FeedRecord = serde_json::from_str(json).unwrap();
        assert!(record.embeds.is_empty());
        assert_eq!(record.created_at.to_rfc3339(), "2024-05-01T10:30:00+00:00");
    }
}
