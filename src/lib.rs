//! # gatus-uptime
//!
//! Uptime timelines and availability statistics reconstructed from the
//! alert messages Gatus posts to a chat channel.
//!
//! Each alert marks the moment an endpoint went up or down. This crate
//! reads a window of those alerts, folds them into one interval timeline
//! per endpoint and reports uptime percentage, time up and down, the number
//! of up and down transitions, and the current status.
//!
//! ## Architecture
//!
//! ```text
//!  FileSource | StreamSource | MemorySource
//!                  │
//!                  ▼
//!  ┌──────────┐   ┌──────────┐   ┌────────────┐   ┌──────────┐   ┌──────────┐
//!  │  source  │──▶│ extract  │──▶│ collector  │──▶│   data   │──▶│  report  │
//!  │ (input)  │   │          │   │ (window)   │   │ (engine) │   │ (output) │
//!  └──────────┘   └──────────┘   └────────────┘   └──────────┘   └──────────┘
//!                                      ▲
//!  settings ──▶ commands ──────────────┘  (setchannel, metrics)
//! ```
//!
//! - **[`source`]**: Feed abstraction ([`ObservationSource`] trait) with file,
//!   stream and in-memory implementations
//! - **[`extract`]**: Turns alert payloads into [`Observation`]s
//! - **[`collector`]**: Applies the look-back window and the extractor
//! - **[`data`]**: Timeline reconstruction and per-entity [`EntityStats`]
//! - **[`report`]**: Text and JSON rendering
//! - **[`settings`]**: Per-tenant target channel persistence
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Point the "default" tenant at channel 1234 (feeds/1234.json)
//! gatus-uptime setchannel 1234 --admin
//!
//! # Report on the last 14 days
//! gatus-uptime metrics --days 14
//!
//! # Read NDJSON records from stdin instead of the feed file
//! cat export.ndjson | gatus-uptime metrics --stdin --json
//! ```
//!
//! ### As a library
//!
//! ```
//! use chrono::{TimeDelta, Utc};
//! use gatus_uptime::{build_timelines_at, Observation};
//!
//! let now = Utc::now();
//! let observations = vec![
//!     Observation::new("api", now - TimeDelta::hours(10), false),
//!     Observation::new("api", now - TimeDelta::hours(9), true),
//! ];
//!
//! let stats = build_timelines_at(&observations, now);
//! assert_eq!(stats[0].entity(), "api");
//! assert!(stats[0].current_status);
//! assert!((stats[0].uptime_percentage - 90.0).abs() < 1e-6);
//! ```
//!
//! ### Collecting from a source
//!
//! ```
//! use gatus_uptime::{collect, ExtractorRules, LookbackWindow, MemorySource};
//!
//! # tokio_test::block_on(async {
//! let mut source = MemorySource::new(Vec::new(), "fixture");
//! let observations = collect(&mut source, &LookbackWindow::default(), &ExtractorRules::default())
//!     .await
//!     .unwrap();
//! assert!(observations.is_empty());
//! # });
//! ```

pub mod collector;
pub mod commands;
pub mod config;
pub mod data;
pub mod error;
pub mod extract;
pub mod logging;
pub mod report;
pub mod settings;
pub mod source;

// Re-export main types for convenience
pub use collector::{collect, LookbackWindow};
pub use config::AppConfig;
pub use data::{
    build_timelines, build_timelines_at, EntityStats, Interval, Observation, Timeline, UptimeTier,
};
pub use error::UptimeError;
pub use extract::{AlertPayload, ExtractorRules};
pub use report::Report;
pub use settings::{JsonSettingsStore, MemorySettingsStore, SettingsError, SettingsStore};
pub use source::{
    Embed, EmbedField, FeedRecord, FileSource, MemorySource, ObservationSource, SourceError,
    StreamSource,
};
