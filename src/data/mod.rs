//! Data models and the timeline engine.
//!
//! This module turns extracted observations into interval timelines and
//! availability statistics.
//!
//! ## Submodules
//!
//! - [`duration`]: Parsing and formatting of spans (e.g., "7d", "2d 5h 7m")
//! - [`observation`]: The [`Observation`] record produced by the extractor
//! - [`timeline`]: Transition detection ([`Timeline`], [`Interval`])
//! - [`stats`]: Per-entity metrics and ordering ([`EntityStats`], [`build_timelines`])
//!
//! ## Data Flow
//!
//! ```text
//! Vec<Observation> (source order)
//!        │
//!        ▼
//! fold_timelines()  ── partition by entity, fold each group
//!        │
//!        ▼
//! EntityStats::compute(timeline, now)
//!        │
//!        └──▶ sorted by uptime, best first
//! ```

pub mod duration;
pub mod observation;
pub mod stats;
pub mod timeline;

pub use observation::Observation;
pub use stats::{build_timelines, build_timelines_at, fold_timelines, EntityStats, UptimeTier};
pub use timeline::{Interval, Timeline};
