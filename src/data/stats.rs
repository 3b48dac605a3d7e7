//! Per-entity availability statistics.
//!
//! [`build_timelines`] is the engine entry point: it partitions a flat list
//! of observations by entity, folds each group into a [`Timeline`] and
//! computes [`EntityStats`] against a single "now".

use std::collections::HashMap;

use chrono::{DateTime, TimeDelta, Utc};
use tracing::debug;

use super::observation::Observation;
use super::timeline::Timeline;

/// Uptime percentage at or above which a service is healthy.
pub const HEALTHY_UPTIME: f64 = 99.0;
/// Uptime percentage at or above which a service is degraded rather than critical.
pub const DEGRADED_UPTIME: f64 = 95.0;

/// Coarse classification of an uptime percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum UptimeTier {
    Healthy,
    Degraded,
    Critical,
}

impl UptimeTier {
    pub fn from_percentage(uptime: f64) -> Self {
        if uptime >= HEALTHY_UPTIME {
            UptimeTier::Healthy
        } else if uptime >= DEGRADED_UPTIME {
            UptimeTier::Degraded
        } else {
            UptimeTier::Critical
        }
    }

    /// Returns a short symbol for display.
    pub fn symbol(&self) -> &'static str {
        match self {
            UptimeTier::Healthy => "🟢",
            UptimeTier::Degraded => "🟡",
            UptimeTier::Critical => "🔴",
        }
    }
}

/// Availability metrics for one entity, derived from its timeline.
#[derive(Debug, Clone)]
pub struct EntityStats {
    pub timeline: Timeline,
    pub total_ups: usize,
    pub total_downs: usize,
    pub time_up: TimeDelta,
    pub time_down: TimeDelta,
    pub uptime_percentage: f64,
    pub current_status: bool,
}

impl EntityStats {
    /// Compute metrics for a timeline as of `now`.
    pub fn compute(timeline: Timeline, now: DateTime<Utc>) -> Self {
        let time_up = timeline.time_up(now);
        let time_down = timeline.time_down(now);

        Self {
            total_ups: timeline.total_ups(now),
            total_downs: timeline.total_downs(now),
            uptime_percentage: uptime_percentage(time_up, time_down),
            current_status: timeline.current_status(),
            time_up,
            time_down,
            timeline,
        }
    }

    pub fn entity(&self) -> &str {
        self.timeline.entity()
    }

    pub fn tier(&self) -> UptimeTier {
        UptimeTier::from_percentage(self.uptime_percentage)
    }
}

/// Share of `up` in `up + down`, as a percentage. 100.0 when there is no
/// elapsed time at all.
pub fn uptime_percentage(up: TimeDelta, down: TimeDelta) -> f64 {
    let up = up.num_milliseconds() as f64;
    let total = up + down.num_milliseconds() as f64;
    if total > 0.0 {
        up / total * 100.0
    } else {
        100.0
    }
}

/// Group observations by entity and fold each group into a timeline.
///
/// Entities come out in first-seen order and each group keeps its arrival
/// order. Input is assumed to be chronological per entity; it is not
/// re-sorted here.
pub fn fold_timelines(observations: &[Observation]) -> Vec<Timeline> {
    let mut timelines: Vec<Timeline> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for observation in observations {
        match index.get(observation.entity.as_str()) {
            Some(&i) => {
                timelines[i].record(observation);
            }
            None => {
                index.insert(&observation.entity, timelines.len());
                timelines.push(Timeline::start(observation));
            }
        }
    }

    timelines
}

/// Build per-entity statistics against the current wall clock.
pub fn build_timelines(observations: &[Observation]) -> Vec<EntityStats> {
    build_timelines_at(observations, Utc::now())
}

/// Build per-entity statistics as of `now`, best uptime first.
///
/// Ties keep first-seen order.
pub fn build_timelines_at(observations: &[Observation], now: DateTime<Utc>) -> Vec<EntityStats> {
    let mut stats: Vec<EntityStats> = fold_timelines(observations)
        .into_iter()
        .map(|timeline| EntityStats::compute(timeline, now))
        .collect();

    stats.sort_by(|a, b| b.uptime_percentage.total_cmp(&a.uptime_percentage));

    debug!(
        observations = observations.len(),
        entities = stats.len(),
        "built timelines"
    );
    stats
}
