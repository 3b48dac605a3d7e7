//! Interval timelines reconstructed from status observations.
//!
//! A timeline is a fold over one entity's observations. The first
//! observation seeds a zero-length interval holding the state *before*
//! the alert fired; every later observation either closes a new leg or
//! is absorbed as a repeat of the current state.

use chrono::{DateTime, TimeDelta, Utc};

use super::observation::Observation;

/// A completed span of constant status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    /// Length of the span. Never negative.
    pub duration: TimeDelta,
    /// When the span ended.
    pub end: DateTime<Utc>,
    /// The status that was active during the span.
    pub status: bool,
}

/// Ordered interval history for a single entity.
///
/// Always holds at least the seed interval, so there is always a last
/// leg to measure the open interval from.
#[derive(Debug, Clone)]
pub struct Timeline {
    entity: String,
    seed: Interval,
    legs: Vec<Interval>,
}

impl Timeline {
    /// Start a timeline from the entity's first observation.
    pub fn start(first: &Observation) -> Self {
        Self {
            entity: first.entity.clone(),
            seed: Interval {
                duration: TimeDelta::zero(),
                end: first.timestamp,
                status: !first.status,
            },
            legs: Vec::new(),
        }
    }

    /// Fold the next observation into the timeline.
    ///
    /// The last interval stores the complement of the previous report, so
    /// equality here means the report flipped. Repeats of the current state
    /// are consumed without effect. Returns whether a leg was appended.
    pub fn record(&mut self, observation: &Observation) -> bool {
        let last = *self.last();
        if last.status != observation.status {
            return false;
        }

        self.legs.push(Interval {
            duration: span(last.end, observation.timestamp),
            end: observation.timestamp,
            status: !observation.status,
        });
        true
    }

    /// Name of the entity this timeline tracks.
    pub fn entity(&self) -> &str {
        &self.entity
    }

    /// All completed intervals, seed first.
    pub fn intervals(&self) -> impl Iterator<Item = &Interval> + '_ {
        std::iter::once(&self.seed).chain(self.legs.iter())
    }

    /// Completed intervals backed by a detected flip (the seed excluded).
    pub fn legs(&self) -> &[Interval] {
        &self.legs
    }

    /// The most recent completed interval.
    pub fn last(&self) -> &Interval {
        self.legs.last().unwrap_or(&self.seed)
    }

    /// When the first observation arrived.
    pub fn started_at(&self) -> DateTime<Utc> {
        self.seed.end
    }

    /// The still-running span from the last leg until `now`.
    pub fn open_interval(&self, now: DateTime<Utc>) -> Interval {
        let last = self.last();
        Interval {
            duration: span(last.end, now),
            end: now,
            status: !last.status,
        }
    }

    /// Number of occurrences of `event`, counting the open interval.
    ///
    /// The seed does not represent an observed transition and is left out.
    pub fn total_events(&self, event: bool, now: DateTime<Utc>) -> usize {
        let matching = self.intervals().filter(|i| i.status == event).count();
        let seed = usize::from(self.seed.status == event);
        let open = usize::from(self.open_interval(now).status == event);
        matching - seed + open
    }

    /// Total time spent in `event`, counting the open interval.
    pub fn total_time(&self, event: bool, now: DateTime<Utc>) -> TimeDelta {
        let open = self.open_interval(now);
        let open = if open.status == event { open.duration } else { TimeDelta::zero() };

        self.intervals()
            .filter(|i| i.status == event)
            .fold(open, |total, i| total + i.duration)
    }

    pub fn total_ups(&self, now: DateTime<Utc>) -> usize {
        self.total_events(true, now)
    }

    pub fn total_downs(&self, now: DateTime<Utc>) -> usize {
        self.total_events(false, now)
    }

    pub fn time_up(&self, now: DateTime<Utc>) -> TimeDelta {
        self.total_time(true, now)
    }

    pub fn time_down(&self, now: DateTime<Utc>) -> TimeDelta {
        self.total_time(false, now)
    }

    /// Status of the open interval.
    pub fn current_status(&self) -> bool {
        !self.last().status
    }
}

/// Elapsed time between two instants, clamped at zero.
fn span(from: DateTime<Utc>, to: DateTime<Utc>) -> TimeDelta {
    (to - from).max(TimeDelta::zero())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(minutes: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap() + TimeDelta::minutes(minutes)
    }

    fn obs(minutes: i64, status: bool) -> Observation {
        Observation::new("api", at(minutes), status)
    }

    fn fold(observations: &[Observation]) -> Timeline {
        let mut timeline = Timeline::start(&observations[0]);
        for o in &observations[1..] {
            timeline.record(o);
        }
        timeline
    }

    #[test]
    fn test_single_up_observation() {
        let timeline = fold(&[obs(0, true)]);
        let now = at(60);

        assert!(timeline.legs().is_empty());
        assert!(!timeline.last().status);
        assert!(timeline.open_interval(now).status);
        assert_eq!(timeline.total_ups(now), 1);
        assert_eq!(timeline.total_downs(now), 0);
        assert_eq!(timeline.time_up(now), TimeDelta::minutes(60));
        assert_eq!(timeline.time_down(now), TimeDelta::zero());
        assert!(timeline.current_status());
    }

    #[test]
    fn test_repeated_status_is_folded_away() {
        let timeline = fold(&[obs(0, false), obs(10, false)]);
        let now = at(30);

        assert!(timeline.legs().is_empty());
        let open = timeline.open_interval(now);
        assert_eq!(open.duration, TimeDelta::minutes(30));
        assert!(!open.status);
        assert_eq!(timeline.total_downs(now), 1);
        assert_eq!(timeline.total_ups(now), 0);
    }

    #[test]
    fn test_up_then_down() {
        let timeline = fold(&[obs(0, true), obs(20, false)]);
        let now = at(30);

        assert_eq!(
            timeline.legs(),
            &[Interval {
                duration: TimeDelta::minutes(20),
                end: at(20),
                status: true,
            }]
        );
        let open = timeline.open_interval(now);
        assert_eq!(open.duration, TimeDelta::minutes(10));
        assert!(!open.status);

        assert_eq!(timeline.total_ups(now), 1);
        assert_eq!(timeline.total_downs(now), 1);
        assert_eq!(timeline.time_up(now), TimeDelta::minutes(20));
        assert_eq!(timeline.time_down(now), TimeDelta::minutes(10));
        assert!(!timeline.current_status());
    }

    #[test]
    fn test_statuses_alternate() {
        let timeline = fold(&[
            obs(0, false),
            obs(5, true),
            obs(6, true),
            obs(9, false),
            obs(12, false),
            obs(20, true),
        ]);

        let statuses: Vec<bool> = timeline.intervals().map(|i| i.status).collect();
        assert_eq!(statuses, vec![true, false, true, false]);
        for pair in statuses.windows(2) {
            assert_ne!(pair[0], pair[1]);
        }

        let ends: Vec<_> = timeline.intervals().map(|i| i.end).collect();
        assert!(ends.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_counts_are_one_more_than_flips() {
        let timeline = fold(&[obs(0, true), obs(5, false), obs(9, true), obs(11, true)]);
        let now = at(15);

        let flips = timeline.legs().len();
        assert_eq!(flips, 2);
        assert_eq!(timeline.total_ups(now) + timeline.total_downs(now), flips + 1);
    }

    #[test]
    fn test_durations_cover_whole_history() {
        let timeline = fold(&[obs(0, true), obs(7, false), obs(8, false), obs(30, true)]);
        let now = at(95);

        let total = timeline.time_up(now) + timeline.time_down(now);
        assert_eq!(total, now - timeline.started_at());
        assert_eq!(timeline.time_up(now), TimeDelta::minutes(7 + 65));
        assert_eq!(timeline.time_down(now), TimeDelta::minutes(23));
    }

    #[test]
    fn test_open_interval_clamped_before_last_leg() {
        let timeline = fold(&[obs(10, true)]);
        let open = timeline.open_interval(at(0));
        assert_eq!(open.duration, TimeDelta::zero());
    }
}
