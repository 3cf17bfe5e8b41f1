use std::time::Instant;

/// Smallest interval, in seconds, a rate is ever divided by.
pub const MIN_INTERVAL_SECS: f64 = 1e-6;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Observation {
    pub at: Instant,
    pub value: u64,
}

/// Turns one cumulative counter into a per-second rate.
///
/// Only the most recent observation is kept. The first reading and any
/// reading below the previous one (a counter restart) both yield `0.0` and
/// re-anchor the tracker at the new value.
#[derive(Clone, Debug)]
pub struct RateTracker {
    label: &'static str,
    last: Option<Observation>,
}

impl RateTracker {
    pub fn new(label: &'static str) -> Self {
        Self { label, last: None }
    }

    pub fn last(&self) -> Option<Observation> {
        self.last
    }

    pub fn update(&mut self, current: u64) -> f64 {
        self.update_at(current, Instant::now())
    }

    pub fn update_at(&mut self, current: u64, now: Instant) -> f64 {
        let previous = self.last.replace(Observation {
            at: now,
            value: current,
        });

        let Some(previous) = previous else {
            return 0.0;
        };

        if current < previous.value {
            tracing::debug!(
                counter = self.label,
                previous = previous.value,
                current,
                "counter went backwards, re-anchoring"
            );
            return 0.0;
        }

        // `saturating_duration_since` keeps an out-of-order clock at zero.
        let elapsed = now
            .saturating_duration_since(previous.at)
            .as_secs_f64()
            .max(MIN_INTERVAL_SECS);
        let rate = (current - previous.value) as f64 / elapsed;
        rate.max(0.0)
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn first_update_bootstraps_to_zero() {
        let mut tracker = RateTracker::new("test");
        assert_eq!(tracker.update(5_000_000), 0.0);
        assert_eq!(tracker.last().map(|o| o.value), Some(5_000_000));
    }

    #[test]
    fn steady_growth_is_divided_by_elapsed_seconds() {
        let start = Instant::now();
        let mut tracker = RateTracker::new("test");
        tracker.update_at(1_000, start);
        let rate = tracker.update_at(3_000, start + Duration::from_secs(2));
        assert!((rate - 1_000.0).abs() < 1e-9);
    }

    #[test]
    fn backwards_counter_reports_zero_and_reanchors() {
        let start = Instant::now();
        let mut tracker = RateTracker::new("test");
        tracker.update_at(10_000, start);
        let rate = tracker.update_at(400, start + Duration::from_secs(1));
        assert_eq!(rate, 0.0);
        assert_eq!(tracker.last().map(|o| o.value), Some(400));

        // Growth after the restart is measured from the new anchor.
        let rate = tracker.update_at(1_400, start + Duration::from_secs(2));
        assert!((rate - 1_000.0).abs() < 1e-9);
    }

    #[test]
    fn zero_interval_uses_the_floor() {
        let now = Instant::now();
        let mut tracker = RateTracker::new("test");
        tracker.update_at(0, now);
        let rate = tracker.update_at(1, now);
        assert!(rate.is_finite());
        assert!((rate - 1.0 / MIN_INTERVAL_SECS).abs() < 1e-3);
    }

    #[test]
    fn unchanged_counter_is_zero_rate() {
        let start = Instant::now();
        let mut tracker = RateTracker::new("test");
        tracker.update_at(42, start);
        assert_eq!(
            tracker.update_at(42, start + Duration::from_millis(500)),
            0.0
        );
    }

    #[test]
    fn observation_is_replaced_on_every_branch() {
        let start = Instant::now();
        let later = start + Duration::from_secs(1);
        let mut tracker = RateTracker::new("test");

        tracker.update_at(100, start);
        assert_eq!(tracker.last().map(|o| o.at), Some(start));

        tracker.update_at(50, later);
        assert_eq!(
            tracker.last(),
            Some(Observation {
                at: later,
                value: 50
            })
        );
    }

    #[test]
    fn reset_forgets_the_anchor() {
        let start = Instant::now();
        let mut tracker = RateTracker::new("test");
        tracker.update_at(100, start);
        tracker.reset();
        assert!(tracker.last().is_none());
        assert_eq!(tracker.update_at(900, start + Duration::from_secs(1)), 0.0);
    }
}
