use std::time::{Duration, Instant};

use proptest::prelude::*;
use pulsetop::system::rate::RateTracker;

proptest! {
    #[test]
    fn first_update_is_always_zero(value in any::<u64>()) {
        let mut tracker = RateTracker::new("prop");
        prop_assert_eq!(tracker.update_at(value, Instant::now()), 0.0);
    }

    #[test]
    fn rate_matches_delta_over_interval(
        start in 0u64..1_000_000_000_000,
        delta in 0u64..1_000_000_000,
        millis in 1u64..60_000,
    ) {
        let t0 = Instant::now();
        let t1 = t0 + Duration::from_millis(millis);
        let mut tracker = RateTracker::new("prop");
        tracker.update_at(start, t0);
        let rate = tracker.update_at(start + delta, t1);

        let expected = delta as f64 / (millis as f64 / 1_000.0);
        let tolerance = expected.abs() * 1e-9 + 1e-9;
        prop_assert!(
            (rate - expected).abs() <= tolerance,
            "rate {} vs expected {}", rate, expected
        );
    }

    #[test]
    fn decrease_yields_exactly_zero(
        high in 1u64..u64::MAX,
        drop in 1u64..1_000_000,
        millis in 0u64..10_000,
    ) {
        let low = high.saturating_sub(drop);
        let t0 = Instant::now();
        let mut tracker = RateTracker::new("prop");
        tracker.update_at(high, t0);
        prop_assert_eq!(
            tracker.update_at(low, t0 + Duration::from_millis(millis)),
            0.0
        );
        prop_assert_eq!(tracker.last().map(|o| o.value), Some(low));
    }

    #[test]
    fn rates_are_never_negative(
        values in prop::collection::vec(any::<u64>(), 1..50),
        gaps in prop::collection::vec(0u64..5_000, 50),
    ) {
        let mut now = Instant::now();
        let mut tracker = RateTracker::new("prop");
        for (value, gap) in values.iter().zip(gaps.iter()) {
            now += Duration::from_millis(*gap);
            let rate = tracker.update_at(*value, now);
            prop_assert!(rate >= 0.0 && rate.is_finite(), "bad rate {}", rate);
        }
    }

    #[test]
    fn reset_restores_bootstrap(a in any::<u64>(), b in any::<u64>()) {
        let t0 = Instant::now();
        let mut tracker = RateTracker::new("prop");
        tracker.update_at(a, t0);
        tracker.reset();
        prop_assert_eq!(tracker.update_at(b, t0 + Duration::from_secs(1)), 0.0);
    }
}
