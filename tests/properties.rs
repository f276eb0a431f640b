//! Invariants of the bin-and-accumulate pipeline over random inputs.

use prime_timeline::{BinConfig, Binner, accumulate, select_width};
use proptest::prelude::*;

fn timestamps() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(0.0f64..1_000.0, 1..400)
}

fn widths() -> impl Strategy<Value = f64> {
    prop_oneof![0.05f64..1.0, 1.0f64..50.0]
}

proptest! {
    #[test]
    fn counts_are_conserved(ts in timestamps(), w in widths()) {
        let h = Binner::new(w).unwrap().bin(&ts).unwrap();
        prop_assert_eq!(h.total(), ts.len() as u64);
    }

    #[test]
    fn cumulative_is_non_decreasing_and_ends_at_total(ts in timestamps(), w in widths()) {
        let c = accumulate(&Binner::new(w).unwrap().bin(&ts).unwrap());
        let counts: Vec<u64> = c.points().iter().map(|&(_, n)| n).collect();
        prop_assert!(counts.windows(2).all(|p| p[0] <= p[1]));
        prop_assert_eq!(c.total(), ts.len() as u64);
        prop_assert_eq!(c.len(), counts.len());
    }

    #[test]
    fn buckets_are_gapless_from_zero(ts in timestamps(), w in widths()) {
        let h = Binner::new(w).unwrap().bin(&ts).unwrap();
        let max_t = ts.iter().copied().fold(0.0, f64::max);

        prop_assert_eq!(h.len(), (max_t / w).floor() as usize + 1);
        for (i, (start, _)) in h.iter().enumerate() {
            prop_assert!((start - i as f64 * w).abs() <= 1e-9 * (1.0 + start.abs()));
        }
        // the latest event sits inside the last bucket
        let last = h.bucket(h.len() - 1);
        prop_assert!(last.start <= max_t + 1e-9 && max_t < last.end() + 1e-9);
    }

    #[test]
    fn every_event_lands_in_its_bucket(ts in timestamps(), w in widths()) {
        let h = Binner::new(w).unwrap().bin(&ts).unwrap();
        for &t in &ts {
            let i = (t / w).floor() as usize;
            prop_assert!(h.counts()[i] > 0);
        }
    }

    #[test]
    fn more_target_points_never_widen(max_t in 0.0f64..1e7, p in 1usize..100_000) {
        let narrow = BinConfig { target_points: p * 2, ..BinConfig::default() };
        let wide = BinConfig { target_points: p, ..BinConfig::default() };
        let w2 = select_width(max_t, &narrow).unwrap();
        let w1 = select_width(max_t, &wide).unwrap();
        prop_assert!(w2 <= w1);
        prop_assert!(w2 >= BinConfig::default().min_bin_width);
    }

    #[test]
    fn input_order_does_not_matter(mut ts in timestamps(), w in widths()) {
        let binner = Binner::new(w).unwrap();
        let before = binner.bin(&ts).unwrap();
        ts.reverse();
        prop_assert_eq!(before, binner.bin(&ts).unwrap());
    }
}
