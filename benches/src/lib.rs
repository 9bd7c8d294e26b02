//! Benchmark fixtures for rebar.
//!
//! Provides a deterministic synthetic bar series so benchmark runs are
//! comparable across machines and commits.

use chrono::{TimeDelta, TimeZone, Utc};
use rebar_lib::{Bar, Numeric};

/// Generates `count` contiguous one-minute bars following a bounded
/// zig-zag walk around 100.
///
/// The walk is driven by a fixed linear congruential sequence, so the same
/// `count` always yields the same bars.
#[must_use]
pub fn synthetic_bars<N: Numeric>(count: u32) -> Vec<Bar<N>> {
    let start = Utc
        .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or_default();
    let minute = TimeDelta::minutes(1);
    let hundredth = N::from_u32(1) / N::from_u32(100);

    let mut state: u32 = 0x2545_f491;
    let mut price_cents: u32 = 10_000;
    let mut bars = Vec::with_capacity(count as usize);

    for n in 0..count {
        state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        let step = (state >> 24) % 41;
        let open = price_cents;
        price_cents = (price_cents + step).saturating_sub(20).clamp(9_000, 11_000);
        let close = price_cents;
        let wick = (state >> 16) % 15;

        let to_price = |cents: u32| N::from_u32(cents) * hundredth;
        let volume = N::from_u32(1 + (state >> 8) % 500);
        let end_time = start + minute * i32::try_from(n + 1).unwrap_or(i32::MAX);

        bars.push(Bar::new(
            to_price(open),
            to_price(open.max(close) + wick),
            to_price(open.min(close).saturating_sub(wick)),
            to_price(close),
            volume,
            volume * to_price(close),
            u64::from(1 + (state >> 4) % 50),
            minute,
            end_time,
        ));
    }

    bars
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synthetic_bars_are_contiguous() {
        let bars: Vec<Bar<f64>> = synthetic_bars(500);
        assert_eq!(bars.len(), 500);
        for pair in bars.windows(2) {
            assert_eq!(pair[1].begin_time(), pair[0].end_time);
        }
        for bar in &bars {
            assert!(bar.high >= bar.open.max(bar.close));
            assert!(bar.low <= bar.open.min(bar.close));
        }
    }

    #[test]
    fn test_synthetic_bars_are_deterministic() {
        let a: Vec<Bar<f32>> = synthetic_bars(64);
        let b: Vec<Bar<f32>> = synthetic_bars(64);
        assert_eq!(a, b);
    }
}
