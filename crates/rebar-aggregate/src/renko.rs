//! Renko brick construction.

use chrono::{DateTime, TimeDelta, Utc};
use rebar_types::{AggregationError, Bar, Numeric, Result};

use crate::Aggregate;
use crate::bucket::{check_contiguous, check_finite, check_positive, check_present};

/// Builds fixed-size bricks from the closing-price sequence.
///
/// The first close seeds the anchor and emits nothing. A later close emits
/// one brick per whole `brick_size` it lies away from the anchor, moving the
/// anchor with each brick. A move against the current direction emits only
/// when it spans at least `reversal_bricks` bricks; a smaller adverse move
/// leaves the anchor and direction untouched.
///
/// Bricks produced by one source bar split its span evenly, at least one
/// nanosecond each. End times are strictly increasing as long as the span
/// holds one nanosecond per brick; beyond that the surplus bricks share the
/// source bar's end time. Volume, amount and trades accumulated since the
/// previous brick go to the last brick; the others carry zero. Activity
/// after the final brick is dropped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenkoBarAggregator<N> {
    brick_size: N,
    reversal_bricks: u32,
}

impl<N: Numeric> RenkoBarAggregator<N> {
    /// Creates a Renko aggregator.
    ///
    /// # Errors
    ///
    /// Returns [`AggregationError::InvalidParameter`] if `brick_size` is not
    /// a finite positive value or `reversal_bricks` is zero.
    pub fn new(brick_size: N, reversal_bricks: u32) -> Result<Self> {
        let brick_size = check_positive("brick_size", brick_size)?;
        if reversal_bricks == 0 {
            return Err(AggregationError::invalid_parameter(
                "reversal_bricks",
                "must be at least 1",
            ));
        }
        Ok(Self {
            brick_size,
            reversal_bricks,
        })
    }

    /// Returns the price height of one brick.
    #[must_use]
    pub const fn brick_size(&self) -> N {
        self.brick_size
    }

    /// Returns the number of bricks a reversal must span.
    #[must_use]
    pub const fn reversal_bricks(&self) -> u32 {
        self.reversal_bricks
    }
}

impl<N: Numeric> Aggregate<N> for RenkoBarAggregator<N> {
    fn name(&self) -> &'static str {
        "renko"
    }

    fn aggregate(&self, bars: &[Bar<N>]) -> Result<Vec<Bar<N>>> {
        check_contiguous(bars)?;
        check_present(bars, "close", |bar| bar.close)?;
        check_finite(bars, "close", |bar| bar.close)?;

        let Some((seed, rest)) = bars.split_first() else {
            return Ok(Vec::new());
        };

        let mut bricks = Vec::new();
        let mut state = BrickState::seed(seed);
        for (offset, bar) in rest.iter().enumerate() {
            state.advance(self, offset + 1, bar, &mut bricks)?;
        }

        tracing::debug!(
            strategy = "renko",
            brick_size = ?self.brick_size,
            reversal_bricks = self.reversal_bricks,
            input = bars.len(),
            output = bricks.len(),
            "aggregated bars"
        );
        Ok(bricks)
    }
}

/// Direction of the last emitted brick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Up,
    Down,
}

/// Per-call brick state.
#[derive(Debug)]
struct BrickState<N> {
    anchor: N,
    direction: Option<Direction>,
    pending: Pending<N>,
}

/// Source activity not yet attributed to a brick.
#[derive(Debug)]
struct Pending<N> {
    since: DateTime<Utc>,
    volume: N,
    amount: N,
    trades: u64,
}

impl<N: Numeric> Pending<N> {
    fn starting_at(since: DateTime<Utc>) -> Self {
        Self {
            since,
            volume: N::zero(),
            amount: N::zero(),
            trades: 0,
        }
    }

    fn add(&mut self, bar: &Bar<N>) {
        self.volume = self.volume + bar.volume;
        self.amount = self.amount + bar.amount;
        self.trades += bar.trades;
    }
}

impl<N: Numeric> BrickState<N> {
    fn seed(bar: &Bar<N>) -> Self {
        let mut pending = Pending::starting_at(bar.begin_time());
        pending.add(bar);
        Self {
            anchor: bar.close,
            direction: None,
            pending,
        }
    }

    fn advance(
        &mut self,
        config: &RenkoBarAggregator<N>,
        index: usize,
        bar: &Bar<N>,
        bricks: &mut Vec<Bar<N>>,
    ) -> Result<()> {
        self.pending.add(bar);

        let delta = bar.close - self.anchor;
        let distance = delta.abs();
        if distance < config.brick_size {
            return Ok(());
        }

        let count = (distance / config.brick_size)
            .floor_to_usize()
            .ok_or_else(|| {
                AggregationError::malformed_bar(index, "price move too large for brick size")
            })?;
        let direction = if delta > N::zero() {
            Direction::Up
        } else {
            Direction::Down
        };

        if let Some(current) = self.direction
            && current != direction
            && count < config.reversal_bricks as usize
        {
            tracing::trace!(index, count, "reversal below threshold");
            return Ok(());
        }

        self.direction = Some(direction);
        self.emit(config.brick_size, direction, count, bar.end_time, bricks);
        Ok(())
    }

    /// Emits `count` bricks ending at `end_time`.
    fn emit(
        &mut self,
        brick_size: N,
        direction: Direction,
        count: usize,
        end_time: DateTime<Utc>,
        bricks: &mut Vec<Bar<N>>,
    ) {
        let pending = std::mem::replace(&mut self.pending, Pending::starting_at(end_time));
        let step = brick_step(end_time - pending.since, count);
        let mut begin = pending.since;

        for k in 1..=count {
            let open = self.anchor;
            let close = match direction {
                Direction::Up => open + brick_size,
                Direction::Down => open - brick_size,
            };
            self.anchor = close;

            let brick = if k == count {
                Bar::new(
                    open,
                    open.max(close),
                    open.min(close),
                    close,
                    pending.volume,
                    pending.amount,
                    pending.trades,
                    end_time - begin,
                    end_time,
                )
            } else {
                let end = (begin + step).min(end_time);
                Bar::new(
                    open,
                    open.max(close),
                    open.min(close),
                    close,
                    N::zero(),
                    N::zero(),
                    0,
                    end - begin,
                    end,
                )
            };
            tracing::trace!(open = ?open, close = ?close, "brick");
            begin = brick.end_time;
            bricks.push(brick);
        }
    }
}

/// Duration of each of `count` bricks sharing `span`, never below 1ns.
fn brick_step(span: TimeDelta, count: usize) -> TimeDelta {
    let step = span / i32::try_from(count).unwrap_or(i32::MAX);
    step.max(TimeDelta::nanoseconds(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bucket::test_bars::{epoch, from_closes, from_prices};
    use approx::assert_relative_eq;

    fn closes_of<N: Numeric>(bricks: &[Bar<N>]) -> Vec<N> {
        bricks.iter().map(|brick| brick.close).collect()
    }

    fn run<N: Numeric>(brick_size: u32, reversal: u32, closes: &[u32]) -> Vec<Bar<N>> {
        let agg = RenkoBarAggregator::new(N::from_u32(brick_size), reversal).unwrap();
        agg.aggregate(&from_closes(TimeDelta::minutes(1), closes))
            .unwrap()
    }

    #[test]
    fn test_empty_input() {
        let agg = RenkoBarAggregator::new(2.0_f64, 2).unwrap();
        assert!(agg.aggregate(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_rejects_invalid_parameters() {
        assert!(matches!(
            RenkoBarAggregator::new(0.0_f64, 1),
            Err(AggregationError::InvalidParameter {
                parameter: "brick_size",
                ..
            })
        ));
        assert!(RenkoBarAggregator::new(f32::NAN, 1).is_err());
        assert!(RenkoBarAggregator::new(-1.0_f64, 1).is_err());
        assert!(matches!(
            RenkoBarAggregator::new(1.0_f64, 0),
            Err(AggregationError::InvalidParameter {
                parameter: "reversal_bricks",
                ..
            })
        ));
    }

    #[test]
    fn test_uptrend() {
        let bricks: Vec<Bar<f64>> = run(2, 2, &[100, 101, 103, 105, 107, 109]);
        assert_eq!(closes_of(&bricks), vec![102.0, 104.0, 106.0, 108.0]);

        let bricks: Vec<Bar<f32>> = run(2, 2, &[100, 101, 103, 105, 107, 109]);
        assert_eq!(closes_of(&bricks), vec![102.0, 104.0, 106.0, 108.0]);
    }

    #[test]
    fn test_fractional_bricks_are_exact_with_decimal() {
        use rust_decimal::Decimal;

        let closes = [1000, 1003, 1001, 999, 1006].map(|tenths| Decimal::new(tenths, 1));
        let tenth = Decimal::new(1, 1);
        let agg = RenkoBarAggregator::new(tenth, 2).unwrap();
        let bricks = agg
            .aggregate(&from_prices(TimeDelta::minutes(1), &closes))
            .unwrap();

        // 3 up, 2 down, 2 down, 7 up
        assert_eq!(bricks.len(), 14);
        assert_eq!(bricks[2].close, Decimal::new(1003, 1));
        assert_eq!(bricks[6].close, Decimal::new(999, 1));
        assert_eq!(bricks[13].close, Decimal::new(1006, 1));
        for brick in &bricks {
            assert_eq!((brick.close - brick.open).abs(), tenth);
        }
    }

    #[test]
    fn test_reversals() {
        let expected = [
            102.0, 104.0, 102.0, 100.0, 98.0, 96.0, 98.0, 100.0, 102.0, 104.0, 106.0,
        ];

        let bricks: Vec<Bar<f64>> = run(2, 2, &[100, 104, 99, 95, 101, 107]);
        assert_eq!(closes_of(&bricks), expected.to_vec());

        let bricks: Vec<Bar<f32>> = run(2, 2, &[100, 104, 99, 95, 101, 107]);
        let expected: Vec<f32> = expected.iter().map(|&c| c as f32).collect();
        assert_eq!(closes_of(&bricks), expected);
    }

    #[test]
    fn test_small_moves_emit_nothing() {
        let bricks: Vec<Bar<f64>> = run(5, 1, &[100, 101, 97, 103, 99, 104]);
        assert!(bricks.is_empty());
    }

    #[test]
    fn test_rejected_reversal_keeps_anchor() {
        // Up to 104, then a one-brick pullback that does not qualify, then a
        // drop that is judged against the unchanged 104 anchor.
        let bricks: Vec<Bar<f64>> = run(2, 2, &[100, 104, 102, 99]);
        assert_eq!(closes_of(&bricks), vec![102.0, 104.0, 102.0, 100.0]);

        let bricks: Vec<Bar<f64>> = run(2, 3, &[100, 104, 99, 104, 106]);
        assert_eq!(closes_of(&bricks), vec![102.0, 104.0, 106.0]);
    }

    #[test]
    fn test_single_brick_reversal() {
        let bricks: Vec<Bar<f64>> = run(2, 1, &[100, 104, 102]);
        assert_eq!(closes_of(&bricks), vec![102.0, 104.0, 102.0]);
        assert!(bricks[2].is_bearish());
    }

    #[test]
    fn test_brick_shape() {
        let bricks: Vec<Bar<f64>> = run(2, 2, &[100, 104, 99]);
        for brick in &bricks {
            assert_relative_eq!(brick.body(), 2.0);
            assert_eq!(brick.high, brick.open.max(brick.close));
            assert_eq!(brick.low, brick.open.min(brick.close));
        }
        assert_eq!(bricks[2].open, 104.0);
        assert_eq!(bricks[2].close, 102.0);
    }

    #[test]
    fn test_attribution_goes_to_last_brick() {
        let bricks: Vec<Bar<f64>> = run(2, 1, &[100, 101, 106]);
        assert_eq!(bricks.len(), 3);

        // Seed bar plus both following bars.
        assert_eq!(bricks[2].volume, 3.0);
        assert_eq!(bricks[2].trades, 3);
        assert_eq!(bricks[0].volume, 0.0);
        assert_eq!(bricks[1].trades, 0);

        // The three minutes are split across the bricks.
        for (n, brick) in (1..).zip(&bricks) {
            assert_eq!(brick.time_period, TimeDelta::minutes(1));
            assert_eq!(brick.end_time, epoch() + TimeDelta::minutes(n));
        }
    }

    #[test]
    fn test_output_times_are_contiguous() {
        let bricks: Vec<Bar<f64>> = run(1, 1, &[100, 107, 103, 111]);
        for pair in bricks.windows(2) {
            assert_eq!(pair[1].begin_time(), pair[0].end_time);
        }
    }

    #[test]
    fn test_brick_step_never_zero() {
        assert_eq!(brick_step(TimeDelta::minutes(3), 3), TimeDelta::minutes(1));
        assert_eq!(
            brick_step(TimeDelta::nanoseconds(3), 5),
            TimeDelta::nanoseconds(1)
        );
        assert_eq!(
            brick_step(TimeDelta::seconds(1), usize::MAX),
            TimeDelta::nanoseconds(1)
        );
    }

    #[test]
    fn test_rejects_missing_close() {
        let mut bars: Vec<Bar<f64>> = from_closes(TimeDelta::minutes(1), &[100, 102, 104]);
        bars[2].close = f64::NAN;

        let agg = RenkoBarAggregator::new(1.0_f64, 1).unwrap();
        assert_eq!(
            agg.aggregate(&bars),
            Err(AggregationError::malformed_bar(2, "missing close"))
        );
    }

    #[test]
    fn test_rejects_infinite_close() {
        let mut bars: Vec<Bar<f64>> = from_closes(TimeDelta::minutes(1), &[100, 102, 104]);
        bars[1].close = f64::INFINITY;

        let agg = RenkoBarAggregator::new(1.0_f64, 1).unwrap();
        assert_eq!(
            agg.aggregate(&bars),
            Err(AggregationError::malformed_bar(1, "close is not finite"))
        );
    }

    #[test]
    fn test_rejects_non_uniform_input() {
        let mut bars: Vec<Bar<f64>> = from_closes(TimeDelta::minutes(1), &[100, 102, 104]);
        bars[1].time_period = TimeDelta::seconds(30);

        let agg = RenkoBarAggregator::new(1.0_f64, 1).unwrap();
        assert!(matches!(
            agg.aggregate(&bars),
            Err(AggregationError::InconsistentInput { index: 1, .. })
        ));
    }

    #[test]
    fn test_instance_is_reusable() {
        let agg = RenkoBarAggregator::new(2.0_f64, 2).unwrap();
        let bars: Vec<Bar<f64>> = from_closes(TimeDelta::minutes(1), &[100, 104, 99]);
        assert_eq!(agg.aggregate(&bars).unwrap(), agg.aggregate(&bars).unwrap());
    }
}
