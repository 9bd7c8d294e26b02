//! Fixed-duration resampling.

use chrono::{DateTime, TimeDelta, Utc};
use rebar_types::{AggregationError, Bar, Numeric, Result, Timeframe};

use crate::Aggregate;
use crate::bucket::Bucket;

/// Regroups bars into buckets of a fixed length of time.
///
/// A bucket is anchored on the bar that opens it and spans `target_period`
/// from that bar's begin time. Gaps in the input are tolerated: a bar ending
/// past the current boundary closes the bucket and anchors the next one.
///
/// A trailing bucket that already reaches its boundary is complete and is
/// always emitted; only a partial trailing bucket is subject to
/// `only_final_bars`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DurationBarAggregator {
    target_period: TimeDelta,
    only_final_bars: bool,
}

impl DurationBarAggregator {
    /// Creates an aggregator for the given target period.
    ///
    /// When `only_final_bars` is true, a bucket still open at the end of the
    /// input is discarded.
    ///
    /// # Errors
    ///
    /// Returns [`AggregationError::InvalidParameter`] if `target_period` is
    /// zero or negative.
    pub fn new(target_period: TimeDelta, only_final_bars: bool) -> Result<Self> {
        if target_period <= TimeDelta::zero() {
            return Err(AggregationError::invalid_parameter(
                "target_period",
                format!("must be positive, got {target_period}"),
            ));
        }
        Ok(Self {
            target_period,
            only_final_bars,
        })
    }

    /// Creates an aggregator for a named timeframe.
    #[must_use]
    pub const fn from_timeframe(timeframe: Timeframe, only_final_bars: bool) -> Self {
        Self {
            target_period: timeframe.duration(),
            only_final_bars,
        }
    }

    /// Returns the target bucket length.
    #[must_use]
    pub const fn target_period(&self) -> TimeDelta {
        self.target_period
    }

    /// Returns whether a dangling bucket is discarded.
    #[must_use]
    pub const fn only_final_bars(&self) -> bool {
        self.only_final_bars
    }

    /// Opens a bucket on `bar`, returning it with its boundary.
    fn open_bucket<N: Numeric>(&self, bar: &Bar<N>) -> (Bucket<N>, DateTime<Utc>) {
        (Bucket::open(bar), bar.begin_time() + self.target_period)
    }
}

impl<N: Numeric> Aggregate<N> for DurationBarAggregator {
    fn name(&self) -> &'static str {
        "duration"
    }

    fn aggregate(&self, bars: &[Bar<N>]) -> Result<Vec<Bar<N>>> {
        let mut output = Vec::new();
        let mut current: Option<(Bucket<N>, DateTime<Utc>)> = None;

        for bar in bars {
            match current.take() {
                Some((mut bucket, boundary)) if bar.end_time <= boundary => {
                    bucket.push(bar);
                    current = Some((bucket, boundary));
                }
                Some((bucket, _)) => {
                    output.push(bucket.finish());
                    current = Some(self.open_bucket(bar));
                }
                None => current = Some(self.open_bucket(bar)),
            }
        }

        if let Some((bucket, boundary)) = current
            && (bucket.end_time() >= boundary || !self.only_final_bars)
        {
            output.push(bucket.finish());
        }

        tracing::debug!(
            strategy = "duration",
            period = %self.target_period,
            input = bars.len(),
            output = output.len(),
            "aggregated bars"
        );
        Ok(output)
    }
}
