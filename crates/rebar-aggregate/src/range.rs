//! Price-range threshold resampling.

use rebar_types::{Bar, Numeric, Result};

use crate::Aggregate;
use crate::bucket::{check_contiguous, check_positive, check_present, fold_until};

/// Closes a bucket once its high-low range reaches a threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeBarAggregator<N> {
    range_threshold: N,
    only_final_bars: bool,
}

impl<N: Numeric> RangeBarAggregator<N> {
    /// Creates an aggregator that discards the dangling bucket.
    ///
    /// # Errors
    ///
    /// Returns [`rebar_types::AggregationError::InvalidParameter`] if the
    /// threshold is NaN, infinite, zero or negative.
    pub fn new(range_threshold: N) -> Result<Self> {
        Self::with_only_final_bars(range_threshold, true)
    }

    /// Creates an aggregator with an explicit dangling-bucket policy.
    ///
    /// # Errors
    ///
    /// See [`RangeBarAggregator::new`].
    pub fn with_only_final_bars(range_threshold: N, only_final_bars: bool) -> Result<Self> {
        Ok(Self {
            range_threshold: check_positive("range_threshold", range_threshold)?,
            only_final_bars,
        })
    }

    /// Returns the range at which a bucket closes.
    #[must_use]
    pub const fn range_threshold(&self) -> N {
        self.range_threshold
    }

    /// Returns whether a dangling bucket is discarded.
    #[must_use]
    pub const fn only_final_bars(&self) -> bool {
        self.only_final_bars
    }
}

impl<N: Numeric> Aggregate<N> for RangeBarAggregator<N> {
    fn name(&self) -> &'static str {
        "range"
    }

    fn aggregate(&self, bars: &[Bar<N>]) -> Result<Vec<Bar<N>>> {
        check_contiguous(bars)?;
        check_present(bars, "high", |bar| bar.high)?;
        check_present(bars, "low", |bar| bar.low)?;

        let output = fold_until(bars, self.only_final_bars, |bucket| {
            bucket.range() >= self.range_threshold
        });

        tracing::debug!(
            strategy = "range",
            threshold = ?self.range_threshold,
            input = bars.len(),
            output = output.len(),
            "aggregated bars"
        );
        Ok(output)
    }
}
