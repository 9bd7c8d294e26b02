//! Volume-threshold resampling.

use rebar_types::{Bar, Numeric, Result};

use crate::Aggregate;
use crate::bucket::{check_contiguous, check_finite, check_positive, check_present, fold_until};

/// Closes a bucket once its cumulative volume reaches a threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolumeBarAggregator<N> {
    volume_threshold: N,
    only_final_bars: bool,
}

impl<N: Numeric> VolumeBarAggregator<N> {
    /// Creates an aggregator that discards the dangling bucket.
    ///
    /// # Errors
    ///
    /// Returns [`rebar_types::AggregationError::InvalidParameter`] if the
    /// threshold is NaN, infinite, zero or negative.
    pub fn new(volume_threshold: N) -> Result<Self> {
        Self::with_only_final_bars(volume_threshold, true)
    }

    /// Creates an aggregator with an explicit dangling-bucket policy.
    ///
    /// # Errors
    ///
    /// See [`VolumeBarAggregator::new`].
    pub fn with_only_final_bars(volume_threshold: N, only_final_bars: bool) -> Result<Self> {
        Ok(Self {
            volume_threshold: check_positive("volume_threshold", volume_threshold)?,
            only_final_bars,
        })
    }

    /// Returns the volume at which a bucket closes.
    #[must_use]
    pub const fn volume_threshold(&self) -> N {
        self.volume_threshold
    }

    /// Returns whether a dangling bucket is discarded.
    #[must_use]
    pub const fn only_final_bars(&self) -> bool {
        self.only_final_bars
    }
}

impl<N: Numeric> Aggregate<N> for VolumeBarAggregator<N> {
    fn name(&self) -> &'static str {
        "volume"
    }

    fn aggregate(&self, bars: &[Bar<N>]) -> Result<Vec<Bar<N>>> {
        check_contiguous(bars)?;
        check_present(bars, "volume", |bar| bar.volume)?;
        check_finite(bars, "volume", |bar| bar.volume)?;

        let output = fold_until(bars, self.only_final_bars, |bucket| {
            bucket.volume >= self.volume_threshold
        });

        tracing::debug!(
            strategy = "volume",
            threshold = ?self.volume_threshold,
            input = bars.len(),
            output = output.len(),
            "aggregated bars"
        );
        Ok(output)
    }
}
