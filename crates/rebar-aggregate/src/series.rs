//! Whole-series resampling.

use rebar_types::{BarSeries, Numeric, Result};

use crate::Aggregate;

/// Applies one strategy to a full [`BarSeries`].
///
/// The source series is never modified; each call builds a new series of
/// the same numeric family.
#[derive(Debug, Clone)]
pub struct SeriesAggregator<A> {
    aggregator: A,
}

impl<A> SeriesAggregator<A> {
    /// Creates an orchestrator around `aggregator`.
    #[must_use]
    pub const fn new(aggregator: A) -> Self {
        Self { aggregator }
    }

    /// Returns the wrapped strategy.
    #[must_use]
    pub const fn aggregator(&self) -> &A {
        &self.aggregator
    }

    /// Resamples `series`, keeping its name.
    ///
    /// # Errors
    ///
    /// Propagates any validation error from the strategy.
    pub fn aggregate<N>(&self, series: &BarSeries<N>) -> Result<BarSeries<N>>
    where
        N: Numeric,
        A: Aggregate<N>,
    {
        self.aggregate_as(series, series.name())
    }

    /// Resamples `series` into a series called `name`.
    ///
    /// # Errors
    ///
    /// Propagates any validation error from the strategy.
    pub fn aggregate_as<N>(
        &self,
        series: &BarSeries<N>,
        name: impl Into<String>,
    ) -> Result<BarSeries<N>>
    where
        N: Numeric,
        A: Aggregate<N>,
    {
        let name = name.into();
        tracing::debug!(
            source = series.name(),
            target = %name,
            strategy = self.aggregator.name(),
            "resampling series"
        );
        let bars = self.aggregator.aggregate(series.bars())?;
        Ok(BarSeries::new(name, bars))
    }
}
