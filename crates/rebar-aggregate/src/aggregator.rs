//! The aggregation contract and the closed set of strategies.

use rebar_types::{Bar, Numeric, Result};
use serde::{Deserialize, Serialize};

use crate::{
    AggregatorConfig, DurationBarAggregator, HeikinAshiBarAggregator, RangeBarAggregator,
    RenkoBarAggregator, VolumeBarAggregator,
};

/// Turns an ordered bar sequence into a new ordered bar sequence.
///
/// Implementations keep no state between calls: all accumulation lives in
/// locals of [`Aggregate::aggregate`], so one instance can be shared across
/// threads and reused on independent inputs. Input is validated in full
/// before any output is produced.
pub trait Aggregate<N: Numeric> {
    /// Short strategy identifier used in logs.
    fn name(&self) -> &'static str;

    /// Aggregates `bars`, which must be ordered by strictly increasing end
    /// time. Empty input yields empty output.
    ///
    /// # Errors
    ///
    /// Returns an [`rebar_types::AggregationError`] if the input does not
    /// satisfy the strategy's requirements.
    fn aggregate(&self, bars: &[Bar<N>]) -> Result<Vec<Bar<N>>>;
}

/// Any one of the supported aggregation strategies.
///
/// Serializes through [`AggregatorConfig`]; deserializing validates the
/// parameters like the strategy constructors do.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "AggregatorConfig<N>",
    into = "AggregatorConfig<N>",
    bound(
        serialize = "N: Numeric + Serialize",
        deserialize = "N: Numeric + Deserialize<'de>"
    )
)]
pub enum BarAggregator<N> {
    /// Fixed time buckets.
    Duration(DurationBarAggregator),
    /// Cumulative volume threshold.
    Volume(VolumeBarAggregator<N>),
    /// Cumulative price-range threshold.
    Range(RangeBarAggregator<N>),
    /// Fixed-size bricks with a reversal gate.
    Renko(RenkoBarAggregator<N>),
    /// Recursive OHLC smoothing.
    HeikinAshi(HeikinAshiBarAggregator),
}

impl<N: Numeric> Aggregate<N> for BarAggregator<N> {
    fn name(&self) -> &'static str {
        match self {
            Self::Duration(agg) => Aggregate::<N>::name(agg),
            Self::Volume(agg) => agg.name(),
            Self::Range(agg) => agg.name(),
            Self::Renko(agg) => agg.name(),
            Self::HeikinAshi(agg) => Aggregate::<N>::name(agg),
        }
    }

    fn aggregate(&self, bars: &[Bar<N>]) -> Result<Vec<Bar<N>>> {
        match self {
            Self::Duration(agg) => agg.aggregate(bars),
            Self::Volume(agg) => agg.aggregate(bars),
            Self::Range(agg) => agg.aggregate(bars),
            Self::Renko(agg) => agg.aggregate(bars),
            Self::HeikinAshi(agg) => agg.aggregate(bars),
        }
    }
}

impl<N> From<DurationBarAggregator> for BarAggregator<N> {
    fn from(agg: DurationBarAggregator) -> Self {
        Self::Duration(agg)
    }
}

impl<N> From<VolumeBarAggregator<N>> for BarAggregator<N> {
    fn from(agg: VolumeBarAggregator<N>) -> Self {
        Self::Volume(agg)
    }
}

impl<N> From<RangeBarAggregator<N>> for BarAggregator<N> {
    fn from(agg: RangeBarAggregator<N>) -> Self {
        Self::Range(agg)
    }
}

impl<N> From<RenkoBarAggregator<N>> for BarAggregator<N> {
    fn from(agg: RenkoBarAggregator<N>) -> Self {
        Self::Renko(agg)
    }
}

impl<N> From<HeikinAshiBarAggregator> for BarAggregator<N> {
    fn from(agg: HeikinAshiBarAggregator) -> Self {
        Self::HeikinAshi(agg)
    }
}
