//! Serde configuration for choosing and parameterising a strategy.

use chrono::TimeDelta;
use rebar_types::{AggregationError, Numeric, Timeframe};
use serde::{Deserialize, Serialize};

use crate::{
    BarAggregator, DurationBarAggregator, HeikinAshiBarAggregator, RangeBarAggregator,
    RenkoBarAggregator, VolumeBarAggregator,
};

/// Unvalidated strategy settings, as read from a config file.
///
/// Converting into a [`BarAggregator`] runs the same checks as the
/// strategy constructors, so an absent threshold fails exactly like an
/// invalid one.
///
/// ```
/// use rebar_aggregate::{AggregatorConfig, BarAggregator};
///
/// let config: AggregatorConfig<f64> =
///     serde_json::from_str(r#"{"kind": "renko", "brick_size": 0.5, "reversal_bricks": 2}"#)
///         .unwrap();
/// let aggregator = BarAggregator::try_from(config).unwrap();
/// assert!(matches!(aggregator, BarAggregator::Renko(_)));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AggregatorConfig<N> {
    /// Fixed time buckets. Exactly one of `timeframe` and `period_ms` must be set.
    Duration {
        /// Named target period.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        timeframe: Option<Timeframe>,
        /// Target period in milliseconds.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        period_ms: Option<i64>,
        /// Discard the dangling bucket.
        #[serde(default)]
        only_final_bars: bool,
    },
    /// Cumulative volume threshold.
    Volume {
        /// Volume at which a bucket closes.
        threshold: Option<N>,
        /// Discard the dangling bucket.
        #[serde(default = "default_only_final_bars")]
        only_final_bars: bool,
    },
    /// Cumulative price-range threshold.
    Range {
        /// Range at which a bucket closes.
        threshold: Option<N>,
        /// Discard the dangling bucket.
        #[serde(default = "default_only_final_bars")]
        only_final_bars: bool,
    },
    /// Renko bricks.
    Renko {
        /// Price height of one brick.
        brick_size: Option<N>,
        /// Bricks a reversal must span.
        #[serde(default = "default_reversal_bricks")]
        reversal_bricks: u32,
    },
    /// Heikin-Ashi smoothing.
    HeikinAshi,
}

const fn default_only_final_bars() -> bool {
    true
}

const fn default_reversal_bricks() -> u32 {
    1
}

fn required<N>(parameter: &'static str, value: Option<N>) -> Result<N, AggregationError> {
    value.ok_or_else(|| AggregationError::invalid_parameter(parameter, "is required"))
}

impl<N: Numeric> TryFrom<AggregatorConfig<N>> for BarAggregator<N> {
    type Error = AggregationError;

    fn try_from(config: AggregatorConfig<N>) -> Result<Self, Self::Error> {
        let aggregator: Self = match config {
            AggregatorConfig::Duration {
                timeframe,
                period_ms,
                only_final_bars,
            } => match (timeframe, period_ms) {
                (Some(timeframe), None) => {
                    DurationBarAggregator::from_timeframe(timeframe, only_final_bars).into()
                }
                (None, Some(millis)) => {
                    let period = TimeDelta::try_milliseconds(millis).ok_or_else(|| {
                        AggregationError::invalid_parameter("period_ms", "out of range")
                    })?;
                    DurationBarAggregator::new(period, only_final_bars)?.into()
                }
                (None, None) => {
                    return Err(AggregationError::invalid_parameter(
                        "target_period",
                        "one of `timeframe` or `period_ms` is required",
                    ));
                }
                (Some(_), Some(_)) => {
                    return Err(AggregationError::invalid_parameter(
                        "target_period",
                        "`timeframe` and `period_ms` are mutually exclusive",
                    ));
                }
            },
            AggregatorConfig::Volume {
                threshold,
                only_final_bars,
            } => VolumeBarAggregator::with_only_final_bars(
                required("volume_threshold", threshold)?,
                only_final_bars,
            )?
            .into(),
            AggregatorConfig::Range {
                threshold,
                only_final_bars,
            } => RangeBarAggregator::with_only_final_bars(
                required("range_threshold", threshold)?,
                only_final_bars,
            )?
            .into(),
            AggregatorConfig::Renko {
                brick_size,
                reversal_bricks,
            } => RenkoBarAggregator::new(required("brick_size", brick_size)?, reversal_bricks)?
                .into(),
            AggregatorConfig::HeikinAshi => HeikinAshiBarAggregator::new().into(),
        };
        Ok(aggregator)
    }
}

impl<N: Numeric> From<BarAggregator<N>> for AggregatorConfig<N> {
    fn from(aggregator: BarAggregator<N>) -> Self {
        match aggregator {
            BarAggregator::Duration(agg) => {
                let period = agg.target_period();
                let timeframe = Timeframe::all()
                    .iter()
                    .copied()
                    .find(|tf| tf.duration() == period);
                Self::Duration {
                    timeframe,
                    period_ms: timeframe.is_none().then(|| period.num_milliseconds()),
                    only_final_bars: agg.only_final_bars(),
                }
            }
            BarAggregator::Volume(agg) => Self::Volume {
                threshold: Some(agg.volume_threshold()),
                only_final_bars: agg.only_final_bars(),
            },
            BarAggregator::Range(agg) => Self::Range {
                threshold: Some(agg.range_threshold()),
                only_final_bars: agg.only_final_bars(),
            },
            BarAggregator::Renko(agg) => Self::Renko {
                brick_size: Some(agg.brick_size()),
                reversal_bricks: agg.reversal_bricks(),
            },
            BarAggregator::HeikinAshi(_) => Self::HeikinAshi,
        }
    }
}
