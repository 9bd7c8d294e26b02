//! Bar aggregation for rebar.
//!
//! This crate resamples ordered OHLCV bars under one of five policies:
//!
//! - [`DurationBarAggregator`] - Fixed time buckets, tolerant of gaps
//! - [`VolumeBarAggregator`] - Buckets closed by cumulative volume
//! - [`RangeBarAggregator`] - Buckets closed by cumulative high-low range
//! - [`RenkoBarAggregator`] - Fixed-size bricks with a reversal gate
//! - [`HeikinAshiBarAggregator`] - Recursive OHLC smoothing
//!
//! All of them implement [`Aggregate`]; [`BarAggregator`] is the closed set
//! of strategies, [`AggregatorConfig`] its serde form, and
//! [`SeriesAggregator`] applies a strategy to a whole
//! [`BarSeries`](rebar_types::BarSeries).

#![doc(issue_tracker_base_url = "https://github.com/factordynamics/rebar/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod aggregator;
mod bucket;
mod config;
mod duration;
mod heikin_ashi;
mod range;
mod renko;
mod series;
mod volume;

pub use aggregator::{Aggregate, BarAggregator};
pub use config::AggregatorConfig;
pub use duration::DurationBarAggregator;
pub use heikin_ashi::HeikinAshiBarAggregator;
pub use range::RangeBarAggregator;
pub use renko::RenkoBarAggregator;
pub use series::SeriesAggregator;
pub use volume::VolumeBarAggregator;
