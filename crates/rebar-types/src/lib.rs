//! Core types for the rebar bar-resampling engine.
//!
//! This crate provides the fundamental data structures used throughout rebar:
//!
//! - [`Numeric`] - Arithmetic capability shared by every price and volume value
//! - [`Bar`] - A single OHLCV record over a time span
//! - [`BarSeries`] - A named, ordered sequence of bars
//! - [`Timeframe`] - Named target periods for time-based resampling
//! - [`AggregationError`] - Validation failures raised by the aggregators

#![doc(issue_tracker_base_url = "https://github.com/factordynamics/rebar/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod bar;
mod error;
mod numeric;
mod series;
mod timeframe;

pub use bar::Bar;
pub use error::{AggregationError, Result};
pub use numeric::Numeric;
pub use series::BarSeries;
pub use timeframe::{Timeframe, TimeframeParseError};
