//! OHLCV bar resampling.
//!
//! This is a facade crate that re-exports functionality from the rebar
//! workspace crates for convenient access.
//!
//! # Quick Start
//!
//! ```
//! use chrono::{TimeDelta, TimeZone, Utc};
//! use rebar_lib::prelude::*;
//!
//! let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
//! let minute = TimeDelta::minutes(1);
//! let bars: Vec<Bar<f64>> = (1..=10)
//!     .map(|n| {
//!         let price = f64::from(n);
//!         Bar::new(price, price, price, price, 1.0, price, 1, minute, start + minute * n)
//!     })
//!     .collect();
//!
//! let series = BarSeries::new("EURUSD", bars);
//! let five_minute = SeriesAggregator::new(DurationBarAggregator::from_timeframe(
//!     Timeframe::Minute5,
//!     true,
//! ));
//! let resampled = five_minute.aggregate(&series)?;
//! assert_eq!(resampled.len(), 2);
//! # Ok::<(), AggregationError>(())
//! ```

#![doc(issue_tracker_base_url = "https://github.com/factordynamics/rebar/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use rebar_types::*;

// Re-export aggregation
#[cfg(feature = "aggregate")]
pub use rebar_aggregate::{
    Aggregate, AggregatorConfig, BarAggregator, DurationBarAggregator, HeikinAshiBarAggregator,
    RangeBarAggregator, RenkoBarAggregator, SeriesAggregator, VolumeBarAggregator,
};

/// Prelude module for convenient imports.
///
/// ```
/// use rebar_lib::prelude::*;
/// ```
pub mod prelude {
    pub use rebar_types::{
        AggregationError, Bar, BarSeries, Numeric, Result, Timeframe, TimeframeParseError,
    };

    #[cfg(feature = "aggregate")]
    pub use rebar_aggregate::{
        Aggregate, AggregatorConfig, BarAggregator, DurationBarAggregator,
        HeikinAshiBarAggregator, RangeBarAggregator, RenkoBarAggregator, SeriesAggregator,
        VolumeBarAggregator,
    };
}
