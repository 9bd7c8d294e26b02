//! OHLCV bar data structure.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::Numeric;

/// OHLCV bar over the half-open span `(begin_time, end_time]`.
///
/// Bars are plain values: aggregators never mutate the bars they are given
/// and always synthesize fresh ones.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar<N> {
    /// Opening price.
    pub open: N,
    /// Highest price during the period.
    pub high: N,
    /// Lowest price during the period.
    pub low: N,
    /// Closing price. NaN marks a missing close.
    pub close: N,
    /// Traded volume.
    pub volume: N,
    /// Traded notional amount.
    pub amount: N,
    /// Number of trades.
    pub trades: u64,
    /// Length of the period covered by the bar.
    #[serde(with = "period_millis", rename = "period_ms")]
    pub time_period: TimeDelta,
    /// Bar close time (end of the period).
    pub end_time: DateTime<Utc>,
}

impl<N: Numeric> Bar<N> {
    /// Creates a new bar.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        open: N,
        high: N,
        low: N,
        close: N,
        volume: N,
        amount: N,
        trades: u64,
        time_period: TimeDelta,
        end_time: DateTime<Utc>,
    ) -> Self {
        Self {
            open,
            high,
            low,
            close,
            volume,
            amount,
            trades,
            time_period,
            end_time,
        }
    }

    /// Returns the start of the period (`end_time - time_period`).
    #[must_use]
    pub fn begin_time(&self) -> DateTime<Utc> {
        self.end_time - self.time_period
    }

    /// Returns the price range (high - low).
    #[must_use]
    pub fn range(&self) -> N {
        self.high - self.low
    }

    /// Returns the body size (|close - open|).
    #[must_use]
    pub fn body(&self) -> N {
        (self.close - self.open).abs()
    }

    /// Returns true if this is a bullish (green) bar.
    #[must_use]
    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    /// Returns true if this is a bearish (red) bar.
    #[must_use]
    pub fn is_bearish(&self) -> bool {
        self.close < self.open
    }

    /// Returns the typical price ((high + low + close) / 3).
    #[must_use]
    pub fn typical_price(&self) -> N {
        (self.high + self.low + self.close) / N::from_u32(3)
    }

    /// Returns false when the close is the missing-value sentinel.
    #[must_use]
    pub fn has_close(&self) -> bool {
        !self.close.is_nan()
    }
}

/// Serializes a [`TimeDelta`] as whole milliseconds.
mod period_millis {
    use chrono::TimeDelta;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub(super) fn serialize<S: Serializer>(
        period: &TimeDelta,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(period.num_milliseconds())
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<TimeDelta, D::Error> {
        let millis = i64::deserialize(deserializer)?;
        TimeDelta::try_milliseconds(millis)
            .ok_or_else(|| D::Error::custom(format!("period out of range: {millis}ms")))
    }
}
