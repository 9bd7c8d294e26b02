//! Shared bucket accumulator and input validation.

use chrono::{DateTime, Utc};
use rebar_types::{AggregationError, Bar, Numeric, Result};

/// Running merge of consecutive source bars into one output bar.
#[derive(Debug)]
pub(crate) struct Bucket<N> {
    begin_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
    open: N,
    high: N,
    low: N,
    close: N,
    pub(crate) volume: N,
    amount: N,
    trades: u64,
}

impl<N: Numeric> Bucket<N> {
    /// Opens a bucket from its first bar.
    pub(crate) fn open(bar: &Bar<N>) -> Self {
        Self {
            begin_time: bar.begin_time(),
            end_time: bar.end_time,
            open: bar.open,
            high: bar.high,
            low: bar.low,
            close: bar.close,
            volume: bar.volume,
            amount: bar.amount,
            trades: bar.trades,
        }
    }

    /// Folds a later bar into the bucket.
    pub(crate) fn push(&mut self, bar: &Bar<N>) {
        self.high = self.high.max(bar.high);
        self.low = self.low.min(bar.low);
        self.close = bar.close;
        self.volume = self.volume + bar.volume;
        self.amount = self.amount + bar.amount;
        self.trades += bar.trades;
        self.end_time = bar.end_time;
    }

    /// Returns the end time of the latest bar in the bucket.
    pub(crate) const fn end_time(&self) -> DateTime<Utc> {
        self.end_time
    }

    /// Returns the bucket's price range (high - low).
    pub(crate) fn range(&self) -> N {
        self.high - self.low
    }

    /// Finishes the bucket as a bar spanning first begin to last end.
    pub(crate) fn finish(self) -> Bar<N> {
        Bar::new(
            self.open,
            self.high,
            self.low,
            self.close,
            self.volume,
            self.amount,
            self.trades,
            self.end_time - self.begin_time,
            self.end_time,
        )
    }
}

/// Accumulates bars until `is_full` accepts the bucket, then emits it.
///
/// A bucket still open after the last bar is emitted only when
/// `only_final_bars` is false.
pub(crate) fn fold_until<N, F>(bars: &[Bar<N>], only_final_bars: bool, is_full: F) -> Vec<Bar<N>>
where
    N: Numeric,
    F: Fn(&Bucket<N>) -> bool,
{
    let mut output = Vec::new();
    let mut current: Option<Bucket<N>> = None;

    for bar in bars {
        match current.as_mut() {
            Some(bucket) => bucket.push(bar),
            None => current = Some(Bucket::open(bar)),
        }

        if let Some(bucket) = current.take_if(|bucket| is_full(bucket)) {
            let bar = bucket.finish();
            tracing::trace!(end_time = %bar.end_time, "bucket closed");
            output.push(bar);
        }
    }

    if let Some(bucket) = current {
        if only_final_bars {
            tracing::trace!("discarding dangling bucket");
        } else {
            output.push(bucket.finish());
        }
    }

    output
}

/// Rejects a threshold that is NaN, infinite, zero or negative.
pub(crate) fn check_positive<N: Numeric>(parameter: &'static str, value: N) -> Result<N> {
    if !value.is_finite() {
        return Err(AggregationError::invalid_parameter(
            parameter,
            format!("must be finite, got {value:?}"),
        ));
    }
    if value <= N::zero() {
        return Err(AggregationError::invalid_parameter(
            parameter,
            format!("must be positive, got {value:?}"),
        ));
    }
    Ok(value)
}

/// Requires every bar to share one period and to start where the previous
/// bar ended.
pub(crate) fn check_contiguous<N: Numeric>(bars: &[Bar<N>]) -> Result<()> {
    let Some(first) = bars.first() else {
        return Ok(());
    };

    for (index, pair) in bars.windows(2).enumerate() {
        let (prev, bar) = (&pair[0], &pair[1]);
        let index = index + 1;

        if bar.time_period != first.time_period {
            return Err(AggregationError::inconsistent_input(
                index,
                format!(
                    "period {} differs from first bar period {}",
                    bar.time_period, first.time_period
                ),
            ));
        }
        if bar.begin_time() != prev.end_time {
            return Err(AggregationError::inconsistent_input(
                index,
                format!(
                    "begins at {} but previous bar ended at {}",
                    bar.begin_time(),
                    prev.end_time
                ),
            ));
        }
    }

    Ok(())
}

/// Requires `value` of every bar to be present (not NaN).
pub(crate) fn check_present<N, F>(bars: &[Bar<N>], what: &str, value: F) -> Result<()>
where
    N: Numeric,
    F: Fn(&Bar<N>) -> N,
{
    match bars.iter().position(|bar| value(bar).is_nan()) {
        Some(index) => Err(AggregationError::malformed_bar(
            index,
            format!("missing {what}"),
        )),
        None => Ok(()),
    }
}

/// Requires `value` of every bar to be finite.
pub(crate) fn check_finite<N, F>(bars: &[Bar<N>], what: &str, value: F) -> Result<()>
where
    N: Numeric,
    F: Fn(&Bar<N>) -> N,
{
    match bars.iter().position(|bar| !value(bar).is_finite()) {
        Some(index) => Err(AggregationError::malformed_bar(
            index,
            format!("{what} is not finite"),
        )),
        None => Ok(()),
    }
}
