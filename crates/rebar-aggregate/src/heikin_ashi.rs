//! Heikin-Ashi smoothing.

use rebar_types::{Bar, Numeric, Result};

use crate::Aggregate;
use crate::bucket::check_present;

/// One-in, one-out recursive smoothing of OHLC prices.
///
/// The first bar is passed through unchanged. Every later bar closes at the
/// mean of its own OHLC and opens at the midpoint of the previous output's
/// open and close. Volume, amount, trades and timing pass through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeikinAshiBarAggregator;

impl HeikinAshiBarAggregator {
    /// Creates a Heikin-Ashi aggregator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl<N: Numeric> Aggregate<N> for HeikinAshiBarAggregator {
    fn name(&self) -> &'static str {
        "heikin_ashi"
    }

    fn aggregate(&self, bars: &[Bar<N>]) -> Result<Vec<Bar<N>>> {
        check_present(bars, "open", |bar| bar.open)?;
        check_present(bars, "high", |bar| bar.high)?;
        check_present(bars, "low", |bar| bar.low)?;
        check_present(bars, "close", |bar| bar.close)?;

        let two = N::from_u32(2);
        let four = N::from_u32(4);
        let mut output: Vec<Bar<N>> = Vec::with_capacity(bars.len());

        for bar in bars {
            let smoothed = match output.last() {
                None => *bar,
                Some(prev) => {
                    let close = (bar.open + bar.high + bar.low + bar.close) / four;
                    let open = (prev.open + prev.close) / two;
                    Bar {
                        open,
                        high: bar.high.max(open).max(close),
                        low: bar.low.min(open).min(close),
                        close,
                        ..*bar
                    }
                }
            };
            output.push(smoothed);
        }

        tracing::debug!(
            strategy = "heikin_ashi",
            input = bars.len(),
            output = output.len(),
            "aggregated bars"
        );
        Ok(output)
    }
}
