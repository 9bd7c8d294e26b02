//! Named, ordered sequence of bars.

use serde::{Deserialize, Serialize};

use crate::Bar;

/// A named series of bars belonging to one instrument.
///
/// The numeric family of the series is its type parameter, so a resampled
/// series always shares the family of its source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarSeries<N> {
    name: String,
    bars: Vec<Bar<N>>,
}

impl<N> BarSeries<N> {
    /// Creates a series from already time-ordered bars.
    #[must_use]
    pub fn new(name: impl Into<String>, bars: Vec<Bar<N>>) -> Self {
        Self {
            name: name.into(),
            bars,
        }
    }

    /// Returns the series name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the bars in time order.
    #[must_use]
    pub fn bars(&self) -> &[Bar<N>] {
        &self.bars
    }

    /// Returns the number of bars.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Returns true if the series holds no bars.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Returns the earliest bar.
    #[must_use]
    pub fn first(&self) -> Option<&Bar<N>> {
        self.bars.first()
    }

    /// Returns the latest bar.
    #[must_use]
    pub fn last(&self) -> Option<&Bar<N>> {
        self.bars.last()
    }

    /// Consumes the series, returning its bars.
    #[must_use]
    pub fn into_bars(self) -> Vec<Bar<N>> {
        self.bars
    }
}
