use crate::{Price, Range};

/// Rolling high and low, one entry per chart bar index.
///
/// Entries never written hold `None`, the host's empty plot value.
#[derive(Clone, Default, Debug)]
pub(crate) struct Plot {
    high: Vec<Option<Price>>,
    low: Vec<Option<Price>>,
}

impl Plot {
    pub(crate) fn set(&mut self, index: usize, range: Range) {
        self.ensure(index);
        self.high[index] = Some(range.high());
        self.low[index] = Some(range.low());
    }

    /// Copies the values at `index - 1` into `index`. Index 0 is left
    /// unset.
    pub(crate) fn carry_forward(&mut self, index: usize) {
        self.ensure(index);
        if let Some(prev) = index.checked_sub(1) {
            self.high[index] = self.high[prev];
            self.low[index] = self.low[prev];
        }
    }

    #[inline]
    pub(crate) fn high(&self, index: usize) -> Option<Price> {
        self.high.get(index).copied().flatten()
    }

    #[inline]
    pub(crate) fn low(&self, index: usize) -> Option<Price> {
        self.low.get(index).copied().flatten()
    }

    pub(crate) fn highs(&self) -> &[Option<Price>] {
        &self.high
    }

    pub(crate) fn lows(&self) -> &[Option<Price>] {
        &self.low
    }

    fn ensure(&mut self, index: usize) {
        if index >= self.high.len() {
            self.high.resize(index + 1, None);
            self.low.resize(index + 1, None);
        }
    }
}
