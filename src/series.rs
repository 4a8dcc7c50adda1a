use crate::{Candle, Error, Ohlcv, Price, Result, Timestamp};

/// Read access to an ordered series of bars, oldest first.
///
/// Implemented for slices of any [`Ohlcv`] type and for [`BarSeries`].
/// Hosts with their own storage only need [`len`](Bars::len) and
/// [`get`](Bars::get).
pub trait Bars {
    type Bar: Ohlcv;

    /// Number of bars in the series.
    fn len(&self) -> usize;

    /// Bar at `index`, or `None` past the end.
    fn get(&self, index: usize) -> Option<&Self::Bar>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Index of the bar containing `time`: the latest bar whose open time
    /// is at or before `time`.
    ///
    /// Returns `None` when `time` precedes the first bar. Open times must
    /// be strictly increasing.
    fn index_by_time(&self, time: Timestamp) -> Option<usize> {
        // first index with open_time > time
        let (mut lo, mut hi) = (0, self.len());
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            match self.get(mid) {
                Some(bar) if bar.open_time() <= time => lo = mid + 1,
                _ => hi = mid,
            }
        }

        lo.checked_sub(1)
    }
}

impl<B: Ohlcv> Bars for [B] {
    type Bar = B;

    #[inline]
    fn len(&self) -> usize {
        <[B]>::len(self)
    }

    #[inline]
    fn get(&self, index: usize) -> Option<&B> {
        <[B]>::get(self, index)
    }
}

impl<B: Ohlcv> Bars for Vec<B> {
    type Bar = B;

    #[inline]
    fn len(&self) -> usize {
        self.as_slice().len()
    }

    #[inline]
    fn get(&self, index: usize) -> Option<&B> {
        self.as_slice().get(index)
    }
}

/// Append-only bar series for one timeframe.
///
/// Feeding a bar with the same open time as the last one repaints it
/// (live update); a newer open time appends. Older open times are
/// rejected.
#[derive(Clone, Default, Debug)]
pub struct BarSeries {
    bars: Vec<Candle>,
}

impl BarSeries {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks that a bar opening at `open_time` may be pushed or merged.
    ///
    /// # Errors
    ///
    /// [`Error::NonMonotonicTime`] if `open_time` precedes the last bar.
    pub fn check_next(&self, open_time: Timestamp) -> Result<()> {
        match self.bars.last() {
            Some(last) if last.open_time > open_time => Err(Error::NonMonotonicTime {
                last: last.open_time,
                got: open_time,
            }),
            _ => Ok(()),
        }
    }

    /// Appends or repaints a bar.
    ///
    /// # Errors
    ///
    /// [`Error::NonMonotonicTime`] if `bar` opens before the last bar.
    pub fn push(&mut self, bar: &impl Ohlcv) -> Result<()> {
        let candle = Candle::new(bar.open_time(), bar.high(), bar.low());
        self.check_next(candle.open_time)?;

        match self.bars.last_mut() {
            Some(last) if last.open_time == candle.open_time => *last = candle,
            _ => self.bars.push(candle),
        }

        Ok(())
    }

    /// Folds a finer bar into the series bucket opening at `bucket_open`.
    ///
    /// Extends the high/low of the last bar when it opened at
    /// `bucket_open`, otherwise starts a new bar. Used to build a higher
    /// timeframe series from chart bars.
    ///
    /// # Errors
    ///
    /// [`Error::NonMonotonicTime`] if `bucket_open` precedes the last bar.
    pub fn merge(&mut self, bucket_open: Timestamp, high: Price, low: Price) -> Result<()> {
        self.check_next(bucket_open)?;

        match self.bars.last_mut() {
            Some(last) if last.open_time == bucket_open => {
                last.high = last.high.max(high);
                last.low = last.low.min(low);
            }
            _ => self.bars.push(Candle::new(bucket_open, high, low)),
        }

        Ok(())
    }

    #[must_use]
    pub fn last(&self) -> Option<&Candle> {
        self.bars.last()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Candle] {
        &self.bars
    }
}

impl Bars for BarSeries {
    type Bar = Candle;

    #[inline]
    fn len(&self) -> usize {
        self.bars.len()
    }

    #[inline]
    fn get(&self, index: usize) -> Option<&Candle> {
        self.bars.get(index)
    }
}

impl FromIterator<Candle> for BarSeries {
    /// Collects candles, keeping the last of any run with equal open times.
    ///
    /// # Panics
    ///
    /// Panics if open times decrease.
    fn from_iter<I: IntoIterator<Item = Candle>>(iter: I) -> Self {
        let mut series = Self::new();
        for candle in iter {
            series
                .push(&candle)
                .unwrap_or_else(|e| panic!("invalid bar sequence: {e}"));
        }
        series
    }
}
