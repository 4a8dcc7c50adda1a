use crate::{Bars, Ohlcv, Price};

use std::fmt::Display;

/// Highest high and lowest low over a window of bars.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Range {
    high: Price,
    low: Price,
}

impl Range {
    #[must_use]
    pub fn new(high: Price, low: Price) -> Self {
        Self { high, low }
    }

    #[inline]
    #[must_use]
    pub fn high(&self) -> Price {
        self.high
    }

    #[inline]
    #[must_use]
    pub fn low(&self) -> Price {
        self.low
    }
}

impl Display for Range {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Range(h: {}, l: {})", self.high, self.low)
    }
}

/// Index of the newest bar of a `length`-bar window, `shift` bars before
/// `last`.
///
/// `None` when the shifted window would reach before the first bar or past
/// the end of `bars`.
#[must_use]
pub(crate) fn window_end(
    bars: &(impl Bars + ?Sized),
    last: usize,
    length: usize,
    shift: usize,
) -> Option<usize> {
    let end = last.checked_sub(shift)?;
    (end + 1).checked_sub(length)?;

    (end < bars.len()).then_some(end)
}

/// Scans `length` bars ending at `end` for the highest high and lowest low.
///
/// Returns `None` if the window is empty or does not fit in `bars`.
#[must_use]
pub(crate) fn scan(bars: &(impl Bars + ?Sized), end: usize, length: usize) -> Option<Range> {
    if length == 0 {
        return None;
    }
    let start = (end + 1).checked_sub(length)?;

    let mut high = Price::NEG_INFINITY;
    let mut low = Price::INFINITY;

    for i in start..=end {
        let bar = bars.get(i)?;
        high = high.max(bar.high());
        low = low.min(bar.low());
    }

    Some(Range { high, low })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Candle;

    fn bars(highs: &[f64], lows: &[f64]) -> Vec<Candle> {
        highs
            .iter()
            .zip(lows)
            .zip(0u64..)
            .map(|((&h, &l), t)| Candle::new(t, h, l))
            .collect()
    }

    mod scan {
        use super::*;

        #[test]
        fn max_high_min_low() {
            let b = bars(&[10.0, 12.0, 9.0], &[8.0, 9.0, 7.0]);
            assert_eq!(scan(&b, 2, 3), Some(Range::new(12.0, 7.0)));
        }

        #[test]
        fn only_window_bars_count() {
            // bar 0 holds the extremes but falls outside a 2-bar window
            let b = bars(&[50.0, 12.0, 9.0], &[1.0, 9.0, 7.0]);
            assert_eq!(scan(&b, 2, 2), Some(Range::new(12.0, 7.0)));
        }

        #[test]
        fn single_bar_window() {
            let b = bars(&[10.0, 12.0], &[8.0, 9.0]);
            assert_eq!(scan(&b, 0, 1), Some(Range::new(10.0, 8.0)));
        }

        #[test]
        fn window_before_first_bar_is_none() {
            let b = bars(&[10.0, 12.0], &[8.0, 9.0]);
            assert_eq!(scan(&b, 1, 3), None);
        }

        #[test]
        fn window_past_end_is_none() {
            let b = bars(&[10.0, 12.0], &[8.0, 9.0]);
            assert_eq!(scan(&b, 2, 2), None);
        }

        #[test]
        fn high_never_below_low() {
            let b = bars(&[5.0, 3.0, 8.0, 2.0], &[4.0, 1.0, 6.0, 2.0]);
            for end in 0..4 {
                for len in 1..=end + 1 {
                    let r = scan(&b, end, len).unwrap();
                    assert!(r.high() >= r.low(), "end={end} len={len}: {r}");
                }
            }
        }
    }

    mod window_end {
        use super::*;

        #[test]
        fn unshifted() {
            let b = bars(&[1.0; 5], &[1.0; 5]);
            assert_eq!(window_end(&b, 4, 3, 0), Some(4));
        }

        #[test]
        fn shift_moves_window_back() {
            let b = bars(&[1.0; 5], &[1.0; 5]);
            assert_eq!(window_end(&b, 4, 3, 2), Some(2));
        }

        #[test]
        fn insufficient_history_after_shift() {
            let b = bars(&[1.0; 5], &[1.0; 5]);
            assert_eq!(window_end(&b, 4, 3, 3), None);
        }

        #[test]
        fn shift_beyond_index() {
            let b = bars(&[1.0; 5], &[1.0; 5]);
            assert_eq!(window_end(&b, 1, 1, 2), None);
        }
    }

    #[test]
    fn display() {
        assert_eq!(Range::new(12.0, 7.5).to_string(), "Range(h: 12, l: 7.5)");
    }
}
