/// A price value.
///
/// Semantic alias for [`f64`]. Documents intent in function signatures
/// without introducing newtype construction overhead.
pub type Price = f64;

/// Bar open timestamp or sequence number.
///
/// Used to map chart bars onto higher timeframe bars. Non-decreasing on
/// input, where an equal open time repaints the last bar; stored series
/// are strictly increasing.
pub type Timestamp = u64;

/// Bar data read by the range tracker.
///
/// Implement this on your own kline/candle type to avoid per-bar
/// conversion. Only the extremes and the open time are needed.
///
/// # Example
///
/// ```
/// use recent_hl_alert::{Ohlcv, Price, Timestamp};
///
/// struct MyKline {
///     h: f64, l: f64,
///     ts: u64,
/// }
///
/// impl Ohlcv for MyKline {
///     fn high(&self) -> Price { self.h }
///     fn low(&self) -> Price { self.l }
///     fn open_time(&self) -> Timestamp { self.ts }
/// }
/// ```
pub trait Ohlcv {
    /// Highest price during the bar.
    fn high(&self) -> Price;

    /// Lowest price during the bar.
    fn low(&self) -> Price;

    /// Bar open timestamp or sequence number.
    fn open_time(&self) -> Timestamp;
}

/// Plain bar record stored by [`BarSeries`](crate::BarSeries).
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Candle {
    pub open_time: Timestamp,
    pub high: Price,
    pub low: Price,
}

impl Candle {
    #[must_use]
    pub fn new(open_time: Timestamp, high: Price, low: Price) -> Self {
        Self {
            open_time,
            high,
            low,
        }
    }
}

impl Ohlcv for Candle {
    #[inline]
    fn high(&self) -> Price {
        self.high
    }

    #[inline]
    fn low(&self) -> Price {
        self.low
    }

    #[inline]
    fn open_time(&self) -> Timestamp {
        self.open_time
    }
}
