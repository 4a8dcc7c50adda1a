//! Recent high/low levels with breakout alerts.
//!
//! [`RecentHighLow`] tracks the highest high and lowest low of the last
//! *n* bars on a selectable, possibly higher, timeframe, plots them onto
//! the chart's bars, and alerts the first time the live bid leaves that
//! range.
//!
//! The crate does no I/O. The charting host supplies bars, prices and
//! clocks through [`MarketData`] and delivers alerts through [`Notifier`].
//! [`InMemoryMarket`] and [`RecordingNotifier`] implement both in memory
//! for replays and tests.

mod alert;
mod config;
mod dispatch;
mod error;
mod host;
mod memory;
mod ohlcv;
mod plot;
mod range;
mod recent_high_low;
mod series;
mod timeframe;

pub use crate::error::{Error, NotifyError, Result};
pub use crate::host::{MarketData, Notifier, SoundType};
pub use crate::ohlcv::{Candle, Ohlcv, Price, Timestamp};
pub use crate::series::{BarSeries, Bars};
pub use crate::timeframe::{Timeframe, TimeframeSelection};

pub use crate::alert::{AlertState, Breakout, Direction, Latch};
pub use crate::config::{RecentHighLowConfig, RecentHighLowConfigBuilder, TriggerCandle};
pub use crate::dispatch::{AlertMessage, format_price};
pub use crate::memory::{InMemoryMarket, RecordingNotifier, SentEmail};
pub use crate::range::Range;
pub use crate::recent_high_low::RecentHighLow;

#[cfg(test)]
mod test_util;
