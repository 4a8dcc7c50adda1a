use crate::{Error, Result, Timestamp};

use chrono::{DateTime, Datelike, NaiveDate};
use std::{
    fmt::{Debug, Display},
    str::FromStr,
};

/// Chart bar duration.
///
/// Variants are declared from finest to coarsest, so the derived ordering
/// compares bar durations: `Timeframe::Hour < Timeframe::Daily`.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Debug)]
pub enum Timeframe {
    Minute,
    Minute5,
    Minute15,
    Minute30,
    Hour,
    Hour4,
    Daily,
    Weekly,
    Monthly,
}

impl Timeframe {
    /// All timeframes, finest first.
    pub const ALL: [Timeframe; 9] = [
        Self::Minute,
        Self::Minute5,
        Self::Minute15,
        Self::Minute30,
        Self::Hour,
        Self::Hour4,
        Self::Daily,
        Self::Weekly,
        Self::Monthly,
    ];

    /// Label used in alert messages.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Minute => "Minute",
            Self::Minute5 => "Minute5",
            Self::Minute15 => "Minute15",
            Self::Minute30 => "Minute30",
            Self::Hour => "Hour",
            Self::Hour4 => "Hour4",
            Self::Daily => "Daily",
            Self::Weekly => "Weekly",
            Self::Monthly => "Monthly",
        }
    }

    /// Fixed bar length in seconds, `None` for calendar months.
    #[must_use]
    pub fn seconds(self) -> Option<u64> {
        match self {
            Self::Minute => Some(60),
            Self::Minute5 => Some(5 * 60),
            Self::Minute15 => Some(15 * 60),
            Self::Minute30 => Some(30 * 60),
            Self::Hour => Some(3_600),
            Self::Hour4 => Some(4 * 3_600),
            Self::Daily => Some(86_400),
            Self::Weekly => Some(7 * 86_400),
            Self::Monthly => None,
        }
    }

    /// Open time of the bar containing `time`, both in Unix seconds (UTC).
    ///
    /// Weekly bars open on Monday 00:00, monthly bars on the first day of
    /// the month.
    #[must_use]
    pub fn period_start(self, time: Timestamp) -> Timestamp {
        const MONDAY_OFFSET: u64 = 4 * 86_400; // 1970-01-05 was a Monday

        match self {
            Self::Weekly if time < MONDAY_OFFSET => 0,
            Self::Weekly => time - (time - MONDAY_OFFSET) % (7 * 86_400),
            Self::Monthly => month_start(time),
            tf => {
                let len = tf.seconds().unwrap_or(1);
                time - time % len
            }
        }
    }

    fn short_label(self) -> &'static str {
        match self {
            Self::Minute => "m1",
            Self::Minute5 => "m5",
            Self::Minute15 => "m15",
            Self::Minute30 => "m30",
            Self::Hour => "h1",
            Self::Hour4 => "h4",
            Self::Daily => "d1",
            Self::Weekly => "w1",
            Self::Monthly => "mn1",
        }
    }
}

fn month_start(time: Timestamp) -> Timestamp {
    i64::try_from(time)
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .and_then(|dt| NaiveDate::from_ymd_opt(dt.year(), dt.month(), 1))
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .and_then(|start| u64::try_from(start.and_utc().timestamp()).ok())
        .unwrap_or(time)
}

impl Display for Timeframe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Timeframe {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();

        Self::ALL
            .into_iter()
            .find(|tf| {
                tf.label().eq_ignore_ascii_case(s) || tf.short_label().eq_ignore_ascii_case(s)
            })
            .ok_or_else(|| Error::UnknownTimeframe(s.to_owned()))
    }
}

/// Timeframe the range is computed on, as configured by the user.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Default, Debug)]
pub enum TimeframeSelection {
    /// Follow the chart's own timeframe.
    #[default]
    Current,
    Fixed(Timeframe),
}

impl TimeframeSelection {
    /// Resolves the selection against the chart timeframe.
    ///
    /// A fixed timeframe finer than the chart cannot be mapped onto chart
    /// bars, so it is clamped to the chart timeframe with a logged notice.
    #[must_use]
    pub fn resolve(self, chart: Timeframe) -> Timeframe {
        match self {
            Self::Current => chart,
            Self::Fixed(tf) if tf < chart => {
                tracing::warn!(
                    selected = %tf,
                    chart = %chart,
                    "selected timeframe is lower than current chart timeframe, using current timeframe instead"
                );
                chart
            }
            Self::Fixed(tf) => tf,
        }
    }
}

impl Display for TimeframeSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Current => f.write_str("Current"),
            Self::Fixed(tf) => Display::fmt(tf, f),
        }
    }
}

impl From<Timeframe> for TimeframeSelection {
    fn from(tf: Timeframe) -> Self {
        Self::Fixed(tf)
    }
}

impl FromStr for TimeframeSelection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.trim().eq_ignore_ascii_case("current") {
            Ok(Self::Current)
        } else {
            s.parse().map(Self::Fixed)
        }
    }
}
