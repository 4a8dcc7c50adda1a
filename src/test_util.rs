// src/test_util.rs

use crate::{Candle, InMemoryMarket, Timeframe};

use chrono::{DateTime, NaiveDate, Utc};

pub const HOUR: u64 = 3_600;

/// UTC timestamp from calendar fields.
pub fn utc(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(hour, min, sec))
        .expect("valid date")
        .and_utc()
}

/// Hourly chart bar `i` with the given extremes.
pub fn hour_bar(i: u64, high: f64, low: f64) -> Candle {
    Candle::new(i * HOUR, high, low)
}

/// Hourly EURUSD chart with one bar per `(high, low)` pair, starting at
/// the Unix epoch.
pub fn hourly(highs: &[f64], lows: &[f64]) -> InMemoryMarket {
    let mut market = InMemoryMarket::new("EURUSD", 2, Timeframe::Hour);
    for ((&high, &low), i) in highs.iter().zip(lows).zip(0u64..) {
        market
            .push_chart_bar(&hour_bar(i, high, low))
            .expect("increasing bars");
    }
    market
}
