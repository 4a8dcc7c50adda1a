#![allow(dead_code)]

use recent_hl_alert::{Candle, InMemoryMarket, Ohlcv, Price, Timeframe, Timestamp};
use serde::{Deserialize, de::DeserializeOwned};

/// Hourly bar parsed from the EURUSD CSV.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RefBar {
    pub open_time: u64,
    pub high: f64,
    pub low: f64,
}

impl Ohlcv for RefBar {
    fn high(&self) -> Price {
        self.high
    }

    fn low(&self) -> Price {
        self.low
    }

    fn open_time(&self) -> Timestamp {
        self.open_time
    }
}

const OHLCV_PATH: &str = "tests/fixtures/data/eurusd-1h.csv";

pub const DAY: u64 = 86_400;

/// Load hourly reference bars (three weeks, starting on a midnight).
pub fn load_reference_ohlcvs() -> Vec<RefBar> {
    load_records(OHLCV_PATH, "invalid OHLCV record")
}

/// Hourly market holding every bar of `bars`.
pub fn hourly_market(bars: &[RefBar]) -> InMemoryMarket {
    let mut market = InMemoryMarket::new("EURUSD", 5, Timeframe::Hour);
    for bar in bars {
        market.push_chart_bar(bar).expect("increasing bars");
    }
    market
}

/// Daily extremes computed directly from hourly bars, one per UTC day.
pub fn daily_candles(bars: &[RefBar]) -> Vec<Candle> {
    let mut days: Vec<Candle> = Vec::new();
    for bar in bars {
        let day = bar.open_time - bar.open_time % DAY;
        match days.last_mut() {
            Some(last) if last.open_time == day => {
                last.high = last.high.max(bar.high);
                last.low = last.low.min(bar.low);
            }
            _ => days.push(Candle::new(day, bar.high, bar.low)),
        }
    }
    days
}

/// Brute-force range of `length` days ending `shift` days before the day
/// containing `time`.
pub fn brute_force_range(
    days: &[Candle],
    time: Timestamp,
    length: usize,
    shift: usize,
) -> Option<(Price, Price)> {
    let mapped = days.iter().rposition(|d| d.open_time <= time)?;
    let end = mapped.checked_sub(shift)?;
    let start = (end + 1).checked_sub(length)?;
    let window = &days[start..=end];

    Some((
        window.iter().map(|d| d.high).fold(f64::MIN, f64::max),
        window.iter().map(|d| d.low).fold(f64::MAX, f64::min),
    ))
}

/// Creates perturbed versions of a bar to simulate live repaints.
///
/// Returns 2 intermediate bars (narrower than the final range) followed by
/// the original bar. All share the same `open_time`.
pub fn repaint_sequence(bar: &RefBar) -> Vec<RefBar> {
    let mid = bar.high.midpoint(bar.low);
    vec![
        RefBar {
            high: mid,
            low: mid,
            ..*bar
        },
        RefBar {
            high: mid.midpoint(bar.high),
            low: mid.midpoint(bar.low),
            ..*bar
        },
        *bar,
    ]
}

fn load_records<D>(path: &str, expect_msg: &str) -> Vec<D>
where
    D: DeserializeOwned,
{
    let mut rdr =
        csv::Reader::from_path(path).unwrap_or_else(|e| panic!("failed to open {path}: {e}"));

    rdr.deserialize().map(|r| r.expect(expect_msg)).collect()
}
