use crate::{
    BarSeries, Candle, MarketData, Notifier, NotifyError, Ohlcv, Price, Result, SoundType,
    Timeframe, Timestamp,
};

use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// In-memory [`MarketData`] host for one symbol.
///
/// Chart bars fed through [`push_chart_bar`](Self::push_chart_bar) are
/// also folded into every coarser timeframe, so any selection the
/// indicator resolves to has a series. Open times are Unix seconds.
#[derive(Clone, Debug)]
pub struct InMemoryMarket {
    symbol: String,
    digits: usize,
    timeframe: Timeframe,
    series: HashMap<Timeframe, BarSeries>,
    empty: BarSeries,
    bid: Price,
    server_time: DateTime<Utc>,
}

impl InMemoryMarket {
    #[must_use]
    pub fn new(symbol: impl Into<String>, digits: usize, timeframe: Timeframe) -> Self {
        Self {
            symbol: symbol.into(),
            digits,
            timeframe,
            series: HashMap::new(),
            empty: BarSeries::new(),
            bid: Price::NAN,
            server_time: DateTime::<Utc>::UNIX_EPOCH,
        }
    }

    /// Appends (or repaints) a chart bar and updates the coarser series.
    ///
    /// Every series is checked before any is touched, so on error the
    /// market is left as it was.
    ///
    /// # Errors
    ///
    /// [`Error::NonMonotonicTime`](crate::Error::NonMonotonicTime) if the
    /// bar opens before the last chart bar, or its bucket opens before the
    /// last bar of a coarser series.
    pub fn push_chart_bar(&mut self, bar: &impl Ohlcv) -> Result<()> {
        let chart = self.timeframe;
        let open_time = bar.open_time();
        let coarser = || Timeframe::ALL.into_iter().filter(move |&tf| tf > chart);

        self.bars(chart).check_next(open_time)?;
        for tf in coarser() {
            self.bars(tf).check_next(tf.period_start(open_time))?;
        }

        let repaint = self
            .bars(chart)
            .last()
            .is_some_and(|last| last.open_time == open_time);
        self.series.entry(chart).or_default().push(bar)?;

        for tf in coarser() {
            let bucket = tf.period_start(open_time);

            if repaint {
                // a repainted bar may have narrowed, rescan its bucket
                let (high, low) = self.bucket_extremes(tf, bucket);
                self.series
                    .entry(tf)
                    .or_default()
                    .push(&Candle::new(bucket, high, low))?;
            } else {
                self.series
                    .entry(tf)
                    .or_default()
                    .merge(bucket, bar.high(), bar.low())?;
            }
        }

        Ok(())
    }

    /// Replaces the series of `timeframe` with externally supplied bars.
    pub fn set_series(&mut self, timeframe: Timeframe, series: BarSeries) {
        self.series.insert(timeframe, series);
    }

    pub fn set_bid(&mut self, bid: Price) {
        self.bid = bid;
    }

    pub fn set_server_time(&mut self, time: DateTime<Utc>) {
        self.server_time = time;
    }

    fn bucket_extremes(&self, tf: Timeframe, bucket: Timestamp) -> (Price, Price) {
        self.bars(self.timeframe)
            .as_slice()
            .iter()
            .rev()
            .take_while(|c| tf.period_start(c.open_time) == bucket)
            .fold((Price::NEG_INFINITY, Price::INFINITY), |(h, l), c| {
                (h.max(c.high), l.min(c.low))
            })
    }
}

impl MarketData for InMemoryMarket {
    type Series = BarSeries;

    fn timeframe(&self) -> Timeframe {
        self.timeframe
    }

    fn bars(&self, timeframe: Timeframe) -> &BarSeries {
        self.series.get(&timeframe).unwrap_or(&self.empty)
    }

    fn bid(&self) -> Price {
        self.bid
    }

    fn digits(&self) -> usize {
        self.digits
    }

    fn symbol(&self) -> &str {
        &self.symbol
    }

    fn server_time(&self) -> DateTime<Utc> {
        self.server_time
    }
}

/// Email captured by [`RecordingNotifier`].
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct SentEmail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// [`Notifier`] that records notifications instead of
/// delivering them.
#[derive(Clone, Default, Debug)]
pub struct RecordingNotifier {
    sounds: Vec<SoundType>,
    emails: Vec<SentEmail>,
    attempts: usize,
    fail: bool,
}

impl RecordingNotifier {
    /// A notifier whose every call fails, still counting attempts.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn sounds(&self) -> &[SoundType] {
        &self.sounds
    }

    #[must_use]
    pub fn emails(&self) -> &[SentEmail] {
        &self.emails
    }

    /// Calls made, successful or not.
    #[must_use]
    pub fn attempts(&self) -> usize {
        self.attempts
    }

    fn attempt(&mut self) -> std::result::Result<(), NotifyError> {
        self.attempts += 1;
        if self.fail {
            Err(NotifyError("recording notifier set to fail".to_owned()))
        } else {
            Ok(())
        }
    }
}

impl Notifier for RecordingNotifier {
    fn play_sound(&mut self, sound: SoundType) -> std::result::Result<(), NotifyError> {
        self.attempt()?;
        self.sounds.push(sound);
        Ok(())
    }

    fn send_email(
        &mut self,
        from: &str,
        to: &str,
        subject: &str,
        body: &str,
    ) -> std::result::Result<(), NotifyError> {
        self.attempt()?;
        self.emails.push(SentEmail {
            from: from.to_owned(),
            to: to.to_owned(),
            subject: subject.to_owned(),
            body: body.to_owned(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Bars, Error};

    const HOUR: u64 = 3_600;
    const DAY: u64 = 86_400;

    fn market() -> InMemoryMarket {
        InMemoryMarket::new("EURUSD", 5, Timeframe::Hour)
    }

    mod aggregation {
        use super::*;

        #[test]
        fn chart_series_holds_pushed_bars() {
            let mut m = market();
            m.push_chart_bar(&Candle::new(0, 1.2, 1.1)).unwrap();
            m.push_chart_bar(&Candle::new(HOUR, 1.3, 1.0)).unwrap();
            assert_eq!(m.bars(Timeframe::Hour).len(), 2);
        }

        #[test]
        fn folds_into_daily() {
            let mut m = market();
            m.push_chart_bar(&Candle::new(0, 1.2, 1.1)).unwrap();
            m.push_chart_bar(&Candle::new(HOUR, 1.3, 1.15)).unwrap();
            m.push_chart_bar(&Candle::new(DAY, 1.25, 1.05)).unwrap();

            let daily = m.bars(Timeframe::Daily);
            assert_eq!(daily.len(), 2);
            assert_eq!(daily.get(0), Some(&Candle::new(0, 1.3, 1.1)));
            assert_eq!(daily.get(1), Some(&Candle::new(DAY, 1.25, 1.05)));
        }

        #[test]
        fn finer_timeframes_stay_empty() {
            let mut m = market();
            m.push_chart_bar(&Candle::new(0, 1.2, 1.1)).unwrap();
            assert!(m.bars(Timeframe::Minute15).is_empty());
        }

        #[test]
        fn repaint_narrows_bucket() {
            let mut m = market();
            m.push_chart_bar(&Candle::new(0, 1.2, 1.1)).unwrap();
            m.push_chart_bar(&Candle::new(HOUR, 1.5, 1.0)).unwrap();
            // live update of the same hour with a narrower range
            m.push_chart_bar(&Candle::new(HOUR, 1.25, 1.12)).unwrap();

            assert_eq!(m.bars(Timeframe::Hour).len(), 2);
            assert_eq!(
                m.bars(Timeframe::Daily).get(0),
                Some(&Candle::new(0, 1.25, 1.1))
            );
        }

        #[test]
        fn rejects_older_bar() {
            let mut m = market();
            m.push_chart_bar(&Candle::new(DAY, 1.0, 1.0)).unwrap();
            assert!(m.push_chart_bar(&Candle::new(0, 1.0, 1.0)).is_err());
        }

        #[test]
        fn coarse_series_ahead_of_chart_leaves_market_unchanged() {
            let mut m = market();
            m.push_chart_bar(&Candle::new(0, 1.2, 1.1)).unwrap();
            m.set_series(
                Timeframe::Daily,
                [Candle::new(DAY, 1.4, 1.3)].into_iter().collect(),
            );

            assert_eq!(
                m.push_chart_bar(&Candle::new(HOUR, 1.5, 1.0)),
                Err(Error::NonMonotonicTime { last: DAY, got: 0 })
            );
            assert_eq!(
                m.bars(Timeframe::Hour).as_slice(),
                &[Candle::new(0, 1.2, 1.1)]
            );
            assert_eq!(
                m.bars(Timeframe::Hour4).as_slice(),
                &[Candle::new(0, 1.2, 1.1)]
            );
            assert_eq!(
                m.bars(Timeframe::Daily).as_slice(),
                &[Candle::new(DAY, 1.4, 1.3)]
            );
            assert_eq!(
                m.bars(Timeframe::Weekly).as_slice(),
                &[Candle::new(0, 1.2, 1.1)]
            );
        }

        #[test]
        fn rejected_repaint_leaves_market_unchanged() {
            let mut m = market();
            m.push_chart_bar(&Candle::new(HOUR, 1.2, 1.1)).unwrap();
            m.set_series(
                Timeframe::Monthly,
                [Candle::new(40 * DAY, 1.4, 1.3)].into_iter().collect(),
            );

            assert!(m.push_chart_bar(&Candle::new(HOUR, 1.25, 1.12)).is_err());
            assert_eq!(
                m.bars(Timeframe::Hour).as_slice(),
                &[Candle::new(HOUR, 1.2, 1.1)]
            );
            assert_eq!(
                m.bars(Timeframe::Daily).as_slice(),
                &[Candle::new(0, 1.2, 1.1)]
            );
        }
    }

    mod recording {
        use super::*;

        #[test]
        fn records_sound_and_email() {
            let mut n = RecordingNotifier::default();
            n.play_sound(SoundType::Positive).unwrap();
            n.send_email("a", "b", "s", "body").unwrap();

            assert_eq!(n.sounds(), &[SoundType::Positive]);
            assert_eq!(n.emails()[0].to, "b");
            assert_eq!(n.attempts(), 2);
        }

        #[test]
        fn failing_records_nothing() {
            let mut n = RecordingNotifier::failing();
            assert!(n.play_sound(SoundType::Positive).is_err());
            assert!(n.sounds().is_empty());
            assert_eq!(n.attempts(), 1);
        }
    }
}
