use std::fmt::Display;

use crate::{
    AlertMessage, AlertState, Bars, Direction, MarketData, Notifier, Ohlcv, Price, Range,
    RecentHighLowConfig, Timeframe, Timestamp,
    dispatch::Dispatcher,
    plot::Plot,
    range::{scan, window_end},
};

/// Recent High/Low with breakout alerts.
///
/// Plots the highest high and lowest low of the last *n* bars of a
/// selectable timeframe onto the chart, and alerts the first time the bid
/// leaves that range.
///
/// The host calls [`calculate`](Self::calculate) for every chart bar, and
/// again for the latest bar on every live update. Each call maps the chart
/// bar onto the selected timeframe by open time and rescans the window.
/// When the mapping fails or history is too short, the previous bar's
/// values are carried forward.
///
/// Alerts are evaluated only on the latest chart bar. Each side fires once
/// per excursion outside the range, re-arms when the bid comes back inside,
/// and never fires twice on the same bar.
///
/// # Example
///
/// ```
/// use recent_hl_alert::{
///     Candle, InMemoryMarket, RecentHighLow, RecentHighLowConfig, RecordingNotifier,
///     SoundType, Timeframe, TriggerCandle,
/// };
/// use std::num::NonZero;
///
/// let mut market = InMemoryMarket::new("EURUSD", 2, Timeframe::Hour);
/// for (i, (high, low)) in [(10.0, 8.0), (12.0, 9.0), (9.0, 7.0)].into_iter().enumerate() {
///     market.push_chart_bar(&Candle::new(i as u64 * 3600, high, low)).unwrap();
/// }
///
/// let config = RecentHighLowConfig::builder()
///     .length(NonZero::new(3).unwrap())
///     .trigger(TriggerCandle::Current)
///     .sound(SoundType::Announcement)
///     .build();
/// let mut indicator = RecentHighLow::new(config, Timeframe::Hour);
/// let mut notifier = RecordingNotifier::default();
///
/// market.set_bid(12.5);
/// for i in 0..3 {
///     indicator.calculate(i, &market, &mut notifier);
/// }
///
/// assert_eq!(indicator.high(2), Some(12.0));
/// assert_eq!(indicator.low(2), Some(7.0));
/// assert_eq!(notifier.sounds(), &[SoundType::Announcement]);
/// ```
#[derive(Clone, Debug)]
pub struct RecentHighLow {
    config: RecentHighLowConfig,
    timeframe: Timeframe,
    plot: Plot,
    alerts: AlertState,
    dispatcher: Dispatcher,
}

impl RecentHighLow {
    /// Creates the indicator for a chart of timeframe `chart`.
    ///
    /// The configured timeframe is resolved here, once: `Current` becomes
    /// `chart`, and anything finer than `chart` is clamped to it.
    #[must_use]
    pub fn new(config: RecentHighLowConfig, chart: Timeframe) -> Self {
        let timeframe = config.timeframe().resolve(chart);
        let dispatcher = Dispatcher::new(config.sound(), config.email());

        Self {
            config,
            timeframe,
            plot: Plot::default(),
            alerts: AlertState::default(),
            dispatcher,
        }
    }

    /// Updates the plotted range at chart bar `index`.
    ///
    /// Returns the value now plotted at `index`, `None` while unset.
    pub fn calculate(
        &mut self,
        index: usize,
        market: &impl MarketData,
        notifier: &mut impl Notifier,
    ) -> Option<Range> {
        let chart = market.bars(market.timeframe());
        let Some(open_time) = chart.get(index).map(Ohlcv::open_time) else {
            tracing::debug!(index, bars = chart.len(), "chart bar out of range");
            self.plot.carry_forward(index);
            return self.range(index);
        };

        let Some(range) = self.window_range(market.bars(self.timeframe), open_time) else {
            tracing::debug!(index, open_time, "not enough history, carrying forward");
            self.plot.carry_forward(index);
            return self.range(index);
        };

        tracing::trace!(index, high = range.high(), low = range.low(), "range");
        self.plot.set(index, range);

        if index + 1 == chart.len() {
            self.check_alerts(index, open_time, market, notifier);
        }

        Some(range)
    }

    fn window_range(&self, series: &(impl Bars + ?Sized), open_time: Timestamp) -> Option<Range> {
        let length = self.config.length();
        let mapped = series.index_by_time(open_time)?;
        let end = window_end(series, mapped, length, self.config.shift())?;

        scan(series, end, length)
    }

    fn check_alerts(
        &mut self,
        index: usize,
        open_time: Timestamp,
        market: &impl MarketData,
        notifier: &mut impl Notifier,
    ) {
        let Some(trigger) = index.checked_sub(self.config.trigger().offset()) else {
            return;
        };

        let bid = market.bid();
        let levels = [
            (Direction::High, self.plot.high(trigger)),
            (Direction::Low, self.plot.low(trigger)),
        ];

        for (direction, level) in levels {
            if let Some(breakout) = self.alerts.evaluate(direction, level, bid, open_time) {
                tracing::debug!(
                    %direction,
                    level = breakout.level,
                    bid = breakout.bid,
                    open_time,
                    "breakout"
                );
                let message =
                    AlertMessage::new(&breakout, self.timeframe, market.symbol(), market.digits());
                self.dispatcher
                    .dispatch(&message, market.server_time(), notifier);
            }
        }
    }

    /// Timeframe the range is computed on, after resolution.
    #[inline]
    #[must_use]
    pub fn timeframe(&self) -> Timeframe {
        self.timeframe
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &RecentHighLowConfig {
        &self.config
    }

    /// Plotted high at chart bar `index`.
    #[inline]
    #[must_use]
    pub fn high(&self, index: usize) -> Option<Price> {
        self.plot.high(index)
    }

    /// Plotted low at chart bar `index`.
    #[inline]
    #[must_use]
    pub fn low(&self, index: usize) -> Option<Price> {
        self.plot.low(index)
    }

    /// Plotted range at chart bar `index`.
    #[must_use]
    pub fn range(&self, index: usize) -> Option<Range> {
        Some(Range::new(self.high(index)?, self.low(index)?))
    }

    /// The high plot series, indexed by chart bar.
    #[must_use]
    pub fn highs(&self) -> &[Option<Price>] {
        self.plot.highs()
    }

    /// The low plot series, indexed by chart bar.
    #[must_use]
    pub fn lows(&self) -> &[Option<Price>] {
        self.plot.lows()
    }

    #[must_use]
    pub fn alert_state(&self) -> &AlertState {
        &self.alerts
    }
}

impl Display for RecentHighLow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "RecentHighLow({}, {}, {})",
            self.config.length(),
            self.config.shift(),
            self.timeframe
        )
    }
}
