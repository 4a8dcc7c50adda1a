use crate::{SoundType, TimeframeSelection};

use std::{fmt::Display, num::NonZero};

/// Bar the alert thresholds are read from.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Default, Debug)]
pub enum TriggerCandle {
    /// The bar still in progress.
    Current,
    /// The last closed bar.
    #[default]
    Previous,
}

impl TriggerCandle {
    /// Bars back from the latest chart bar.
    #[inline]
    #[must_use]
    pub fn offset(self) -> usize {
        match self {
            Self::Current => 0,
            Self::Previous => 1,
        }
    }
}

/// Configuration for the [`RecentHighLow`](crate::RecentHighLow) indicator.
///
/// # Example
///
/// ```
/// use recent_hl_alert::{RecentHighLowConfig, Timeframe, TriggerCandle};
/// use std::num::NonZero;
///
/// let config = RecentHighLowConfig::builder()
///     .length(NonZero::new(20).unwrap())
///     .timeframe(Timeframe::Daily)
///     .trigger(TriggerCandle::Current)
///     .email("alerts@example.com")
///     .build();
///
/// assert_eq!(config.length(), 20);
/// assert_eq!(config.shift(), 0);
/// assert!(config.email_alerts());
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Debug)]
pub struct RecentHighLowConfig {
    length: usize,
    shift: usize,
    timeframe: TimeframeSelection,
    trigger: TriggerCandle,
    sound: Option<SoundType>,
    email: Option<String>,
}

impl RecentHighLowConfig {
    /// Range over the last `length` bars of the chart timeframe, no alerts.
    #[must_use]
    pub fn new(length: NonZero<usize>) -> Self {
        Self::builder().length(length).build()
    }

    #[must_use]
    pub fn builder() -> RecentHighLowConfigBuilder {
        RecentHighLowConfigBuilder::new()
    }

    /// Window length N, in bars of the selected timeframe.
    #[inline]
    #[must_use]
    pub fn length(&self) -> usize {
        self.length
    }

    /// Completed periods skipped before the window starts.
    #[inline]
    #[must_use]
    pub fn shift(&self) -> usize {
        self.shift
    }

    #[inline]
    #[must_use]
    pub fn timeframe(&self) -> TimeframeSelection {
        self.timeframe
    }

    #[inline]
    #[must_use]
    pub fn trigger(&self) -> TriggerCandle {
        self.trigger
    }

    #[inline]
    #[must_use]
    pub fn sound_alerts(&self) -> bool {
        self.sound.is_some()
    }

    /// Sound to play, `None` when sound alerts are off.
    #[inline]
    #[must_use]
    pub fn sound(&self) -> Option<SoundType> {
        self.sound
    }

    #[inline]
    #[must_use]
    pub fn email_alerts(&self) -> bool {
        self.email.is_some()
    }

    /// Email address, `None` when email alerts are off.
    ///
    /// May be empty; emails to an empty address are skipped.
    #[inline]
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }
}

impl Display for RecentHighLowConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "RecentHighLowConfig({}, {}, {}, {:?})",
            self.length, self.shift, self.timeframe, self.trigger
        )
    }
}

/// Builder for [`RecentHighLowConfig`].
///
/// Defaults: shift 0, current timeframe, previous trigger candle, alerts
/// off. Length must be set before calling [`build`](Self::build).
pub struct RecentHighLowConfigBuilder {
    length: Option<usize>,
    shift: usize,
    timeframe: TimeframeSelection,
    trigger: TriggerCandle,
    sound: Option<SoundType>,
    email: Option<String>,
}

impl RecentHighLowConfigBuilder {
    fn new() -> Self {
        Self {
            length: None,
            shift: 0,
            timeframe: TimeframeSelection::Current,
            trigger: TriggerCandle::Previous,
            sound: None,
            email: None,
        }
    }

    #[must_use]
    pub fn length(mut self, length: NonZero<usize>) -> Self {
        self.length.replace(length.get());
        self
    }

    #[must_use]
    pub fn shift(mut self, shift: usize) -> Self {
        self.shift = shift;
        self
    }

    #[must_use]
    pub fn timeframe(mut self, timeframe: impl Into<TimeframeSelection>) -> Self {
        self.timeframe = timeframe.into();
        self
    }

    #[must_use]
    pub fn trigger(mut self, trigger: TriggerCandle) -> Self {
        self.trigger = trigger;
        self
    }

    /// Enables sound alerts.
    #[must_use]
    pub fn sound(mut self, sound: SoundType) -> Self {
        self.sound = Some(sound);
        self
    }

    /// Enables email alerts to `address`.
    #[must_use]
    pub fn email(mut self, address: impl Into<String>) -> Self {
        self.email = Some(address.into());
        self
    }

    /// Builds the config.
    ///
    /// # Panics
    ///
    /// Panics if length was not set.
    #[must_use]
    pub fn build(self) -> RecentHighLowConfig {
        RecentHighLowConfig {
            length: self.length.expect("length is required"),
            shift: self.shift,
            timeframe: self.timeframe,
            trigger: self.trigger,
            sound: self.sound,
            email: self.email,
        }
    }
}
