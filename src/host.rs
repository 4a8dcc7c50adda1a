use crate::{Bars, NotifyError, Price, Timeframe};

use chrono::{DateTime, Utc};
use std::fmt::Display;

/// Market data supplied by the charting host.
///
/// The chart's own bars are `bars(self.timeframe())`.
pub trait MarketData {
    type Series: Bars + ?Sized;

    /// Timeframe of the chart the indicator is attached to.
    fn timeframe(&self) -> Timeframe;

    /// Bars of `timeframe` for the chart's symbol.
    fn bars(&self, timeframe: Timeframe) -> &Self::Series;

    /// Current bid price.
    fn bid(&self) -> Price;

    /// Number of decimal digits the instrument is quoted with.
    fn digits(&self) -> usize;

    fn symbol(&self) -> &str;

    /// Host server clock.
    fn server_time(&self) -> DateTime<Utc>;
}

/// Sounds a host can play for an alert.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Default, Debug)]
pub enum SoundType {
    #[default]
    Announcement,
    Buzzer,
    Confirmation,
    Doorbell,
    Error,
    Negative,
    Positive,
}

impl Display for SoundType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

/// Notification channels supplied by the charting host.
///
/// Calls are synchronous and treated as fire-and-forget: an error is
/// logged by the caller and never retried.
pub trait Notifier {
    /// Plays `sound` on the host.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError`] if the host could not play the sound.
    fn play_sound(&mut self, sound: SoundType) -> Result<(), NotifyError>;

    /// Sends an email.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError`] if the host could not send the email.
    fn send_email(
        &mut self,
        from: &str,
        to: &str,
        subject: &str,
        body: &str,
    ) -> Result<(), NotifyError>;
}
