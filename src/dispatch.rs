use crate::{Breakout, Direction, Notifier, Price, SoundType, Timeframe};

use chrono::{DateTime, Utc};

/// Human-readable alert text and email subject.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct AlertMessage {
    pub text: String,
    pub subject: String,
}

impl AlertMessage {
    /// Formats the alert for `breakout`, quoting the broken level with
    /// `digits` decimals.
    #[must_use]
    pub fn new(breakout: &Breakout, timeframe: Timeframe, symbol: &str, digits: usize) -> Self {
        let price = format_price(breakout.level, digits);
        let subject = match breakout.direction {
            Direction::High => format!("High broken @ {symbol} - {timeframe}"),
            Direction::Low => format!("Low broken @ {symbol} - {timeframe}"),
        };

        Self {
            text: format!(
                "Local {} ({timeframe}) broken at {price}.",
                breakout.direction
            ),
            subject,
        }
    }

    /// Email body: server time followed by the alert text.
    #[must_use]
    pub fn email_body(&self, server_time: DateTime<Utc>) -> String {
        format!("{} {}", server_time.format("%Y-%m-%d %H:%M:%S"), self.text)
    }
}

/// Formats `price` with exactly `digits` decimals.
#[must_use]
pub fn format_price(price: Price, digits: usize) -> String {
    format!("{price:.digits$}")
}

/// Routes alerts to the enabled host notification channels.
#[derive(Clone, PartialEq, Eq, Debug)]
pub(crate) struct Dispatcher {
    sound: Option<SoundType>,
    email: Option<String>,
}

impl Dispatcher {
    pub(crate) fn new(sound: Option<SoundType>, email: Option<&str>) -> Self {
        Self {
            sound,
            email: email.map(str::to_owned),
        }
    }

    /// Sends `message` on every enabled channel. Failures are logged and
    /// not retried.
    pub(crate) fn dispatch(
        &self,
        message: &AlertMessage,
        server_time: DateTime<Utc>,
        notifier: &mut impl Notifier,
    ) {
        tracing::info!(subject = %message.subject, "{}", message.text);

        if let Some(sound) = self.sound
            && let Err(e) = notifier.play_sound(sound)
        {
            tracing::warn!(error = %e, %sound, "sound alert failed");
        }

        match self.email.as_deref() {
            Some("") => tracing::debug!("email alerts enabled without an address, skipping"),
            Some(address) => {
                let body = message.email_body(server_time);
                if let Err(e) = notifier.send_email(address, address, &message.subject, &body) {
                    tracing::warn!(error = %e, address, "email alert failed");
                }
            }
            None => {}
        }
    }
}
