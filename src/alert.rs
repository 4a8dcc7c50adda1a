use crate::{Price, Timestamp};

use std::fmt::Display;

/// Side of the range that was broken.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub enum Direction {
    High,
    Low,
}

impl Direction {
    /// Whether `bid` lies beyond `level` on this side.
    #[inline]
    #[must_use]
    pub fn is_breached(self, bid: Price, level: Price) -> bool {
        match self {
            Self::High => bid > level,
            Self::Low => bid < level,
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::High => f.write_str("high"),
            Self::Low => f.write_str("low"),
        }
    }
}

/// Edge-trigger latch for one side of the range.
///
/// Fires once when price leaves the range, re-arms when price comes back
/// inside, and never fires twice for the same bar open time.
#[derive(Clone, Copy, Default, PartialEq, Eq, Debug)]
pub struct Latch {
    triggered: bool,
    last_alert: Option<Timestamp>,
}

impl Latch {
    /// Whether price is outside the range and an alert has been sent for it.
    #[inline]
    #[must_use]
    pub fn is_triggered(&self) -> bool {
        self.triggered
    }

    /// Open time of the bar the last alert was sent on.
    #[inline]
    #[must_use]
    pub fn last_alert(&self) -> Option<Timestamp> {
        self.last_alert
    }

    /// Advances the latch; returns `true` when an alert must be sent.
    pub fn update(&mut self, breached: bool, bar_open: Timestamp) -> bool {
        if !breached {
            self.triggered = false;
            return false;
        }

        if self.triggered || self.last_alert == Some(bar_open) {
            return false;
        }

        self.triggered = true;
        self.last_alert = Some(bar_open);
        true
    }
}

/// A fired alert: which side broke, the level it broke, and the bar.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Breakout {
    pub direction: Direction,
    pub level: Price,
    pub bid: Price,
    pub open_time: Timestamp,
}

/// Alert latches for both sides of the range.
#[derive(Clone, Copy, Default, PartialEq, Eq, Debug)]
pub struct AlertState {
    high: Latch,
    low: Latch,
}

impl AlertState {
    #[must_use]
    pub fn latch(&self, direction: Direction) -> &Latch {
        match direction {
            Direction::High => &self.high,
            Direction::Low => &self.low,
        }
    }

    fn latch_mut(&mut self, direction: Direction) -> &mut Latch {
        match direction {
            Direction::High => &mut self.high,
            Direction::Low => &mut self.low,
        }
    }

    /// Evaluates one side against `bid`.
    ///
    /// `level` is `None` when the trigger bar has no computed value; the
    /// side is then left untouched.
    pub fn evaluate(
        &mut self,
        direction: Direction,
        level: Option<Price>,
        bid: Price,
        open_time: Timestamp,
    ) -> Option<Breakout> {
        let level = level?;
        let breached = direction.is_breached(bid, level);

        self.latch_mut(direction)
            .update(breached, open_time)
            .then_some(Breakout {
                direction,
                level,
                bid,
                open_time,
            })
    }
}
