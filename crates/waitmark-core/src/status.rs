//! Wait-status classification.
//!
//! Maps how long a ticket has waited without a staff response to one of six
//! severity buckets, each displayed as an emoji prefix on the channel name.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Wait-severity bucket for a ticket channel, ordered from least to most
/// severe. Boundaries are inclusive on the upper bound: exactly 15 minutes
/// is still [`Status::Green`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Waiting 15 minutes or less.
    Green,
    /// Waiting more than 15 and up to 30 minutes.
    Yellow,
    /// Waiting more than 30 and up to 45 minutes.
    Orange,
    /// Waiting more than 45 and up to 60 minutes.
    Red,
    /// Waiting more than 1 and up to 2 hours.
    Skull,
    /// Waiting more than 2 hours.
    DoubleSkull,
}

impl Status {
    /// Classifies elapsed wait time (in minutes) into a severity bucket.
    pub fn for_elapsed_minutes(minutes: f64) -> Self {
        if minutes <= 15.0 {
            Status::Green
        } else if minutes <= 30.0 {
            Status::Yellow
        } else if minutes <= 45.0 {
            Status::Orange
        } else if minutes <= 60.0 {
            Status::Red
        } else if minutes <= 120.0 {
            Status::Skull
        } else {
            Status::DoubleSkull
        }
    }

    /// Returns the display emoji for this status.
    pub fn emoji(&self) -> &'static str {
        match self {
            Status::Green => "🟢",
            Status::Yellow => "🟡",
            Status::Orange => "🟠",
            Status::Red => "🔴",
            Status::Skull => "💀",
            Status::DoubleSkull => "☠️",
        }
    }

    /// Looks up a status by its display emoji.
    pub fn from_emoji(emoji: &str) -> Option<Self> {
        Status::all()
            .iter()
            .copied()
            .find(|status| status.emoji() == emoji)
    }

    /// Returns the short label used in logs.
    pub fn label(&self) -> &'static str {
        match self {
            Status::Green => "green",
            Status::Yellow => "yellow",
            Status::Orange => "orange",
            Status::Red => "red",
            Status::Skull => "skull",
            Status::DoubleSkull => "double_skull",
        }
    }

    /// Returns all statuses in severity order.
    pub fn all() -> &'static [Status] {
        &[
            Status::Green,
            Status::Yellow,
            Status::Orange,
            Status::Red,
            Status::Skull,
            Status::DoubleSkull,
        ]
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
