//! Channel-API error taxonomy.
//!
//! Every failure from the channel directory or mutator collapses into one of
//! four kinds, which decide whether the timer entry is dropped or retried on
//! the next poll cycle.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Categories of channel-API failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelErrorKind {
    /// The channel no longer exists or is inaccessible. Stop tracking it.
    NotFound,
    /// The bot lacks permission to edit the channel. Stop tracking it.
    Forbidden,
    /// Rate limit, timeout, or server-side failure. Retry next cycle.
    Transient,
    /// Anything else. Logged and isolated to the entry being processed.
    Other,
}

impl fmt::Display for ChannelErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ChannelErrorKind::NotFound => "not_found",
            ChannelErrorKind::Forbidden => "forbidden",
            ChannelErrorKind::Transient => "transient",
            ChannelErrorKind::Other => "other",
        };
        write!(f, "{label}")
    }
}

/// Structured error from the channel API with kind and a one-line message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelApiError {
    pub kind: ChannelErrorKind,
    pub message: String,
}

impl ChannelApiError {
    pub fn new(kind: ChannelErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ChannelErrorKind::NotFound, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ChannelErrorKind::Forbidden, message)
    }

    pub fn transient(message: impl Into<String>) -> Self {
        Self::new(ChannelErrorKind::Transient, message)
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self::new(ChannelErrorKind::Other, message)
    }

    /// Maps an HTTP status (and optional error body) onto an error kind.
    pub fn http_status(status: u16, body: &str) -> Self {
        let kind = match status {
            404 => ChannelErrorKind::NotFound,
            401 | 403 => ChannelErrorKind::Forbidden,
            408 | 429 | 500..=599 => ChannelErrorKind::Transient,
            _ => ChannelErrorKind::Other,
        };

        // Pull a cleaner message out of a JSON error body when present.
        if let Ok(json) = serde_json::from_str::<Value>(body)
            && let Some(msg) = json.get("message").and_then(|v| v.as_str())
        {
            return Self::new(kind, format!("HTTP {status}: {msg}"));
        }
        Self::new(kind, format!("HTTP {status}"))
    }

    /// Whether the tracked entry should be dropped rather than retried.
    pub fn is_give_up(&self) -> bool {
        matches!(
            self.kind,
            ChannelErrorKind::NotFound | ChannelErrorKind::Forbidden
        )
    }
}

impl fmt::Display for ChannelApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message, self.kind)
    }
}

impl std::error::Error for ChannelApiError {}
