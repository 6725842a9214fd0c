//! In-memory timer registry.
//!
//! One entry per tracked ticket channel, keyed by channel id. Handlers and
//! the poll sweep share a single async mutex so a sweep never interleaves
//! with a concurrent insert or clear.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, MutexGuard};

use crate::channel::ChannelId;
use crate::status::Status;

/// Timer state for one tracked ticket channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerEntry {
    /// When the ticket last saw activity that resets the wait clock.
    pub last_activity: DateTime<Utc>,
    /// The status last applied to the channel name.
    pub status: Status,
}

impl TimerEntry {
    /// Elapsed wait time in minutes as of `now`.
    pub fn elapsed_minutes(&self, now: DateTime<Utc>) -> f64 {
        let elapsed = now.signed_duration_since(self.last_activity);
        elapsed.num_milliseconds() as f64 / 60_000.0
    }
}

/// Cloneable handle to the shared timer map.
///
/// All mutation goes through one lock; the poll sweep takes the whole guard
/// via [`TimerRegistry::lock_entries`] for the duration of a pass.
#[derive(Debug, Clone, Default)]
pub struct TimerRegistry {
    entries: Arc<Mutex<HashMap<ChannelId, TimerEntry>>>,
}

impl TimerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or overwrites the entry for `id`, timestamped now and Green.
    pub async fn start_or_reset(&self, id: ChannelId) {
        self.start_or_reset_at(id, Utc::now()).await;
    }

    /// Inserts or overwrites the entry for `id` at an explicit timestamp.
    pub async fn start_or_reset_at(&self, id: ChannelId, last_activity: DateTime<Utc>) {
        let mut entries = self.entries.lock().await;
        entries.insert(
            id,
            TimerEntry {
                last_activity,
                status: Status::Green,
            },
        );
    }

    /// Removes the entry for `id`. Returns whether an entry was present.
    pub async fn clear(&self, id: ChannelId) -> bool {
        self.entries.lock().await.remove(&id).is_some()
    }

    pub async fn contains(&self, id: ChannelId) -> bool {
        self.entries.lock().await.contains_key(&id)
    }

    pub async fn entry(&self, id: ChannelId) -> Option<TimerEntry> {
        self.entries.lock().await.get(&id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }

    /// Locks the full entry map for a sweep. The guard is held for the whole
    /// pass so handler mutations cannot resurrect a cleared entry mid-scan.
    pub async fn lock_entries(&self) -> MutexGuard<'_, HashMap<ChannelId, TimerEntry>> {
        self.entries.lock().await
    }
}
