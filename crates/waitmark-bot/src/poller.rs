//! Fixed-interval poll loop.
//!
//! Each sweep re-evaluates every tracked channel and reconciles the displayed
//! status. The registry guard is held for the whole sweep so handler
//! mutations cannot interleave with the scan.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use waitmark_core::rename;
use waitmark_core::{Status, TimerRegistry};

use crate::api::ChannelApi;

/// Runs poll sweeps on a fixed interval until `cancel` fires.
///
/// Cancellation interrupts the inter-sweep wait, never an in-flight sweep.
/// A sweep can fail per entry only; the loop itself ends solely on
/// cancellation.
pub(crate) async fn run_poller<C: ChannelApi>(
    registry: TimerRegistry,
    api: Arc<C>,
    interval: Duration,
    cancel: CancellationToken,
) {
    info!(interval_secs = interval.as_secs(), "wait-status poller started");
    loop {
        sweep(&registry, api.as_ref(), Utc::now()).await;
        tokio::select! {
            () = cancel.cancelled() => break,
            () = tokio::time::sleep(interval) => {}
        }
    }
    info!("wait-status poller stopped");
}

/// One reconciliation pass over all tracked channels.
///
/// Unresolvable channels are dropped. A changed status is written back only
/// after the rename succeeds; NotFound/Forbidden rename failures drop the
/// entry, anything else leaves it for the next cycle. A failure on one entry
/// never aborts the rest of the sweep.
pub(crate) async fn sweep<C: ChannelApi>(registry: &TimerRegistry, api: &C, now: DateTime<Utc>) {
    let mut entries = registry.lock_entries().await;
    let ids: Vec<_> = entries.keys().copied().collect();

    for id in ids {
        let Some(entry) = entries.get(&id) else {
            continue;
        };

        let channel = match api.resolve(id).await {
            Ok(channel) => channel,
            Err(err) if err.is_give_up() => {
                info!(channel = %id, error = %err, "channel gone, tracking stopped");
                entries.remove(&id);
                continue;
            }
            Err(err) => {
                warn!(channel = %id, error = %err, "channel lookup failed, will retry");
                continue;
            }
        };

        let status = Status::for_elapsed_minutes(entry.elapsed_minutes(now));
        if status == entry.status {
            continue;
        }

        let new_name = rename::with_status(&channel.name, status);
        match api.rename(id, &new_name).await {
            Ok(()) => {
                if let Some(entry) = entries.get_mut(&id) {
                    debug!(channel = %id, from = %entry.status, to = %status, "status updated");
                    entry.status = status;
                }
            }
            Err(err) if err.is_give_up() => {
                warn!(channel = %id, error = %err, "rename refused, tracking stopped");
                entries.remove(&id);
            }
            Err(err) => {
                warn!(channel = %id, error = %err, "rename failed, will retry");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration as ChronoDuration;
    use waitmark_core::{ChannelApiError, ChannelId};

    use super::*;
    use crate::api::test_support::FakeChannelApi;

    async fn seed(registry: &TimerRegistry, id: u64, minutes_ago: i64) {
        registry
            .start_or_reset_at(ChannelId(id), Utc::now() - ChronoDuration::minutes(minutes_ago))
            .await;
    }

    #[tokio::test]
    async fn renames_when_bucket_changes() {
        let registry = TimerRegistry::new();
        let api = FakeChannelApi::new().with_channel(ChannelId(42), "🟢│ticket-0042");
        seed(&registry, 42, 46).await;

        sweep(&registry, &api, Utc::now()).await;

        assert_eq!(
            api.renames(),
            vec![(ChannelId(42), "🟠│ticket-0042".to_string())]
        );
        let entry = registry.entry(ChannelId(42)).await.unwrap();
        assert_eq!(entry.status, Status::Orange);
    }

    #[tokio::test]
    async fn skips_rename_when_status_unchanged() {
        let registry = TimerRegistry::new();
        let api = FakeChannelApi::new().with_channel(ChannelId(42), "🟢│ticket-0042");
        seed(&registry, 42, 5).await;

        sweep(&registry, &api, Utc::now()).await;

        assert!(api.renames().is_empty());
    }

    #[tokio::test]
    async fn removes_entry_when_channel_not_found() {
        let registry = TimerRegistry::new();
        // Channel 42 is unknown to the API; 43 resolves normally.
        let api = FakeChannelApi::new().with_channel(ChannelId(43), "🟢│ticket-0043");
        seed(&registry, 42, 46).await;
        seed(&registry, 43, 46).await;

        sweep(&registry, &api, Utc::now()).await;

        assert!(!registry.contains(ChannelId(42)).await);
        assert_eq!(
            api.renames(),
            vec![(ChannelId(43), "🟠│ticket-0043".to_string())]
        );
    }

    #[tokio::test]
    async fn forbidden_rename_drops_entry_and_sweep_continues() {
        let registry = TimerRegistry::new();
        let api = FakeChannelApi::new()
            .with_channel(ChannelId(42), "🟢│ticket-0042")
            .with_channel(ChannelId(43), "🟢│ticket-0043");
        api.fail_rename(ChannelId(42), ChannelApiError::forbidden("missing permissions"));
        seed(&registry, 42, 46).await;
        seed(&registry, 43, 46).await;

        sweep(&registry, &api, Utc::now()).await;

        assert!(!registry.contains(ChannelId(42)).await);
        let entry = registry.entry(ChannelId(43)).await.unwrap();
        assert_eq!(entry.status, Status::Orange);
    }

    #[tokio::test]
    async fn transient_rename_failure_keeps_entry_and_status() {
        let registry = TimerRegistry::new();
        let api = FakeChannelApi::new().with_channel(ChannelId(42), "🟢│ticket-0042");
        api.fail_rename(ChannelId(42), ChannelApiError::transient("rate limited"));
        seed(&registry, 42, 46).await;

        sweep(&registry, &api, Utc::now()).await;

        // Status must not advance without a confirmed rename.
        let entry = registry.entry(ChannelId(42)).await.unwrap();
        assert_eq!(entry.status, Status::Green);
        assert!(registry.contains(ChannelId(42)).await);
    }

    #[tokio::test]
    async fn severity_keeps_climbing_across_sweeps() {
        let registry = TimerRegistry::new();
        let api = FakeChannelApi::new().with_channel(ChannelId(42), "ticket-0042");
        let opened = Utc::now();
        registry.start_or_reset_at(ChannelId(42), opened).await;

        sweep(&registry, &api, opened + ChronoDuration::minutes(20)).await;
        sweep(&registry, &api, opened + ChronoDuration::minutes(70)).await;
        sweep(&registry, &api, opened + ChronoDuration::minutes(150)).await;

        assert_eq!(
            api.renames(),
            vec![
                (ChannelId(42), "🟡│ticket-0042".to_string()),
                (ChannelId(42), "🔴│ticket-0042".to_string()),
                (ChannelId(42), "☠️│ticket-0042".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn cancellation_stops_the_loop() {
        let registry = TimerRegistry::new();
        let api = Arc::new(FakeChannelApi::new());
        let cancel = CancellationToken::new();
        let handle = tokio::spawn(run_poller(
            registry.clone(),
            Arc::clone(&api),
            Duration::from_secs(60),
            cancel.clone(),
        ));

        cancel.cancel();
        handle.await.unwrap();
    }
}
