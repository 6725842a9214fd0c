//! Ticket wait-status timer.
//!
//! Background job for a support-ticket bot: tracks how long each ticket
//! channel has waited without a staff response and keeps a status emoji
//! prefix on the channel name in sync with the elapsed wait. The host bot
//! feeds ticket events in; a fixed-interval poller reconciles the display.
//!
//! Timer state is in-memory only and is lost on restart.

use std::sync::Arc;

use anyhow::Result;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

mod api;
mod config;
mod discord;
mod handlers;
mod poller;

pub use api::ChannelApi;
pub use config::{TimerConfig, TimerSettings};
pub use discord::DiscordClient;
pub use waitmark_core::{
    Actor, ChannelApiError, ChannelErrorKind, ChannelId, ChannelInfo, Status, TicketEvent,
    TimerEntry, TimerRegistry, rename,
};

/// Runs the timer until `cancel` fires or the host closes the event channel.
///
/// The registry is constructed by the caller and passed in explicitly, so
/// the host can inspect tracked state. Event handling failures are logged
/// and never stop the loop; the poller is cancelled and joined on exit.
pub async fn run<C>(
    settings: TimerSettings,
    api: C,
    registry: TimerRegistry,
    mut events: mpsc::UnboundedReceiver<TicketEvent>,
    cancel: CancellationToken,
) -> Result<()>
where
    C: ChannelApi + 'static,
{
    let api = Arc::new(api);
    let poller = tokio::spawn(poller::run_poller(
        registry.clone(),
        Arc::clone(&api),
        settings.poll_interval,
        cancel.clone(),
    ));

    info!("waitmark timer started");
    loop {
        tokio::select! {
            () = cancel.cancelled() => break,
            event = events.recv() => {
                let Some(event) = event else {
                    info!("ticket event source closed");
                    break;
                };
                if let Err(err) = handlers::handle_event(&registry, api.as_ref(), event).await {
                    warn!(error = %err, "ticket event handling failed");
                }
            }
        }
    }

    cancel.cancel();
    let _ = poller.await;
    info!("waitmark timer stopped");
    Ok(())
}
