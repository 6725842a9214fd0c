//! Ticket event handlers.
//!
//! Opening a ticket and a staff reply rename the channel immediately; a user
//! reply only resets the clock and lets the next poll sweep reconcile the
//! displayed status. That asymmetry is the intended debounce.

use tracing::debug;
use waitmark_core::rename;
use waitmark_core::{Actor, ChannelApiError, ChannelId, ChannelInfo, Status, TicketEvent, TimerRegistry};

use crate::api::ChannelApi;

/// Routes one host event to its handler.
pub(crate) async fn handle_event<C: ChannelApi>(
    registry: &TimerRegistry,
    api: &C,
    event: TicketEvent,
) -> Result<(), ChannelApiError> {
    match event {
        TicketEvent::Opened { channel } => on_ticket_open(registry, api, &channel).await,
        TicketEvent::Reply {
            channel,
            actor,
            anonymous,
        } => on_reply(registry, api, channel.as_ref(), &actor, anonymous).await,
        TicketEvent::Closed { channel } => {
            on_ticket_close(registry, channel).await;
            Ok(())
        }
    }
}

/// Starts tracking a new ticket and prefixes its name with the Green status.
pub(crate) async fn on_ticket_open<C: ChannelApi>(
    registry: &TimerRegistry,
    api: &C,
    channel: &ChannelInfo,
) -> Result<(), ChannelApiError> {
    registry.start_or_reset(channel.id).await;
    let name = rename::with_status(&channel.name, Status::Green);
    api.rename(channel.id, &name).await?;
    debug!(channel = %channel.id, "tracking new ticket");
    Ok(())
}

/// Handles a reply in a ticket channel.
///
/// Staff replies resolve the wait: the entry is cleared and the name reverts
/// to Green immediately. User replies restart the clock without renaming.
pub(crate) async fn on_reply<C: ChannelApi>(
    registry: &TimerRegistry,
    api: &C,
    channel: Option<&ChannelInfo>,
    actor: &Actor,
    anonymous: bool,
) -> Result<(), ChannelApiError> {
    let Some(channel) = channel else {
        return Ok(());
    };
    if anonymous || actor.is_bot {
        return Ok(());
    }

    if actor.is_staff {
        if registry.clear(channel.id).await {
            let name = rename::with_status(&channel.name, Status::Green);
            api.rename(channel.id, &name).await?;
            debug!(channel = %channel.id, "staff replied, ticket resolved");
        }
        return Ok(());
    }

    registry.start_or_reset(channel.id).await;
    Ok(())
}

/// Stops tracking a closed ticket.
pub(crate) async fn on_ticket_close(registry: &TimerRegistry, channel: ChannelId) {
    if registry.clear(channel).await {
        debug!(channel = %channel, "ticket closed, tracking stopped");
    }
}
