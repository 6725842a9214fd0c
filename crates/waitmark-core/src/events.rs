//! Ticket events delivered by the host bot.

use crate::channel::{ChannelId, ChannelInfo};

/// The actor behind a ticket reply.
///
/// Staffness is an explicit capability flag decided by the host event source;
/// this core never infers it from platform-specific attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub id: u64,
    pub is_bot: bool,
    pub is_staff: bool,
}

/// Lifecycle events for a ticket channel, as delivered by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TicketEvent {
    /// A new ticket channel was opened.
    Opened { channel: ChannelInfo },
    /// Someone replied in a ticket channel. The channel is absent when the
    /// host could not associate the reply with one.
    Reply {
        channel: Option<ChannelInfo>,
        actor: Actor,
        anonymous: bool,
    },
    /// The ticket was closed.
    Closed { channel: ChannelId },
}
