//! Core waitmark library (status classifier, rename formatter, timer registry).

pub mod channel;
pub mod error;
pub mod events;
pub mod registry;
pub mod rename;
pub mod status;

pub use channel::{ChannelId, ChannelInfo};
pub use error::{ChannelApiError, ChannelErrorKind};
pub use events::{Actor, TicketEvent};
pub use registry::{TimerEntry, TimerRegistry};
pub use status::Status;
