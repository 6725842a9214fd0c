//! Abstract channel collaborators consumed by the timer.

use std::future::Future;

use waitmark_core::{ChannelApiError, ChannelId, ChannelInfo};

/// Directory and mutator for ticket channels.
///
/// The host platform resolves channel handles and applies renames; the timer
/// core only decides when. Errors carry a [`waitmark_core::ChannelErrorKind`]
/// that drives the keep-or-drop policy per tracked entry.
pub trait ChannelApi: Send + Sync {
    /// Resolves a channel to its current display name.
    fn resolve(
        &self,
        id: ChannelId,
    ) -> impl Future<Output = Result<ChannelInfo, ChannelApiError>> + Send;

    /// Renames a channel. The new name is applied verbatim.
    fn rename(
        &self,
        id: ChannelId,
        name: &str,
    ) -> impl Future<Output = Result<(), ChannelApiError>> + Send;
}
