//! Top-level error type.

use thiserror::Error;

use crate::settings::SettingsError;
use crate::source::SourceError;

/// Errors surfaced to whoever runs a command.
#[derive(Debug, Error)]
pub enum UptimeError {
    /// No channel has been stored for the tenant yet.
    #[error("No target channel configured. Use `setchannel` first.")]
    NoChannelConfigured,

    /// A channel is stored but its feed cannot be found.
    #[error("Configured target channel {0} not found.")]
    ChannelNotFound(u64),

    /// `setchannel` was run without a channel and there is no current one.
    #[error("No channel given and no current channel configured.")]
    NoCurrentChannel,

    /// The caller may not change settings.
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// The look-back window is empty, negative or too large.
    #[error("Invalid look-back window: {0}")]
    InvalidWindow(String),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Settings(#[from] SettingsError),
}

impl UptimeError {
    /// Whether this is a precondition the user can fix, as opposed to a
    /// failure during analysis.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            UptimeError::NoChannelConfigured
                | UptimeError::ChannelNotFound(_)
                | UptimeError::NoCurrentChannel
                | UptimeError::PermissionDenied(_)
                | UptimeError::InvalidWindow(_)
        )
    }
}
