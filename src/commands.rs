//! The `setchannel` and `metrics` operations, independent of any CLI.

use chrono::{DateTime, Utc};
use tracing::info;

use crate::collector::{collect_at, LookbackWindow};
use crate::data::build_timelines_at;
use crate::error::UptimeError;
use crate::extract::ExtractorRules;
use crate::report::Report;
use crate::settings::SettingsStore;
use crate::source::ObservationSource;

/// Who is running a command.
#[derive(Debug, Clone)]
pub struct Caller {
    pub tenant: String,
    /// Whether the caller may change settings.
    pub is_admin: bool,
    /// The channel the caller is "in", used when `setchannel` gets no argument.
    pub current_channel: Option<u64>,
}

/// Store the channel to analyse for the caller's tenant.
///
/// Falls back to the caller's current channel when `channel` is `None`.
/// Returns the channel that was stored.
pub fn set_channel(
    store: &mut dyn SettingsStore,
    caller: &Caller,
    channel: Option<u64>,
) -> Result<u64, UptimeError> {
    if !caller.is_admin {
        return Err(UptimeError::PermissionDenied(
            "changing the target channel requires admin rights".to_string(),
        ));
    }

    let channel = channel.or(caller.current_channel).ok_or(UptimeError::NoCurrentChannel)?;
    store.set_target_channel(&caller.tenant, channel)?;

    info!(tenant = %caller.tenant, channel, "target channel set");
    Ok(channel)
}

/// Look up the channel configured for `tenant`.
pub fn target_channel(store: &dyn SettingsStore, tenant: &str) -> Result<u64, UptimeError> {
    store.target_channel(tenant)?.ok_or(UptimeError::NoChannelConfigured)
}

/// Collect the window's observations from `source` and build the report.
pub async fn metrics(
    source: &mut dyn ObservationSource,
    label: &str,
    window: LookbackWindow,
    rules: &ExtractorRules,
) -> Result<Report, UptimeError> {
    metrics_at(source, label, window, rules, Utc::now()).await
}

/// [`metrics`] with a pinned clock.
pub async fn metrics_at(
    source: &mut dyn ObservationSource,
    label: &str,
    window: LookbackWindow,
    rules: &ExtractorRules,
    now: DateTime<Utc>,
) -> Result<Report, UptimeError> {
    info!(
        source = source.description(),
        window = %window.label(),
        "analysing feed"
    );

    let observations = collect_at(source, &window, rules, now).await?;
    let entities = build_timelines_at(&observations, now);
    Ok(Report::new(label, window, now, entities))
}
