//! Per-tenant settings persistence.
//!
//! The only setting is which channel's feed a tenant wants analysed.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Errors from a settings backend.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Settings I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Settings file is malformed: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Settings stored for a single tenant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_channel: Option<u64>,
}

/// Storage for per-tenant settings.
pub trait SettingsStore: Send {
    /// The channel configured for `tenant`, if any.
    fn target_channel(&self, tenant: &str) -> Result<Option<u64>, SettingsError>;

    /// Point `tenant` at `channel`.
    fn set_target_channel(&mut self, tenant: &str, channel: u64) -> Result<(), SettingsError>;
}

/// Settings kept in memory for the life of the process.
#[derive(Debug, Clone, Default)]
pub struct MemorySettingsStore {
    tenants: BTreeMap<String, TenantSettings>,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for MemorySettingsStore {
    fn target_channel(&self, tenant: &str) -> Result<Option<u64>, SettingsError> {
        Ok(self.tenants.get(tenant).and_then(|s| s.target_channel))
    }

    fn set_target_channel(&mut self, tenant: &str, channel: u64) -> Result<(), SettingsError> {
        self.tenants.entry(tenant.to_string()).or_default().target_channel = Some(channel);
        Ok(())
    }
}

/// Settings persisted as a pretty-printed JSON map of tenant to settings.
///
/// The file is read on every lookup and rewritten on every change; a
/// missing file reads as empty and is created on first write.
#[derive(Debug, Clone)]
pub struct JsonSettingsStore {
    path: PathBuf,
}

impl JsonSettingsStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, TenantSettings>, SettingsError> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, tenants: &BTreeMap<String, TenantSettings>) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(tenants)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

impl SettingsStore for JsonSettingsStore {
    fn target_channel(&self, tenant: &str) -> Result<Option<u64>, SettingsError> {
        Ok(self.load()?.get(tenant).and_then(|s| s.target_channel))
    }

    fn set_target_channel(&mut self, tenant: &str, channel: u64) -> Result<(), SettingsError> {
        let mut tenants = self.load()?;
        tenants.entry(tenant.to_string()).or_default().target_channel = Some(channel);
        self.save(&tenants)?;
        debug!(path = %self.path.display(), tenant, channel, "stored target channel");
        Ok(())
    }
}
