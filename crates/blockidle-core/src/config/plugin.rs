//! Plugin selection configuration.

use serde::{Deserialize, Serialize};

/// Plugin system configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginConfig {
    /// Ids of bundled plugins to register.
    /// `None` registers every bundled plugin.
    #[serde(default)]
    pub enabled: Option<Vec<String>>,
    /// Minimum SDK version number the compatibility probe requires.
    #[serde(default = "default_probe_min_sdk")]
    pub probe_min_sdk_version_number: u32,
    /// Hooks running longer than this many milliseconds are logged as slow.
    #[serde(default = "default_slow_hook_warn_ms")]
    pub slow_hook_warn_ms: u64,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            enabled: None,
            probe_min_sdk_version_number: default_probe_min_sdk(),
            slow_hook_warn_ms: default_slow_hook_warn_ms(),
        }
    }
}

impl PluginConfig {
    /// Returns whether the plugin with the given id should be registered.
    pub fn is_enabled(&self, plugin_id: &str) -> bool {
        match &self.enabled {
            Some(ids) => ids.iter().any(|id| id == plugin_id),
            None => true,
        }
    }
}

fn default_probe_min_sdk() -> u32 {
    1
}

fn default_slow_hook_warn_ms() -> u64 {
    100
}
