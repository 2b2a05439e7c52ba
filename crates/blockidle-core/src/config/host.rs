//! Host build metadata configuration.
//!
//! These values are already resolved by the host's packaging step. The
//! plugin crate turns them into a `RuntimeDescriptor` without parsing any
//! version strings.

use serde::{Deserialize, Serialize};

/// Host application version metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostConfig {
    /// Display-only host version name.
    #[serde(default = "default_version_name")]
    pub version_name: String,
    /// Monotonic host version code.
    #[serde(default = "default_version_code")]
    pub version_code: u32,
    /// Installed runtime SDK metadata.
    #[serde(default)]
    pub sdk: SdkConfig,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            version_name: default_version_name(),
            version_code: default_version_code(),
            sdk: SdkConfig::default(),
        }
    }
}

/// Runtime SDK metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SdkConfig {
    /// Semantic version of the runtime.
    #[serde(default = "default_full_version")]
    pub full_version: String,
    /// Lowest runtime version a plugin may assume.
    #[serde(default = "default_full_version")]
    pub minimum_supported_version: String,
    /// Monotonic release ordinal.
    #[serde(default = "default_version_number")]
    pub version_number: u32,
    /// `"alpha"`, `"beta"` or `"release"`.
    #[serde(default = "default_release_channel")]
    pub release_channel: String,
    /// Patch ordinal within the channel.
    #[serde(default = "default_sub_version")]
    pub sub_version: u32,
    /// Human-readable label.
    #[serde(default = "default_display_name")]
    pub display_name: String,
}

impl Default for SdkConfig {
    fn default() -> Self {
        Self {
            full_version: default_full_version(),
            minimum_supported_version: default_full_version(),
            version_number: default_version_number(),
            release_channel: default_release_channel(),
            sub_version: default_sub_version(),
            display_name: default_display_name(),
        }
    }
}

fn default_version_name() -> String {
    "0.0.1".to_string()
}

fn default_version_code() -> u32 {
    1
}

fn default_full_version() -> String {
    "0.0.1".to_string()
}

fn default_version_number() -> u32 {
    1
}

fn default_release_channel() -> String {
    "alpha".to_string()
}

fn default_sub_version() -> u32 {
    1
}

fn default_display_name() -> String {
    "0-alpha-1".to_string()
}
