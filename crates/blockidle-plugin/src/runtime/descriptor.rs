//! The runtime descriptor plugins consult before using conditional features.

use serde::{Deserialize, Serialize};

use blockidle_core::config::HostConfig;
use blockidle_core::error::AppError;
use blockidle_core::result::AppResult;

use super::sdk::SdkDescriptor;

/// Immutable bundle of host version and runtime SDK metadata.
///
/// Compare with `host_version_code()` and `sdk().version_number()`.
/// `host_version_name()` is display-only and has no defined ordering.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RuntimeDescriptor {
    host_version_name: String,
    host_version_code: u32,
    sdk: SdkDescriptor,
}

impl RuntimeDescriptor {
    /// Creates a descriptor from host version metadata and an SDK descriptor.
    pub fn new(
        host_version_name: impl Into<String>,
        host_version_code: u32,
        sdk: SdkDescriptor,
    ) -> Self {
        Self {
            host_version_name: host_version_name.into(),
            host_version_code,
            sdk,
        }
    }

    /// Starts a builder that reports missing fields at `build()`.
    pub fn builder() -> RuntimeDescriptorBuilder {
        RuntimeDescriptorBuilder::default()
    }

    /// Builds a descriptor from already-resolved host build metadata.
    ///
    /// Fails only when the configured release channel is not one of the
    /// three known channels.
    pub fn from_config(config: &HostConfig) -> AppResult<Self> {
        let sdk = &config.sdk;
        let sdk = SdkDescriptor::new(
            sdk.full_version.clone(),
            sdk.minimum_supported_version.clone(),
            sdk.version_number,
            sdk.release_channel.parse()?,
            sdk.sub_version,
            sdk.display_name.clone(),
        );
        Ok(Self::new(
            config.version_name.clone(),
            config.version_code,
            sdk,
        ))
    }

    /// Display-only host version name.
    pub fn host_version_name(&self) -> &str {
        &self.host_version_name
    }

    /// Monotonic host version code.
    pub fn host_version_code(&self) -> u32 {
        self.host_version_code
    }

    /// Installed runtime SDK.
    pub fn sdk(&self) -> &SdkDescriptor {
        &self.sdk
    }

    /// Flat API level, equal to the SDK's version number.
    pub fn api_level(&self) -> u32 {
        self.sdk.version_number()
    }

    /// Returns whether the SDK version number is at least `version_number`.
    pub fn sdk_at_least(&self, version_number: u32) -> bool {
        self.sdk.version_number() >= version_number
    }

    /// Returns whether the host version code is at least `version_code`.
    pub fn host_at_least(&self, version_code: u32) -> bool {
        self.host_version_code >= version_code
    }

    /// Serializes the descriptor as a JSON document.
    pub fn to_json(&self) -> AppResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Builder for [`RuntimeDescriptor`].
#[derive(Debug, Clone, Default)]
pub struct RuntimeDescriptorBuilder {
    host_version_name: Option<String>,
    host_version_code: Option<u32>,
    sdk: Option<SdkDescriptor>,
}

impl RuntimeDescriptorBuilder {
    /// Sets the display-only host version name.
    pub fn host_version_name(mut self, value: impl Into<String>) -> Self {
        self.host_version_name = Some(value.into());
        self
    }

    /// Sets the monotonic host version code.
    pub fn host_version_code(mut self, value: u32) -> Self {
        self.host_version_code = Some(value);
        self
    }

    /// Sets the SDK descriptor.
    pub fn sdk(mut self, value: SdkDescriptor) -> Self {
        self.sdk = Some(value);
        self
    }

    /// Builds the descriptor, failing on the first missing field.
    pub fn build(self) -> AppResult<RuntimeDescriptor> {
        const TYPE: &str = "RuntimeDescriptor";
        Ok(RuntimeDescriptor {
            host_version_name: self
                .host_version_name
                .ok_or_else(|| AppError::missing_field(TYPE, "host_version_name"))?,
            host_version_code: self
                .host_version_code
                .ok_or_else(|| AppError::missing_field(TYPE, "host_version_code"))?,
            sdk: self
                .sdk
                .ok_or_else(|| AppError::missing_field(TYPE, "sdk"))?,
        })
    }
}
