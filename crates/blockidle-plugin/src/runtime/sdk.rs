//! Structured description of the installed runtime SDK.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use blockidle_core::error::AppError;
use blockidle_core::result::AppResult;

/// Stability tier of a runtime build.
///
/// Ordered from least to most stable, so `Alpha < Beta < Release`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReleaseChannel {
    /// Early, unstable builds.
    Alpha,
    /// Feature-complete pre-release builds.
    Beta,
    /// Stable builds.
    Release,
}

impl ReleaseChannel {
    /// Returns the wire name of this channel.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Alpha => "alpha",
            Self::Beta => "beta",
            Self::Release => "release",
        }
    }
}

impl fmt::Display for ReleaseChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ReleaseChannel {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "alpha" => Ok(Self::Alpha),
            "beta" => Ok(Self::Beta),
            "release" => Ok(Self::Release),
            other => Err(AppError::validation(format!(
                "Unknown release channel '{other}', expected alpha, beta or release"
            ))),
        }
    }
}

/// Immutable description of the runtime's version and release channel.
///
/// Only `version_number` and `sub_version` are meant for compatibility
/// comparisons. `full_version` and `display_name` are for humans.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SdkDescriptor {
    full_version: String,
    minimum_supported_version: String,
    version_number: u32,
    release_channel: ReleaseChannel,
    sub_version: u32,
    display_name: String,
}

impl SdkDescriptor {
    /// Creates a descriptor from all six fields.
    pub fn new(
        full_version: impl Into<String>,
        minimum_supported_version: impl Into<String>,
        version_number: u32,
        release_channel: ReleaseChannel,
        sub_version: u32,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            full_version: full_version.into(),
            minimum_supported_version: minimum_supported_version.into(),
            version_number,
            release_channel,
            sub_version,
            display_name: display_name.into(),
        }
    }

    /// Starts a builder that reports missing fields at `build()`.
    pub fn builder() -> SdkDescriptorBuilder {
        SdkDescriptorBuilder::default()
    }

    /// Semantic version of the runtime, e.g. `"0.0.1"`.
    pub fn full_version(&self) -> &str {
        &self.full_version
    }

    /// Lowest runtime version a plugin may assume is present.
    pub fn minimum_supported_version(&self) -> &str {
        &self.minimum_supported_version
    }

    /// Monotonic release ordinal. The primary compatibility key.
    pub fn version_number(&self) -> u32 {
        self.version_number
    }

    /// Stability tier.
    pub fn release_channel(&self) -> ReleaseChannel {
        self.release_channel
    }

    /// Patch ordinal within the release channel.
    pub fn sub_version(&self) -> u32 {
        self.sub_version
    }

    /// Human-readable label such as `"0-alpha-1"`. Never parse it.
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Returns whether this release came strictly before `other`.
    ///
    /// Compares `version_number` first, then `sub_version`.
    pub fn precedes(&self, other: &SdkDescriptor) -> bool {
        (self.version_number, self.sub_version) < (other.version_number, other.sub_version)
    }
}

/// Builder for [`SdkDescriptor`].
#[derive(Debug, Clone, Default)]
pub struct SdkDescriptorBuilder {
    full_version: Option<String>,
    minimum_supported_version: Option<String>,
    version_number: Option<u32>,
    release_channel: Option<ReleaseChannel>,
    sub_version: Option<u32>,
    display_name: Option<String>,
}

impl SdkDescriptorBuilder {
    /// Sets the semantic version.
    pub fn full_version(mut self, value: impl Into<String>) -> Self {
        self.full_version = Some(value.into());
        self
    }

    /// Sets the minimum supported version.
    pub fn minimum_supported_version(mut self, value: impl Into<String>) -> Self {
        self.minimum_supported_version = Some(value.into());
        self
    }

    /// Sets the release ordinal.
    pub fn version_number(mut self, value: u32) -> Self {
        self.version_number = Some(value);
        self
    }

    /// Sets the release channel.
    pub fn release_channel(mut self, value: ReleaseChannel) -> Self {
        self.release_channel = Some(value);
        self
    }

    /// Sets the patch ordinal.
    pub fn sub_version(mut self, value: u32) -> Self {
        self.sub_version = Some(value);
        self
    }

    /// Sets the display label.
    pub fn display_name(mut self, value: impl Into<String>) -> Self {
        self.display_name = Some(value.into());
        self
    }

    /// Builds the descriptor, failing on the first missing field.
    pub fn build(self) -> AppResult<SdkDescriptor> {
        const TYPE: &str = "SdkDescriptor";
        Ok(SdkDescriptor {
            full_version: self
                .full_version
                .ok_or_else(|| AppError::missing_field(TYPE, "full_version"))?,
            minimum_supported_version: self
                .minimum_supported_version
                .ok_or_else(|| AppError::missing_field(TYPE, "minimum_supported_version"))?,
            version_number: self
                .version_number
                .ok_or_else(|| AppError::missing_field(TYPE, "version_number"))?,
            release_channel: self
                .release_channel
                .ok_or_else(|| AppError::missing_field(TYPE, "release_channel"))?,
            sub_version: self
                .sub_version
                .ok_or_else(|| AppError::missing_field(TYPE, "sub_version"))?,
            display_name: self
                .display_name
                .ok_or_else(|| AppError::missing_field(TYPE, "display_name"))?,
        })
    }
}
