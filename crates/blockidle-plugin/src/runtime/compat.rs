//! Plugin-side compatibility requirements.
//!
//! A plugin declares the minimum runtime it needs and checks it against the
//! [`RuntimeDescriptor`] it received. The check only reports; what to do
//! with an incompatible runtime is the plugin's decision.

use serde::{Deserialize, Serialize};

use super::descriptor::RuntimeDescriptor;
use super::sdk::ReleaseChannel;

/// Minimum runtime a plugin (or one of its features) requires.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompatibilityRequirement {
    /// Minimum host version code.
    pub min_host_version_code: Option<u32>,
    /// Minimum SDK version number.
    pub min_sdk_version_number: Option<u32>,
    /// Least stable release channel accepted.
    pub min_release_channel: Option<ReleaseChannel>,
}

/// One reason a runtime failed a requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", rename_all = "snake_case")]
pub enum IncompatibilityReason {
    /// Host version code below the minimum.
    HostVersionCode { required: u32, actual: u32 },
    /// SDK version number below the minimum.
    SdkVersionNumber { required: u32, actual: u32 },
    /// Release channel less stable than the minimum.
    ReleaseChannel {
        required: ReleaseChannel,
        actual: ReleaseChannel,
    },
}

impl std::fmt::Display for IncompatibilityReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HostVersionCode { required, actual } => {
                write!(f, "host version code {actual} < required {required}")
            }
            Self::SdkVersionNumber { required, actual } => {
                write!(f, "sdk version number {actual} < required {required}")
            }
            Self::ReleaseChannel { required, actual } => {
                write!(f, "release channel {actual} is less stable than {required}")
            }
        }
    }
}

/// Outcome of checking a requirement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Compatibility {
    /// Every declared minimum is met.
    Compatible,
    /// At least one minimum is not met.
    Incompatible {
        /// All failed minimums, in field order.
        reasons: Vec<IncompatibilityReason>,
    },
}

impl Compatibility {
    /// Returns whether the runtime met every minimum.
    pub fn is_compatible(&self) -> bool {
        matches!(self, Self::Compatible)
    }

    /// Returns the failed minimums, empty when compatible.
    pub fn reasons(&self) -> &[IncompatibilityReason] {
        match self {
            Self::Compatible => &[],
            Self::Incompatible { reasons } => reasons,
        }
    }
}

impl CompatibilityRequirement {
    /// A requirement with no minimums. Every runtime satisfies it.
    pub fn any() -> Self {
        Self::default()
    }

    /// Requires at least this host version code.
    pub fn with_min_host_version_code(mut self, code: u32) -> Self {
        self.min_host_version_code = Some(code);
        self
    }

    /// Requires at least this SDK version number.
    pub fn with_min_sdk_version_number(mut self, number: u32) -> Self {
        self.min_sdk_version_number = Some(number);
        self
    }

    /// Requires a channel at least as stable as `channel`.
    pub fn with_min_release_channel(mut self, channel: ReleaseChannel) -> Self {
        self.min_release_channel = Some(channel);
        self
    }

    /// Checks the requirement against a runtime descriptor.
    ///
    /// Only numeric fields and the channel enum take part. Version name
    /// strings are never consulted.
    pub fn check(&self, runtime: &RuntimeDescriptor) -> Compatibility {
        let mut reasons = Vec::new();

        if let Some(required) = self.min_host_version_code {
            let actual = runtime.host_version_code();
            if actual < required {
                reasons.push(IncompatibilityReason::HostVersionCode { required, actual });
            }
        }

        if let Some(required) = self.min_sdk_version_number {
            let actual = runtime.sdk().version_number();
            if actual < required {
                reasons.push(IncompatibilityReason::SdkVersionNumber { required, actual });
            }
        }

        if let Some(required) = self.min_release_channel {
            let actual = runtime.sdk().release_channel();
            if actual < required {
                reasons.push(IncompatibilityReason::ReleaseChannel { required, actual });
            }
        }

        if reasons.is_empty() {
            Compatibility::Compatible
        } else {
            Compatibility::Incompatible { reasons }
        }
    }
}
