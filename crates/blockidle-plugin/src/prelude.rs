//! Prelude for plugin authors.
//!
//! Only the plugin-facing surface is exported here. Host-side types such as
//! `PluginHost` are not.

pub use blockidle_core::error::AppError;
pub use blockidle_core::result::AppResult;

pub use crate::api::{HostApplicationHandle, HostScreenHandle, RawHostRef};
pub use crate::contract::PluginContract;
pub use crate::runtime::{
    Compatibility, CompatibilityRequirement, IncompatibilityReason, ReleaseChannel,
    RuntimeDescriptor, SdkDescriptor,
};
