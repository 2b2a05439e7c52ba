//! Runtime metadata model: SDK and runtime descriptors plus compatibility checks.

pub mod compat;
pub mod descriptor;
pub mod sdk;

pub use compat::{Compatibility, CompatibilityRequirement, IncompatibilityReason};
pub use descriptor::{RuntimeDescriptor, RuntimeDescriptorBuilder};
pub use sdk::{ReleaseChannel, SdkDescriptor, SdkDescriptorBuilder};
