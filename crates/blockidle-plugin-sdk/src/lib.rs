//! # blockidle-plugin-sdk
//!
//! SDK for developing BlockIdle plugins. It exposes only the sanctioned
//! plugin surface: descriptors, handles, the contract, and compatibility
//! helpers. Handles cannot be constructed through this crate.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use blockidle_plugin_sdk::prelude::*;
//!
//! #[derive(Debug)]
//! struct MyPlugin;
//!
//! impl PluginContract for MyPlugin {
//!     fn on_host_process_ready(&self, app: &HostApplicationHandle) -> AppResult<()> {
//!         let needs = CompatibilityRequirement::any().with_min_sdk_version_number(2);
//!         if !needs.check(app.runtime_descriptor()).is_compatible() {
//!             app.log("runtime too old, staying idle");
//!         }
//!         Ok(())
//!     }
//!
//!     fn on_host_surface_ready(&self, screen: &HostScreenHandle) -> AppResult<()> {
//!         screen.log(format!("opened {}", screen.runtime_identity_tag()));
//!         Ok(())
//!     }
//! }
//! ```

pub mod features;

/// Prelude for convenient imports.
pub mod prelude {
    pub use blockidle_plugin::prelude::*;

    pub use crate::features::{FeatureGate, FeatureGrant};
}
