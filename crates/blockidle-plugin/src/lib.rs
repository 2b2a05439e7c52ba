//! # blockidle-plugin
//!
//! The host/plugin boundary for BlockIdle. Provides:
//!
//! - Runtime metadata (`SdkDescriptor`, `RuntimeDescriptor`) and
//!   compatibility requirements plugins check before using a feature
//! - Operation-limited handles around host objects
//!   (`HostApplicationHandle`, `HostScreenHandle`)
//! - The `PluginContract` trait and a registration-ordered registry
//! - A lifecycle dispatcher isolating per-plugin failures
//! - `PluginHost`, the host-side driver and sole constructor of handles

pub mod api;
pub mod contract;
pub mod dispatcher;
pub mod host;
pub mod prelude;
pub mod registry;
pub mod runtime;

pub use api::{HostApplicationHandle, HostScreenHandle, RawHostRef};
pub use contract::PluginContract;
pub use dispatcher::{DispatchReport, LifecycleDispatcher, LifecycleEvent};
pub use host::{HostPhase, PluginHost};
pub use registry::PluginRegistry;
pub use runtime::{CompatibilityRequirement, ReleaseChannel, RuntimeDescriptor, SdkDescriptor};
