//! The interface every plugin implements.

use blockidle_core::result::AppResult;

use crate::api::{HostApplicationHandle, HostScreenHandle};

/// Lifecycle hooks a plugin receives from the host.
///
/// Both hooks run synchronously on the thread that raised the host event,
/// usually the host's main thread, and should return quickly. A returned
/// error or a panic is isolated to this plugin; dispatch continues with the
/// next registered plugin.
pub trait PluginContract: Send + Sync + std::fmt::Debug {
    /// Called exactly once per process, before any surface is created.
    fn on_host_process_ready(&self, application: &HostApplicationHandle) -> AppResult<()>;

    /// Called once for every surface created while this plugin is registered.
    fn on_host_surface_ready(&self, screen: &HostScreenHandle) -> AppResult<()>;
}
