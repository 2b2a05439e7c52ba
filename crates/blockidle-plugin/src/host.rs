//! Host-side lifecycle driver.
//!
//! [`PluginHost`] is the only place handles are constructed. It owns the
//! registry, the process-wide application handle, and one screen handle per
//! live surface, and turns host lifecycle events into plugin dispatch.

use std::sync::Arc;

use tracing::{info, warn};

use blockidle_core::error::AppError;
use blockidle_core::result::AppResult;
use blockidle_core::types::SurfaceId;

use crate::api::{
    DiagnosticSink, HostApplicationHandle, HostObject, HostScreenHandle, TracingSink,
};
use crate::contract::PluginContract;
use crate::dispatcher::{DispatchReport, LifecycleDispatcher};
use crate::registry::PluginRegistry;
use crate::runtime::RuntimeDescriptor;

/// Lifecycle phase of the host process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostPhase {
    /// Plugins may be registered; no event has been dispatched.
    Created,
    /// Process-ready has been dispatched; surfaces may be created.
    Running,
    /// Process teardown finished.
    ShutDown,
}

/// Drives the host/plugin boundary for one process.
///
/// Construct one per process (or per test). Nothing here is global.
#[derive(Debug)]
pub struct PluginHost {
    registry: PluginRegistry,
    dispatcher: LifecycleDispatcher,
    sink: Arc<dyn DiagnosticSink>,
    application: Option<HostApplicationHandle>,
    /// Live surfaces in creation order.
    surfaces: Vec<HostScreenHandle>,
    phase: HostPhase,
}

impl Default for PluginHost {
    fn default() -> Self {
        Self::new()
    }
}

impl PluginHost {
    /// Creates a host that routes plugin diagnostics to `tracing`.
    pub fn new() -> Self {
        Self::with_sink(Arc::new(TracingSink))
    }

    /// Creates a host that routes plugin diagnostics to `sink`.
    pub fn with_sink(sink: Arc<dyn DiagnosticSink>) -> Self {
        Self {
            registry: PluginRegistry::new(),
            dispatcher: LifecycleDispatcher::default(),
            sink,
            application: None,
            surfaces: Vec::new(),
            phase: HostPhase::Created,
        }
    }

    /// Replaces the dispatcher.
    pub fn with_dispatcher(mut self, dispatcher: LifecycleDispatcher) -> Self {
        self.dispatcher = dispatcher;
        self
    }

    /// Registers a plugin.
    ///
    /// A plugin registered while the host is running immediately receives
    /// `on_host_process_ready` (the returned report), then only surfaces
    /// created from now on.
    pub fn register(
        &mut self,
        id: impl Into<String>,
        plugin: Arc<dyn PluginContract>,
    ) -> AppResult<Option<DispatchReport>> {
        if self.phase == HostPhase::ShutDown {
            return Err(AppError::lifecycle(
                "Cannot register a plugin after host shutdown",
            ));
        }

        let id = id.into();
        self.registry.register(id.clone(), plugin)?;

        match (&self.phase, &self.application) {
            (HostPhase::Running, Some(application)) => {
                info!(plugin_id = %id, "Late registration, delivering process ready");
                let entries = self.registry.entries();
                let late = &entries[entries.len() - 1..];
                Ok(Some(self.dispatcher.process_ready(late, application)))
            }
            _ => Ok(None),
        }
    }

    /// Unregisters a plugin. It receives no further events.
    pub fn unregister(&mut self, plugin_id: &str) -> AppResult<()> {
        self.registry.unregister(plugin_id).map(|_| ())
    }

    /// Handles process start: wraps the process object and the runtime
    /// descriptor, then delivers `on_host_process_ready` to every plugin.
    pub fn start_process(
        &mut self,
        process: HostObject,
        runtime: RuntimeDescriptor,
    ) -> AppResult<DispatchReport> {
        if self.phase != HostPhase::Created {
            return Err(AppError::lifecycle(format!(
                "Process already started (phase {:?})",
                self.phase
            )));
        }

        info!(
            host_version_code = runtime.host_version_code(),
            sdk_version_number = runtime.sdk().version_number(),
            release_channel = %runtime.sdk().release_channel(),
            plugins = self.registry.len(),
            "Host process starting"
        );

        let application = HostApplicationHandle::new(process, runtime, self.sink.clone());
        let report = self
            .dispatcher
            .process_ready(self.registry.entries(), &application);

        self.application = Some(application);
        self.phase = HostPhase::Running;
        Ok(report)
    }

    /// Handles a surface-creation event: wraps the surface object and
    /// delivers `on_host_surface_ready` to every plugin before returning.
    pub fn create_surface(
        &mut self,
        surface: HostObject,
        tag: impl Into<String>,
    ) -> AppResult<DispatchReport> {
        if self.phase != HostPhase::Running {
            return Err(AppError::lifecycle(format!(
                "Surfaces can only be created while running (phase {:?})",
                self.phase
            )));
        }

        let surface_id = SurfaceId::new();
        let screen = HostScreenHandle::new(surface_id, surface, tag, self.sink.clone());
        info!(
            surface_id = %surface_id,
            tag = %screen.runtime_identity_tag(),
            "Surface created"
        );

        self.surfaces.push(screen);
        let screen = &self.surfaces[self.surfaces.len() - 1];
        Ok(self.dispatcher.surface_ready(self.registry.entries(), screen))
    }

    /// Handles surface destruction: drops the host's screen handle.
    ///
    /// Plugins are not notified. Raw references they escaped go stale once
    /// no other owner of the surface object remains.
    pub fn destroy_surface(&mut self, surface_id: SurfaceId) -> AppResult<()> {
        let index = self
            .surfaces
            .iter()
            .position(|s| s.surface_id() == surface_id)
            .ok_or_else(|| AppError::not_found(format!("Surface '{surface_id}' not found")))?;

        let screen = self.surfaces.remove(index);
        info!(
            surface_id = %surface_id,
            tag = %screen.runtime_identity_tag(),
            "Surface destroyed"
        );
        Ok(())
    }

    /// Handles process teardown: drops every screen handle, then the
    /// application handle.
    pub fn shutdown(&mut self) -> AppResult<()> {
        if self.phase == HostPhase::ShutDown {
            return Err(AppError::lifecycle("Host already shut down"));
        }

        if !self.surfaces.is_empty() {
            warn!(
                live_surfaces = self.surfaces.len(),
                "Shutting down with live surfaces"
            );
        }
        self.surfaces.clear();
        self.application = None;
        self.phase = HostPhase::ShutDown;

        info!("Host process shut down");
        Ok(())
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> HostPhase {
        self.phase
    }

    /// The runtime descriptor, once the process has started.
    pub fn runtime_descriptor(&self) -> Option<&RuntimeDescriptor> {
        self.application
            .as_ref()
            .map(HostApplicationHandle::runtime_descriptor)
    }

    /// Ids of live surfaces in creation order.
    pub fn surface_ids(&self) -> Vec<SurfaceId> {
        self.surfaces.iter().map(HostScreenHandle::surface_id).collect()
    }

    /// Returns the plugin registry.
    pub fn registry(&self) -> &PluginRegistry {
        &self.registry
    }
}
