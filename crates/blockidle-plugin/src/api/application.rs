//! Process-scoped handle given to plugins at process start.

use std::sync::Arc;

use crate::runtime::RuntimeDescriptor;

use super::diagnostics::{DiagnosticSink, LogOrigin, format_plugin_line};
use super::raw::{HostObject, RawHostRef};

/// Controlled wrapper around the host's process-wide application object.
///
/// Exactly one exists per host process. Plugins only ever see it borrowed,
/// inside `on_host_process_ready`.
#[derive(Debug)]
pub struct HostApplicationHandle {
    process: HostObject,
    runtime: RuntimeDescriptor,
    sink: Arc<dyn DiagnosticSink>,
}

impl HostApplicationHandle {
    pub(crate) fn new(
        process: HostObject,
        runtime: RuntimeDescriptor,
        sink: Arc<dyn DiagnosticSink>,
    ) -> Self {
        Self {
            process,
            runtime,
            sink,
        }
    }

    /// The runtime descriptor fixed when the host started.
    pub fn runtime_descriptor(&self) -> &RuntimeDescriptor {
        &self.runtime
    }

    /// Emits a plugin-origin diagnostic line. Never fails.
    pub fn log(&self, message: impl AsRef<str>) {
        let line = format_plugin_line(message.as_ref());
        self.sink.emit(&LogOrigin::Application, &line);
    }

    /// Escape hatch to the raw host process object.
    ///
    /// Returns a non-owning reference. The object stays owned by the host and
    /// goes away at process teardown no matter how long the reference is kept.
    pub fn escape_raw_handle(&self) -> RawHostRef {
        RawHostRef::new(&self.process)
    }
}
