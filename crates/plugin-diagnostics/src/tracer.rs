//! Surface tracer: logs every surface and tracks which are still alive.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use blockidle_plugin_sdk::prelude::*;

/// Logs each surface-ready event and keeps a non-owning reference to every
/// surface it has seen.
#[derive(Debug, Default)]
pub struct SurfaceTracePlugin {
    seen: AtomicUsize,
    surfaces: Mutex<Vec<RawHostRef>>,
}

impl SurfaceTracePlugin {
    /// Registration id.
    pub const ID: &'static str = "surface-tracer";

    /// Creates a tracer with nothing seen yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of surface-ready events received.
    pub fn seen(&self) -> usize {
        self.seen.load(Ordering::Relaxed)
    }

    /// Number of seen surfaces the host has not yet dropped.
    pub fn live(&self) -> usize {
        let mut surfaces = self.surfaces.lock().unwrap_or_else(PoisonError::into_inner);
        surfaces.retain(|raw| !raw.is_stale());
        surfaces.len()
    }
}

impl PluginContract for SurfaceTracePlugin {
    fn on_host_process_ready(&self, application: &HostApplicationHandle) -> AppResult<()> {
        application.log(format!(
            "tracing surfaces on api level {}",
            application.runtime_descriptor().api_level()
        ));
        Ok(())
    }

    fn on_host_surface_ready(&self, screen: &HostScreenHandle) -> AppResult<()> {
        let n = self.seen.fetch_add(1, Ordering::Relaxed) + 1;
        self.surfaces
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(screen.escape_raw_handle());

        tracing::debug!(surface_id = %screen.surface_id(), seen = n, "Tracing surface");
        screen.log(format!("surface #{n} ready: {}", screen.runtime_identity_tag()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use blockidle_plugin::PluginHost;
    use blockidle_plugin::api::RecordingSink;

    use super::*;

    #[test]
    fn test_counts_and_staleness() {
        let sink = Arc::new(RecordingSink::new());
        let tracer = Arc::new(SurfaceTracePlugin::new());
        let mut host = PluginHost::with_sink(sink.clone());
        host.register(SurfaceTracePlugin::ID, tracer.clone()).unwrap();

        let sdk = SdkDescriptor::new("0.0.1", "0.0.1", 3, ReleaseChannel::Beta, 1, "0-beta-1");
        host.start_process(Arc::new(()), RuntimeDescriptor::new("1.0", 1, sdk))
            .unwrap();

        let first = host.create_surface(Arc::new(()), "ui.A").unwrap();
        host.create_surface(Arc::new(()), "ui.B").unwrap();
        assert_eq!(tracer.seen(), 2);
        assert_eq!(tracer.live(), 2);

        host.destroy_surface(first.surface_id().unwrap()).unwrap();
        assert_eq!(tracer.live(), 1);

        let lines = sink.lines();
        assert_eq!(lines[0], "[Plugin] tracing surfaces on api level 3");
        assert_eq!(lines[1], "[Plugin] surface #1 ready: ui.A");
        assert_eq!(lines[2], "[Plugin] surface #2 ready: ui.B");
    }
}
