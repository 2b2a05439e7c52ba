//! Diagnostic plugins bundled with the BlockIdle host.
//!
//! Both plugins are written against the SDK only, exactly as a third-party
//! plugin would be.

pub mod probe;
pub mod tracer;

use std::sync::Arc;

use blockidle_core::config::PluginConfig;
use blockidle_plugin_sdk::prelude::PluginContract;

pub use probe::CompatProbePlugin;
pub use tracer::SurfaceTracePlugin;

/// Bundled plugins enabled by `config`, in registration order.
pub fn bundled(config: &PluginConfig) -> Vec<(&'static str, Arc<dyn PluginContract>)> {
    let probe: Arc<dyn PluginContract> =
        Arc::new(CompatProbePlugin::new(config.probe_min_sdk_version_number));
    let tracer: Arc<dyn PluginContract> = Arc::new(SurfaceTracePlugin::new());
    let all = vec![
        (CompatProbePlugin::ID, probe),
        (SurfaceTracePlugin::ID, tracer),
    ];

    all.into_iter()
        .filter(|(id, _)| config.is_enabled(id))
        .collect()
}
