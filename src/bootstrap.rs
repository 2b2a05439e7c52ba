//! Startup wiring: configuration, logging, and host construction.

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{EnvFilter, fmt};

use blockidle_core::config::{AppConfig, LoggingConfig};
use blockidle_core::result::AppResult;
use blockidle_plugin::api::{DiagnosticSink, HostObject, TracingSink};
use blockidle_plugin::{LifecycleDispatcher, PluginHost, RuntimeDescriptor};

/// The process object this host exposes to plugins through the raw escape.
#[derive(Debug, Clone)]
pub struct HostProcess {
    /// Application name.
    pub name: String,
    /// OS process id.
    pub pid: u32,
}

impl HostProcess {
    /// Describes the current OS process.
    pub fn current() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME").to_string(),
            pid: std::process::id(),
        }
    }
}

/// The surface object this host exposes to plugins through the raw escape.
#[derive(Debug, Clone)]
pub struct HostSurface {
    /// Identity tag the surface was opened with.
    pub tag: String,
}

/// Load configuration for the given environment name.
pub fn load_configuration(env: &str) -> AppResult<AppConfig> {
    tracing::info!("Loading config (env: {})", env);
    AppConfig::load(env)
}

/// Initialize tracing/logging.
pub fn init_logging(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    match config.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Builds a host with every enabled bundled plugin registered and the
/// runtime descriptor resolved from configured build metadata.
pub fn build_host(config: &AppConfig) -> AppResult<(PluginHost, RuntimeDescriptor)> {
    build_host_with_sink(config, Arc::new(TracingSink))
}

/// Same as [`build_host`], routing plugin diagnostics to `sink`.
pub fn build_host_with_sink(
    config: &AppConfig,
    sink: Arc<dyn DiagnosticSink>,
) -> AppResult<(PluginHost, RuntimeDescriptor)> {
    let runtime = RuntimeDescriptor::from_config(&config.host)?;

    let dispatcher =
        LifecycleDispatcher::new(Duration::from_millis(config.plugins.slow_hook_warn_ms));
    let mut host = PluginHost::with_sink(sink).with_dispatcher(dispatcher);

    for (id, plugin) in plugin_diagnostics::bundled(&config.plugins) {
        host.register(id, plugin)?;
    }

    let published = runtime.to_json()?;
    tracing::info!(
        plugins = ?host.registry().ids(),
        runtime = %published,
        "Host assembled"
    );

    Ok((host, runtime))
}

/// Starts the host process with the current OS process as its host object.
pub fn start(host: &mut PluginHost, runtime: RuntimeDescriptor) -> AppResult<()> {
    let process: HostObject = Arc::new(HostProcess::current());
    let report = host.start_process(process, runtime)?;
    if !report.is_clean() {
        tracing::warn!(
            failures = report.failures.len(),
            "Some plugins failed during process start"
        );
    }
    Ok(())
}
