//! Lifecycle dispatcher: delivers host events to every registered plugin.
//!
//! - Plugins are invoked synchronously in registration order.
//! - A hook returning `Err` or panicking is recorded and logged, and the
//!   next plugin is still invoked.
//! - Hooks slower than the configured threshold are logged as warnings;
//!   they are never interrupted.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{debug, error, warn};

use blockidle_core::result::AppResult;
use blockidle_core::types::SurfaceId;

use crate::api::{HostApplicationHandle, HostScreenHandle};
use crate::registry::PluginEntry;

/// Default slow-hook warning threshold.
pub const DEFAULT_SLOW_HOOK_THRESHOLD: Duration = Duration::from_millis(100);

/// Host event delivered to plugins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum LifecycleEvent {
    /// The host process finished starting.
    ProcessReady,
    /// A surface was created.
    SurfaceReady {
        /// Host-assigned surface id.
        surface_id: SurfaceId,
        /// Identity tag of the surface.
        tag: String,
    },
}

impl std::fmt::Display for LifecycleEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ProcessReady => write!(f, "on_host_process_ready"),
            Self::SurfaceReady { .. } => write!(f, "on_host_surface_ready"),
        }
    }
}

/// How a single hook invocation failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The hook returned an error.
    Error,
    /// The hook panicked.
    Panic,
}

/// A failed hook invocation.
#[derive(Debug, Clone, Serialize)]
pub struct HookFailure {
    /// Plugin whose hook failed.
    pub plugin_id: String,
    /// Error or panic.
    pub kind: FailureKind,
    /// Error message or panic payload.
    pub message: String,
}

/// Aggregated result of delivering one event to all plugins.
#[derive(Debug, Clone, Serialize)]
pub struct DispatchReport {
    /// The delivered event.
    pub event: LifecycleEvent,
    /// Every plugin invoked, in invocation order, failed ones included.
    pub invoked: Vec<String>,
    /// Failed invocations, in invocation order.
    pub failures: Vec<HookFailure>,
}

impl DispatchReport {
    fn new(event: LifecycleEvent) -> Self {
        Self {
            event,
            invoked: Vec::new(),
            failures: Vec::new(),
        }
    }

    /// Returns whether every hook succeeded.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Surface id of a surface-ready report.
    pub fn surface_id(&self) -> Option<SurfaceId> {
        match &self.event {
            LifecycleEvent::SurfaceReady { surface_id, .. } => Some(*surface_id),
            LifecycleEvent::ProcessReady => None,
        }
    }
}

/// Delivers lifecycle events to plugins with per-plugin failure isolation.
#[derive(Debug, Clone)]
pub struct LifecycleDispatcher {
    slow_hook_threshold: Duration,
}

impl Default for LifecycleDispatcher {
    fn default() -> Self {
        Self::new(DEFAULT_SLOW_HOOK_THRESHOLD)
    }
}

impl LifecycleDispatcher {
    /// Creates a dispatcher that warns about hooks slower than `slow_hook_threshold`.
    pub fn new(slow_hook_threshold: Duration) -> Self {
        Self {
            slow_hook_threshold,
        }
    }

    /// Delivers `on_host_process_ready` to each plugin in order.
    pub fn process_ready(
        &self,
        plugins: &[PluginEntry],
        application: &HostApplicationHandle,
    ) -> DispatchReport {
        let mut report = DispatchReport::new(LifecycleEvent::ProcessReady);
        debug!(plugin_count = plugins.len(), "Dispatching process ready");

        for entry in plugins {
            self.invoke(&mut report, entry, || {
                entry.plugin.on_host_process_ready(application)
            });
        }

        report
    }

    /// Delivers `on_host_surface_ready` to each plugin in order.
    pub fn surface_ready(
        &self,
        plugins: &[PluginEntry],
        screen: &HostScreenHandle,
    ) -> DispatchReport {
        let mut report = DispatchReport::new(LifecycleEvent::SurfaceReady {
            surface_id: screen.surface_id(),
            tag: screen.runtime_identity_tag().to_string(),
        });
        debug!(
            surface_id = %screen.surface_id(),
            tag = %screen.runtime_identity_tag(),
            plugin_count = plugins.len(),
            "Dispatching surface ready"
        );

        for entry in plugins {
            self.invoke(&mut report, entry, || entry.plugin.on_host_surface_ready(screen));
        }

        report
    }

    fn invoke<F>(&self, report: &mut DispatchReport, entry: &PluginEntry, hook: F)
    where
        F: FnOnce() -> AppResult<()>,
    {
        let started = Instant::now();
        let outcome = catch_unwind(AssertUnwindSafe(hook));
        let elapsed = started.elapsed();

        report.invoked.push(entry.id.clone());

        if elapsed > self.slow_hook_threshold {
            warn!(
                hook = %report.event,
                plugin_id = %entry.id,
                elapsed_ms = elapsed.as_millis() as u64,
                "Plugin hook exceeded slow-hook threshold"
            );
        }

        let failure = match outcome {
            Ok(Ok(())) => return,
            Ok(Err(e)) => HookFailure {
                plugin_id: entry.id.clone(),
                kind: FailureKind::Error,
                message: e.to_string(),
            },
            Err(payload) => HookFailure {
                plugin_id: entry.id.clone(),
                kind: FailureKind::Panic,
                message: panic_message(payload.as_ref()),
            },
        };

        error!(
            hook = %report.event,
            plugin_id = %failure.plugin_id,
            kind = ?failure.kind,
            error = %failure.message,
            "Plugin hook failed, continuing with next plugin"
        );
        report.failures.push(failure);
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "plugin hook panicked".to_string()
    }
}
