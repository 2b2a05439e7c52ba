//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use blockidle_core::error::AppError;
use blockidle_core::result::AppResult;
use blockidle_plugin::api::{RawHostRef, RecordingSink};
use blockidle_plugin::runtime::{ReleaseChannel, RuntimeDescriptor, SdkDescriptor};
use blockidle_plugin::{HostApplicationHandle, HostScreenHandle, PluginContract, PluginHost};

/// Shared, ordered log of hook invocations across plugins.
pub type CallLog = Arc<Mutex<Vec<String>>>;

/// How a [`ScriptedPlugin`] behaves inside its hooks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Behavior {
    Succeed,
    Fail,
    Panic,
}

/// A plugin that records every call and can be told to fail.
#[derive(Debug)]
pub struct ScriptedPlugin {
    pub name: String,
    pub calls: CallLog,
    pub behavior: Behavior,
    /// Identity tags of every surface seen.
    pub tags: Mutex<Vec<String>>,
    /// Raw references escaped in each hook, in call order.
    pub escaped: Mutex<Vec<RawHostRef>>,
    /// Runtime descriptors observed at process ready.
    pub runtimes: Mutex<Vec<RuntimeDescriptor>>,
}

impl ScriptedPlugin {
    pub fn new(name: &str, calls: &CallLog, behavior: Behavior) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            calls: calls.clone(),
            behavior,
            tags: Mutex::new(Vec::new()),
            escaped: Mutex::new(Vec::new()),
            runtimes: Mutex::new(Vec::new()),
        })
    }

    fn act(&self, hook: &str) -> AppResult<()> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("{}.{}", self.name, hook));
        match self.behavior {
            Behavior::Succeed => Ok(()),
            Behavior::Fail => Err(AppError::plugin(format!("{} refused {}", self.name, hook))),
            Behavior::Panic => panic!("{} exploded in {}", self.name, hook),
        }
    }
}

impl PluginContract for ScriptedPlugin {
    fn on_host_process_ready(&self, application: &HostApplicationHandle) -> AppResult<()> {
        self.runtimes
            .lock()
            .unwrap()
            .push(application.runtime_descriptor().clone());
        self.escaped
            .lock()
            .unwrap()
            .push(application.escape_raw_handle());
        application.log(format!("{} ready", self.name));
        self.act("onHostProcessReady")
    }

    fn on_host_surface_ready(&self, screen: &HostScreenHandle) -> AppResult<()> {
        self.tags
            .lock()
            .unwrap()
            .push(screen.runtime_identity_tag().to_string());
        self.escaped.lock().unwrap().push(screen.escape_raw_handle());
        self.act("onHostSurfaceReady")
    }
}

/// Registers a new [`ScriptedPlugin`] under `name` and returns it.
pub fn register(
    host: &mut PluginHost,
    name: &str,
    calls: &CallLog,
    behavior: Behavior,
) -> Arc<ScriptedPlugin> {
    let plugin = ScriptedPlugin::new(name, calls, behavior);
    host.register(name, plugin.clone()).unwrap();
    plugin
}

pub fn new_call_log() -> CallLog {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn calls(log: &CallLog) -> Vec<String> {
    log.lock().unwrap().clone()
}

pub fn sdk(version_number: u32, full_version: &str) -> SdkDescriptor {
    SdkDescriptor::new(
        full_version,
        "0.0.1",
        version_number,
        ReleaseChannel::Alpha,
        1,
        format!("0-alpha-{version_number}"),
    )
}

pub fn runtime() -> RuntimeDescriptor {
    RuntimeDescriptor::new("0.0.1", 1, sdk(1, "0.0.1"))
}

/// A host recording plugin diagnostics in memory.
pub fn recording_host() -> (PluginHost, Arc<RecordingSink>) {
    let sink = Arc::new(RecordingSink::new());
    (PluginHost::with_sink(sink.clone()), sink)
}
