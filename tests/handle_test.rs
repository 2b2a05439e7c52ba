//! Integration tests for the handles plugins receive.

mod helpers;

use std::sync::Arc;

use blockidle_core::result::AppResult;
use blockidle_plugin::api::diagnostics::PLUGIN_LOG_PREFIX;
use blockidle_plugin::api::{HostObject, LogOrigin};
use blockidle_plugin::{HostApplicationHandle, HostScreenHandle, PluginContract};

use helpers::{Behavior, new_call_log, recording_host, register, runtime, sdk};

#[derive(Debug)]
struct Process {
    pid: u32,
}

#[derive(Debug)]
struct Surface {
    title: &'static str,
}

/// Logs fixed messages through both handle types.
#[derive(Debug)]
struct Chatty;

impl PluginContract for Chatty {
    fn on_host_process_ready(&self, application: &HostApplicationHandle) -> AppResult<()> {
        application.log("hello");
        application.log("");
        Ok(())
    }

    fn on_host_surface_ready(&self, screen: &HostScreenHandle) -> AppResult<()> {
        screen.log("hello");
        screen.log("");
        Ok(())
    }
}

#[test]
fn test_log_lines_carry_plugin_marker() {
    let (mut host, sink) = recording_host();
    host.register("chatty", Arc::new(Chatty)).unwrap();
    host.start_process(Arc::new(()), runtime()).unwrap();
    let report = host.create_surface(Arc::new(()), "ui.Main").unwrap();
    assert!(report.is_clean());

    let records = sink.records();
    assert_eq!(records.len(), 4);
    for record in &records {
        assert!(record.line.starts_with(PLUGIN_LOG_PREFIX));
    }
    assert_eq!(records[0].origin, LogOrigin::Application);
    assert!(records[0].line.contains("hello"));
    assert_eq!(records[1].line, PLUGIN_LOG_PREFIX);
    assert!(matches!(
        &records[2].origin,
        LogOrigin::Surface { tag, .. } if tag == "ui.Main"
    ));
    assert!(records[2].line.contains("hello"));
    assert_eq!(records[3].line, PLUGIN_LOG_PREFIX);
}

#[test]
fn test_escaped_references_identify_the_wrapped_objects() {
    let log = new_call_log();
    let (mut host, _sink) = recording_host();
    let plugin = register(&mut host, "P", &log, Behavior::Succeed);

    let process: HostObject = Arc::new(Process { pid: 7 });
    let surface: HostObject = Arc::new(Surface { title: "main" });
    host.start_process(process.clone(), runtime()).unwrap();
    host.create_surface(surface.clone(), "ui.Main").unwrap();

    let escaped = plugin.escaped.lock().unwrap().clone();
    assert_eq!(escaped.len(), 2);
    assert!(escaped[0].points_to(&process));
    assert!(escaped[1].points_to(&surface));
    assert!(!escaped[1].points_to(&process));
    assert_eq!(escaped[0].downcast::<Process>().unwrap().pid, 7);
    assert_eq!(escaped[1].downcast::<Surface>().unwrap().title, "main");
}

#[test]
fn test_escaped_surface_reference_goes_stale_after_destroy() {
    let log = new_call_log();
    let (mut host, _sink) = recording_host();
    let plugin = register(&mut host, "P", &log, Behavior::Succeed);
    let process: HostObject = Arc::new(Process { pid: 1 });
    host.start_process(process, runtime()).unwrap();

    let surface: HostObject = Arc::new(Surface { title: "tmp" });
    let report = host.create_surface(surface, "ui.Temp").unwrap();
    let surface_ref = plugin.escaped.lock().unwrap()[1].clone();
    assert!(!surface_ref.is_stale());

    host.destroy_surface(report.surface_id().unwrap()).unwrap();
    assert!(surface_ref.is_stale());
    assert!(surface_ref.upgrade().is_none());
}

#[test]
fn test_screen_handles_report_independent_tags() {
    let log = new_call_log();
    let (mut host, _sink) = recording_host();
    let plugin = register(&mut host, "P", &log, Behavior::Succeed);
    host.start_process(Arc::new(()), runtime()).unwrap();

    let a = host.create_surface(Arc::new(()), "ui.Editor").unwrap();
    let b = host.create_surface(Arc::new(()), "ui.Console").unwrap();

    assert_eq!(
        plugin.tags.lock().unwrap().as_slice(),
        ["ui.Editor", "ui.Console"]
    );
    assert_ne!(a.surface_id(), b.surface_id());
    assert_eq!(host.surface_ids().len(), 2);
}

#[test]
fn test_every_plugin_sees_the_same_runtime_descriptor() {
    let log = new_call_log();
    let (mut host, _sink) = recording_host();
    let first = register(&mut host, "A", &log, Behavior::Succeed);
    let second = register(&mut host, "B", &log, Behavior::Succeed);

    let published = runtime();
    host.start_process(Arc::new(()), published.clone()).unwrap();

    let seen_a = first.runtimes.lock().unwrap()[0].clone();
    let seen_b = second.runtimes.lock().unwrap()[0].clone();
    assert_eq!(seen_a, published);
    assert_eq!(seen_b, published);
    assert_eq!(seen_a.api_level(), 1);
    assert!(seen_a.sdk().precedes(&sdk(2, "0.0.2")));
}
