//! Diagnostic output for plugin-origin messages.
//!
//! Handles never write to a stream directly. They format one line and hand
//! it to a [`DiagnosticSink`] owned by the host.

use std::sync::{Mutex, PoisonError};

use blockidle_core::types::SurfaceId;

/// Marker that prefixes every plugin-origin line.
pub const PLUGIN_LOG_PREFIX: &str = "[Plugin] ";

/// `tracing` target used by [`TracingSink`].
pub const PLUGIN_LOG_TARGET: &str = "blockidle::plugin";

/// Which handle a plugin message was emitted through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogOrigin {
    /// The process-wide application handle.
    Application,
    /// A screen handle.
    Surface {
        /// Host-assigned surface id.
        surface_id: SurfaceId,
        /// Identity tag of the surface.
        tag: String,
    },
}

/// Receives formatted plugin-origin lines.
pub trait DiagnosticSink: Send + Sync + std::fmt::Debug {
    /// Emits one already-formatted line. Must not fail.
    fn emit(&self, origin: &LogOrigin, line: &str);
}

/// Formats a plugin message as a single marked line.
///
/// Line breaks inside `message` are escaped so one call always yields one
/// line of output.
pub fn format_plugin_line(message: &str) -> String {
    let mut line = String::with_capacity(PLUGIN_LOG_PREFIX.len() + message.len());
    line.push_str(PLUGIN_LOG_PREFIX);
    for ch in message.chars() {
        match ch {
            '\n' => line.push_str("\\n"),
            '\r' => line.push_str("\\r"),
            other => line.push(other),
        }
    }
    line
}

/// Default sink forwarding plugin lines to `tracing` at INFO level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn emit(&self, origin: &LogOrigin, line: &str) {
        match origin {
            LogOrigin::Application => {
                tracing::info!(target: PLUGIN_LOG_TARGET, "{}", line);
            }
            LogOrigin::Surface { surface_id, tag } => {
                tracing::info!(
                    target: PLUGIN_LOG_TARGET,
                    surface_id = %surface_id,
                    tag = %tag,
                    "{}",
                    line
                );
            }
        }
    }
}

/// A line captured by [`RecordingSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedLine {
    /// Handle the line came through.
    pub origin: LogOrigin,
    /// The formatted line, marker included.
    pub line: String,
}

/// In-memory sink that keeps every line in emission order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    lines: Mutex<Vec<RecordedLine>>,
}

impl RecordingSink {
    /// Creates an empty recording sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every recorded line.
    pub fn records(&self) -> Vec<RecordedLine> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns only the formatted text of every recorded line.
    pub fn lines(&self) -> Vec<String> {
        self.records().into_iter().map(|r| r.line).collect()
    }
}

impl DiagnosticSink for RecordingSink {
    fn emit(&self, origin: &LogOrigin, line: &str) {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(RecordedLine {
                origin: origin.clone(),
                line: line.to_string(),
            });
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::Arc;

    use super::*;
    use crate::api::{HostApplicationHandle, HostObject, HostScreenHandle};
    use crate::runtime::{ReleaseChannel, RuntimeDescriptor, SdkDescriptor};

    /// `fmt` writer collecting output in memory.
    #[derive(Debug, Clone, Default)]
    struct CapturedOutput(Arc<Mutex<Vec<u8>>>);

    impl CapturedOutput {
        fn lines(&self) -> Vec<String> {
            let bytes = self.0.lock().unwrap().clone();
            String::from_utf8(bytes)
                .unwrap()
                .lines()
                .map(str::to_string)
                .collect()
        }
    }

    impl io::Write for CapturedOutput {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_format_adds_marker() {
        assert_eq!(format_plugin_line("hello"), "[Plugin] hello");
        assert_eq!(format_plugin_line(""), "[Plugin] ");
    }

    #[test]
    fn test_format_keeps_single_line() {
        let line = format_plugin_line("one\ntwo\r\nthree");
        assert!(!line.contains('\n'));
        assert!(!line.contains('\r'));
        assert_eq!(line, "[Plugin] one\\ntwo\\r\\nthree");
    }

    #[test]
    fn test_recording_sink_keeps_order() {
        let sink = RecordingSink::new();
        sink.emit(&LogOrigin::Application, "[Plugin] a");
        sink.emit(&LogOrigin::Application, "[Plugin] b");
        assert_eq!(sink.lines(), vec!["[Plugin] a", "[Plugin] b"]);
    }

    #[test]
    fn test_tracing_sink_emits_marked_lines() {
        let output = CapturedOutput::default();
        let writer = output.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_max_level(tracing::Level::INFO)
            .with_target(true)
            .with_ansi(false)
            .without_time()
            .finish();

        let sink: Arc<dyn DiagnosticSink> = Arc::new(TracingSink);
        let sdk = SdkDescriptor::new("0.0.1", "0.0.1", 1, ReleaseChannel::Alpha, 1, "0-alpha-1");
        let process: HostObject = Arc::new(());
        let runtime = RuntimeDescriptor::new("1.0", 1, sdk);
        let application = HostApplicationHandle::new(process, runtime, sink.clone());
        let screen = HostScreenHandle::new(SurfaceId::new(), Arc::new(()), "ui.Main", sink);

        tracing::subscriber::with_default(subscriber, || {
            application.log("hello");
            screen.log("hello");
        });

        let lines = output.lines();
        assert_eq!(lines.len(), 2);
        for line in &lines {
            assert!(line.contains(PLUGIN_LOG_TARGET));
            assert!(line.contains("[Plugin] hello"));
        }
        assert!(!lines[0].contains("tag="));
        assert!(lines[1].contains("tag=ui.Main"));
        assert!(lines[1].contains("surface_id="));
    }
}
