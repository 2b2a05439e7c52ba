//! Single-threaded host event loop.
//!
//! Host events arrive over a channel and are handled one at a time; each
//! surface-open event is fully dispatched to every plugin before the next
//! event is read.

use std::str::FromStr;
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{info, warn};

use blockidle_core::error::AppError;
use blockidle_core::result::AppResult;
use blockidle_core::types::SurfaceId;
use blockidle_plugin::PluginHost;
use blockidle_plugin::api::HostObject;

use crate::bootstrap::HostSurface;

/// An event raised by the host's UI layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    /// A surface with this identity tag was created.
    OpenSurface(String),
    /// The most recently opened live surface with this tag was destroyed.
    CloseSurface(String),
    /// Log the live surfaces.
    ListSurfaces,
    /// The process is terminating.
    Shutdown,
}

impl FromStr for HostEvent {
    type Err = AppError;

    /// Parses `open <tag>`, `close <tag>`, `list` or `quit`.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (command, arg) = match line.split_once(char::is_whitespace) {
            Some((command, arg)) => (command, arg.trim()),
            None => (line, ""),
        };

        match (command, arg) {
            ("open", tag) if !tag.is_empty() => Ok(Self::OpenSurface(tag.to_string())),
            ("close", tag) if !tag.is_empty() => Ok(Self::CloseSurface(tag.to_string())),
            ("list", "") => Ok(Self::ListSurfaces),
            ("quit" | "exit", "") => Ok(Self::Shutdown),
            _ => Err(AppError::validation(format!(
                "Unrecognized host event '{line}', expected open <tag>, close <tag>, list or quit"
            ))),
        }
    }
}

/// Totals for one event-loop run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoopSummary {
    /// Surfaces opened.
    pub opened: usize,
    /// Surfaces closed.
    pub closed: usize,
    /// Failed plugin hook invocations across all surface dispatches.
    pub hook_failures: usize,
}

/// Owns the running host and the live surfaces opened through it.
#[derive(Debug)]
pub struct EventLoop {
    host: PluginHost,
    live: Vec<(SurfaceId, String)>,
    summary: LoopSummary,
}

impl EventLoop {
    /// Wraps a host whose process has already started.
    pub fn new(host: PluginHost) -> Self {
        Self {
            host,
            live: Vec::new(),
            summary: LoopSummary::default(),
        }
    }

    /// Handles a single event. Returns `false` once the loop should stop.
    pub fn handle(&mut self, event: HostEvent) -> AppResult<bool> {
        match event {
            HostEvent::OpenSurface(tag) => {
                let surface: HostObject = Arc::new(HostSurface { tag: tag.clone() });
                let report = self.host.create_surface(surface, tag.clone())?;
                if let Some(surface_id) = report.surface_id() {
                    self.live.push((surface_id, tag));
                }
                self.summary.opened += 1;
                self.summary.hook_failures += report.failures.len();
            }
            HostEvent::CloseSurface(tag) => {
                match self.live.iter().rposition(|(_, t)| *t == tag) {
                    Some(index) => {
                        let (surface_id, _) = self.live.remove(index);
                        self.host.destroy_surface(surface_id)?;
                        self.summary.closed += 1;
                    }
                    None => warn!(tag = %tag, "No live surface with this tag"),
                }
            }
            HostEvent::ListSurfaces => {
                let tags: Vec<&str> = self.live.iter().map(|(_, t)| t.as_str()).collect();
                info!(live = tags.len(), tags = ?tags, "Live surfaces");
            }
            HostEvent::Shutdown => return Ok(false),
        }
        Ok(true)
    }

    /// Opens one surface per tag, in order, before any queued event is read.
    pub fn open_surfaces<I, S>(&mut self, tags: I) -> AppResult<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for tag in tags {
            self.handle(HostEvent::OpenSurface(tag.into()))?;
        }
        Ok(())
    }

    /// Handles events until `Shutdown` arrives or every sender is dropped,
    /// then shuts the host down.
    pub async fn run(mut self, mut events: mpsc::Receiver<HostEvent>) -> AppResult<LoopSummary> {
        while let Some(event) = events.recv().await {
            if !self.handle(event)? {
                break;
            }
        }

        self.host.shutdown()?;
        info!(
            opened = self.summary.opened,
            closed = self.summary.closed,
            hook_failures = self.summary.hook_failures,
            "Event loop finished"
        );
        Ok(self.summary)
    }

    /// The wrapped host.
    pub fn host(&self) -> &PluginHost {
        &self.host
    }
}
