//! Surface-scoped handle given to plugins for each created surface.

use std::sync::Arc;

use blockidle_core::types::SurfaceId;

use super::diagnostics::{DiagnosticSink, LogOrigin, format_plugin_line};
use super::raw::{HostObject, RawHostRef};

/// Controlled wrapper around one host UI surface.
///
/// Carries no runtime descriptor; that is read once from the
/// application handle. Its lifetime ends when the host destroys the surface.
#[derive(Debug)]
pub struct HostScreenHandle {
    surface_id: SurfaceId,
    surface: HostObject,
    tag: String,
    sink: Arc<dyn DiagnosticSink>,
}

impl HostScreenHandle {
    pub(crate) fn new(
        surface_id: SurfaceId,
        surface: HostObject,
        tag: impl Into<String>,
        sink: Arc<dyn DiagnosticSink>,
    ) -> Self {
        Self {
            surface_id,
            surface,
            tag: tag.into(),
            sink,
        }
    }

    /// Identity tag of the surface, usually its concrete type name.
    pub fn runtime_identity_tag(&self) -> &str {
        &self.tag
    }

    /// Host-assigned id of this surface-creation event.
    pub fn surface_id(&self) -> SurfaceId {
        self.surface_id
    }

    /// Emits a plugin-origin diagnostic line tagged with this surface.
    pub fn log(&self, message: impl AsRef<str>) {
        let line = format_plugin_line(message.as_ref());
        let origin = LogOrigin::Surface {
            surface_id: self.surface_id,
            tag: self.tag.clone(),
        };
        self.sink.emit(&origin, &line);
    }

    /// Escape hatch to the raw host surface object.
    ///
    /// The reference is non-owning and goes stale once the host destroys
    /// the surface. No notification is sent when that happens.
    pub fn escape_raw_handle(&self) -> RawHostRef {
        RawHostRef::new(&self.surface)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::diagnostics::RecordingSink;

    #[derive(Debug)]
    struct EditorSurface;

    #[test]
    fn test_tags_are_independent() {
        let sink: Arc<dyn DiagnosticSink> = Arc::new(RecordingSink::new());
        let a = HostScreenHandle::new(
            SurfaceId::new(),
            Arc::new(EditorSurface),
            "ui.Editor",
            sink.clone(),
        );
        let b = HostScreenHandle::new(
            SurfaceId::new(),
            Arc::new(EditorSurface),
            "ui.Settings",
            sink,
        );
        assert_eq!(a.runtime_identity_tag(), "ui.Editor");
        assert_eq!(b.runtime_identity_tag(), "ui.Settings");
        assert_ne!(a.surface_id(), b.surface_id());
    }

    #[test]
    fn test_log_carries_surface_origin() {
        let sink = Arc::new(RecordingSink::new());
        let id = SurfaceId::new();
        let screen = HostScreenHandle::new(id, Arc::new(EditorSurface), "ui.Editor", sink.clone());
        screen.log("hello");

        let records = sink.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].line, "[Plugin] hello");
        assert_eq!(
            records[0].origin,
            LogOrigin::Surface {
                surface_id: id,
                tag: "ui.Editor".to_string()
            }
        );
    }

    #[test]
    fn test_escape_goes_stale_with_surface() {
        let sink: Arc<dyn DiagnosticSink> = Arc::new(RecordingSink::new());
        let surface: HostObject = Arc::new(EditorSurface);
        let screen = HostScreenHandle::new(SurfaceId::new(), surface.clone(), "ui.Editor", sink);
        let raw = screen.escape_raw_handle();
        assert!(raw.points_to(&surface));

        drop(surface);
        assert!(!raw.is_stale());
        drop(screen);
        assert!(raw.is_stale());
    }
}
