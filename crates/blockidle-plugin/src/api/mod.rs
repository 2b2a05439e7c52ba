//! Plugin API: the handles and diagnostic surface exposed to plugin code.

pub mod application;
pub mod diagnostics;
pub mod raw;
pub mod screen;

pub use application::HostApplicationHandle;
pub use diagnostics::{DiagnosticSink, LogOrigin, RecordingSink, TracingSink};
pub use raw::{HostObject, RawHostRef};
pub use screen::HostScreenHandle;
