//! Opaque host objects and the non-owning escape reference handed to plugins.

use std::any::Any;
use std::sync::{Arc, Weak};

/// A host-owned object wrapped by a handle: the process object or a surface.
pub type HostObject = Arc<dyn Any + Send + Sync>;

/// Non-owning view of a host object.
///
/// Holding a `RawHostRef` never extends the object's lifetime. Once the host
/// drops the object, [`RawHostRef::upgrade`] returns `None`.
#[derive(Debug, Clone)]
pub struct RawHostRef {
    inner: Weak<dyn Any + Send + Sync>,
}

impl RawHostRef {
    pub(crate) fn new(object: &HostObject) -> Self {
        Self {
            inner: Arc::downgrade(object),
        }
    }

    /// Temporarily upgrades to the host object, if it is still alive.
    pub fn upgrade(&self) -> Option<HostObject> {
        self.inner.upgrade()
    }

    /// Upgrades and downcasts to the concrete host type.
    pub fn downcast<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        self.upgrade()?.downcast::<T>().ok()
    }

    /// Returns whether the host has already dropped the object.
    pub fn is_stale(&self) -> bool {
        self.inner.strong_count() == 0
    }

    /// Returns whether this reference points at `object` (identity, not equality).
    pub fn points_to(&self, object: &HostObject) -> bool {
        std::ptr::addr_eq(self.inner.as_ptr(), Arc::as_ptr(object))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Process {
        pid: u32,
    }

    #[test]
    fn test_points_to_identity() {
        let a: HostObject = Arc::new(Process { pid: 1 });
        let b: HostObject = Arc::new(Process { pid: 1 });
        let raw = RawHostRef::new(&a);
        assert!(raw.points_to(&a));
        assert!(!raw.points_to(&b));
    }

    #[test]
    fn test_downcast_to_concrete_type() {
        let object: HostObject = Arc::new(Process { pid: 42 });
        let raw = RawHostRef::new(&object);
        let process = raw.downcast::<Process>().expect("live process");
        assert_eq!(process.pid, 42);
        assert!(raw.downcast::<String>().is_none());
    }

    #[test]
    fn test_stale_after_host_drop() {
        let object: HostObject = Arc::new(Process { pid: 7 });
        let raw = RawHostRef::new(&object);
        assert!(!raw.is_stale());
        drop(object);
        assert!(raw.is_stale());
        assert!(raw.upgrade().is_none());
    }
}
