//! Plugin registry: plugin id to implementation, in registration order.

use std::sync::Arc;

use tracing::info;

use blockidle_core::error::AppError;
use blockidle_core::result::AppResult;

use crate::contract::PluginContract;

/// A registered plugin.
#[derive(Debug, Clone)]
pub struct PluginEntry {
    /// Unique plugin identifier.
    pub id: String,
    /// The plugin implementation.
    pub plugin: Arc<dyn PluginContract>,
}

/// Registry of all plugins known to the host.
///
/// Iteration order is registration order, and dispatch relies on that.
#[derive(Debug, Default)]
pub struct PluginRegistry {
    entries: Vec<PluginEntry>,
}

impl PluginRegistry {
    /// Creates a new empty plugin registry.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Registers a plugin under a unique id.
    pub fn register(
        &mut self,
        id: impl Into<String>,
        plugin: Arc<dyn PluginContract>,
    ) -> AppResult<()> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(AppError::validation("Plugin id must not be empty"));
        }
        if self.contains(&id) {
            return Err(AppError::conflict(format!(
                "Plugin '{id}' is already registered"
            )));
        }

        info!(plugin_id = %id, position = self.entries.len(), "Registering plugin");
        self.entries.push(PluginEntry { id, plugin });
        Ok(())
    }

    /// Unregisters a plugin by id, returning its implementation.
    pub fn unregister(&mut self, plugin_id: &str) -> AppResult<Arc<dyn PluginContract>> {
        let index = self
            .entries
            .iter()
            .position(|e| e.id == plugin_id)
            .ok_or_else(|| AppError::not_found(format!("Plugin '{plugin_id}' not found")))?;

        let entry = self.entries.remove(index);
        info!(plugin_id = %plugin_id, "Plugin unregistered");
        Ok(entry.plugin)
    }

    /// Gets a plugin by id.
    pub fn get(&self, plugin_id: &str) -> Option<Arc<dyn PluginContract>> {
        self.entries
            .iter()
            .find(|e| e.id == plugin_id)
            .map(|e| e.plugin.clone())
    }

    /// Checks whether a plugin is registered.
    pub fn contains(&self, plugin_id: &str) -> bool {
        self.entries.iter().any(|e| e.id == plugin_id)
    }

    /// Returns plugin count.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether no plugin is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Plugin ids in registration order.
    pub fn ids(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.id.as_str()).collect()
    }

    /// Registered entries in registration order.
    pub fn entries(&self) -> &[PluginEntry] {
        &self.entries
    }
}
