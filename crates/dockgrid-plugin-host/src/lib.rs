//! Activates build-discovered plugins and funnels their panel registrations
//! into the shared panel registry.

use std::collections::HashSet;
use std::sync::Arc;

use dockgrid_panel_registry::{PanelRegistration, PanelRegistry, PluginContext, PluginDescriptor};

/// Runtime activator applying each plugin to the registry exactly once per
/// process. Owns the activated-id set; initialized empty, grown
/// monotonically, never cleared.
pub struct PluginHost {
    registry: Arc<PanelRegistry>,
    activated: HashSet<String>,
}

impl PluginHost {
    pub fn new(registry: Arc<PanelRegistry>) -> Self {
        Self {
            registry,
            activated: HashSet::new(),
        }
    }

    pub fn registry(&self) -> &Arc<PanelRegistry> {
        &self.registry
    }

    /// Activates a single plugin, guarding against duplicate activations. A
    /// duplicate id warns and returns without side effects. An error raised
    /// by the plugin's own register hook propagates to the caller and leaves
    /// the plugin unrecorded.
    pub fn activate_plugin(&mut self, plugin: &PluginDescriptor) -> anyhow::Result<()> {
        if self.activated.contains(plugin.id()) {
            log::warn!("plugin '{}' already activated; skipping", plugin.id());
            return Ok(());
        }
        plugin.register(&RegistryContext {
            registry: &self.registry,
        })?;
        self.activated.insert(plugin.id().to_string());
        Ok(())
    }

    /// Activates a collection of plugins in order. The first failing
    /// plugin's error propagates; bootstrap decides whether to continue.
    pub fn activate_plugins(&mut self, plugins: &[PluginDescriptor]) -> anyhow::Result<()> {
        for plugin in plugins {
            self.activate_plugin(plugin)?;
        }
        Ok(())
    }
}

// The context hands plugins registration capability only; no registry reads.
struct RegistryContext<'a> {
    registry: &'a PanelRegistry,
}

impl PluginContext for RegistryContext<'_> {
    fn register_panel(&self, registration: PanelRegistration) {
        self.registry.register_panel(registration);
    }
}
