use std::fmt;

use anyhow::Result;

use crate::PanelRegistration;

/// Context passed to plugin register hooks. Registration is the only
/// capability a plugin receives; it never gets read access to the registry.
pub trait PluginContext {
    /// Registers a panel renderer with the host application.
    fn register_panel(&self, registration: PanelRegistration);
}

type RegisterFn = Box<dyn Fn(&dyn PluginContext) -> Result<()> + Send + Sync>;

/// Contract implemented by build-generated plugins that wire package panels
/// into the Dockgrid runtime. Immutable once built.
pub struct PluginDescriptor {
    id: String,
    register: RegisterFn,
}

impl PluginDescriptor {
    pub fn new(
        id: impl Into<String>,
        register: impl Fn(&dyn PluginContext) -> Result<()> + Send + Sync + 'static,
    ) -> Self {
        Self {
            id: id.into(),
            register: Box::new(register),
        }
    }

    /// Stable identifier for diagnostics and duplicate-activation guards.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Called during activation so the plugin can register its panels. An
    /// error here is the plugin's own failure and is left to the caller.
    pub fn register(&self, context: &dyn PluginContext) -> Result<()> {
        (self.register)(context)
    }
}

impl fmt::Debug for PluginDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginDescriptor")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}
