//! Runtime panel registry shared by the Dockgrid shell and its plugins.
//!
//! The registry is the single catalog of constructible panels. Built-in
//! panels register during bootstrap; discovered plugin panels arrive through
//! [`PluginDescriptor`] activation. Consumers stay decoupled from
//! registration timing by subscribing to change notifications.

mod plugin;
mod registry;

pub use plugin::*;
pub use registry::*;
use std::any::Any;

use serde::{Deserialize, Serialize};

/// Content renderer contract implemented by every panel.
///
/// The dock shell owns layout and chrome; a renderer only provides the panel
/// body. `Any` access lets hosting code recover the concrete type.
pub trait PanelRenderer: Any {
    /// Called once after the hosting dock inserts the panel.
    fn mount(&mut self) {}

    fn as_any(&self) -> &dyn Any;
}

impl std::fmt::Debug for dyn PanelRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PanelRenderer")
    }
}

/// Constructor producing a fresh renderer instance per created panel.
pub type RendererCtor = fn() -> Box<dyn PanelRenderer>;

/// Panel metadata submitted through [`PluginContext::register_panel`] or
/// directly by built-in panels during bootstrap.
#[derive(Debug, Clone)]
pub struct PanelRegistration {
    /// Unique component identifier used with the dock's add-panel API.
    pub name: String,
    /// Constructor responsible for the panel's content renderer.
    pub renderer: RendererCtor,
    /// Optional human readable label shown in menus and panel titles.
    pub title: Option<String>,
}

/// Public projection of a registered panel. Never exposes the constructor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelInfo {
    /// Unique component identifier.
    pub name: String,
    /// Friendly label suitable for UI display.
    pub title: String,
}
