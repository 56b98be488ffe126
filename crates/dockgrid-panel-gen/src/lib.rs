//! Build-time synthesis of the Dockgrid plugin module.
//!
//! Consumes scanner output and produces the generated module wiring
//! discovered panels into plugin descriptors: a compiled `PanelBinding`
//! table plus a `discovered_plugins` entry point. The same materialization
//! path is available at runtime through [`build_plugins`] so bootstrap and
//! tests can skip the textual round trip.

mod codegen;
mod plugins;
mod specifier;

pub use codegen::*;
pub use plugins::*;
pub use specifier::*;
