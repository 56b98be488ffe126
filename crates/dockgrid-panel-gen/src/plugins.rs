use std::collections::HashMap;

use dockgrid_panel_registry::{PanelRegistration, PluginDescriptor, RendererCtor};
use dockgrid_panel_scanner::PackageWithPanels;

use crate::resolve_import_specifier;

/// Binds import specifiers to renderer constructors. Stands in for the
/// module system a generated module would resolve its imports against: the
/// shell links its panel crates and publishes their constructors here.
pub trait RendererResolver {
    /// `export` of `None` selects the module's default renderer export.
    fn resolve(&self, specifier: &str, export: Option<&str>) -> Option<RendererCtor>;
}

/// Fixed table of renderer bindings assembled by the application shell.
#[derive(Default)]
pub struct StaticResolver {
    bindings: HashMap<(String, Option<String>), RendererCtor>,
}

impl StaticResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(
        &mut self,
        specifier: impl Into<String>,
        export: Option<&str>,
        ctor: RendererCtor,
    ) -> &mut Self {
        self.bindings
            .insert((specifier.into(), export.map(str::to_string)), ctor);
        self
    }
}

impl RendererResolver for StaticResolver {
    fn resolve(&self, specifier: &str, export: Option<&str>) -> Option<RendererCtor> {
        self.bindings
            .get(&(specifier.to_string(), export.map(str::to_string)))
            .copied()
    }
}

/// One row of the generated constant table: a panel entry with its import
/// specifier already resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelBinding<'a> {
    pub name: &'a str,
    /// `None` leaves title derivation to the registry.
    pub title: Option<&'a str>,
    pub specifier: &'a str,
    pub export: Option<&'a str>,
}

struct ResolvedPanel {
    name: String,
    title: Option<String>,
    source: String,
    renderer: Option<RendererCtor>,
}

/// Materialises plugin descriptors directly from scanner output, resolving
/// each entry the way a generated module binds its imports. Descriptor order
/// follows package discovery order.
pub fn build_plugins(
    packages: &[PackageWithPanels],
    resolver: &dyn RendererResolver,
) -> Vec<PluginDescriptor> {
    packages
        .iter()
        .map(|package| {
            let panels = package
                .entries
                .iter()
                .map(|entry| {
                    let specifier = resolve_import_specifier(package, entry);
                    let renderer = resolver.resolve(&specifier, entry.export.as_deref());
                    ResolvedPanel {
                        name: entry.name.clone(),
                        title: entry.title.clone(),
                        source: specifier,
                        renderer,
                    }
                })
                .collect();
            descriptor_for(package.name.clone(), panels)
        })
        .collect()
}

/// Adapter used by generated modules: the compiled binding table grouped per
/// package name, in discovery order.
pub fn plugins_from_bindings(
    resolver: &dyn RendererResolver,
    groups: &[(&str, &[PanelBinding<'_>])],
) -> Vec<PluginDescriptor> {
    groups
        .iter()
        .map(|(package_name, bindings)| {
            let panels = bindings
                .iter()
                .map(|binding| ResolvedPanel {
                    name: binding.name.to_string(),
                    title: binding.title.map(str::to_string),
                    source: binding.specifier.to_string(),
                    renderer: resolver.resolve(binding.specifier, binding.export),
                })
                .collect();
            descriptor_for(package_name.to_string(), panels)
        })
        .collect()
}

fn descriptor_for(package_name: String, panels: Vec<ResolvedPanel>) -> PluginDescriptor {
    let id = format!("pkg:{package_name}");
    PluginDescriptor::new(id, move |context| {
        for panel in &panels {
            // An unresolved renderer is the plugin's problem, not ours:
            // warn, skip the panel, and keep registering its siblings.
            let Some(renderer) = panel.renderer else {
                log::warn!(
                    "panel '{}' from '{}' did not resolve to a constructor (source: {})",
                    panel.name,
                    package_name,
                    panel.source
                );
                continue;
            };
            context.register_panel(PanelRegistration {
                name: panel.name.clone(),
                renderer,
                title: panel.title.clone(),
            });
        }
        Ok(())
    })
}
