use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use dockgrid_panel_scanner::PackageWithPanels;

use crate::resolve_import_specifier;

/// Environment variable requesting a debug copy of the generated module.
pub const DEBUG_WRITE_ENV: &str = "DOCKGRID_DEBUG_WRITE";

/// File name of the debug copy, written under the application root.
pub const DEBUG_FILE_NAME: &str = ".dockgrid-plugins.generated.rs";

const HEADER: &str = "// @generated by dockgrid-panel-gen. Do not edit.\n\n";

/// Emits the source of the generated plugin module: one `PanelBinding` const
/// per panel entry (indexed across all packages, never deduplicated) and a
/// `discovered_plugins` entry point grouping the bindings per package in
/// discovery order. Output is byte-identical for identical scanner output.
pub fn generate_module(packages: &[PackageWithPanels]) -> String {
    let mut code = String::from(HEADER);

    if packages.is_empty() {
        code.push_str("use dockgrid_panel_gen::RendererResolver;\n");
        code.push_str("use dockgrid_panel_registry::PluginDescriptor;\n\n");
        code.push_str(
            "pub fn discovered_plugins(_resolver: &dyn RendererResolver) -> Vec<PluginDescriptor> {\n",
        );
        code.push_str("    Vec::new()\n}\n");
        return code;
    }

    code.push_str(
        "use dockgrid_panel_gen::{plugins_from_bindings, PanelBinding, RendererResolver};\n",
    );
    code.push_str("use dockgrid_panel_registry::PluginDescriptor;\n\n");

    let mut binding_index = 0usize;
    let mut groups: Vec<(String, Vec<String>)> = Vec::new();

    for package in packages {
        let mut idents = Vec::new();
        for entry in &package.entries {
            let specifier = resolve_import_specifier(package, entry);
            let ident = format!("PANEL_BINDING_{binding_index}");
            let _ = write!(
                code,
                "const {ident}: PanelBinding<'static> = PanelBinding {{\n    name: {name},\n    title: {title},\n    specifier: {specifier},\n    export: {export},\n}};\n\n",
                name = rust_string(&entry.name),
                title = rust_option(entry.title.as_deref()),
                specifier = rust_string(&specifier),
                export = rust_option(entry.export.as_deref()),
            );
            idents.push(ident);
            binding_index += 1;
        }
        groups.push((rust_string(&package.name), idents));
    }

    code.push_str(
        "pub fn discovered_plugins(resolver: &dyn RendererResolver) -> Vec<PluginDescriptor> {\n",
    );
    code.push_str("    plugins_from_bindings(resolver, &[\n");
    for (package_name, idents) in &groups {
        let _ = writeln!(code, "        ({package_name}, &[{}]),", idents.join(", "));
    }
    code.push_str("    ])\n}\n");
    code
}

fn rust_string(value: &str) -> String {
    format!("{value:?}")
}

fn rust_option(value: Option<&str>) -> String {
    match value {
        Some(value) => format!("Some({})", rust_string(value)),
        None => "None".to_string(),
    }
}

/// Whether the diagnostic side-channel was requested via the environment.
pub fn debug_write_requested() -> bool {
    std::env::var_os(DEBUG_WRITE_ENV).is_some()
}

/// Writes the debug copy of the generated source under the application root
/// and returns its path.
pub fn write_debug_copy(app_root: &Path, code: &str) -> io::Result<PathBuf> {
    let path = app_root.join(DEBUG_FILE_NAME);
    fs::write(&path, code)?;
    Ok(path)
}
