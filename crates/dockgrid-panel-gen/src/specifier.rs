use std::path::{Component, Path, PathBuf, MAIN_SEPARATOR};

use dockgrid_panel_scanner::{PackageWithPanels, PanelEntry};

/// Resolves the import specifier emitted for a panel entry.
///
/// `"."` (or a missing module) refers to the declaring package itself and
/// becomes a bare specifier of its name. Relative paths resolve to absolute
/// paths under the package root, and a leading `/` is read as `./` relative
/// to the package root. Anything else is a bare specifier passed through for
/// standard module resolution.
pub fn resolve_import_specifier(package: &PackageWithPanels, entry: &PanelEntry) -> String {
    let module = entry.module.as_deref().unwrap_or(".");

    if module == "." {
        return package.name.clone();
    }

    if module.starts_with("./") || module.starts_with("../") {
        return normalize_specifier(&lexical_join(&package.root, module));
    }

    if let Some(rest) = module.strip_prefix('/') {
        return normalize_specifier(&lexical_join(&package.root, rest));
    }

    module.to_string()
}

// Joins a module path onto the package root without touching the
// filesystem; `.` and `..` segments fold lexically.
fn lexical_join(root: &Path, relative: &str) -> PathBuf {
    let mut resolved = root.to_path_buf();
    for component in Path::new(relative).components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                resolved.pop();
            }
            Component::Normal(segment) => resolved.push(segment),
            Component::RootDir | Component::Prefix(_) => {}
        }
    }
    resolved
}

/// Normalises host separators so specifiers are always forward-slash form.
fn normalize_specifier(path: &Path) -> String {
    path.to_string_lossy().replace(MAIN_SEPARATOR, "/")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn package(name: &str, root: &str) -> PackageWithPanels {
        PackageWithPanels {
            name: name.to_string(),
            root: PathBuf::from(root),
            entries: Vec::new(),
        }
    }

    fn entry(module: Option<&str>) -> PanelEntry {
        PanelEntry {
            name: "panel".to_string(),
            module: module.map(str::to_string),
            export: None,
            title: None,
        }
    }

    #[test]
    fn dot_and_missing_module_resolve_to_package_name() {
        let pkg = package("@viz/charts", "/install/@viz/charts");
        assert_eq!(resolve_import_specifier(&pkg, &entry(None)), "@viz/charts");
        assert_eq!(
            resolve_import_specifier(&pkg, &entry(Some("."))),
            "@viz/charts"
        );
    }

    #[test]
    fn relative_module_resolves_under_package_root() {
        let pkg = package("charts", "/install/charts");
        assert_eq!(
            resolve_import_specifier(&pkg, &entry(Some("./src/Chart"))),
            "/install/charts/src/Chart"
        );
    }

    #[test]
    fn parent_segments_fold_lexically() {
        let pkg = package("charts", "/install/charts");
        assert_eq!(
            resolve_import_specifier(&pkg, &entry(Some("../shared/Widget"))),
            "/install/shared/Widget"
        );
    }

    #[test]
    fn rooted_module_is_relative_to_package_root() {
        let pkg = package("charts", "/install/charts");
        assert_eq!(
            resolve_import_specifier(&pkg, &entry(Some("/lib/Chart"))),
            "/install/charts/lib/Chart"
        );
    }

    #[test]
    fn bare_specifier_passes_through() {
        let pkg = package("charts", "/install/charts");
        assert_eq!(
            resolve_import_specifier(&pkg, &entry(Some("some-lib/panel"))),
            "some-lib/panel"
        );
    }
}
