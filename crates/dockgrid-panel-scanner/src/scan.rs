use std::fs;
use std::path::{Path, PathBuf};

use crate::{PackageManifest, PanelEntry, MANIFEST_FILE};

/// Conventional installation directory for panel packages under an
/// application root.
pub const PACKAGES_DIR: &str = "packages";

/// Prefix marking a namespace scope directory holding sub-packages.
pub const SCOPE_PREFIX: char = '@';

/// Expanded metadata about a package that declared panels. Only valid
/// entries survive, in manifest declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageWithPanels {
    pub name: String,
    pub root: PathBuf,
    pub entries: Vec<PanelEntry>,
}

/// Location of the package installation directory for an application root.
pub fn packages_dir(app_root: &Path) -> PathBuf {
    app_root.join(PACKAGES_DIR)
}

/// Scans the installation directory for packages whose manifest declares at
/// least one valid panel. Unreadable directories and unparsable manifests
/// are skipped; an unreadable root yields an empty result. Package order
/// follows directory-listing order.
pub fn scan_packages(install_root: &Path) -> Vec<PackageWithPanels> {
    let mut packages = Vec::new();

    for dir in collect_package_dirs(install_root) {
        let Some(manifest) = read_manifest(&dir.join(MANIFEST_FILE)) else {
            continue;
        };
        let Some(name) = manifest.name else {
            continue;
        };
        let entries: Vec<PanelEntry> = manifest
            .panels
            .into_iter()
            .filter(PanelEntry::is_valid)
            .collect();
        if entries.is_empty() {
            continue;
        }
        packages.push(PackageWithPanels {
            name,
            root: dir,
            entries,
        });
    }

    packages
}

/// Collects candidate package directories one level below the installation
/// root, descending one extra level into `@scope` namespace directories.
fn collect_package_dirs(install_root: &Path) -> Vec<PathBuf> {
    let entries = match fs::read_dir(install_root) {
        Ok(entries) => entries,
        Err(err) => {
            log::debug!(
                "cannot read package directory {}: {err}",
                install_root.display()
            );
            return Vec::new();
        }
    };

    let mut dirs = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        if entry
            .file_name()
            .to_string_lossy()
            .starts_with(SCOPE_PREFIX)
        {
            // Unreadable scope directories are skipped without failing the scan.
            if let Ok(scoped) = fs::read_dir(&path) {
                for scoped_entry in scoped.flatten() {
                    dirs.push(scoped_entry.path());
                }
            }
        } else {
            dirs.push(path);
        }
    }
    dirs
}

fn read_manifest(path: &Path) -> Option<PackageManifest> {
    let raw = fs::read_to_string(path).ok()?;
    match serde_json::from_str(&raw) {
        Ok(manifest) => Some(manifest),
        Err(err) => {
            log::debug!("skipping unparsable manifest {}: {err}", path.display());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs::create_dir_all;

    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    use super::*;

    fn write_manifest(package_root: &Path, json: &str) {
        create_dir_all(package_root).unwrap();
        fs::write(package_root.join(MANIFEST_FILE), json).unwrap();
    }

    #[test]
    fn discovers_plain_and_scoped_packages() {
        let dir = tempdir().unwrap();
        write_manifest(
            &dir.path().join("charts"),
            r#"{"name": "charts", "panels": [{"name": "chart"}]}"#,
        );
        write_manifest(
            &dir.path().join("@viz/gauges"),
            r#"{"name": "@viz/gauges", "panels": [{"name": "gauge", "title": "Gauge"}]}"#,
        );

        let mut packages = scan_packages(dir.path());
        packages.sort_by(|a, b| a.name.cmp(&b.name));
        assert_eq!(packages.len(), 2);
        assert_eq!(packages[0].name, "@viz/gauges");
        assert_eq!(packages[0].root, dir.path().join("@viz/gauges"));
        assert_eq!(packages[1].name, "charts");
        assert_eq!(packages[1].entries[0].name, "chart");
    }

    #[test]
    fn packages_without_valid_entries_are_excluded() {
        let dir = tempdir().unwrap();
        write_manifest(
            &dir.path().join("empty"),
            r#"{"name": "empty", "panels": []}"#,
        );
        write_manifest(
            &dir.path().join("blank"),
            r#"{"name": "blank", "panels": [{"name": "  "}]}"#,
        );
        write_manifest(&dir.path().join("plain"), r#"{"name": "plain"}"#);
        write_manifest(
            &dir.path().join("nameless"),
            r#"{"panels": [{"name": "orphan"}]}"#,
        );

        assert_eq!(scan_packages(dir.path()), Vec::new());
    }

    #[test]
    fn invalid_entries_are_filtered_but_siblings_survive() {
        let dir = tempdir().unwrap();
        write_manifest(
            &dir.path().join("mixed"),
            r#"{"name": "mixed", "panels": [{"name": ""}, {"name": "keeper"}]}"#,
        );

        let packages = scan_packages(dir.path());
        assert_eq!(packages.len(), 1);
        let names: Vec<_> = packages[0]
            .entries
            .iter()
            .map(|entry| entry.name.as_str())
            .collect();
        assert_eq!(names, vec!["keeper"]);
    }

    #[test]
    fn malformed_manifest_skips_only_that_package() {
        let dir = tempdir().unwrap();
        write_manifest(&dir.path().join("broken"), "{ not json");
        write_manifest(
            &dir.path().join("fine"),
            r#"{"name": "fine", "panels": [{"name": "panel"}]}"#,
        );

        let packages = scan_packages(dir.path());
        assert_eq!(packages.len(), 1);
        assert_eq!(packages[0].name, "fine");
    }

    #[test]
    fn missing_root_yields_empty_result() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("no-such-dir");
        assert_eq!(scan_packages(&missing), Vec::new());
    }

    #[test]
    fn entry_order_preserves_manifest_declaration_order() {
        let dir = tempdir().unwrap();
        write_manifest(
            &dir.path().join("ordered"),
            r#"{"name": "ordered", "panels": [
                {"name": "zulu"}, {"name": "alpha"}, {"name": "mike"}
            ]}"#,
        );

        let packages = scan_packages(dir.path());
        let names: Vec<_> = packages[0]
            .entries
            .iter()
            .map(|entry| entry.name.as_str())
            .collect();
        assert_eq!(names, vec!["zulu", "alpha", "mike"]);
    }
}
