use serde::{Deserialize, Serialize};

/// Name of the metadata file read from every candidate package root.
pub const MANIFEST_FILE: &str = "manifest.json";

/// Declaration describing a single panel exported by an installed package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelEntry {
    /// Name used when the dock adds the panel.
    pub name: String,
    /// Module specifier that exports the panel constructor. Defaults to the
    /// package's own entry point.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,
    /// Named export within the module; defaults to the module's default
    /// export.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export: Option<String>,
    /// Optional human readable title shown in menus.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl PanelEntry {
    /// Entries without a usable name are dropped during discovery.
    pub fn is_valid(&self) -> bool {
        !self.name.trim().is_empty()
    }
}

/// Root metadata block read from a package's manifest file.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct PackageManifest {
    pub name: Option<String>,
    #[serde(default)]
    pub panels: Vec<PanelEntry>,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn manifest_parses_panel_block() {
        let manifest: PackageManifest = serde_json::from_str(
            r#"{
                "name": "@viz/charts",
                "panels": [
                    {"name": "chart", "module": "./Chart", "title": "Chart View"},
                    {"name": "rawFeed"}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(manifest.name.as_deref(), Some("@viz/charts"));
        assert_eq!(manifest.panels.len(), 2);
        assert_eq!(manifest.panels[0].module.as_deref(), Some("./Chart"));
        assert_eq!(manifest.panels[1].module, None);
        assert_eq!(manifest.panels[1].export, None);
    }

    #[test]
    fn manifest_without_panels_yields_empty_list() {
        let manifest: PackageManifest =
            serde_json::from_str(r#"{"name": "plain-package"}"#).unwrap();
        assert!(manifest.panels.is_empty());
    }

    #[test]
    fn blank_names_are_invalid() {
        let entry = PanelEntry {
            name: "   ".to_string(),
            module: None,
            export: None,
            title: None,
        };
        assert!(!entry.is_valid());
    }
}
