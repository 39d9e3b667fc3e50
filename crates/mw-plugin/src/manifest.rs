//! Plugin manifest parsing (plugin.toml).

use mw_plugin_api::PluginInfo;
use serde::Deserialize;

/// The manifest shipped inside the crate.
const BUNDLED: &str = include_str!("../plugin.toml");

#[derive(Debug, Deserialize)]
pub struct RawManifest {
    pub plugin: PluginSection,
}

#[derive(Debug, Deserialize)]
pub struct PluginSection {
    pub name: String,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub description: String,
}

fn default_version() -> String {
    "0.1.0".to_string()
}

/// Parsed plugin manifest.
#[derive(Debug, Clone)]
pub struct PluginManifest {
    pub name: String,
    pub version: String,
    pub author: String,
    pub description: String,
}

impl PluginManifest {
    pub fn parse(toml_content: &str) -> Result<Self, String> {
        let raw: RawManifest =
            toml::from_str(toml_content).map_err(|e| format!("invalid plugin.toml: {e}"))?;
        if raw.plugin.name.trim().is_empty() {
            return Err("plugin.toml: name must not be empty".into());
        }
        Ok(Self {
            name: raw.plugin.name,
            version: raw.plugin.version,
            author: raw.plugin.author,
            description: raw.plugin.description,
        })
    }

    pub fn bundled() -> Result<Self, String> {
        Self::parse(BUNDLED)
    }

    pub fn info(&self) -> PluginInfo {
        PluginInfo {
            name: self.name.clone(),
            version: self.version.clone(),
            description: self.description.clone(),
            author: self.author.clone(),
        }
    }
}
