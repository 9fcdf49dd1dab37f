use std::path::Path;
use serde::{Deserialize, Serialize};
use anyhow::{bail, Context, Result};
use crate::manifest::ScopedRegistry;

/// Registry and tool settings, read from `settings.toml` in the user's
/// config directory.
///
/// Any key left out of the file falls back to its default.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Full registry URL, used as the `.upmconfig.toml` table key.
    pub registry_url: String,
    /// Display name of the scoped registry in the project manifest.
    pub registry_name: String,
    /// Package-name scopes routed to the registry.
    pub registry_scopes: Vec<String>,
    /// Substring identifying the registry's line in `.npmrc`.
    pub host_fragment: String,
    /// Substring of the login executable's file name.
    pub tool_name: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            registry_url: "https://npm.turkugamelab.fi/".to_string(),
            registry_name: "TUAS-FIT".to_string(),
            registry_scopes: vec!["com.tuas-fit".to_string()],
            host_fragment: "npm.turkugamelab.fi".to_string(),
            tool_name: "npm-login".to_string(),
        }
    }
}

impl Settings {
    /// Loads settings from `path`, or the defaults if it does not exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but can't be read or parsed.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Settings> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!("no settings at {}, using defaults", path.display());
            return Ok(Settings::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Could not read settings file {:?}", path))?;
        let settings: Settings = toml::from_str(&content)
            .with_context(|| format!("Invalid settings file {:?}", path))?;
        settings.check()?;
        Ok(settings)
    }

    /// Saves the settings to `path` in pretty TOML format, creating parent
    /// directories as needed.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Could not create config dir {:?}", parent))?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_str)?;
        Ok(())
    }

    pub fn scoped_registry(&self) -> ScopedRegistry {
        ScopedRegistry {
            name: self.registry_name.clone(),
            url: self.registry_url.clone(),
            scopes: self.registry_scopes.clone(),
        }
    }

    fn check(&self) -> Result<()> {
        if self.registry_scopes.is_empty() {
            bail!("registry_scopes must name at least one scope");
        }
        if self.host_fragment.is_empty() || self.tool_name.is_empty() {
            bail!("host_fragment and tool_name must not be empty");
        }
        Ok(())
    }
}
