//! Plugin configuration.
//!
//! All fields have defaults so a host can ship an empty `{}` or a partial
//! file and still get a working launcher.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::settings::{ENABLE_SETTING, PluginVersion, SettingsError, setting_key};

/// Environment variable overriding the plugin directory at runtime.
pub const PLUGIN_DIR_ENV: &str = "ONLYFANS_PLUGIN_DIR";

/// Environment variable that switches the launcher into debug mode.
pub const DEFAULT_DEBUG_PORT_VAR: &str = "CURAENGINE_ONLYFANS_PORT";

/// Base port for backend port allocation.
pub const DEFAULT_BACKEND_BASE_PORT: u16 = 7856;

/// Slot id of the post-process "modify" hook served by the backend.
pub const POSTPROCESS_MODIFY_SLOT: u32 = 101;

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid config: {0}")]
    Invalid(String),

    #[error(transparent)]
    Settings(#[from] SettingsError),

    /// No plugin directory could be determined.
    #[error("Cannot determine plugin directory: {0}")]
    NoPluginDir(String),
}

/// Launcher configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginConfig {
    /// Plugin name as registered with the host.
    pub plugin_name: String,
    /// Plugin version (`major.minor.patch`).
    pub plugin_version: String,
    /// Backend executable name without platform extension.
    pub binary_name: String,
    /// Environment variable carrying the debug port.
    pub debug_port_var: String,
    /// Short key of the enable setting.
    pub enable_setting: String,
    /// Directory holding bundled binaries and the settings definition.
    pub plugin_dir: Option<PathBuf>,
    /// First port tried when allocating a backend port.
    pub base_port: u16,
    /// Slot ids the backend serves.
    pub supported_slots: Vec<u32>,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl PluginConfig {
    pub fn with_defaults() -> Self {
        Self {
            plugin_name: "CuraEngineOnlyFans".to_string(),
            plugin_version: "0.1.0".to_string(),
            binary_name: "curaengine_plugin_onlyfans".to_string(),
            debug_port_var: DEFAULT_DEBUG_PORT_VAR.to_string(),
            enable_setting: ENABLE_SETTING.to_string(),
            plugin_dir: None,
            base_port: DEFAULT_BACKEND_BASE_PORT,
            supported_slots: vec![POSTPROCESS_MODIFY_SLOT],
        }
    }

    /// Load from a JSON file, filling in defaults for missing fields.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    #[must_use]
    pub fn with_plugin_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.plugin_dir = Some(dir.into());
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("plugin_name", &self.plugin_name),
            ("binary_name", &self.binary_name),
            ("debug_port_var", &self.debug_port_var),
            ("enable_setting", &self.enable_setting),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::Invalid(format!("{field} cannot be empty")));
            }
        }

        if self.base_port == 0 {
            return Err(ConfigError::Invalid("base_port cannot be 0".to_string()));
        }

        PluginVersion::parse(&self.plugin_version)?;
        Ok(())
    }

    /// Full host key of the enable setting.
    pub fn enable_setting_key(&self) -> Result<String, SettingsError> {
        setting_key(&self.enable_setting, &self.plugin_name, &self.plugin_version)
    }

    /// Resolve the plugin directory.
    ///
    /// Resolution order:
    /// 1. `ONLYFANS_PLUGIN_DIR` (via `env_override`)
    /// 2. `plugin_dir` from this config
    /// 3. Directory of the current executable
    ///
    /// The last step yields the host's own folder, not the plugin's, since
    /// the plugin is loaded into the host process. The bundled fallback
    /// `<plugin-dir>/<arch>/<os>/` then points into the host install, so
    /// hosts shipping the backend inside the plugin package must set
    /// `plugin_dir` or `ONLYFANS_PLUGIN_DIR`.
    pub fn resolve_plugin_dir(&self, env_override: Option<String>) -> Result<PathBuf, ConfigError> {
        if let Some(dir) = env_override.filter(|d| !d.trim().is_empty()) {
            return Ok(PathBuf::from(dir));
        }

        if let Some(dir) = &self.plugin_dir {
            return Ok(dir.clone());
        }

        let exe = std::env::current_exe().map_err(|e| ConfigError::NoPluginDir(e.to_string()))?;
        exe.parent()
            .map(Path::to_path_buf)
            .ok_or_else(|| ConfigError::NoPluginDir(format!("{} has no parent", exe.display())))
    }
}
