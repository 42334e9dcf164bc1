//! Plugin setting keys, values and the settings-definition file.
//!
//! The host stores plugin settings under a key scoped by plugin name and
//! version, so two versions of the plugin never read each other's values.

use serde::Deserialize;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Short key of the per-extruder "feature enabled" setting.
pub const ENABLE_SETTING: &str = "onlyfans_enabled";

/// File name of the settings definition shipped next to the plugin.
pub const SETTINGS_DEFINITION_FILE: &str = "onlyfans_settings.def.json";

/// Errors raised while building keys or reading setting definitions.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Version string is not `major.minor.patch`.
    #[error("Invalid plugin version '{0}', expected major.minor.patch")]
    InvalidVersion(String),

    /// The definition file could not be read.
    #[error("Failed to read settings definition {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The definition file is not valid JSON for a definition map.
    #[error("Failed to parse settings definition {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A required setting is not declared, or declared with the wrong type.
    #[error("Setting '{key}' is not declared as {expected_type} in settings definition")]
    MissingDefinition { key: String, expected_type: String },
}

/// Semantic version triple used in setting keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PluginVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl PluginVersion {
    /// Parse `major.minor.patch`, ignoring pre-release/build suffixes on the patch.
    pub fn parse(version: &str) -> Result<Self, SettingsError> {
        let invalid = || SettingsError::InvalidVersion(version.to_string());
        let trimmed = version.trim();
        let core = trimmed
            .split_once(['-', '+'])
            .map_or(trimmed, |(core, _)| core);

        let numbers = core
            .split('.')
            .map(|part| part.parse::<u32>().map_err(|_| invalid()))
            .collect::<Result<Vec<_>, _>>()?;
        let [major, minor, patch] = numbers[..] else {
            return Err(invalid());
        };

        Ok(Self {
            major,
            minor,
            patch,
        })
    }
}

/// Build the host-side key for a plugin setting.
///
/// Format: `_plugin__<lowercased name>__<major>_<minor>_<patch>__<short_key>`.
pub fn setting_key(
    short_key: &str,
    plugin_name: &str,
    plugin_version: &str,
) -> Result<String, SettingsError> {
    let version = PluginVersion::parse(plugin_version)?;
    Ok(format!(
        "_plugin__{}__{}_{}_{}__{}",
        plugin_name.to_lowercase(),
        version.major,
        version.minor,
        version.patch,
        short_key
    ))
}

/// Whether a host setting value means "enabled".
///
/// Booleans are taken as-is; strings count when they spell `true`, which is
/// how the host serializes settings for the backend.
pub fn is_enabled_value(value: &Value) -> bool {
    match value {
        Value::Bool(enabled) => *enabled,
        Value::String(text) => text.trim().eq_ignore_ascii_case("true"),
        _ => false,
    }
}

/// Settings of one extruder on the active machine, keyed by full setting key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtruderSettings {
    pub position: usize,
    values: HashMap<String, Value>,
}

impl ExtruderSettings {
    pub fn new(position: usize) -> Self {
        Self {
            position,
            values: HashMap::new(),
        }
    }

    #[must_use]
    pub fn with_value(mut self, key: impl Into<String>, value: Value) -> Self {
        self.values.insert(key.into(), value);
        self
    }

    pub fn has_property(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn value(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// `true` only if the setting is present and enabled; absence is not an error.
    pub fn is_enabled(&self, key: &str) -> bool {
        self.value(key).is_some_and(is_enabled_value)
    }
}

/// One entry of the settings-definition file.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SettingDefinition {
    pub label: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    pub setting_type: String,
    #[serde(default)]
    pub default_value: Value,
    #[serde(default)]
    pub settable_per_extruder: bool,
    #[serde(default)]
    pub settable_per_mesh: bool,
}

/// Settings declared by the plugin for the host settings UI.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct SettingsDefinition {
    pub settings: BTreeMap<String, SettingDefinition>,
}

impl SettingsDefinition {
    /// Load and check a definition file.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let raw = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let definition: Self =
            serde_json::from_str(&raw).map_err(|source| SettingsError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        definition.require_bool(ENABLE_SETTING)?;
        Ok(definition)
    }

    pub fn get(&self, key: &str) -> Option<&SettingDefinition> {
        self.settings.get(key)
    }

    fn require_bool(&self, key: &str) -> Result<(), SettingsError> {
        match self.get(key) {
            Some(definition) if definition.setting_type == "bool" => Ok(()),
            _ => Err(SettingsError::MissingDefinition {
                key: key.to_string(),
                expected_type: "bool".to_string(),
            }),
        }
    }
}
