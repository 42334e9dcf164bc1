//! Plugin entry points consumed by the host plugin loader.

use onlyfans_core::{HostPlatform, HostServices, PluginConfig};
use serde_json::{Map, Value};
use tracing::error;

use crate::error::LauncherResult;
use crate::launcher::BackendLauncher;

/// Key under which the launcher is registered with the host.
pub const BACKEND_PLUGIN_KEY: &str = "backend_plugin";

/// Plugin metadata. The host reads everything it needs from the plugin manifest.
pub fn metadata() -> Map<String, Value> {
    Map::new()
}

/// Capabilities handed to the host.
#[derive(Debug, Default)]
pub struct Registration {
    pub backend_plugin: Option<BackendLauncher>,
}

impl Registration {
    /// No capabilities; the host keeps running without this feature.
    pub const fn empty() -> Self {
        Self {
            backend_plugin: None,
        }
    }

    pub const fn is_empty(&self) -> bool {
        self.backend_plugin.is_none()
    }

    /// Registered capability keys.
    pub fn keys(&self) -> Vec<&'static str> {
        if self.backend_plugin.is_some() {
            vec![BACKEND_PLUGIN_KEY]
        } else {
            Vec::new()
        }
    }
}

/// Register the plugin for the running platform.
pub fn register(services: &HostServices, config: PluginConfig) -> LauncherResult<Registration> {
    register_for(services, config, HostPlatform::detect())
}

/// Register the plugin for `platform`.
///
/// Unsupported platforms get an empty registration and an error log rather
/// than an error, so the host keeps loading its other plugins.
pub fn register_for(
    services: &HostServices,
    config: PluginConfig,
    platform: HostPlatform,
) -> LauncherResult<Registration> {
    if !platform.is_supported() {
        let message = services.localizer.i18nc(
            "@error:unsupported",
            "plugin is only supported on x86_64 systems for Windows and Linux and x86_64/arm64 for macOS.",
        );
        error!(
            plugin = %config.plugin_name,
            platform = %platform,
            "{} {}",
            config.plugin_name,
            message
        );
        return Ok(Registration::empty());
    }

    let launcher = BackendLauncher::new(services, config, platform)?;
    Ok(Registration {
        backend_plugin: Some(launcher),
    })
}
