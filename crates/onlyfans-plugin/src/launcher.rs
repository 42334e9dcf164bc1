//! The backend launcher.
//!
//! Resolves the backend binary for this machine, fixes its permissions, and
//! either spawns it through the host's [`ProcessSupervisor`] or, in debug
//! mode, leaves it to a developer who runs the backend by hand.
//!
//! The flow is linear: resolve → permission fix → spawn or skip. There are
//! no retries.

use onlyfans_core::{
    ActiveMachinePort, BackendCommand, BackendExecutableDescriptor, EnvironmentSource,
    HostPlatform, HostServices, PLUGIN_DIR_ENV, PluginConfig, ProcessHandle, ProcessSupervisor,
    SETTINGS_DEFINITION_FILE, SettingsDefinition,
};
use onlyfans_runtime::{BinaryLocation, PermissionFix};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, error, info};

use crate::error::{LauncherError, LauncherResult};

/// `true` iff the host runs unpackaged and the debug-port variable is present.
pub fn detect_debug_mode(is_packaged: bool, env: &dyn EnvironmentSource, var: &str) -> bool {
    !is_packaged && env.var(var).is_some()
}

/// Parse the debug port from the value of `var`.
pub fn parse_debug_port(var: &str, value: Option<String>) -> LauncherResult<u16> {
    let value = value.ok_or_else(|| LauncherError::DebugPortMissing {
        var: var.to_string(),
    })?;
    value
        .trim()
        .parse::<u16>()
        .map_err(|source| LauncherError::DebugPortInvalid {
            var: var.to_string(),
            value,
            source,
        })
}

/// Launches the backend binary and answers the host's plugin queries.
pub struct BackendLauncher {
    descriptor: BackendExecutableDescriptor,
    config: PluginConfig,
    enable_key: String,
    plugin_command: BackendCommand,
    definition_file_paths: Vec<PathBuf>,
    supervisor: Arc<dyn ProcessSupervisor>,
    machine: Arc<dyn ActiveMachinePort>,
    env: Arc<dyn EnvironmentSource>,
}

impl std::fmt::Debug for BackendLauncher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendLauncher")
            .field("descriptor", &self.descriptor)
            .field("enable_key", &self.enable_key)
            .field("plugin_command", &self.plugin_command)
            .finish_non_exhaustive()
    }
}

impl BackendLauncher {
    /// Build a launcher for `platform`.
    ///
    /// Outside debug mode a missing binary is only logged, while a failure
    /// to fix its permissions is returned.
    pub fn new(
        services: &HostServices,
        config: PluginConfig,
        platform: HostPlatform,
    ) -> LauncherResult<Self> {
        config.validate()?;
        let enable_key = config.enable_setting_key()?;
        let plugin_dir = config.resolve_plugin_dir(services.env.var(PLUGIN_DIR_ENV))?;
        let install_prefix = services.app.app_folder_prefix();

        let is_debug_mode = detect_debug_mode(
            services.app.is_packaged(),
            services.env.as_ref(),
            &config.debug_port_var,
        );

        let location = BinaryLocation {
            platform: &platform,
            install_prefix: &install_prefix,
            plugin_dir: &plugin_dir,
            binary_name: &config.binary_name,
        };
        let resolved_path = if is_debug_mode {
            location.find().unwrap_or_else(|| location.fallback_path())
        } else {
            location.resolve()
        };

        let definition_file_paths = vec![plugin_dir.join(SETTINGS_DEFINITION_FILE)];
        let plugin_command = BackendCommand::new(&resolved_path);
        let descriptor = BackendExecutableDescriptor::new(platform, resolved_path, is_debug_mode);

        let launcher = Self {
            descriptor,
            config,
            enable_key,
            plugin_command,
            definition_file_paths,
            supervisor: Arc::clone(&services.supervisor),
            machine: Arc::clone(&services.machine),
            env: Arc::clone(&services.env),
        };

        if !is_debug_mode {
            launcher.ensure_executable()?;
        }

        services
            .events
            .on_container_load_complete(Arc::new(|container_id: &str| {
                debug!(container_id = %container_id, "Container load complete");
            }));

        let summary = launcher.descriptor.summary();
        info!(
            platform = %summary.platform,
            arch = %summary.architecture,
            path = %summary.resolved_path.display(),
            exists = summary.exists,
            debug_mode = summary.debug_mode,
            "Backend launcher ready"
        );
        Ok(launcher)
    }

    pub const fn descriptor(&self) -> &BackendExecutableDescriptor {
        &self.descriptor
    }

    pub const fn config(&self) -> &PluginConfig {
        &self.config
    }

    /// Backend path chosen at construction.
    pub fn resolve_binary_path(&self) -> &Path {
        self.descriptor.resolved_path()
    }

    /// Restore the owner-execute bit on the backend (no-op on Windows).
    pub fn ensure_executable(&self) -> LauncherResult<PermissionFix> {
        let path = self.descriptor.resolved_path();
        onlyfans_runtime::ensure_executable(self.descriptor.platform_name(), path).map_err(
            |source| LauncherError::Permission {
                path: path.to_path_buf(),
                source,
            },
        )
    }

    pub const fn is_debug_mode(&self) -> bool {
        self.descriptor.is_debug_mode()
    }

    /// Port the host connects to.
    ///
    /// In debug mode it comes from the debug-port variable and a missing or
    /// malformed value is an error; otherwise the supervisor decides.
    pub fn port(&self) -> LauncherResult<u16> {
        if self.is_debug_mode() {
            let var = &self.config.debug_port_var;
            return parse_debug_port(var, self.env.var(var));
        }
        Ok(self.supervisor.allocate_port()?)
    }

    /// Spawn the backend. Returns `None` in debug mode, where nothing is spawned.
    pub async fn start(&self) -> LauncherResult<Option<ProcessHandle>> {
        if self.is_debug_mode() {
            info!("Debug mode, expecting an externally started backend");
            return Ok(None);
        }

        let path = self.descriptor.resolved_path();
        if !path.exists() {
            error!(path = %path.display(), "Backend binary missing, attempting launch anyway");
        }

        let handle = self.supervisor.spawn(&self.plugin_command).await?;
        Ok(Some(handle))
    }

    /// Whether any extruder of the active machine has the feature enabled.
    pub fn use_plugin(&self) -> bool {
        let extruders = self.machine.active_extruders();
        let enabled = extruders
            .iter()
            .any(|extruder| extruder.is_enabled(&self.enable_key));
        debug!(
            key = %self.enable_key,
            extruders = extruders.len(),
            enabled,
            "Checked plugin enable setting"
        );
        enabled
    }

    /// Command handed to the supervisor: the resolved path and nothing else.
    pub const fn plugin_command(&self) -> &BackendCommand {
        &self.plugin_command
    }

    /// Slot ids this backend serves.
    pub fn supported_slots(&self) -> &[u32] {
        &self.config.supported_slots
    }

    /// Settings definition files for the host settings UI.
    pub fn definition_file_paths(&self) -> &[PathBuf] {
        &self.definition_file_paths
    }

    /// Load the plugin's settings definition.
    pub fn settings_definition(&self) -> LauncherResult<SettingsDefinition> {
        let path = self
            .definition_file_paths
            .first()
            .map_or_else(|| Path::new(SETTINGS_DEFINITION_FILE), PathBuf::as_path);
        Ok(SettingsDefinition::load(path)?)
    }

    /// Full host key of the enable setting.
    pub fn enable_setting_key(&self) -> &str {
        &self.enable_key
    }
}
