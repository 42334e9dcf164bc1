#![doc = include_str!("../README.md")]
#![deny(unused_crate_dependencies)]

pub mod config;
pub mod descriptor;
pub mod platform;
pub mod ports;
pub mod settings;

pub use config::{
    ConfigError, DEFAULT_BACKEND_BASE_PORT, DEFAULT_DEBUG_PORT_VAR, PLUGIN_DIR_ENV,
    POSTPROCESS_MODIFY_SLOT, PluginConfig,
};
pub use descriptor::{BackendExecutableDescriptor, DescriptorSummary};
pub use platform::{Arch, HostPlatform, OsKind};
pub use ports::{
    ActiveMachinePort, BackendCommand, CATALOG_NAME, ContainerEvents, ContainerLoadHandler,
    EnvironmentSource, HostApplication, HostServices, Localizer, NoActiveMachine,
    NoopContainerEvents, NoopLocalizer, ProcessError, ProcessHandle, ProcessSupervisor,
    StaticEnvironment,
};
pub use settings::{
    ENABLE_SETTING, ExtruderSettings, PluginVersion, SETTINGS_DEFINITION_FILE, SettingDefinition,
    SettingsDefinition, SettingsError, is_enabled_value, setting_key,
};
