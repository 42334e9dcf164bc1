//! Shared host fakes for plugin integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use mockall::mock;
use onlyfans_core::{
    ActiveMachinePort, BackendCommand, ContainerEvents, ContainerLoadHandler, EnvironmentSource,
    ExtruderSettings, HostApplication, HostServices, PluginConfig, ProcessError, ProcessHandle,
    ProcessSupervisor, SETTINGS_DEFINITION_FILE,
};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

pub const BINARY: &str = "curaengine_plugin_onlyfans";
pub const DEBUG_VAR: &str = "CURAENGINE_ONLYFANS_PORT";

mock! {
    pub Supervisor {}

    #[async_trait]
    impl ProcessSupervisor for Supervisor {
        async fn spawn(&self, command: &BackendCommand) -> Result<ProcessHandle, ProcessError>;
        fn allocate_port(&self) -> Result<u16, ProcessError>;
        async fn stop(&self, handle: &ProcessHandle) -> Result<(), ProcessError>;
        async fn is_running(&self, handle: &ProcessHandle) -> bool;
    }
}

pub struct FakeHost {
    pub prefix: PathBuf,
    pub packaged: bool,
}

impl HostApplication for FakeHost {
    fn app_folder_prefix(&self) -> PathBuf {
        self.prefix.clone()
    }

    fn is_packaged(&self) -> bool {
        self.packaged
    }
}

#[derive(Default)]
pub struct FakeMachine {
    pub extruders: Vec<ExtruderSettings>,
}

impl ActiveMachinePort for FakeMachine {
    fn active_extruders(&self) -> Vec<ExtruderSettings> {
        self.extruders.clone()
    }
}

/// Environment that tests can change after the launcher was built.
#[derive(Default)]
pub struct MutableEnv {
    vars: Mutex<HashMap<String, String>>,
}

impl MutableEnv {
    pub fn set(&self, key: &str, value: &str) {
        self.vars
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    pub fn remove(&self, key: &str) {
        self.vars.lock().unwrap().remove(key);
    }
}

impl EnvironmentSource for MutableEnv {
    fn var(&self, key: &str) -> Option<String> {
        self.vars.lock().unwrap().get(key).cloned()
    }
}

#[derive(Default)]
pub struct RecordingEvents {
    pub handlers: Mutex<Vec<ContainerLoadHandler>>,
}

impl ContainerEvents for RecordingEvents {
    fn on_container_load_complete(&self, handler: ContainerLoadHandler) {
        self.handlers.lock().unwrap().push(handler);
    }
}

/// Temporary install prefix and plugin directory.
pub struct Layout {
    pub prefix: TempDir,
    pub plugin: TempDir,
}

impl Layout {
    pub fn new() -> Self {
        Self {
            prefix: TempDir::new().unwrap(),
            plugin: TempDir::new().unwrap(),
        }
    }

    pub fn config(&self) -> PluginConfig {
        PluginConfig::with_defaults().with_plugin_dir(self.plugin.path())
    }

    /// Place a bundled backend under `<plugin>/<arch>/<os>/`.
    pub fn bundle_binary(&self, arch: &str, os: &str, file_name: &str) -> PathBuf {
        let dir = self.plugin.path().join(arch).join(os);
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(file_name);
        std::fs::write(&path, "#!/bin/sh\nexit 0\n").unwrap();
        path
    }

    /// Copy the shipped settings definition into the plugin directory.
    pub fn install_settings_definition(&self) {
        let shipped = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("resources")
            .join(SETTINGS_DEFINITION_FILE);
        std::fs::copy(shipped, self.plugin.path().join(SETTINGS_DEFINITION_FILE)).unwrap();
    }
}

pub fn services(
    layout: &Layout,
    packaged: bool,
    supervisor: MockSupervisor,
    machine: FakeMachine,
    env: Arc<MutableEnv>,
) -> HostServices {
    HostServices::new(
        Arc::new(FakeHost {
            prefix: layout.prefix.path().to_path_buf(),
            packaged,
        }),
        Arc::new(machine),
        Arc::new(supervisor),
        env,
    )
}
