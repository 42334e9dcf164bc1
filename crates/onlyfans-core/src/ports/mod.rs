//! Port definitions (trait abstractions) for host collaborators.
//!
//! Ports define the interfaces the launcher expects from the host
//! application. They contain no implementation details and use only
//! domain types.
//!
//! # Design Rules
//!
//! - No host-framework types in any signature
//! - No process/filesystem implementation details
//! - Intent-based methods for the process supervisor

pub mod container_events;
pub mod host;
pub mod localizer;
pub mod machine;
pub mod process_supervisor;

use std::sync::Arc;
use thiserror::Error;

pub use container_events::{ContainerEvents, ContainerLoadHandler, NoopContainerEvents};
pub use host::{EnvironmentSource, HostApplication, StaticEnvironment};
pub use localizer::{CATALOG_NAME, Localizer, NoopLocalizer};
pub use machine::{ActiveMachinePort, NoActiveMachine};
pub use process_supervisor::{BackendCommand, ProcessHandle, ProcessSupervisor};

/// Container for the host-provided services the plugin depends on.
///
/// Wired once by the host adapter and handed to `register`.
#[derive(Clone)]
pub struct HostServices {
    /// Host application facts (install prefix, packaged or not).
    pub app: Arc<dyn HostApplication>,
    /// Active machine configuration.
    pub machine: Arc<dyn ActiveMachinePort>,
    /// Backend process spawning and port allocation.
    pub supervisor: Arc<dyn ProcessSupervisor>,
    /// Container registry events.
    pub events: Arc<dyn ContainerEvents>,
    /// Translation catalog.
    pub localizer: Arc<dyn Localizer>,
    /// Environment variable access.
    pub env: Arc<dyn EnvironmentSource>,
}

impl HostServices {
    /// Create a container with no-op events and localizer.
    pub fn new(
        app: Arc<dyn HostApplication>,
        machine: Arc<dyn ActiveMachinePort>,
        supervisor: Arc<dyn ProcessSupervisor>,
        env: Arc<dyn EnvironmentSource>,
    ) -> Self {
        Self {
            app,
            machine,
            supervisor,
            events: Arc::new(NoopContainerEvents),
            localizer: Arc::new(NoopLocalizer),
            env,
        }
    }

    #[must_use]
    pub fn with_events(mut self, events: Arc<dyn ContainerEvents>) -> Self {
        self.events = events;
        self
    }

    #[must_use]
    pub fn with_localizer(mut self, localizer: Arc<dyn Localizer>) -> Self {
        self.localizer = localizer;
        self
    }
}

/// Domain-specific errors for process supervisor operations.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Failed to start the process.
    #[error("Failed to start: {0}")]
    StartFailed(String),

    /// Failed to stop the process.
    #[error("Failed to stop: {0}")]
    StopFailed(String),

    /// The process is not running.
    #[error("Process not running: {0}")]
    NotRunning(String),

    /// Resource exhaustion (e.g., no available ports).
    #[error("Resource exhaustion: {0}")]
    ResourceExhausted(String),
}
