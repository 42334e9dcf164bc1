//! Process supervisor trait definition.
//!
//! The host framework owns the backend subprocess: it picks the port,
//! spawns the binary, and tears it down on shutdown. This port is what the
//! launcher sees of that machinery.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::ProcessError;

/// Command used to launch the backend.
///
/// `program` is the resolved backend path; `args` are extra arguments the
/// plugin wants passed. Supervisors may append their own (address, port).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendCommand {
    pub program: PathBuf,
    pub args: Vec<String>,
}

impl BackendCommand {
    /// A command consisting of the program alone.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }
}

/// Handle to a spawned backend process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessHandle {
    /// Supervisor-assigned identifier.
    pub id: u64,
    /// OS process id, if known.
    pub pid: Option<u32>,
    /// Port the backend was told to listen on.
    pub port: u16,
}

/// Spawns and tracks backend processes on behalf of the host.
#[async_trait]
pub trait ProcessSupervisor: Send + Sync {
    /// Spawn `command`. The process keeps running until `stop` or host shutdown.
    async fn spawn(&self, command: &BackendCommand) -> Result<ProcessHandle, ProcessError>;

    /// Port the host will use to reach the backend.
    fn allocate_port(&self) -> Result<u16, ProcessError>;

    /// Stop a spawned process.
    ///
    /// Returns `Err(ProcessError::NotRunning)` if it already exited.
    async fn stop(&self, handle: &ProcessHandle) -> Result<(), ProcessError>;

    /// Check if a spawned process is still alive.
    async fn is_running(&self, handle: &ProcessHandle) -> bool;
}
