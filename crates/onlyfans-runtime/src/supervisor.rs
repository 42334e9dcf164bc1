//! `ProcessSupervisor` implementation for locally spawned backends.
//!
//! Stands in for the host framework's process management when the plugin
//! is embedded in a Rust host: one port picked up front, children tracked
//! by id, SIGTERM on stop.

use async_trait::async_trait;
use onlyfans_core::{BackendCommand, ProcessError, ProcessHandle, ProcessSupervisor};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::process::Child;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::command::{build_and_spawn, spawn_log_readers};
use crate::ports::allocate_port;
use crate::shutdown::shutdown_child;

/// Supervisor spawning backends as local child processes.
pub struct LocalProcessSupervisor {
    port: u16,
    next_id: AtomicU64,
    children: Mutex<HashMap<u64, Child>>,
}

impl LocalProcessSupervisor {
    /// Create a supervisor, allocating the backend port from `base_port` upward.
    pub fn new(base_port: u16) -> Result<Self, ProcessError> {
        let port = allocate_port(base_port, &[])
            .map_err(|e| ProcessError::ResourceExhausted(e.to_string()))?;
        Ok(Self::with_port(port))
    }

    /// Create a supervisor that hands out a fixed port.
    pub fn with_port(port: u16) -> Self {
        Self {
            port,
            next_id: AtomicU64::new(1),
            children: Mutex::new(HashMap::new()),
        }
    }

    /// Number of tracked children.
    pub async fn count(&self) -> usize {
        self.children.lock().await.len()
    }

    /// Stop every tracked child. Used on host shutdown.
    pub async fn shutdown_all(&self) {
        let children: Vec<(u64, Child)> = self.children.lock().await.drain().collect();
        for (id, child) in children {
            match shutdown_child(child).await {
                Ok(status) => debug!(id = %id, status = %status, "Backend stopped"),
                Err(e) => warn!(id = %id, error = %e, "Failed to stop backend"),
            }
        }
    }
}

#[async_trait]
impl ProcessSupervisor for LocalProcessSupervisor {
    async fn spawn(&self, command: &BackendCommand) -> Result<ProcessHandle, ProcessError> {
        let mut child = build_and_spawn(command, self.port)
            .map_err(|e| ProcessError::StartFailed(e.to_string()))?;
        spawn_log_readers(&mut child, self.port);

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let handle = ProcessHandle {
            id,
            pid: child.id(),
            port: self.port,
        };
        self.children.lock().await.insert(id, child);

        info!(
            id = %id,
            pid = ?handle.pid,
            port = %self.port,
            program = %command.program.display(),
            "Backend spawned"
        );
        Ok(handle)
    }

    fn allocate_port(&self) -> Result<u16, ProcessError> {
        Ok(self.port)
    }

    async fn stop(&self, handle: &ProcessHandle) -> Result<(), ProcessError> {
        let child = self
            .children
            .lock()
            .await
            .remove(&handle.id)
            .ok_or_else(|| ProcessError::NotRunning(format!("backend {}", handle.id)))?;

        let status = shutdown_child(child)
            .await
            .map_err(|e| ProcessError::StopFailed(e.to_string()))?;
        debug!(id = %handle.id, status = %status, "Backend stopped");
        Ok(())
    }

    async fn is_running(&self, handle: &ProcessHandle) -> bool {
        let mut children = self.children.lock().await;
        match children.get_mut(&handle.id) {
            Some(child) => matches!(child.try_wait(), Ok(None)),
            None => false,
        }
    }
}
