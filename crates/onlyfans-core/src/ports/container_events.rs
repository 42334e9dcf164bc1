//! Container registry event port.
//!
//! The host announces when a settings container finished loading. Plugins
//! subscribe once at construction; implementations handle transport.

use std::sync::Arc;

/// Callback invoked with the id of the container that finished loading.
pub type ContainerLoadHandler = Arc<dyn Fn(&str) + Send + Sync>;

/// Subscription side of the host's container registry events.
pub trait ContainerEvents: Send + Sync {
    /// Register `handler` for container-load-complete events.
    fn on_container_load_complete(&self, handler: ContainerLoadHandler);
}

/// Drops every subscription.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopContainerEvents;

impl ContainerEvents for NoopContainerEvents {
    fn on_container_load_complete(&self, _handler: ContainerLoadHandler) {
        // Intentionally do nothing
    }
}
