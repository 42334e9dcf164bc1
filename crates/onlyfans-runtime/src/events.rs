//! In-process container event bus.

use onlyfans_core::{ContainerEvents, ContainerLoadHandler};
use std::sync::{PoisonError, RwLock};
use tracing::debug;

/// Fans container-load-complete events out to every subscriber.
#[derive(Default)]
pub struct ContainerEventBus {
    handlers: RwLock<Vec<ContainerLoadHandler>>,
}

impl ContainerEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver a load-complete event for `container_id` to all subscribers.
    pub fn publish_load_complete(&self, container_id: &str) {
        let handlers = self
            .handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        debug!(
            container_id = %container_id,
            subscribers = handlers.len(),
            "Publishing container load complete"
        );
        for handler in handlers {
            handler(container_id);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl ContainerEvents for ContainerEventBus {
    fn on_container_load_complete(&self, handler: ContainerLoadHandler) {
        self.handlers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(handler);
    }
}
