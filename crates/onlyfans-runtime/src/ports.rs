//! Local TCP port allocation for the backend.

use anyhow::{Result, anyhow};
use std::net::TcpListener;
use std::time::Duration;
use tracing::debug;

/// Number of consecutive ports tried from the base port.
const PORT_RANGE: u16 = 100;

/// Check if a port is available by attempting to bind to it.
/// The listener is dropped immediately, which releases the port.
pub fn is_port_available(port: u16) -> bool {
    match TcpListener::bind(("127.0.0.1", port)) {
        Ok(listener) => listener.local_addr().is_ok(),
        Err(_) => false,
    }
}

/// Allocate an available port from `base_port` upward, skipping `used_ports`.
pub fn allocate_port(base_port: u16, used_ports: &[u16]) -> Result<u16> {
    let last_port = base_port.saturating_add(PORT_RANGE - 1);

    // A few passes to ride out ports released by exiting processes
    for attempt in 0..3 {
        for port in base_port..=last_port {
            if used_ports.contains(&port) {
                continue;
            }

            if is_port_available(port) {
                debug!(port = %port, attempt = %(attempt + 1), "Allocated backend port");
                return Ok(port);
            }
            debug!(port = %port, "Port unavailable on system, skipping");
        }

        if attempt < 2 {
            std::thread::sleep(Duration::from_millis(100));
        }
    }

    Err(anyhow!(
        "No available ports in range {base_port}-{last_port} after 3 attempts"
    ))
}
