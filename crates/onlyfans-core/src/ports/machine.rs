//! Active machine configuration port.

use crate::settings::ExtruderSettings;

/// Query access to the host's currently active machine.
pub trait ActiveMachinePort: Send + Sync {
    /// Settings of every extruder on the active machine.
    ///
    /// Empty when no machine is active.
    fn active_extruders(&self) -> Vec<ExtruderSettings>;
}

/// Machine port for hosts without a machine manager.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoActiveMachine;

impl ActiveMachinePort for NoActiveMachine {
    fn active_extruders(&self) -> Vec<ExtruderSettings> {
        Vec::new()
    }
}
