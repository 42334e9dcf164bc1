#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]

mod command;
pub mod env;
pub mod events;
pub mod permissions;
pub mod ports;
pub mod resolve;
mod shutdown;
pub mod supervisor;

pub use command::{BACKEND_ADDRESS, build_command};
pub use env::ProcessEnvironment;
pub use events::ContainerEventBus;
pub use permissions::{PermissionFix, ensure_executable, is_executable};
pub use ports::{allocate_port, is_port_available};
pub use resolve::{BinaryLocation, resolve_binary_path};
pub use supervisor::LocalProcessSupervisor;
