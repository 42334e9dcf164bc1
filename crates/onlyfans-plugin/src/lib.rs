#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]

pub mod error;
pub mod launcher;
pub mod registration;
pub mod telemetry;

pub use error::{LauncherError, LauncherResult};
pub use launcher::{BackendLauncher, detect_debug_mode, parse_debug_port};
pub use registration::{BACKEND_PLUGIN_KEY, Registration, metadata, register, register_for};
pub use telemetry::init_tracing;
