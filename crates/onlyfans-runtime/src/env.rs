//! Process environment adapter.

use onlyfans_core::EnvironmentSource;
use std::ffi::OsString;

/// Reads variables from the real process environment.
///
/// A variable that is set but not valid UTF-8 is still reported as set,
/// with invalid bytes replaced.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnvironment;

impl EnvironmentSource for ProcessEnvironment {
    fn var(&self, key: &str) -> Option<String> {
        lossy_value(std::env::var_os(key))
    }
}

fn lossy_value(value: Option<OsString>) -> Option<String> {
    value.map(|value| value.to_string_lossy().into_owned())
}
