//! Host application and process environment ports.

use std::collections::HashMap;
use std::path::PathBuf;

/// What the plugin needs to know about the host application itself.
pub trait HostApplication: Send + Sync {
    /// Installation prefix of the host, where a system-installed backend may live.
    fn app_folder_prefix(&self) -> PathBuf;

    /// `true` for a packaged (frozen) host build, `false` when running from source.
    fn is_packaged(&self) -> bool;
}

/// Read access to environment variables.
///
/// Injected so tests never have to mutate the real process environment.
pub trait EnvironmentSource: Send + Sync {
    fn var(&self, key: &str) -> Option<String>;
}

/// Fixed set of variables, for tests and embedding hosts that sandbox env.
#[derive(Debug, Clone, Default)]
pub struct StaticEnvironment {
    vars: HashMap<String, String>,
}

impl StaticEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }
}

impl EnvironmentSource for StaticEnvironment {
    fn var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}
