//! Description of the backend executable chosen for this machine.

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::platform::{Arch, HostPlatform, OsKind};

/// Where the backend lives and how it is going to be run.
///
/// Built once when the launcher is constructed and never mutated; a new
/// launcher recomputes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendExecutableDescriptor {
    platform: HostPlatform,
    resolved_path: PathBuf,
    is_debug_mode: bool,
}

impl BackendExecutableDescriptor {
    pub const fn new(platform: HostPlatform, resolved_path: PathBuf, is_debug_mode: bool) -> Self {
        Self {
            platform,
            resolved_path,
            is_debug_mode,
        }
    }

    pub const fn platform(&self) -> &HostPlatform {
        &self.platform
    }

    pub const fn platform_name(&self) -> &OsKind {
        &self.platform.os
    }

    pub const fn architecture_name(&self) -> &Arch {
        &self.platform.arch
    }

    pub fn resolved_path(&self) -> &Path {
        &self.resolved_path
    }

    pub const fn is_debug_mode(&self) -> bool {
        self.is_debug_mode
    }

    /// Serializable snapshot for diagnostics.
    pub fn summary(&self) -> DescriptorSummary {
        DescriptorSummary {
            platform: self.platform.os.to_string(),
            architecture: self.platform.arch.to_string(),
            resolved_path: self.resolved_path.clone(),
            exists: self.resolved_path.exists(),
            debug_mode: self.is_debug_mode,
        }
    }
}

/// Flat view of a descriptor, suitable for logging or a host diagnostics panel.
#[derive(Debug, Clone, Serialize)]
pub struct DescriptorSummary {
    pub platform: String,
    pub architecture: String,
    pub resolved_path: PathBuf,
    pub exists: bool,
    pub debug_mode: bool,
}
