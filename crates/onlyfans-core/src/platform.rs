//! Host platform and CPU architecture detection.
//!
//! Names follow what the host application reports (`Windows`, `Linux`,
//! `Darwin` for the OS; `x86_64`, `arm64` for the machine), because the
//! bundled backend binaries are laid out on disk under those names.

use std::fmt;

/// Operating system the plugin is running on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OsKind {
    Windows,
    Linux,
    Darwin,
    /// Any other system, carried by its raw name.
    Other(String),
}

impl OsKind {
    /// Detect the OS this crate was compiled for.
    pub fn current() -> Self {
        Self::from_target(std::env::consts::OS)
    }

    /// Map a Rust target OS name (`std::env::consts::OS`) to the host's naming.
    pub fn from_target(target_os: &str) -> Self {
        match target_os {
            "windows" => Self::Windows,
            "linux" => Self::Linux,
            "macos" => Self::Darwin,
            other => Self::Other(other.to_string()),
        }
    }

    /// Name used for directories of bundled binaries.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Windows => "Windows",
            Self::Linux => "Linux",
            Self::Darwin => "Darwin",
            Self::Other(name) => name,
        }
    }

    pub const fn is_windows(&self) -> bool {
        matches!(self, Self::Windows)
    }
}

impl fmt::Display for OsKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized CPU architecture.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Arch {
    X86_64,
    Arm64,
    /// Unrecognized machine name, passed through unchanged.
    Other(String),
}

impl Arch {
    /// Normalize a raw machine name.
    ///
    /// `AMD64` (64-bit Windows) collapses into `x86_64`; everything else
    /// keeps its spelling.
    pub fn normalize(raw: &str) -> Self {
        match raw {
            "AMD64" | "x86_64" => Self::X86_64,
            "arm64" => Self::Arm64,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::X86_64 => "x86_64",
            Self::Arm64 => "arm64",
            Self::Other(name) => name,
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The (OS, architecture) pair the plugin runs on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HostPlatform {
    pub os: OsKind,
    pub arch: Arch,
}

impl HostPlatform {
    pub const fn new(os: OsKind, arch: Arch) -> Self {
        Self { os, arch }
    }

    /// Detect the running platform.
    pub fn detect() -> Self {
        let os = OsKind::current();
        let machine = raw_machine_name(&os, std::env::consts::ARCH);
        Self::new(os, Arch::normalize(machine))
    }

    /// Backend binaries ship for x86_64 everywhere and arm64 on macOS only.
    pub fn is_supported(&self) -> bool {
        match self.arch {
            Arch::X86_64 => true,
            Arch::Arm64 => self.os == OsKind::Darwin,
            Arch::Other(_) => false,
        }
    }

    /// Platform-appropriate file name for an executable called `base`.
    pub fn executable_name(&self, base: &str) -> String {
        if self.os.is_windows() {
            format!("{base}.exe")
        } else {
            base.to_string()
        }
    }
}

impl fmt::Display for HostPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.os, self.arch)
    }
}

/// Machine name as the host would report it for a Rust target architecture.
fn raw_machine_name<'a>(os: &OsKind, target_arch: &'a str) -> &'a str {
    match (os, target_arch) {
        (OsKind::Windows, "x86_64") => "AMD64",
        (OsKind::Darwin, "aarch64") => "arm64",
        (_, arch) => arch,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amd64_normalizes_to_x86_64() {
        assert_eq!(Arch::normalize("AMD64"), Arch::X86_64);
        assert_eq!(Arch::normalize("AMD64").as_str(), "x86_64");
    }

    #[test]
    fn test_other_architectures_pass_through() {
        for raw in ["aarch64", "i686", "armv7l", "amd64", "riscv64"] {
            assert_eq!(Arch::normalize(raw).as_str(), raw);
        }
        assert_eq!(Arch::normalize("arm64"), Arch::Arm64);
    }

    #[test]
    fn test_os_from_target() {
        assert_eq!(OsKind::from_target("windows"), OsKind::Windows);
        assert_eq!(OsKind::from_target("linux"), OsKind::Linux);
        assert_eq!(OsKind::from_target("macos"), OsKind::Darwin);
        assert_eq!(
            OsKind::from_target("freebsd"),
            OsKind::Other("freebsd".to_string())
        );
    }

    #[test]
    fn test_raw_machine_name_matches_host_reporting() {
        assert_eq!(raw_machine_name(&OsKind::Windows, "x86_64"), "AMD64");
        assert_eq!(raw_machine_name(&OsKind::Darwin, "aarch64"), "arm64");
        assert_eq!(raw_machine_name(&OsKind::Linux, "aarch64"), "aarch64");
        assert_eq!(raw_machine_name(&OsKind::Linux, "x86_64"), "x86_64");
    }

    #[test]
    fn test_supported_platforms() {
        let supported = [
            HostPlatform::new(OsKind::Windows, Arch::X86_64),
            HostPlatform::new(OsKind::Linux, Arch::X86_64),
            HostPlatform::new(OsKind::Darwin, Arch::X86_64),
            HostPlatform::new(OsKind::Darwin, Arch::Arm64),
        ];
        for platform in supported {
            assert!(platform.is_supported(), "{platform} should be supported");
        }

        let unsupported = [
            HostPlatform::new(OsKind::Linux, Arch::Arm64),
            HostPlatform::new(OsKind::Windows, Arch::Arm64),
            HostPlatform::new(OsKind::Linux, Arch::normalize("aarch64")),
        ];
        for platform in unsupported {
            assert!(!platform.is_supported(), "{platform} should be unsupported");
        }
    }

    #[test]
    fn test_executable_name_extension() {
        let windows = HostPlatform::new(OsKind::Windows, Arch::X86_64);
        let linux = HostPlatform::new(OsKind::Linux, Arch::X86_64);
        let darwin = HostPlatform::new(OsKind::Darwin, Arch::Arm64);

        assert_eq!(windows.executable_name("backend"), "backend.exe");
        assert_eq!(linux.executable_name("backend"), "backend");
        assert_eq!(darwin.executable_name("backend"), "backend");
    }

    #[test]
    fn test_detect_is_consistent_with_target() {
        let platform = HostPlatform::detect();
        assert_eq!(platform.os, OsKind::current());
    }
}
