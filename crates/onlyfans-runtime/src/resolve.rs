//! Backend binary path resolution.
//!
//! Two candidate locations are checked, in order:
//! 1. `<install-prefix>/<binary-name>[.exe]` (installed alongside the host)
//! 2. `<plugin-dir>/<arch>/<os>/<binary-name>[.exe]` (bundled with the plugin)
//!
//! Resolution is purely local; nothing is downloaded or looked up remotely.

use onlyfans_core::HostPlatform;
use std::path::{Path, PathBuf};
use tracing::{debug, error};

/// Inputs for resolving the backend path.
#[derive(Debug, Clone)]
pub struct BinaryLocation<'a> {
    pub platform: &'a HostPlatform,
    pub install_prefix: &'a Path,
    pub plugin_dir: &'a Path,
    pub binary_name: &'a str,
}

impl BinaryLocation<'_> {
    /// Candidate installed alongside the host.
    pub fn primary_path(&self) -> PathBuf {
        absolute(
            &self
                .install_prefix
                .join(self.platform.executable_name(self.binary_name)),
        )
    }

    /// Candidate bundled with the plugin, keyed by architecture and OS.
    pub fn fallback_path(&self) -> PathBuf {
        absolute(
            &self
                .plugin_dir
                .join(self.platform.arch.as_str())
                .join(self.platform.os.as_str())
                .join(self.platform.executable_name(self.binary_name)),
        )
    }

    /// First existing candidate, without logging.
    pub fn find(&self) -> Option<PathBuf> {
        [self.primary_path(), self.fallback_path()]
            .into_iter()
            .find(|candidate| candidate.exists())
    }

    /// Return the first candidate that exists.
    ///
    /// When neither exists, the fallback path is returned anyway and an error
    /// is logged; launching it will fail at the OS level.
    pub fn resolve(&self) -> PathBuf {
        let primary = self.primary_path();
        if primary.exists() {
            debug!(path = %primary.display(), "Using backend from install prefix");
            return primary;
        }

        let fallback = self.fallback_path();
        if fallback.exists() {
            debug!(path = %fallback.display(), "Using bundled backend");
        } else {
            error!(
                binary = %self.binary_name,
                platform = %self.platform,
                primary = %primary.display(),
                path = %fallback.display(),
                "Could not find backend binary"
            );
        }
        fallback
    }
}

/// Resolve the backend binary path for `platform`.
pub fn resolve_binary_path(
    platform: &HostPlatform,
    install_prefix: &Path,
    plugin_dir: &Path,
    binary_name: &str,
) -> PathBuf {
    BinaryLocation {
        platform,
        install_prefix,
        plugin_dir,
        binary_name,
    }
    .resolve()
}

/// Make `path` absolute, resolving symlinks when it exists.
fn absolute(path: &Path) -> PathBuf {
    path.canonicalize()
        .or_else(|_| std::path::absolute(path))
        .unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use onlyfans_core::{Arch, OsKind};
    use std::fs;
    use tempfile::TempDir;

    const NAME: &str = "curaengine_plugin_onlyfans";

    fn platforms() -> Vec<HostPlatform> {
        vec![
            HostPlatform::new(OsKind::Windows, Arch::normalize("AMD64")),
            HostPlatform::new(OsKind::Linux, Arch::X86_64),
            HostPlatform::new(OsKind::Darwin, Arch::X86_64),
            HostPlatform::new(OsKind::Darwin, Arch::Arm64),
        ]
    }

    #[test]
    fn test_fallback_path_layout_per_platform() {
        let prefix = TempDir::new().unwrap();
        let plugin = TempDir::new().unwrap();

        for platform in platforms() {
            let path = resolve_binary_path(&platform, prefix.path(), plugin.path(), NAME);

            let file_name = path.file_name().unwrap().to_string_lossy().into_owned();
            if platform.os.is_windows() {
                assert_eq!(file_name, format!("{NAME}.exe"));
            } else {
                assert_eq!(file_name, NAME);
            }

            let os_dir = path.parent().unwrap();
            let arch_dir = os_dir.parent().unwrap();
            assert_eq!(os_dir.file_name().unwrap(), platform.os.as_str());
            assert_eq!(arch_dir.file_name().unwrap(), platform.arch.as_str());
        }
    }

    #[test]
    fn test_amd64_fallback_uses_x86_64_directory() {
        let prefix = TempDir::new().unwrap();
        let plugin = TempDir::new().unwrap();
        let platform = HostPlatform::new(OsKind::Windows, Arch::normalize("AMD64"));

        let path = resolve_binary_path(&platform, prefix.path(), plugin.path(), NAME);
        assert!(path.ends_with(format!("x86_64/Windows/{NAME}.exe")));
    }

    #[test]
    fn test_primary_wins_when_present() {
        let prefix = TempDir::new().unwrap();
        let plugin = TempDir::new().unwrap();
        let platform = HostPlatform::new(OsKind::Linux, Arch::X86_64);

        let bundled = plugin.path().join("x86_64").join("Linux");
        fs::create_dir_all(&bundled).unwrap();
        fs::write(bundled.join(NAME), "bundled").unwrap();
        fs::write(prefix.path().join(NAME), "installed").unwrap();

        let path = resolve_binary_path(&platform, prefix.path(), plugin.path(), NAME);
        assert_eq!(fs::read_to_string(path).unwrap(), "installed");
    }

    #[test]
    fn test_bundled_used_when_primary_missing() {
        let prefix = TempDir::new().unwrap();
        let plugin = TempDir::new().unwrap();
        let platform = HostPlatform::new(OsKind::Darwin, Arch::Arm64);

        let bundled = plugin.path().join("arm64").join("Darwin");
        fs::create_dir_all(&bundled).unwrap();
        fs::write(bundled.join(NAME), "bundled").unwrap();

        let path = resolve_binary_path(&platform, prefix.path(), plugin.path(), NAME);
        assert!(path.exists());
        assert_eq!(fs::read_to_string(path).unwrap(), "bundled");
    }

    #[test]
    fn test_find_does_not_invent_paths() {
        let prefix = TempDir::new().unwrap();
        let plugin = TempDir::new().unwrap();
        let platform = HostPlatform::new(OsKind::Linux, Arch::X86_64);
        let location = BinaryLocation {
            platform: &platform,
            install_prefix: prefix.path(),
            plugin_dir: plugin.path(),
            binary_name: NAME,
        };
        assert_eq!(location.find(), None);

        fs::write(prefix.path().join(NAME), "installed").unwrap();
        assert_eq!(location.find(), Some(location.primary_path()));
    }

    #[test]
    fn test_missing_everywhere_returns_absolute_fallback() {
        let platform = HostPlatform::new(OsKind::Linux, Arch::X86_64);
        let path = resolve_binary_path(
            &platform,
            Path::new("relative/prefix"),
            Path::new("relative/plugin"),
            NAME,
        );

        assert!(path.is_absolute());
        assert!(!path.exists());
        assert!(path.ends_with(format!("relative/plugin/x86_64/Linux/{NAME}")));
    }
}
