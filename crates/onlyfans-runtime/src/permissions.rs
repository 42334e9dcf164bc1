//! Executable permission fix-up for the backend binary.
//!
//! Bundled binaries can lose their execute bit when a plugin archive is
//! unpacked. On unix the owner-execute bit is restored, leaving every other
//! mode bit alone. Windows has no such bit.

use onlyfans_core::OsKind;
use std::io;
use std::path::Path;
use tracing::warn;

/// Outcome of [`ensure_executable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionFix {
    /// Platform has no executable bit (Windows).
    NotApplicable,
    /// The file does not exist; nothing to fix.
    Missing,
    /// The owner-execute bit was already set.
    AlreadyExecutable,
    /// The owner-execute bit was added.
    Fixed { old_mode: u32, new_mode: u32 },
}

/// Owner execute permission bit.
#[cfg(unix)]
const OWNER_EXEC: u32 = 0o100;

/// Ensure the binary at `path` is executable on `os`.
///
/// Idempotent: a second call after a fix reports `AlreadyExecutable`.
/// Errors reading or changing the mode propagate to the caller.
pub fn ensure_executable(os: &OsKind, path: &Path) -> io::Result<PermissionFix> {
    if os.is_windows() {
        return Ok(PermissionFix::NotApplicable);
    }
    if !path.exists() {
        return Ok(PermissionFix::Missing);
    }
    set_owner_exec(path)
}

#[cfg(unix)]
fn set_owner_exec(path: &Path) -> io::Result<PermissionFix> {
    use std::os::unix::fs::PermissionsExt;

    let metadata = std::fs::metadata(path)?;
    let old_mode = metadata.permissions().mode();
    if old_mode & OWNER_EXEC != 0 {
        return Ok(PermissionFix::AlreadyExecutable);
    }

    let new_mode = old_mode | OWNER_EXEC;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(new_mode))?;
    warn!(
        path = %path.display(),
        old_mode = %format!("{old_mode:o}"),
        new_mode = %format!("{new_mode:o}"),
        "Backend binary was not executable, added owner execute bit"
    );
    Ok(PermissionFix::Fixed { old_mode, new_mode })
}

#[cfg(not(unix))]
fn set_owner_exec(path: &Path) -> io::Result<PermissionFix> {
    // Non-unix, non-Windows targets have no mode bits to fix.
    warn!(path = %path.display(), "Cannot set executable bit on this platform");
    Ok(PermissionFix::NotApplicable)
}

/// Whether `path` has its owner-execute bit set. Always `true` off unix.
pub fn is_executable(path: &Path) -> io::Result<bool> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = std::fs::metadata(path)?.permissions().mode();
        Ok(mode & OWNER_EXEC != 0)
    }

    #[cfg(not(unix))]
    {
        std::fs::metadata(path).map(|_| true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_windows_is_noop() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("backend.exe");
        fs::write(&path, "binary").unwrap();
        let before = fs::metadata(&path).unwrap().permissions();

        let result = ensure_executable(&OsKind::Windows, &path).unwrap();
        assert_eq!(result, PermissionFix::NotApplicable);
        assert_eq!(fs::metadata(&path).unwrap().permissions(), before);

        // Missing file does not raise either
        let result = ensure_executable(&OsKind::Windows, &dir.path().join("nope.exe"));
        assert_eq!(result.unwrap(), PermissionFix::NotApplicable);
    }

    #[test]
    fn test_missing_file_is_noop() {
        let result = ensure_executable(&OsKind::Linux, Path::new("/nonexistent/backend"));
        assert_eq!(result.unwrap(), PermissionFix::Missing);
    }

    #[cfg(unix)]
    #[test]
    fn test_adds_owner_exec_and_preserves_other_bits() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("backend");
        fs::write(&path, "#!/bin/sh\nexit 0").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

        let result = ensure_executable(&OsKind::Linux, &path).unwrap();
        assert!(matches!(result, PermissionFix::Fixed { .. }));

        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o744);
        assert!(is_executable(&path).unwrap());
    }

    #[cfg(unix)]
    #[test]
    fn test_is_idempotent() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("backend");
        fs::write(&path, "#!/bin/sh\nexit 0").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o600)).unwrap();

        ensure_executable(&OsKind::Darwin, &path).unwrap();
        let second = ensure_executable(&OsKind::Darwin, &path).unwrap();
        assert_eq!(second, PermissionFix::AlreadyExecutable);

        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o700);
        assert!(is_executable(&path).unwrap());
    }

    #[cfg(unix)]
    #[test]
    fn test_already_executable_untouched() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("backend");
        fs::write(&path, "#!/bin/sh\nexit 0").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o750)).unwrap();

        let result = ensure_executable(&OsKind::Linux, &path).unwrap();
        assert_eq!(result, PermissionFix::AlreadyExecutable);
        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o750);
    }
}
