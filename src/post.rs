use log::*;

use std::fs;
use std::io;
use std::path::Path;

pub const DEFAULT_SCRIPT: &str = "install.sh";

/// Marks `root/script` executable. Returns `false` if the script does not exist.
pub fn mark_executable(root: impl AsRef<Path>, script: &str) -> io::Result<bool> {
    let path = root.as_ref().join(script);
    if !path.is_file() {
        warn!(
            "'{}' not found. Ensure it was extracted correctly.",
            path.display()
        );
        return Ok(false);
    }

    set_executable(&path)?;
    info!("  '{}' is now executable.", path.display());
    Ok(true)
}

#[cfg(unix)]
fn set_executable(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut permissions = fs::metadata(path)?.permissions();
    permissions.set_mode(0o755);
    fs::set_permissions(path, permissions)
}

#[cfg(not(unix))]
fn set_executable(path: &Path) -> io::Result<()> {
    // no executable bit to set, just make sure it is there
    fs::metadata(path).map(|_| ())
}
