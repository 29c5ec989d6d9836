use crate::constants;
use crate::error::{PswdError, Result};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;
use tempfile::NamedTempFile;

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

pub fn ensure_dir(path: &Path, mode: u32) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path).map_err(|e| PswdError::io("create directory", path, e))?;
        set_permissions(path, mode)?;
    }
    Ok(())
}

/// Create the parent directory of `path` if it has one and it is missing.
pub fn ensure_parent(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            ensure_dir(parent, constants::ASSETS_DIR_MODE)
        }
        _ => Ok(()),
    }
}

pub fn set_permissions(path: &Path, mode: u32) -> Result<()> {
    #[cfg(unix)]
    {
        let perm = fs::Permissions::from_mode(mode);
        fs::set_permissions(path, perm).map_err(|e| PswdError::io("set permissions on", path, e))?;
    }
    #[cfg(not(unix))]
    let _ = (path, mode);
    Ok(())
}

/// Replace `path` with `content` via a temp file in the same directory and a rename.
///
/// A crash leaves either the old file or the new one, never a truncated mix.
pub fn write_atomic(path: &Path, content: &[u8], mode: u32) -> Result<()> {
    let tmp = staged(path, content, mode)?;
    tmp.persist(path)
        .map_err(|e| PswdError::io("persist", path, e.error))?;
    Ok(())
}

/// Like [`write_atomic`], but never replaces an existing file.
///
/// Returns `false` and leaves the existing file untouched if `path` already exists.
pub fn write_new(path: &Path, content: &[u8], mode: u32) -> Result<bool> {
    let tmp = staged(path, content, mode)?;
    match tmp.persist_noclobber(path) {
        Ok(_) => Ok(true),
        Err(e) if e.error.kind() == ErrorKind::AlreadyExists => Ok(false),
        Err(e) => Err(PswdError::io("persist", path, e.error)),
    }
}

/// Temp file beside `path` holding `content` with permissions `mode`, synced to disk.
fn staged(path: &Path, content: &[u8], mode: u32) -> Result<NamedTempFile> {
    ensure_parent(path)?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::Builder::new()
        .prefix(".pswd-")
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(|e| PswdError::io("create temp file in", dir, e))?;
    tmp.write_all(content)
        .map_err(|e| PswdError::io("write temp file for", path, e))?;
    tmp.as_file()
        .sync_all()
        .map_err(|e| PswdError::io("sync temp file for", path, e))?;

    #[cfg(unix)]
    tmp.as_file()
        .set_permissions(fs::Permissions::from_mode(mode))
        .map_err(|e| PswdError::io("set permissions on temp file for", path, e))?;
    #[cfg(not(unix))]
    let _ = mode;

    Ok(tmp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_atomic_creates_parents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a/b/file.json");
        write_atomic(&path, b"{}", 0o600).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "{}");
    }

    #[test]
    fn test_write_atomic_replaces_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("file.json");
        fs::write(&path, "old content that is longer").unwrap();
        write_atomic(&path, b"new", 0o600).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
        let leftovers: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_write_atomic_sets_mode() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("secret");
        write_atomic(&path, b"x", 0o600).unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o600);
    }

    #[test]
    fn test_write_new_keeps_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("private_key.pem");
        fs::write(&path, "first").unwrap();
        assert!(!write_new(&path, b"second", 0o600).unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "first");
        let leftovers = fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(leftovers, 1);
    }

    #[test]
    fn test_write_new_creates_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("assets/private_key.pem");
        assert!(write_new(&path, b"key", 0o600).unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "key");
    }
}
