use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Where a planned file lands under the trash root: same path relative to
/// the scanned root.
pub fn trash_destination(root: &Path, trash_root: &Path, file: &Path) -> Result<PathBuf> {
    let rel = file.strip_prefix(root).with_context(|| {
        format!(
            "'{}' is not under scanned root '{}'",
            file.display(),
            root.display()
        )
    })?;
    Ok(trash_root.join(rel))
}

/// Move a planned file into the trash, recreating its relative directories
pub fn move_to_trash(root: &Path, trash_root: &Path, file: &Path) -> Result<PathBuf> {
    let destination = trash_destination(root, trash_root, file)?;

    if let Some(parent) = destination.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create trash dir: {}", parent.display()))?;
    }

    move_single_path(file, &destination)?;
    Ok(destination)
}

/// Move one file, falling back to copy + remove across filesystems
fn move_single_path(original: &Path, destination: &Path) -> Result<()> {
    if original.symlink_metadata().is_err() {
        anyhow::bail!("Path does not exist: {}", original.display());
    }

    match std::fs::rename(original, destination) {
        Ok(()) => return Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::CrossesDevices => {
            tracing::debug!(path = %original.display(), "rename crosses filesystems, copying");
        }
        Err(e) => {
            return Err(e).with_context(|| {
                format!(
                    "Failed to move '{}' to '{}'",
                    original.display(),
                    destination.display()
                )
            });
        }
    }

    std::fs::copy(original, destination).with_context(|| {
        format!(
            "Failed to copy '{}' to '{}'",
            original.display(),
            destination.display()
        )
    })?;
    std::fs::remove_file(original).with_context(|| {
        format!(
            "Copied to trash but failed to remove original: {}",
            original.display()
        )
    })?;

    Ok(())
}

/// Delete a file permanently; a file that is already gone counts as done
pub fn delete_file(path: &Path) -> Result<()> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).with_context(|| format!("Failed to remove file: {}", path.display())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_trash_destination_mirrors_tree() {
        let dest = trash_destination(
            Path::new("/srv/app"),
            Path::new("/tmp/trash"),
            Path::new("/srv/app/sub/a.log"),
        )
        .unwrap();
        assert_eq!(dest, PathBuf::from("/tmp/trash/sub/a.log"));
    }

    #[test]
    fn test_trash_destination_outside_root() {
        let result = trash_destination(
            Path::new("/srv/app"),
            Path::new("/tmp/trash"),
            Path::new("/etc/passwd"),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_move_to_trash_creates_parents() {
        let root = TempDir::new().unwrap();
        let trash = TempDir::new().unwrap();
        std::fs::create_dir_all(root.path().join("sub/deeper")).unwrap();
        let file = root.path().join("sub/deeper/a.log");
        std::fs::write(&file, "log").unwrap();

        let dest = move_to_trash(root.path(), trash.path(), &file).unwrap();

        assert_eq!(dest, trash.path().join("sub/deeper/a.log"));
        assert!(dest.exists());
        assert!(!file.exists());
    }

    #[test]
    fn test_move_missing_file_fails() {
        let root = TempDir::new().unwrap();
        let trash = TempDir::new().unwrap();
        let result = move_to_trash(root.path(), trash.path(), &root.path().join("gone.log"));
        assert!(result.is_err());
    }

    #[test]
    fn test_failed_rename_leaves_no_copy_behind() {
        let root = TempDir::new().unwrap();
        let trash = TempDir::new().unwrap();
        let file = root.path().join("a.log");
        std::fs::write(&file, "log").unwrap();
        // Occupied by a non-empty directory, so the rename itself fails
        std::fs::create_dir_all(trash.path().join("a.log/inner")).unwrap();

        let err = move_to_trash(root.path(), trash.path(), &file).unwrap_err();

        assert!(format!("{:#}", err).contains("Failed to move"));
        assert!(file.exists());
        assert!(trash.path().join("a.log").is_dir());
    }

    #[test]
    fn test_delete_missing_file_ok() {
        let dir = TempDir::new().unwrap();
        assert!(delete_file(&dir.path().join("gone.log")).is_ok());
    }
}
