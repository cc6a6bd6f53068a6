//! Atomic writer for rendered artifacts.
//!
//! Rendered content lands at its final path via write-to-tmp + rename, so a
//! failed render or a crash mid-write never leaves a partial artifact for
//! the toolchain to pick up.

use std::path::{Path, PathBuf};

use crate::error::{io_err, PhaseError};

/// Atomically write one rendered artifact, overwriting any existing file.
pub fn atomic_write(path: &Path, content: &str) -> Result<(), PhaseError> {
    let tmp = PathBuf::from(format!("{}.simforge.tmp", path.display()));
    atomic_write_with_tmp(path, content, &tmp)
}

fn atomic_write_with_tmp(path: &Path, content: &str, tmp: &Path) -> Result<(), PhaseError> {
    // Normalise line endings to LF before writing.
    let normalized = content.replace("\r\n", "\n");

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
    }
    std::fs::write(tmp, normalized).map_err(|e| io_err(tmp, e))?;

    // Rename is atomic on POSIX; clean up the tmp file if it fails.
    if let Err(e) = std::fs::rename(tmp, path) {
        let _ = std::fs::remove_file(tmp);
        return Err(io_err(path, e));
    }

    tracing::info!("wrote: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn writes_content_to_final_path() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("CMakeLists.txt");
        atomic_write(&path, "project(drone)\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "project(drone)\n");
    }

    #[test]
    fn overwrites_existing_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("main.cpp");
        atomic_write(&path, "v1").unwrap();
        atomic_write(&path, "v2").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "v2");
    }

    #[test]
    fn tmp_file_removed_after_write() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("clean.txt");
        atomic_write(&path, "data").unwrap();
        let tmp_path = PathBuf::from(format!("{}.simforge.tmp", path.display()));
        assert!(!tmp_path.exists(), ".simforge.tmp must be cleaned up");
    }

    #[test]
    fn creates_parent_directories() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested").join("dir").join("out.txt");
        atomic_write(&path, "content").unwrap();
        assert!(path.exists());
    }

    #[test]
    fn crlf_content_is_normalised_to_lf() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("norm.txt");
        atomic_write(&path, "line1\r\nline2\r\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "line1\nline2\n");
    }

    #[test]
    #[cfg(unix)]
    fn rename_failure_leaves_original_and_cleans_tmp() {
        use std::os::unix::fs::PermissionsExt;

        let root = TempDir::new().unwrap();
        let readonly_dir = root.path().join("readonly");
        fs::create_dir_all(&readonly_dir).unwrap();

        let path = readonly_dir.join("file.txt");
        fs::write(&path, "original").unwrap();

        let mut perms = fs::metadata(&readonly_dir).unwrap().permissions();
        perms.set_mode(0o555);
        fs::set_permissions(&readonly_dir, perms).unwrap();

        let tmp_dir = TempDir::new().unwrap();
        let tmp_path = tmp_dir.path().join("file.txt.simforge.tmp");

        atomic_write_with_tmp(&path, "new content", &tmp_path)
            .expect_err("rename should fail on readonly dir");

        assert_eq!(fs::read_to_string(&path).unwrap(), "original");
        assert!(!tmp_path.exists(), ".simforge.tmp should be cleaned up");

        let mut perms = fs::metadata(&readonly_dir).unwrap().permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&readonly_dir, perms).unwrap();
    }
}
