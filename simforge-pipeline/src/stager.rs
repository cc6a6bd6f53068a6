//! Workspace stager — reset and recreate the disposable output directory.
//!
//! The workspace must be reproducible from scratch on every run so stale
//! build artifacts from a previous configuration never leak in. Both
//! operations report failure to the caller; the orchestrator treats Clean as
//! best-effort and Stage as required.

use std::path::Path;

use crate::error::{io_err, PhaseError};

/// Delete `path` and everything under it.
///
/// A path that does not exist is success — there is nothing to clean.
/// All prior contents of `path` are irrecoverably destroyed.
pub fn reset_dir(path: &Path) -> Result<(), PhaseError> {
    match std::fs::remove_dir_all(path) {
        Ok(()) => {
            tracing::debug!("cleaned {}", path.display());
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(io_err(path, e)),
    }
}

/// Create a fresh directory at `path`, including missing parents.
///
/// Tolerates the directory already existing (a prior create that raced or a
/// Clean that could not fully delete).
pub fn create_dir(path: &Path) -> Result<(), PhaseError> {
    std::fs::create_dir_all(path).map_err(|e| io_err(path, e))?;
    tracing::debug!("created {}", path.display());
    Ok(())
}
