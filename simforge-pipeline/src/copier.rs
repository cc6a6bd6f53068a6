//! Static-file copier — verbatim, name-preserving, per-file independent.

use std::path::Path;

/// Outcome of one attempted copy. Copies are independent, not transactional:
/// a failed file never prevents attempting the remaining files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied { file: String },
    Failed { file: String, error: String },
}

impl CopyOutcome {
    pub fn file(&self) -> &str {
        match self {
            CopyOutcome::Copied { file } | CopyOutcome::Failed { file, .. } => file,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, CopyOutcome::Failed { .. })
    }
}

/// Copy each named file byte-for-byte from `templates_dir` into
/// `output_root`, preserving the file name. Returns one outcome per input
/// file, in input order.
pub fn copy_static_files(
    templates_dir: &Path,
    output_root: &Path,
    files: &[String],
) -> Vec<CopyOutcome> {
    files
        .iter()
        .map(|file| {
            let src = templates_dir.join(file);
            let dst = output_root.join(file);
            match std::fs::copy(&src, &dst) {
                Ok(_) => {
                    tracing::debug!("copied {} -> {}", src.display(), dst.display());
                    CopyOutcome::Copied { file: file.clone() }
                }
                Err(e) => {
                    tracing::warn!("copy of {} failed: {e}", src.display());
                    CopyOutcome::Failed {
                        file: file.clone(),
                        error: e.to_string(),
                    }
                }
            }
        })
        .collect()
}
