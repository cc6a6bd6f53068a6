//! Error types for simforge-renderer.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from template rendering operations.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Tera template engine error (parse failure, undefined variable, ...).
    #[error("template engine error: {0}")]
    Tera(#[from] tera::Error),

    /// JSON serialization error (building the tera context).
    #[error("context serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The template source directory does not exist or is not a directory.
    #[error("templates directory not found at {path}")]
    TemplatesDirMissing { path: PathBuf },

    /// A template name resolved to nothing in the source directory.
    ///
    /// This is a fatal configuration error, never a silent no-op.
    #[error("template '{name}' not found in {dir}")]
    TemplateNotFound { name: String, dir: PathBuf },

    /// Filesystem error while loading templates.
    #[error("template io error at {path}: {source}")]
    Io { path: PathBuf, source: std::io::Error },
}
