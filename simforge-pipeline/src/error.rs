//! Error types for simforge-pipeline.

use std::path::PathBuf;

use thiserror::Error;

use simforge_renderer::RenderError;

/// All errors that can arise inside a single pipeline phase.
///
/// Phase errors are recorded in the [`crate::report::PipelineReport`] rather
/// than propagated out of the orchestrator; only plan validation aborts a run
/// before it starts.
#[derive(Debug, Error)]
pub enum PhaseError {
    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An error from the rendering engine.
    #[error("render error: {0}")]
    Render(#[from] RenderError),

    /// An external tool could not be observed to completion.
    #[error("tool error: {0}")]
    Tool(#[from] crate::toolchain::ToolError),

    /// One or more per-file copy failures during staging.
    #[error("failed to copy {failed} of {attempted} static files: {detail}")]
    Copy {
        failed: usize,
        attempted: usize,
        detail: String,
    },
}

/// Convenience constructor for [`PhaseError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> PhaseError {
    PhaseError::Io {
        path: path.into(),
        source,
    }
}
