//! Error types for simforge-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from plan construction and manifest loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Underlying I/O failure (file not found, permission denied, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parse error on load — includes file path and line context from serde_yaml.
    #[error("failed to parse manifest at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// The output root would destroy data simforge does not own.
    ///
    /// The workspace is deleted wholesale on every run, so it must never
    /// equal or contain the source root.
    #[error("output root {output} aliases source root {source_root}; refusing to stage")]
    OutputAliasesSource {
        output: PathBuf,
        source_root: PathBuf,
    },

    /// A run plan field failed validation (empty project name, no static files, ...).
    #[error("invalid run plan: {reason}")]
    InvalidPlan { reason: String },
}
