//! Optional `simforge.yaml` run-plan manifest.
//!
//! # File layout
//!
//! ```text
//! <source_root>/
//!   simforge.yaml       (optional — every field optional)
//!   templates/          (templates + static support sources)
//! ```
//!
//! Resolution order for every plan field: CLI flag, then manifest value,
//! then built-in default. The manifest never wins over an explicit flag.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Manifest file name, looked up directly under the source root.
pub const MANIFEST_FILE: &str = "simforge.yaml";

/// Deserialized `simforge.yaml`. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Project / executable name.
    pub project: Option<String>,
    /// Static support files copied verbatim from `templates/`.
    pub files: Option<Vec<String>>,
    /// Entry-point file name (its template is `<main>.tera`).
    pub main: Option<String>,
    /// Exit code substituted into the entry-point template.
    pub return_code: Option<String>,
    /// CMake generator backend.
    pub generator: Option<String>,
    /// CMake build type.
    pub build_type: Option<String>,
}

/// Load `<source_root>/simforge.yaml` if present.
///
/// A missing manifest is `Ok(None)` — the built-in defaults apply. A manifest
/// that exists but fails to parse is a hard [`ConfigError::Parse`]: silently
/// ignoring a malformed manifest would stage the wrong project.
pub fn load(source_root: &Path) -> Result<Option<Manifest>, ConfigError> {
    let path = source_root.join(MANIFEST_FILE);
    if !path.exists() {
        return Ok(None);
    }
    let text = std::fs::read_to_string(&path)?;
    let manifest = serde_yaml::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.clone(),
        source,
    })?;
    Ok(Some(manifest))
}
