//! Domain types for the simforge run plan.
//!
//! All path fields use `PathBuf`; never `&str` or `String` for filesystem paths.
//! A [`RunPlan`] is constructed once at startup and never mutated afterwards;
//! no component reads the process environment or working directory on its own.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A strongly-typed name for the staged native project.
///
/// Doubles as the file name of the built executable under `build/`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectName(pub String);

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for ProjectName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ProjectName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Workspace configuration
// ---------------------------------------------------------------------------

/// Paths and identity for one staging run.
///
/// `output_root` is a disposable directory fully owned by the run: it is
/// deleted and recreated every time, so [`WorkspaceConfig::validate`] refuses
/// any layout where deleting it could touch the source tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceConfig {
    /// Directory containing `templates/` (template + static-file source tree).
    pub source_root: PathBuf,
    /// Disposable workspace directory, conventionally `<source_root>/.sim`.
    pub output_root: PathBuf,
    /// Name of the generated project and of the built executable.
    pub project: ProjectName,
}

impl WorkspaceConfig {
    /// `<source_root>/templates` — where templates and static files live.
    pub fn templates_dir(&self) -> PathBuf {
        self.source_root.join("templates")
    }

    /// `<output_root>/build` — the toolchain's build directory.
    pub fn build_dir(&self) -> PathBuf {
        self.output_root.join("build")
    }

    /// `<output_root>/build/<project>` — the built executable.
    ///
    /// Only meaningful after a successful build phase.
    pub fn artifact_path(&self) -> PathBuf {
        self.build_dir().join(&self.project.0)
    }

    /// Reject output roots whose deletion would destroy the source tree.
    ///
    /// An output root *inside* the source root (the default `.sim` layout)
    /// is fine; the output root being equal to, or an ancestor of, the
    /// source root is not.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.output_root == self.source_root || self.source_root.starts_with(&self.output_root)
        {
            return Err(ConfigError::OutputAliasesSource {
                output: self.output_root.clone(),
                source_root: self.source_root.clone(),
            });
        }
        if self.project.0.is_empty() {
            return Err(ConfigError::InvalidPlan {
                reason: "project name is empty".to_string(),
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Toolchain configuration
// ---------------------------------------------------------------------------

/// External-tool selection and build parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolchainConfig {
    /// C compiler handed to the configure step.
    pub cc: String,
    /// C++ compiler handed to the configure step.
    pub cxx: String,
    /// The configure/build driver executable.
    pub cmake: String,
    /// Generator backend (`Ninja` by default).
    pub generator: String,
    /// Build profile (`Release` by default).
    pub build_type: String,
    /// Per-invocation deadline; `None` means block until the tool exits.
    pub timeout: Option<Duration>,
}

impl ToolchainConfig {
    /// Build a toolchain config from `$CC` / `$CXX`, defaulting to the
    /// platform-standard `cc` / `c++` when unset or empty.
    ///
    /// This is the only place simforge reads the process environment.
    pub fn from_env() -> Self {
        let cc = std::env::var("CC")
            .ok()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| "cc".to_string());
        let cxx = std::env::var("CXX")
            .ok()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| "c++".to_string());
        Self::with_compilers(cc, cxx)
    }

    /// Explicit-compiler constructor; tests use this instead of `from_env`.
    pub fn with_compilers(cc: impl Into<String>, cxx: impl Into<String>) -> Self {
        ToolchainConfig {
            cc: cc.into(),
            cxx: cxx.into(),
            cmake: "cmake".to_string(),
            generator: "Ninja".to_string(),
            build_type: "Release".to_string(),
            timeout: None,
        }
    }
}

impl Default for ToolchainConfig {
    fn default() -> Self {
        Self::with_compilers("cc", "c++")
    }
}

// ---------------------------------------------------------------------------
// Entry point + run plan
// ---------------------------------------------------------------------------

/// The generated entry-point source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryPoint {
    /// Output file name in the workspace; its template is `<file_name>.tera`.
    pub file_name: String,
    /// Exit code the generated program returns, as template text.
    pub return_code: String,
}

impl Default for EntryPoint {
    fn default() -> Self {
        EntryPoint {
            file_name: "main.cpp".to_string(),
            return_code: "0".to_string(),
        }
    }
}

/// Everything one orchestrator run needs, assembled once at startup.
#[derive(Debug, Clone)]
pub struct RunPlan {
    pub workspace: WorkspaceConfig,
    pub toolchain: ToolchainConfig,
    /// Support sources copied verbatim from the templates directory, in a
    /// fixed order for reproducibility.
    pub static_files: Vec<String>,
    pub entry_point: EntryPoint,
}

impl RunPlan {
    /// Validate the assembled plan before any filesystem work happens.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.workspace.validate()?;
        if self.entry_point.file_name.is_empty() {
            return Err(ConfigError::InvalidPlan {
                reason: "entry point file name is empty".to_string(),
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
