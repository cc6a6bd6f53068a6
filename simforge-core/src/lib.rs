//! Simforge core library — domain types, run-plan manifest, errors.
//!
//! Public API surface:
//! - [`types`] — newtypes and the run-plan structs
//! - [`error`] — [`ConfigError`]
//! - [`manifest`] — optional `simforge.yaml` loading

pub mod error;
pub mod manifest;
pub mod types;

pub use error::ConfigError;
pub use types::{EntryPoint, ProjectName, RunPlan, ToolchainConfig, WorkspaceConfig};
