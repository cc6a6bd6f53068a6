//! # simforge-pipeline
//!
//! Workspace staging and toolchain orchestration: reset and repopulate the
//! disposable workspace, render build artifacts, then configure, build, and
//! run via the external toolchain.
//!
//! Call [`orchestrator::run`] with an assembled `RunPlan`; inspect the
//! returned [`PipelineReport`] for per-phase outcomes.

pub mod copier;
pub mod error;
pub mod orchestrator;
pub mod report;
pub mod stager;
pub mod toolchain;
pub mod writer;

pub use error::PhaseError;
pub use orchestrator::{run, RunOptions, RunScope};
pub use report::{Phase, PhaseReport, PhaseStatus, PipelineReport, ToolReport};
pub use toolchain::{invoke, ToolError, ToolOutput};
