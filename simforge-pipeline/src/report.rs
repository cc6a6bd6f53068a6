//! Phase and run report types.
//!
//! Every run produces a [`PipelineReport`] with exactly one entry per phase
//! in pipeline order, whatever happened — the report is the caller's only
//! structured view of partial failure.

use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;

// ---------------------------------------------------------------------------
// Phase
// ---------------------------------------------------------------------------

/// The six ordered phases of one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Clean,
    Stage,
    Render,
    Configure,
    Build,
    Run,
}

impl Phase {
    /// All phases in pipeline order.
    pub fn all() -> &'static [Phase] {
        &[
            Phase::Clean,
            Phase::Stage,
            Phase::Render,
            Phase::Configure,
            Phase::Build,
            Phase::Run,
        ]
    }

    /// Best-effort phases never halt the pipeline, even under a strict
    /// policy. Clean is best-effort: a missing or undeletable workspace is
    /// recoverable by the phases that follow.
    pub fn is_best_effort(self) -> bool {
        matches!(self, Phase::Clean)
    }

    /// Phases that drive the external toolchain.
    pub fn is_toolchain(self) -> bool {
        matches!(self, Phase::Configure | Phase::Build | Phase::Run)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Clean => "clean",
            Phase::Stage => "stage",
            Phase::Render => "render",
            Phase::Configure => "configure",
            Phase::Build => "build",
            Phase::Run => "run",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// Per-phase report
// ---------------------------------------------------------------------------

/// Outcome of one phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum PhaseStatus {
    Succeeded,
    Failed { detail: String },
    /// Not attempted because an earlier required phase failed under a
    /// halt-on-failure policy.
    Skipped,
}

impl PhaseStatus {
    pub fn is_failed(&self) -> bool {
        matches!(self, PhaseStatus::Failed { .. })
    }
}

/// Captured command line and streams of a toolchain invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolReport {
    pub command: String,
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

/// One phase's entry in the run report.
#[derive(Debug, Clone, Serialize)]
pub struct PhaseReport {
    pub phase: Phase,
    #[serde(flatten)]
    pub status: PhaseStatus,
    pub duration_ms: u64,
    /// Present only for toolchain phases that actually spawned a process.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool: Option<ToolReport>,
}

// ---------------------------------------------------------------------------
// Run report
// ---------------------------------------------------------------------------

/// Full structured outcome of one orchestrator run.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineReport {
    pub project: String,
    pub workspace: PathBuf,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// One entry per phase attempted (or skipped), in pipeline order.
    pub phases: Vec<PhaseReport>,
    /// Path of the built executable; set only when the build phase succeeded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifact: Option<PathBuf>,
}

impl PipelineReport {
    /// True when no phase failed or was skipped.
    pub fn succeeded(&self) -> bool {
        self.phases
            .iter()
            .all(|p| matches!(p.status, PhaseStatus::Succeeded))
    }

    /// Phases that reported failure, in pipeline order.
    pub fn failed_phases(&self) -> Vec<Phase> {
        self.phases
            .iter()
            .filter(|p| p.status.is_failed())
            .map(|p| p.phase)
            .collect()
    }

    pub fn phase(&self, phase: Phase) -> Option<&PhaseReport> {
        self.phases.iter().find(|p| p.phase == phase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_order_is_fixed() {
        let names: Vec<String> = Phase::all().iter().map(|p| p.to_string()).collect();
        assert_eq!(
            names,
            vec!["clean", "stage", "render", "configure", "build", "run"]
        );
    }

    #[test]
    fn only_clean_is_best_effort() {
        let best_effort: Vec<Phase> = Phase::all()
            .iter()
            .copied()
            .filter(|p| p.is_best_effort())
            .collect();
        assert_eq!(best_effort, vec![Phase::Clean]);
    }

    #[test]
    fn report_serializes_with_flattened_status() {
        let report = PhaseReport {
            phase: Phase::Configure,
            status: PhaseStatus::Failed {
                detail: "exit code 1".to_string(),
            },
            duration_ms: 42,
            tool: Some(ToolReport {
                command: "cmake -S .sim -B .sim/build".to_string(),
                exit_code: Some(1),
                stdout: String::new(),
                stderr: "CMake Error".to_string(),
            }),
        };
        let json = serde_json::to_value(&report).expect("serialize");
        assert_eq!(json["phase"], "configure");
        assert_eq!(json["status"], "failed");
        assert_eq!(json["detail"], "exit code 1");
        assert_eq!(json["tool"]["exit_code"], 1);
    }

    #[test]
    fn succeeded_requires_every_phase_green() {
        let phase = |phase, status| PhaseReport {
            phase,
            status,
            duration_ms: 0,
            tool: None,
        };
        let now = Utc::now();
        let mut report = PipelineReport {
            project: "drone".to_string(),
            workspace: PathBuf::from("/w/.sim"),
            started_at: now,
            finished_at: now,
            phases: vec![
                phase(Phase::Clean, PhaseStatus::Succeeded),
                phase(Phase::Stage, PhaseStatus::Succeeded),
            ],
            artifact: None,
        };
        assert!(report.succeeded());

        report.phases.push(phase(
            Phase::Render,
            PhaseStatus::Failed {
                detail: "boom".to_string(),
            },
        ));
        assert!(!report.succeeded());
        assert_eq!(report.failed_phases(), vec![Phase::Render]);
    }
}
