//! Pipeline orchestrator — Clean, Stage, Render, Configure, Build, Run.
//!
//! Every phase produces a typed result aggregated into a
//! [`PipelineReport`]; nothing is thrown across phases. By default the
//! pipeline attempts all six phases exactly once, in order, regardless of
//! individual failures — the captured output is the operator's feedback
//! channel. With [`RunOptions::halt_on_failure`] a failed required phase
//! marks the remaining phases `Skipped` instead.

use std::time::Instant;

use chrono::Utc;

use simforge_core::{ConfigError, RunPlan};
use simforge_renderer::{BuildDescriptorContext, EntryPointContext, TemplateEngine};

use crate::copier;
use crate::error::PhaseError;
use crate::report::{Phase, PhaseReport, PhaseStatus, PipelineReport, ToolReport};
use crate::stager;
use crate::toolchain;
use crate::writer;

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// How much of the pipeline to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunScope {
    /// All six phases.
    Full,
    /// Clean, Stage, Render only — populate the workspace without driving
    /// the toolchain.
    StageOnly,
}

/// Orchestrator policy knobs.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub scope: RunScope,
    /// Stop attempting phases once a required (non-best-effort) phase fails.
    pub halt_on_failure: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        RunOptions {
            scope: RunScope::Full,
            halt_on_failure: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

/// Run the pipeline for `plan`.
///
/// Fails fast only on an invalid plan; phase failures are recorded in the
/// returned report.
pub fn run(plan: &RunPlan, opts: &RunOptions) -> Result<PipelineReport, ConfigError> {
    plan.validate()?;

    let started_at = Utc::now();
    let phase_list: &[Phase] = match opts.scope {
        RunScope::Full => Phase::all(),
        RunScope::StageOnly => &Phase::all()[..3],
    };

    let mut phases = Vec::with_capacity(phase_list.len());
    let mut artifact = None;
    let mut halted = false;

    for &phase in phase_list {
        if halted {
            tracing::warn!("{phase}: skipped (earlier phase failed)");
            phases.push(PhaseReport {
                phase,
                status: PhaseStatus::Skipped,
                duration_ms: 0,
                tool: None,
            });
            continue;
        }

        let start = Instant::now();
        let (status, tool) = execute_phase(phase, plan);
        let duration_ms = start.elapsed().as_millis() as u64;

        match &status {
            PhaseStatus::Succeeded => {
                tracing::info!("{phase}: ok ({duration_ms} ms)");
                if phase == Phase::Build {
                    artifact = Some(plan.workspace.artifact_path());
                }
            }
            PhaseStatus::Failed { detail } => {
                tracing::error!("{phase}: failed: {detail}");
                surface_tool_output(&tool);
                if opts.halt_on_failure && !phase.is_best_effort() {
                    halted = true;
                }
            }
            PhaseStatus::Skipped => unreachable!("skips are handled before execution"),
        }

        phases.push(PhaseReport {
            phase,
            status,
            duration_ms,
            tool,
        });
    }

    Ok(PipelineReport {
        project: plan.workspace.project.0.clone(),
        workspace: plan.workspace.output_root.clone(),
        started_at,
        finished_at: Utc::now(),
        phases,
        artifact,
    })
}

/// Captured streams of a failed tool are the operator's only diagnostics.
fn surface_tool_output(tool: &Option<ToolReport>) {
    if let Some(t) = tool {
        if !t.stdout.is_empty() {
            tracing::error!("stdout:\n{}", t.stdout.trim_end());
        }
        if !t.stderr.is_empty() {
            tracing::error!("stderr:\n{}", t.stderr.trim_end());
        }
    }
}

// ---------------------------------------------------------------------------
// Phase bodies
// ---------------------------------------------------------------------------

fn execute_phase(phase: Phase, plan: &RunPlan) -> (PhaseStatus, Option<ToolReport>) {
    match phase {
        Phase::Clean => plain(stager::reset_dir(&plan.workspace.output_root)),
        Phase::Stage => plain(stage_phase(plan)),
        Phase::Render => plain(render_phase(plan)),
        Phase::Configure => tool_phase(&plan.toolchain.cmake, configure_args(plan), plan),
        Phase::Build => tool_phase(&plan.toolchain.cmake, build_args(plan), plan),
        Phase::Run => {
            let artifact = plan.workspace.artifact_path().display().to_string();
            tool_phase(&artifact, Vec::new(), plan)
        }
    }
}

fn plain(result: Result<(), PhaseError>) -> (PhaseStatus, Option<ToolReport>) {
    let status = match result {
        Ok(()) => PhaseStatus::Succeeded,
        Err(e) => PhaseStatus::Failed {
            detail: e.to_string(),
        },
    };
    (status, None)
}

/// Create the workspace directory and copy static files, attempting every
/// file even when one fails.
fn stage_phase(plan: &RunPlan) -> Result<(), PhaseError> {
    stager::create_dir(&plan.workspace.output_root)?;
    let outcomes = copier::copy_static_files(
        &plan.workspace.templates_dir(),
        &plan.workspace.output_root,
        &plan.static_files,
    );

    let failures: Vec<String> = outcomes
        .iter()
        .filter_map(|o| match o {
            copier::CopyOutcome::Failed { file, error } => Some(format!("{file}: {error}")),
            copier::CopyOutcome::Copied { .. } => None,
        })
        .collect();

    if failures.is_empty() {
        Ok(())
    } else {
        Err(PhaseError::Copy {
            failed: failures.len(),
            attempted: outcomes.len(),
            detail: failures.join("; "),
        })
    }
}

/// Render the build descriptor and the entry point into the workspace.
fn render_phase(plan: &RunPlan) -> Result<(), PhaseError> {
    let engine = TemplateEngine::new(&plan.workspace.templates_dir())?;

    let descriptor = engine.render_build_descriptor(&BuildDescriptorContext::from_plan(plan))?;
    writer::atomic_write(
        &plan.workspace.output_root.join(simforge_renderer::BUILD_DESCRIPTOR_FILE),
        &descriptor,
    )?;

    let entry = engine.render_entry_point(
        &plan.entry_point.file_name,
        &EntryPointContext::from_plan(plan),
    )?;
    writer::atomic_write(
        &plan.workspace.output_root.join(&plan.entry_point.file_name),
        &entry,
    )?;

    Ok(())
}

fn tool_phase(
    program: &str,
    args: Vec<String>,
    plan: &RunPlan,
) -> (PhaseStatus, Option<ToolReport>) {
    let command = toolchain::command_line(program, &args);
    tracing::debug!("invoking: {command}");

    match toolchain::invoke(program, &args, plan.toolchain.timeout) {
        Ok(out) => {
            let tool = ToolReport {
                command,
                exit_code: out.exit_code,
                stdout: out.stdout,
                stderr: out.stderr,
            };
            let status = if tool.exit_code == Some(0) {
                PhaseStatus::Succeeded
            } else {
                PhaseStatus::Failed {
                    detail: match tool.exit_code {
                        Some(code) => format!("exit code {code}"),
                        None => "terminated by signal".to_string(),
                    },
                }
            };
            (status, Some(tool))
        }
        // Spawn failure, timeout, or pipe I/O: no process result to report.
        Err(e) => (
            PhaseStatus::Failed {
                detail: e.to_string(),
            },
            None,
        ),
    }
}

// ---------------------------------------------------------------------------
// Toolchain argument builders
// ---------------------------------------------------------------------------

fn configure_args(plan: &RunPlan) -> Vec<String> {
    let ws = &plan.workspace;
    let tc = &plan.toolchain;
    vec![
        "-S".to_string(),
        ws.output_root.display().to_string(),
        "-B".to_string(),
        ws.build_dir().display().to_string(),
        "-G".to_string(),
        tc.generator.clone(),
        format!("-DCMAKE_BUILD_TYPE={}", tc.build_type),
        format!("-DCMAKE_C_COMPILER={}", tc.cc),
        format!("-DCMAKE_CXX_COMPILER={}", tc.cxx),
    ]
}

fn build_args(plan: &RunPlan) -> Vec<String> {
    vec![
        "--build".to_string(),
        plan.workspace.build_dir().display().to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use simforge_core::types::{
        EntryPoint, ProjectName, ToolchainConfig, WorkspaceConfig,
    };

    fn make_plan() -> RunPlan {
        RunPlan {
            workspace: WorkspaceConfig {
                source_root: PathBuf::from("/work"),
                output_root: PathBuf::from("/work/.sim"),
                project: ProjectName::from("drone"),
            },
            toolchain: ToolchainConfig::with_compilers("clang", "clang++"),
            static_files: vec!["calc.hpp".to_string(), "calc.cpp".to_string()],
            entry_point: EntryPoint::default(),
        }
    }

    #[test]
    fn configure_args_carry_generator_profile_and_compilers() {
        let args = configure_args(&make_plan());
        assert_eq!(
            args,
            vec![
                "-S",
                "/work/.sim",
                "-B",
                "/work/.sim/build",
                "-G",
                "Ninja",
                "-DCMAKE_BUILD_TYPE=Release",
                "-DCMAKE_C_COMPILER=clang",
                "-DCMAKE_CXX_COMPILER=clang++",
            ]
        );
    }

    #[test]
    fn build_args_target_the_build_dir() {
        let args = build_args(&make_plan());
        assert_eq!(args, vec!["--build", "/work/.sim/build"]);
    }

    #[test]
    fn invalid_plan_fails_before_any_phase() {
        let mut plan = make_plan();
        plan.workspace.output_root = plan.workspace.source_root.clone();
        let err = run(&plan, &RunOptions::default()).unwrap_err();
        assert!(matches!(err, ConfigError::OutputAliasesSource { .. }));
    }
}
