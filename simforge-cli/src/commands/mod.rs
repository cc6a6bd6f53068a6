//! Subcommand implementations and the shared plan-assembly flags.

pub mod run;
pub mod stage;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use tabled::{settings::Style, Table, Tabled};

use simforge_core::{
    manifest,
    types::{EntryPoint, ProjectName, RunPlan, ToolchainConfig, WorkspaceConfig},
};
use simforge_pipeline::{PhaseStatus, PipelineReport};

// ---------------------------------------------------------------------------
// Shared plan flags — flag > manifest > built-in default
// ---------------------------------------------------------------------------

/// Plan-selection flags shared by `run` and `stage`.
#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Directory containing `templates/` and the optional simforge.yaml.
    #[arg(long, default_value = ".")]
    pub source_root: PathBuf,

    /// Disposable workspace directory (default: <source-root>/.sim).
    /// Deleted wholesale on every run.
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Project / executable name.
    #[arg(long, short = 'p')]
    pub project: Option<String>,

    /// Static support file to copy from templates/ (repeatable; replaces
    /// the manifest list entirely when given).
    #[arg(long = "file", value_name = "NAME")]
    pub files: Vec<String>,

    /// Entry-point file name; rendered from `<name>.tera`.
    #[arg(long)]
    pub main: Option<String>,

    /// Exit code substituted into the entry-point template.
    #[arg(long)]
    pub return_code: Option<String>,

    /// CMake generator backend.
    #[arg(long)]
    pub generator: Option<String>,

    /// CMake build type.
    #[arg(long)]
    pub build_type: Option<String>,

    /// cmake executable to invoke.
    #[arg(long)]
    pub cmake: Option<String>,

    /// Per-invocation deadline for external tools, in seconds.
    #[arg(long, value_name = "SECS")]
    pub timeout_secs: Option<u64>,
}

impl PlanArgs {
    /// Assemble the immutable [`RunPlan`] for this invocation.
    ///
    /// This is the only point where the environment (`$CC`/`$CXX`) and the
    /// manifest are consulted; everything downstream receives the plan by
    /// reference.
    pub fn assemble(&self) -> Result<RunPlan> {
        let source_root = self
            .source_root
            .canonicalize()
            .with_context(|| format!("cannot resolve source root '{}'", self.source_root.display()))?;

        let manifest = manifest::load(&source_root)
            .with_context(|| format!("failed to load manifest in '{}'", source_root.display()))?
            .unwrap_or_default();

        let project = self
            .project
            .clone()
            .or(manifest.project)
            .unwrap_or_else(|| "drone".to_string());

        let static_files = if !self.files.is_empty() {
            self.files.clone()
        } else {
            manifest
                .files
                .unwrap_or_else(|| vec!["calc.hpp".to_string(), "calc.cpp".to_string()])
        };

        let entry_point = EntryPoint {
            file_name: self
                .main
                .clone()
                .or(manifest.main)
                .unwrap_or_else(|| "main.cpp".to_string()),
            return_code: self
                .return_code
                .clone()
                .or(manifest.return_code)
                .unwrap_or_else(|| "0".to_string()),
        };

        let mut toolchain = ToolchainConfig::from_env();
        if let Some(generator) = self.generator.clone().or(manifest.generator) {
            toolchain.generator = generator;
        }
        if let Some(build_type) = self.build_type.clone().or(manifest.build_type) {
            toolchain.build_type = build_type;
        }
        if let Some(cmake) = &self.cmake {
            toolchain.cmake = cmake.clone();
        }
        toolchain.timeout = self.timeout_secs.map(Duration::from_secs);

        // Canonicalize an existing output path so the aliasing check compares
        // like with like; a not-yet-created workspace is used as given.
        let output_root = match self.output.clone() {
            Some(path) => path.canonicalize().unwrap_or(path),
            None => source_root.join(".sim"),
        };

        let plan = RunPlan {
            workspace: WorkspaceConfig {
                source_root,
                output_root,
                project: ProjectName::from(project),
            },
            toolchain,
            static_files,
            entry_point,
        };
        plan.validate()?;
        Ok(plan)
    }
}

// ---------------------------------------------------------------------------
// Report printing
// ---------------------------------------------------------------------------

#[derive(Tabled)]
struct PhaseRow {
    #[tabled(rename = "phase")]
    phase: String,
    #[tabled(rename = "status")]
    status: String,
    #[tabled(rename = "time")]
    time: String,
    #[tabled(rename = "detail")]
    detail: String,
}

/// Print the run report: pretty JSON with `--json`, otherwise a phase table
/// plus a colored one-line summary.
pub fn print_report(report: &PipelineReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    let rows: Vec<PhaseRow> = report
        .phases
        .iter()
        .map(|p| {
            let (status, detail) = match &p.status {
                PhaseStatus::Succeeded => ("ok".to_string(), String::new()),
                PhaseStatus::Failed { detail } => ("failed".to_string(), detail.clone()),
                PhaseStatus::Skipped => ("skipped".to_string(), String::new()),
            };
            PhaseRow {
                phase: p.phase.to_string(),
                status,
                time: format!("{} ms", p.duration_ms),
                detail,
            }
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::sharp());
    println!("{table}");

    let failed = report.failed_phases();
    if failed.is_empty() {
        println!(
            "{} '{}' — all {} phases succeeded",
            "✓".green(),
            report.project,
            report.phases.len()
        );
        if let Some(artifact) = &report.artifact {
            println!("  artifact: {}", artifact.display());
        }
    } else {
        let names: Vec<String> = failed.iter().map(|p| p.to_string()).collect();
        println!(
            "{} '{}' — {} of {} phases failed: {}",
            "✗".red(),
            report.project,
            failed.len(),
            report.phases.len(),
            names.join(", ")
        );
        // Surface the captured streams of failing tools.
        for phase in &report.phases {
            if let (true, Some(tool)) = (phase.status.is_failed(), &phase.tool) {
                if !tool.stderr.is_empty() {
                    eprintln!("--- {} stderr ---", phase.phase);
                    eprintln!("{}", tool.stderr.trim_end());
                }
            }
        }
    }

    Ok(())
}
