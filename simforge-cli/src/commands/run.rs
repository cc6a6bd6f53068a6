//! `simforge run` — the full six-phase pipeline.

use anyhow::{bail, Result};
use clap::Args;

use simforge_pipeline::{orchestrator, RunOptions, RunScope};

use super::{print_report, PlanArgs};

/// Arguments for `simforge run`.
#[derive(Args, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    pub plan: PlanArgs,

    /// Halt at the first failed required phase and exit nonzero.
    ///
    /// Without this flag every phase is attempted regardless of earlier
    /// failures and the exit code stays 0 — read the report.
    #[arg(long)]
    pub strict: bool,

    /// Emit the machine-readable report instead of the table.
    #[arg(long)]
    pub json: bool,
}

impl RunArgs {
    pub fn run(self) -> Result<()> {
        let plan = self.plan.assemble()?;
        let opts = RunOptions {
            scope: RunScope::Full,
            halt_on_failure: self.strict,
        };

        let report = orchestrator::run(&plan, &opts)?;
        print_report(&report, self.json)?;

        if self.strict && !report.succeeded() {
            let names: Vec<String> = report
                .failed_phases()
                .iter()
                .map(|p| p.to_string())
                .collect();
            bail!("pipeline failed at: {}", names.join(", "));
        }
        Ok(())
    }
}
