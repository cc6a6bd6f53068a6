//! `simforge stage` — populate the workspace without driving the toolchain.

use anyhow::Result;
use clap::Args;

use simforge_pipeline::{orchestrator, RunOptions, RunScope};

use super::{print_report, PlanArgs};

/// Arguments for `simforge stage`.
#[derive(Args, Debug)]
pub struct StageArgs {
    #[command(flatten)]
    pub plan: PlanArgs,

    /// Emit the machine-readable report instead of the table.
    #[arg(long)]
    pub json: bool,
}

impl StageArgs {
    pub fn run(self) -> Result<()> {
        let plan = self.plan.assemble()?;
        let opts = RunOptions {
            scope: RunScope::StageOnly,
            halt_on_failure: false,
        };

        let report = orchestrator::run(&plan, &opts)?;
        print_report(&report, self.json)?;
        Ok(())
    }
}
