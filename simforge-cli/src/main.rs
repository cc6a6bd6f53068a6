//! simforge — stage, render, build, and run a templated native project.
//!
//! # Usage
//!
//! ```text
//! simforge run   [--source-root DIR] [--output DIR] [--project NAME]
//!                [--return-code N] [--file NAME ...] [--cmake PATH]
//!                [--generator G] [--build-type T] [--timeout-secs N]
//!                [--strict] [--json]
//! simforge stage [same plan flags] [--json]
//! ```
//!
//! `run` drives all six phases (clean, stage, render, configure, build,
//! run); `stage` stops after rendering, leaving a populated workspace to
//! inspect. `$CC` / `$CXX` select the compilers handed to the configure
//! step; everything else comes from flags, the optional `simforge.yaml`
//! manifest, or built-in defaults, in that order.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{run::RunArgs, stage::StageArgs};

#[derive(Parser, Debug)]
#[command(
    name = "simforge",
    version,
    about = "Stage a disposable workspace and drive the native toolchain through it",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the full pipeline: clean, stage, render, configure, build, run.
    Run(RunArgs),

    /// Populate the workspace (clean, stage, render) without the toolchain.
    Stage(StageArgs),
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Run(args) => args.run(),
        Commands::Stage(args) => args.run(),
    }
}
