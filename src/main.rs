use anyhow::{Context, Result};
use clap::Parser;
use stackctl::cli::{Cli, Lifecycle, exit_status, init_logger, load_settings};
use std::process::ExitCode;
use tracing::error;

fn run(cli: &Cli) -> Result<()> {
    let work_dir = std::env::current_dir().context("lendo diretório atual")?;

    let settings = load_settings(&cli.config_dir, &work_dir, &cli.overrides())?;
    let lifecycle = Lifecycle::new(settings);

    lifecycle.run(cli.command())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let result = run(&cli);
    if let Err(e) = &result {
        error!("{e:#}");
    }

    ExitCode::from(exit_status(&result))
}
