use crate::cli::LifecycleCommand;
use crate::domain::exit_code;
use crate::infra::config::{Overrides, default_config_dir};
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "stackctl",
    version,
    about = "Sobe, derruba e limpa a stack de containers do projeto"
)]
pub struct Cli {
    /// Diretório da config global (default: ~/.config/stackctl)
    #[arg(long, env = "STACKCTL_CONFIG_DIR", default_value_os_t = default_config_dir())]
    pub config_dir: PathBuf,

    /// Manifesto compose (default: srcs/docker-compose.yml)
    #[arg(short = 'f', long = "file", env = "STACKCTL_COMPOSE_FILE")]
    pub compose_file: Option<PathBuf>,

    /// Diretório compartilhado criado antes de subir (default: ~/shared_data)
    #[arg(long, env = "STACKCTL_SHARED_DIR")]
    pub shared_dir: Option<PathBuf>,

    /// Logs de debug
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<LifecycleCommand>,
}

impl Cli {
    /// Subcommand to run; `all` when none was given
    pub fn command(&self) -> LifecycleCommand {
        self.command.unwrap_or_default()
    }

    pub fn overrides(&self) -> Overrides {
        Overrides {
            compose_file: self.compose_file.clone(),
            shared_dir: self.shared_dir.clone(),
        }
    }
}

/// Process status for the outcome of a run
pub fn exit_status(result: &Result<()>) -> u8 {
    match result {
        Ok(()) => 0,
        Err(e) => exit_code(e),
    }
}
