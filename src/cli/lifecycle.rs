use crate::domain::{ContainerEngine, ResetReport};
use crate::infra::DockerAdapter;
use crate::infra::config::{Overrides, Settings, load_app_config};
use crate::services::{ComposeService, Orchestrator, SystemService};
use anyhow::Result;
use clap::Subcommand;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LifecycleCommand {
    /// Garante o diretório compartilhado e sobe os serviços (build + detached)
    #[default]
    #[command(visible_alias = "up")]
    All,
    /// Reconstrói e sobe os serviços (mesmo efeito de `all`)
    #[command(visible_alias = "rebuild")]
    Re,
    /// Para e remove os serviços
    #[command(visible_alias = "stop")]
    Down,
    /// Remove TODOS os containers, imagens, volumes e redes customizadas do host
    #[command(visible_alias = "reset")]
    Clean,
}

pub struct Lifecycle {
    settings: Settings,
    compose_service: Arc<ComposeService>,
    system_service: Arc<SystemService>,
    orchestrator: Orchestrator,
}

impl Lifecycle {
    pub fn new(settings: Settings) -> Self {
        let runtime = Arc::new(DockerAdapter::new(settings.engine_binary.clone()));
        Self::with_runtime(settings, runtime)
    }

    pub fn with_runtime(settings: Settings, runtime: Arc<dyn ContainerEngine>) -> Self {
        let compose_service = Arc::new(ComposeService::new(runtime.clone()));
        let system_service = Arc::new(SystemService::new(runtime));
        let orchestrator = Orchestrator::new(compose_service.clone(), system_service.clone());
        Self {
            settings,
            compose_service,
            system_service,
            orchestrator,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn start(&self) -> Result<()> {
        self.orchestrator
            .start(&self.settings.shared_dir, &self.settings.project)
    }

    pub fn rebuild(&self) -> Result<()> {
        self.orchestrator
            .rebuild(&self.settings.shared_dir, &self.settings.project)
    }

    pub fn stop(&self) -> Result<()> {
        self.orchestrator.stop(&self.settings.project)
    }

    pub fn reset(&self) -> Result<ResetReport> {
        self.orchestrator.reset()
    }

    pub fn run(&self, command: LifecycleCommand) -> Result<()> {
        debug!("Executando {:?} com {:?}", command, self.settings);

        let available = match command {
            LifecycleCommand::Clean => self.system_service.is_engine_available(),
            _ => self.compose_service.is_available(&self.settings.project),
        };
        if !available {
            warn!("  {} não respondeu. Os comandos podem falhar.", self.program_for(command));
        }

        match command {
            LifecycleCommand::All => self.start(),
            LifecycleCommand::Re => self.rebuild(),
            LifecycleCommand::Down => self.stop(),
            LifecycleCommand::Clean => self.reset().map(|_| ()),
        }
    }

    fn program_for(&self, command: LifecycleCommand) -> String {
        match command {
            LifecycleCommand::Clean => self.settings.engine_binary.clone(),
            _ if self.settings.project.standalone => "docker-compose".to_string(),
            _ => format!("{} compose", self.settings.engine_binary),
        }
    }
}

/// Loads both config files, applies overrides and resolves the final settings
pub fn load_settings(config_dir: &Path, work_dir: &Path, overrides: &Overrides) -> Result<Settings> {
    let mut config = load_app_config(config_dir, work_dir)?;
    config.apply_overrides(overrides);
    config.resolve()
}
