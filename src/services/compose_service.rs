use crate::domain::{ComposeProject, ContainerEngine, UpOptions};
use anyhow::Result;
use std::sync::Arc;
use tracing::{info, warn};

/// Lifecycle of the services declared in a compose manifest
pub struct ComposeService {
    runtime: Arc<dyn ContainerEngine>,
}

impl ComposeService {
    pub fn new(runtime: Arc<dyn ContainerEngine>) -> Self {
        Self { runtime }
    }

    pub fn is_available(&self, project: &ComposeProject) -> bool {
        self.runtime.is_compose_available(project)
    }

    pub fn up(&self, project: &ComposeProject, options: &UpOptions) -> Result<()> {
        if !project.file.exists() {
            warn!("  Manifesto {:?} não encontrado", project.file);
        }

        info!(" Subindo serviços de {:?}...", project.file);
        self.runtime.compose_up(project, options)
    }

    pub fn down(&self, project: &ComposeProject) -> Result<()> {
        info!(" Derrubando serviços de {:?}...", project.file);
        self.runtime.compose_down(project)
    }
}
