use crate::domain::{ComposeProject, ResetReport, UpOptions};
use crate::infra::host_dir;
use crate::services::{ComposeService, SystemService};
use anyhow::Result;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Orchestrates the stack lifecycle and the host-wide reset
pub struct Orchestrator {
    compose_service: Arc<ComposeService>,
    system_service: Arc<SystemService>,
}

impl Orchestrator {
    pub fn new(compose_service: Arc<ComposeService>, system_service: Arc<SystemService>) -> Self {
        Self {
            compose_service,
            system_service,
        }
    }

    /// Ensures `shared_dir` exists, then builds and starts the services detached
    pub fn start(&self, shared_dir: &Path, project: &ComposeProject) -> Result<()> {
        if host_dir::ensure_dir(shared_dir)? {
            info!(" Diretório compartilhado criado em {:?}", shared_dir);
        }

        self.compose_service.up(project, &UpOptions::build_detached())?;

        info!(" Serviços no ar");
        Ok(())
    }

    pub fn rebuild(&self, shared_dir: &Path, project: &ComposeProject) -> Result<()> {
        info!(" Reconstruindo serviços...");
        self.start(shared_dir, project)
    }

    pub fn stop(&self, project: &ComposeProject) -> Result<()> {
        self.compose_service.down(project)?;

        info!(" Serviços parados e removidos");
        Ok(())
    }

    /// Clears every container, image, volume and custom network on the host.
    ///
    /// All four steps always run. The first failure is returned once they are
    /// done; later ones are only logged.
    pub fn reset(&self) -> Result<ResetReport> {
        warn!(" Removendo TODO o estado do engine no host (não apenas deste projeto)");

        let mut report = ResetReport::default();
        let mut first_error = None;

        let steps: [(&str, fn(&SystemService) -> Result<usize>, &mut usize); 4] = [
            ("containers", SystemService::clear_containers, &mut report.containers),
            ("imagens", SystemService::clear_images, &mut report.images),
            ("volumes", SystemService::clear_volumes, &mut report.volumes),
            ("redes", SystemService::clear_networks, &mut report.networks),
        ];

        for (label, step, count) in steps {
            info!(" Removendo {label}...");

            match step(self.system_service.as_ref()) {
                Ok(removed) => {
                    debug!("{removed} {label} removidos");
                    *count = removed;
                }
                Err(e) => {
                    warn!("Falha ao remover {label}: {e:#}");
                    first_error.get_or_insert(e);
                }
            }
        }

        if let Some(err) = first_error {
            return Err(err);
        }

        if report.is_empty() {
            info!(" Nada para limpar");
        } else {
            info!(
                " Limpeza concluída: {} containers, {} imagens, {} volumes, {} redes",
                report.containers, report.images, report.volumes, report.networks
            );
        }

        Ok(report)
    }
}
