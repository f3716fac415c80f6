use crate::domain::ContainerEngine;
use anyhow::Result;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, warn};

/// Host-wide engine operations. None of them are scoped to a project.
///
/// Every step lists first and skips removal when there is nothing to remove,
/// so the engine is never invoked with an empty argument list.
pub struct SystemService {
    runtime: Arc<dyn ContainerEngine>,
}

impl SystemService {
    pub fn new(runtime: Arc<dyn ContainerEngine>) -> Self {
        Self { runtime }
    }

    pub fn is_engine_available(&self) -> bool {
        self.runtime.is_available()
    }

    /// Stops, then removes, every container on the host.
    ///
    /// Removal runs even when `stop` fails; containers that did stop must
    /// still go. The stop error wins over a removal error.
    pub fn clear_containers(&self) -> Result<usize> {
        let ids = self.runtime.list_containers()?;
        if ids.is_empty() {
            debug!("Nenhum container encontrado");
            return Ok(0);
        }

        let stopped = self.runtime.stop_containers(&ids);
        if let Err(e) = &stopped {
            warn!("Falha ao parar containers: {e:#}");
        }
        let removed = self.runtime.remove_containers(&ids);

        stopped.and(removed)?;
        Ok(ids.len())
    }

    pub fn clear_images(&self) -> Result<usize> {
        let ids = dedup(self.runtime.list_images()?);
        if ids.is_empty() {
            debug!("Nenhuma imagem encontrada");
            return Ok(0);
        }

        self.runtime.remove_images(&ids)?;
        Ok(ids.len())
    }

    pub fn clear_volumes(&self) -> Result<usize> {
        let names = self.runtime.list_volumes()?;
        if names.is_empty() {
            debug!("Nenhum volume encontrado");
            return Ok(0);
        }

        self.runtime.remove_volumes(&names)?;
        Ok(names.len())
    }

    /// Removes every network except `bridge`, `host` and `none`
    pub fn clear_networks(&self) -> Result<usize> {
        let ids: Vec<String> = self
            .runtime
            .list_networks()?
            .into_iter()
            .filter(|net| !net.is_protected())
            .map(|net| net.id)
            .collect();
        if ids.is_empty() {
            debug!("Nenhuma rede customizada encontrada");
            return Ok(0);
        }

        self.runtime.remove_networks(&ids)?;
        Ok(ids.len())
    }
}

/// `images -a` repeats ids for tagged layers
fn dedup(ids: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    ids.into_iter().filter(|id| seen.insert(id.clone())).collect()
}
