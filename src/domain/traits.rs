use super::{ComposeProject, Network, UpOptions};
use anyhow::Result;
use std::fmt::Debug;

/// Trait for the external container engine every lifecycle action delegates to
pub trait ContainerEngine: Send + Sync + Debug {
    /// Bring the services of a compose project up
    fn compose_up(&self, project: &ComposeProject, options: &UpOptions) -> Result<()>;

    /// Stop and remove the services of a compose project
    fn compose_down(&self, project: &ComposeProject) -> Result<()>;

    /// Ids of every container on the host, running or not
    fn list_containers(&self) -> Result<Vec<String>>;

    fn stop_containers(&self, ids: &[String]) -> Result<()>;

    fn remove_containers(&self, ids: &[String]) -> Result<()>;

    /// Ids of every image on the host, intermediate layers included
    fn list_images(&self) -> Result<Vec<String>>;

    /// Forcibly remove images
    fn remove_images(&self, ids: &[String]) -> Result<()>;

    fn list_volumes(&self) -> Result<Vec<String>>;

    fn remove_volumes(&self, names: &[String]) -> Result<()>;

    fn list_networks(&self) -> Result<Vec<Network>>;

    fn remove_networks(&self, ids: &[String]) -> Result<()>;

    /// Check if the engine binary can be executed
    fn is_available(&self) -> bool;

    /// Check if the compose program `project` is run with can be executed
    fn is_compose_available(&self, project: &ComposeProject) -> bool;
}
