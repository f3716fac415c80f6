use crate::domain::{ComposeProject, ContainerEngine, Network, UpOptions};
use anyhow::{Result, bail};
use std::sync::RwLock;

/// In-memory engine that records every command it receives
#[derive(Debug, Default)]
pub struct MockEngine {
    containers: RwLock<Vec<String>>,
    images: RwLock<Vec<String>>,
    volumes: RwLock<Vec<String>>,
    networks: RwLock<Vec<Network>>,
    commands: RwLock<Vec<String>>,
    fail_on: RwLock<Option<String>>,
    available: RwLock<bool>,
}

impl MockEngine {
    pub fn new() -> Self {
        Self {
            available: RwLock::new(true),
            ..Self::default()
        }
    }

    pub fn add_containers(&self, ids: &[&str]) {
        extend(&self.containers, ids);
    }

    pub fn add_images(&self, ids: &[&str]) {
        extend(&self.images, ids);
    }

    pub fn add_volumes(&self, names: &[&str]) {
        extend(&self.volumes, names);
    }

    pub fn add_networks(&self, networks: Vec<Network>) {
        self.networks.write().unwrap().extend(networks);
    }

    /// Makes the named trait method fail, e.g. `"compose_up"` or `"list_images"`
    pub fn set_fail_on(&self, operation: &str) {
        *self.fail_on.write().unwrap() = Some(operation.to_string());
    }

    pub fn set_available(&self, available: bool) {
        *self.available.write().unwrap() = available;
    }

    pub fn get_commands(&self) -> Vec<String> {
        self.commands.read().unwrap().clone()
    }

    pub fn containers(&self) -> Vec<String> {
        self.containers.read().unwrap().clone()
    }

    pub fn images(&self) -> Vec<String> {
        self.images.read().unwrap().clone()
    }

    pub fn volumes(&self) -> Vec<String> {
        self.volumes.read().unwrap().clone()
    }

    pub fn networks(&self) -> Vec<Network> {
        self.networks.read().unwrap().clone()
    }

    fn record_command(&self, cmd: String) {
        self.commands.write().unwrap().push(cmd);
    }

    fn check_fail(&self, operation: &str) -> Result<()> {
        if let Some(ref fail_on) = *self.fail_on.read().unwrap() {
            if fail_on == operation {
                bail!("Mock failure on: {}", operation);
            }
        }
        Ok(())
    }

    fn record_removal(&self, verb: &str, ids: &[String]) -> Result<()> {
        if ids.is_empty() {
            bail!("{verb} chamado sem argumentos");
        }
        self.record_command(format!("{verb}:{}", ids.join(",")));
        self.check_fail(verb)
    }
}

fn extend(store: &RwLock<Vec<String>>, items: &[&str]) {
    store
        .write()
        .unwrap()
        .extend(items.iter().map(|item| item.to_string()));
}

fn retain_missing(store: &RwLock<Vec<String>>, removed: &[String]) {
    store.write().unwrap().retain(|item| !removed.contains(item));
}

impl ContainerEngine for MockEngine {
    fn compose_up(&self, project: &ComposeProject, options: &UpOptions) -> Result<()> {
        let mut cmd = format!("compose_up:{}", project.file.display());
        if options.build {
            cmd.push_str(":build");
        }
        if options.detached {
            cmd.push_str(":detached");
        }
        self.record_command(cmd);
        self.check_fail("compose_up")
    }

    fn compose_down(&self, project: &ComposeProject) -> Result<()> {
        self.record_command(format!("compose_down:{}", project.file.display()));
        self.check_fail("compose_down")
    }

    fn list_containers(&self) -> Result<Vec<String>> {
        self.record_command("list:containers".to_string());
        self.check_fail("list_containers")?;
        Ok(self.containers())
    }

    fn stop_containers(&self, ids: &[String]) -> Result<()> {
        self.record_removal("stop_containers", ids)
    }

    fn remove_containers(&self, ids: &[String]) -> Result<()> {
        self.record_removal("remove_containers", ids)?;
        retain_missing(&self.containers, ids);
        Ok(())
    }

    fn list_images(&self) -> Result<Vec<String>> {
        self.record_command("list:images".to_string());
        self.check_fail("list_images")?;
        Ok(self.images())
    }

    fn remove_images(&self, ids: &[String]) -> Result<()> {
        self.record_removal("remove_images", ids)?;
        retain_missing(&self.images, ids);
        Ok(())
    }

    fn list_volumes(&self) -> Result<Vec<String>> {
        self.record_command("list:volumes".to_string());
        self.check_fail("list_volumes")?;
        Ok(self.volumes())
    }

    fn remove_volumes(&self, names: &[String]) -> Result<()> {
        self.record_removal("remove_volumes", names)?;
        retain_missing(&self.volumes, names);
        Ok(())
    }

    fn list_networks(&self) -> Result<Vec<Network>> {
        self.record_command("list:networks".to_string());
        self.check_fail("list_networks")?;
        Ok(self.networks())
    }

    fn remove_networks(&self, ids: &[String]) -> Result<()> {
        self.record_removal("remove_networks", ids)?;
        self.networks
            .write()
            .unwrap()
            .retain(|net| !ids.contains(&net.id));
        Ok(())
    }

    fn is_available(&self) -> bool {
        self.record_command("is_available".to_string());
        *self.available.read().unwrap()
    }

    fn is_compose_available(&self, project: &ComposeProject) -> bool {
        self.record_command(format!("is_compose_available:{}", project.file.display()));
        *self.available.read().unwrap()
    }
}
