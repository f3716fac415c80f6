use std::path::PathBuf;

/// Networks created by the engine itself. They can never be removed.
pub const PROTECTED_NETWORKS: [&str; 3] = ["bridge", "host", "none"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposeProject {
    pub file: PathBuf,
    pub project_name: Option<String>,
    /// Use the legacy `docker-compose` binary instead of the `compose` plugin
    pub standalone: bool,
}

impl ComposeProject {
    pub fn new(file: impl Into<PathBuf>) -> Self {
        Self {
            file: file.into(),
            project_name: None,
            standalone: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UpOptions {
    pub build: bool,
    pub detached: bool,
}

impl UpOptions {
    /// Build images and leave the services running in the background
    pub fn build_detached() -> Self {
        Self {
            build: true,
            detached: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Network {
    pub id: String,
    pub name: String,
}

impl Network {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    pub fn is_protected(&self) -> bool {
        PROTECTED_NETWORKS.contains(&self.name.as_str())
    }
}

/// How many resources each step of a host reset removed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResetReport {
    pub containers: usize,
    pub images: usize,
    pub volumes: usize,
    pub networks: usize,
}

impl ResetReport {
    pub fn total(&self) -> usize {
        self.containers + self.images + self.volumes + self.networks
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}
