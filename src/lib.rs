pub mod cli;
pub mod domain;
pub mod infra;
pub mod services;

// Make test_support available for integration tests
pub mod test_support;

pub use domain::{ComposeProject, ContainerEngine, Network, ResetReport, UpOptions};
pub use infra::DockerAdapter;
pub use services::{ComposeService, Orchestrator, SystemService};
