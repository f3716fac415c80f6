mod compose_service;
mod orchestrator;
mod system_service;

pub use compose_service::ComposeService;
pub use orchestrator::Orchestrator;
pub use system_service::SystemService;
