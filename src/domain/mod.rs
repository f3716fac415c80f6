mod error;
mod resource;
pub mod traits;

pub use error::{EngineError, exit_code};
pub use resource::{ComposeProject, Network, PROTECTED_NETWORKS, ResetReport, UpOptions};
pub use traits::ContainerEngine;
