pub mod app;
pub mod lifecycle;
pub mod logging;

pub use app::{Cli, exit_status};
pub use lifecycle::{Lifecycle, LifecycleCommand, load_settings};
pub use logging::init_logger;
