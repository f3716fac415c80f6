pub mod config;
pub mod docker_adapter;
pub mod host_dir;

pub use docker_adapter::DockerAdapter;
