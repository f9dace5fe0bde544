mod loader;
mod paths;
mod types;

pub use paths::resolve_config_path;
pub use types::{
    Config, DeviceConfig, HttpConfig, ServerConfig, TimingConfig, DEFAULT_GROUP,
};
