use thiserror::Error;

mod app_config;
mod config;
mod format;
pub mod metrics;
pub mod platform;
pub mod snapshot;
mod stable;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use format::format_number;
pub use platform::{ConnectionMap, ConnectionStatus, Platform};
pub use stable::stable_value;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown platform: {0}")]
    UnknownPlatform(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
