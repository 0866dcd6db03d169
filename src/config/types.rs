// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub assets: AssetsConfig,
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Asset serving configuration
#[derive(Debug, Deserialize, Clone)]
pub struct AssetsConfig {
    /// Serve from the real filesystem instead of the embedded bundle
    /// (development mode).
    pub use_local: bool,
    /// Directory the descriptors' local paths are resolved against.
    pub local_root: String,
    /// URL prefix under which the asset tree is exposed.
    pub route_prefix: String,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub access_log: bool,
    /// Access log file path (stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}
