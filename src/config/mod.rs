// Configuration module entry point
// Layered loading: optional config file, environment overrides, coded defaults.

mod state;
mod types;

use std::net::SocketAddr;

pub use state::AppState;
pub use types::Config;

impl Config {
    /// Load configuration from "embserve.toml" (optional) with
    /// `EMBSERVE_`-prefixed environment overrides.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("embserve")
    }

    /// Load configuration from the specified file path (without extension).
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("EMBSERVE").separator("__"))
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8181)?
            .set_default("assets.use_local", false)?
            .set_default("assets.local_root", ".")?
            .set_default("assets.route_prefix", "/static")?
            .set_default("logging.access_log", true)?
            .build()?;

        settings.try_deserialize()
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}
