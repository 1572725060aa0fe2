// Configuration module entry point
// Layers config.toml, environment variables, and built-in defaults

mod state;
mod types;

use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::{
    AssetsConfig, Config, HttpConfig, LoggingConfig, PerformanceConfig, ServerConfig,
};

impl Config {
    /// Load configuration from "config.toml" in the working directory.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from specified file path (without extension)
    ///
    /// The file is optional; every key has a default. `SERVER_`-prefixed
    /// environment variables override file values, and a bare `PORT`
    /// variable overrides the listen port.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("SERVER"))
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("assets.root", "web")?
            .set_default("http.default_content_type", "text/plain")?
            .set_default("http.max_body_size", 1_048_576)? // 1MB
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.request_timeout", 30)?
            .set_default("logging.access_log", true)?;

        if let Ok(port) = std::env::var("PORT") {
            builder = builder.set_override("server.port", port)?;
        }

        builder.build()?.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}
