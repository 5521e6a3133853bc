// Configuration module entry point
// Loads application configuration and builds the shared runtime state

mod state;
mod types;

use std::net::SocketAddr;

// Re-export public types
pub use state::{AppState, StateError};
pub use types::{
    Config, CorsConfig, HttpConfig, InferenceConfig, LoggingConfig, StoreBackend, StoreConfig,
};

const CLOUDFLARE_API_BASE: &str = "https://api.cloudflare.com/client/v4";

impl Config {
    /// Load configuration from specified file path (without extension)
    /// Default config file is "config.toml" when no path specified
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = with_defaults(config::Config::builder())?
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix("JUMBL")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Built-in defaults only, ignoring files and the environment
    #[cfg(test)]
    pub fn defaults() -> Self {
        with_defaults(config::Config::builder())
            .and_then(|builder| builder.build())
            .and_then(|settings| settings.try_deserialize())
            .expect("built-in defaults must deserialize")
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

fn with_defaults(
    builder: config::ConfigBuilder<config::builder::DefaultState>,
) -> Result<config::ConfigBuilder<config::builder::DefaultState>, config::ConfigError> {
    builder
        .set_default("server.host", "127.0.0.1")?
        .set_default("server.port", 8787)?
        .set_default("logging.level", "info")?
        .set_default("logging.access_log", true)?
        .set_default("logging.access_log_format", "combined")?
        .set_default("performance.keep_alive_timeout", 75)?
        .set_default("performance.read_timeout", 30)?
        .set_default("performance.write_timeout", 30)?
        .set_default("http.server_name", "jumbl-edge")?
        .set_default("http.max_body_size", 1_048_576)? // 1MB
        .set_default("http.cors.allow_origin", "*")?
        .set_default("http.cors.allow_methods", "GET,HEAD,POST,OPTIONS")?
        .set_default("http.cors.allow_headers", "Content-Type")?
        .set_default("http.cors.max_age", 86_400)?
        .set_default("inference.base_url", CLOUDFLARE_API_BASE)?
        .set_default("inference.account_id", "")?
        .set_default("inference.api_token", "")?
        .set_default("inference.words_model", "@hf/mistral/mistral-7b-instruct-v0.2")?
        .set_default("inference.hint_model", "@cf/meta/llama-3-8b-instruct")?
        .set_default("store.backend", "memory")?
        .set_default("store.base_url", CLOUDFLARE_API_BASE)?
        .set_default("store.account_id", "")?
        .set_default("store.namespace_id", "")?
        .set_default("store.api_token", "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = Config::defaults();
        assert_eq!(cfg.server.port, 8787);
        assert_eq!(cfg.http.cors.allow_origin, "*");
        assert_eq!(cfg.http.cors.allow_methods, "GET,HEAD,POST,OPTIONS");
        assert_eq!(cfg.http.cors.max_age, 86_400);
        assert_eq!(cfg.store.backend, StoreBackend::Memory);
        assert_eq!(cfg.inference.words_model, "@hf/mistral/mistral-7b-instruct-v0.2");
        assert!(cfg.performance.max_connections.is_none());
    }

    #[test]
    fn test_socket_addr() {
        let mut cfg = Config::defaults();
        assert_eq!(cfg.get_socket_addr().unwrap().port(), 8787);

        cfg.server.host = "not an address".to_string();
        assert!(cfg.get_socket_addr().is_err());
    }

    #[test]
    fn test_environment_overrides() {
        let vars = [
            ("JUMBL_SERVER__PORT", "9191"),
            ("JUMBL_STORE__BACKEND", "workers_kv"),
            ("JUMBL_STORE__NAMESPACE_ID", "ns-1"),
        ];
        for (key, value) in vars {
            std::env::set_var(key, value);
        }

        let missing = std::env::temp_dir().join("jumbl-edge-no-such-config");
        let loaded = Config::load_from(&missing.to_string_lossy());

        for (key, _) in vars {
            std::env::remove_var(key);
        }

        let cfg = loaded.unwrap();
        assert_eq!(cfg.server.port, 9191);
        assert_eq!(cfg.store.backend, StoreBackend::WorkersKv);
        assert_eq!(cfg.store.namespace_id, "ns-1");
        assert_eq!(cfg.http.server_name, "jumbl-edge");
    }
}
