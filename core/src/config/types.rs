use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Source API serving captured queries.
    #[serde(default)]
    pub replay_api_url: String,

    /// GraphQL endpoint under test.
    #[serde(default)]
    pub local_graphql_url: String,

    /// Reference GraphQL endpoint.
    #[serde(default)]
    pub production_graphql_url: String,

    /// Opaque Authorization header value for the local endpoint.
    #[serde(default)]
    pub local_auth: String,

    /// Opaque Authorization header value for the production endpoint.
    #[serde(default)]
    pub production_auth: String,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// EnvFilter string, e.g. "info" or "replay_core=debug".
    #[serde(default = "default_logging_level")]
    pub level: String,

    /// If set, also log to a daily-rotated file under this directory.
    #[serde(default)]
    pub directory: Option<String>,
}

fn default_logging_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_logging_level(),
            directory: None,
        }
    }
}
