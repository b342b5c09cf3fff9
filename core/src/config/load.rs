use std::path::Path;

use super::types::AppConfig;
use crate::error::ReplayError;

/// Load configuration: `./config.toml` if present, then environment variable
/// overrides (highest priority). Missing endpoint or auth values are fatal;
/// there is nothing useful this tool can do without both endpoints.
pub fn load_default() -> Result<AppConfig, ReplayError> {
    let local_config = Path::new("config.toml");

    let mut cfg: AppConfig = if local_config.exists() {
        let s = std::fs::read_to_string(local_config)?;
        toml::from_str::<AppConfig>(&s).map_err(|e| ReplayError::Config(e.to_string()))?
    } else {
        AppConfig::default()
    };

    apply_env_overrides(&mut cfg);
    validate(&cfg)?;

    Ok(cfg)
}

fn apply_env_overrides(cfg: &mut AppConfig) {
    let overrides: [(&str, &mut String); 5] = [
        ("REPLAY_API_URL", &mut cfg.replay_api_url),
        ("LOCAL_GRAPHQL_URL", &mut cfg.local_graphql_url),
        ("PRODUCTION_GRAPHQL_URL", &mut cfg.production_graphql_url),
        ("LOCAL_AUTH", &mut cfg.local_auth),
        ("PRODUCTION_AUTH", &mut cfg.production_auth),
    ];
    for (name, slot) in overrides {
        if let Ok(v) = std::env::var(name) {
            if !v.trim().is_empty() {
                *slot = v;
            }
        }
    }
    if let Ok(v) = std::env::var("REPLAY_LOG_DIR") {
        if !v.trim().is_empty() {
            cfg.logging.directory = Some(v);
        }
    }
}

fn validate(cfg: &AppConfig) -> Result<(), ReplayError> {
    let required: [(&str, &str); 5] = [
        ("REPLAY_API_URL", &cfg.replay_api_url),
        ("LOCAL_GRAPHQL_URL", &cfg.local_graphql_url),
        ("PRODUCTION_GRAPHQL_URL", &cfg.production_graphql_url),
        ("LOCAL_AUTH", &cfg.local_auth),
        ("PRODUCTION_AUTH", &cfg.production_auth),
    ];
    for (name, value) in required {
        if value.trim().is_empty() {
            return Err(ReplayError::Config(format!(
                "missing required setting: {name}"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_rejects_missing_endpoint() {
        let cfg = AppConfig {
            replay_api_url: "http://replay.local/api".to_string(),
            local_graphql_url: "http://localhost:4000/graphql".to_string(),
            production_graphql_url: String::new(),
            local_auth: "Bearer a".to_string(),
            production_auth: "Bearer b".to_string(),
            ..AppConfig::default()
        };
        let err = validate(&cfg).unwrap_err();
        assert!(err.to_string().contains("PRODUCTION_GRAPHQL_URL"));
    }

    #[test]
    fn validate_accepts_complete_config() {
        let cfg = AppConfig {
            replay_api_url: "http://replay.local/api".to_string(),
            local_graphql_url: "http://localhost:4000/graphql".to_string(),
            production_graphql_url: "https://prod/graphql".to_string(),
            local_auth: "Bearer a".to_string(),
            production_auth: "Bearer b".to_string(),
            ..AppConfig::default()
        };
        assert!(validate(&cfg).is_ok());
    }

    #[test]
    fn config_parses_from_toml() {
        let s = r#"
            replay_api_url = "http://replay.local/api"
            local_graphql_url = "http://localhost:4000/graphql"

            [logging]
            level = "debug"
        "#;
        let cfg: AppConfig = toml::from_str(s).unwrap();
        assert_eq!(cfg.replay_api_url, "http://replay.local/api");
        assert_eq!(cfg.logging.level, "debug");
        assert!(cfg.production_auth.is_empty());
    }
}
