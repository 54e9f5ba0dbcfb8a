use std::collections::HashMap;
use std::net::IpAddr;
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub database_path: String,
    /// Legacy `{kanji: [entry, ...]}` JSON file read by the migrate binary.
    pub legacy_json_path: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnv(String),
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_map(std::env::vars().collect())
    }

    pub fn from_env_map(env_map: HashMap<String, String>) -> Result<Self, ConfigError> {
        let host = env_map
            .get("HOST")
            .map(|s| s.as_str())
            .unwrap_or("127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|_| {
                ConfigError::InvalidValue("HOST".to_string(), "must be an IP address".to_string())
            })?;

        let port = env_map
            .get("PORT")
            .map(|s| s.as_str())
            .unwrap_or("8000")
            .parse::<u16>()
            .map_err(|_| {
                ConfigError::InvalidValue("PORT".to_string(), "must be a valid u16".to_string())
            })?;

        let database_path = non_empty(&env_map, "DATABASE_PATH", "kanji_vocab.db")?;
        let legacy_json_path = non_empty(&env_map, "LEGACY_JSON_PATH", "kanji_index.json")?;

        Ok(Config {
            host,
            port,
            database_path,
            legacy_json_path,
        })
    }
}

fn non_empty(
    env_map: &HashMap<String, String>,
    key: &str,
    default: &str,
) -> Result<String, ConfigError> {
    match env_map.get(key).map(|s| s.trim()) {
        None => Ok(default.to_string()),
        Some("") => Err(ConfigError::MissingEnv(key.to_string())),
        Some(value) => Ok(value.to_string()),
    }
}
