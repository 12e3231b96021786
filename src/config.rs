use std::fs;
use std::path::Path;

use axum_extra::extract::cookie::Key;
use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Error opening configuration file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed configuration: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("secret_key is not valid hex: {0}")]
    SecretKeyHex(#[from] hex::FromHexError),
    #[error("secret_key is unusable: {0}")]
    SecretKey(String),
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    #[serde(default = "default_address")]
    pub address: String,
    #[serde(alias = "postgres")]
    pub database: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Make every id-keyed route answer 404 for missing rows, including
    /// `/add_to_playlist` and `/play` which otherwise tolerate them.
    #[serde(default)]
    pub strict_lookups: bool,
    /// Hex encoded key (at least 64 bytes) used to sign the flash cookie.
    /// A random key is generated per run when absent.
    #[serde(default)]
    pub secret_key: Option<String>,
}

fn default_address() -> String {
    "0.0.0.0".to_string()
}

fn default_max_connections() -> u32 {
    5
}

impl Config {
    pub fn from_json(json: &str) -> Result<Config, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
        let config_string = fs::read_to_string(path)?;
        Config::from_json(&config_string)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.address, self.port)
    }

    /// `None` when no key is configured.
    pub fn signing_key(&self) -> Result<Option<Key>, ConfigError> {
        let Some(secret) = &self.secret_key else {
            return Ok(None);
        };
        let bytes = hex::decode(secret.trim())?;
        let key = Key::try_from(bytes.as_slice()).map_err(|e| ConfigError::SecretKey(e.to_string()))?;
        Ok(Some(key))
    }
}
