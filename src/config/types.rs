use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_COLLECTION: &str = "phishing_reports";

/// On-disk YAML config. Every field is optional; missing values fall back
/// to environment variables and built-in defaults.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ConfigFile {
    pub server: Option<ServerConfig>,
    pub llm: Option<LLMConfig>,
    pub store: Option<StoreConfig>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LLMConfig {
    /// Literal key or a `$ENV_VAR` reference.
    pub api_key: Option<String>,
    pub model: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StoreConfig {
    /// Service-account key file for the report store.
    pub credentials: Option<PathBuf>,
    pub collection: Option<String>,
}

/// Resolved configuration the server boots from.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// `None` means no key was found anywhere; `serve` refuses to start.
    pub api_key: Option<String>,
    pub model: String,
    pub credentials: PathBuf,
    pub collection: String,
}
