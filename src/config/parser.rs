use std::path::{Path, PathBuf};

use tracing::debug;

use crate::errors::PhishguardError;

use super::types::{Config, ConfigFile, DEFAULT_COLLECTION, DEFAULT_MODEL};

/// CLI-level overrides, applied over the config file and environment.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub credentials: Option<PathBuf>,
    pub collection: Option<String>,
}

/// Resolve the effective configuration. Precedence per field: CLI flag,
/// then config file, then environment, then default.
pub async fn load_config(
    path: Option<&Path>,
    overrides: Overrides,
) -> Result<Config, PhishguardError> {
    let file = match path {
        Some(p) => parse_config_file(p).await?,
        None => ConfigFile::default(),
    };

    let server = file.server.unwrap_or_default();
    let llm = file.llm.unwrap_or_default();
    let store = file.store.unwrap_or_default();

    let api_key = overrides.api_key
        .or_else(|| llm.api_key.as_deref().map(resolve_value))
        .or_else(|| std::env::var("GEMINI_API_KEY").ok())
        .filter(|key| !key.is_empty());

    Ok(Config {
        host: overrides.host
            .or(server.host)
            .unwrap_or_else(|| "127.0.0.1".to_string()),
        port: overrides.port.or(server.port).unwrap_or(5000),
        api_key,
        model: overrides.model
            .or(llm.model)
            .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        credentials: overrides.credentials
            .or(store.credentials)
            .or_else(|| std::env::var("FIREBASE_KEY").ok().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from("firebase_key.json")),
        collection: overrides.collection
            .or(store.collection)
            .unwrap_or_else(|| DEFAULT_COLLECTION.to_string()),
    })
}

async fn parse_config_file(path: &Path) -> Result<ConfigFile, PhishguardError> {
    if !path.exists() {
        return Err(PhishguardError::Config(format!(
            "Config file not found: {}",
            path.display()
        )));
    }

    let content = tokio::fs::read_to_string(path).await?;
    let config: ConfigFile = serde_yaml::from_str(&content)?;
    debug!(path = %path.display(), "Loaded config file");
    Ok(config)
}

/// Resolve a `$ENV_VAR` reference to its environment value. Literals pass
/// through unchanged, as does a reference to an unset variable.
fn resolve_value(value: &str) -> String {
    match value.strip_prefix('$') {
        Some(var) => std::env::var(var).unwrap_or_else(|_| value.to_string()),
        None => value.to_string(),
    }
}
