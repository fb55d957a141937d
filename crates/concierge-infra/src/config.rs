//! Server configuration loader.
//!
//! Reads `config.toml` from the data directory and falls back to defaults
//! when the file is missing or malformed -- a bad config never blocks
//! startup. The gateway API key is never put in the file; it comes from the
//! `OPENAI_API_KEY` environment variable.

use std::path::Path;

use secrecy::SecretString;
use serde::Deserialize;

/// Server and gateway settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Port the HTTP listener binds.
    pub port: u16,
    /// Host/interface the HTTP listener binds.
    pub host: String,
    /// Model requested from the completion gateway.
    pub model: String,
    /// Sampling temperature for completions.
    pub temperature: f64,
    /// Completion length cap, in tokens.
    pub max_tokens: u32,
    /// Gateway call timeout in seconds; expiry is a retryable failure.
    pub gateway_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3002,
            host: "127.0.0.1".to_string(),
            model: "gpt-4o-mini".to_string(),
            temperature: 0.7,
            max_tokens: 150,
            gateway_timeout_secs: 30,
        }
    }
}

/// Load configuration from `{data_dir}/config.toml`.
///
/// - Missing file: returns [`ServerConfig::default()`].
/// - Unreadable or malformed file: logs a warning and returns the default.
pub async fn load_server_config(data_dir: &Path) -> ServerConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(
                "No config.toml found at {}, using defaults",
                config_path.display()
            );
            return ServerConfig::default();
        }
        Err(err) => {
            tracing::warn!(
                "Failed to read {}: {err}, using defaults",
                config_path.display()
            );
            return ServerConfig::default();
        }
    };

    match toml::from_str::<ServerConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            ServerConfig::default()
        }
    }
}

/// Gateway API key from the environment, if set and non-empty.
pub fn resolve_api_key() -> Option<SecretString> {
    std::env::var("OPENAI_API_KEY")
        .ok()
        .filter(|key| !key.is_empty())
        .map(SecretString::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config = load_server_config(tmp.path()).await;
        assert_eq!(config.port, 3002);
        assert_eq!(config.max_tokens, 150);
    }

    #[tokio::test]
    async fn test_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(
            tmp.path().join("config.toml"),
            r#"
port = 8080
host = "0.0.0.0"
model = "gpt-4o"
max_tokens = 512
"#,
        )
        .await
        .unwrap();

        let config = load_server_config(tmp.path()).await;
        assert_eq!(config.port, 8080);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.max_tokens, 512);
        // Omitted fields keep their defaults.
        assert_eq!(config.gateway_timeout_secs, 30);
    }

    #[tokio::test]
    async fn test_invalid_toml_returns_default() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(tmp.path().join("config.toml"), "this is not { valid toml !!!")
            .await
            .unwrap();

        let config = load_server_config(tmp.path()).await;
        assert_eq!(config.port, 3002);
    }
}
