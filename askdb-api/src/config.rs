use config::{Config, ConfigError, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ApiConfig {
    pub server: ServerConfig,
    pub uploads: UploadsConfig,
    pub executor: ExecutorConfig,
    pub llm: LlmConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct UploadsConfig {
    pub dir: PathBuf,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ExecutorConfig {
    /// When set, generated SQL runs on a read-only connection, so
    /// UPDATE/DELETE/DROP statements fail instead of mutating the upload.
    pub read_only: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LlmConfig {
    pub model: String,
    pub api_key: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            uploads: UploadsConfig {
                dir: PathBuf::from("uploads"),
            },
            executor: ExecutorConfig { read_only: false },
            llm: LlmConfig {
                model: askdb_llm_sdk::models::groq::DEFAULT.to_string(),
                api_key: None,
            },
        }
    }
}

impl ApiConfig {
    pub fn load(path_override: Option<PathBuf>) -> Result<(Self, PathBuf), ConfigError> {
        let config_path = path_override.unwrap_or_else(get_config_path);

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ConfigError::Message(format!("Failed to create config directory: {e}"))
            })?;
        }

        // Create default config file if it doesn't exist
        if !config_path.exists() {
            let default_config = format!(
                r#"
[server]
host = "127.0.0.1"
port = 8080

[uploads]
dir = "uploads"

[executor]
read_only = false

[llm]
model = "{}"
# api_key = "your-groq-key"   # or set GROQ_API_KEY in the environment
"#,
                askdb_llm_sdk::models::groq::DEFAULT
            );
            std::fs::write(&config_path, default_config).map_err(|e| {
                ConfigError::Message(format!("Failed to write default config: {e}"))
            })?;
        }

        let builder = Config::builder()
            .add_source(File::from(config_path.clone()))
            .build()?;

        let mut config: ApiConfig = builder.try_deserialize()?;

        // Environment takes precedence over the config file for the credential
        if let Ok(key) = std::env::var("GROQ_API_KEY") {
            if !key.is_empty() {
                config.llm.api_key = Some(key);
            }
        }

        Ok((config, config_path))
    }

    /// The Groq credential, from the environment or the config file.
    pub fn api_key(&self) -> Result<&str, ConfigError> {
        self.llm
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                ConfigError::Message(
                    "No Groq API key configured. Set GROQ_API_KEY or llm.api_key in the config file."
                        .to_string(),
                )
            })
    }
}

fn get_config_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        config_dir.join("askdb/api.toml")
    } else {
        PathBuf::from("api.toml")
    }
}
