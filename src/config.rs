use serde::{Deserialize, Serialize};

/// Application configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Environment (dev, staging, prod)
    #[serde(default = "default_environment")]
    pub environment: String,

    /// CORS allowed origins, comma separated. Unset or `*` allows any origin.
    pub cors_origins: Option<String>,

    #[serde(default = "default_service_name")]
    pub service_name: String,

    /// Documents that exist at startup, comma separated
    #[serde(default = "default_seed_documents")]
    pub seed_documents: String,

    /// Log level used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables or app.env file
    pub fn load() -> Result<Self, ConfigError> {
        // Try to load from app.env file first
        if std::path::Path::new("app.env").exists() {
            dotenvy::from_filename("app.env").ok();
        } else {
            // Fallback to .env file
            dotenvy::dotenv().ok();
        }

        // Loaded before tracing is initialized, so the caller reports the outcome
        envy::from_env::<Config>().map_err(ConfigError::EnvError)
    }

    /// Default tracing filter derived from `log_level`
    pub fn log_filter(&self) -> String {
        format!(
            "colab_sync={0},tower_http={0},axum::rejection=trace,{0}",
            self.log_level
        )
    }

    /// Get the full server address
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Check if running in development mode
    pub fn is_development(&self) -> bool {
        self.environment.to_lowercase() == "dev" || self.environment.to_lowercase() == "development"
    }

    /// Seed document identifiers, trimmed and without empty entries
    pub fn seed_document_ids(&self) -> Vec<String> {
        split_list(&self.seed_documents)
    }

    /// Allowed CORS origins, `None` meaning any origin
    pub fn cors_origin_list(&self) -> Option<Vec<String>> {
        let origins = split_list(self.cors_origins.as_deref()?);
        if origins.is_empty() || origins.iter().any(|o| o == "*") {
            return None;
        }
        Some(origins)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            environment: default_environment(),
            cors_origins: None,
            service_name: default_service_name(),
            seed_documents: default_seed_documents(),
            log_level: default_log_level(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    EnvError(envy::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::EnvError(e) => write!(f, "Environment variable error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_service_name() -> String {
    "colab-sync".to_string()
}

fn default_environment() -> String {
    "development".to_string()
}

fn default_seed_documents() -> String {
    "doc-1,doc-2,notes".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_dev_setup() {
        let config = Config::default();
        assert_eq!(config.server_address(), "0.0.0.0:8080");
        assert!(config.is_development());
        assert_eq!(config.seed_document_ids(), vec!["doc-1", "doc-2", "notes"]);
        assert_eq!(config.cors_origin_list(), None);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn log_level_drives_default_filter() {
        let config = Config {
            log_level: "debug".to_string(),
            ..Config::default()
        };
        let filter = config.log_filter();
        assert_eq!(filter, "colab_sync=debug,tower_http=debug,axum::rejection=trace,debug");
        assert!(filter.parse::<tracing_subscriber::EnvFilter>().is_ok());
    }

    #[test]
    fn lists_are_trimmed() {
        let config = Config {
            seed_documents: " a, ,b ,".to_string(),
            cors_origins: Some("http://localhost:3000, https://app.example".to_string()),
            ..Config::default()
        };
        assert_eq!(config.seed_document_ids(), vec!["a", "b"]);
        assert_eq!(
            config.cors_origin_list(),
            Some(vec!["http://localhost:3000".to_string(), "https://app.example".to_string()])
        );
    }

    #[test]
    fn wildcard_origin_means_any() {
        let config = Config {
            cors_origins: Some("*".to_string()),
            ..Config::default()
        };
        assert_eq!(config.cors_origin_list(), None);
    }
}
