//! Main settings module

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::ConfigError;

/// Runtime environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeEnvironment {
    /// Development mode - relaxed validation, warnings only
    #[default]
    Development,
    /// Staging mode - stricter validation
    Staging,
    /// Production mode - all validations enforced
    Production,
}

impl RuntimeEnvironment {
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    /// Check if strict validation should be applied
    pub fn is_strict(&self) -> bool {
        matches!(self, Self::Production | Self::Staging)
    }

    /// Parse an environment name such as the `BANGLA_DICT_ENV` value
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Some(Self::Development),
            "staging" => Some(Self::Staging),
            "production" | "prod" => Some(Self::Production),
            _ => None,
        }
    }
}

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub environment: RuntimeEnvironment,

    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Language model provider
    #[serde(default)]
    pub llm: LlmConfig,

    /// ScyllaDB persistence
    #[serde(default)]
    pub persistence: PersistenceConfig,

    /// Resolution pipeline behavior
    #[serde(default)]
    pub resolver: ResolverConfig,

    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Restrict CORS to `cors_origins`; when false every origin is allowed
    #[serde(default)]
    pub cors_enabled: bool,

    #[serde(default)]
    pub cors_origins: Vec<String>,

    /// Upper bound on a single request, AI call included
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8001
}
fn default_request_timeout() -> u64 {
    60
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_enabled: false,
            cors_origins: Vec::new(),
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

/// Language model provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Use the provider at all; without an API key it stays off regardless
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// OpenAI-compatible base URL
    #[serde(default = "default_llm_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_llm_api_key")]
    pub api_key: Option<String>,

    #[serde(default = "default_llm_model")]
    pub model: String,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: usize,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_llm_timeout")]
    pub timeout_seconds: u64,
}

fn default_llm_endpoint() -> String {
    "https://api.openai.com/v1".to_string()
}
fn default_llm_api_key() -> Option<String> {
    std::env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty())
}
fn default_llm_model() -> String {
    "gpt-4o-mini".to_string()
}
fn default_max_tokens() -> usize {
    512
}
fn default_temperature() -> f32 {
    0.3
}
fn default_llm_timeout() -> u64 {
    30
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: default_llm_endpoint(),
            api_key: default_llm_api_key(),
            model: default_llm_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            timeout_seconds: default_llm_timeout(),
        }
    }
}

impl LlmConfig {
    /// True when a translator should actually be wired
    pub fn is_active(&self) -> bool {
        self.enabled && self.api_key.as_deref().is_some_and(|k| !k.is_empty())
    }
}

/// Persistence configuration for ScyllaDB
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistenceConfig {
    /// Enable ScyllaDB persistence (false = in-memory only)
    #[serde(default)]
    pub enabled: bool,

    #[serde(default = "default_scylla_hosts")]
    pub scylla_hosts: Vec<String>,

    #[serde(default = "default_scylla_keyspace")]
    pub keyspace: String,

    #[serde(default = "default_replication_factor")]
    pub replication_factor: u8,
}

fn default_scylla_hosts() -> Vec<String> {
    std::env::var("SCYLLA_HOSTS")
        .map(|s| s.split(',').map(|h| h.trim().to_string()).collect())
        .unwrap_or_else(|_| vec!["127.0.0.1:9042".to_string()])
}

fn default_scylla_keyspace() -> String {
    std::env::var("SCYLLA_KEYSPACE").unwrap_or_else(|_| "bangla_dict".to_string())
}

fn default_replication_factor() -> u8 {
    1
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            scylla_hosts: default_scylla_hosts(),
            keyspace: default_scylla_keyspace(),
            replication_factor: default_replication_factor(),
        }
    }
}

/// Resolution pipeline configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Store template fallback records too (offline and AI hits are always stored)
    #[serde(default)]
    pub persist_fallback: bool,
}

/// Observability configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default)]
    pub log_json: bool,

    /// Expose Prometheus metrics at /metrics
    #[serde(default = "default_true")]
    pub metrics_enabled: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_json: false,
            metrics_enabled: true,
        }
    }
}

fn default_true() -> bool {
    true
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_server()?;
        self.validate_llm()?;
        self.validate_persistence()?;
        Ok(())
    }

    fn validate_server(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                message: "Port must be greater than 0".to_string(),
            });
        }

        if self.server.request_timeout_seconds == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.request_timeout_seconds".to_string(),
                message: "Timeout must be greater than 0".to_string(),
            });
        }

        if self.server.cors_enabled && self.server.cors_origins.is_empty() {
            tracing::warn!("server.cors_enabled is set but no cors_origins are configured");
        }

        Ok(())
    }

    fn validate_llm(&self) -> Result<(), ConfigError> {
        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(ConfigError::InvalidValue {
                field: "llm.temperature".to_string(),
                message: format!("Must be between 0.0 and 2.0, got {}", self.llm.temperature),
            });
        }

        if self.llm.timeout_seconds == 0 {
            return Err(ConfigError::InvalidValue {
                field: "llm.timeout_seconds".to_string(),
                message: "Timeout must be greater than 0".to_string(),
            });
        }

        // Without a key unknown words go straight to the template fallback
        if self.llm.enabled && !self.llm.is_active() {
            tracing::warn!(
                environment = ?self.environment,
                "llm.api_key not configured; AI translations disabled"
            );
        }

        Ok(())
    }

    fn validate_persistence(&self) -> Result<(), ConfigError> {
        if !self.persistence.enabled {
            if self.environment.is_production() {
                tracing::warn!("Persistence disabled in production; records live in memory only");
            }
            return Ok(());
        }

        if self.persistence.scylla_hosts.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "persistence.scylla_hosts".to_string(),
                message: "At least one host is required when persistence is enabled".to_string(),
            });
        }

        let keyspace_ok = !self.persistence.keyspace.is_empty()
            && self
                .persistence
                .keyspace
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !keyspace_ok {
            return Err(ConfigError::InvalidValue {
                field: "persistence.keyspace".to_string(),
                message: format!(
                    "Keyspace must be non-empty and contain only [A-Za-z0-9_], got '{}'",
                    self.persistence.keyspace
                ),
            });
        }

        if self.persistence.replication_factor == 0 {
            return Err(ConfigError::InvalidValue {
                field: "persistence.replication_factor".to_string(),
                message: "Replication factor must be at least 1".to_string(),
            });
        }

        Ok(())
    }
}

/// Load settings from `config/` relative to the working directory
///
/// Priority (highest to lowest):
/// 1. Environment variables (`BANGLA_DICT__` prefix)
/// 2. config/{env}.yaml (if env specified)
/// 3. config/default.yaml
pub fn load_settings(env: Option<&str>) -> Result<Settings, ConfigError> {
    load_settings_from(Path::new("config"), env)
}

/// Load settings from an explicit config directory
pub fn load_settings_from(config_dir: &Path, env: Option<&str>) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder();

    let default_path = config_dir.join("default");
    builder = builder.add_source(File::with_name(&default_path.to_string_lossy()).required(false));

    if let Some(env_name) = env {
        let env_path = config_dir.join(env_name);
        builder =
            builder.add_source(File::with_name(&env_path.to_string_lossy()).required(false));
    }

    builder = builder.add_source(
        Environment::with_prefix("BANGLA_DICT")
            .separator("__")
            .list_separator(",")
            .with_list_parse_key("persistence.scylla_hosts")
            .with_list_parse_key("server.cors_origins")
            .try_parsing(true),
    );

    let config = builder.build()?;
    let settings: Settings = config.try_deserialize()?;

    settings.validate()?;

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.server.port, 8001);
        assert_eq!(settings.llm.model, "gpt-4o-mini");
        assert!(!settings.persistence.enabled);
        assert!(!settings.resolver.persist_fallback);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_server_validation() {
        let mut settings = Settings::default();

        settings.server.port = 0;
        assert!(settings.validate_server().is_err());
        settings.server.port = 8001;

        settings.server.request_timeout_seconds = 0;
        assert!(settings.validate_server().is_err());
        settings.server.request_timeout_seconds = 30;

        assert!(settings.validate_server().is_ok());
    }

    #[test]
    fn test_llm_temperature_bounds() {
        let mut settings = Settings::default();
        settings.llm.temperature = 2.5;
        assert!(settings.validate_llm().is_err());

        settings.llm.temperature = -0.1;
        assert!(settings.validate_llm().is_err());

        settings.llm.temperature = 0.7;
        assert!(settings.validate_llm().is_ok());
    }

    #[test]
    fn test_llm_active_requires_key() {
        let mut llm = LlmConfig {
            api_key: None,
            ..Default::default()
        };
        assert!(!llm.is_active());

        llm.api_key = Some(String::new());
        assert!(!llm.is_active());

        llm.api_key = Some("sk-test".to_string());
        assert!(llm.is_active());

        llm.enabled = false;
        assert!(!llm.is_active());
    }

    #[test]
    fn test_environment_parse() {
        assert_eq!(RuntimeEnvironment::parse("production"), Some(RuntimeEnvironment::Production));
        assert_eq!(RuntimeEnvironment::parse(" Staging "), Some(RuntimeEnvironment::Staging));
        assert_eq!(RuntimeEnvironment::parse("dev"), Some(RuntimeEnvironment::Development));
        assert_eq!(RuntimeEnvironment::parse("qa"), None);
        assert!(RuntimeEnvironment::parse("prod").is_some_and(|e| e.is_strict()));
    }

    #[test]
    fn test_missing_llm_key_is_not_fatal() {
        for environment in [
            RuntimeEnvironment::Development,
            RuntimeEnvironment::Staging,
            RuntimeEnvironment::Production,
        ] {
            let mut settings = Settings::default();
            settings.environment = environment;
            settings.llm.enabled = true;
            settings.llm.api_key = None;
            assert!(settings.validate().is_ok(), "{:?}", environment);
        }
    }

    #[test]
    fn test_shipped_production_config_keeps_persistence() {
        let config_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../config");
        let settings = load_settings_from(&config_dir, Some("production")).unwrap();

        assert_eq!(settings.environment, RuntimeEnvironment::Production);
        assert!(settings.persistence.enabled);
        assert_eq!(settings.persistence.replication_factor, 3);
        assert!(settings.observability.log_json);
    }

    #[test]
    fn test_persistence_validation() {
        let mut settings = Settings::default();
        settings.persistence.enabled = true;
        settings.persistence.scylla_hosts = vec!["127.0.0.1:9042".to_string()];
        settings.persistence.keyspace = "bangla_dict".to_string();
        assert!(settings.validate_persistence().is_ok());

        settings.persistence.keyspace = "bad-name; DROP".to_string();
        assert!(settings.validate_persistence().is_err());
        settings.persistence.keyspace = "bangla_dict".to_string();

        settings.persistence.scylla_hosts.clear();
        assert!(settings.validate_persistence().is_err());
    }

    #[test]
    fn test_load_settings_from_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("default.yaml"),
            "server:\n  port: 9100\nresolver:\n  persist_fallback: true\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("staging.yaml"),
            "server:\n  port: 9200\nllm:\n  enabled: false\n",
        )
        .unwrap();

        let base = load_settings_from(dir.path(), None).unwrap();
        assert_eq!(base.server.port, 9100);
        assert!(base.resolver.persist_fallback);

        let staging = load_settings_from(dir.path(), Some("staging")).unwrap();
        assert_eq!(staging.server.port, 9200);
        assert!(!staging.llm.enabled);
        assert!(staging.resolver.persist_fallback);
    }

    #[test]
    fn test_load_settings_missing_dir_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = load_settings_from(&dir.path().join("nope"), None).unwrap();
        assert_eq!(settings.server.host, "0.0.0.0");
    }
}
