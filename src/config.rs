// src/config.rs
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

/// Runtime configuration, built once at startup and handed to each component
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerSettings,
    pub model: ModelConfig,
    pub sources: SourcesConfig,
    /// Timeout for each outbound HTTP request
    pub request_timeout_secs: u64,
    /// Budget for one source during fan-out, pagination included
    pub source_timeout_secs: u64,
    pub max_pages: u32,
    pub page_delay_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub address: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub endpoint: String,
    pub name: String,
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    pub adzuna: AdzunaConfig,
    pub jobspikr: JobsPikrConfig,
    pub snapshot: SnapshotConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AdzunaConfig {
    pub base_url: String,
    pub country: String,
    pub app_id: Option<String>,
    pub app_key: Option<String>,
    pub results_per_page: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct JobsPikrConfig {
    pub endpoint: String,
    pub client_id: Option<String>,
    pub client_auth_key: Option<String>,
    pub size: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SnapshotConfig {
    pub path: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    local: Option<AppConfig>,
    production: Option<AppConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerSettings::default(),
            model: ModelConfig::default(),
            sources: SourcesConfig::default(),
            request_timeout_secs: 10,
            source_timeout_secs: 30,
            max_pages: 5,
            page_delay_ms: 1000,
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            address: "0.0.0.0".to_string(),
            port: 5001,
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://generativelanguage.googleapis.com".to_string(),
            name: "gemini-1.5-flash".to_string(),
            api_key: None,
        }
    }
}

impl Default for AdzunaConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.adzuna.com".to_string(),
            country: "us".to_string(),
            app_id: None,
            app_key: None,
            results_per_page: 50,
        }
    }
}

impl Default for JobsPikrConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.jobspikr.com/v2/data".to_string(),
            client_id: None,
            client_auth_key: None,
            size: 50,
        }
    }
}

fn filled(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

impl ModelConfig {
    pub fn api_key(&self) -> Option<&str> {
        filled(&self.api_key)
    }
}

impl AdzunaConfig {
    /// `(app_id, app_key)` when both are set
    pub fn credentials(&self) -> Option<(&str, &str)> {
        Some((filled(&self.app_id)?, filled(&self.app_key)?))
    }
}

impl JobsPikrConfig {
    /// `(client_id, client_auth_key)` when both are set
    pub fn credentials(&self) -> Option<(&str, &str)> {
        Some((filled(&self.client_id)?, filled(&self.client_auth_key)?))
    }
}

impl AppConfig {
    /// Load configuration for the current environment.
    ///
    /// A missing file falls back to defaults; secrets and the port can always
    /// be supplied through environment variables.
    pub fn load(path: &Path) -> Result<Self> {
        let environment = Self::get_environment();
        info!("Loading configuration for environment: {}", environment);

        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            Self::from_yaml_str(&content, &environment)
                .with_context(|| format!("Failed to parse {}", path.display()))?
        } else {
            info!("{} not found, using defaults", path.display());
            Self::default()
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    fn get_environment() -> String {
        std::env::var("JOBHUB_ENV")
            .or_else(|_| std::env::var("ENVIRONMENT"))
            .unwrap_or_else(|_| "local".to_string())
    }

    /// Parse a config document and pick the section for `environment`
    pub fn from_yaml_str(content: &str, environment: &str) -> Result<Self> {
        let file: ConfigFile = serde_yaml::from_str(content).context("Invalid YAML")?;

        let section = match environment {
            "production" => file.production,
            _ => file.local,
        };
        Ok(section.unwrap_or_default())
    }

    /// Overlay values from a key lookup (normally the process environment)
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup("GEMINI_API_KEY") {
            self.model.api_key = Some(key);
        }
        if let Some(id) = lookup("ADZUNA_APP_ID") {
            self.sources.adzuna.app_id = Some(id);
        }
        if let Some(key) = lookup("ADZUNA_APP_KEY") {
            self.sources.adzuna.app_key = Some(key);
        }
        if let Some(id) = lookup("JOBSPIKR_CLIENT_ID") {
            self.sources.jobspikr.client_id = Some(id);
        }
        if let Some(key) = lookup("JOBSPIKR_CLIENT_AUTH_KEY") {
            self.sources.jobspikr.client_auth_key = Some(key);
        }
        if let Some(path) = lookup("JOBS_SNAPSHOT_PATH") {
            self.sources.snapshot.path = Some(PathBuf::from(path));
        }
        if let Some(port) = lookup("PORT").and_then(|p| p.parse().ok()) {
            self.server.port = port;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.request_timeout_secs == 0 {
            anyhow::bail!("request_timeout_secs must be greater than 0");
        }
        if self.source_timeout_secs == 0 {
            anyhow::bail!("source_timeout_secs must be greater than 0");
        }
        if self.max_pages == 0 {
            anyhow::bail!("max_pages must be at least 1");
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn source_timeout(&self) -> Duration {
        Duration::from_secs(self.source_timeout_secs)
    }

    pub fn page_delay(&self) -> Duration {
        Duration::from_millis(self.page_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const SAMPLE: &str = r#"
local:
  max_pages: 2
  page_delay_ms: 0
  sources:
    adzuna:
      app_id: "local-id"
      app_key: "local-key"
production:
  server:
    port: 8080
  source_timeout_secs: 5
  sources:
    snapshot:
      path: "/data/jobs.json"
"#;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.max_pages, 5);
        assert_eq!(config.server.port, 5001);
        assert_eq!(config.sources.adzuna.results_per_page, 50);
        assert!(config.model.api_key().is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_local_section_selected() {
        let config = AppConfig::from_yaml_str(SAMPLE, "local").unwrap();

        assert_eq!(config.max_pages, 2);
        assert_eq!(config.page_delay_ms, 0);
        assert_eq!(
            config.sources.adzuna.credentials(),
            Some(("local-id", "local-key"))
        );
        // untouched fields keep their defaults
        assert_eq!(config.sources.adzuna.country, "us");
    }

    #[test]
    fn test_production_section_selected() {
        let config = AppConfig::from_yaml_str(SAMPLE, "production").unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.source_timeout(), Duration::from_secs(5));
        assert_eq!(
            config.sources.snapshot.path,
            Some(PathBuf::from("/data/jobs.json"))
        );
        assert!(config.sources.adzuna.credentials().is_none());
    }

    #[test]
    fn test_unknown_environment_uses_local() {
        let config = AppConfig::from_yaml_str(SAMPLE, "staging").unwrap();
        assert_eq!(config.max_pages, 2);
    }

    #[test]
    fn test_invalid_yaml_is_rejected() {
        assert!(AppConfig::from_yaml_str("local: [unclosed", "local").is_err());
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("GEMINI_API_KEY", "g-key"),
            ("JOBSPIKR_CLIENT_ID", "cid"),
            ("JOBSPIKR_CLIENT_AUTH_KEY", "ckey"),
            ("PORT", "9000"),
        ]
        .into_iter()
        .collect();

        let mut config = AppConfig::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.model.api_key(), Some("g-key"));
        assert_eq!(config.sources.jobspikr.credentials(), Some(("cid", "ckey")));
        assert_eq!(config.server.port, 9000);
    }

    #[test]
    fn test_blank_credentials_count_as_missing() {
        let mut config = AppConfig::default();
        config.sources.adzuna.app_id = Some("id".to_string());
        config.sources.adzuna.app_key = Some("  ".to_string());

        assert!(config.sources.adzuna.credentials().is_none());
    }

    #[test]
    fn test_validation_rejects_zero_values() {
        let mut config = AppConfig::default();
        config.max_pages = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.source_timeout_secs = 0;
        assert!(config.validate().is_err());
    }
}
