use anyhow::{Context, bail};
use matchlens_store::client::{HttpClientConfig, RetryPolicy};
use matchlens_store::postgrest::DEFAULT_TABLE;
use matchlens_store::{CacheConfig, PostgrestConfig};
use matchlens_ui::UiConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

const MAX_READINESS_ATTEMPTS: u32 = 3;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub store: StoreSettings,

    #[serde(default)]
    pub cache: CacheSettings,

    #[serde(default)]
    pub dashboard: DashboardSettings,

    #[serde(default)]
    pub ui: UiConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreSettings {
    /// Supabase project URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default = "default_table")]
    pub table: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Startup readiness attempts, between 1 and 3
    #[serde(default = "default_readiness_attempts")]
    pub readiness_attempts: u32,

    #[serde(default = "default_readiness_delay_ms")]
    pub readiness_delay_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheSettings {
    /// How long fetched records are served without re-querying
    #[serde(default = "default_freshness_secs")]
    pub freshness_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSettings {
    /// Rows in the recent games table
    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            url: None,
            api_key: None,
            table: default_table(),
            timeout_secs: default_timeout_secs(),
            readiness_attempts: default_readiness_attempts(),
            readiness_delay_ms: default_readiness_delay_ms(),
        }
    }
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            freshness_secs: default_freshness_secs(),
        }
    }
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            recent_limit: default_recent_limit(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl ServerConfig {
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let config = if path.extension().and_then(|s| s.to_str()) == Some("toml") {
            toml::from_str(&contents)
                .with_context(|| format!("Invalid TOML in {}", path.display()))?
        } else {
            // Default to YAML
            serde_yaml::from_str(&contents)
                .with_context(|| format!("Invalid YAML in {}", path.display()))?
        };

        Ok(config)
    }

    /// Merge environment variables into config (env vars take precedence)
    pub fn merge_env(&mut self) {
        self.merge_vars(|key| std::env::var(key).ok());
    }

    /// Merge overrides from `lookup`; unparseable numbers are ignored with a warning
    pub fn merge_vars(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        // Store credentials (no MATCHLENS_ prefix for these)
        if let Some(url) = lookup("SUPABASE_URL") {
            self.store.url = Some(url);
        }
        if let Some(key) = lookup("SUPABASE_KEY") {
            self.store.api_key = Some(key);
        }
        if let Some(table) = lookup("MATCHLENS_TABLE") {
            self.store.table = table;
        }

        if let Some(val) = lookup("MATCHLENS_CACHE_SECS") {
            match val.parse::<u64>() {
                Ok(secs) => self.cache.freshness_secs = secs,
                Err(_) => eprintln!("Warning: Invalid MATCHLENS_CACHE_SECS '{}', ignoring", val),
            }
        }

        if let Some(val) = lookup("MATCHLENS_RECENT_LIMIT") {
            match val.parse::<usize>() {
                Ok(limit) => self.dashboard.recent_limit = limit,
                Err(_) => eprintln!("Warning: Invalid MATCHLENS_RECENT_LIMIT '{}', ignoring", val),
            }
        }

        if let Some(val) = lookup("MATCHLENS_LOG_LEVEL") {
            self.logging.level = val;
        }

        // Server settings
        if let Some(val) = lookup("MATCHLENS_PORT") {
            match val.parse::<u16>() {
                Ok(port) => self.ui.port = port,
                Err(_) => eprintln!("Warning: Invalid MATCHLENS_PORT '{}', ignoring", val),
            }
        }

        if let Some(val) = lookup("MATCHLENS_HOST") {
            self.ui.host = val;
        }
    }

    /// Connector configuration; fails when credentials are missing
    pub fn postgrest_config(&self) -> anyhow::Result<PostgrestConfig> {
        let Some(url) = self.store.url.as_deref().filter(|s| !s.trim().is_empty()) else {
            bail!("Store URL not configured (set SUPABASE_URL or store.url)");
        };
        let Some(api_key) = self.store.api_key.as_deref().filter(|s| !s.trim().is_empty()) else {
            bail!("Store API key not configured (set SUPABASE_KEY or store.api_key)");
        };

        let client_config = HttpClientConfig {
            timeout_secs: self.store.timeout_secs,
            ..HttpClientConfig::default()
        };
        let readiness = RetryPolicy {
            max_attempts: self.store.readiness_attempts.clamp(1, MAX_READINESS_ATTEMPTS),
            delay: Duration::from_millis(self.store.readiness_delay_ms),
        };

        Ok(PostgrestConfig::new(url, api_key)
            .with_table(&self.store.table)
            .with_client_config(client_config)
            .with_readiness(readiness))
    }

    pub fn cache_config(&self) -> CacheConfig {
        CacheConfig {
            freshness: Duration::from_secs(self.cache.freshness_secs),
        }
    }
}

fn default_table() -> String {
    DEFAULT_TABLE.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_readiness_attempts() -> u32 {
    3
}

fn default_readiness_delay_ms() -> u64 {
    500
}

fn default_freshness_secs() -> u64 {
    300
}

fn default_recent_limit() -> usize {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::Builder;

    fn write_config(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.store.table, "ai_chess_match_data");
        assert_eq!(config.store.timeout_secs, 30);
        assert_eq!(config.store.readiness_attempts, 3);
        assert_eq!(config.store.readiness_delay_ms, 500);
        assert_eq!(config.cache.freshness_secs, 300);
        assert_eq!(config.dashboard.recent_limit, 10);
        assert_eq!(config.ui.host, "127.0.0.1");
        assert_eq!(config.ui.port, 8083);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_from_yaml_file() {
        let file = write_config(
            ".yaml",
            r#"
store:
  url: https://example.supabase.co
  api_key: anon
cache:
  freshness_secs: 60
ui:
  port: 9090
"#,
        );

        let config = ServerConfig::from_file(file.path()).unwrap();
        assert_eq!(config.store.url.as_deref(), Some("https://example.supabase.co"));
        assert_eq!(config.store.table, "ai_chess_match_data");
        assert_eq!(config.cache.freshness_secs, 60);
        assert_eq!(config.ui.port, 9090);
        assert_eq!(config.ui.host, "127.0.0.1");
    }

    #[test]
    fn test_from_toml_file() {
        let file = write_config(
            ".toml",
            r#"
[store]
url = "https://example.supabase.co"
table = "matches"

[dashboard]
recent_limit = 25

[logging]
level = "debug"
"#,
        );

        let config = ServerConfig::from_file(file.path()).unwrap();
        assert_eq!(config.store.table, "matches");
        assert_eq!(config.dashboard.recent_limit, 25);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_invalid_file_is_error() {
        let file = write_config(".toml", "store = [");
        assert!(ServerConfig::from_file(file.path()).is_err());
        assert!(ServerConfig::from_file("/no/such/config.yaml").is_err());
    }

    #[test]
    fn test_env_overrides_file() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("SUPABASE_URL", "https://env.supabase.co"),
            ("SUPABASE_KEY", "env-key"),
            ("MATCHLENS_TABLE", "env_table"),
            ("MATCHLENS_PORT", "8100"),
            ("MATCHLENS_HOST", "0.0.0.0"),
            ("MATCHLENS_CACHE_SECS", "0"),
            ("MATCHLENS_RECENT_LIMIT", "5"),
            ("MATCHLENS_LOG_LEVEL", "warn"),
        ]);

        let mut config = ServerConfig::default();
        config.store.url = Some("https://file.supabase.co".to_string());
        config.merge_vars(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.store.url.as_deref(), Some("https://env.supabase.co"));
        assert_eq!(config.store.api_key.as_deref(), Some("env-key"));
        assert_eq!(config.store.table, "env_table");
        assert_eq!(config.ui.port, 8100);
        assert_eq!(config.ui.host, "0.0.0.0");
        assert_eq!(config.cache.freshness_secs, 0);
        assert_eq!(config.dashboard.recent_limit, 5);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_invalid_env_numbers_are_ignored() {
        let vars: HashMap<&str, &str> =
            HashMap::from([("MATCHLENS_PORT", "not-a-port"), ("MATCHLENS_CACHE_SECS", "-1")]);

        let mut config = ServerConfig::default();
        config.merge_vars(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.ui.port, 8083);
        assert_eq!(config.cache.freshness_secs, 300);
    }

    #[test]
    fn test_postgrest_config_requires_credentials() {
        let mut config = ServerConfig::default();
        assert!(config.postgrest_config().is_err());

        config.store.url = Some("https://example.supabase.co".to_string());
        config.store.api_key = Some("  ".to_string());
        assert!(config.postgrest_config().is_err());

        config.store.api_key = Some("anon".to_string());
        config.store.readiness_attempts = 0;
        let pg = config.postgrest_config().unwrap();
        assert_eq!(pg.table, "ai_chess_match_data");
        assert_eq!(pg.client_config.timeout_secs, 30);
        assert_eq!(pg.readiness.max_attempts, 1);
        assert_eq!(pg.readiness.delay, Duration::from_millis(500));
    }

    #[test]
    fn test_readiness_attempts_capped_at_three() {
        let mut config = ServerConfig::default();
        config.store.url = Some("https://example.supabase.co".to_string());
        config.store.api_key = Some("anon".to_string());
        config.store.readiness_attempts = 10;

        let pg = config.postgrest_config().unwrap();
        assert_eq!(pg.readiness.max_attempts, 3);
    }

    #[test]
    fn test_cache_config() {
        let mut config = ServerConfig::default();
        config.cache.freshness_secs = 42;
        assert_eq!(config.cache_config().freshness, Duration::from_secs(42));
    }
}
