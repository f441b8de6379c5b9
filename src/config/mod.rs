use crate::error::{AmendError, Result};
use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

const CONFIG_DIR_NAME: &str = ".amendlaw";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub law: LawConfig,

    /// Cache configuration
    #[serde(default)]
    pub cache: CacheConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LawConfig {
    /// `law.go.kr` OC API key used by the corpus fetcher.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

/// Cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Enable/disable cache (default: true)
    #[serde(default = "default_cache_enabled")]
    pub enabled: bool,

    /// TTL in seconds (default: 86400 = 24 hours)
    #[serde(default = "default_cache_ttl")]
    pub ttl_seconds: u64,

    /// Maximum cache size in MB (default: 100)
    #[serde(default = "default_cache_max_size")]
    pub max_size_mb: u64,

    /// Cache directory path (default: user's cache directory + "amendlaw")
    #[serde(default = "default_cache_dir", skip_serializing_if = "Option::is_none")]
    pub cache_dir: Option<PathBuf>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: default_cache_enabled(),
            ttl_seconds: default_cache_ttl(),
            max_size_mb: default_cache_max_size(),
            cache_dir: default_cache_dir(),
        }
    }
}

fn default_cache_enabled() -> bool {
    true
}

fn default_cache_ttl() -> u64 {
    86400
}

fn default_cache_max_size() -> u64 {
    100
}

fn default_cache_dir() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join("amendlaw"))
}

impl CacheConfig {
    /// Get the cache database file path
    pub fn get_cache_db_path(&self) -> Result<PathBuf> {
        let cache_dir = self
            .cache_dir
            .clone()
            .or_else(|| dirs::cache_dir().map(|dir| dir.join("amendlaw")))
            .ok_or_else(|| AmendError::Config("Could not determine cache directory".to_string()))?;

        if !cache_dir.exists() {
            std::fs::create_dir_all(&cache_dir)
                .map_err(|e| AmendError::Config(format!("Failed to create cache directory: {e}")))?;

            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                let permissions = std::fs::Permissions::from_mode(0o700);
                std::fs::set_permissions(&cache_dir, permissions)
                    .map_err(|e| AmendError::Config(format!("Failed to set cache directory permissions: {e}")))?;
            }
        }

        Ok(cache_dir.join("cache.db"))
    }

    /// Convert to the cache module's CacheConfig
    pub fn to_cache_config(&self) -> crate::cache::CacheConfig {
        let db_path = self.get_cache_db_path().unwrap_or_else(|_| PathBuf::from("cache.db"));

        crate::cache::CacheConfig {
            max_size: self.max_size_mb * 1024 * 1024,
            default_ttl: Duration::seconds(self.ttl_seconds as i64),
            db_path,
        }
    }
}

impl Config {
    pub fn config_path() -> Result<PathBuf> {
        let home_dir = dirs::home_dir()
            .ok_or_else(|| AmendError::Config("Could not determine home directory".to_string()))?;
        Ok(home_dir.join(CONFIG_DIR_NAME))
    }

    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_path()?.join(CONFIG_FILE_NAME))
    }

    /// Initialize configuration directory and file
    pub fn initialize() -> Result<()> {
        let config_dir = Self::config_path()?;

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)
                .map_err(|e| AmendError::Config(format!("Failed to create config directory: {e}")))?;

            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                let permissions = fs::Permissions::from_mode(0o700);
                fs::set_permissions(&config_dir, permissions)
                    .map_err(|e| AmendError::Config(format!("Failed to set directory permissions: {e}")))?;
            }
        }

        let config_file = Self::config_file_path()?;
        if !config_file.exists() {
            let default_config = Self::default();
            let toml_str = toml::to_string_pretty(&default_config)
                .map_err(|e| AmendError::Config(format!("Failed to serialize config: {e}")))?;
            fs::write(&config_file, toml_str)
                .map_err(|e| AmendError::Config(format!("Failed to write config file: {e}")))?;

            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                let permissions = fs::Permissions::from_mode(0o600);
                fs::set_permissions(&config_file, permissions)
                    .map_err(|e| AmendError::Config(format!("Failed to set file permissions: {e}")))?;
            }
        }

        Ok(())
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        Self::initialize()?;

        let config_file = Self::config_file_path()?;
        let contents = fs::read_to_string(&config_file)
            .map_err(|e| AmendError::Config(format!("Failed to read config file: {e}")))?;

        toml::from_str(&contents).map_err(|e| AmendError::Config(format!("Failed to parse config file: {e}")))
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        Self::initialize()?;

        let config_file = Self::config_file_path()?;
        let toml_str =
            toml::to_string_pretty(self).map_err(|e| AmendError::Config(format!("Failed to serialize config: {e}")))?;

        fs::write(&config_file, toml_str).map_err(|e| AmendError::Config(format!("Failed to write config file: {e}")))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = fs::Permissions::from_mode(0o600);
            fs::set_permissions(&config_file, permissions)
                .map_err(|e| AmendError::Config(format!("Failed to set file permissions: {e}")))?;
        }

        Ok(())
    }

    /// Get the law.go.kr API key
    pub fn get_law_api_key(&self) -> Option<String> {
        self.law.key.clone()
    }

    /// Set a configuration value by key path
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "law.key" => self.law.key = Some(value.to_string()),
            "cache.enabled" => {
                self.cache.enabled = value
                    .parse::<bool>()
                    .map_err(|_| AmendError::Config(format!("Invalid boolean value: {value}")))?;
            }
            "cache.ttl_seconds" => {
                self.cache.ttl_seconds = value
                    .parse::<u64>()
                    .map_err(|_| AmendError::Config(format!("Invalid TTL seconds value: {value}")))?;
            }
            "cache.max_size_mb" => {
                self.cache.max_size_mb = value
                    .parse::<u64>()
                    .map_err(|_| AmendError::Config(format!("Invalid cache size value: {value}")))?;
            }
            "cache.cache_dir" => self.cache.cache_dir = Some(PathBuf::from(value)),
            _ => return Err(AmendError::Config(format!("Unknown configuration key: {key}"))),
        }

        self.save()?;
        Ok(())
    }

    /// Get a configuration value by key path
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "law.key" => self.law.key.clone(),
            "cache.enabled" => Some(self.cache.enabled.to_string()),
            "cache.ttl_seconds" => Some(self.cache.ttl_seconds.to_string()),
            "cache.max_size_mb" => Some(self.cache.max_size_mb.to_string()),
            "cache.cache_dir" => self.cache.cache_dir.as_ref().map(|p| p.display().to_string()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_config_defaults() {
        let config = CacheConfig::default();
        assert!(config.enabled);
        assert_eq!(config.ttl_seconds, 86400);
        assert_eq!(config.max_size_mb, 100);
        assert!(config.cache_dir.is_some());
    }

    #[test]
    fn test_cache_config_from_toml() {
        let toml_str = r#"
[law]
key = "test-key"

[cache]
enabled = false
ttl_seconds = 3600
max_size_mb = 50
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert!(!config.cache.enabled);
        assert_eq!(config.cache.ttl_seconds, 3600);
        assert_eq!(config.cache.max_size_mb, 50);
        assert_eq!(config.law.key, Some("test-key".to_string()));
    }

    #[test]
    fn test_cache_config_conversion() {
        let config_cache = CacheConfig {
            enabled: true,
            ttl_seconds: 3600,
            max_size_mb: 50,
            cache_dir: Some(PathBuf::from("/tmp/test")),
        };
        let cache_config = config_cache.to_cache_config();
        assert_eq!(cache_config.max_size, 50 * 1024 * 1024);
        assert_eq!(cache_config.default_ttl.num_seconds(), 3600);
    }

    #[test]
    fn test_config_get_set_cache_values() {
        let mut config = Config::default();
        config.set("cache.enabled", "false").unwrap();
        config.set("cache.ttl_seconds", "7200").unwrap();
        config.set("cache.max_size_mb", "250").unwrap();

        assert!(!config.cache.enabled);
        assert_eq!(config.cache.ttl_seconds, 7200);
        assert_eq!(config.cache.max_size_mb, 250);

        assert_eq!(config.get("cache.enabled"), Some("false".to_string()));
        assert_eq!(config.get("cache.ttl_seconds"), Some("7200".to_string()));
        assert_eq!(config.get("cache.max_size_mb"), Some("250".to_string()));
    }
}
