//! Layered configuration: built-in defaults, then the TOML file named by
//! `TUBEX_CONFIG_FILE`, then `TUBEX_*` environment variables (highest).

use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

const CONFIG_FILE_VAR: &str = "TUBEX_CONFIG_FILE";

pub use validation::ConfigError;

/// Process-wide settings for the transport and locale defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Origin of the video platform, without a trailing path.
    ///
    /// Set via TUBEX_BASE_URL environment variable.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// User-Agent string for HTTP requests.
    ///
    /// Set via TUBEX_USER_AGENT environment variable.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Maximum bytes to buffer per response.
    ///
    /// Set via TUBEX_MAX_BYTES environment variable.
    #[serde(default = "default_max_bytes")]
    pub max_bytes: usize,

    /// HTTP request timeout in milliseconds.
    ///
    /// Set via TUBEX_TIMEOUT_MS environment variable.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Language hint used when a caller does not pass one.
    ///
    /// Set via TUBEX_DEFAULT_LANG environment variable.
    #[serde(default = "default_lang")]
    pub default_lang: String,

    /// Country hint used when a caller does not pass one.
    ///
    /// Set via TUBEX_DEFAULT_COUNTRY environment variable.
    #[serde(default = "default_country")]
    pub default_country: String,
}

fn default_base_url() -> String {
    "https://www.youtube.com".into()
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0".into()
}

fn default_max_bytes() -> usize {
    10_485_760 // 10MB, watch pages are large
}

fn default_timeout_ms() -> u64 {
    20_000
}

fn default_lang() -> String {
    "vi".into()
}

fn default_country() -> String {
    "VN".into()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            max_bytes: default_max_bytes(),
            timeout_ms: default_timeout_ms(),
            default_lang: default_lang(),
            default_country: default_country(),
        }
    }
}

impl AppConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Merge defaults, the optional TOML file and `TUBEX_*` variables, then
    /// validate. Fails on an unreadable file, unparsable values or a
    /// validation error.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn figment() -> Figment {
        let file = std::env::var(CONFIG_FILE_VAR).ok();
        let layered = file
            .into_iter()
            .fold(Figment::from(Serialized::defaults(Self::default())), |figment, path| {
                figment.merge(Toml::file(path))
            });

        layered.merge(
            Env::prefixed("TUBEX_")
                .ignore(&["CONFIG_FILE"])
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.base_url, "https://www.youtube.com");
        assert!(config.user_agent.starts_with("Mozilla/5.0"));
        assert_eq!(config.max_bytes, 10_485_760);
        assert_eq!(config.timeout_ms, 20_000);
        assert_eq!(config.default_lang, "vi");
        assert_eq!(config.default_country, "VN");
    }

    #[test]
    fn test_timeout_duration() {
        let config = AppConfig::default();
        assert_eq!(config.timeout(), Duration::from_secs(20));
    }

    #[test]
    fn test_load_env_overrides() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("TUBEX_DEFAULT_LANG", "en");
            jail.set_env("TUBEX_TIMEOUT_MS", "5000");

            let config = AppConfig::load().expect("config should load");
            assert_eq!(config.default_lang, "en");
            assert_eq!(config.timeout_ms, 5000);
            assert_eq!(config.default_country, "VN");
            Ok(())
        });
    }

    #[test]
    fn test_load_toml_file_below_env() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("tubex.toml", "default_country = \"US\"\ndefault_lang = \"fr\"")?;
            jail.set_env("TUBEX_CONFIG_FILE", "tubex.toml");
            jail.set_env("TUBEX_DEFAULT_LANG", "de");

            let config = AppConfig::load().expect("config should load");
            assert_eq!(config.default_country, "US");
            assert_eq!(config.default_lang, "de");
            Ok(())
        });
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("TUBEX_TIMEOUT_MS", "10");
            let result = AppConfig::load();
            assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "timeout_ms"));
            Ok(())
        });
    }
}
