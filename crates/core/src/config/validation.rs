//! Post-load checks for `AppConfig`.

use super::AppConfig;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not load configuration: {0}")]
    LoadFailed(String),

    #[error("{field}: {reason}")]
    Invalid { field: String, reason: String },
}

impl From<ConfigError> for crate::Error {
    fn from(err: ConfigError) -> Self {
        crate::Error::InvalidInput(format!("config {}", err))
    }
}

const MAX_BYTES_CEILING: usize = 50 * 1024 * 1024;
const TIMEOUT_RANGE_MS: std::ops::RangeInclusive<u64> = 100..=300_000;

fn invalid(field: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid { field: field.into(), reason: reason.into() }
}

fn non_blank(field: &str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() { Err(invalid(field, "must not be blank")) } else { Ok(()) }
}

impl AppConfig {
    /// Check loaded values: an absolute http(s) `base_url`, a body cap in
    /// `1..=50MiB`, a timeout in `100..=300000` ms, and non-blank user agent
    /// and locale defaults.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base = url::Url::parse(&self.base_url).map_err(|e| invalid("base_url", e.to_string()))?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(invalid("base_url", format!("unsupported scheme: {}", base.scheme())));
        }

        if !(1..=MAX_BYTES_CEILING).contains(&self.max_bytes) {
            return Err(invalid("max_bytes", format!("must be between 1 and {MAX_BYTES_CEILING}")));
        }
        if !TIMEOUT_RANGE_MS.contains(&self.timeout_ms) {
            return Err(invalid("timeout_ms", "must be between 100 and 300000"));
        }

        non_blank("user_agent", &self.user_agent)?;
        non_blank("default_lang", &self.default_lang)?;
        non_blank("default_country", &self.default_country)?;

        if self.default_country.chars().any(|c| c.is_ascii_lowercase()) {
            tracing::warn!(country = %self.default_country, "default_country will be upper-cased per request");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rejected_field(config: AppConfig) -> Option<String> {
        match config.validate() {
            Err(ConfigError::Invalid { field, .. }) => Some(field),
            _ => None,
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn test_base_url_rules() {
        let bad_parse = AppConfig { base_url: "not a url".into(), ..Default::default() };
        assert_eq!(rejected_field(bad_parse).as_deref(), Some("base_url"));

        let bad_scheme = AppConfig { base_url: "ftp://www.youtube.com".into(), ..Default::default() };
        assert_eq!(rejected_field(bad_scheme).as_deref(), Some("base_url"));

        let local = AppConfig { base_url: "http://127.0.0.1:8080".into(), ..Default::default() };
        assert!(local.validate().is_ok());
    }

    #[test]
    fn test_max_bytes_bounds() {
        assert_eq!(rejected_field(AppConfig { max_bytes: 0, ..Default::default() }).as_deref(), Some("max_bytes"));
        let oversized = AppConfig { max_bytes: MAX_BYTES_CEILING + 1, ..Default::default() };
        assert_eq!(rejected_field(oversized).as_deref(), Some("max_bytes"));
        assert!(AppConfig { max_bytes: MAX_BYTES_CEILING, ..Default::default() }.validate().is_ok());
    }

    #[test]
    fn test_timeout_bounds() {
        assert_eq!(rejected_field(AppConfig { timeout_ms: 99, ..Default::default() }).as_deref(), Some("timeout_ms"));
        assert_eq!(
            rejected_field(AppConfig { timeout_ms: 300_001, ..Default::default() }).as_deref(),
            Some("timeout_ms")
        );
        assert!(AppConfig { timeout_ms: 100, ..Default::default() }.validate().is_ok());
    }

    #[test]
    fn test_blank_strings_rejected() {
        let ua = AppConfig { user_agent: String::new(), ..Default::default() };
        assert_eq!(rejected_field(ua).as_deref(), Some("user_agent"));

        let lang = AppConfig { default_lang: "  ".into(), ..Default::default() };
        assert_eq!(rejected_field(lang).as_deref(), Some("default_lang"));

        let country = AppConfig { default_country: String::new(), ..Default::default() };
        assert_eq!(rejected_field(country).as_deref(), Some("default_country"));
    }

    #[test]
    fn test_lowercase_country_is_accepted() {
        assert!(AppConfig { default_country: "us".into(), ..Default::default() }.validate().is_ok());
    }

    #[test]
    fn test_config_error_converts() {
        let err: crate::Error = invalid("max_bytes", "too big").into();
        assert_eq!(err.to_string(), "INVALID_INPUT: config max_bytes: too big");
    }
}
