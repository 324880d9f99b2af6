use crate::utils::error::{CheckoutError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_SESSIONS_PATH: &str = "/api/checkout_sessions";
pub const DEFAULT_PROVIDER_URL: &str = "https://api.stripe.com";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
pub const DEFAULT_CURRENCY: &str = "USD";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutConfig {
    pub api: ApiConfig,
    pub provider: ProviderConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

/// The shop's own server, which creates checkout sessions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub sessions_path: Option<String>,
    pub timeout_seconds: Option<u64>,
}

/// The hosted payment provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub base_url: Option<String>,
    pub publishable_key: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub currency: Option<String>,
}

impl CheckoutConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CheckoutError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| CheckoutError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${STRIPE_PUBLISHABLE_KEY})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| CheckoutError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| {
                tracing::warn!("Environment variable {} is not set", var_name);
                format!("${{{}}}", var_name)
            })
        });

        Ok(result.to_string())
    }

    pub fn sessions_url(&self) -> String {
        let path = self
            .api
            .sessions_path
            .as_deref()
            .unwrap_or(DEFAULT_SESSIONS_PATH);
        join_url(&self.api.base_url, path)
    }

    pub fn provider_url(&self) -> &str {
        self.provider
            .base_url
            .as_deref()
            .unwrap_or(DEFAULT_PROVIDER_URL)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS))
    }

    pub fn currency(&self) -> &str {
        self.display.currency.as_deref().unwrap_or(DEFAULT_CURRENCY)
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validation::validate_url("api.base_url", &self.api.base_url)?;
        validation::validate_url("api.sessions_path", &self.sessions_url())?;
        validation::validate_url("provider.base_url", self.provider_url())?;

        if self.provider.publishable_key.contains("${") {
            return Err(CheckoutError::MissingConfigError {
                field: "provider.publishable_key".to_string(),
            });
        }
        validation::validate_non_empty_string(
            "provider.publishable_key",
            &self.provider.publishable_key,
        )?;

        if let Some(timeout) = self.api.timeout_seconds {
            validation::validate_range("api.timeout_seconds", timeout, 1, 300)?;
        }

        validation::validate_currency_code("display.currency", self.currency())
    }
}

impl Validate for CheckoutConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

pub(crate) fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const BASIC: &str = r#"
[api]
base_url = "http://localhost:3000/"

[provider]
publishable_key = "pk_test_123"
"#;

    #[test]
    fn test_parse_basic_config_with_defaults() {
        let config = CheckoutConfig::from_toml_str(BASIC).unwrap();

        assert_eq!(
            config.sessions_url(),
            "http://localhost:3000/api/checkout_sessions"
        );
        assert_eq!(config.provider_url(), "https://api.stripe.com");
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.currency(), "USD");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("BAG_CHECKOUT_TEST_KEY", "pk_test_from_env");

        let toml_content = r#"
[api]
base_url = "https://shop.example.com"
sessions_path = "/v2/sessions"
timeout_seconds = 10

[provider]
base_url = "https://payments.example.com"
publishable_key = "${BAG_CHECKOUT_TEST_KEY}"

[display]
currency = "EUR"
"#;

        let config = CheckoutConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.provider.publishable_key, "pk_test_from_env");
        assert_eq!(config.sessions_url(), "https://shop.example.com/v2/sessions");
        assert_eq!(config.currency(), "EUR");
        assert!(config.validate().is_ok());

        std::env::remove_var("BAG_CHECKOUT_TEST_KEY");
    }

    #[test]
    fn test_unresolved_key_is_reported_missing() {
        let toml_content = r#"
[api]
base_url = "https://shop.example.com"

[provider]
publishable_key = "${BAG_CHECKOUT_UNSET_KEY_FOR_TEST}"
"#;

        let config = CheckoutConfig::from_toml_str(toml_content).unwrap();
        assert!(matches!(
            config.validate(),
            Err(CheckoutError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_config_validation() {
        let bad_url = BASIC.replace("http://localhost:3000/", "invalid-url");
        assert!(CheckoutConfig::from_toml_str(&bad_url)
            .unwrap()
            .validate()
            .is_err());

        let bad_currency = format!("{}\n[display]\ncurrency = \"dollars\"\n", BASIC);
        assert!(CheckoutConfig::from_toml_str(&bad_currency)
            .unwrap()
            .validate()
            .is_err());
    }

    #[test]
    fn test_missing_section_fails_to_parse() {
        let result = CheckoutConfig::from_toml_str("[api]\nbase_url = \"http://x\"\n");
        assert!(matches!(
            result,
            Err(CheckoutError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(BASIC.as_bytes()).unwrap();

        let config = CheckoutConfig::from_file(file.path()).unwrap();
        assert_eq!(config.provider.publishable_key, "pk_test_123");
    }
}
