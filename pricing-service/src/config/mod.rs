use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;

/// Default ScrapingBee API base URL.
pub const SCRAPINGBEE_API_BASE: &str = "https://app.scrapingbee.com/api/v1";

#[derive(Debug, Clone, Deserialize)]
pub struct PricingConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub scrapingbee: ScrapingBeeConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScrapingBeeConfig {
    /// API key; an empty key means the service runs against the mock provider.
    pub api_key: Secret<String>,
    /// Base URL, overridable for tests.
    pub base_url: String,
}

impl ScrapingBeeConfig {
    pub fn is_configured(&self) -> bool {
        !self.api_key.expose_secret().is_empty()
    }
}

impl PricingConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        let is_prod = core_config::is_prod();

        Ok(PricingConfig {
            common: common_config,
            scrapingbee: ScrapingBeeConfig {
                api_key: Secret::new(core_config::get_env(
                    "SCRAPINGBEE_API_KEY",
                    Some(""),
                    is_prod,
                )?),
                base_url: core_config::get_env(
                    "SCRAPINGBEE_BASE_URL",
                    Some(SCRAPINGBEE_API_BASE),
                    is_prod,
                )?,
            },
        })
    }
}
