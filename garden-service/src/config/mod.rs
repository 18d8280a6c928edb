use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;

/// Default generative-language API base URL.
pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Debug, Clone, Deserialize)]
pub struct GardenConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub google: GoogleConfig,
    pub models: ModelConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GoogleConfig {
    /// API key; an empty key means the service runs against the mock provider.
    pub api_key: String,
    /// Base URL, overridable for tests.
    pub api_base: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    /// Text model, `gemini-1.5-flash` for speed/cost or `gemini-1.5-pro`
    /// for complex reasoning.
    pub text_model: String,
}

impl GardenConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        let is_prod = core_config::is_prod();

        Ok(GardenConfig {
            common: common_config,
            google: GoogleConfig {
                api_key: core_config::get_env("GEMINI_API_KEY", Some(""), is_prod)?,
                api_base: core_config::get_env("GEMINI_API_BASE", Some(GEMINI_API_BASE), is_prod)?,
            },
            models: ModelConfig {
                text_model: core_config::get_env(
                    "GARDEN_TEXT_MODEL",
                    Some("gemini-1.5-flash"),
                    is_prod,
                )?,
            },
        })
    }
}
