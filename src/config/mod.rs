#[cfg(feature = "cli")]
pub mod cli;
pub mod lambda;
pub mod toml_config;

use crate::adapters::openai::DEFAULT_API_BASE;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, validate_range, validate_url, Validate};
use std::fmt;
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_TEMPERATURE: f32 = 0.35;
pub const DEFAULT_MAX_TOKENS: u32 = 600;
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Provider settings shared by the server and the Lambda function.
#[derive(Clone, PartialEq)]
pub struct AdviceConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub api_base_url: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout_seconds: u64,
}

impl Default for AdviceConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            api_base_url: DEFAULT_API_BASE.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

// 不把金鑰印進日誌
impl fmt::Debug for AdviceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdviceConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("api_base_url", &self.api_base_url)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

impl AdviceConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env(|name| std::env::var(name).ok());
        config
    }

    /// 環境變數覆寫目前的值；空字串視為未設定
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(key) = get("OPENAI_API_KEY") {
            self.api_key = Some(key);
        }
        if let Some(model) = get("OOB_MODEL") {
            self.model = model;
        }
        if let Some(base) = get("OPENAI_API_BASE") {
            self.api_base_url = base;
        }
        if let Some(timeout) = get("OOB_TIMEOUT_SECONDS") {
            match timeout.parse() {
                Ok(seconds) => self.timeout_seconds = seconds,
                Err(_) => tracing::warn!(
                    value = %timeout,
                    "OOB_TIMEOUT_SECONDS is not a number, keeping {}s",
                    self.timeout_seconds
                ),
            }
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl ConfigProvider for AdviceConfig {
    fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.trim().is_empty())
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn temperature(&self) -> f32 {
        self.temperature
    }

    fn max_tokens(&self) -> u32 {
        self.max_tokens
    }
}

impl Validate for AdviceConfig {
    fn validate(&self) -> Result<()> {
        validate_url("api_base_url", &self.api_base_url)?;
        validate_non_empty_string("model", &self.model)?;
        validate_range("temperature", self.temperature, 0.0, 2.0)?;
        validate_range("max_tokens", self.max_tokens, 1, 4096)?;
        validate_range("timeout_seconds", self.timeout_seconds, 1, 900)?;

        // 沒有金鑰不是錯誤，endpoint 會回傳 MISSING_OPENAI_KEY
        if self.api_key().is_none() {
            tracing::warn!("⚠️ OPENAI_API_KEY is not set; every request will get fallback advice");
        }

        tracing::debug!("✅ Advice configuration validation passed");
        Ok(())
    }
}
