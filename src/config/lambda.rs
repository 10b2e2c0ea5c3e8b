#[cfg(feature = "lambda")]
use crate::config::AdviceConfig;
#[cfg(feature = "lambda")]
use crate::domain::ports::ConfigProvider;
#[cfg(feature = "lambda")]
use crate::utils::error::Result;
#[cfg(feature = "lambda")]
use crate::utils::validation::Validate;

/// Read on every invocation so a changed environment takes effect without a
/// cold start. The Lambda binary rebuilds its provider client when the base
/// URL or timeout differ from the startup values.
#[cfg(feature = "lambda")]
#[derive(Debug, Clone)]
pub struct LambdaConfig {
    pub advice: AdviceConfig,
}

#[cfg(feature = "lambda")]
impl LambdaConfig {
    pub fn from_env() -> Self {
        Self {
            advice: AdviceConfig::from_env(),
        }
    }
}

#[cfg(feature = "lambda")]
impl ConfigProvider for LambdaConfig {
    fn api_key(&self) -> Option<&str> {
        self.advice.api_key()
    }

    fn model(&self) -> &str {
        self.advice.model()
    }

    fn temperature(&self) -> f32 {
        self.advice.temperature()
    }

    fn max_tokens(&self) -> u32 {
        self.advice.max_tokens()
    }
}

#[cfg(feature = "lambda")]
impl Validate for LambdaConfig {
    fn validate(&self) -> Result<()> {
        self.advice.validate()?;
        tracing::debug!("✅ Lambda configuration validation passed");
        Ok(())
    }
}
