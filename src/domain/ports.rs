use crate::domain::model::{CompletionRequest, CompletionResponse};
use async_trait::async_trait;
use thiserror::Error;

/// Failure modes of one call to the completion provider.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("provider transport error: {0}")]
    Transport(String),

    #[error("provider returned HTTP {status}")]
    Upstream { status: u16, body: String },

    #[error("provider response decode error: {0}")]
    Decode(String),
}

#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(
        &self,
        api_key: &str,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, ProviderError>;
}

pub trait ConfigProvider: Send + Sync {
    /// `None` 表示沒有設定金鑰；空字串也算沒有
    fn api_key(&self) -> Option<&str>;
    fn model(&self) -> &str;
    fn temperature(&self) -> f32;
    fn max_tokens(&self) -> u32;
}
