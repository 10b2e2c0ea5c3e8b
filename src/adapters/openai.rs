use crate::domain::model::{CompletionRequest, CompletionResponse};
use crate::domain::ports::{CompletionProvider, ProviderError};
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

/// Thin reqwest wrapper around the chat-completions API.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    http: Client,
    base_url: String,
    timeout: Duration,
}

impl OpenAiClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
            timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// 設定沒變就沿用同一個連線池，否則依新的 base URL 與逾時重建
    pub fn reconfigured(&self, base_url: &str, timeout: Duration) -> Result<Self> {
        if self.base_url == base_url && self.timeout == timeout {
            return Ok(self.clone());
        }
        tracing::info!(base_url, ?timeout, "🔄 Provider settings changed, rebuilding client");
        Self::new(base_url, timeout)
    }

    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl CompletionProvider for OpenAiClient {
    async fn complete(
        &self,
        api_key: &str,
        request: &CompletionRequest,
    ) -> std::result::Result<CompletionResponse, ProviderError> {
        let url = self.completions_url();
        tracing::debug!("Making completion request to: {}", url);

        let res = self
            .http
            .post(url)
            .bearer_auth(api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;
        let status = res.status();

        tracing::debug!("Completion response status: {}", status);

        // 保留上游狀態碼與原始 body，讓 engine 轉成 OPENAI_<status>
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(ProviderError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        res.json::<CompletionResponse>()
            .await
            .map_err(|e| ProviderError::Decode(e.to_string()))
    }
}
