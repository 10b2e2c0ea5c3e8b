use crate::core::fallback::{fallback_html, fallback_text};
use crate::core::prompt::build_messages;
use crate::core::sanitize::sanitize_html;
use crate::domain::model::{AdviceRequest, AdviceResponse, CompletionRequest};
use crate::domain::ports::{CompletionProvider, ConfigProvider, ProviderError};

pub const MISSING_KEY_ERROR: &str = "MISSING_OPENAI_KEY";
pub const ENDPOINT_EXCEPTION_ERROR: &str = "ENDPOINT_EXCEPTION";

/// 回給前端的診斷訊息上限（字元）
pub const MAX_DETAIL_CHARS: usize = 500;

/// Turns one [`AdviceRequest`] into an [`AdviceResponse`]. Never fails: every
/// error path ends in a failure response carrying the fallback text.
pub struct AdviceEngine<P: CompletionProvider, C: ConfigProvider> {
    provider: P,
    config: C,
}

impl<P: CompletionProvider, C: ConfigProvider> AdviceEngine<P, C> {
    pub fn new(provider: P, config: C) -> Self {
        Self { provider, config }
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    pub async fn advise(&self, request: &AdviceRequest) -> AdviceResponse {
        tracing::info!(
            area = request.area.as_deref().unwrap_or_default(),
            urgency = request.urgency.as_deref().unwrap_or_default(),
            size = request.size.as_deref().unwrap_or_default(),
            "📨 Advice requested"
        );

        let description = request.truncated_description();

        let Some(api_key) = self.config.api_key().filter(|k| !k.trim().is_empty()) else {
            tracing::warn!("OPENAI_API_KEY is not configured, returning fallback advice");
            return AdviceResponse::failure(MISSING_KEY_ERROR, fallback_text());
        };

        let completion_request = CompletionRequest {
            model: self.config.model().to_string(),
            messages: build_messages(request, &description),
            temperature: self.config.temperature(),
            max_tokens: self.config.max_tokens(),
        };

        tracing::debug!(model = %completion_request.model, "Calling completion provider");

        match self.provider.complete(api_key, &completion_request).await {
            Ok(completion) => {
                let sanitized = sanitize_html(completion.first_content());
                if sanitized.trim().is_empty() {
                    tracing::warn!("Completion was empty after sanitizing, using fallback HTML");
                    AdviceResponse::success(fallback_html(request.area.as_deref()))
                } else {
                    tracing::info!("✅ Advice generated ({} chars)", sanitized.chars().count());
                    AdviceResponse::success(sanitized)
                }
            }
            Err(ProviderError::Upstream { status, body }) => {
                tracing::warn!(status, "Completion provider returned an error status");
                AdviceResponse::failure(format!("OPENAI_{}", status), fallback_text())
                    .with_detail(truncate_chars(&body, MAX_DETAIL_CHARS))
                    .with_ai_unavailable(status == 429)
            }
            Err(e) => {
                tracing::error!(error = %e, "❌ Completion call failed");
                exception_response()
            }
        }
    }
}

/// Failure shape for anything that went wrong outside the provider status path.
pub fn exception_response() -> AdviceResponse {
    AdviceResponse::failure(ENDPOINT_EXCEPTION_ERROR, fallback_text())
}

fn truncate_chars(value: &str, max: usize) -> String {
    value.chars().take(max).collect()
}
