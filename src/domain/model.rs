use serde::{Deserialize, Deserializer, Serialize};

/// 描述欄位的最大字元數
pub const MAX_DESCRIPTION_CHARS: usize = 2000;

/// 瀏覽器表單送來的問題描述
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AdviceRequest {
    #[serde(default, deserialize_with = "lenient_string")]
    pub area: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub urgency: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub size: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: Option<String>,
}

impl AdviceRequest {
    /// 截斷到 MAX_DESCRIPTION_CHARS 個字元，不會切斷多位元組字元
    pub fn truncated_description(&self) -> String {
        self.description
            .as_deref()
            .unwrap_or_default()
            .chars()
            .take(MAX_DESCRIPTION_CHARS)
            .collect()
    }
}

// 表單可能送數字或布林值，一律轉成字串；null 視為缺少
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

/// Endpoint response. Built only through [`AdviceResponse::success`] and
/// [`AdviceResponse::failure`], so `ok` always matches the populated fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdviceResponse {
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    advice_html: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    advice: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ai_unavailable: Option<bool>,
}

impl AdviceResponse {
    pub fn success(advice_html: impl Into<String>) -> Self {
        Self {
            ok: true,
            advice_html: Some(advice_html.into()),
            advice: None,
            error: None,
            detail: None,
            ai_unavailable: None,
        }
    }

    pub fn failure(error: impl Into<String>, advice: impl Into<String>) -> Self {
        Self {
            ok: false,
            advice_html: None,
            advice: Some(advice.into()),
            error: Some(error.into()),
            detail: None,
            ai_unavailable: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        if !self.ok {
            self.detail = Some(detail.into());
        }
        self
    }

    pub fn with_ai_unavailable(mut self, unavailable: bool) -> Self {
        if !self.ok {
            self.ai_unavailable = Some(unavailable);
        }
        self
    }

    pub fn is_ok(&self) -> bool {
        self.ok
    }

    pub fn advice_html(&self) -> Option<&str> {
        self.advice_html.as_deref()
    }

    pub fn advice(&self) -> Option<&str> {
        self.advice.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }

    pub fn ai_unavailable(&self) -> Option<bool> {
        self.ai_unavailable
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Body of `POST {base}/chat/completions`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompletionResponse {
    #[serde(default)]
    pub choices: Vec<CompletionChoice>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompletionChoice {
    #[serde(default)]
    pub message: Option<CompletionMessage>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompletionMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl CompletionResponse {
    /// 第一個 choice 的文字，去掉前後空白；沒有內容時回傳空字串
    pub fn first_content(&self) -> &str {
        self.choices
            .first()
            .and_then(|c| c.message.as_ref())
            .and_then(|m| m.content.as_deref())
            .map(str::trim)
            .unwrap_or_default()
    }
}
