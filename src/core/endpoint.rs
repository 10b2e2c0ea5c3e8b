use crate::core::advice::{exception_response, AdviceEngine};
use crate::domain::model::{AdviceRequest, AdviceResponse};
use crate::domain::ports::{CompletionProvider, ConfigProvider};

pub const ALLOW_METHODS: &str = "POST, OPTIONS";
pub const ALLOW_HEADERS: &str = "Content-Type";

/// Transport-neutral HTTP reply; the axum and Lambda adapters copy it verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointReply {
    pub status: u16,
    pub headers: Vec<(&'static str, String)>,
    pub body: String,
}

impl EndpointReply {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

pub fn cors_headers(origin: Option<&str>) -> Vec<(&'static str, String)> {
    let origin = origin.filter(|o| !o.is_empty()).unwrap_or("*");
    vec![
        ("Access-Control-Allow-Origin", origin.to_string()),
        ("Access-Control-Allow-Methods", ALLOW_METHODS.to_string()),
        ("Access-Control-Allow-Headers", ALLOW_HEADERS.to_string()),
    ]
}

/// Dispatch one HTTP request to the advice engine.
///
/// OPTIONS answers the CORS preflight, POST runs the engine, anything else is
/// 405. POST always answers 200; failures travel inside the JSON body.
pub async fn handle_request<P, C>(
    engine: &AdviceEngine<P, C>,
    method: &str,
    origin: Option<&str>,
    body: &[u8],
) -> EndpointReply
where
    P: CompletionProvider,
    C: ConfigProvider,
{
    let mut headers = cors_headers(origin);

    if method.eq_ignore_ascii_case("OPTIONS") {
        return EndpointReply {
            status: 200,
            headers,
            body: String::new(),
        };
    }

    if !method.eq_ignore_ascii_case("POST") {
        tracing::debug!(method, "Rejecting unsupported method");
        headers.push(("Content-Type", "text/plain; charset=utf-8".to_string()));
        return EndpointReply {
            status: 405,
            headers,
            body: "Method Not Allowed".to_string(),
        };
    }

    let response = match parse_body(body) {
        Ok(request) => engine.advise(&request).await,
        Err(e) => {
            tracing::error!(error = %e, "❌ Request body is not valid JSON");
            exception_response()
        }
    };

    headers.push(("Content-Type", "application/json".to_string()));
    EndpointReply {
        status: 200,
        headers,
        body: to_json(&response),
    }
}

// 空 body 或 JSON null 都視為空的請求，與表單未填寫時一致
fn parse_body(body: &[u8]) -> serde_json::Result<AdviceRequest> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(AdviceRequest::default());
    }
    serde_json::from_slice::<Option<AdviceRequest>>(body).map(Option::unwrap_or_default)
}

fn to_json(response: &AdviceResponse) -> String {
    serde_json::to_string(response).unwrap_or_else(|e| {
        tracing::error!(error = %e, "Failed to serialize advice response");
        r#"{"ok":false,"error":"ENDPOINT_EXCEPTION"}"#.to_string()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::CompletionRequest;
    use crate::domain::model::CompletionResponse;
    use crate::domain::ports::ProviderError;
    use async_trait::async_trait;

    struct NoKey;

    impl ConfigProvider for NoKey {
        fn api_key(&self) -> Option<&str> {
            None
        }

        fn model(&self) -> &str {
            "gpt-4o-mini"
        }

        fn temperature(&self) -> f32 {
            0.35
        }

        fn max_tokens(&self) -> u32 {
            600
        }
    }

    struct Unreachable;

    #[async_trait]
    impl CompletionProvider for Unreachable {
        async fn complete(
            &self,
            _api_key: &str,
            _request: &CompletionRequest,
        ) -> Result<CompletionResponse, ProviderError> {
            Err(ProviderError::Transport("not expected".into()))
        }
    }

    fn engine() -> AdviceEngine<Unreachable, NoKey> {
        AdviceEngine::new(Unreachable, NoKey)
    }

    #[tokio::test]
    async fn test_options_is_empty_preflight() {
        let reply = handle_request(&engine(), "OPTIONS", Some("https://outofthebox.cz"), b"").await;

        assert_eq!(reply.status, 200);
        assert!(reply.body.is_empty());
        assert_eq!(
            reply.header("access-control-allow-origin"),
            Some("https://outofthebox.cz")
        );
        assert_eq!(reply.header("Access-Control-Allow-Methods"), Some(ALLOW_METHODS));
        assert_eq!(reply.header("Access-Control-Allow-Headers"), Some(ALLOW_HEADERS));
    }

    #[tokio::test]
    async fn test_other_methods_are_405() {
        for method in ["GET", "PUT", "DELETE", "PATCH"] {
            let reply = handle_request(&engine(), method, None, b"").await;
            assert_eq!(reply.status, 405, "{method}");
            assert_eq!(reply.header("Access-Control-Allow-Origin"), Some("*"));
        }
    }

    #[tokio::test]
    async fn test_post_without_key_reports_missing_key() {
        let reply = handle_request(&engine(), "post", None, br#"{"area":"HR"}"#).await;

        assert_eq!(reply.status, 200);
        assert_eq!(reply.header("content-type"), Some("application/json"));
        let json: serde_json::Value = serde_json::from_str(&reply.body).unwrap();
        assert_eq!(json["ok"], false);
        assert_eq!(json["error"], "MISSING_OPENAI_KEY");
        assert_eq!(json["advice"], crate::core::fallback::fallback_text());
    }

    #[tokio::test]
    async fn test_empty_body_is_treated_as_empty_request() {
        let reply = handle_request(&engine(), "POST", None, b"  ").await;

        let json: serde_json::Value = serde_json::from_str(&reply.body).unwrap();
        assert_eq!(json["error"], "MISSING_OPENAI_KEY");
    }

    #[tokio::test]
    async fn test_null_body_is_treated_as_empty_request() {
        let reply = handle_request(&engine(), "POST", None, b"null").await;

        let json: serde_json::Value = serde_json::from_str(&reply.body).unwrap();
        assert_eq!(json["error"], "MISSING_OPENAI_KEY");
    }

    #[test]
    fn test_parse_body_accepts_null_and_empty() {
        assert_eq!(parse_body(b"null").unwrap(), AdviceRequest::default());
        assert_eq!(parse_body(b"").unwrap(), AdviceRequest::default());
        assert!(parse_body(b"[1, 2]").is_err());
    }

    #[tokio::test]
    async fn test_malformed_body_is_endpoint_exception() {
        let reply = handle_request(&engine(), "POST", Some(""), b"{not json").await;

        assert_eq!(reply.status, 200);
        assert_eq!(reply.header("Access-Control-Allow-Origin"), Some("*"));
        let json: serde_json::Value = serde_json::from_str(&reply.body).unwrap();
        assert_eq!(json["ok"], false);
        assert_eq!(json["error"], "ENDPOINT_EXCEPTION");
    }
}
