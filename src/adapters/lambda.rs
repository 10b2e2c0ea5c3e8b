//! API Gateway / Function URL HTTP events for the Lambda binary.
//!
//! Both the REST (`httpMethod`) and the HTTP API / Function URL
//! (`requestContext.http.method`) payload versions are accepted.

#[cfg(feature = "lambda")]
use crate::core::advice::AdviceEngine;
#[cfg(feature = "lambda")]
use crate::core::endpoint::{handle_request, EndpointReply};
#[cfg(feature = "lambda")]
use crate::domain::ports::{CompletionProvider, ConfigProvider};
#[cfg(feature = "lambda")]
use base64::{engine::general_purpose::STANDARD, Engine as _};
#[cfg(feature = "lambda")]
use serde::{Deserialize, Serialize};
#[cfg(feature = "lambda")]
use std::collections::HashMap;

#[cfg(feature = "lambda")]
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpEvent {
    #[serde(default)]
    pub http_method: Option<String>,
    #[serde(default)]
    pub request_context: Option<RequestContext>,
    #[serde(default)]
    pub headers: Option<HashMap<String, String>>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub is_base64_encoded: bool,
}

#[cfg(feature = "lambda")]
#[derive(Debug, Default, Deserialize)]
pub struct RequestContext {
    #[serde(default)]
    pub http: Option<RequestContextHttp>,
}

#[cfg(feature = "lambda")]
#[derive(Debug, Default, Deserialize)]
pub struct RequestContextHttp {
    #[serde(default)]
    pub method: Option<String>,
}

#[cfg(feature = "lambda")]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpResponse {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
    pub is_base64_encoded: bool,
}

#[cfg(feature = "lambda")]
impl HttpEvent {
    pub fn method(&self) -> &str {
        self.http_method
            .as_deref()
            .or_else(|| {
                self.request_context
                    .as_ref()
                    .and_then(|ctx| ctx.http.as_ref())
                    .and_then(|http| http.method.as_deref())
            })
            .unwrap_or("GET")
    }

    /// Header lookup ignoring case; API Gateway keeps the client's casing.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.as_ref().and_then(|headers| {
            headers
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(name))
                .map(|(_, value)| value.as_str())
        })
    }

    /// 解碼後的 body；base64 壞掉時回傳原始位元組，讓 JSON 解析報錯
    pub fn body_bytes(&self) -> Vec<u8> {
        let body = self.body.as_deref().unwrap_or_default();
        if self.is_base64_encoded {
            match STANDARD.decode(body) {
                Ok(decoded) => return decoded,
                Err(e) => tracing::warn!(error = %e, "Event body is not valid base64"),
            }
        }
        body.as_bytes().to_vec()
    }
}

#[cfg(feature = "lambda")]
impl From<EndpointReply> for HttpResponse {
    fn from(reply: EndpointReply) -> Self {
        Self {
            status_code: reply.status,
            headers: reply
                .headers
                .into_iter()
                .map(|(name, value)| (name.to_string(), value))
                .collect(),
            body: reply.body,
            is_base64_encoded: false,
        }
    }
}

#[cfg(feature = "lambda")]
pub async fn handle_event<P, C>(engine: &AdviceEngine<P, C>, event: &HttpEvent) -> HttpResponse
where
    P: CompletionProvider,
    C: ConfigProvider,
{
    let body = event.body_bytes();
    handle_request(engine, event.method(), event.header("origin"), &body)
        .await
        .into()
}

#[cfg(all(test, feature = "lambda"))]
mod tests {
    use super::*;

    #[test]
    fn test_rest_event_method_and_headers() {
        let event: HttpEvent = serde_json::from_value(serde_json::json!({
            "httpMethod": "POST",
            "headers": {"Origin": "https://outofthebox.cz"},
            "body": "{\"area\":\"HR\"}",
            "isBase64Encoded": false
        }))
        .unwrap();

        assert_eq!(event.method(), "POST");
        assert_eq!(event.header("origin"), Some("https://outofthebox.cz"));
        assert_eq!(event.body_bytes(), br#"{"area":"HR"}"#.to_vec());
    }

    #[test]
    fn test_function_url_event_with_base64_body() {
        let event: HttpEvent = serde_json::from_value(serde_json::json!({
            "requestContext": {"http": {"method": "OPTIONS"}},
            "body": STANDARD.encode("{}"),
            "isBase64Encoded": true
        }))
        .unwrap();

        assert_eq!(event.method(), "OPTIONS");
        assert_eq!(event.header("origin"), None);
        assert_eq!(event.body_bytes(), b"{}".to_vec());
    }

    #[test]
    fn test_reply_converts_to_proxy_response() {
        let reply = EndpointReply {
            status: 200,
            headers: vec![("Content-Type", "application/json".to_string())],
            body: "{\"ok\":true}".to_string(),
        };

        let response: HttpResponse = reply.into();
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["statusCode"], 200);
        assert_eq!(json["headers"]["Content-Type"], "application/json");
        assert_eq!(json["isBase64Encoded"], false);
    }

    #[tokio::test]
    async fn test_handle_event_dispatches_post_and_options() {
        let engine = crate::app::server::build_engine(crate::config::AdviceConfig::default())
            .expect("expected engine to build");

        let post: HttpEvent = serde_json::from_value(serde_json::json!({
            "requestContext": {"http": {"method": "POST"}},
            "headers": {"origin": "https://outofthebox.cz"},
            "body": "{\"area\":\"HR\"}"
        }))
        .unwrap();
        let response = handle_event(&engine, &post).await;

        assert_eq!(response.status_code, 200);
        assert_eq!(
            response.headers["Access-Control-Allow-Origin"],
            "https://outofthebox.cz"
        );
        let body: serde_json::Value = serde_json::from_str(&response.body).unwrap();
        assert_eq!(body["error"], "MISSING_OPENAI_KEY");

        let options: HttpEvent =
            serde_json::from_value(serde_json::json!({"httpMethod": "OPTIONS"})).unwrap();
        let response = handle_event(&engine, &options).await;

        assert_eq!(response.status_code, 200);
        assert!(response.body.is_empty());
    }
}
