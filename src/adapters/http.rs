use crate::core::advice::AdviceEngine;
use crate::core::endpoint::{handle_request, EndpointReply};
use crate::domain::ports::{CompletionProvider, ConfigProvider};
use axum::{
    body::{Body, Bytes},
    extract::State,
    http::{header::ORIGIN, HeaderMap, HeaderName, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use std::sync::Arc;

pub const ADVICE_PATH: &str = "/advice";
/// Path the deployed browser form posts to.
pub const LEGACY_ADVICE_PATH: &str = "/api/ootb-advice";

pub fn app<P, C>(engine: Arc<AdviceEngine<P, C>>) -> Router
where
    P: CompletionProvider + 'static,
    C: ConfigProvider + 'static,
{
    // 方法判斷交給 endpoint，所以這裡用 any
    Router::new()
        .route(ADVICE_PATH, any(advice::<P, C>))
        .route(LEGACY_ADVICE_PATH, any(advice::<P, C>))
        .with_state(engine)
}

#[tracing::instrument(name = "advice", skip_all, fields(method = %method))]
async fn advice<P, C>(
    State(engine): State<Arc<AdviceEngine<P, C>>>,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> Response
where
    P: CompletionProvider + 'static,
    C: ConfigProvider + 'static,
{
    let origin = headers.get(ORIGIN).and_then(|v| v.to_str().ok());
    let reply = handle_request(&*engine, method.as_str(), origin, &body).await;
    into_response(reply)
}

fn into_response(reply: EndpointReply) -> Response {
    let status = StatusCode::from_u16(reply.status).unwrap_or(StatusCode::OK);
    let mut response = (status, Body::from(reply.body)).into_response();

    for (name, value) in reply.headers {
        match (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(&value),
        ) {
            (Ok(name), Ok(value)) => {
                response.headers_mut().insert(name, value);
            }
            _ => tracing::warn!(header = name, value = %value, "Dropping invalid header"),
        }
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_response_copies_status_and_headers() {
        let reply = EndpointReply {
            status: 405,
            headers: vec![("Access-Control-Allow-Origin", "*".to_string())],
            body: "Method Not Allowed".to_string(),
        };

        let response = into_response(reply);

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers()["access-control-allow-origin"], "*");
    }
}
