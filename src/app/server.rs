use crate::adapters::http;
use crate::adapters::openai::OpenAiClient;
use crate::config::AdviceConfig;
use crate::core::advice::AdviceEngine;
use crate::utils::error::{AdviceError, Result};
use std::net::SocketAddr;
use std::sync::Arc;

pub type OpenAiEngine = AdviceEngine<OpenAiClient, AdviceConfig>;

pub fn build_engine(config: AdviceConfig) -> Result<OpenAiEngine> {
    let client = OpenAiClient::new(config.api_base_url.clone(), config.timeout())?;
    tracing::debug!(base_url = %config.api_base_url, "completion client configured.");
    Ok(AdviceEngine::new(client, config))
}

/// 啟動 HTTP 伺服器，直到發生錯誤或收到 Ctrl-C
pub async fn serve(bind: &str, config: AdviceConfig) -> Result<()> {
    let addr: SocketAddr = bind.parse().map_err(|e| AdviceError::InvalidConfigValueError {
        field: "bind".to_string(),
        value: bind.to_string(),
        reason: format!("Invalid socket address: {}", e),
    })?;

    let engine = Arc::new(build_engine(config)?);
    let app = http::app(engine);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "🚀 listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AdviceError::ServerError {
            message: e.to_string(),
        })
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
