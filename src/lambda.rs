#[cfg(feature = "lambda")]
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
#[cfg(feature = "lambda")]
use ootb_advice::adapters::lambda::{handle_event, HttpEvent, HttpResponse};
#[cfg(feature = "lambda")]
use ootb_advice::utils::{logger, validation::Validate};
#[cfg(feature = "lambda")]
use ootb_advice::{AdviceEngine, LambdaConfig, OpenAiClient};

#[cfg(feature = "lambda")]
async fn function_handler(
    client: &OpenAiClient,
    event: LambdaEvent<HttpEvent>,
) -> Result<HttpResponse, Error> {
    tracing::debug!(request_id = %event.context.request_id, "Handling advice event");

    // 每次呼叫都重新讀取環境變數
    let config = LambdaConfig::from_env();
    if let Err(e) = config.validate() {
        // 設定有問題也照常回應，讓前端拿到備用建議
        tracing::warn!(error = %e, "Lambda configuration is invalid");
    }

    // OPENAI_API_BASE 或 OOB_TIMEOUT_SECONDS 變了就換一個 client
    let client = match client.reconfigured(&config.advice.api_base_url, config.advice.timeout()) {
        Ok(client) => client,
        Err(e) => {
            tracing::warn!(error = %e, "Keeping the startup client");
            client.clone()
        }
    };

    let engine = AdviceEngine::new(client, config);
    Ok(handle_event(&engine, &event.payload).await)
}

#[cfg(feature = "lambda")]
#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    let startup = LambdaConfig::from_env();
    let client = OpenAiClient::new(
        startup.advice.api_base_url.clone(),
        startup.advice.timeout(),
    )?;
    let client = &client;

    run(service_fn(move |event: LambdaEvent<HttpEvent>| async move {
        function_handler(client, event).await
    }))
    .await
}
