use clap::Parser;
use ootb_advice::app::server;
use ootb_advice::utils::{error::ErrorSeverity, logger, validation::Validate};
use ootb_advice::ServeArgs;

#[tokio::main]
async fn main() {
    // 本機開發時載入 .env；沒有檔案也沒關係
    let _ = dotenvy::dotenv();

    let args = ServeArgs::parse();

    // 初始化日誌
    logger::init_cli_logger(args.verbose);

    tracing::info!("Starting ootb-advice server");
    if args.verbose {
        tracing::debug!("CLI args: {:?}", args);
    }

    let config = match args.resolve() {
        Ok(config) => config,
        Err(e) => exit_with(e),
    };

    // 驗證配置
    if let Err(e) = config.validate() {
        exit_with(e);
    }
    tracing::debug!("Server config: {:?}", config);

    if let Err(e) = server::serve(&config.bind, config.advice).await {
        exit_with(e);
    }
}

fn exit_with(e: ootb_advice::AdviceError) -> ! {
    tracing::error!(
        "❌ Server failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low | ErrorSeverity::High => 1,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
