use crate::config::toml_config::{TomlConfig, DEFAULT_BIND};
use crate::config::AdviceConfig;
use crate::utils::error::Result;
use crate::utils::validation::{validate_socket_addr, Validate};
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "ootb-advice")]
#[command(about = "HTTP endpoint that turns a problem description into consulting advice")]
pub struct ServeArgs {
    #[arg(long, help = "TOML config file with [server] and [provider] sections")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Bind address, overrides OOB_BIND and the config file")]
    pub bind: Option<String>,

    #[arg(long, help = "Model name, overrides OOB_MODEL and the config file")]
    pub model: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

/// Fully resolved server settings.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: String,
    pub advice: AdviceConfig,
}

impl ServeArgs {
    /// 優先順序：命令列 > 環境變數 > 設定檔 > 預設值
    pub fn resolve(&self) -> Result<ServerConfig> {
        let file = match &self.config {
            Some(path) => {
                tracing::info!("📄 Loading config file {}", path.display());
                TomlConfig::from_file(path)?
            }
            None => TomlConfig::default(),
        };

        let mut advice = file.to_advice_config();
        advice.apply_env(|name| std::env::var(name).ok());
        if let Some(model) = &self.model {
            advice.model = model.clone();
        }

        let bind = self
            .bind
            .clone()
            .or_else(|| std::env::var("OOB_BIND").ok().filter(|b| !b.is_empty()))
            .or_else(|| file.server.bind.clone())
            .unwrap_or_else(|| DEFAULT_BIND.to_string());

        Ok(ServerConfig { bind, advice })
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<()> {
        validate_socket_addr("bind", &self.bind)?;
        self.advice.validate()
    }
}
