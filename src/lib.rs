pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::cli::{ServeArgs, ServerConfig};

#[cfg(feature = "lambda")]
pub use crate::config::lambda::LambdaConfig;

pub use crate::adapters::openai::OpenAiClient;
pub use crate::config::AdviceConfig;
pub use crate::core::{advice::AdviceEngine, AdviceRequest, AdviceResponse};
pub use crate::utils::error::{AdviceError, Result};
