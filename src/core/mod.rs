pub mod advice;
pub mod endpoint;
pub mod fallback;
pub mod prompt;
pub mod sanitize;

pub use crate::domain::model::{AdviceRequest, AdviceResponse};
pub use crate::domain::ports::{CompletionProvider, ConfigProvider, ProviderError};
pub use crate::utils::error::Result;
