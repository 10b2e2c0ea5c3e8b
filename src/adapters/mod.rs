// Adapters layer: concrete implementations for external systems (completion provider, HTTP hosting).

pub mod http;
pub mod lambda;
pub mod openai;
