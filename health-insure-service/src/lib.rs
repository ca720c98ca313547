pub mod config;
pub mod error;
pub mod extract;
pub mod form;
pub mod gateway;
pub mod models;
pub mod parse;
pub mod prompts;
pub mod service;

#[cfg(test)]
mod test_support;

pub use config::Config;
pub use error::{Result, ServiceError};
pub use gateway::{AiGateway, GeminiClient};
pub use service::{AppState, build_router, create_app};
pub use models::*;
