pub mod client;
pub mod parser;
pub mod prediction;
pub mod prompt;

pub use client::AiClient;
pub use prediction::{Confidence, PredictedEstimate};

use std::time::Duration;

/// Configuration for the external text-generation collaborator.
#[derive(Debug, Clone)]
pub struct AiConfig {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub model: String,
    pub timeout: Duration,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.openai.com/v1".to_string(),
            api_key: None,
            model: "gpt-4o-mini".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}
