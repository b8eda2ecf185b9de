use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{EstimatorError, Result};
use crate::estimate::{CostBreakdown, ProjectParams};
use crate::optimize::{fallback_suggestions, Suggestion, MAX_SUGGESTIONS};
use crate::resilience::{retry_with_policy, ExponentialBackoffRetry};

use super::parser::decode_suggestions;
use super::prediction::{self, PredictedEstimate};
use super::prompt::{build_optimization_prompt, build_prediction_prompt};
use super::AiConfig;

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

/// Adapter around the external text-generation collaborator.
///
/// Both entry points degrade to a deterministic result instead of surfacing
/// transport or decoding failures to the caller.
pub struct AiClient {
    http: Client,
    config: AiConfig,
    retry: ExponentialBackoffRetry,
}

impl AiClient {
    pub fn new(config: AiConfig) -> Self {
        Self {
            http: Client::new(),
            config,
            // One bounded retry on transport failure, then fall back
            retry: ExponentialBackoffRetry::new(
                2,
                Duration::from_millis(200),
                Duration::from_secs(1),
            ),
        }
    }

    /// Request enriched optimization suggestions. Always returns between 1
    /// and 5 suggestions: the decoded reply truncated to 5, or the fixed
    /// fallback list (exactly 5, savings computed from the live breakdown)
    /// when the call or the decode fails.
    pub async fn request_optimizations(
        &self,
        project: &ProjectParams,
        breakdown: &CostBreakdown,
    ) -> Vec<Suggestion> {
        if self.config.api_key.is_none() {
            tracing::info!("no AI credentials configured, using fallback suggestions");
            return fallback_suggestions(breakdown);
        }

        let prompt = build_optimization_prompt(project, breakdown);
        match retry_with_policy(&self.retry, || self.complete(&prompt)).await {
            Ok(reply) => {
                let mut decoded = decode_suggestions(&reply);
                if decoded.is_empty() {
                    tracing::warn!("AI reply contained no usable suggestion blocks, falling back");
                    return fallback_suggestions(breakdown);
                }
                decoded.truncate(MAX_SUGGESTIONS);
                decoded
            }
            Err(e) => {
                tracing::warn!(error = %e, "AI optimization call failed, falling back");
                fallback_suggestions(breakdown)
            }
        }
    }

    /// Request a refined total prediction. Degrades to the deterministic
    /// estimate on any failure.
    pub async fn request_prediction(
        &self,
        project: &ProjectParams,
        breakdown: Option<&CostBreakdown>,
    ) -> PredictedEstimate {
        if self.config.api_key.is_none() {
            tracing::info!("no AI credentials configured, using deterministic prediction");
            return prediction::deterministic_prediction(project, breakdown);
        }

        let prompt = build_prediction_prompt(project, breakdown);
        match retry_with_policy(&self.retry, || self.complete(&prompt)).await {
            Ok(reply) => prediction::decode_prediction(&reply)
                .unwrap_or_else(|| prediction::deterministic_prediction(project, breakdown)),
            Err(e) => {
                tracing::warn!(error = %e, "AI prediction call failed, falling back");
                prediction::deterministic_prediction(project, breakdown)
            }
        }
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| EstimatorError::InvalidConfig("missing AI api key".to_string()))?;

        let url = format!("{}/chat/completions", self.config.endpoint);
        let request = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            temperature: 0.4,
        };

        let send = self
            .http
            .post(&url)
            .header("Authorization", format!("Bearer {}", api_key))
            .json(&request)
            .send();

        let response = tokio::time::timeout(self.config.timeout, send)
            .await
            .map_err(|_| {
                EstimatorError::Timeout(format!(
                    "AI call exceeded {:?}",
                    self.config.timeout
                ))
            })??;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(EstimatorError::Unknown(format!(
                "AI endpoint returned {}: {}",
                status, body
            )));
        }

        let reply: ChatResponse = response.json().await?;
        reply
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| EstimatorError::Unknown("AI reply had no choices".to_string()))
    }
}
