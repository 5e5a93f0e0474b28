//! Request/response wrappers around the language-model provider.
//!
//! `send_chat` and `evaluate_answer` are the only two calls the rest of the
//! system makes to the model.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;

use crate::error::ProviderError;
use crate::evaluation::parse_evaluation;
use crate::model::{AppMode, EvaluationModule, EvaluationResult, Message, ProfileType};
use crate::prompts;
use crate::traits::{ChatTurn, GenerateRequest, GenerateResponse, LlmProvider, ResponseFormat};

/// Reply used when the model answers a chat turn with no text.
pub const EMPTY_CHAT_REPLY: &str = "No response generated.";

const MAX_RETRY_DELAY: Duration = Duration::from_secs(60);

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub model: String,
    pub chat_temperature: f64,
    pub evaluation_temperature: f64,
    pub max_tokens: Option<u32>,
    /// Retries on transient provider errors.
    pub max_retries: u32,
    /// Initial delay between retries; doubles each attempt.
    pub retry_delay: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            model: "gemini-3-flash-preview".to_string(),
            chat_temperature: 0.7,
            evaluation_temperature: 0.2,
            max_tokens: None,
            max_retries: 3,
            retry_delay: Duration::from_secs(1),
        }
    }
}

#[derive(Clone)]
pub struct Gateway {
    provider: Arc<dyn LlmProvider>,
    config: GatewayConfig,
}

impl Gateway {
    pub fn new(provider: Arc<dyn LlmProvider>, config: GatewayConfig) -> Self {
        Self { provider, config }
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Send one chat turn. `history` must not contain `message`.
    pub async fn send_chat(
        &self,
        history: &[Message],
        message: &str,
        mode: AppMode,
        profile: ProfileType,
    ) -> Result<String> {
        let request = GenerateRequest {
            model: self.config.model.clone(),
            system_prompt: Some(prompts::chat_system_instruction(mode, profile)),
            history: history.iter().map(ChatTurn::from).collect(),
            prompt: message.to_string(),
            temperature: self.config.chat_temperature,
            max_tokens: self.config.max_tokens,
            response_format: ResponseFormat::Text,
        };

        let response = self.generate_with_retry(&request).await?;
        if response.content.trim().is_empty() {
            return Ok(EMPTY_CHAT_REPLY.to_string());
        }
        Ok(response.content)
    }

    /// Ask the model to grade an answer and parse the structured reply.
    pub async fn evaluate_answer(
        &self,
        module: EvaluationModule,
        topic: &str,
        question: &str,
        answer: &str,
        profile: ProfileType,
    ) -> Result<EvaluationResult> {
        let request = GenerateRequest {
            model: self.config.model.clone(),
            system_prompt: Some(prompts::evaluation_system_instruction()),
            history: Vec::new(),
            prompt: prompts::evaluation_prompt(module, topic, question, answer, profile),
            temperature: self.config.evaluation_temperature,
            max_tokens: self.config.max_tokens,
            response_format: ResponseFormat::Json,
        };

        let response = self.generate_with_retry(&request).await?;
        let result = parse_evaluation(&response.content)?;
        tracing::info!(
            %module,
            topic,
            score = result.user_feedback.score_total,
            latency_ms = response.latency_ms,
            "evaluation complete"
        );
        Ok(result)
    }

    /// Retry on transient provider errors with exponential backoff.
    async fn generate_with_retry(&self, request: &GenerateRequest) -> Result<GenerateResponse> {
        let mut delay = self.config.retry_delay;
        let mut attempt = 0;
        loop {
            match self.provider.generate(request).await {
                Ok(response) => return Ok(response),
                Err(err) => {
                    let provider_err = err.downcast_ref::<ProviderError>();
                    let permanent = provider_err.is_some_and(ProviderError::is_permanent);
                    if permanent || attempt >= self.config.max_retries {
                        return Err(err);
                    }
                    attempt += 1;
                    let wait = provider_err
                        .and_then(ProviderError::retry_after_ms)
                        .map(Duration::from_millis)
                        .unwrap_or(delay)
                        .min(MAX_RETRY_DELAY);
                    tracing::warn!(
                        provider = self.provider.name(),
                        attempt,
                        wait_ms = wait.as_millis() as u64,
                        error = %err,
                        "provider call failed, retrying"
                    );
                    tokio::time::sleep(wait).await;
                    delay = (delay * 2).min(MAX_RETRY_DELAY);
                }
            }
        }
    }
}
