//! Mock provider for tests and offline demos.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use geoprep_core::traits::{
    GenerateRequest, GenerateResponse, LlmProvider, ModelInfo, ResponseFormat, TokenUsage,
};

/// Chat reply used when nothing else is configured.
pub const DEFAULT_CHAT_REPLY: &str =
    "Let us map this topic to the HPSC syllabus before going deeper.";

/// Evaluation reply used when nothing else is configured.
pub const DEFAULT_EVALUATION_REPLY: &str = r#"{
  "user_feedback": {
    "score_total": 64,
    "framework_scores": {"dimension_1": 7, "dimension_2": 6, "dimension_3": 6},
    "constructive_comment": "Good structure. Anchor the answer in Haryana: cite the Yamuna-Ghaggar doab or Mewat water stress."
  },
  "admin_analytics": {
    "module_used": "INTERVIEW_SIMULATION",
    "candidate_archetype": "Generalist",
    "error_category": "Contextual Blindness",
    "cognitive_level": "Application"
  }
}"#;

/// A mock LLM provider for exercising the tutor without real API calls.
///
/// Chat requests are answered by prompt-substring match, falling back to a
/// default reply. JSON requests get the configured evaluation reply.
pub struct MockProvider {
    /// Map of prompt substring → reply.
    responses: HashMap<String, String>,
    default_response: String,
    evaluation_response: String,
    call_count: AtomicU32,
    last_request: Mutex<Option<GenerateRequest>>,
}

impl MockProvider {
    /// Create a new mock provider with the given prompt→reply mappings.
    pub fn new(responses: HashMap<String, String>) -> Self {
        Self {
            responses,
            default_response: DEFAULT_CHAT_REPLY.to_string(),
            evaluation_response: DEFAULT_EVALUATION_REPLY.to_string(),
            call_count: AtomicU32::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// Create a mock that always returns the same chat reply.
    pub fn with_fixed_response(response: &str) -> Self {
        Self {
            default_response: response.to_string(),
            ..Self::new(HashMap::new())
        }
    }

    /// Replace the reply given to evaluation (JSON) requests.
    pub fn with_evaluation(mut self, response: &str) -> Self {
        self.evaluation_response = response.to_string();
        self
    }

    /// Get the number of calls made to this provider.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// Get the last request made to this provider.
    pub fn last_request(&self) -> Option<GenerateRequest> {
        self.last_request
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new(HashMap::new())
    }
}

#[async_trait]
impl LlmProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn generate(&self, request: &GenerateRequest) -> anyhow::Result<GenerateResponse> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        *self
            .last_request
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(request.clone());

        let content = match request.response_format {
            ResponseFormat::Json => self.evaluation_response.clone(),
            ResponseFormat::Text => self
                .responses
                .iter()
                .find(|(key, _)| request.prompt.contains(key.as_str()))
                .map(|(_, v)| v.clone())
                .unwrap_or_else(|| self.default_response.clone()),
        };

        // Rough estimate
        let prompt_tokens = (request.prompt.len() / 4) as u32;
        let completion_tokens = (content.len() / 4) as u32;

        Ok(GenerateResponse {
            content,
            model: request.model.clone(),
            token_usage: TokenUsage {
                prompt_tokens,
                completion_tokens,
                total_tokens: prompt_tokens + completion_tokens,
            },
            latency_ms: 1,
        })
    }

    fn available_models(&self) -> Vec<ModelInfo> {
        vec![ModelInfo {
            id: "mock-model".into(),
            name: "Mock Model".into(),
            provider: "mock".into(),
            max_context: 100_000,
        }]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geoprep_core::evaluation::parse_evaluation;

    fn request(prompt: &str, format: ResponseFormat) -> GenerateRequest {
        GenerateRequest {
            model: "mock".into(),
            system_prompt: None,
            history: vec![],
            prompt: prompt.into(),
            temperature: 0.7,
            max_tokens: None,
            response_format: format,
        }
    }

    #[tokio::test]
    async fn fixed_response() {
        let provider = MockProvider::with_fixed_response("Start with the Aravallis.");
        let response = provider
            .generate(&request("anything", ResponseFormat::Text))
            .await
            .unwrap();
        assert_eq!(response.content, "Start with the Aravallis.");
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn prompt_matching() {
        let mut responses = HashMap::new();
        responses.insert("monsoon".to_string(), "Think of the ITCZ shift.".to_string());
        responses.insert("Penck".to_string(), "Slope replacement.".to_string());
        let provider = MockProvider::new(responses);

        let resp = provider
            .generate(&request("Why does the monsoon burst?", ResponseFormat::Text))
            .await
            .unwrap();
        assert!(resp.content.contains("ITCZ"));

        let resp = provider
            .generate(&request("Explain Penck", ResponseFormat::Text))
            .await
            .unwrap();
        assert_eq!(resp.content, "Slope replacement.");
        assert_eq!(provider.call_count(), 2);
        assert_eq!(provider.last_request().unwrap().prompt, "Explain Penck");
    }

    #[tokio::test]
    async fn json_requests_get_a_parseable_evaluation() {
        let provider = MockProvider::default();
        let response = provider
            .generate(&request("grade this", ResponseFormat::Json))
            .await
            .unwrap();
        let result = parse_evaluation(&response.content).unwrap();
        assert_eq!(result.user_feedback.score_total, 64.0);
    }
}
