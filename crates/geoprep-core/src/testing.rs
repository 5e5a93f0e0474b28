//! Scripted provider for unit tests in this crate.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::ProviderError;
use crate::traits::{GenerateRequest, GenerateResponse, LlmProvider, ModelInfo, TokenUsage};

type ErrorFactory = Box<dyn Fn() -> ProviderError + Send + Sync>;

/// Replays canned replies in order, repeating the last one when exhausted.
pub(crate) struct ScriptedProvider {
    replies: Mutex<VecDeque<String>>,
    failures_left: AtomicU32,
    failure: Option<ErrorFactory>,
    call_count: AtomicU32,
    last_request: Mutex<Option<GenerateRequest>>,
}

impl ScriptedProvider {
    pub(crate) fn replying<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            replies: Mutex::new(replies.into_iter().map(Into::into).collect()),
            failures_left: AtomicU32::new(0),
            failure: None,
            call_count: AtomicU32::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// Fail the first `n` calls with the given error.
    pub(crate) fn failing_first(
        mut self,
        n: u32,
        error: impl Fn() -> ProviderError + Send + Sync + 'static,
    ) -> Self {
        self.failures_left = AtomicU32::new(n);
        self.failure = Some(Box::new(error));
        self
    }

    pub(crate) fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    pub(crate) fn last_request(&self) -> Option<GenerateRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn generate(&self, request: &GenerateRequest) -> anyhow::Result<GenerateResponse> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        *self.last_request.lock().unwrap() = Some(request.clone());

        if let Some(make_error) = &self.failure {
            let left = self.failures_left.load(Ordering::Relaxed);
            if left > 0 {
                self.failures_left.store(left - 1, Ordering::Relaxed);
                return Err(make_error().into());
            }
        }

        let content = {
            let mut replies = self.replies.lock().unwrap();
            if replies.len() > 1 {
                replies.pop_front().unwrap_or_default()
            } else {
                replies.front().cloned().unwrap_or_default()
            }
        };

        Ok(GenerateResponse {
            content,
            model: request.model.clone(),
            token_usage: TokenUsage::default(),
            latency_ms: 0,
        })
    }

    fn available_models(&self) -> Vec<ModelInfo> {
        Vec::new()
    }
}
