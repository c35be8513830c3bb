//! Retrying filename suggester.
//!
//! Wraps a [`VisionProvider`] with a bounded number of attempts, a
//! per-attempt timeout, and exponential backoff between attempts.

use super::provider::{ImageInput, NameRequest, VisionProvider};
use super::retry::{self, RetryOptions};
use crate::error::{ConfigError, PipelineError};
use std::time::Duration;

/// A successful suggestion.
#[derive(Debug, Clone)]
pub struct Suggestion {
    /// Raw suggestion text (trimmed, not yet sanitized)
    pub text: String,
    /// Model that produced it
    pub model: String,
    /// Latency of the successful attempt in milliseconds
    pub latency_ms: u64,
    /// Attempts used, including the successful one
    pub attempts: u32,
}

/// Outcome of asking for a suggestion: either a name or an error message.
#[derive(Debug)]
pub enum SuggestResult {
    Success(Suggestion),
    Failure { message: String, attempts: u32 },
}

/// Vision provider plus retry policy.
pub struct Suggester {
    provider: Box<dyn VisionProvider>,
    options: RetryOptions,
}

impl Suggester {
    pub fn new(provider: Box<dyn VisionProvider>, options: RetryOptions) -> Self {
        Self { provider, options }
    }

    /// Ask for a filename suggestion, retrying failed attempts.
    ///
    /// Without a configured credential this returns immediately with zero
    /// attempts. After the last failed attempt there is no sleep.
    pub async fn suggest(&self, image: ImageInput) -> SuggestResult {
        if !self.provider.is_configured() {
            return SuggestResult::Failure {
                message: ConfigError::MissingApiKey.to_string(),
                attempts: 0,
            };
        }

        let request = NameRequest::filename_suggestion(image);
        let timeout = Duration::from_millis(self.options.timeout_ms);
        let mut last_error = "Unknown error".to_string();

        for attempt in 0..self.options.attempts {
            match tokio::time::timeout(timeout, self.provider.generate(&request)).await {
                Ok(Ok(response)) => {
                    return SuggestResult::Success(Suggestion {
                        text: response.text,
                        model: response.model,
                        latency_ms: response.latency_ms,
                        attempts: attempt + 1,
                    });
                }
                Ok(Err(e)) => {
                    last_error = e.to_string();
                }
                Err(_) => {
                    last_error = PipelineError::Timeout {
                        timeout_ms: self.options.timeout_ms,
                    }
                    .to_string();
                }
            }

            if attempt + 1 < self.options.attempts {
                let delay = retry::backoff_duration(attempt, self.options.base_delay_ms);
                tracing::debug!(
                    "Attempt {}/{} via {} failed ({last_error}), retrying after {delay:?}",
                    attempt + 1,
                    self.options.attempts,
                    self.provider.name()
                );
                tokio::time::sleep(delay).await;
            }
        }

        // Reported to the user on the status line; a warn here would land on
        // top of the spinner.
        tracing::debug!(
            "All {} attempts via {} failed: {last_error}",
            self.options.attempts,
            self.provider.name()
        );
        SuggestResult::Failure {
            message: last_error,
            attempts: self.options.attempts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::provider::LlmResponse;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    /// Mock provider whose response depends on the call index.
    struct MockProvider {
        response_fn: Box<dyn Fn(u32) -> Result<LlmResponse, PipelineError> + Send + Sync>,
        call_count: Arc<AtomicU32>,
        configured: bool,
        delay: Option<Duration>,
    }

    impl MockProvider {
        fn new(
            response_fn: impl Fn(u32) -> Result<LlmResponse, PipelineError> + Send + Sync + 'static,
        ) -> Self {
            Self {
                response_fn: Box::new(response_fn),
                call_count: Arc::new(AtomicU32::new(0)),
                configured: true,
                delay: None,
            }
        }

        /// Fails `failures` times with "error {idx}", then succeeds.
        fn fail_then_succeed(failures: u32, text: &str) -> Self {
            let text = text.to_string();
            Self::new(move |idx| {
                if idx < failures {
                    Err(PipelineError::Llm {
                        message: format!("error {idx}"),
                        status_code: Some(503),
                    })
                } else {
                    Ok(LlmResponse {
                        text: text.clone(),
                        model: "mock-v1".to_string(),
                        latency_ms: 5,
                    })
                }
            })
        }

        fn unconfigured() -> Self {
            let mut provider = Self::fail_then_succeed(0, "never");
            provider.configured = false;
            provider
        }

        fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = Some(delay);
            self
        }

        fn call_count_handle(&self) -> Arc<AtomicU32> {
            self.call_count.clone()
        }
    }

    #[async_trait]
    impl VisionProvider for MockProvider {
        fn name(&self) -> &str {
            "mock"
        }

        fn is_configured(&self) -> bool {
            self.configured
        }

        async fn generate(&self, _request: &NameRequest) -> Result<LlmResponse, PipelineError> {
            let idx = self.call_count.fetch_add(1, Ordering::SeqCst);
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            (self.response_fn)(idx)
        }
    }

    fn fast_options() -> RetryOptions {
        RetryOptions {
            attempts: 3,
            base_delay_ms: 1,
            timeout_ms: 1_000,
        }
    }

    fn image() -> ImageInput {
        ImageInput::from_bytes(&[0x89, 0x50, 0x4E, 0x47], "png")
    }

    #[tokio::test]
    async fn test_first_attempt_success() {
        let provider = MockProvider::fail_then_succeed(0, "sunset_beach");
        let calls = provider.call_count_handle();
        let suggester = Suggester::new(Box::new(provider), fast_options());

        match suggester.suggest(image()).await {
            SuggestResult::Success(s) => {
                assert_eq!(s.text, "sunset_beach");
                assert_eq!(s.model, "mock-v1");
                assert_eq!(s.attempts, 1);
            }
            other => panic!("expected success, got {other:?}"),
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_two_failures_then_success_uses_three_attempts() {
        let provider = MockProvider::fail_then_succeed(2, "mountain_lake");
        let calls = provider.call_count_handle();
        let suggester = Suggester::new(Box::new(provider), fast_options());

        match suggester.suggest(image()).await {
            SuggestResult::Success(s) => {
                assert_eq!(s.text, "mountain_lake");
                assert_eq!(s.attempts, 3);
            }
            other => panic!("expected success, got {other:?}"),
        }
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_always_failing_keeps_last_error() {
        let provider = MockProvider::fail_then_succeed(u32::MAX, "never");
        let calls = provider.call_count_handle();
        let suggester = Suggester::new(Box::new(provider), fast_options());

        match suggester.suggest(image()).await {
            SuggestResult::Failure { message, attempts } => {
                assert_eq!(message, "error 2");
                assert_eq!(attempts, 3);
            }
            other => panic!("expected failure, got {other:?}"),
        }
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_missing_credential_makes_no_calls() {
        let provider = MockProvider::unconfigured();
        let calls = provider.call_count_handle();
        let suggester = Suggester::new(Box::new(provider), fast_options());

        match suggester.suggest(image()).await {
            SuggestResult::Failure { message, attempts } => {
                assert!(message.contains("API key not found"));
                assert_eq!(attempts, 0);
            }
            other => panic!("expected failure, got {other:?}"),
        }
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_timeout_counts_as_failed_attempt() {
        let provider =
            MockProvider::fail_then_succeed(0, "slow").with_delay(Duration::from_millis(500));
        let calls = provider.call_count_handle();
        let options = RetryOptions {
            attempts: 2,
            base_delay_ms: 1,
            timeout_ms: 20,
        };
        let suggester = Suggester::new(Box::new(provider), options);

        match suggester.suggest(image()).await {
            SuggestResult::Failure { message, attempts } => {
                assert_eq!(message, "Timeout after 20ms");
                assert_eq!(attempts, 2);
            }
            other => panic!("expected failure, got {other:?}"),
        }
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_backoff_waits_between_attempts_only() {
        let provider = MockProvider::fail_then_succeed(u32::MAX, "never");
        let options = RetryOptions {
            attempts: 3,
            base_delay_ms: 20,
            timeout_ms: 1_000,
        };
        let suggester = Suggester::new(Box::new(provider), options);

        let start = std::time::Instant::now();
        let _ = suggester.suggest(image()).await;
        let elapsed = start.elapsed();

        // 20ms + 40ms between the three attempts
        assert!(elapsed >= Duration::from_millis(60), "elapsed {elapsed:?}");
        assert!(elapsed < Duration::from_millis(1_000), "elapsed {elapsed:?}");
    }
}
