use std::sync::Arc;

use serde::Serialize;

use crate::config::Config;
use crate::llm::{prompts, HttpBackend, LLMBackend, Provider};
use crate::summarize::credentials::{self, ApiKeyOverride, CredentialSources};

/// Fallback summaries carry at most this many characters of the diff.
pub const FALLBACK_PREVIEW_CHARS: usize = 500;

/// `method` value reported when no provider produced a summary.
pub const FALLBACK_METHOD: &str = "fallback";

#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub text: String,
    pub method: String,
    pub tokens_used: Option<u32>,
    pub truncated: bool,
}

pub struct Summarizer {
    backend: Arc<dyn LLMBackend>,
    sources: CredentialSources,
}

impl Summarizer {
    pub fn new(config: &Config) -> Self {
        Self {
            backend: Arc::new(HttpBackend::new(config.gemini_model.clone())),
            sources: config.credential_sources(),
        }
    }

    pub fn with_backend(backend: Arc<dyn LLMBackend>, sources: CredentialSources) -> Self {
        Self { backend, sources }
    }

    /// Try each resolved credential in order and return the first provider
    /// summary, falling back to a truncated preview of the diff when the chain
    /// is empty or exhausted. Never fails.
    pub async fn summarize(
        &self,
        diff_text: &str,
        mission_context: Option<&str>,
        api_keys: &ApiKeyOverride,
    ) -> Summary {
        let prompt = prompts::build_prompt(diff_text, mission_context);
        let chain = credentials::resolve(api_keys, &self.sources);

        if chain.is_empty() {
            tracing::info!("no summarizer API keys configured, using fallback text");
            return fallback_summary(diff_text);
        }

        for credential in &chain {
            let Some(provider) = Provider::from_name(&credential.provider) else {
                tracing::debug!(
                    "no adapter for provider {}, skipping credential",
                    credential.provider
                );
                continue;
            };

            match self
                .backend
                .complete(provider, &prompt, &credential.secret)
                .await
            {
                Ok(completion) if !completion.text.is_empty() => {
                    return Summary {
                        text: completion.text,
                        method: provider.as_str().to_string(),
                        tokens_used: completion.tokens_used,
                        truncated: false,
                    };
                }
                Ok(_) => {
                    tracing::warn!(
                        "summarization failed with provider {}: empty summary",
                        credential.provider
                    );
                }
                Err(err) => {
                    tracing::warn!(
                        "summarization failed with provider {}: {}",
                        credential.provider,
                        err
                    );
                }
            }
        }

        fallback_summary(diff_text)
    }
}

fn fallback_summary(diff_text: &str) -> Summary {
    let truncated = diff_text.chars().count() > FALLBACK_PREVIEW_CHARS;
    let preview: String = diff_text.chars().take(FALLBACK_PREVIEW_CHARS).collect();
    Summary {
        text: format!("Summary:\n{}", preview),
        method: FALLBACK_METHOD.to_string(),
        tokens_used: None,
        truncated,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::error::{Error, Result};
    use crate::llm::Completion;

    /// Backend that rejects the secret "bad" and echoes any other secret,
    /// recording every attempt in order.
    struct FakeBackend {
        attempts: Mutex<Vec<(Provider, String)>>,
        tokens_used: Option<u32>,
    }

    impl FakeBackend {
        fn new() -> Self {
            Self {
                attempts: Mutex::new(Vec::new()),
                tokens_used: Some(42),
            }
        }

        fn attempts(&self) -> Vec<(Provider, String)> {
            self.attempts.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl LLMBackend for FakeBackend {
        async fn complete(
            &self,
            provider: Provider,
            _prompt: &str,
            api_key: &str,
        ) -> Result<Completion> {
            self.attempts
                .lock()
                .unwrap()
                .push((provider, api_key.to_string()));
            if api_key == "bad" {
                return Err(Error::LLMApi("key rejected".to_string()));
            }
            Ok(Completion {
                text: format!("summary-{}", api_key),
                tokens_used: self.tokens_used,
            })
        }
    }

    fn summarizer_with(backend: Arc<FakeBackend>, multi: &str) -> Summarizer {
        Summarizer::with_backend(
            backend,
            CredentialSources {
                multi: Some(multi.to_string()),
                ..Default::default()
            },
        )
    }

    #[tokio::test]
    async fn chain_stops_at_first_success_in_order() {
        let backend = Arc::new(FakeBackend::new());
        let summarizer = summarizer_with(backend.clone(), "openai:bad,openai:good");

        let summary = summarizer
            .summarize("example diff", None, &ApiKeyOverride::None)
            .await;

        assert_eq!(
            backend.attempts(),
            vec![
                (Provider::OpenAi, "bad".to_string()),
                (Provider::OpenAi, "good".to_string()),
            ]
        );
        assert_eq!(summary.text, "summary-good");
        assert_eq!(summary.method, "openai");
        assert_eq!(summary.tokens_used, Some(42));
        assert!(!summary.truncated);
    }

    #[tokio::test]
    async fn no_credentials_means_fallback_without_any_attempt() {
        let backend = Arc::new(FakeBackend::new());
        let summarizer =
            Summarizer::with_backend(backend.clone(), CredentialSources::default());

        let summary = summarizer
            .summarize("example diff", None, &ApiKeyOverride::None)
            .await;

        assert!(backend.attempts().is_empty());
        assert_eq!(summary.text, "Summary:\nexample diff");
        assert_eq!(summary.method, FALLBACK_METHOD);
        assert_eq!(summary.tokens_used, None);
        assert!(!summary.truncated);
    }

    #[tokio::test]
    async fn exhausted_chain_falls_back_and_flags_truncation() {
        let backend = Arc::new(FakeBackend::new());
        let summarizer = summarizer_with(backend.clone(), "openai:bad,gemini:bad");

        let diff = "x".repeat(FALLBACK_PREVIEW_CHARS + 20);
        let summary = summarizer
            .summarize(&diff, None, &ApiKeyOverride::None)
            .await;

        assert_eq!(backend.attempts().len(), 2);
        assert_eq!(summary.method, FALLBACK_METHOD);
        assert!(summary.truncated);
        assert_eq!(
            summary.text,
            format!("Summary:\n{}", "x".repeat(FALLBACK_PREVIEW_CHARS))
        );
    }

    #[tokio::test]
    async fn fallback_is_not_truncated_at_the_limit() {
        let summarizer = Summarizer::with_backend(
            Arc::new(FakeBackend::new()),
            CredentialSources::default(),
        );

        let diff = "y".repeat(FALLBACK_PREVIEW_CHARS);
        let summary = summarizer
            .summarize(&diff, None, &ApiKeyOverride::None)
            .await;

        assert!(!summary.truncated);
        assert_eq!(summary.text, format!("Summary:\n{}", diff));
    }

    #[tokio::test]
    async fn unknown_providers_are_skipped_without_a_call() {
        let backend = Arc::new(FakeBackend::new());
        let summarizer = summarizer_with(backend.clone(), "anthropic:k1,gemini:ok");

        let summary = summarizer
            .summarize("example diff", None, &ApiKeyOverride::None)
            .await;

        assert_eq!(
            backend.attempts(),
            vec![(Provider::Gemini, "ok".to_string())]
        );
        assert_eq!(summary.method, "gemini");
    }

    #[tokio::test]
    async fn override_is_used_instead_of_sources() {
        let backend = Arc::new(FakeBackend::new());
        let summarizer = summarizer_with(backend.clone(), "openai:from-env");

        let summary = summarizer
            .summarize(
                "example diff",
                None,
                &ApiKeyOverride::Single("gemini:direct".to_string()),
            )
            .await;

        assert_eq!(
            backend.attempts(),
            vec![(Provider::Gemini, "direct".to_string())]
        );
        assert_eq!(summary.method, "gemini");
    }

    #[tokio::test]
    async fn only_unknown_providers_still_falls_back() {
        let backend = Arc::new(FakeBackend::new());
        let summarizer = summarizer_with(backend.clone(), "anthropic:k1,mistral:k2");

        let summary = summarizer
            .summarize("example diff", None, &ApiKeyOverride::None)
            .await;

        assert!(backend.attempts().is_empty());
        assert_eq!(summary.method, FALLBACK_METHOD);
    }
}
