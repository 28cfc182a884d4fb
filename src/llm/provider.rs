use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::error::Result;
use crate::llm::{gemini, openai};

/// Providers with a summarization adapter. Credential entries naming anything
/// else are carried through the chain but never dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    OpenAi,
    Gemini,
}

impl Provider {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "openai" => Some(Provider::OpenAi),
            "gemini" => Some(Provider::Gemini),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::OpenAi => "openai",
            Provider::Gemini => "gemini",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Completion {
    pub text: String,
    pub tokens_used: Option<u32>,
}

#[async_trait]
pub trait LLMBackend: Send + Sync {
    async fn complete(&self, provider: Provider, prompt: &str, api_key: &str)
        -> Result<Completion>;
}

pub struct HttpBackend {
    client: Client,
    gemini_model: String,
}

impl HttpBackend {
    pub fn new(gemini_model: String) -> Self {
        // Per-attempt timeout so one hanging provider cannot starve the rest
        // of the chain.
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            gemini_model,
        }
    }
}

#[async_trait]
impl LLMBackend for HttpBackend {
    async fn complete(
        &self,
        provider: Provider,
        prompt: &str,
        api_key: &str,
    ) -> Result<Completion> {
        match provider {
            Provider::OpenAi => openai::complete(&self.client, prompt, api_key).await,
            Provider::Gemini => {
                gemini::complete(&self.client, &self.gemini_model, prompt, api_key).await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_provider_names_resolve() {
        assert_eq!(Provider::from_name("openai"), Some(Provider::OpenAi));
        assert_eq!(Provider::from_name("gemini"), Some(Provider::Gemini));
    }

    #[test]
    fn unknown_provider_names_have_no_adapter() {
        assert_eq!(Provider::from_name("anthropic"), None);
        assert_eq!(Provider::from_name(""), None);
    }
}
