use std::env;

use crate::summarize::CredentialSources;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash-exp";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8000";

#[derive(Debug, Clone)]
pub struct Config {
    pub summarizer_api_keys: Option<String>,
    pub openai_api_key: Option<String>,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub bind_addr: String,
}

impl Config {
    pub fn from_env() -> Self {
        let summarizer_api_keys = env::var("SUMMARIZER_API_KEYS").ok().filter(|v| !v.is_empty());

        let openai_api_key = env::var("OPENAI_API_KEY").ok().filter(|v| !v.is_empty());

        let gemini_api_key = env::var("GEMINI_API_KEY").ok().filter(|v| !v.is_empty());

        let gemini_model = env::var("GEMINI_MODEL")
            .ok()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string());

        let bind_addr = env::var("PHARMDRIVE_BIND")
            .ok()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());

        Self {
            summarizer_api_keys,
            openai_api_key,
            gemini_api_key,
            gemini_model,
            bind_addr,
        }
    }

    /// Credential sources handed to the resolver; environment reads stay here.
    pub fn credential_sources(&self) -> CredentialSources {
        CredentialSources {
            multi: self.summarizer_api_keys.clone(),
            openai: self.openai_api_key.clone(),
            gemini: self.gemini_api_key.clone(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            summarizer_api_keys: None,
            openai_api_key: None,
            gemini_api_key: None,
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
        }
    }
}
