pub mod config;
pub mod diff;
pub mod error;
pub mod extract;
pub mod llm;
pub mod server;
pub mod summarize;

pub use config::Config;
pub use diff::diff_texts;
pub use error::{Error, Result};
pub use extract::extract_text;
pub use llm::{Completion, HttpBackend, LLMBackend, Provider};
pub use summarize::{ApiKeyOverride, Credential, CredentialSources, Summarizer, Summary};
