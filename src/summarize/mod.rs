pub mod credentials;
pub mod summarizer;

pub use credentials::{ApiKeyOverride, Credential, CredentialSources};
pub use summarizer::{Summarizer, Summary, FALLBACK_METHOD, FALLBACK_PREVIEW_CHARS};
