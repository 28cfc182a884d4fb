//! Credential parsing and prioritization for the summarization chain.

/// Provider assumed for bare secrets with no `provider:` prefix.
pub const DEFAULT_PROVIDER: &str = "openai";

/// One entry of the summarization chain. The provider name is kept verbatim
/// (lowercased) even when no adapter exists for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub provider: String,
    pub secret: String,
}

/// Per-request API key override. An override that yields at least one valid
/// credential fully replaces the configured sources.
#[derive(Debug, Clone, Default)]
pub enum ApiKeyOverride {
    #[default]
    None,
    Single(String),
    List(Vec<String>),
}

/// Credential sources gathered from configuration at startup. The resolver
/// never reads the environment itself.
#[derive(Debug, Clone, Default)]
pub struct CredentialSources {
    /// Comma-separated `provider:secret` entries, tried first, in order.
    pub multi: Option<String>,
    /// Legacy single OpenAI secret, appended after the multi-value entries.
    pub openai: Option<String>,
    /// Legacy single Gemini secret, appended last.
    pub gemini: Option<String>,
}

/// Parse one `provider:secret` entry. A bare secret implies the default
/// provider; an entry that is empty after trimming parses to empty parts and
/// is dropped by callers.
pub fn parse_entry(entry: &str) -> (String, String) {
    let entry = entry.trim();
    if entry.is_empty() {
        return (String::new(), String::new());
    }
    match entry.split_once(':') {
        Some((provider, secret)) => (provider.trim().to_lowercase(), secret.trim().to_string()),
        None => (DEFAULT_PROVIDER.to_string(), entry.to_string()),
    }
}

/// Resolve the credential chain for one request. An empty result is a valid
/// outcome meaning no providers are configured.
pub fn resolve(api_keys: &ApiKeyOverride, sources: &CredentialSources) -> Vec<Credential> {
    match api_keys {
        ApiKeyOverride::List(entries) => {
            let parsed = parse_valid(entries.iter().map(String::as_str));
            if !parsed.is_empty() {
                return parsed;
            }
        }
        ApiKeyOverride::Single(entry) => {
            let parsed = parse_valid(std::iter::once(entry.as_str()));
            if !parsed.is_empty() {
                return parsed;
            }
        }
        ApiKeyOverride::None => {}
    }
    gather(sources)
}

fn parse_valid<'a>(entries: impl Iterator<Item = &'a str>) -> Vec<Credential> {
    entries
        .map(parse_entry)
        .filter(|(provider, secret)| !provider.is_empty() && !secret.is_empty())
        .map(|(provider, secret)| Credential { provider, secret })
        .collect()
}

fn gather(sources: &CredentialSources) -> Vec<Credential> {
    let mut credentials = Vec::new();

    if let Some(multi) = sources.multi.as_deref().filter(|v| !v.is_empty()) {
        credentials.extend(parse_valid(multi.split(',')));
    }
    // Legacy single-provider secrets are taken as-is, in this fixed order.
    if let Some(secret) = sources.openai.as_deref().filter(|v| !v.is_empty()) {
        credentials.push(Credential {
            provider: "openai".to_string(),
            secret: secret.to_string(),
        });
    }
    if let Some(secret) = sources.gemini.as_deref().filter(|v| !v.is_empty()) {
        credentials.push(Credential {
            provider: "gemini".to_string(),
            secret: secret.to_string(),
        });
    }

    credentials
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cred(provider: &str, secret: &str) -> Credential {
        Credential {
            provider: provider.to_string(),
            secret: secret.to_string(),
        }
    }

    #[test]
    fn entry_with_separator_is_split_and_normalized() {
        assert_eq!(
            parse_entry("Gemini: abc123 "),
            ("gemini".to_string(), "abc123".to_string())
        );
    }

    #[test]
    fn bare_secret_defaults_to_openai() {
        assert_eq!(
            parse_entry("plainkey"),
            ("openai".to_string(), "plainkey".to_string())
        );
    }

    #[test]
    fn blank_entry_parses_to_empty_parts() {
        assert_eq!(parse_entry("  "), (String::new(), String::new()));
    }

    #[test]
    fn only_the_first_separator_splits() {
        assert_eq!(
            parse_entry("openai:sk-ab:cd"),
            ("openai".to_string(), "sk-ab:cd".to_string())
        );
    }

    #[test]
    fn multi_value_order_is_preserved_and_legacy_keys_append() {
        let sources = CredentialSources {
            multi: Some("openai:first,gemini:second,unknown:third".to_string()),
            openai: Some("legacy-openai".to_string()),
            gemini: Some("legacy-gemini".to_string()),
        };
        let chain = resolve(&ApiKeyOverride::None, &sources);
        assert_eq!(
            chain,
            vec![
                cred("openai", "first"),
                cred("gemini", "second"),
                cred("unknown", "third"),
                cred("openai", "legacy-openai"),
                cred("gemini", "legacy-gemini"),
            ]
        );
    }

    #[test]
    fn invalid_multi_entries_are_dropped_not_propagated() {
        let sources = CredentialSources {
            multi: Some(" ,openai:,plainkey,:secret".to_string()),
            ..Default::default()
        };
        let chain = resolve(&ApiKeyOverride::None, &sources);
        assert_eq!(chain, vec![cred("openai", "plainkey")]);
    }

    #[test]
    fn override_replaces_configured_sources() {
        let sources = CredentialSources {
            multi: Some("openai:from-env".to_string()),
            openai: Some("legacy".to_string()),
            gemini: None,
        };
        let chain = resolve(
            &ApiKeyOverride::Single("gemini:override".to_string()),
            &sources,
        );
        assert_eq!(chain, vec![cred("gemini", "override")]);
    }

    #[test]
    fn list_override_keeps_caller_order() {
        let chain = resolve(
            &ApiKeyOverride::List(vec![
                "gemini:g1".to_string(),
                "o1".to_string(),
            ]),
            &CredentialSources::default(),
        );
        assert_eq!(chain, vec![cred("gemini", "g1"), cred("openai", "o1")]);
    }

    #[test]
    fn invalid_override_falls_back_to_sources() {
        let sources = CredentialSources {
            multi: Some("openai:from-env".to_string()),
            ..Default::default()
        };
        let blank = resolve(&ApiKeyOverride::Single("   ".to_string()), &sources);
        assert_eq!(blank, vec![cred("openai", "from-env")]);

        let all_invalid = resolve(
            &ApiKeyOverride::List(vec!["".to_string(), "gemini:".to_string()]),
            &sources,
        );
        assert_eq!(all_invalid, vec![cred("openai", "from-env")]);
    }

    #[test]
    fn no_sources_resolve_to_an_empty_chain() {
        let chain = resolve(&ApiKeyOverride::None, &CredentialSources::default());
        assert!(chain.is_empty());
    }

    #[test]
    fn duplicate_secrets_are_not_collapsed() {
        let sources = CredentialSources {
            multi: Some("openai:same".to_string()),
            openai: Some("same".to_string()),
            gemini: None,
        };
        let chain = resolve(&ApiKeyOverride::None, &sources);
        assert_eq!(chain, vec![cred("openai", "same"), cred("openai", "same")]);
    }
}
