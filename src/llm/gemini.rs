use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::llm::provider::Completion;
use crate::llm::MAX_COMPLETION_TOKENS;

const GENERATE_CONTENT_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
struct GenerationConfig {
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

pub async fn complete(
    client: &Client,
    model: &str,
    prompt: &str,
    api_key: &str,
) -> Result<Completion> {
    let url = format!(
        "{}/{}:generateContent?key={}",
        GENERATE_CONTENT_BASE, model, api_key
    );

    let request_body = GenerateRequest {
        contents: vec![Content {
            parts: vec![Part {
                text: prompt.to_string(),
            }],
        }],
        generation_config: GenerationConfig {
            max_output_tokens: MAX_COMPLETION_TOKENS,
        },
    };

    let response = client
        .post(&url)
        .json(&request_body)
        .send()
        .await
        .map_err(|e| Error::LLMApi(format!("Failed to send request: {}", e)))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(Error::LLMApi(format!(
            "Gemini API error ({}): {}",
            status, body
        )));
    }

    let result: GenerateResponse = response
        .json()
        .await
        .map_err(|e| Error::LLMApi(format!("Failed to parse Gemini response: {}", e)))?;

    // First candidate with any text wins.
    let text = result
        .candidates
        .into_iter()
        .filter_map(|candidate| candidate.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect::<Vec<_>>()
                .join("")
        })
        .map(|text| text.trim().to_string())
        .find(|text| !text.is_empty())
        .unwrap_or_default();

    if text.is_empty() {
        return Err(Error::LLMApi("Empty response from Gemini".to_string()));
    }

    // Usage is not reported for Gemini.
    Ok(Completion {
        text,
        tokens_used: None,
    })
}
