use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::llm::provider::Completion;
use crate::llm::MAX_COMPLETION_TOKENS;

const OPENAI_MODEL: &str = "gpt-4o-mini";
const CHAT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<ChatMessage>,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<ChatUsage>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ChatUsage {
    total_tokens: u32,
}

pub async fn complete(client: &Client, prompt: &str, api_key: &str) -> Result<Completion> {
    let request_body = ChatRequest {
        model: OPENAI_MODEL.to_string(),
        max_tokens: MAX_COMPLETION_TOKENS,
        messages: vec![ChatMessage {
            role: "user".to_string(),
            content: prompt.to_string(),
        }],
    };

    let response = client
        .post(CHAT_COMPLETIONS_URL)
        .bearer_auth(api_key)
        .json(&request_body)
        .send()
        .await
        .map_err(|e| Error::LLMApi(format!("Failed to send request: {}", e)))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(Error::LLMApi(format!(
            "OpenAI API error ({}): {}",
            status, body
        )));
    }

    let result: ChatResponse = response
        .json()
        .await
        .map_err(|e| Error::LLMApi(format!("Failed to parse OpenAI response: {}", e)))?;

    let tokens_used = result.usage.map(|u| u.total_tokens);
    let text = result
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .map(|content| content.trim().to_string())
        .unwrap_or_default();

    if text.is_empty() {
        return Err(Error::LLMApi("Empty response from OpenAI".to_string()));
    }

    Ok(Completion { text, tokens_used })
}
