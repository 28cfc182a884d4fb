//! HTTP boundary consumed by the presentation layer.

use std::sync::Arc;

use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::diff::diff_texts;
use crate::error::Error;
use crate::extract::extract_text;
use crate::summarize::{ApiKeyOverride, Summarizer};

pub const DEFAULT_MISSION_CONTEXT: &str = "Summarize the document differences with the perspective of a medical science \
     liaison and tailor the explanation for marketing, medical affairs, legal, and \
     sales teams.";

const MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

pub struct AppState {
    summarizer: Summarizer,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            summarizer: Summarizer::new(config),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CompareResponse {
    pub diff: String,
    pub summary: String,
    pub method: String,
    pub tokens_used: Option<u32>,
    pub truncated: bool,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/compare", post(compare))
        .route("/health", get(health))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn serve(config: Config) -> crate::error::Result<()> {
    let state = Arc::new(AppState::new(&config));
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("listening on {}", config.bind_addr);
    axum::serve(listener, router).await?;

    Ok(())
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

struct UploadedFile {
    filename: String,
    data: Vec<u8>,
}

/// Compare two uploaded documents and return a diff and AI-generated summary.
async fn compare(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<CompareResponse>, ApiError> {
    let mut file_old: Option<UploadedFile> = None;
    let mut file_new: Option<UploadedFile> = None;
    let mut mission_context: Option<String> = None;
    let mut api_key: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("malformed multipart body: {}", e)))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        match name.as_str() {
            "file_old" | "file_new" => {
                let filename = field.file_name().unwrap_or("unknown").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("failed to read upload: {}", e)))?
                    .to_vec();
                let uploaded = UploadedFile { filename, data };
                if name == "file_old" {
                    file_old = Some(uploaded);
                } else {
                    file_new = Some(uploaded);
                }
            }
            "mission_context" => {
                mission_context = Some(field.text().await.map_err(|e| {
                    ApiError::bad_request(format!("failed to read mission_context: {}", e))
                })?);
            }
            "api_key" => {
                api_key = Some(field.text().await.map_err(|e| {
                    ApiError::bad_request(format!("failed to read api_key: {}", e))
                })?);
            }
            _ => {}
        }
    }

    let file_old =
        file_old.ok_or_else(|| ApiError::bad_request("missing file_old field".to_string()))?;
    let file_new =
        file_new.ok_or_else(|| ApiError::bad_request("missing file_new field".to_string()))?;

    let text_old = extract_text(&file_old.filename, &file_old.data)?;
    let text_new = extract_text(&file_new.filename, &file_new.data)?;

    let diff = diff_texts(&text_old, &text_new);

    let context = mission_context
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| DEFAULT_MISSION_CONTEXT.to_string());
    let api_keys = match api_key.filter(|k| !k.is_empty()) {
        Some(key) => ApiKeyOverride::Single(key),
        None => ApiKeyOverride::None,
    };

    let summary = state
        .summarizer
        .summarize(&diff, Some(&context), &api_keys)
        .await;

    Ok(Json(CompareResponse {
        diff,
        summary: summary.text,
        method: summary.method,
        tokens_used: summary.tokens_used,
        truncated: summary.truncated,
    }))
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    detail: String,
}

#[derive(Serialize)]
struct ErrorBody {
    detail: String,
}

impl ApiError {
    fn bad_request(detail: String) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            detail,
        }
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let status = if err.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        Self {
            status,
            detail: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody { detail: self.detail })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_input_errors_map_to_bad_request() {
        let err = ApiError::from(Error::UnsupportedFormat(".xyz".to_string()));
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert!(err.detail.contains(".xyz"));

        let err = ApiError::from(Error::DocumentParse("broken".to_string()));
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn service_errors_map_to_internal_error() {
        let err = ApiError::from(Error::LLMApi("unreachable".to_string()));
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
