//! HTTP surface for the translator.
//!
//! - `GET /` serves the translation form
//! - `POST /translate` takes `{"text": ...}` and returns
//!   `{"formal", "informal", "success": true}` or `{"error": ...}`
//! - `GET /health` reports whether the model has been loaded
//! - `GET /test` runs a canned rule-based translation

use crate::config::ServerConfig;
use crate::error::Error;
use crate::service::TranslationService;
use crate::translate::RuleBasedTranslator;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

const INDEX_HTML: &str = include_str!("index.html");
const SELF_TEST_INPUT: &str = "I would like to request your assistance";

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<TranslationService>,
    pub rules: RuleBasedTranslator,
}

impl AppState {
    pub fn new(service: TranslationService) -> Self {
        Self {
            service: Arc::new(service),
            rules: RuleBasedTranslator::default(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TranslateRequest {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TranslateResponse {
    pub formal: String,
    pub informal: String,
    pub success: bool,
    pub backend: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub model_loaded: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SelfTestResponse {
    pub input: String,
    pub output: String,
    pub status: String,
}

/// Error body `{"error": ...}` with a matching status code.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        if err.is_client_error() {
            return Self::bad_request(err.to_string());
        }
        match err {
            Error::ModelUnavailable(_) => Self {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: "Model not available".to_string(),
            },
            other => Self {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: format!("Translation failed: {other}"),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({ "error": self.message }));
        (self.status, body).into_response()
    }
}

/// Builds the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/translate", post(translate))
        .route("/health", get(health))
        .route("/test", get(self_test))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn translate(
    State(state): State<AppState>,
    payload: Result<Json<TranslateRequest>, JsonRejection>,
) -> Result<Json<TranslateResponse>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::bad_request(e.body_text()))?;
    info!("Received text: '{}'", request.text.trim());

    let outcome = state.service.translate(&request.text).await.map_err(|e| {
        error!("Translation error: {e}");
        ApiError::from(e)
    })?;

    info!("Translated to: '{}' ({})", outcome.informal, outcome.backend);
    Ok(Json(TranslateResponse {
        formal: outcome.formal,
        informal: outcome.informal,
        success: true,
        backend: outcome.backend,
    }))
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        model_loaded: state.service.is_model_loaded(),
    })
}

async fn self_test(State(state): State<AppState>) -> Json<SelfTestResponse> {
    Json(SelfTestResponse {
        input: SELF_TEST_INPUT.to_string(),
        output: state.rules.translate(SELF_TEST_INPUT),
        status: "working".to_string(),
    })
}

/// Runs the server until Ctrl+C.
pub async fn serve(config: ServerConfig) -> crate::Result<()> {
    let service = TranslationService::from_config(&config);
    let app = create_router(AppState::new(service));

    let addr = config.bind_address();
    info!("Starting server on {addr} (backend: {})", config.backend);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {e}");
    }
}
