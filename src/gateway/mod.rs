//! HTTP gateway (Axum) for answer evaluation.
//!
//! Routes:
//! - `GET /healthz`, `GET /ready`
//! - `POST /v1/evaluate/text` with `{question_id, student_answer}`
//! - `POST /v1/evaluate/audio?question_id=…` with a WAV body

pub mod error;
pub mod handler;
pub mod state;


use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Request, State},
    http::{HeaderMap, StatusCode, header::HeaderValue},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

pub use error::GatewayError;
pub use handler::{evaluate_audio_handler, evaluate_text_handler};
pub use state::HandlerState;

use crate::audio::AudioPreprocessor;
use crate::retrieval::Retriever;
use crate::scoring::{ConceptScorer, SemanticScorer};
use crate::transcription::Transcriber;

/// Outcome header set on every gateway response.
pub const VIVA_STATUS_HEADER: &str = "x-viva-status";
/// Per-request identifier header.
pub const EVALUATION_ID_HEADER: &str = "x-viva-evaluation-id";

pub const VIVA_STATUS_HEALTHY: &str = "healthy";
pub const VIVA_STATUS_READY: &str = "ready";
pub const VIVA_STATUS_EVALUATED: &str = "evaluated";

/// Request-scoped identifier, echoed in [`EVALUATION_ID_HEADER`].
#[derive(Debug, Clone, Copy)]
pub struct EvaluationId(pub Uuid);

pub fn create_router_with_state<S, C, R, P, T>(state: HandlerState<S, C, R, P, T>) -> Router
where
    S: SemanticScorer + 'static,
    C: ConceptScorer + 'static,
    R: Retriever + 'static,
    P: AudioPreprocessor + 'static,
    T: Transcriber + 'static,
{
    let max_audio_bytes = state.max_audio_bytes;

    Router::new()
        .route("/healthz", get(health_handler))
        .route("/ready", get(ready_handler::<S, C, R, P, T>))
        .route("/v1/evaluate/text", post(evaluate_text_handler::<S, C, R, P, T>))
        .route(
            "/v1/evaluate/audio",
            post(evaluate_audio_handler::<S, C, R, P, T>)
                .layer(DefaultBodyLimit::max(max_audio_bytes)),
        )
        .layer(middleware::from_fn(assign_evaluation_id))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn assign_evaluation_id(mut request: Request, next: Next) -> Response {
    let id = EvaluationId(Uuid::new_v4());
    request.extensions_mut().insert(id);

    let mut response = next.run(request).await;
    if let Ok(value) = HeaderValue::from_str(&id.0.to_string()) {
        response.headers_mut().insert(EVALUATION_ID_HEADER, value);
    }
    response
}

#[derive(serde::Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(serde::Serialize)]
pub struct ReadyResponse {
    pub status: &'static str,
    pub components: ComponentStatus,
}

#[derive(serde::Serialize)]
pub struct ComponentStatus {
    pub http: &'static str,
    pub questions: usize,
    pub encoder_mode: &'static str,
    pub transcriber: &'static str,
}

#[tracing::instrument]
pub async fn health_handler() -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(
        VIVA_STATUS_HEADER,
        HeaderValue::from_static(VIVA_STATUS_HEALTHY),
    );

    (
        StatusCode::OK,
        headers,
        Json(HealthResponse { status: "ok" }),
    )
        .into_response()
}

/// Ready once at least one question is loaded; audio readiness is informational.
#[tracing::instrument(skip(state))]
pub async fn ready_handler<S, C, R, P, T>(
    State(state): State<HandlerState<S, C, R, P, T>>,
) -> Response
where
    S: SemanticScorer + 'static,
    C: ConceptScorer + 'static,
    R: Retriever + 'static,
    P: AudioPreprocessor + 'static,
    T: Transcriber + 'static,
{
    let components = ComponentStatus {
        http: VIVA_STATUS_READY,
        questions: state.orchestrator.questions().len(),
        encoder_mode: state.encoder_mode,
        transcriber: if state.spoken.transcriber().is_available() {
            VIVA_STATUS_READY
        } else {
            "unavailable"
        },
    };

    let is_ready = components.questions > 0;
    let (status_code, status_msg) = if is_ready {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "pending")
    };

    let mut headers = HeaderMap::new();
    headers.insert(VIVA_STATUS_HEADER, HeaderValue::from_static(status_msg));

    (
        status_code,
        headers,
        Json(ReadyResponse {
            status: status_msg,
            components,
        }),
    )
        .into_response()
}
