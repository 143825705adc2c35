use axum::{
    Extension, Json,
    body::Bytes,
    extract::{Query, State},
    http::{HeaderMap, HeaderValue},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::{info, instrument};

use super::error::GatewayError;
use super::state::HandlerState;
use super::{EvaluationId, VIVA_STATUS_EVALUATED, VIVA_STATUS_HEADER};
use crate::audio::{AudioPreprocessor, is_wav};
use crate::constants::MIN_TEXT_ANSWER_LEN;
use crate::orchestrator::{EvaluationError, EvaluationRequest, EvaluationResult};
use crate::retrieval::Retriever;
use crate::scoring::{ConceptScorer, SemanticScorer};
use crate::transcription::Transcriber;

/// Body of `POST /v1/evaluate/text`.
#[derive(Debug, Deserialize)]
pub struct TextEvaluationRequest {
    pub question_id: String,
    pub student_answer: String,
    #[serde(default)]
    pub top_k_evidence: Option<usize>,
}

/// Query of `POST /v1/evaluate/audio`.
#[derive(Debug, Deserialize)]
pub struct AudioEvaluationQuery {
    pub question_id: String,
    #[serde(default)]
    pub top_k_evidence: Option<usize>,
}

#[instrument(
    skip(state, request, evaluation_id),
    fields(evaluation_id = %evaluation_id.0, question_id = tracing::field::Empty)
)]
pub async fn evaluate_text_handler<S, C, R, P, T>(
    State(state): State<HandlerState<S, C, R, P, T>>,
    Extension(evaluation_id): Extension<EvaluationId>,
    Json(request): Json<serde_json::Value>,
) -> Result<Response, GatewayError>
where
    S: SemanticScorer + 'static,
    C: ConceptScorer + 'static,
    R: Retriever + 'static,
    P: AudioPreprocessor + 'static,
    T: Transcriber + 'static,
{
    let request: TextEvaluationRequest = serde_json::from_value(request)
        .map_err(|e| GatewayError::InvalidRequest(format!("Invalid request schema: {}", e)))?;
    tracing::Span::current().record("question_id", request.question_id.as_str());

    if request.student_answer.chars().count() < MIN_TEXT_ANSWER_LEN {
        return Err(EvaluationError::InvalidInput {
            reason: format!(
                "student_answer must be at least {} characters",
                MIN_TEXT_ANSWER_LEN
            ),
        }
        .into());
    }

    let mut evaluation = EvaluationRequest::text(&request.question_id, &request.student_answer);
    evaluation.top_k_evidence = request.top_k_evidence;

    let result = state.orchestrator.evaluate(evaluation).await?;
    Ok(evaluated(result))
}

#[instrument(
    skip(state, query, evaluation_id, body),
    fields(evaluation_id = %evaluation_id.0, question_id = %query.question_id, bytes = body.len())
)]
pub async fn evaluate_audio_handler<S, C, R, P, T>(
    State(state): State<HandlerState<S, C, R, P, T>>,
    Extension(evaluation_id): Extension<EvaluationId>,
    Query(query): Query<AudioEvaluationQuery>,
    body: Bytes,
) -> Result<Response, GatewayError>
where
    S: SemanticScorer + 'static,
    C: ConceptScorer + 'static,
    R: Retriever + 'static,
    P: AudioPreprocessor + 'static,
    T: Transcriber + 'static,
{
    state.orchestrator.question(&query.question_id)?;

    if !is_wav(&body) {
        return Err(GatewayError::InvalidRequest(
            "Only WAV audio files are supported".to_string(),
        ));
    }

    let result = state
        .spoken
        .evaluate(
            &state.orchestrator,
            &query.question_id,
            body.to_vec(),
            query.top_k_evidence,
        )
        .await?;
    Ok(evaluated(result))
}

fn evaluated(result: EvaluationResult) -> Response {
    info!(
        final_score = result.final_score,
        verdict = %result.verdict,
        audio = result.audio_feedback.is_some(),
        "Answer evaluated"
    );

    let mut headers = HeaderMap::new();
    headers.insert(
        VIVA_STATUS_HEADER,
        HeaderValue::from_static(VIVA_STATUS_EVALUATED),
    );
    (headers, Json(result)).into_response()
}
