use axum::{
    Json,
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use super::VIVA_STATUS_HEADER;
use crate::orchestrator::EvaluationError;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("{0}")]
    Evaluation(#[from] EvaluationError),
}

#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let (status, viva_status) = match &self {
            GatewayError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "invalid_request"),
            GatewayError::Evaluation(e) if e.is_client_fault() => {
                (StatusCode::BAD_REQUEST, e.code())
            }
            GatewayError::Evaluation(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.code()),
        };

        if status.is_server_error() {
            tracing::error!(error = %self, code = viva_status, "Evaluation failed");
        } else {
            tracing::debug!(error = %self, code = viva_status, "Request rejected");
        }

        let mut headers = HeaderMap::new();
        headers.insert(VIVA_STATUS_HEADER, HeaderValue::from_static(viva_status));

        let body = Json(ErrorResponse {
            error: self.to_string(),
            code: status.as_u16(),
        });

        (status, headers, body).into_response()
    }
}
