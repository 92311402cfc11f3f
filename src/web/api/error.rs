use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::orbit::PropagationError;
use crate::track::TrackError;

#[derive(Debug)]
pub enum ApiError {
    Validation(String),
    NotFound(&'static str),
    Unavailable(&'static str),
    Track(TrackError),
    Internal(String),
}

impl From<TrackError> for ApiError {
    fn from(e: TrackError) -> Self {
        ApiError::Track(e)
    }
}

impl From<PropagationError> for ApiError {
    fn from(e: PropagationError) -> Self {
        ApiError::Track(TrackError::Propagation(e))
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Track(TrackError::InvalidRequestRange(_)) => StatusCode::BAD_REQUEST,
            ApiError::Track(TrackError::Propagation(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::Validation(msg) => ErrorResponse::with_message("validation_failed", &msg),
            ApiError::NotFound(reason) => ErrorResponse::new(reason),
            ApiError::Unavailable(reason) => ErrorResponse::new(reason),
            ApiError::Track(e) => {
                let code = match &e {
                    TrackError::InvalidRequestRange(_) => "invalid_request_range",
                    TrackError::Propagation(PropagationError::MalformedElementSet(_)) => {
                        "malformed_element_set"
                    }
                    TrackError::Propagation(PropagationError::OrbitDecayed { .. }) => {
                        "orbit_decayed"
                    }
                };
                ErrorResponse::with_message(code, &e.to_string())
            }
            ApiError::Internal(msg) => ErrorResponse::with_message("internal_error", &msg),
        };
        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: &str) -> Self {
        ErrorResponse {
            error: error.to_string(),
            message: None,
        }
    }

    pub fn with_message(error: &str, message: &str) -> Self {
        ErrorResponse {
            error: error.to_string(),
            message: Some(message.to_string()),
        }
    }
}
