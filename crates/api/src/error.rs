use analysis::AnalysisError;
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

#[derive(Serialize)]
struct ErrorBody {
    detail: String,
}

/// Every failure leaves the API as `{"detail": "..."}`.
#[derive(Debug)]
pub enum ApiError {
    /// Body could not be read as the expected request shape.
    InvalidRequest(String),
    /// Anything that went wrong talking to or parsing the model.
    Analysis(AnalysisError),
}

impl From<AnalysisError> for ApiError {
    fn from(err: AnalysisError) -> Self {
        Self::Analysis(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            ApiError::InvalidRequest(detail) => (StatusCode::UNPROCESSABLE_ENTITY, detail),
            ApiError::Analysis(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
        };

        (status, Json(ErrorBody { detail })).into_response()
    }
}
