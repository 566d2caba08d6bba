use axum::{
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use skyroute_core::CoreError;

#[derive(Debug)]
pub enum AppError {
    ValidationError(String),
    UpstreamUnavailable(String),
    InternalServerError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::UpstreamUnavailable(msg) => {
                tracing::warn!("Upstream unavailable: {}", msg);
                (StatusCode::SERVICE_UNAVAILABLE, "Flight offer source unavailable".to_string())
            }
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error".to_string())
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidSearchOptions(_)
            | CoreError::InvalidSearchCriteria(_)
            | CoreError::ValidationError(_) => AppError::ValidationError(err.to_string()),
            CoreError::OfferSourceFailure(ref source) => {
                AppError::UpstreamUnavailable(source.to_string())
            }
            CoreError::InvalidItinerary(_) | CoreError::CurrencyMismatch { .. } => {
                AppError::InternalServerError(err.to_string())
            }
        }
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::ValidationError(rejection.body_text())
    }
}
