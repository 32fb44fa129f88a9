use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use labsky_core::{BusinessRule, CoreError, Entity};
use serde_json::json;

#[derive(Debug)]
pub enum AppError {
    Core(CoreError),
    BadRequest(String),
    InternalServerError(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Core(err) => match err {
                CoreError::NotFound(Entity::Passenger | Entity::Seat) => StatusCode::NOT_FOUND,
                CoreError::AlreadyCheckedIn => StatusCode::CONFLICT,
                CoreError::SeatOccupied(_) => StatusCode::CONFLICT,
                CoreError::ValidationFailed(_) => StatusCode::BAD_REQUEST,
                CoreError::BusinessRule(BusinessRule::UnderageEmergencyRow | BusinessRule::BaggageRequired) => {
                    StatusCode::BAD_REQUEST
                }
                CoreError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (code, error_message) = match self {
            // Structural failures are reported field by field
            AppError::Core(CoreError::ValidationFailed(fields)) => {
                return (status, Json(fields)).into_response();
            }
            AppError::Core(CoreError::Store(err)) => {
                tracing::error!("Internal Server Error: {}", err);
                ("INTERNAL_ERROR", "Internal Server Error".to_string())
            }
            AppError::Core(err) => (err.code(), err.to_string()),
            AppError::BadRequest(msg) => ("BAD_REQUEST", msg),
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                ("INTERNAL_ERROR", "Internal Server Error".to_string())
            }
        };

        let body = Json(json!({
            "error": error_message,
            "code": code,
        }));

        (status, body).into_response()
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        Self::Core(err)
    }
}
