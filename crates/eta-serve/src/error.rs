use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use eta_core::{NormalizeError, PredictError};
use eta_data::FormError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Invalid(#[from] NormalizeError),

    #[error(transparent)]
    Form(#[from] FormError),

    #[error("prediction failed: {0}")]
    Predict(#[from] PredictError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Invalid { .. } | ApiError::Form { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Predict { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Predict(err) = &self {
            tracing::error!(error = %err, "prediction failed");
        }
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}
