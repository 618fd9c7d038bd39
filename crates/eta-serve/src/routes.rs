use axum::{extract::State, Json};
use eta_core::{normalize, predict_minutes, DeliverySummary, OrderRecord};
use eta_data::{FormInput, FormOptions};
use serde::Serialize;

use crate::error::ApiError;
use crate::SharedState;

/// Response body of `POST /predict`.
#[derive(Debug, Serialize)]
pub struct Prediction {
    pub record: OrderRecord,
    pub summary: DeliverySummary,
    /// The summary as plain text, using the configured formats.
    pub rendered: String,
    pub predictor: String,
}

pub async fn health_handler() -> &'static str {
    "ok"
}

pub async fn options_handler(State(state): State<SharedState>) -> Json<FormOptions> {
    Json(state.options.clone())
}

pub async fn predict_handler(
    State(state): State<SharedState>,
    Json(input): Json<FormInput>,
) -> Result<Json<Prediction>, ApiError> {
    let form = state.options.complete(input)?;
    let record = normalize(&form, (state.clock)())?;
    let minutes = predict_minutes(state.predictor.as_ref(), &record)?;
    let summary = DeliverySummary::new(&record, minutes, state.summary.bands())?;
    tracing::debug!(minutes = summary.minutes, speed = %summary.speed, "prediction served");

    Ok(Json(Prediction {
        rendered: summary.render(&state.summary),
        predictor: state.predictor.name().to_string(),
        record,
        summary,
    }))
}
