//! eta-serve: HTTP JSON surface for eta.
//!
//! | Route           | Body                    |
//! |-----------------|-------------------------|
//! | `GET /health`   | `ok`                    |
//! | `GET /options`  | [`FormOptions`] as JSON |
//! | `POST /predict` | [`FormInput`](eta_data::FormInput) in, [`routes::Prediction`] out |
//!
//! Validation failures come back as `422` with `{"error": "<message>"}`.

pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use chrono::NaiveDateTime;
use eta_core::{config::SummaryConfig, Predictor};
use eta_data::FormOptions;
use tracing::info;

pub use error::ApiError;

/// Source of "now" for defaulted order and pickup times.
pub type Clock = fn() -> NaiveDateTime;

pub fn local_clock() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}

/// Immutable state shared by every request.
pub struct AppState {
    pub options: FormOptions,
    pub predictor: Arc<dyn Predictor>,
    pub summary: SummaryConfig,
    pub clock: Clock,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(options: FormOptions, predictor: Arc<dyn Predictor>, summary: SummaryConfig) -> Self {
        Self {
            options,
            predictor,
            summary,
            clock: local_clock,
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }
}

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/health", get(routes::health_handler))
        .route("/options", get(routes::options_handler))
        .route("/predict", post(routes::predict_handler))
        .with_state(state)
}

/// Bind `addr` and serve until the process is stopped.
pub async fn serve(addr: &str, state: SharedState) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, predictor = state.predictor.name(), "listening");
    axum::serve(listener, router(state)).await?;
    Ok(())
}
