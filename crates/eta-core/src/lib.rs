//! eta-core: order normalization and delivery estimates.
//!
//! This crate holds everything between raw user input and the summary shown
//! back to the user, plus the shared types used by the other crates.
//!
//! # Pipeline
//!
//! ```text
//! OrderForm ──► normalizer ──► OrderRecord ──► Predictor ──► DeliverySummary
//! ```
//!
//! Normalization is a pure function of the form and a caller-supplied clock;
//! it never produces a partial record.

pub mod config;
pub mod normalizer;
pub mod predict;
pub mod summary;
pub mod types;

pub use normalizer::{normalize, normalize_now, NormalizeError};
pub use predict::{predict_minutes, LinearPredictor, PredictError, Predictor};
pub use summary::{DeliverySpeed, DeliverySummary, SpeedBands};
pub use types::{OrderForm, OrderRecord};
