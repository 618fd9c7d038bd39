//! Prediction seam.
//!
//! [`Predictor`] is the boundary to whatever produces a duration from an
//! [`OrderRecord`]. The bundled [`LinearPredictor`] derives a small feature
//! vector (distance, preparation time, categorical weights) and applies
//! coefficients loaded from a JSON model file.

use std::collections::HashMap;
use std::path::Path;

use chrono::Timelike;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::normalizer::WEATHER_PREFIX;
use crate::types::OrderRecord;

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Longest duration accepted from a predictor: one day.
pub const MAX_PREDICTED_MINUTES: f64 = 24.0 * 60.0;

const DEFAULT_MODEL: &str = r#"{
  "intercept": 28.0,
  "distance_km": 0.35,
  "prep_minutes": 0.05,
  "order_hour": 0.1,
  "age": 0.15,
  "rating": -4.0,
  "vehicle_condition": -2.5,
  "multiple_deliveries": 5.5,
  "festival": 10.0,
  "traffic": { "Low": -3.0, "Medium": 2.0, "High": 4.0, "Jam": 7.0 },
  "weather": { "Sunny": -3.0, "Cloudy": 3.0, "Fog": 3.0, "Sandstorms": 1.0, "Stormy": 1.0, "Windy": 1.0 },
  "vehicle": { "motorcycle": 1.0, "scooter": 0.0, "electric_scooter": -0.5, "bicycle": 0.0 },
  "city": { "Metropolitian": 1.5, "Urban": -2.0, "Semi-Urban": 6.0 },
  "order_type": { "Snack": 0.0, "Meal": 0.5, "Drinks": 0.0, "Buffet": 0.5 }
}"#;

#[derive(Debug, Error)]
pub enum PredictError {
    #[error("failed to read model file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse model file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("record field {field} is not a number: {value:?}")]
    Feature { field: &'static str, value: String },

    #[error("predictor returned no output")]
    EmptyOutput,

    #[error("predicted duration out of range: {0} minutes")]
    OutOfRange(f64),
}

/// Anything that can turn records into predicted durations in minutes.
pub trait Predictor: Send + Sync {
    /// One prediction per record, in order.
    fn predict(&self, records: &[OrderRecord]) -> Result<Vec<f64>, PredictError>;

    fn name(&self) -> &str;
}

/// Predict a single record, taking the first element of the output.
///
/// The result is within `0..=MAX_PREDICTED_MINUTES`; anything else is
/// [`PredictError::OutOfRange`].
pub fn predict_minutes(predictor: &dyn Predictor, record: &OrderRecord) -> Result<f64, PredictError> {
    let minutes = predictor
        .predict(std::slice::from_ref(record))?
        .first()
        .copied()
        .ok_or(PredictError::EmptyOutput)?;
    if (0.0..=MAX_PREDICTED_MINUTES).contains(&minutes) {
        Ok(minutes)
    } else {
        tracing::warn!(predictor = predictor.name(), minutes, "prediction out of range");
        Err(PredictError::OutOfRange(minutes))
    }
}

// ---------------------------------------------------------------------------
// Features
// ---------------------------------------------------------------------------

/// Great-circle distance in kilometres.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let (phi1, phi2) = (lat1.to_radians(), lat2.to_radians());
    let d_phi = (lat2 - lat1).to_radians();
    let d_lambda = (lon2 - lon1).to_radians();
    let a = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * a.sqrt().asin()
}

/// Numeric features derived from one record.
#[derive(Debug, Clone, PartialEq)]
pub struct Features {
    pub distance_km: f64,
    pub prep_minutes: f64,
    pub order_hour: f64,
    pub age: f64,
    pub rating: f64,
    pub vehicle_condition: f64,
    pub multiple_deliveries: f64,
    pub festival: bool,
}

fn coordinate(field: &'static str, value: &str) -> Result<f64, PredictError> {
    // The training data carries some coordinates with a flipped sign.
    value
        .parse::<f64>()
        .map(f64::abs)
        .map_err(|_| PredictError::Feature {
            field,
            value: value.to_string(),
        })
}

impl Features {
    pub fn from_record(record: &OrderRecord) -> Result<Self, PredictError> {
        let distance_km = haversine_km(
            coordinate("Restaurant_latitude", &record.restaurant_latitude)?,
            coordinate("Restaurant_longitude", &record.restaurant_longitude)?,
            coordinate("Delivery_location_latitude", &record.delivery_location_latitude)?,
            coordinate("Delivery_location_longitude", &record.delivery_location_longitude)?,
        );
        let prep = record.pickup_datetime() - record.order_datetime();
        Ok(Self {
            distance_km,
            prep_minutes: prep.num_seconds() as f64 / 60.0,
            order_hour: f64::from(record.time_ordered.hour()),
            age: f64::from(record.delivery_person_age),
            rating: record.delivery_person_ratings,
            vehicle_condition: f64::from(record.vehicle_condition),
            multiple_deliveries: f64::from(record.multiple_deliveries),
            festival: record.festival.eq_ignore_ascii_case("yes"),
        })
    }
}

// ---------------------------------------------------------------------------
// Linear model
// ---------------------------------------------------------------------------

/// Coefficients of a linear duration model. Categorical weights are keyed by
/// the dataset's category labels; unknown labels contribute nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    pub intercept: f64,
    pub distance_km: f64,
    pub prep_minutes: f64,
    #[serde(default)]
    pub order_hour: f64,
    pub age: f64,
    pub rating: f64,
    pub vehicle_condition: f64,
    pub multiple_deliveries: f64,
    pub festival: f64,
    #[serde(default)]
    pub traffic: HashMap<String, f64>,
    #[serde(default)]
    pub weather: HashMap<String, f64>,
    #[serde(default)]
    pub vehicle: HashMap<String, f64>,
    #[serde(default)]
    pub city: HashMap<String, f64>,
    #[serde(default)]
    pub order_type: HashMap<String, f64>,
}

impl LinearModel {
    fn score(&self, record: &OrderRecord) -> Result<f64, PredictError> {
        let f = Features::from_record(record)?;
        let weight = |table: &HashMap<String, f64>, key: &str| table.get(key).copied().unwrap_or(0.0);
        let weather = record
            .weather_conditions
            .strip_prefix(WEATHER_PREFIX)
            .unwrap_or(&record.weather_conditions);

        let minutes = self.intercept
            + self.distance_km * f.distance_km
            + self.prep_minutes * f.prep_minutes
            + self.order_hour * f.order_hour
            + self.age * f.age
            + self.rating * f.rating
            + self.vehicle_condition * f.vehicle_condition
            + self.multiple_deliveries * f.multiple_deliveries
            + if f.festival { self.festival } else { 0.0 }
            + weight(&self.traffic, &record.road_traffic_density)
            + weight(&self.weather, weather)
            + weight(&self.vehicle, &record.type_of_vehicle)
            + weight(&self.city, &record.city)
            + weight(&self.order_type, &record.type_of_order);

        // `max` would turn NaN into 0.
        if !minutes.is_finite() {
            return Err(PredictError::OutOfRange(minutes));
        }
        Ok(minutes.max(0.0))
    }
}

/// [`Predictor`] backed by a [`LinearModel`].
#[derive(Debug, Clone)]
pub struct LinearPredictor {
    model: LinearModel,
    name: String,
}

impl LinearPredictor {
    pub fn new(model: LinearModel, name: impl Into<String>) -> Self {
        Self {
            model,
            name: name.into(),
        }
    }

    /// Load coefficients from a JSON model file.
    pub fn load(path: &Path) -> Result<Self, PredictError> {
        let text = std::fs::read_to_string(path)?;
        let model = serde_json::from_str(&text)?;
        tracing::info!(path = %path.display(), "loaded model");
        Ok(Self::new(model, path.display().to_string()))
    }

    /// Load from `path` when given, otherwise use the built-in coefficients.
    pub fn from_path(path: Option<&Path>) -> Result<Self, PredictError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::builtin()),
        }
    }

    pub fn builtin() -> Self {
        let model = serde_json::from_str(DEFAULT_MODEL)
            .expect("built-in model coefficients must deserialize correctly");
        Self::new(model, "builtin-linear")
    }

    pub fn model(&self) -> &LinearModel {
        &self.model
    }
}

impl Predictor for LinearPredictor {
    fn predict(&self, records: &[OrderRecord]) -> Result<Vec<f64>, PredictError> {
        records.iter().map(|r| self.model.score(r)).collect()
    }

    fn name(&self) -> &str {
        &self.name
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
