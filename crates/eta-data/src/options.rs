//! Selectable value ranges derived from the training data.

use serde::Serialize;

use crate::dataset::{TrainingRow, TrainingSet};
use crate::error::DatasetError;

/// Observed bounds of a numeric column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NumericRange {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

impl NumericRange {
    fn from_values(values: impl Iterator<Item = f64>) -> Option<Self> {
        let (mut min, mut max, mut sum, mut n) = (f64::INFINITY, f64::NEG_INFINITY, 0.0, 0usize);
        for v in values {
            min = min.min(v);
            max = max.max(v);
            sum += v;
            n += 1;
        }
        (n > 0).then(|| Self {
            min,
            max,
            mean: sum / n as f64,
        })
    }

    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// The values a user may choose from, one list per categorical input.
///
/// Text categories keep first-seen order; numeric categories are sorted.
/// The first entry of each list is its default.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormOptions {
    pub order_types: Vec<String>,
    pub multiple_deliveries: Vec<u32>,
    pub vehicles: Vec<String>,
    pub vehicle_conditions: Vec<u32>,
    pub city_codes: Vec<String>,
    pub cities: Vec<String>,
    pub traffic_densities: Vec<String>,
    pub weather_conditions: Vec<String>,
    pub festivals: Vec<String>,
    pub age: NumericRange,
    pub rating: NumericRange,
    /// Observed delivery durations in minutes; `None` when no row had one.
    pub time_taken: Option<NumericRange>,
}

fn distinct(rows: &[TrainingRow], field: impl Fn(&TrainingRow) -> &str) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for row in rows {
        let value = field(row);
        if !seen.iter().any(|s| s == value) {
            seen.push(value.to_string());
        }
    }
    seen
}

fn sorted_distinct(rows: &[TrainingRow], field: impl Fn(&TrainingRow) -> u32) -> Vec<u32> {
    let mut values: Vec<u32> = rows.iter().map(field).collect();
    values.sort_unstable();
    values.dedup();
    values
}

impl FormOptions {
    pub fn from_rows(rows: &[TrainingRow]) -> Result<Self, DatasetError> {
        let age = NumericRange::from_values(rows.iter().map(|r| f64::from(r.age)))
            .ok_or(DatasetError::Empty)?;
        let rating =
            NumericRange::from_values(rows.iter().map(|r| r.rating)).ok_or(DatasetError::Empty)?;

        Ok(Self {
            order_types: distinct(rows, |r| r.order_type.as_str()),
            multiple_deliveries: sorted_distinct(rows, |r| r.multiple_deliveries),
            vehicles: distinct(rows, |r| r.vehicle.as_str()),
            vehicle_conditions: sorted_distinct(rows, |r| r.vehicle_condition),
            city_codes: distinct(rows, |r| r.city_code.as_str()),
            cities: distinct(rows, |r| r.city.as_str()),
            traffic_densities: distinct(rows, |r| r.traffic.as_str()),
            weather_conditions: distinct(rows, |r| r.weather.as_str()),
            festivals: distinct(rows, |r| r.festival.as_str()),
            age,
            rating,
            time_taken: NumericRange::from_values(
                rows.iter().filter_map(|r| r.time_taken_min).map(f64::from),
            ),
        })
    }

    pub fn from_training_set(set: &TrainingSet) -> Result<Self, DatasetError> {
        Self::from_rows(set.rows())
    }

    /// Default age: the mean, truncated.
    pub fn default_age(&self) -> u32 {
        self.age.mean.trunc() as u32
    }

    /// Default rating: the mean.
    pub fn default_rating(&self) -> f64 {
        self.rating.mean
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
