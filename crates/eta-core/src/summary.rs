//! Delivery summary: arrival estimate and speed band for a predicted duration.

use chrono::{NaiveDateTime, TimeDelta};
use serde::Serialize;

use crate::config::SummaryConfig;
use crate::predict::PredictError;
use crate::types::OrderRecord;

/// Coarse delivery speed, derived from the predicted duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DeliverySpeed {
    Fast,
    Normal,
    Slow,
}

impl std::fmt::Display for DeliverySpeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeliverySpeed::Fast => write!(f, "Fast"),
            DeliverySpeed::Normal => write!(f, "Normal"),
            DeliverySpeed::Slow => write!(f, "Slow"),
        }
    }
}

/// Thresholds, in minutes, separating the speed bands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedBands {
    /// Strictly below this is `Fast`.
    pub fast_below: f64,
    /// At or below this (and not fast) is `Normal`; above is `Slow`.
    pub normal_up_to: f64,
}

impl Default for SpeedBands {
    fn default() -> Self {
        Self {
            fast_below: 30.0,
            normal_up_to: 45.0,
        }
    }
}

impl SpeedBands {
    pub fn classify(&self, minutes: f64) -> DeliverySpeed {
        if minutes < self.fast_below {
            DeliverySpeed::Fast
        } else if minutes <= self.normal_up_to {
            DeliverySpeed::Normal
        } else {
            DeliverySpeed::Slow
        }
    }
}

/// Round a duration to two decimal places.
pub fn round_minutes(minutes: f64) -> f64 {
    (minutes * 100.0).round() / 100.0
}

/// Pickup time plus the whole minutes of `minutes`, plus the whole seconds
/// of its fractional part. Sub-second remainders are dropped.
///
/// `None` when the offset does not fit a timestamp.
pub fn estimate_arrival(pickup: NaiveDateTime, minutes: f64) -> Option<NaiveDateTime> {
    if !minutes.is_finite() {
        return None;
    }
    let whole = minutes.trunc();
    let seconds = ((minutes - whole) * 60.0).trunc();
    pickup
        .checked_add_signed(TimeDelta::try_minutes(whole as i64)?)?
        .checked_add_signed(TimeDelta::try_seconds(seconds as i64)?)
}

/// Everything shown to the user after a prediction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeliverySummary {
    pub ordered_at: NaiveDateTime,
    pub picked_up_at: NaiveDateTime,
    /// Predicted duration, rounded to two decimals.
    pub minutes: f64,
    pub arrival: NaiveDateTime,
    pub speed: DeliverySpeed,
}

impl DeliverySummary {
    pub fn new(
        record: &OrderRecord,
        predicted_minutes: f64,
        bands: SpeedBands,
    ) -> Result<Self, PredictError> {
        let minutes = round_minutes(predicted_minutes);
        let picked_up_at = record.pickup_datetime();
        let arrival = estimate_arrival(picked_up_at, minutes)
            .ok_or(PredictError::OutOfRange(predicted_minutes))?;
        Ok(Self {
            ordered_at: record.order_datetime(),
            picked_up_at,
            minutes,
            arrival,
            speed: bands.classify(minutes),
        })
    }

    /// Plain-text rendering, one labelled line per value.
    pub fn render(&self, config: &SummaryConfig) -> String {
        let stamp = |t: &NaiveDateTime| t.format(&config.datetime_format).to_string();
        [
            format!("Order Placed:        {}", stamp(&self.ordered_at)),
            format!("Order Picked Up:     {}", stamp(&self.picked_up_at)),
            format!("Total Delivery Time: {:.2} minutes", self.minutes),
            format!("Estimated Arrival:   {}", stamp(&self.arrival)),
            format!("Delivery Speed:      {}", self.speed),
            format!(
                "Arrival Time:        {}",
                self.arrival.format(&config.clock_format)
            ),
        ]
        .join("\n")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
