//! Normalizer: turns a raw [`OrderForm`] into a complete [`OrderRecord`].
//!
//! The whole step is a pure function of the form and a reference "now", so
//! the caller owns the clock. Either every field of the record is resolved or
//! a [`NormalizeError`] is returned; there is no partial record.

use chrono::{NaiveDateTime, NaiveTime, TimeDelta, Timelike};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::types::{OrderForm, OrderRecord};

/// Placeholder order identifier. The model ignores it but the schema has it.
pub const PLACEHOLDER_ORDER_ID: &str = "123456";

/// Appended to the city code to form a placeholder delivery-person ID.
pub const DELIVERY_PERSON_SUFFIX: &str = "RES13DEL02";

/// Weather values are stored with this prefix in the training data.
pub const WEATHER_PREFIX: &str = "conditions ";

/// Minutes after now used as the pickup time when none is given.
pub const DEFAULT_PICKUP_OFFSET_MINUTES: i64 = 15;

const INPUT_CLOCK_FORMAT: &str = "%H:%M";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Which time input failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeField {
    OrderTime,
    PickupTime,
}

impl TimeField {
    fn example(self) -> &'static str {
        match self {
            TimeField::OrderTime => "14:30",
            TimeField::PickupTime => "14:45",
        }
    }
}

impl std::fmt::Display for TimeField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimeField::OrderTime => write!(f, "order time"),
            TimeField::PickupTime => write!(f, "pickup time"),
        }
    }
}

/// Which coordinate input failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CoordinateField {
    RestaurantLatitude,
    RestaurantLongitude,
    DeliveryLatitude,
    DeliveryLongitude,
}

impl std::fmt::Display for CoordinateField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CoordinateField::RestaurantLatitude => write!(f, "restaurant latitude"),
            CoordinateField::RestaurantLongitude => write!(f, "restaurant longitude"),
            CoordinateField::DeliveryLatitude => write!(f, "delivery latitude"),
            CoordinateField::DeliveryLongitude => write!(f, "delivery longitude"),
        }
    }
}

/// A user-visible validation failure. The message is meant to be shown as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    #[error("Please enter time in HH:MM format (e.g. {})", .field.example())]
    InvalidTime { field: TimeField, input: String },

    #[error("Please enter {field} as a decimal number (got {input:?})")]
    InvalidCoordinate {
        field: CoordinateField,
        input: String,
    },
}

impl NormalizeError {
    /// The raw input that was rejected.
    pub fn input(&self) -> &str {
        match self {
            NormalizeError::InvalidTime { input, .. }
            | NormalizeError::InvalidCoordinate { input, .. } => input,
        }
    }
}

// ---------------------------------------------------------------------------
// Clock strings
// ---------------------------------------------------------------------------

/// Parse a 24-hour `HH:MM` clock string.
pub fn parse_clock(input: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(input, INPUT_CLOCK_FORMAT).ok()
}

/// Format a clock time as `HH:MM`, the inverse of [`parse_clock`].
pub fn format_clock(time: NaiveTime) -> String {
    time.format(INPUT_CLOCK_FORMAT).to_string()
}

/// Resolve a time input: parsed when valid, `fallback` when empty, an error
/// otherwise. Whitespace-only input counts as entered, and so is an error.
fn resolve_time(
    field: TimeField,
    input: &str,
    fallback: NaiveTime,
) -> Result<NaiveTime, NormalizeError> {
    if let Some(time) = parse_clock(input) {
        return Ok(time);
    }
    if input.is_empty() {
        debug!(%field, %fallback, "no time entered; using default");
        return Ok(fallback);
    }
    Err(NormalizeError::InvalidTime {
        field,
        input: input.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Coordinates
// ---------------------------------------------------------------------------

/// Parse a coordinate and render it with exactly six decimal places.
pub fn format_coordinate(field: CoordinateField, input: &str) -> Result<String, NormalizeError> {
    match input.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(format!("{value:.6}")),
        _ => Err(NormalizeError::InvalidCoordinate {
            field,
            input: input.to_string(),
        }),
    }
}

// ---------------------------------------------------------------------------
// Record assembly
// ---------------------------------------------------------------------------

/// Placeholder delivery-person ID for a city code.
pub fn delivery_person_id(city_code: &str) -> String {
    format!("{city_code}{DELIVERY_PERSON_SUFFIX}")
}

/// Build an [`OrderRecord`] from raw input.
///
/// `now` supplies the defaults: the order date when none is given, the order
/// time when the order-time input is empty, and `now + 15 minutes` when the
/// pickup-time input is empty. Sub-second precision is discarded.
pub fn normalize(form: &OrderForm, now: NaiveDateTime) -> Result<OrderRecord, NormalizeError> {
    let now = now.with_nanosecond(0).unwrap_or(now);

    let time_ordered = resolve_time(TimeField::OrderTime, &form.order_time, now.time())?;
    let time_order_picked = resolve_time(
        TimeField::PickupTime,
        &form.pickup_time,
        (now + TimeDelta::minutes(DEFAULT_PICKUP_OFFSET_MINUTES)).time(),
    )?;

    let restaurant_latitude =
        format_coordinate(CoordinateField::RestaurantLatitude, &form.restaurant_latitude)?;
    let restaurant_longitude =
        format_coordinate(CoordinateField::RestaurantLongitude, &form.restaurant_longitude)?;
    let delivery_location_latitude =
        format_coordinate(CoordinateField::DeliveryLatitude, &form.delivery_latitude)?;
    let delivery_location_longitude =
        format_coordinate(CoordinateField::DeliveryLongitude, &form.delivery_longitude)?;

    Ok(OrderRecord {
        id: PLACEHOLDER_ORDER_ID.to_string(),
        delivery_person_id: delivery_person_id(&form.city_code),
        delivery_person_age: form.delivery_person_age,
        delivery_person_ratings: form.delivery_person_rating,
        restaurant_latitude,
        restaurant_longitude,
        delivery_location_latitude,
        delivery_location_longitude,
        order_date: form.order_date.unwrap_or_else(|| now.date()),
        time_ordered,
        time_order_picked,
        weather_conditions: format!("{WEATHER_PREFIX}{}", form.weather_conditions),
        road_traffic_density: form.road_traffic_density.clone(),
        vehicle_condition: form.vehicle_condition,
        type_of_order: form.order_type.clone(),
        type_of_vehicle: form.vehicle.clone(),
        multiple_deliveries: form.multiple_deliveries,
        festival: form.festival.clone(),
        city: form.city.clone(),
    })
}

/// [`normalize`] against the local wall clock.
pub fn normalize_now(form: &OrderForm) -> Result<OrderRecord, NormalizeError> {
    normalize(form, chrono::Local::now().naive_local())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
