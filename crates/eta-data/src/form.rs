//! Partial order input, completed from [`FormOptions`] defaults.
//!
//! Every input has a default, as a pre-filled form would: selections take
//! the first observed value, age and rating take the observed mean, and the
//! coordinates take a fixed sample location.
//!
//! Given values are bounded the same way: age and rating must fall within
//! the observed range, and every selection must be an observed value.

use std::fmt::Display;

use chrono::NaiveDate;
use eta_core::OrderForm;
use serde::Deserialize;

use crate::error::FormError;
use crate::options::{FormOptions, NumericRange};

pub const DEFAULT_RESTAURANT_LATITUDE: &str = "14.829222";
pub const DEFAULT_RESTAURANT_LONGITUDE: &str = "67.920922";
pub const DEFAULT_DELIVERY_LATITUDE: &str = "14.929222";
pub const DEFAULT_DELIVERY_LONGITUDE: &str = "68.860922";

/// Order input where any field may be left out.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct FormInput {
    pub order_date: Option<NaiveDate>,
    pub order_time: Option<String>,
    pub pickup_time: Option<String>,
    pub order_type: Option<String>,
    pub multiple_deliveries: Option<u32>,
    pub restaurant_latitude: Option<String>,
    pub restaurant_longitude: Option<String>,
    pub delivery_latitude: Option<String>,
    pub delivery_longitude: Option<String>,
    pub delivery_person_age: Option<u32>,
    pub delivery_person_rating: Option<f64>,
    pub vehicle: Option<String>,
    pub vehicle_condition: Option<u32>,
    pub city_code: Option<String>,
    pub city: Option<String>,
    pub road_traffic_density: Option<String>,
    pub weather_conditions: Option<String>,
    pub festival: Option<String>,
}

fn first_or_empty(values: &[String]) -> String {
    values.first().cloned().unwrap_or_default()
}

fn within(field: &'static str, range: &NumericRange, value: f64) -> Result<(), FormError> {
    if range.contains(value) {
        Ok(())
    } else {
        Err(FormError::OutOfRange {
            field,
            value,
            min: range.min,
            max: range.max,
        })
    }
}

fn one_of<T: PartialEq + Display>(field: &'static str, allowed: &[T], value: &T) -> Result<(), FormError> {
    if allowed.contains(value) {
        return Ok(());
    }
    Err(FormError::UnknownOption {
        field,
        value: value.to_string(),
        allowed: allowed
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", "),
    })
}

impl FormOptions {
    /// Fill every missing input with its default, then [`validate`] the
    /// result. Time inputs stay empty so the normalizer applies its
    /// clock-based defaults.
    ///
    /// [`validate`]: FormOptions::validate
    pub fn complete(&self, input: FormInput) -> Result<OrderForm, FormError> {
        let form = OrderForm {
            order_date: input.order_date,
            order_time: input.order_time.unwrap_or_default(),
            pickup_time: input.pickup_time.unwrap_or_default(),
            order_type: input
                .order_type
                .unwrap_or_else(|| first_or_empty(&self.order_types)),
            multiple_deliveries: input
                .multiple_deliveries
                .or_else(|| self.multiple_deliveries.first().copied())
                .unwrap_or_default(),
            restaurant_latitude: input
                .restaurant_latitude
                .unwrap_or_else(|| DEFAULT_RESTAURANT_LATITUDE.to_string()),
            restaurant_longitude: input
                .restaurant_longitude
                .unwrap_or_else(|| DEFAULT_RESTAURANT_LONGITUDE.to_string()),
            delivery_latitude: input
                .delivery_latitude
                .unwrap_or_else(|| DEFAULT_DELIVERY_LATITUDE.to_string()),
            delivery_longitude: input
                .delivery_longitude
                .unwrap_or_else(|| DEFAULT_DELIVERY_LONGITUDE.to_string()),
            delivery_person_age: input
                .delivery_person_age
                .unwrap_or_else(|| self.default_age()),
            delivery_person_rating: input
                .delivery_person_rating
                .unwrap_or_else(|| self.default_rating()),
            vehicle: input
                .vehicle
                .unwrap_or_else(|| first_or_empty(&self.vehicles)),
            vehicle_condition: input
                .vehicle_condition
                .or_else(|| self.vehicle_conditions.first().copied())
                .unwrap_or_default(),
            city_code: input
                .city_code
                .unwrap_or_else(|| first_or_empty(&self.city_codes)),
            city: input.city.unwrap_or_else(|| first_or_empty(&self.cities)),
            road_traffic_density: input
                .road_traffic_density
                .unwrap_or_else(|| first_or_empty(&self.traffic_densities)),
            weather_conditions: input
                .weather_conditions
                .unwrap_or_else(|| first_or_empty(&self.weather_conditions)),
            festival: input
                .festival
                .unwrap_or_else(|| first_or_empty(&self.festivals)),
        };
        self.validate(&form)?;
        Ok(form)
    }

    /// Check the non-time, non-coordinate inputs against the observed data.
    pub fn validate(&self, form: &OrderForm) -> Result<(), FormError> {
        within("delivery_person_age", &self.age, f64::from(form.delivery_person_age))?;
        within("delivery_person_rating", &self.rating, form.delivery_person_rating)?;
        one_of("order_type", &self.order_types, &form.order_type)?;
        one_of("multiple_deliveries", &self.multiple_deliveries, &form.multiple_deliveries)?;
        one_of("vehicle", &self.vehicles, &form.vehicle)?;
        one_of("vehicle_condition", &self.vehicle_conditions, &form.vehicle_condition)?;
        one_of("city_code", &self.city_codes, &form.city_code)?;
        one_of("city", &self.cities, &form.city)?;
        one_of("road_traffic_density", &self.traffic_densities, &form.road_traffic_density)?;
        one_of("weather_conditions", &self.weather_conditions, &form.weather_conditions)?;
        one_of("festival", &self.festivals, &form.festival)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
