//! Test builders: ergonomic constructors for `OrderForm` and fixed clocks.
//!
//! These builders are designed for readability in test assertions, not for
//! production use. They panic on invalid input rather than returning `Result`.

use chrono::{NaiveDate, NaiveDateTime};
use eta_core::OrderForm;

// ---------------------------------------------------------------------------
// OrderFormBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`OrderForm`] test fixtures. Starts from a complete,
/// valid form using the sample coordinates.
///
/// # Example
///
/// ```rust
/// let form = OrderFormBuilder::new()
///     .order_time("14:30")
///     .city_code("INDO")
///     .build();
/// ```
pub struct OrderFormBuilder {
    form: OrderForm,
}

impl OrderFormBuilder {
    pub fn new() -> Self {
        Self {
            form: OrderForm {
                order_date: Some(date(2024, 1, 1)),
                order_time: "11:45".to_string(),
                pickup_time: "12:00".to_string(),
                order_type: "Meal".to_string(),
                multiple_deliveries: 1,
                restaurant_latitude: "14.829222".to_string(),
                restaurant_longitude: "67.920922".to_string(),
                delivery_latitude: "14.929222".to_string(),
                delivery_longitude: "68.860922".to_string(),
                delivery_person_age: 29,
                delivery_person_rating: 4.6,
                vehicle: "motorcycle".to_string(),
                vehicle_condition: 2,
                city_code: "A".to_string(),
                city: "Metropolitian".to_string(),
                road_traffic_density: "Jam".to_string(),
                weather_conditions: "Fog".to_string(),
                festival: "No".to_string(),
            },
        }
    }

    pub fn order_date(mut self, date: Option<NaiveDate>) -> Self {
        self.form.order_date = date;
        self
    }

    pub fn order_time(mut self, time: impl Into<String>) -> Self {
        self.form.order_time = time.into();
        self
    }

    pub fn pickup_time(mut self, time: impl Into<String>) -> Self {
        self.form.pickup_time = time.into();
        self
    }

    pub fn restaurant(mut self, lat: impl Into<String>, lon: impl Into<String>) -> Self {
        self.form.restaurant_latitude = lat.into();
        self.form.restaurant_longitude = lon.into();
        self
    }

    pub fn delivery(mut self, lat: impl Into<String>, lon: impl Into<String>) -> Self {
        self.form.delivery_latitude = lat.into();
        self.form.delivery_longitude = lon.into();
        self
    }

    pub fn city_code(mut self, code: impl Into<String>) -> Self {
        self.form.city_code = code.into();
        self
    }

    pub fn weather(mut self, weather: impl Into<String>) -> Self {
        self.form.weather_conditions = weather.into();
        self
    }

    pub fn delivery_person_rating(mut self, rating: f64) -> Self {
        self.form.delivery_person_rating = rating;
        self
    }

    pub fn build(self) -> OrderForm {
        self.form
    }
}

impl Default for OrderFormBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Clock helpers
// ---------------------------------------------------------------------------

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
}

pub fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
    date(y, m, d).and_hms_opt(h, min, s).expect("valid test time")
}

/// The fixed "now" used across harnesses: 2024-01-01 09:15:42.
pub fn fixed_now() -> NaiveDateTime {
    at(2024, 1, 1, 9, 15, 42)
}
