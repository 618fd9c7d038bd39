//! Core types for eta-core.
//!
//! [`OrderForm`] is the raw, unvalidated input exactly as a user typed it.
//! [`OrderRecord`] is the fixed-schema row the prediction model consumes;
//! it is only ever produced by [`crate::normalizer::normalize`].

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use serde::{Deserialize, Serialize};

/// Raw order input. Time and coordinate fields are kept as the user typed
/// them; the normalizer decides whether they are usable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderForm {
    /// Defaults to today when absent.
    #[serde(default)]
    pub order_date: Option<NaiveDate>,
    /// `HH:MM`, or empty for "now".
    #[serde(default)]
    pub order_time: String,
    /// `HH:MM`, or empty for "now + 15 minutes".
    #[serde(default)]
    pub pickup_time: String,
    pub order_type: String,
    pub multiple_deliveries: u32,
    pub restaurant_latitude: String,
    pub restaurant_longitude: String,
    pub delivery_latitude: String,
    pub delivery_longitude: String,
    pub delivery_person_age: u32,
    pub delivery_person_rating: f64,
    pub vehicle: String,
    pub vehicle_condition: u32,
    pub city_code: String,
    pub city: String,
    pub road_traffic_density: String,
    pub weather_conditions: String,
    pub festival: String,
}

/// Backwards gap, in hours, between order and pickup clock times beyond
/// which the pickup is taken to be after midnight.
pub const PICKUP_ROLLOVER_GAP_HOURS: i64 = 12;

/// A single, complete feature row in the schema the model was trained on.
///
/// Field order is significant: it is the serialization order and must match
/// [`OrderRecord::COLUMNS`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Delivery_person_ID")]
    pub delivery_person_id: String,
    #[serde(rename = "Delivery_person_Age")]
    pub delivery_person_age: u32,
    #[serde(rename = "Delivery_person_Ratings")]
    pub delivery_person_ratings: f64,
    #[serde(rename = "Restaurant_latitude")]
    pub restaurant_latitude: String,
    #[serde(rename = "Restaurant_longitude")]
    pub restaurant_longitude: String,
    #[serde(rename = "Delivery_location_latitude")]
    pub delivery_location_latitude: String,
    #[serde(rename = "Delivery_location_longitude")]
    pub delivery_location_longitude: String,
    #[serde(rename = "Order_Date", with = "order_date_format")]
    pub order_date: NaiveDate,
    #[serde(rename = "Time_Orderd", with = "clock_format")]
    pub time_ordered: NaiveTime,
    #[serde(rename = "Time_Order_picked", with = "clock_format")]
    pub time_order_picked: NaiveTime,
    #[serde(rename = "Weatherconditions")]
    pub weather_conditions: String,
    #[serde(rename = "Road_traffic_density")]
    pub road_traffic_density: String,
    #[serde(rename = "Vehicle_condition")]
    pub vehicle_condition: u32,
    #[serde(rename = "Type_of_order")]
    pub type_of_order: String,
    #[serde(rename = "Type_of_vehicle")]
    pub type_of_vehicle: String,
    #[serde(rename = "multiple_deliveries")]
    pub multiple_deliveries: u32,
    #[serde(rename = "Festival")]
    pub festival: String,
    #[serde(rename = "City")]
    pub city: String,
}

impl OrderRecord {
    /// Column names in schema order.
    pub const COLUMNS: [&'static str; 19] = [
        "ID",
        "Delivery_person_ID",
        "Delivery_person_Age",
        "Delivery_person_Ratings",
        "Restaurant_latitude",
        "Restaurant_longitude",
        "Delivery_location_latitude",
        "Delivery_location_longitude",
        "Order_Date",
        "Time_Orderd",
        "Time_Order_picked",
        "Weatherconditions",
        "Road_traffic_density",
        "Vehicle_condition",
        "Type_of_order",
        "Type_of_vehicle",
        "multiple_deliveries",
        "Festival",
        "City",
    ];

    /// The record as strings, one per entry of [`Self::COLUMNS`].
    pub fn to_row(&self) -> [String; 19] {
        [
            self.id.clone(),
            self.delivery_person_id.clone(),
            self.delivery_person_age.to_string(),
            self.delivery_person_ratings.to_string(),
            self.restaurant_latitude.clone(),
            self.restaurant_longitude.clone(),
            self.delivery_location_latitude.clone(),
            self.delivery_location_longitude.clone(),
            self.order_date.format(order_date_format::FORMAT).to_string(),
            self.time_ordered.format(clock_format::FORMAT).to_string(),
            self.time_order_picked.format(clock_format::FORMAT).to_string(),
            self.weather_conditions.clone(),
            self.road_traffic_density.clone(),
            self.vehicle_condition.to_string(),
            self.type_of_order.clone(),
            self.type_of_vehicle.clone(),
            self.multiple_deliveries.to_string(),
            self.festival.clone(),
            self.city.clone(),
        ]
    }

    pub fn order_datetime(&self) -> NaiveDateTime {
        self.order_date.and_time(self.time_ordered)
    }

    /// Pickup timestamp on the order date, or on the following day when
    /// the pickup clock time is more than [`PICKUP_ROLLOVER_GAP_HOURS`]
    /// earlier than the order clock time (23:55 ordered, 00:10 picked up).
    ///
    /// A smaller backwards gap (12:00 ordered, 11:50 picked up) stays on the
    /// order date, so a mistyped pickup is not read as a day-long wait.
    pub fn pickup_datetime(&self) -> NaiveDateTime {
        let pickup = self.order_date.and_time(self.time_order_picked);
        let backwards = self.time_ordered - self.time_order_picked;
        if backwards > TimeDelta::hours(PICKUP_ROLLOVER_GAP_HOURS) {
            pickup + TimeDelta::days(1)
        } else {
            pickup
        }
    }
}

/// `Order_Date` wire format.
pub mod order_date_format {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%d-%m-%Y";

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&date.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDate::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
    }
}

/// `Time_Orderd` / `Time_Order_picked` wire format.
pub mod clock_format {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%H:%M:%S";

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&time.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record() -> OrderRecord {
        OrderRecord {
            id: "123456".to_string(),
            delivery_person_id: "INDORES13DEL02".to_string(),
            delivery_person_age: 30,
            delivery_person_ratings: 4.5,
            restaurant_latitude: "22.745049".to_string(),
            restaurant_longitude: "75.892471".to_string(),
            delivery_location_latitude: "22.765049".to_string(),
            delivery_location_longitude: "75.912471".to_string(),
            order_date: NaiveDate::from_ymd_opt(2022, 3, 19).unwrap(),
            time_ordered: NaiveTime::from_hms_opt(11, 30, 0).unwrap(),
            time_order_picked: NaiveTime::from_hms_opt(11, 45, 0).unwrap(),
            weather_conditions: "conditions Sunny".to_string(),
            road_traffic_density: "High".to_string(),
            vehicle_condition: 2,
            type_of_order: "Snack".to_string(),
            type_of_vehicle: "motorcycle".to_string(),
            multiple_deliveries: 0,
            festival: "No".to_string(),
            city: "Urban".to_string(),
        }
    }

    #[test]
    fn serialized_keys_follow_column_order() {
        let value = serde_json::to_value(record()).unwrap();
        assert_eq!(value.as_object().unwrap().len(), OrderRecord::COLUMNS.len());

        // Struct serialization keeps declaration order even though
        // serde_json::Map sorts its keys.
        let text = serde_json::to_string(&record()).unwrap();
        let positions: Vec<usize> = OrderRecord::COLUMNS
            .iter()
            .map(|c| text.find(&format!("\"{c}\":")).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn dates_and_times_use_dataset_formats() {
        let value = serde_json::to_value(record()).unwrap();
        assert_eq!(value["Order_Date"], "19-03-2022");
        assert_eq!(value["Time_Orderd"], "11:30:00");
        assert_eq!(value["Time_Order_picked"], "11:45:00");
    }

    #[test]
    fn record_deserializes_from_its_own_json() {
        let text = serde_json::to_string(&record()).unwrap();
        let back: OrderRecord = serde_json::from_str(&text).unwrap();
        assert_eq!(back, record());
    }

    #[test]
    fn row_matches_columns() {
        let row = record().to_row();
        assert_eq!(row.len(), OrderRecord::COLUMNS.len());
        assert_eq!(row[8], "19-03-2022");
        assert_eq!(row[9], "11:30:00");
        assert_eq!(row[3], "4.5");
    }

    #[test]
    fn pickup_before_order_rolls_to_next_day() {
        let mut r = record();
        r.time_ordered = NaiveTime::from_hms_opt(23, 55, 0).unwrap();
        r.time_order_picked = NaiveTime::from_hms_opt(0, 10, 0).unwrap();
        let diff = r.pickup_datetime() - r.order_datetime();
        assert_eq!(diff, TimeDelta::minutes(15));
    }

    #[test]
    fn pickup_slightly_before_order_stays_on_order_date() {
        let mut r = record();
        r.time_ordered = NaiveTime::from_hms_opt(12, 0, 0).unwrap();
        r.time_order_picked = NaiveTime::from_hms_opt(11, 50, 0).unwrap();
        assert_eq!(r.pickup_datetime().date(), r.order_date);
        assert_eq!(r.pickup_datetime() - r.order_datetime(), TimeDelta::minutes(-10));
    }
}
