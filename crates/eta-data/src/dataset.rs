//! Training dataset ingestion and cleaning.
//!
//! The raw CSV pads most cells with trailing spaces, spells missing values as
//! `NaN`, prefixes weather with `conditions `, and stores the target as
//! `(min) 24`. [`TrainingSet`] reads the file, cleans every row, and keeps
//! only rows where every selectable field is present.

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::LazyLock;

use eta_core::normalizer::WEATHER_PREFIX;
use regex::Regex;
use serde::Deserialize;
use tracing::{info, warn};

use crate::error::DatasetError;

/// Columns the cleaning step reads. Other columns are ignored.
pub const REQUIRED_COLUMNS: [&str; 12] = [
    "Delivery_person_ID",
    "Delivery_person_Age",
    "Delivery_person_Ratings",
    "Weatherconditions",
    "Road_traffic_density",
    "Vehicle_condition",
    "Type_of_order",
    "Type_of_vehicle",
    "multiple_deliveries",
    "Festival",
    "City",
    "Time_taken(min)",
];

/// Delivery-person IDs read `<city code>RES<n>DEL<n>`.
const CITY_CODE_END: &str = "RES";

static MINUTES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("minutes pattern must compile"));

/// One CSV row as read, before cleaning.
#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(rename = "Delivery_person_ID")]
    delivery_person_id: String,
    #[serde(rename = "Delivery_person_Age")]
    age: String,
    #[serde(rename = "Delivery_person_Ratings")]
    rating: String,
    #[serde(rename = "Weatherconditions")]
    weather: String,
    #[serde(rename = "Road_traffic_density")]
    traffic: String,
    #[serde(rename = "Vehicle_condition")]
    vehicle_condition: String,
    #[serde(rename = "Type_of_order")]
    order_type: String,
    #[serde(rename = "Type_of_vehicle")]
    vehicle: String,
    #[serde(rename = "multiple_deliveries")]
    multiple_deliveries: String,
    #[serde(rename = "Festival")]
    festival: String,
    #[serde(rename = "City")]
    city: String,
    #[serde(rename = "Time_taken(min)")]
    time_taken: String,
}

/// A cleaned training row with every selectable field present.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingRow {
    pub delivery_person_id: String,
    /// Prefix of `delivery_person_id` before `RES`.
    pub city_code: String,
    pub age: u32,
    pub rating: f64,
    /// Weather without the `conditions ` prefix.
    pub weather: String,
    pub traffic: String,
    pub vehicle_condition: u32,
    pub order_type: String,
    pub vehicle: String,
    pub multiple_deliveries: u32,
    pub festival: String,
    pub city: String,
    /// Target duration, when the cell held a number.
    pub time_taken_min: Option<u32>,
}

/// Trimmed cell contents, or `None` for blank and `NaN` cells.
pub fn clean_cell(raw: &str) -> Option<&str> {
    let cell = raw.trim();
    (!cell.is_empty() && !cell.eq_ignore_ascii_case("nan")).then_some(cell)
}

/// Integer count from a cell that may be written as a float (`1.0`).
fn count_cell(raw: &str) -> Option<u32> {
    let value = clean_cell(raw)?.parse::<f64>().ok()?;
    (value.is_finite() && value >= 0.0).then(|| value.trunc() as u32)
}

/// Minutes from a `(min) 24` target cell.
pub fn parse_minutes(raw: &str) -> Option<u32> {
    MINUTES.find(raw)?.as_str().parse().ok()
}

/// City code embedded in a delivery-person ID (`INDORES13DEL02` → `INDO`).
pub fn city_code(delivery_person_id: &str) -> &str {
    delivery_person_id
        .split_once(CITY_CODE_END)
        .map_or(delivery_person_id, |(code, _)| code)
}

fn clean_row(raw: &RawRow) -> Option<TrainingRow> {
    let delivery_person_id = clean_cell(&raw.delivery_person_id)?;
    let weather = clean_cell(&raw.weather)?;
    Some(TrainingRow {
        delivery_person_id: delivery_person_id.to_string(),
        city_code: city_code(delivery_person_id).to_string(),
        age: count_cell(&raw.age)?,
        rating: clean_cell(&raw.rating)?.parse().ok()?,
        weather: clean_cell(weather.strip_prefix(WEATHER_PREFIX.trim_end()).unwrap_or(weather))?
            .to_string(),
        traffic: clean_cell(&raw.traffic)?.to_string(),
        vehicle_condition: count_cell(&raw.vehicle_condition)?,
        order_type: clean_cell(&raw.order_type)?.to_string(),
        vehicle: clean_cell(&raw.vehicle)?.to_string(),
        multiple_deliveries: count_cell(&raw.multiple_deliveries)?,
        festival: clean_cell(&raw.festival)?.to_string(),
        city: clean_cell(&raw.city)?.to_string(),
        time_taken_min: parse_minutes(&raw.time_taken),
    })
}

/// Cleaned training rows.
#[derive(Debug, Clone, Default)]
pub struct TrainingSet {
    rows: Vec<TrainingRow>,
    dropped: usize,
}

impl TrainingSet {
    /// Read and clean the CSV at `path`.
    pub fn load(path: &Path) -> Result<Self, DatasetError> {
        let file = File::open(path).map_err(|source| DatasetError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let set = Self::from_reader(file)?;
        info!(
            path = %path.display(),
            rows = set.rows.len(),
            dropped = set.dropped,
            "loaded training data"
        );
        Ok(set)
    }

    /// Read and clean CSV data from any reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DatasetError> {
        let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

        let headers = reader.headers()?.clone();
        if let Some(missing) = REQUIRED_COLUMNS
            .iter()
            .find(|c| !headers.iter().any(|h| h.trim() == **c))
        {
            return Err(DatasetError::MissingColumn(*missing));
        }
        // Match columns regardless of padding in the header row.
        reader.set_headers(headers.iter().map(str::trim).collect());

        let mut set = Self::default();
        for raw in reader.deserialize::<RawRow>() {
            match clean_row(&raw?) {
                Some(row) => set.rows.push(row),
                None => set.dropped += 1,
            }
        }
        if set.dropped > 0 {
            warn!(dropped = set.dropped, "dropped training rows with missing values");
        }
        Ok(set)
    }

    pub fn rows(&self) -> &[TrainingRow] {
        &self.rows
    }

    /// Rows discarded during cleaning.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
