//! Static training data and model fixtures used across harnesses.

use std::path::{Path, PathBuf};

/// A small training CSV in the raw dataset's shape: padded cells, `NaN`
/// for missing values, `conditions `-prefixed weather, `(min) N` targets.
/// Row 4 has missing values and is dropped by cleaning.
pub const TRAIN_CSV: &str = "\
ID,Delivery_person_ID,Delivery_person_Age,Delivery_person_Ratings,Restaurant_latitude,Restaurant_longitude,Delivery_location_latitude,Delivery_location_longitude,Order_Date,Time_Orderd,Time_Order_picked,Weatherconditions,Road_traffic_density,Vehicle_condition,Type_of_order,Type_of_vehicle,multiple_deliveries,Festival,City,Time_taken(min)
0x4607 ,INDORES13DEL02 ,37,4.9,22.745049,75.892471,22.765049,75.912471,19-03-2022,11:30:00,11:45:00,conditions Sunny,High ,2,Snack ,motorcycle ,0,No ,Urban ,(min) 24
0xb379 ,BANGRES18DEL02 ,34,4.5,12.913041,77.683237,13.043041,77.813237,25-03-2022,19:45:00,19:50:00,conditions Stormy,Jam ,2,Snack ,scooter ,1,No ,Metropolitian ,(min) 33
0x5d6d ,BANGRES19DEL01 ,23,4.4,12.914264,77.678400,12.924264,77.688400,19-03-2022,08:30:00,08:45:00,conditions Sandstorms,Low ,0,Drinks ,motorcycle ,1,No ,Urban ,(min) 26
0x7a6a ,COIMBRES13DEL02 ,NaN ,NaN ,11.003669,76.976494,11.053669,77.026494,05-04-2022,NaN ,18:10:00,conditions NaN,NaN ,0,Buffet ,motorcycle ,1,No ,Metropolitian ,(min) 21
0x70a2 ,CHENRES12DEL01 ,38,4.7,12.972793,80.249982,13.012793,80.289982,26-03-2022,13:25:00,13:35:00,conditions Cloudy,High ,1,Meal ,motorcycle ,3,Yes ,Metropolitian ,(min) 40
";

/// Coefficients that make predictions easy to reason about: a flat 20
/// minutes, plus 10 in a traffic jam.
pub const FLAT_MODEL_JSON: &str = r#"{
  "intercept": 20.0,
  "distance_km": 0.0,
  "prep_minutes": 0.0,
  "age": 0.0,
  "rating": 0.0,
  "vehicle_condition": 0.0,
  "multiple_deliveries": 0.0,
  "festival": 0.0,
  "traffic": { "Jam": 10.0 }
}"#;

/// Write `TRAIN_CSV` into `dir` and return its path.
pub fn write_train_csv(dir: &Path) -> PathBuf {
    let path = dir.join("train.csv");
    std::fs::write(&path, TRAIN_CSV).expect("write training fixture");
    path
}

/// Write `FLAT_MODEL_JSON` into `dir` and return its path.
pub fn write_flat_model(dir: &Path) -> PathBuf {
    let path = dir.join("model.json");
    std::fs::write(&path, FLAT_MODEL_JSON).expect("write model fixture");
    path
}

/// Write a config file pointing at the given dataset and model.
pub fn write_config(dir: &Path, train: &Path, model: &Path) -> PathBuf {
    let path = dir.join("config.toml");
    let body = format!(
        "[data]\ntrain_csv = {:?}\n\n[model]\npath = {:?}\n",
        train.display().to_string(),
        model.display().to_string(),
    );
    std::fs::write(&path, body).expect("write config fixture");
    path
}
