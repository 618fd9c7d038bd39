//! Domain-specific assertion macros for eta harnesses.
//!
//! These add context-rich failure messages that make it clear *which* record
//! invariant was violated.

/// Assert that a record serializes to exactly the nineteen schema keys, in
/// schema order.
///
/// ```rust
/// assert_schema_order!(record);
/// ```
#[macro_export]
macro_rules! assert_schema_order {
    ($record:expr) => {{
        let record: &eta_core::OrderRecord = &$record;
        let text = serde_json::to_string(record).expect("record serializes");
        let value: serde_json::Value = serde_json::from_str(&text).expect("valid JSON");
        let object = value.as_object().expect("record is a JSON object");
        if object.len() != eta_core::OrderRecord::COLUMNS.len() {
            panic!(
                "assert_schema_order! failed: expected {} keys, found {}\n  keys: {:?}",
                eta_core::OrderRecord::COLUMNS.len(),
                object.len(),
                object.keys().collect::<Vec<_>>()
            );
        }
        let mut last = 0usize;
        for column in eta_core::OrderRecord::COLUMNS {
            let needle = format!("\"{}\":", column);
            match text.find(&needle) {
                Some(pos) if pos >= last => last = pos,
                Some(_) => panic!("assert_schema_order! failed: {:?} is out of order\n  {}", column, text),
                None => panic!("assert_schema_order! failed: {:?} missing\n  {}", column, text),
            }
        }
    }};
}

/// Assert that a coordinate string has exactly six decimal places.
#[macro_export]
macro_rules! assert_six_places {
    ($value:expr) => {{
        let value: &str = &$value;
        match value.split_once('.') {
            Some((_, frac)) if frac.len() == 6 && frac.bytes().all(|b| b.is_ascii_digit()) => {}
            _ => panic!("assert_six_places! failed: {:?} is not formatted to 6 places", value),
        }
    }};
}
