use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("failed to open training data {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed training data: {0}")]
    Csv(#[from] csv::Error),

    #[error("training data is missing column {0:?}")]
    MissingColumn(&'static str),

    #[error("training data has no usable rows")]
    Empty,
}

/// Input outside the values observed in the training data.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormError {
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("{field} must be one of [{allowed}], got {value:?}")]
    UnknownOption {
        field: &'static str,
        value: String,
        allowed: String,
    },
}
