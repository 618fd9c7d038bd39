//! eta-data: training dataset ingestion for eta.
//!
//! Reads the training CSV, applies the cleaning steps, and derives the
//! [`FormOptions`] that bound and pre-fill user input.

pub mod dataset;
pub mod error;
pub mod form;
pub mod options;

pub use dataset::{TrainingRow, TrainingSet};
pub use error::{DatasetError, FormError};
pub use form::FormInput;
pub use options::{FormOptions, NumericRange};

/// Load the CSV at `path` and derive its [`FormOptions`].
pub fn load_options(path: &std::path::Path) -> Result<FormOptions, DatasetError> {
    let set = TrainingSet::load(path)?;
    FormOptions::from_training_set(&set)
}
