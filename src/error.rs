use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RecommenderError>;

/// Failures while loading the dataset or building the index. All of them are
/// fatal at startup.
#[derive(Error, Debug)]
pub enum RecommenderError {
    #[error("Recipe dataset not found at: {0:?}")]
    DatasetNotFound(PathBuf),

    #[error("Column '{0}' not found")]
    MissingColumn(&'static str),

    #[error("Invalid value '{value}' in column '{column}' at row {row}")]
    InvalidNumber {
        column: &'static str,
        row: usize,
        value: String,
    },

    #[error("No recipes loaded from {0:?}")]
    EmptyDataset(PathBuf),

    #[error("Cannot build an index over an empty feature set")]
    EmptyIndex,

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A submitted form that cannot be turned into a query.
#[derive(Error, Debug, PartialEq)]
pub enum FormError {
    #[error("Missing required field '{0}'")]
    MissingField(&'static str),

    #[error("Field '{field}' must be a number, got '{value}'")]
    InvalidNumber { field: &'static str, value: String },
}
