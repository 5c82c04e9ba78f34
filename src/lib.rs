//! Federated Heart Disease dataset.
//!
//! Loads the four-center heart disease records, drops incomplete rows, assigns a
//! fixed train/test split, one-hot encodes the categorical columns and exposes
//! `(features, label)` pairs, either for all data or per center.

pub mod center;
pub mod config;
pub mod dataset;
pub mod encoding;
pub mod federated;
pub mod parse;
pub mod split;

use std::path::PathBuf;

use thiserror::Error;

pub use center::Center;
pub use config::{ConfigFileLocator, DatasetLocator, StaticLocator};
pub use dataset::{Dataset, HeartDiseaseRaw, Precision};
pub use federated::FedHeartDisease;
pub use split::Split;

/// Identifier used to look the dataset up in the location config.
pub const DATASET_NAME: &str = "fed_heart_disease";

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Parse error in {file}:{line}: {message}")]
    Parse {
        file: PathBuf,
        line: u64,
        message: String,
    },

    #[error("No .data files found in {0}")]
    NoDataFiles(PathBuf),

    #[error("Cannot derive a center from file name {0:?}")]
    UnknownCenter(String),

    #[error("Invalid center {0}, expected one of 0, 1, 2, 3")]
    InvalidCenter(usize),

    #[error("Unexpected value {value} in categorical column {column}")]
    UnknownCategory { column: usize, value: f64 },
}

pub type Result<T> = std::result::Result<T, Error>;
