//! Job Market Dataset Accessor: the static postings table and the queries over it.

use std::path::PathBuf;

use thiserror::Error;

pub mod certifications;
pub mod dataset;
pub mod fit;
pub mod handlers;
pub mod prompts;
pub mod queries;
pub mod trends;

pub use dataset::{JobMarketDataset, JobMarketRecord};

#[derive(Debug, Error)]
pub enum MarketError {
    #[error("Failed to read dataset file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed dataset CSV: {0}")]
    Csv(#[from] csv::Error),
}
