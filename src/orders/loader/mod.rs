mod normalizer;
mod parser;

pub(crate) use normalizer::normalize_text;
pub use parser::REQUIRED_COLUMNS;

use super::domain::OrderRecord;
use std::io::Read;
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Load-time failures. A failed load never yields a partial dataset.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read order export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid order CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("order export is missing required column '{0}'")]
    MissingColumn(&'static str),
    #[error("line {line}: invalid {column} value '{value}': {reason}")]
    InvalidField {
        line: u64,
        column: &'static str,
        value: String,
        reason: &'static str,
    },
}

impl DatasetError {
    pub(crate) fn invalid(
        line: u64,
        column: &'static str,
        value: &str,
        reason: &'static str,
    ) -> Self {
        Self::InvalidField {
            line,
            column,
            value: value.to_string(),
            reason,
        }
    }
}

pub struct OrderLoader;

impl OrderLoader {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<OrderRecord>, DatasetError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<OrderRecord>, DatasetError> {
        let (records, summary) = parser::parse_records(reader)?;

        info!(
            rows = summary.rows,
            returned = summary.returned,
            dropped_reasons = summary.dropped_reasons,
            "order export parsed"
        );

        Ok(records)
    }
}
