//! Historical record type.
//!
//! A [`HistoricalRecord`] is one trading day from the historical table: its
//! `Date` string plus every original column, in the order the artifact stored
//! them. Columns are kept as raw JSON values so that whatever derived features
//! the generation script produced are echoed back to clients unchanged.

use crate::config::DATE_COLUMN;
use crate::error::CoreError;
use serde_json::{Map, Value};

/// One row of the historical table.
#[derive(Debug, Clone)]
pub struct HistoricalRecord {
    date: String,
    columns: Map<String, Value>,
}

impl HistoricalRecord {
    /// Builds a record from a JSON object, requiring a string `Date` column.
    pub fn from_columns(columns: Map<String, Value>) -> Result<Self, CoreError> {
        let date = match columns.get(DATE_COLUMN) {
            Some(Value::String(s)) => s.clone(),
            Some(other) => {
                return Err(CoreError::InvalidArtifact(format!(
                    "'{}' column must be a string, got {}",
                    DATE_COLUMN, other
                )))
            }
            None => {
                return Err(CoreError::InvalidArtifact(format!(
                    "record is missing the '{}' column",
                    DATE_COLUMN
                )))
            }
        };
        Ok(Self { date, columns })
    }

    /// The trading day in `YYYY-MM-DD` form.
    pub fn date(&self) -> &str {
        &self.date
    }

    /// All original columns, `Date` included, in stored order.
    pub fn columns(&self) -> &Map<String, Value> {
        &self.columns
    }
}
