//! Price source collaborators.
//!
//! A `PriceSource` delivers the raw rows of the price feed once at startup.
//! Rows are returned untyped; `token::build_tokens` decides which ones are usable.
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::PathBuf;

use serde_json::Value;

use crate::error::SwapError;

/// Something that can produce price rows.
pub trait PriceSource: Send {
    /// Fetch the full list of rows. Called once; failures are not retried.
    fn fetch_rows(&self) -> Result<Vec<Value>, SwapError>;
}

/// Decode a JSON array of rows from a reader.
///
/// A top-level value other than an array is reported as `PriceFetch`.
pub fn parse_rows<R: Read>(reader: R) -> Result<Vec<Value>, SwapError> {
    match serde_json::from_reader::<_, Value>(reader)? {
        Value::Array(rows) => Ok(rows),
        other => Err(SwapError::PriceFetch(format!(
            "expected a JSON array of price rows, got {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Reads rows from a JSON file on disk.
#[derive(Debug, Clone)]
pub struct FilePriceSource {
    path: PathBuf,
}

impl FilePriceSource {
    /// Source backed by the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PriceSource for FilePriceSource {
    fn fetch_rows(&self) -> Result<Vec<Value>, SwapError> {
        let file = File::open(&self.path)?;
        parse_rows(BufReader::new(file))
    }
}

/// Serves a fixed set of rows.
#[derive(Debug, Clone, Default)]
pub struct StaticPriceSource {
    rows: Vec<Value>,
}

impl StaticPriceSource {
    /// Source that always returns `rows`.
    pub fn new(rows: Vec<Value>) -> Self {
        Self { rows }
    }
}

impl PriceSource for StaticPriceSource {
    fn fetch_rows(&self) -> Result<Vec<Value>, SwapError> {
        Ok(self.rows.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rows_array() {
        let body = br#"[{"currency":"ETH","price":1645.93},{"currency":"USDC","price":1}]"#;
        let rows = parse_rows(&body[..]).unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_parse_rows_rejects_object() {
        let err = parse_rows(&br#"{"ETH": 1}"#[..]).unwrap_err();
        assert!(matches!(err, SwapError::PriceFetch(_)));
    }

    #[test]
    fn test_parse_rows_reports_bad_json() {
        let err = parse_rows(&b"[{"[..]).unwrap_err();
        assert!(matches!(err, SwapError::SerdeJson(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let source = FilePriceSource::new("/definitely/not/here/prices.json");
        assert!(matches!(source.fetch_rows(), Err(SwapError::Io(_))));
    }
}
