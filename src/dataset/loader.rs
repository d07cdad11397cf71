//! Dataset loading from disk.

use std::path::{Path, PathBuf};

use serde::de::Error as _;
use serde_json::Value;
use thiserror::Error;

use crate::dataset::record::Record;

/// Errors that can occur while loading the dataset.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// The file could not be read.
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A line is not a valid JSON object.
    #[error("invalid JSON on line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

impl DatasetError {
    /// Short label used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            DatasetError::Io { .. } => "io",
            DatasetError::Parse { .. } => "parse",
        }
    }
}

/// Ordered, immutable sequence of records in file order.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    /// Read and parse the newline-delimited JSON file at `path`.
    ///
    /// The file is expected to exist; only readability is checked here.
    pub async fn load(path: &Path) -> Result<Self, DatasetError> {
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| DatasetError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        let dataset = Self::parse(&text)?;
        tracing::debug!(path = %path.display(), records = dataset.len(), "Dataset loaded");
        Ok(dataset)
    }

    /// Parse newline-delimited JSON text.
    ///
    /// Whitespace-only lines are skipped. Any other line must hold exactly one
    /// JSON object, otherwise the whole parse fails.
    pub fn parse(text: &str) -> Result<Self, DatasetError> {
        let records = text
            .split('\n')
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(idx, line)| {
                parse_line(line.trim())
                    .map_err(|source| DatasetError::Parse { line: idx + 1, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { records })
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Parse one line. Anything other than a JSON object is rejected.
fn parse_line(line: &str) -> Result<Record, serde_json::Error> {
    match serde_json::from_str::<Value>(line)? {
        Value::Object(object) => Ok(Record::from_object(object)),
        other => Err(serde_json::Error::custom(format!(
            "expected a JSON object, found {}",
            kind_of(&other)
        ))),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl From<Vec<Record>> for Dataset {
    fn from(records: Vec<Record>) -> Self {
        Self { records }
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
