//! Response shaping subsystem.
//!
//! # Data Flow
//! ```text
//! filtered records (dataset order)
//!     → projection.rs (air_time, distance, optional date)
//!     → cap at MAX_RECORDS (prefix)
//!     → render.rs (indented XML document)
//!     → ShapedResponse { body, total, returned }
//! ```
//!
//! # Design Decisions
//! - Projection borrows record values; nothing is coerced or copied
//! - Absent values are omitted from the document, never rendered empty
//! - `total` counts matches before the cap, `returned` after it

pub mod projection;
pub mod render;

use thiserror::Error;

use crate::dataset::Record;
use crate::query::QueryParams;

pub use projection::{project, ProjectedRecord};

/// Maximum number of records in a single response.
pub const MAX_RECORDS: usize = 1000;

/// Errors raised while building the response document.
#[derive(Debug, Error)]
pub enum ShapeError {
    /// A key cannot be used as an XML element name.
    #[error("invalid XML element name {0:?}")]
    InvalidName(String),

    /// The XML writer failed.
    #[error("XML write failed: {0}")]
    Write(String),
}

/// Rendered document plus its counters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapedResponse {
    pub body: String,
    /// Records matched before the cap.
    pub total: usize,
    /// Records present in `body`.
    pub returned: usize,
}

/// Project, cap and render the filtered records.
pub fn shape(records: &[&Record], params: &QueryParams) -> Result<ShapedResponse, ShapeError> {
    let include_date = params.include_date();
    let total = records.len();

    let projected: Vec<ProjectedRecord<'_>> = records
        .iter()
        .take(MAX_RECORDS)
        .map(|record| project(record, include_date))
        .collect();
    let returned = projected.len();

    let body = render::to_xml(&projected)?;

    Ok(ShapedResponse { body, total, returned })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn numbered(n: usize) -> Vec<Record> {
        (0..n)
            .map(|i| Record {
                air_time: Some(json!(i)),
                distance: Some(json!(i * 10)),
                fl_date: Some(json!("2020-01-01")),
            })
            .collect()
    }

    #[test]
    fn test_cap_keeps_prefix() {
        let records = numbered(1500);
        let refs: Vec<&Record> = records.iter().collect();
        let shaped = shape(&refs, &QueryParams::new()).unwrap();

        assert_eq!(shaped.total, 1500);
        assert_eq!(shaped.returned, MAX_RECORDS);

        let rows = render::tests::parse_rows(&shaped.body);
        assert_eq!(rows.len(), MAX_RECORDS);
        assert_eq!(rows[0][0], ("air_time".to_string(), "0".to_string()));
        assert_eq!(rows[999][0], ("air_time".to_string(), "999".to_string()));
    }

    #[test]
    fn test_under_cap_returns_everything() {
        let records = numbered(3);
        let refs: Vec<&Record> = records.iter().collect();
        let shaped = shape(&refs, &QueryParams::new()).unwrap();
        assert_eq!((shaped.total, shaped.returned), (3, 3));
    }

    #[test]
    fn test_date_only_when_requested() {
        let records = numbered(2);
        let refs: Vec<&Record> = records.iter().collect();

        let with = shape(&refs, &QueryParams::from_pairs([("date", "true")])).unwrap();
        assert_eq!(with.body.matches("<date>2020-01-01</date>").count(), 2);

        let without = shape(&refs, &QueryParams::from_pairs([("date", "True")])).unwrap();
        assert!(!without.body.contains("<date"));
    }

    #[test]
    fn test_empty_input() {
        let shaped = shape(&[], &QueryParams::new()).unwrap();
        assert_eq!((shaped.total, shaped.returned), (0, 0));
        assert!(render::tests::parse_rows(&shaped.body).is_empty());
    }
}
