//! Request-to-response pipeline: load, filter, shape.

use std::path::Path;

use thiserror::Error;

use crate::dataset::{Dataset, DatasetError};
use crate::query::{self, QueryParams};
use crate::response::{self, ShapeError, ShapedResponse};

/// Failure of a single query.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error(transparent)]
    Shape(#[from] ShapeError),
}

/// Answer one query against the dataset at `path`.
///
/// The file is re-read on every call; nothing is cached between calls.
pub async fn query_flights(path: &Path, params: &QueryParams) -> Result<ShapedResponse, PipelineError> {
    let dataset = Dataset::load(path).await?;
    let matched = query::apply(&dataset, params);
    let shaped = response::shape(&matched, params)?;

    tracing::debug!(
        loaded = dataset.len(),
        total = shaped.total,
        returned = shaped.returned,
        "Query answered"
    );
    Ok(shaped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn write_dataset(name: &str, text: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("flight_query_pipeline_{}_{}.jsonl", name, std::process::id()));
        std::fs::write(&path, text).unwrap();
        path
    }

    const TWO_FLIGHTS: &str = concat!(
        r#"{"AIR_TIME":100,"DISTANCE":200,"FL_DATE":"2020-01-01"}"#,
        "\n",
        r#"{"AIR_TIME":50,"DISTANCE":90,"FL_DATE":"2020-01-02"}"#,
        "\n",
    );

    #[tokio::test]
    async fn test_filter_then_shape() {
        let path = write_dataset("filter", TWO_FLIGHTS);
        let params = QueryParams::from_pairs([("airtime_min", "75")]);

        let shaped = query_flights(&path, &params).await.unwrap();
        assert_eq!((shaped.total, shaped.returned), (1, 1));
        assert!(shaped.body.contains("<air_time>100</air_time>"));
        assert!(shaped.body.contains("<distance>200</distance>"));
        assert!(!shaped.body.contains("<date>"));

        std::fs::remove_file(&path).unwrap_or_default();
    }

    #[tokio::test]
    async fn test_reload_sees_file_changes() {
        let path = write_dataset("reload", TWO_FLIGHTS);
        let params = QueryParams::new();
        assert_eq!(query_flights(&path, &params).await.unwrap().total, 2);

        std::fs::write(&path, r#"{"AIR_TIME":1,"DISTANCE":2}"#).unwrap();
        assert_eq!(query_flights(&path, &params).await.unwrap().total, 1);

        std::fs::remove_file(&path).unwrap_or_default();
    }

    #[tokio::test]
    async fn test_bad_line_fails_request() {
        let path = write_dataset("bad", "{\"AIR_TIME\":1}\n{oops\n");
        let err = query_flights(&path, &QueryParams::new()).await.unwrap_err();
        assert!(matches!(err, PipelineError::Dataset(DatasetError::Parse { line: 2, .. })));

        std::fs::remove_file(&path).unwrap_or_default();
    }
}
