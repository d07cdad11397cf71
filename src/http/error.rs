//! Mapping of pipeline failures to HTTP responses.
//!
//! Every failure is a server-side fault: a corrupt dataset is never the
//! client's mistake, so nothing here produces a 4xx.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};

use crate::dataset::DatasetError;
use crate::pipeline::PipelineError;

impl PipelineError {
    /// Client-facing description of the failure.
    pub fn public_message(&self) -> String {
        match self {
            PipelineError::Dataset(e @ DatasetError::Io { .. }) => {
                format!("Failed to read dataset: {}", e)
            }
            PipelineError::Dataset(e) => format!("Failed to process data: {}", e),
            PipelineError::Shape(e) => format!("Failed to process data: {}", e),
        }
    }
}

impl IntoResponse for PipelineError {
    fn into_response(self) -> Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            [(header::CONTENT_TYPE, HeaderValue::from_static(super::handler::TEXT_PLAIN))],
            self.public_message(),
        )
            .into_response()
    }
}
