//! Flights endpoint handlers.
//!
//! # Responsibilities
//! - Decode the query string (leniently; malformed pairs never fail a request)
//! - Run the query pipeline and attach the record counters as headers
//! - Answer CORS preflight and reject unsupported methods

use std::time::Instant;

use axum::{
    extract::{RawQuery, State},
    http::{header, HeaderMap, HeaderName, HeaderValue, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
};

use crate::http::server::AppState;
use crate::observability::metrics;
use crate::pipeline::{query_flights, PipelineError};
use crate::query::QueryParams;

/// Records matched before the cap.
pub const X_TOTAL_RECORDS: HeaderName = HeaderName::from_static("x-total-records");

/// Records present in the body.
pub const X_RETURNED_RECORDS: HeaderName = HeaderName::from_static("x-returned-records");

pub const APPLICATION_XML: &str = "application/xml; charset=utf-8";
pub const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

/// Decode a raw query string into parameters.
pub fn decode_query(raw: Option<&str>) -> QueryParams {
    match raw {
        Some(raw) => QueryParams::from_pairs(url::form_urlencoded::parse(raw.as_bytes()).into_owned()),
        None => QueryParams::new(),
    }
}

/// `GET` on any path: filtered flights as XML.
pub async fn get_flights(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    RawQuery(raw): RawQuery,
) -> Response {
    let start_time = Instant::now();
    let params = decode_query(raw.as_deref());

    match query_flights(&state.dataset_path, &params).await {
        Ok(shaped) => {
            tracing::info!(
                uri = %uri,
                total = shaped.total,
                returned = shaped.returned,
                "Flights served"
            );
            metrics::record_returned(shaped.returned);
            metrics::record_request(method.as_str(), StatusCode::OK.as_u16(), start_time);

            let mut headers = HeaderMap::new();
            headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(APPLICATION_XML));
            headers.insert(X_TOTAL_RECORDS, HeaderValue::from(shaped.total));
            headers.insert(X_RETURNED_RECORDS, HeaderValue::from(shaped.returned));

            (StatusCode::OK, headers, shaped.body).into_response()
        }
        Err(e) => {
            tracing::error!(uri = %uri, error = %e, "Failed to answer query");
            if let PipelineError::Dataset(ref dataset_err) = e {
                metrics::record_dataset_error(dataset_err.kind());
            }
            metrics::record_request(
                method.as_str(),
                StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
                start_time,
            );
            e.into_response()
        }
    }
}

/// `OPTIONS` on any path: empty preflight answer. CORS headers are added by the server layers.
pub async fn preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}

/// Any other method.
pub async fn method_not_allowed(method: Method) -> Response {
    tracing::warn!(method = %method, "Method not supported");
    (
        StatusCode::METHOD_NOT_ALLOWED,
        [(header::CONTENT_TYPE, HeaderValue::from_static(TEXT_PLAIN))],
        "Method not supported",
    )
        .into_response()
}
