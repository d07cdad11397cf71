//! Flight query service library.
//!
//! Serves a newline-delimited JSON dataset of flights as XML, filtered by
//! query parameters.

pub mod config;
pub mod dataset;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod pipeline;
pub mod query;
pub mod response;

pub use config::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use pipeline::{query_flights, PipelineError};
