//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, CORS headers)
//! - Bind server to listener
//! - Stop accepting and drain on shutdown
//!
//! # Design Decisions
//! - No request timeout: a dataset read runs to completion or failure
//! - Only GET and OPTIONS are served; HEAD gets 405 like any other method

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, HeaderName, HeaderValue, Request},
    routing::{get, MethodRouter},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

use crate::config::{validate_config, ConfigError, ServiceConfig, ValidationError};
use crate::http::handler::{get_flights, method_not_allowed, preflight};
use crate::lifecycle::shutdown;

pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Dataset file, re-read on every request.
    pub dataset_path: Arc<PathBuf>,
}

/// HTTP server for the flights endpoint.
pub struct HttpServer {
    router: Router,
    config: ServiceConfig,
    dataset_path: Arc<PathBuf>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    ///
    /// Fails if the configuration does not validate.
    pub fn new(config: ServiceConfig) -> Result<Self, ConfigError> {
        validate_config(&config).map_err(ConfigError::Validation)?;
        let dataset_path = config
            .dataset
            .path
            .clone()
            .map(Arc::new)
            .ok_or_else(|| ConfigError::Validation(vec![ValidationError::MissingDatasetPath]))?;

        let state = AppState {
            dataset_path: dataset_path.clone(),
        };
        let router = Self::build_router(state);
        Ok(Self {
            router,
            config,
            dataset_path,
        })
    }

    /// Build the Axum router with all middleware layers.
    pub fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/", flights_route())
            .route("/{*path}", flights_route())
            .with_state(state)
            .layer(SetResponseHeaderLayer::overriding(
                header::ACCESS_CONTROL_ALLOW_ORIGIN,
                HeaderValue::from_static("*"),
            ))
            .layer(SetResponseHeaderLayer::overriding(
                header::ACCESS_CONTROL_ALLOW_METHODS,
                HeaderValue::from_static("GET, POST, OPTIONS"),
            ))
            .layer(SetResponseHeaderLayer::overriding(
                header::ACCESS_CONTROL_ALLOW_HEADERS,
                HeaderValue::from_static("Content-Type"),
            ))
            .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
            .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                let request_id = request
                    .headers()
                    .get(&X_REQUEST_ID)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("unknown");
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = %request_id,
                )
            }))
            .layer(SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuid))
    }

    /// The router, for driving the service without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown_rx` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown_rx: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            dataset = %self.dataset_path.display(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown::wait(shutdown_rx))
            .await?;

        tracing::info!("Server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }
}

/// `get` alone would also answer HEAD, so HEAD is routed to the 405 handler.
fn flights_route() -> MethodRouter<AppState> {
    get(get_flights)
        .head(method_not_allowed)
        .options(preflight)
        .fallback(method_not_allowed)
}
