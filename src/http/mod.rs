//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware: request id, trace, CORS, timeout)
//!     → handler.rs (method dispatch, query decoding)
//!     → pipeline (load → filter → shape)
//!     → error.rs (map failures to 500 responses)
//!     → XML body + X-Total-Records / X-Returned-Records
//! ```

pub mod error;
pub mod handler;
pub mod server;

pub use handler::{X_RETURNED_RECORDS, X_TOTAL_RECORDS};
pub use server::{AppState, HttpServer};
