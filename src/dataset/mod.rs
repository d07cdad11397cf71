//! Dataset loading subsystem.
//!
//! # Data Flow
//! ```text
//! newline-delimited JSON file
//!     → loader.rs (read whole file, split lines, parse each line)
//!     → record.rs (typed view over AIR_TIME / DISTANCE / FL_DATE)
//!     → Dataset (ordered, immutable, rebuilt per request)
//! ```
//!
//! # Design Decisions
//! - No caching: every request re-reads the file from disk
//! - All-or-nothing parsing: one malformed line fails the whole load
//! - Blank lines are ignored wherever they appear

pub mod loader;
pub mod record;

pub use loader::{Dataset, DatasetError};
pub use record::Record;
