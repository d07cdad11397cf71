//! Query filtering subsystem.
//!
//! # Data Flow
//! ```text
//! query string (decoded by the http layer)
//!     → params.rs (typed accessors: airtime_min, date)
//!     → filter.rs (build active filters, keep matching records)
//!     → Vec<&Record> in dataset order
//! ```
//!
//! # Design Decisions
//! - Filtering borrows the dataset; it never mutates or reorders it
//! - Bad parameter values disable their filter instead of failing
//! - Unknown parameters are ignored

pub mod filter;
pub mod params;

pub use filter::{apply, AirTimeMin, AllOf, FilterChain, RecordFilter};
pub use params::QueryParams;
