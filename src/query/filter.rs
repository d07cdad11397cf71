//! Record filtering.
//!
//! # Responsibilities
//! - Express each supported query filter as a `RecordFilter`
//! - Combine active filters with AND semantics
//! - Select matching records without copying or reordering them
//!
//! # Design Decisions
//! - Empty filter set = every record matches (identity)
//! - Records lacking the filtered field never match that filter

use crate::dataset::{Dataset, Record};
use crate::query::params::QueryParams;

/// Trait for matching records against a condition.
pub trait RecordFilter: Send + Sync + std::fmt::Debug {
    /// Returns true if the record should be kept.
    fn matches(&self, record: &Record) -> bool;
}

/// Keeps records whose `AIR_TIME` is strictly greater than a threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AirTimeMin {
    threshold: i64,
}

impl AirTimeMin {
    pub fn new(threshold: i64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> i64 {
        self.threshold
    }
}

impl RecordFilter for AirTimeMin {
    fn matches(&self, record: &Record) -> bool {
        record
            .air_time_minutes()
            .map(|minutes| minutes > self.threshold as f64)
            .unwrap_or(false)
    }
}

/// Combines multiple filters with AND semantics.
#[derive(Debug, Default)]
pub struct AllOf {
    filters: Vec<Box<dyn RecordFilter>>,
}

impl AllOf {
    pub fn new(filters: Vec<Box<dyn RecordFilter>>) -> Self {
        Self { filters }
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

impl RecordFilter for AllOf {
    fn matches(&self, record: &Record) -> bool {
        self.filters.iter().all(|f| f.matches(record))
    }
}

/// The filters activated by a request's query parameters.
#[derive(Debug, Default)]
pub struct FilterChain {
    all: AllOf,
}

impl FilterChain {
    /// Build the chain from query parameters. Invalid values are dropped silently.
    pub fn from_params(params: &QueryParams) -> Self {
        let mut filters: Vec<Box<dyn RecordFilter>> = Vec::new();

        if let Some(threshold) = params.airtime_min() {
            filters.push(Box::new(AirTimeMin::new(threshold)));
        }

        Self { all: AllOf::new(filters) }
    }

    /// True when no filter is active.
    pub fn is_identity(&self) -> bool {
        self.all.is_empty()
    }

    /// Matching records in dataset order.
    pub fn select<'a>(&self, dataset: &'a Dataset) -> Vec<&'a Record> {
        if self.is_identity() {
            return dataset.iter().collect();
        }
        dataset.iter().filter(|r| self.all.matches(r)).collect()
    }
}

/// Filter `dataset` according to `params`.
pub fn apply<'a>(dataset: &'a Dataset, params: &QueryParams) -> Vec<&'a Record> {
    FilterChain::from_params(params).select(dataset)
}
