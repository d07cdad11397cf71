//! Output projection of a record.

use serde_json::Value;

use crate::dataset::Record;

/// The subset of a record exposed in the response.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ProjectedRecord<'a> {
    pub air_time: Option<&'a Value>,
    pub distance: Option<&'a Value>,
    /// Only populated when the date was requested.
    pub date: Option<&'a Value>,
}

impl<'a> ProjectedRecord<'a> {
    /// Output fields in rendering order.
    pub fn fields(&self) -> [(&'static str, Option<&'a Value>); 3] {
        [
            ("air_time", self.air_time),
            ("distance", self.distance),
            ("date", self.date),
        ]
    }
}

/// Map a record to its output shape.
pub fn project(record: &Record, include_date: bool) -> ProjectedRecord<'_> {
    ProjectedRecord {
        air_time: record.air_time.as_ref(),
        distance: record.distance.as_ref(),
        date: if include_date { record.fl_date.as_ref() } else { None },
    }
}
