//! Flight observation record.

use serde_json::{Map, Value};

/// One flight observation, i.e. one line of the dataset.
///
/// Only the fields the query pipeline reads are kept; every other key in the
/// source object is ignored. A JSON `null` and a missing key both map to
/// `None`. Values are kept as raw JSON so they can be copied to the output
/// without coercion.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    /// Minutes in the air.
    pub air_time: Option<Value>,

    /// Flight distance.
    pub distance: Option<Value>,

    /// Flight date.
    pub fl_date: Option<Value>,
}

impl Record {
    /// Build a record from a parsed JSON object.
    pub fn from_object(mut object: Map<String, Value>) -> Self {
        let mut take = |key: &str| object.remove(key).filter(|v| !v.is_null());
        Self {
            air_time: take("AIR_TIME"),
            distance: take("DISTANCE"),
            fl_date: take("FL_DATE"),
        }
    }

    /// `AIR_TIME` as a number, if present and numeric.
    pub fn air_time_minutes(&self) -> Option<f64> {
        self.air_time.as_ref().and_then(Value::as_f64)
    }
}
