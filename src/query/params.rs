//! Query parameters recognized by the flights endpoint.

use std::collections::HashMap;

/// Minimum air time threshold, exclusive.
pub const AIRTIME_MIN: &str = "airtime_min";

/// Set to `true` to include the flight date in the output.
pub const DATE: &str = "date";

/// Decoded query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    values: HashMap<String, String>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from decoded `(name, value)` pairs. A repeated name keeps its last value.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// The `airtime_min` threshold, or `None` when absent or not an integer.
    pub fn airtime_min(&self) -> Option<i64> {
        self.get(AIRTIME_MIN).and_then(parse_leading_int)
    }

    /// True only for the exact value `"true"`.
    pub fn include_date(&self) -> bool {
        self.get(DATE) == Some("true")
    }
}

impl From<HashMap<String, String>> for QueryParams {
    fn from(values: HashMap<String, String>) -> Self {
        Self { values }
    }
}

/// Parse the integer at the start of `raw`.
///
/// Accepts surrounding whitespace and an optional sign, then reads decimal
/// digits up to the first non-digit. Returns `None` when there are no digits
/// or the value overflows `i64`.
fn parse_leading_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (sign, rest) = match s.as_bytes().first() {
        Some(b'-') => ("-", &s[1..]),
        Some(b'+') => ("", &s[1..]),
        _ => ("", s),
    };

    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }

    format!("{}{}", sign, &rest[..digits]).parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_airtime_min_parsing() {
        let cases = [
            ("75", Some(75)),
            ("  75", Some(75)),
            ("-5", Some(-5)),
            ("+12", Some(12)),
            ("75abc", Some(75)),
            ("1.9", Some(1)),
            ("abc", None),
            ("", None),
            ("-", None),
            ("99999999999999999999", None),
        ];
        for (raw, expected) in cases {
            let params = QueryParams::from_pairs([(AIRTIME_MIN, raw)]);
            assert_eq!(params.airtime_min(), expected, "input {:?}", raw);
        }
    }

    #[test]
    fn test_airtime_min_absent() {
        assert_eq!(QueryParams::new().airtime_min(), None);
    }

    #[test]
    fn test_include_date_exact_match() {
        assert!(QueryParams::from_pairs([(DATE, "true")]).include_date());
        for raw in ["True", "TRUE", "1", "yes", ""] {
            assert!(!QueryParams::from_pairs([(DATE, raw)]).include_date(), "input {:?}", raw);
        }
        assert!(!QueryParams::new().include_date());
    }

    #[test]
    fn test_last_value_wins() {
        let params = QueryParams::from_pairs([(DATE, "false"), (DATE, "true")]);
        assert!(params.include_date());
    }
}
