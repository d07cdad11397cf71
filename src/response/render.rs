//! XML rendering of projected records.
//!
//! Layout:
//! ```text
//! <flights>
//!   <flight>
//!     <air_time>..</air_time>
//!     <distance>..</distance>
//!     <date>..</date>
//!   </flight>
//! </flights>
//! ```
//!
//! Scalars become text content. Objects nest as child elements, arrays repeat
//! the element once per item. Null, empty strings and containers holding
//! nothing renderable are left out.

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use serde_json::{Number, Value};

use crate::response::projection::ProjectedRecord;
use crate::response::ShapeError;

pub const ROOT_ELEMENT: &str = "flights";
pub const RECORD_ELEMENT: &str = "flight";

const INDENT_SIZE: usize = 2;

/// Render records as an indented XML document.
pub fn to_xml(records: &[ProjectedRecord<'_>]) -> Result<String, ShapeError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', INDENT_SIZE);

    if records.is_empty() {
        write(&mut writer, Event::Empty(BytesStart::new(ROOT_ELEMENT)))?;
    } else {
        write(&mut writer, Event::Start(BytesStart::new(ROOT_ELEMENT)))?;
        for record in records {
            write_record(&mut writer, record)?;
        }
        write(&mut writer, Event::End(BytesEnd::new(ROOT_ELEMENT)))?;
    }

    let mut xml = String::from_utf8(writer.into_inner())
        .map_err(|e| ShapeError::Write(e.to_string()))?;
    xml.push('\n');
    Ok(xml)
}

fn write_record(writer: &mut Writer<Vec<u8>>, record: &ProjectedRecord<'_>) -> Result<(), ShapeError> {
    let present: Vec<(&str, &Value)> = record
        .fields()
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| (name, v)))
        .filter(|(_, value)| !is_blank(value))
        .collect();

    if present.is_empty() {
        return write(writer, Event::Empty(BytesStart::new(RECORD_ELEMENT)));
    }

    write(writer, Event::Start(BytesStart::new(RECORD_ELEMENT)))?;
    for (name, value) in present {
        write_value(writer, name, value)?;
    }
    write(writer, Event::End(BytesEnd::new(RECORD_ELEMENT)))
}

fn write_value(writer: &mut Writer<Vec<u8>>, name: &str, value: &Value) -> Result<(), ShapeError> {
    if is_blank(value) {
        return Ok(());
    }
    if !is_valid_name(name) {
        return Err(ShapeError::InvalidName(name.to_string()));
    }

    match value {
        Value::Array(items) => {
            for item in items {
                write_value(writer, name, item)?;
            }
            Ok(())
        }
        Value::Object(map) => {
            write(writer, Event::Start(BytesStart::new(name)))?;
            for (key, child) in map {
                write_value(writer, key, child)?;
            }
            write(writer, Event::End(BytesEnd::new(name)))
        }
        Value::String(s) => write_text(writer, name, s),
        Value::Number(n) => write_text(writer, name, &format_number(n)),
        Value::Bool(b) => write_text(writer, name, if *b { "true" } else { "false" }),
        Value::Null => Ok(()),
    }
}

fn write_text(writer: &mut Writer<Vec<u8>>, name: &str, text: &str) -> Result<(), ShapeError> {
    write(writer, Event::Start(BytesStart::new(name)))?;
    write(writer, Event::Text(BytesText::new(text)))?;
    write(writer, Event::End(BytesEnd::new(name)))
}

fn write(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<(), ShapeError> {
    writer
        .write_event(event)
        .map_err(|e| ShapeError::Write(e.to_string()))
}

/// Render a number the way it reads in the source data's JavaScript origin:
/// integral floats lose their fraction (`100.0` and `1e3` become `100` and
/// `1000`), `-0` becomes `0`.
fn format_number(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.is_finite() && f.fract() == 0.0 && f.abs() < 1e21 => {
            if f == 0.0 {
                "0".to_string()
            } else {
                format!("{:.0}", f)
            }
        }
        _ => n.to_string(),
    }
}

/// True when the value would render to nothing.
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.iter().all(is_blank),
        Value::Object(map) => map.values().all(is_blank),
        Value::Number(_) | Value::Bool(_) => false,
    }
}

/// Conservative XML element name check: a letter or `_`, then letters,
/// digits, `_`, `-` or `.`.
fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
}
