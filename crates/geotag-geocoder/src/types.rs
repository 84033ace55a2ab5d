use geotag_core::{Coordinate, CoordinateValue};
use serde::Deserialize;
use serde_json::Value;

/// One element of a Nominatim `jsonv2` search response.
///
/// Only the fields the client reads are declared; `lat` and `lon` arrive as
/// strings but are accepted as any JSON value.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResult {
    pub lat: Value,
    pub lon: Value,
    #[serde(default)]
    pub display_name: Option<String>,
}

impl SearchResult {
    #[must_use]
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(component(&self.lat), component(&self.lon))
    }
}

fn component(value: &Value) -> CoordinateValue {
    match value {
        Value::String(text) => CoordinateValue::coerce(text),
        Value::Number(number) => number
            .as_f64()
            .map_or_else(|| CoordinateValue::RawText(number.to_string()), CoordinateValue::Number),
        other => CoordinateValue::RawText(other.to_string()),
    }
}
