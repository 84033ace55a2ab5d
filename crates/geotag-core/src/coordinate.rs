use std::fmt;

use crate::metadata::MetadataValue;

/// One coordinate component as delivered by the provider.
///
/// Provider text that does not parse as a finite number is kept verbatim
/// rather than rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum CoordinateValue {
    Number(f64),
    RawText(String),
}

impl CoordinateValue {
    #[must_use]
    pub fn coerce(text: &str) -> Self {
        match text.trim().parse::<f64>() {
            Ok(number) if number.is_finite() => CoordinateValue::Number(number),
            _ => CoordinateValue::RawText(text.to_owned()),
        }
    }

    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CoordinateValue::Number(number) => Some(*number),
            CoordinateValue::RawText(_) => None,
        }
    }
}

impl From<f64> for CoordinateValue {
    fn from(value: f64) -> Self {
        CoordinateValue::Number(value)
    }
}

impl fmt::Display for CoordinateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoordinateValue::Number(number) => write!(f, "{number}"),
            CoordinateValue::RawText(text) => f.write_str(text),
        }
    }
}

impl From<CoordinateValue> for MetadataValue {
    fn from(value: CoordinateValue) -> Self {
        match value {
            CoordinateValue::Number(number) => MetadataValue::from(number),
            CoordinateValue::RawText(text) => MetadataValue::String(text),
        }
    }
}

/// A resolved latitude/longitude pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Coordinate {
    latitude: CoordinateValue,
    longitude: CoordinateValue,
}

impl Coordinate {
    #[must_use]
    pub fn new(latitude: impl Into<CoordinateValue>, longitude: impl Into<CoordinateValue>) -> Self {
        Self {
            latitude: latitude.into(),
            longitude: longitude.into(),
        }
    }

    /// Builds a coordinate from provider text, coercing each component.
    #[must_use]
    pub fn from_text(latitude: &str, longitude: &str) -> Self {
        Self::new(
            CoordinateValue::coerce(latitude),
            CoordinateValue::coerce(longitude),
        )
    }

    #[must_use]
    pub fn latitude(&self) -> &CoordinateValue {
        &self.latitude
    }

    #[must_use]
    pub fn longitude(&self) -> &CoordinateValue {
        &self.longitude
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.latitude, self.longitude)
    }
}
