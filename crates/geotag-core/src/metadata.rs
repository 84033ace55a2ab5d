//! Frontmatter value tree.
//!
//! [`MetadataValue`] is the tagged union every other module walks with
//! explicit pattern matching. [`Mapping`] keeps keys in insertion order so a
//! rewritten frontmatter block keeps the field order its author chose.

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use serde_yaml::{Number, Value as YamlValue};

/// One node of a document's metadata.
#[derive(Debug, Clone, PartialEq)]
pub enum MetadataValue {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    List(Vec<MetadataValue>),
    Mapping(Mapping),
}

impl MetadataValue {
    /// Returns the nested mapping, or `None` for every other variant.
    #[must_use]
    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            MetadataValue::Mapping(mapping) => Some(mapping),
            _ => None,
        }
    }

    pub fn as_mapping_mut(&mut self) -> Option<&mut Mapping> {
        match self {
            MetadataValue::Mapping(mapping) => Some(mapping),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            MetadataValue::String(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            MetadataValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, MetadataValue::Null)
    }

    /// Short variant name used in log fields and error messages.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            MetadataValue::Null => "null",
            MetadataValue::Bool(_) => "bool",
            MetadataValue::Number(_) => "number",
            MetadataValue::String(_) => "string",
            MetadataValue::List(_) => "list",
            MetadataValue::Mapping(_) => "mapping",
        }
    }

    /// Text form of the value for use in a location query.
    ///
    /// Scalars use their display form, a list joins its scalar items with
    /// `", "`, and `Null` or a mapping have no text form. The result is
    /// trimmed; text that trims to nothing is reported as `None`.
    #[must_use]
    pub fn as_query_text(&self) -> Option<String> {
        let text = match self {
            MetadataValue::Null | MetadataValue::Mapping(_) => return None,
            MetadataValue::Bool(b) => b.to_string(),
            MetadataValue::Number(n) => n.to_string(),
            MetadataValue::String(s) => s.clone(),
            MetadataValue::List(items) => items
                .iter()
                .filter(|item| !matches!(item, MetadataValue::List(_)))
                .filter_map(MetadataValue::as_query_text)
                .collect::<Vec<_>>()
                .join(", "),
        };

        let trimmed = text.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_owned())
        }
    }
}

impl From<bool> for MetadataValue {
    fn from(value: bool) -> Self {
        MetadataValue::Bool(value)
    }
}

impl From<i64> for MetadataValue {
    fn from(value: i64) -> Self {
        MetadataValue::Number(Number::from(value))
    }
}

impl From<f64> for MetadataValue {
    fn from(value: f64) -> Self {
        MetadataValue::Number(Number::from(value))
    }
}

impl From<&str> for MetadataValue {
    fn from(value: &str) -> Self {
        MetadataValue::String(value.to_owned())
    }
}

impl From<String> for MetadataValue {
    fn from(value: String) -> Self {
        MetadataValue::String(value)
    }
}

impl From<Mapping> for MetadataValue {
    fn from(value: Mapping) -> Self {
        MetadataValue::Mapping(value)
    }
}

impl From<YamlValue> for MetadataValue {
    fn from(value: YamlValue) -> Self {
        match value {
            YamlValue::Null => MetadataValue::Null,
            YamlValue::Bool(b) => MetadataValue::Bool(b),
            YamlValue::Number(n) => MetadataValue::Number(n),
            YamlValue::String(s) => MetadataValue::String(s),
            YamlValue::Sequence(items) => {
                MetadataValue::List(items.into_iter().map(MetadataValue::from).collect())
            }
            YamlValue::Mapping(map) => MetadataValue::Mapping(
                map.into_iter()
                    .filter_map(|(key, value)| {
                        yaml_key(key).map(|key| (key, MetadataValue::from(value)))
                    })
                    .collect(),
            ),
            // Tags carry no meaning for frontmatter lookups.
            YamlValue::Tagged(tagged) => MetadataValue::from(tagged.value),
        }
    }
}

fn yaml_key(key: YamlValue) -> Option<String> {
    match key {
        YamlValue::String(s) => Some(s),
        YamlValue::Number(n) => Some(n.to_string()),
        YamlValue::Bool(b) => Some(b.to_string()),
        other => {
            tracing::debug!(?other, "dropping frontmatter entry with a non-scalar key");
            None
        }
    }
}

impl Serialize for MetadataValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            MetadataValue::Null => serializer.serialize_unit(),
            MetadataValue::Bool(b) => serializer.serialize_bool(*b),
            MetadataValue::Number(n) => n.serialize(serializer),
            MetadataValue::String(s) => serializer.serialize_str(s),
            MetadataValue::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            MetadataValue::Mapping(mapping) => mapping.serialize(serializer),
        }
    }
}

/// String-keyed mapping that preserves insertion order.
///
/// Frontmatter blocks are small, so lookups scan linearly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mapping {
    entries: Vec<(String, MetadataValue)>,
}

impl Mapping {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&MetadataValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, value)| value)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut MetadataValue> {
        self.entries
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, value)| value)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    /// Sets `key` to `value`, returning the previous value.
    ///
    /// An existing key keeps its position; a new key is appended.
    pub fn insert(&mut self, key: impl Into<String>, value: MetadataValue) -> Option<MetadataValue> {
        let key = key.into();
        match self.position(&key) {
            Some(index) => Some(std::mem::replace(&mut self.entries[index].1, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<MetadataValue> {
        let index = self.position(key)?;
        Some(self.entries.remove(index).1)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetadataValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key)
    }
}

impl<K: Into<String>> FromIterator<(K, MetadataValue)> for Mapping {
    fn from_iter<I: IntoIterator<Item = (K, MetadataValue)>>(iter: I) -> Self {
        let mut mapping = Mapping::new();
        for (key, value) in iter {
            mapping.insert(key, value);
        }
        mapping
    }
}

impl Serialize for Mapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Parses a YAML (or JSON) document that is expected to be a mapping.
///
/// Returns `Ok(None)` when the document is empty or its root is not a
/// mapping.
///
/// # Errors
///
/// Returns the `serde_yaml` error when the text is not valid YAML.
pub fn parse_yaml_mapping(text: &str) -> Result<Option<Mapping>, serde_yaml::Error> {
    let value: YamlValue = serde_yaml::from_str(text)?;
    match MetadataValue::from(value) {
        MetadataValue::Mapping(mapping) => Ok(Some(mapping)),
        _ => Ok(None),
    }
}

#[cfg(test)]
#[path = "metadata_test.rs"]
mod tests;
