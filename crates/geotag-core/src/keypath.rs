//! Flat and dotted key paths into a [`Mapping`].

use std::fmt;

use crate::metadata::{Mapping, MetadataValue};

/// A configured frontmatter key, interpreted according to the
/// nested-path toggle it was configured with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyPath {
    /// A single top-level key; dots are part of the key name.
    Flat(String),
    /// A dotted path, one segment per nesting level.
    Nested(Vec<String>),
}

impl KeyPath {
    #[must_use]
    pub fn new(key: &str, nested: bool) -> Self {
        if nested {
            KeyPath::Nested(key.split('.').map(str::to_owned).collect())
        } else {
            KeyPath::Flat(key.to_owned())
        }
    }

    #[must_use]
    pub fn segments(&self) -> &[String] {
        match self {
            KeyPath::Flat(key) => std::slice::from_ref(key),
            KeyPath::Nested(segments) => segments,
        }
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyPath::Flat(key) => f.write_str(key),
            KeyPath::Nested(segments) => f.write_str(&segments.join(".")),
        }
    }
}

/// Resolves a dotted `path` in `mapping`.
///
/// Returns `None` when any segment is missing or when a non-final segment
/// holds something other than a mapping. The leaf is returned as-is.
#[must_use]
pub fn resolve<'a>(path: &str, mapping: &'a Mapping) -> Option<&'a MetadataValue> {
    lookup(&KeyPath::new(path, true), mapping)
}

/// Looks up `path` in `mapping`; see [`resolve`] for the nested semantics.
#[must_use]
pub fn lookup<'a>(path: &KeyPath, mapping: &'a Mapping) -> Option<&'a MetadataValue> {
    let (first, rest) = path.segments().split_first()?;
    rest.iter().try_fold(mapping.get(first)?, |current, segment| {
        current.as_mapping()?.get(segment)
    })
}

/// Writes `value` at `path`, creating intermediate mappings on demand.
///
/// Intermediate segments holding a non-mapping value are replaced by an
/// empty mapping. A leaf of a different type is overwritten with a warning.
/// Returns the value previously stored at the leaf.
pub fn assign(mapping: &mut Mapping, path: &KeyPath, value: MetadataValue) -> Option<MetadataValue> {
    let (leaf, parents) = path.segments().split_last()?;
    assign_under(mapping, path, parents, leaf, value)
}

fn assign_under(
    mapping: &mut Mapping,
    path: &KeyPath,
    parents: &[String],
    leaf: &str,
    value: MetadataValue,
) -> Option<MetadataValue> {
    let Some((segment, rest)) = parents.split_first() else {
        return insert_leaf(mapping, path, leaf, value);
    };

    if let Some(child) = mapping.get_mut(segment).and_then(MetadataValue::as_mapping_mut) {
        return assign_under(child, path, rest, leaf, value);
    }

    if let Some(replaced) = mapping.get(segment) {
        tracing::warn!(
            path = %path,
            segment = segment.as_str(),
            replaced = replaced.kind(),
            "replacing non-mapping frontmatter value with an empty mapping"
        );
    }
    let mut child = Mapping::new();
    let previous = assign_under(&mut child, path, rest, leaf, value);
    mapping.insert(segment.clone(), MetadataValue::Mapping(child));
    previous
}

fn insert_leaf(
    mapping: &mut Mapping,
    path: &KeyPath,
    leaf: &str,
    value: MetadataValue,
) -> Option<MetadataValue> {
    let written = value.kind();
    let previous = mapping.insert(leaf, value);
    if let Some(old) = &previous {
        if !old.is_null() && old.kind() != written {
            tracing::warn!(
                path = %path,
                replaced = old.kind(),
                written,
                "overwriting frontmatter value of a different type"
            );
        }
    }
    previous
}
