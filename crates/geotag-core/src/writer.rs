//! Computes and applies the frontmatter writes for a resolved coordinate.

use crate::coordinate::Coordinate;
use crate::keypath::{assign, KeyPath};
use crate::metadata::{Mapping, MetadataValue};
use crate::settings::{Mode, OutputConfig};

/// A single destination and the value to store there.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldWrite {
    pub path: KeyPath,
    pub value: MetadataValue,
}

/// Returns the writes `config` prescribes for `coordinate`, in the order
/// they should be applied.
#[must_use]
pub fn compute_writes(coordinate: &Coordinate, config: &OutputConfig) -> Vec<FieldWrite> {
    let nested = config.use_nested_paths;
    match config.mode {
        Mode::Simple => vec![
            FieldWrite {
                path: KeyPath::new(&config.simple_lat_key, nested),
                value: coordinate.latitude().clone().into(),
            },
            FieldWrite {
                path: KeyPath::new(&config.simple_lon_key, nested),
                value: coordinate.longitude().clone().into(),
            },
        ],
        Mode::Template => vec![FieldWrite {
            path: KeyPath::new(&config.template_key, nested),
            value: MetadataValue::String(render_coordinates(&config.template_value, coordinate)),
        }],
    }
}

/// Replaces every `{latitude}` and `{longitude}` in `template`.
#[must_use]
pub fn render_coordinates(template: &str, coordinate: &Coordinate) -> String {
    template
        .replace("{latitude}", &coordinate.latitude().to_string())
        .replace("{longitude}", &coordinate.longitude().to_string())
}

/// Applies `writes` to `metadata` in order.
pub fn apply_writes(metadata: &mut Mapping, writes: &[FieldWrite]) {
    for write in writes {
        assign(metadata, &write.path, write.value.clone());
    }
}
