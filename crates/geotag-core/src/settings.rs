//! Location resolution and coordinate output settings.
//!
//! Settings are persisted in the same shape the note-taking plugin stores in
//! its `data.json`:
//!
//! ```yaml
//! inputKeys:
//!   mode: simple            # or "template"
//!   simpleKey: address
//!   template: "{address}, {city}, {state}"
//!   object: false           # dotted keys address nested mappings
//! outputFormat:
//!   object: false
//!   mode: simple            # or "template"
//!   simpleKey:
//!     latitude: latitude
//!     longitude: longitude
//!   template:
//!     key: coordinates
//!     value: "{latitude}, {longitude}"
//! ```
//!
//! Loading merges the persisted tree over [`Settings::default`] field by
//! field. Missing fields keep their default; fields of the wrong type and
//! unknown keys are logged and ignored.

use std::path::Path;

use crate::metadata::{parse_yaml_mapping, Mapping, MetadataValue};
use crate::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Simple,
    Template,
}

impl Mode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Simple => "simple",
            Mode::Template => "template",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "simple" => Some(Mode::Simple),
            "template" => Some(Mode::Template),
            _ => None,
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a location query is read from frontmatter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionConfig {
    pub mode: Mode,
    pub simple_key: String,
    pub template: String,
    pub use_nested_paths: bool,
}

impl Default for ResolutionConfig {
    fn default() -> Self {
        Self {
            mode: Mode::Simple,
            simple_key: "address".to_owned(),
            template: "{address}, {city}, {state}".to_owned(),
            use_nested_paths: false,
        }
    }
}

impl ResolutionConfig {
    fn merge(&mut self, mut section: Section<'_>) {
        section.mode("mode", &mut self.mode);
        section.string("simpleKey", &mut self.simple_key);
        section.string("template", &mut self.template);
        section.boolean("object", &mut self.use_nested_paths);
        section.finish();
    }

    fn to_mapping(&self) -> Mapping {
        [
            ("mode", MetadataValue::from(self.mode.as_str())),
            ("simpleKey", MetadataValue::from(self.simple_key.as_str())),
            ("template", MetadataValue::from(self.template.as_str())),
            ("object", MetadataValue::from(self.use_nested_paths)),
        ]
        .into_iter()
        .collect()
    }
}

/// How resolved coordinates are written back to frontmatter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    pub mode: Mode,
    pub simple_lat_key: String,
    pub simple_lon_key: String,
    pub template_key: String,
    pub template_value: String,
    pub use_nested_paths: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            mode: Mode::Simple,
            simple_lat_key: "latitude".to_owned(),
            simple_lon_key: "longitude".to_owned(),
            template_key: "coordinates".to_owned(),
            template_value: "{latitude}, {longitude}".to_owned(),
            use_nested_paths: false,
        }
    }
}

impl OutputConfig {
    fn merge(&mut self, mut section: Section<'_>) {
        section.boolean("object", &mut self.use_nested_paths);
        section.mode("mode", &mut self.mode);
        if let Some(mut keys) = section.section("simpleKey") {
            keys.string("latitude", &mut self.simple_lat_key);
            keys.string("longitude", &mut self.simple_lon_key);
            keys.finish();
        }
        if let Some(mut template) = section.section("template") {
            template.string("key", &mut self.template_key);
            template.string("value", &mut self.template_value);
            template.finish();
        }
        section.finish();
    }

    fn to_mapping(&self) -> Mapping {
        let simple_key: Mapping = [
            ("latitude", MetadataValue::from(self.simple_lat_key.as_str())),
            ("longitude", MetadataValue::from(self.simple_lon_key.as_str())),
        ]
        .into_iter()
        .collect();
        let template: Mapping = [
            ("key", MetadataValue::from(self.template_key.as_str())),
            ("value", MetadataValue::from(self.template_value.as_str())),
        ]
        .into_iter()
        .collect();

        [
            ("object", MetadataValue::from(self.use_nested_paths)),
            ("mode", MetadataValue::from(self.mode.as_str())),
            ("simpleKey", MetadataValue::from(simple_key)),
            ("template", MetadataValue::from(template)),
        ]
        .into_iter()
        .collect()
    }
}

/// Complete settings snapshot used for one extraction/write pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub input: ResolutionConfig,
    pub output: OutputConfig,
}

impl Settings {
    /// Builds settings from a persisted tree, backfilling every missing
    /// field from the defaults.
    #[must_use]
    pub fn merged_over_defaults(persisted: &Mapping) -> Self {
        let mut settings = Self::default();
        settings.merge(persisted);
        settings
    }

    /// Parses persisted settings text (YAML or JSON). Text that is not a
    /// valid mapping yields the defaults.
    #[must_use]
    pub fn from_persisted_str(text: &str) -> Self {
        match parse_yaml_mapping(text) {
            Ok(Some(persisted)) => Self::merged_over_defaults(&persisted),
            Ok(None) => {
                if !text.trim().is_empty() {
                    tracing::warn!("settings root is not a mapping; using defaults");
                }
                Self::default()
            }
            Err(e) => {
                tracing::warn!(error = %e, "settings could not be parsed; using defaults");
                Self::default()
            }
        }
    }

    fn merge(&mut self, persisted: &Mapping) {
        let mut root = Section::new(String::new(), persisted);
        if let Some(input) = root.section("inputKeys") {
            self.input.merge(input);
        }
        if let Some(output) = root.section("outputFormat") {
            self.output.merge(output);
        }
        root.finish();
    }

    /// The full persisted tree for these settings.
    #[must_use]
    pub fn to_mapping(&self) -> Mapping {
        [
            ("inputKeys", MetadataValue::from(self.input.to_mapping())),
            ("outputFormat", MetadataValue::from(self.output.to_mapping())),
        ]
        .into_iter()
        .collect()
    }
}

/// Load settings from `path`, merging them over the defaults.
///
/// A missing file yields the defaults.
///
/// # Errors
///
/// Returns [`ConfigError::SettingsIo`] if the file exists but cannot be read.
pub fn load_settings(path: &Path) -> Result<Settings, ConfigError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::info!(path = %path.display(), "settings file not found; using defaults");
            return Ok(Settings::default());
        }
        Err(e) => {
            return Err(ConfigError::SettingsIo {
                path: path.display().to_string(),
                source: e,
            })
        }
    };

    Ok(Settings::from_persisted_str(&content))
}

/// Write the full settings tree to `path`.
///
/// Uses JSON for a `.json` extension and YAML otherwise. Parent directories
/// are created as needed.
///
/// # Errors
///
/// Returns [`ConfigError::SettingsIo`] on filesystem failure or
/// [`ConfigError::SettingsSerialize`] if the tree cannot be encoded.
pub fn save_settings(path: &Path, settings: &Settings) -> Result<(), ConfigError> {
    let io_err = |source| ConfigError::SettingsIo {
        path: path.display().to_string(),
        source,
    };
    let serialize_err = |reason: String| ConfigError::SettingsSerialize {
        path: path.display().to_string(),
        reason,
    };

    let tree = settings.to_mapping();
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let content = if is_json {
        serde_json::to_string_pretty(&tree).map_err(|e| serialize_err(e.to_string()))? + "\n"
    } else {
        serde_yaml::to_string(&tree).map_err(|e| serialize_err(e.to_string()))?
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    std::fs::write(path, content).map_err(io_err)?;
    tracing::info!(path = %path.display(), "settings saved");
    Ok(())
}

/// Cursor over one level of the persisted tree that remembers which keys
/// were consumed so the rest can be reported.
struct Section<'a> {
    path: String,
    mapping: &'a Mapping,
    known: Vec<&'static str>,
}

impl<'a> Section<'a> {
    fn new(path: String, mapping: &'a Mapping) -> Self {
        Self {
            path,
            mapping,
            known: Vec::new(),
        }
    }

    fn field_path(&self, key: &str) -> String {
        if self.path.is_empty() {
            key.to_owned()
        } else {
            format!("{}.{key}", self.path)
        }
    }

    /// Marks `key` as known and returns its value; `null` counts as absent.
    fn take(&mut self, key: &'static str) -> Option<&'a MetadataValue> {
        self.known.push(key);
        self.mapping.get(key).filter(|value| !value.is_null())
    }

    fn wrong_type(&self, key: &str, expected: &str, found: &MetadataValue) {
        tracing::warn!(
            field = %self.field_path(key),
            expected,
            found = found.kind(),
            "ignoring settings field of the wrong type; keeping default"
        );
    }

    fn string(&mut self, key: &'static str, target: &mut String) {
        match self.take(key) {
            Some(MetadataValue::String(s)) => s.clone_into(target),
            Some(other) => self.wrong_type(key, "string", other),
            None => {}
        }
    }

    fn boolean(&mut self, key: &'static str, target: &mut bool) {
        match self.take(key) {
            Some(MetadataValue::Bool(b)) => *target = *b,
            Some(other) => self.wrong_type(key, "bool", other),
            None => {}
        }
    }

    fn mode(&mut self, key: &'static str, target: &mut Mode) {
        match self.take(key) {
            Some(MetadataValue::String(s)) => match Mode::parse(s) {
                Some(mode) => *target = mode,
                None => tracing::warn!(
                    field = %self.field_path(key),
                    value = %s,
                    "unknown mode; expected \"simple\" or \"template\", keeping default"
                ),
            },
            Some(other) => self.wrong_type(key, "string", other),
            None => {}
        }
    }

    fn section(&mut self, key: &'static str) -> Option<Section<'a>> {
        match self.take(key) {
            Some(MetadataValue::Mapping(child)) => Some(Section::new(self.field_path(key), child)),
            Some(other) => {
                self.wrong_type(key, "mapping", other);
                None
            }
            None => None,
        }
    }

    fn finish(self) {
        for key in self.mapping.keys() {
            if !self.known.iter().any(|known| *known == key) {
                tracing::warn!(field = %self.field_path(key), "ignoring unknown settings field");
            }
        }
    }
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;
