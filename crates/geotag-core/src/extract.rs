//! Builds a location query from a document's frontmatter.

use thiserror::Error;

use crate::keypath::{lookup, KeyPath};
use crate::metadata::Mapping;
use crate::placeholder::scan;
use crate::settings::{Mode, ResolutionConfig};

/// The frontmatter did not yield a usable location query.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("location key \"{key}\" is missing or empty in frontmatter")]
    MissingKey { key: String },

    #[error("location template \"{template}\" is incomplete after substitution: \"{rendered}\"")]
    IncompleteTemplate { template: String, rendered: String },

    #[error("location template \"{template}\" rendered to an empty string")]
    EmptyTemplate { template: String },
}

/// Extracts the location query described by `config` from `metadata`.
///
/// # Errors
///
/// - [`ExtractError::MissingKey`] in simple mode when the key is absent or
///   has no non-empty text form.
/// - [`ExtractError::IncompleteTemplate`] in template mode when a brace
///   remains after every resolvable placeholder has been substituted.
/// - [`ExtractError::EmptyTemplate`] when the substituted template is blank.
pub fn extract_location(config: &ResolutionConfig, metadata: &Mapping) -> Result<String, ExtractError> {
    match config.mode {
        Mode::Simple => field_text(&config.simple_key, config.use_nested_paths, metadata).ok_or_else(
            || ExtractError::MissingKey {
                key: config.simple_key.clone(),
            },
        ),
        Mode::Template => render_template(&config.template, config.use_nested_paths, metadata),
    }
}

fn field_text(key: &str, nested: bool, metadata: &Mapping) -> Option<String> {
    lookup(&KeyPath::new(key, nested), metadata).and_then(|value| value.as_query_text())
}

// Unresolved placeholders stay in place; the residual brace check below is
// what turns them into a single failure for the whole template.
fn render_template(template: &str, nested: bool, metadata: &Mapping) -> Result<String, ExtractError> {
    let mut rendered = String::with_capacity(template.len());
    let mut cursor = 0;

    for placeholder in scan(template) {
        rendered.push_str(&template[cursor..placeholder.start]);
        if let Some(text) = field_text(placeholder.key, nested, metadata) {
            rendered.push_str(&text);
        } else {
            tracing::debug!(key = placeholder.key, "template placeholder has no value");
            rendered.push_str(&template[placeholder.start..placeholder.end]);
        }
        cursor = placeholder.end;
    }
    rendered.push_str(&template[cursor..]);

    if rendered.contains(['{', '}']) {
        return Err(ExtractError::IncompleteTemplate {
            template: template.to_owned(),
            rendered,
        });
    }

    let trimmed = rendered.trim();
    if trimmed.is_empty() {
        return Err(ExtractError::EmptyTemplate {
            template: template.to_owned(),
        });
    }

    Ok(trimmed.to_owned())
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
