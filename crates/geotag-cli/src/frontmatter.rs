//! Splitting and re-assembling the YAML frontmatter block of a markdown file.
//!
//! The block starts with a first line of exactly `---` and ends at the next
//! line of exactly `---`. Everything after the closing line is the body and
//! is written back byte for byte.

use geotag_core::Mapping;

/// Borrowed halves of a markdown document with frontmatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Parts<'a> {
    pub yaml: &'a str,
    pub body: &'a str,
    /// Line ending of the opening delimiter, reused when re-rendering.
    pub line_ending: &'static str,
}

/// Splits `text` into frontmatter YAML and body, or `None` when the text
/// has no frontmatter block.
pub(crate) fn split(text: &str) -> Option<Parts<'_>> {
    let mut lines = text.split_inclusive('\n');
    let first = lines.next()?;
    if first.trim_end() != "---" {
        return None;
    }

    let line_ending = if first.ends_with("\r\n") { "\r\n" } else { "\n" };
    let yaml_start = first.len();
    let mut offset = yaml_start;
    for line in lines {
        if line.trim_end() == "---" {
            return Some(Parts {
                yaml: &text[yaml_start..offset],
                body: &text[offset + line.len()..],
                line_ending,
            });
        }
        offset += line.len();
    }

    None
}

/// Renders `metadata` as a frontmatter block followed by `body`, ending
/// every line of the block with `line_ending`.
pub(crate) fn render(
    metadata: &Mapping,
    body: &str,
    line_ending: &str,
) -> Result<String, serde_yaml::Error> {
    let mut yaml = if metadata.is_empty() {
        String::new()
    } else {
        serde_yaml::to_string(metadata)?
    };
    if line_ending != "\n" {
        yaml = yaml.replace('\n', line_ending);
    }
    Ok(format!("---{line_ending}{yaml}---{line_ending}{body}"))
}
