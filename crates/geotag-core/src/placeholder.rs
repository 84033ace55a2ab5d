//! Single-pass `{key}` placeholder scanner.
//!
//! Braces never nest: an opening brace seen while a placeholder is already
//! open restarts the placeholder there. `{}` and `{   }` are plain text.

/// A `{key}` occurrence in a template. `start..end` covers the braces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholder<'a> {
    pub start: usize,
    pub end: usize,
    pub key: &'a str,
}

/// Returns every placeholder in `template`, in order of appearance.
#[must_use]
pub fn scan(template: &str) -> Vec<Placeholder<'_>> {
    let mut found = Vec::new();
    let mut open: Option<usize> = None;

    for (index, ch) in template.char_indices() {
        match ch {
            '{' => open = Some(index),
            '}' => {
                if let Some(start) = open.take() {
                    let key = template[start + 1..index].trim();
                    if !key.is_empty() {
                        found.push(Placeholder {
                            start,
                            end: index + 1,
                            key,
                        });
                    }
                }
            }
            _ => {}
        }
    }

    found
}
