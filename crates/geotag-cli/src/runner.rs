//! Per-document geocoding and sequential batch runs.
//!
//! A batch never aborts on a per-document failure: the failure is logged,
//! counted, and the run moves on to the next document.

use std::fmt;
use std::path::{Path, PathBuf};

use geotag_core::{compute_writes, extract_location, Coordinate, ExtractError, Settings};
use geotag_geocoder::{Geocode, GeocodeError};
use thiserror::Error;

use crate::store::{DocumentStore, StoreError};

/// Result of a successful pass over one document.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum DocumentOutcome {
    /// Coordinates were resolved and written.
    Updated(Coordinate),
    /// The document has no frontmatter, so nothing was attempted.
    Ineligible,
}

#[derive(Debug, Error)]
pub(crate) enum ProcessError {
    #[error(transparent)]
    NoLocation(#[from] ExtractError),

    #[error("no geocoding match for \"{query}\"")]
    NoMatch { query: String },

    #[error("geocoding failed: {0}")]
    Geocode(#[from] GeocodeError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Counts for a finished batch run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BatchSummary {
    pub total: usize,
    pub updated: usize,
    pub ineligible: usize,
    pub failed: usize,
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} documents: {} updated, {} without frontmatter, {} failed",
            self.total, self.updated, self.ineligible, self.failed
        )
    }
}

/// Extracts, geocodes, and writes back coordinates for one document.
///
/// # Errors
///
/// - [`ProcessError::NoLocation`] if no location query can be built.
/// - [`ProcessError::NoMatch`] if the provider has no result; nothing is written.
/// - [`ProcessError::Geocode`] on provider or transport failure.
/// - [`ProcessError::Store`] if the document cannot be read or updated.
pub(crate) async fn process_document<S, G>(
    store: &S,
    geocoder: &G,
    settings: &Settings,
    path: &Path,
) -> Result<DocumentOutcome, ProcessError>
where
    S: DocumentStore,
    G: Geocode,
{
    let Some(metadata) = store.read_metadata(path)? else {
        tracing::debug!(path = %path.display(), "no frontmatter; skipping");
        return Ok(DocumentOutcome::Ineligible);
    };

    let query = extract_location(&settings.input, &metadata)?;
    let coordinate = geocoder
        .lookup(&query)
        .await?
        .ok_or_else(|| ProcessError::NoMatch {
            query: query.clone(),
        })?;

    let writes = compute_writes(&coordinate, &settings.output);
    store.update_metadata(path, &writes)?;

    tracing::info!(path = %path.display(), query = %query, %coordinate, "coordinates written");
    Ok(DocumentOutcome::Updated(coordinate))
}

/// Processes `paths` one at a time, in order, against a single settings
/// snapshot.
pub(crate) async fn run_batch<S, G>(
    store: &S,
    geocoder: &G,
    settings: &Settings,
    paths: &[PathBuf],
) -> BatchSummary
where
    S: DocumentStore,
    G: Geocode,
{
    let mut summary = BatchSummary {
        total: paths.len(),
        ..BatchSummary::default()
    };

    for (index, path) in paths.iter().enumerate() {
        tracing::info!(
            path = %path.display(),
            "processing {}/{}",
            index + 1,
            summary.total
        );

        match process_document(store, geocoder, settings, path).await {
            Ok(DocumentOutcome::Updated(_)) => summary.updated += 1,
            Ok(DocumentOutcome::Ineligible) => summary.ineligible += 1,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "document failed");
                summary.failed += 1;
            }
        }
    }

    tracing::info!(%summary, "batch finished");
    summary
}

#[cfg(test)]
#[path = "runner_test.rs"]
mod tests;
