//! Command handlers called from `main` once configuration and logging are
//! set up.
//!
//! Every handler that geocodes builds exactly one rate limiter, so all
//! lookups in a process share the provider interval.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use geotag_core::{load_settings, save_settings, AppConfig, Settings};
use geotag_geocoder::{NominatimClient, RateLimiter};

use crate::runner::{process_document, run_batch, DocumentOutcome};
use crate::store::MarkdownStore;
use crate::vault::list_markdown_files;

fn build_geocoder(config: &AppConfig) -> anyhow::Result<NominatimClient> {
    let limiter = Arc::new(RateLimiter::new(Duration::from_millis(
        config.geocoder_min_interval_ms,
    )));
    NominatimClient::from_app_config(config, limiter).context("failed to build geocoding client")
}

/// Geocodes one document, surfacing any failure to the caller.
///
/// # Errors
///
/// Returns an error if the settings cannot be loaded, the document has no
/// frontmatter, or extraction, geocoding, or the write-back fails.
pub(crate) async fn run_file(
    config: &AppConfig,
    settings_path: &Path,
    path: &Path,
) -> anyhow::Result<()> {
    let settings = load_settings(settings_path)?;
    let geocoder = build_geocoder(config)?;

    match process_document(&MarkdownStore, &geocoder, &settings, path)
        .await
        .with_context(|| format!("failed to geocode {}", path.display()))?
    {
        DocumentOutcome::Updated(coordinate) => {
            println!("{}: {coordinate}", path.display());
            Ok(())
        }
        DocumentOutcome::Ineligible => {
            anyhow::bail!("{} has no frontmatter; nothing to geocode", path.display())
        }
    }
}

/// Geocodes every markdown document under `dir`, skipping failures.
///
/// # Errors
///
/// Returns an error if the settings cannot be loaded, the geocoding client
/// cannot be built, or `dir` cannot be listed. Per-document failures are
/// counted in the printed summary instead.
pub(crate) async fn run_folder(
    config: &AppConfig,
    settings_path: &Path,
    dir: &Path,
) -> anyhow::Result<()> {
    let settings = load_settings(settings_path)?;
    let files = list_markdown_files(dir)?;
    if files.is_empty() {
        println!("no markdown documents under {}", dir.display());
        return Ok(());
    }

    let geocoder = build_geocoder(config)?;
    let summary = run_batch(&MarkdownStore, &geocoder, &settings, &files).await;
    println!("{summary}");
    Ok(())
}

/// Prints the effective settings as YAML.
///
/// # Errors
///
/// Returns an error if the settings file exists but cannot be read.
pub(crate) fn show_settings(settings_path: &Path) -> anyhow::Result<()> {
    let settings = load_settings(settings_path)?;
    print!("{}", render_settings(&settings)?);
    Ok(())
}

fn render_settings(settings: &Settings) -> anyhow::Result<String> {
    serde_yaml::to_string(&settings.to_mapping()).context("failed to render settings")
}

/// Writes the default settings to `settings_path`.
///
/// # Errors
///
/// Returns an error if the file already exists and `force` is not set, or
/// if it cannot be written.
pub(crate) fn init_settings(settings_path: &Path, force: bool) -> anyhow::Result<()> {
    if settings_path.exists() && !force {
        anyhow::bail!(
            "{} already exists; pass --force to overwrite it",
            settings_path.display()
        );
    }

    save_settings(settings_path, &Settings::default())?;
    println!("wrote default settings to {}", settings_path.display());
    Ok(())
}
