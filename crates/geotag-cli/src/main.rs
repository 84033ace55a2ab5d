mod commands;
mod frontmatter;
mod runner;
mod store;
mod vault;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "geotag")]
#[command(about = "Geocode locations in markdown frontmatter")]
struct Cli {
    /// Settings file (YAML or JSON); overrides GEOTAG_SETTINGS_PATH
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    /// Vault root used by `all`
    #[arg(long, global = true, default_value = ".")]
    vault: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Insert coordinates into a single document
    File { path: PathBuf },
    /// Insert coordinates into every markdown document under a folder
    Folder { dir: PathBuf },
    /// Insert coordinates into every markdown document in the vault
    All,
    /// Inspect or create the settings file
    Settings {
        #[command(subcommand)]
        command: SettingsCommands,
    },
}

#[derive(Debug, Subcommand)]
enum SettingsCommands {
    /// Print the effective settings, defaults included
    Show,
    /// Write the default settings to the settings file
    Init {
        /// Overwrite an existing settings file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(geotag_core::config::log_level_from_env()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let settings_path = cli
        .settings
        .unwrap_or_else(geotag_core::config::settings_path_from_env);

    match cli.command {
        Commands::File { path } => {
            let config = geotag_core::load_app_config_from_env()?;
            commands::run_file(&config, &settings_path, &path).await
        }
        Commands::Folder { dir } => {
            let config = geotag_core::load_app_config_from_env()?;
            commands::run_folder(&config, &settings_path, &dir).await
        }
        Commands::All => {
            let config = geotag_core::load_app_config_from_env()?;
            commands::run_folder(&config, &settings_path, &cli.vault).await
        }
        Commands::Settings {
            command: SettingsCommands::Show,
        } => commands::show_settings(&settings_path),
        Commands::Settings {
            command: SettingsCommands::Init { force },
        } => commands::init_settings(&settings_path, force),
    }
}

#[cfg(test)]
mod tests;
