pub mod app_config;
pub mod config;
pub mod coordinate;
pub mod error;
pub mod extract;
pub mod keypath;
pub mod metadata;
pub mod placeholder;
pub mod settings;
pub mod writer;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use coordinate::{Coordinate, CoordinateValue};
pub use error::ConfigError;
pub use extract::{extract_location, ExtractError};
pub use keypath::{resolve, KeyPath};
pub use metadata::{Mapping, MetadataValue};
pub use settings::{load_settings, save_settings, Mode, OutputConfig, ResolutionConfig, Settings};
pub use writer::{apply_writes, compute_writes, FieldWrite};
