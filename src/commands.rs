pub mod build;
pub mod clean;
pub mod init;
pub mod serve;

use std::path::{Path, PathBuf};

use crate::build::base_path_from_config;
use crate::config::{Config, absolute_config_path};

/// A loaded config with the paths it was resolved from.
pub struct LoadedConfig {
    pub config: Config,
    /// Absolute path of the config file (which need not exist)
    pub config_path: PathBuf,
    /// Directory relative config paths are resolved against
    pub base_path: PathBuf,
}

/// Load the config named on the command line, defaulting to `tofu.yaml`.
pub fn load_config(config_file: Option<&Path>) -> Result<LoadedConfig, anyhow::Error> {
    let config_path =
        absolute_config_path(config_file.unwrap_or(Path::new(crate::config::CONFIG_FILE)))?;
    let config = Config::load_from_arg(Some(config_path.as_path()))?;
    let base_path = base_path_from_config(&config_path);

    tracing::debug!(config = %config_path.display(), "loaded config");
    Ok(LoadedConfig {
        config,
        config_path,
        base_path,
    })
}
