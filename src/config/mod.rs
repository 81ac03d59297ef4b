mod settings;

use crate::config::settings::PartialSettings;
use config::{Config, ConfigError, Environment, File};

pub use settings::{BrokerSettings, LoggingSettings, Settings};

/// Default location of the optional configuration file, relative to the
/// working directory and without extension.
pub const DEFAULT_CONFIG_PATH: &str = "config/default";

/// Prefix for environment overrides, e.g. `CHATBROKER__BROKER__INPUT_CAPACITY`.
pub const ENV_PREFIX: &str = "CHATBROKER";

/// Loads the configuration from the default file and environment variables
/// and merges it onto the built-in defaults.
pub fn load_config() -> Result<Settings, ConfigError> {
    load_config_from(DEFAULT_CONFIG_PATH)
}

/// Same as [`load_config`] but reads the file at `path` (extension optional).
/// A missing file is not an error.
pub fn load_config_from(path: &str) -> Result<Settings, ConfigError> {
    let builder = Config::builder()
        .add_source(File::with_name(path).required(false))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

    let config = builder.build()?;

    // Try to deserialize what is available
    let partial: PartialSettings = config.try_deserialize()?;

    Ok(partial.merge_onto(Settings::default()))
}
