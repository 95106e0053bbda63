//! User configuration stored in `~/.geogrid/config.ini`
//!
//! Settings supply defaults for encoding options and logging. Command-line
//! flags take precedence over them.
//!
//! # Example
//!
//! ```
//! use geogrid::config::{ConfigFile, ConfigKey};
//!
//! let mut config = ConfigFile::default();
//! let key: ConfigKey = "mgrs.precision".parse().unwrap();
//! key.set(&mut config, "3").unwrap();
//! assert_eq!(config.encode_options().precision, 3);
//! ```

mod file;
mod keys;
mod settings;

pub use file::{config_directory, config_file_path, ConfigFileError};
pub use keys::{ConfigKey, ConfigKeyError};
pub use settings::{
    ConfigFile, LoggingSettings, MgrsSettings, OutputSettings, XyzSettings, DEFAULT_LOG_LEVEL,
    DEFAULT_OUTPUT_FORMAT, LOG_LEVELS,
};
