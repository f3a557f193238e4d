//! Config module.
//! Provides configuration types, the config file location and XML loading.

pub mod paths;
pub mod types;
pub mod xml;

pub use paths::{config_path_is_explicit, default_config_path, path_has_symlink_ancestor};
pub use types::{Config, LogLevel};
pub use xml::{load_config, load_config_from_xml_path};

/// Environment variable naming an explicit XML config file.
pub const CONFIG_ENV: &str = "BLOCKCHAININCUBATOR_CONFIG";
