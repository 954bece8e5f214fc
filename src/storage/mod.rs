//! Configuration storage.

pub mod config;
pub mod paths;

pub use config::{
    Config, ConfigSource, ConfigSources, ENV_ANNOUNCE_EXIT, ENV_BANNER, ENV_CONFIG, ENV_NO_COLOR,
    ENV_NO_COLOR_STD, ENV_TEXT_MODE, ENV_VARIANT, ResolvedConfig, Variant,
};
pub use paths::AppPaths;
