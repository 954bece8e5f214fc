//! Configuration file loading and resolution.
//!
//! Loads configuration from:
//! - Linux: `~/.config/optdemo/config.toml`
//! - macOS: `~/Library/Application Support/optdemo/config.toml`
//! - Windows: `%APPDATA%/optdemo/config/config.toml`
//!
//! ## Precedence
//!
//! Settings are resolved with the following precedence (highest first):
//! 1. Environment variables
//! 2. Config file
//! 3. Built-in defaults
//!
//! The command line itself is reserved for the demo's four options, so
//! there are no CLI overrides.
//!
//! ## Environment Variables
//!
//! - `OPTDEMO_VARIANT`: `classic` or `help-alias`
//! - `OPTDEMO_BANNER`: print the text mode banner first (1, true, yes / 0, false, no)
//! - `OPTDEMO_ANNOUNCE_EXIT`: print `exit 0` after the last option
//! - `OPTDEMO_TEXT_MODE`: native console mode, `narrow` or `wide`
//! - `OPTDEMO_NO_COLOR` or `NO_COLOR`: disable colored diagnostics
//! - `OPTDEMO_CONFIG`: override config file path
//!
//! ## Example
//!
//! ```toml
//! [general]
//! variant = "help-alias"
//! banner = true
//!
//! [output]
//! text_mode = "wide"
//! color = false
//! ```

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::AppPaths;
use crate::error::{OptError, Result};
use crate::getopt::OptionTable;
use crate::output::TextMode;

// =============================================================================
// Environment Variable Names
// =============================================================================

/// Environment variable selecting the program variant.
pub const ENV_VARIANT: &str = "OPTDEMO_VARIANT";
/// Environment variable enabling the text mode banner.
pub const ENV_BANNER: &str = "OPTDEMO_BANNER";
/// Environment variable controlling the final `exit 0` line.
pub const ENV_ANNOUNCE_EXIT: &str = "OPTDEMO_ANNOUNCE_EXIT";
/// Environment variable for the console's native text mode.
pub const ENV_TEXT_MODE: &str = "OPTDEMO_TEXT_MODE";
/// Environment variable to disable colors.
pub const ENV_NO_COLOR: &str = "OPTDEMO_NO_COLOR";
/// Standard environment variable to disable colors.
pub const ENV_NO_COLOR_STD: &str = "NO_COLOR";
/// Environment variable to override config file path.
pub const ENV_CONFIG: &str = "OPTDEMO_CONFIG";

// =============================================================================
// Variant
// =============================================================================

/// Which flavour of the demo program runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Variant {
    /// `-h` only; prints `exit 0` when the options run out.
    #[default]
    Classic,
    /// `-?` is an alias for `-h`; no `exit 0` line.
    HelpAlias,
}

impl Variant {
    /// Parse from a config or env value (case-insensitive).
    #[must_use]
    pub fn from_arg(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "classic" | "default" => Some(Self::Classic),
            "help-alias" | "help_alias" | "alias" => Some(Self::HelpAlias),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Classic => "classic",
            Self::HelpAlias => "help-alias",
        }
    }

    /// Option table for this variant.
    #[must_use]
    pub fn option_table(self) -> OptionTable {
        match self {
            Self::Classic => OptionTable::standard(),
            Self::HelpAlias => OptionTable::with_help_alias(),
        }
    }

    /// Whether the variant prints `exit 0` unless configured otherwise.
    #[must_use]
    pub const fn announces_exit(self) -> bool {
        matches!(self, Self::Classic)
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Resolved Configuration
// =============================================================================

/// Fully resolved configuration after merging env vars and the config file.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Program variant.
    pub variant: Variant,
    /// Print `narrow/wide characters API` before parsing.
    pub banner: bool,
    /// Print `exit 0` after the last option.
    pub announce_exit: bool,
    /// Native text mode of stdout.
    pub text_mode: TextMode,
    /// Whether to disable colored diagnostics.
    pub no_color: bool,
    /// Source of each setting for debugging.
    pub sources: ConfigSources,
}

/// Tracks the source of each configuration value.
#[derive(Debug, Clone, Default)]
pub struct ConfigSources {
    pub variant: ConfigSource,
    pub banner: ConfigSource,
    pub announce_exit: ConfigSource,
    pub text_mode: ConfigSource,
    pub no_color: ConfigSource,
}

/// Where a configuration value came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConfigSource {
    /// Value from environment variable.
    Env,
    /// Value from config file.
    ConfigFile,
    /// Built-in default.
    #[default]
    Default,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Env => write!(f, "environment variable"),
            Self::ConfigFile => write!(f, "config file"),
            Self::Default => write!(f, "default"),
        }
    }
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            variant: Variant::Classic,
            banner: false,
            announce_exit: Variant::Classic.announces_exit(),
            text_mode: TextMode::Narrow,
            no_color: false,
            sources: ConfigSources::default(),
        }
    }
}

impl ResolvedConfig {
    /// Resolve configuration from the process environment and config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but is invalid, or if any
    /// environment value cannot be parsed.
    pub fn resolve() -> Result<Self> {
        Self::resolve_with(&|key| std::env::var(key).ok())
    }

    /// Resolve configuration using `env` to look up environment variables.
    ///
    /// # Errors
    ///
    /// Same as [`Self::resolve`].
    pub fn resolve_with(env: &dyn Fn(&str) -> Option<String>) -> Result<Self> {
        let config = Self::load_config(env)?;
        config.validate()?;

        let mut sources = ConfigSources::default();

        let variant = Self::resolve_variant(env, &config, &mut sources.variant)?;
        let banner = Self::resolve_bool(
            env,
            ENV_BANNER,
            config.general.banner,
            false,
            &mut sources.banner,
        )?;
        let announce_exit = Self::resolve_bool(
            env,
            ENV_ANNOUNCE_EXIT,
            config.general.announce_exit,
            variant.announces_exit(),
            &mut sources.announce_exit,
        )?;
        let text_mode = Self::resolve_text_mode(env, &config, &mut sources.text_mode)?;
        let no_color = Self::resolve_no_color(env, &config, &mut sources.no_color);

        let resolved = Self {
            variant,
            banner,
            announce_exit,
            text_mode,
            no_color,
            sources,
        };
        tracing::debug!(
            variant = %resolved.variant,
            variant_source = %resolved.sources.variant,
            text_mode = %resolved.text_mode,
            banner = resolved.banner,
            announce_exit = resolved.announce_exit,
            "configuration resolved"
        );
        Ok(resolved)
    }

    /// Option table for the resolved variant.
    #[must_use]
    pub fn option_table(&self) -> OptionTable {
        self.variant.option_table()
    }

    /// Load config file, respecting the `OPTDEMO_CONFIG` override.
    fn load_config(env: &dyn Fn(&str) -> Option<String>) -> Result<Config> {
        match env(ENV_CONFIG).filter(|path| !path.trim().is_empty()) {
            Some(path) => Config::load_from(Path::new(path.trim())),
            None => Config::load(),
        }
    }

    /// Resolve the variant setting.
    fn resolve_variant(
        env: &dyn Fn(&str) -> Option<String>,
        config: &Config,
        source: &mut ConfigSource,
    ) -> Result<Variant> {
        // 1. Environment variable
        if let Some(value) = env(ENV_VARIANT) {
            *source = ConfigSource::Env;
            return Variant::from_arg(&value).ok_or_else(|| invalid_variant(ENV_VARIANT, &value));
        }

        // 2. Config file
        if let Some(ref value) = config.general.variant {
            *source = ConfigSource::ConfigFile;
            return Variant::from_arg(value)
                .ok_or_else(|| invalid_variant("general.variant", value));
        }

        // 3. Default
        *source = ConfigSource::Default;
        Ok(Variant::default())
    }

    /// Resolve an on/off setting.
    fn resolve_bool(
        env: &dyn Fn(&str) -> Option<String>,
        key: &str,
        file_value: Option<bool>,
        default: bool,
        source: &mut ConfigSource,
    ) -> Result<bool> {
        // 1. Environment variable
        if let Some(value) = env(key) {
            *source = ConfigSource::Env;
            return parse_bool(&value).ok_or_else(|| OptError::ConfigInvalid {
                key: key.to_string(),
                value,
                message: "expected one of 1, true, yes, on, 0, false, no, off".to_string(),
            });
        }

        // 2. Config file
        if let Some(value) = file_value {
            *source = ConfigSource::ConfigFile;
            return Ok(value);
        }

        // 3. Default
        *source = ConfigSource::Default;
        Ok(default)
    }

    /// Resolve the native text mode.
    fn resolve_text_mode(
        env: &dyn Fn(&str) -> Option<String>,
        config: &Config,
        source: &mut ConfigSource,
    ) -> Result<TextMode> {
        // 1. Environment variable
        if let Some(value) = env(ENV_TEXT_MODE) {
            *source = ConfigSource::Env;
            return TextMode::from_arg(&value)
                .ok_or_else(|| invalid_text_mode(ENV_TEXT_MODE, &value));
        }

        // 2. Config file
        if let Some(ref value) = config.output.text_mode {
            *source = ConfigSource::ConfigFile;
            return TextMode::from_arg(value)
                .ok_or_else(|| invalid_text_mode("output.text_mode", value));
        }

        // 3. Default
        *source = ConfigSource::Default;
        Ok(TextMode::Narrow)
    }

    /// Resolve no_color setting.
    fn resolve_no_color(
        env: &dyn Fn(&str) -> Option<String>,
        config: &Config,
        source: &mut ConfigSource,
    ) -> bool {
        // 1. Environment variable (OPTDEMO_NO_COLOR or standard NO_COLOR)
        if env(ENV_NO_COLOR).is_some_and(|v| is_truthy(&v)) || env(ENV_NO_COLOR_STD).is_some() {
            *source = ConfigSource::Env;
            return true;
        }

        // 2. Config file (inverted: output.color = false means no_color = true)
        if !config.output.color {
            *source = ConfigSource::ConfigFile;
            return true;
        }

        // 3. Default
        *source = ConfigSource::Default;
        false
    }
}

fn invalid_variant(key: &str, value: &str) -> OptError {
    OptError::ConfigInvalid {
        key: key.to_string(),
        value: value.to_string(),
        message: "expected classic or help-alias".to_string(),
    }
}

fn invalid_text_mode(key: &str, value: &str) -> OptError {
    OptError::ConfigInvalid {
        key: key.to_string(),
        value: value.to_string(),
        message: "expected narrow or wide".to_string(),
    }
}

/// Parse an on/off value.
fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn is_truthy(value: &str) -> bool {
    parse_bool(value).unwrap_or(false)
}

// =============================================================================
// Config File
// =============================================================================

/// Contents of `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Program behavior.
    pub general: GeneralConfig,
    /// Output settings.
    pub output: OutputConfig,
}

/// Program behavior settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// `classic` or `help-alias`.
    pub variant: Option<String>,
    /// Print the text mode banner.
    pub banner: Option<bool>,
    /// Print `exit 0` at the end. Defaults depend on the variant.
    pub announce_exit: Option<bool>,
}

/// Output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Native console mode, `narrow` or `wide`.
    pub text_mode: Option<String>,
    /// Whether diagnostics may use colors.
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            text_mode: None,
            color: true,
        }
    }
}

impl Config {
    /// Load configuration from the default config file path.
    ///
    /// Returns default config if the file doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error only if the file exists but is invalid.
    pub fn load() -> Result<Self> {
        Self::load_from(&AppPaths::new().config_file())
    }

    /// Load configuration from a specific path.
    ///
    /// Returns default config if the file doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error only if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(?path, "Config file not found, using defaults");
            return Ok(Self::default());
        }

        tracing::debug!(?path, "Loading config file");
        let content = fs::read_to_string(path).map_err(|e| OptError::ConfigParse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        toml::from_str(&content).map_err(|e| OptError::ConfigParse {
            path: path.display().to_string(),
            message: e.to_string().trim().to_string(),
        })
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns [`OptError::ConfigInvalid`] for an unknown variant or text mode.
    pub fn validate(&self) -> Result<()> {
        if let Some(variant) = &self.general.variant {
            if Variant::from_arg(variant).is_none() {
                return Err(invalid_variant("general.variant", variant));
            }
        }

        if let Some(mode) = &self.output.text_mode {
            if TextMode::from_arg(mode).is_none() {
                return Err(invalid_text_mode("output.text_mode", mode));
            }
        }

        Ok(())
    }
}
