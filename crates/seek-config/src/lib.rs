//! Configuration system for seek.
//!
//! seek uses TOML configuration files named `.seek.toml`. Configuration is resolved by walking up
//! the directory tree from the current working directory, collecting any `.seek.toml` files
//! found, then loading `~/.seek.toml` as the global config with lowest precedence.

#![warn(missing_docs)]

mod discovery;
mod error;
mod merge;
mod parse;
mod templates;
#[cfg(test)]
mod test_support;
mod validate;

use std::path::{Path, PathBuf};

pub use discovery::{CONFIG_FILENAME, discover_config_files, global_config_path, is_global_config};
pub use error::ConfigError;
pub use merge::{ParsedConfig, merge_configs};
pub use parse::{RawConfig, RawFieldSettings, RawQuerySettings, parse_config_file, parse_config_str};
use seek_dsl::{QueryCompiler, SearchFields};
use seek_query::DefaultOperator;
use serde::Serialize;
pub use templates::{global_template, local_template};
use tracing::debug;
pub use validate::ConfigWarning;
use validate::validate_config;

/// Top-level merged configuration for seek.
///
/// This represents the fully resolved configuration after merging all discovered `.seek.toml`
/// files according to precedence rules.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Query compilation settings.
    pub query: QuerySettings,
    /// Search field settings.
    pub fields: FieldSettings,
    /// Directory containing the most specific config file.
    pub config_root: Option<PathBuf>,
    /// Config files that contributed, highest precedence first.
    pub sources: Vec<PathBuf>,
}

impl Config {
    /// Loads configuration by discovering and merging all relevant `.seek.toml` files.
    ///
    /// Returns `Ok(Config::default())` if no configuration files are found.
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        let config_files = discover_config_files(cwd);
        debug!(cwd = %cwd.display(), files = config_files.len(), "discovered config files");
        Self::load_from_files(&config_files)
    }

    /// Loads configuration from a specific list of config file paths.
    ///
    /// Files should be provided in precedence order: highest precedence first.
    ///
    /// Returns `Ok(Config::default())` if the list is empty.
    pub fn load_from_files(files: &[PathBuf]) -> Result<Self, ConfigError> {
        let parsed = files
            .iter()
            .map(|path| {
                Ok(ParsedConfig {
                    path: path.clone(),
                    config: parse_config_file(path)?,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        merge_configs(&parsed)
    }

    /// Validates the configuration and returns any warnings.
    ///
    /// This checks for:
    /// - A default field that is not one of the search fields
    /// - Search fields listed more than once
    /// - Search fields that cannot be typed as a `field:` prefix
    pub fn validate(&self) -> Vec<ConfigWarning> {
        validate_config(self)
    }

    /// Builds a query compiler using these settings.
    pub fn compiler(&self) -> QueryCompiler {
        QueryCompiler::new(self.fields.search.clone())
            .with_default_field(&self.query.default_field)
            .with_operator(self.query.default_operator)
    }

    /// Serializes the effective settings to TOML format.
    ///
    /// The output has the same layout as a `.seek.toml` file.
    pub fn settings_to_toml(&self) -> Result<String, ConfigError> {
        let serializable = SerializableSettings {
            query: SerializableQuerySettings {
                default_field: &self.query.default_field,
                default_operator: self.query.default_operator.as_str(),
            },
            fields: SerializableFieldSettings {
                search: &self.fields.search,
            },
        };
        toml::to_string_pretty(&serializable).map_err(ConfigError::SerializeToml)
    }
}

/// Query compilation settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuerySettings {
    /// Field scope for unscoped words; empty for the search field list.
    pub default_field: String,
    /// How implicit clause runs are combined.
    pub default_operator: DefaultOperator,
}

/// Search field settings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldSettings {
    /// Fields searched when a word has no field prefix.
    pub search: SearchFields,
}

/// Internal struct for TOML serialization of settings.
#[derive(Serialize)]
struct SerializableSettings<'a> {
    /// Query compilation settings.
    query: SerializableQuerySettings<'a>,
    /// Search field settings.
    fields: SerializableFieldSettings<'a>,
}

/// `[query]` section as written to TOML.
#[derive(Serialize)]
struct SerializableQuerySettings<'a> {
    /// Field scope for unscoped words.
    default_field: &'a str,
    /// Operator name.
    default_operator: &'static str,
}

/// `[fields]` section as written to TOML.
#[derive(Serialize)]
struct SerializableFieldSettings<'a> {
    /// Weighted search fields.
    search: &'a SearchFields,
}
