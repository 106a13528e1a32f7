//! Configuration file parsing.
//!
//! Parses individual `.seek.toml` files into intermediate `RawConfig` structures that keep every
//! field optional until files are merged.

use std::{fs, path::Path};

use serde::Deserialize;
use serde_with::{OneOrMany, serde_as};
#[cfg(test)]
use toml::de::Error as TomlError;

use crate::ConfigError;

/// Raw configuration as parsed directly from a TOML file.
///
/// All fields are optional to support partial configs that will be merged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// When true, stop discovery here - ignore parent and global configs.
    pub root: Option<bool>,
    /// Query compilation settings.
    pub query: Option<RawQuerySettings>,
    /// Search field settings.
    pub fields: Option<RawFieldSettings>,
}

/// Raw `[query]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawQuerySettings {
    /// Field scope for unscoped words (`""` for the search field list).
    pub default_field: Option<String>,
    /// How implicit clause runs are combined (`"and"` or `"or"`).
    pub default_operator: Option<String>,
}

/// Raw `[fields]` section.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawFieldSettings {
    /// Weighted search fields as `name^weight` specs.
    /// Accepts either a single string or an array of strings.
    #[serde_as(as = "Option<OneOrMany<_>>")]
    pub search: Option<Vec<String>>,
}

/// Parses a configuration file from disk.
pub fn parse_config_file(path: &Path) -> Result<RawConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config_str(&contents, path)
}

/// Parses configuration from a TOML string.
///
/// The `path` parameter is used for error reporting.
pub fn parse_config_str(contents: &str, path: &Path) -> Result<RawConfig, ConfigError> {
    toml::from_str(contents).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

/// Parses configuration from a TOML string without path context.
///
/// Useful for validating template content (tests only).
#[cfg(test)]
pub fn parse_config(contents: &str) -> Result<RawConfig, TomlError> {
    toml::from_str(contents)
}

/// Checks if a config file has `root = true` set.
///
/// Returns false if the file cannot be read or parsed.
pub fn is_root_config(path: &Path) -> bool {
    parse_config_file(path).is_ok_and(|config| config.root == Some(true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ConfigTree;

    fn parse(toml: &str) -> RawConfig {
        parse_config_str(toml, Path::new("test.toml")).unwrap()
    }

    #[test]
    fn empty_config() {
        let config = parse("");
        assert!(config.root.is_none());
        assert!(config.query.is_none());
        assert!(config.fields.is_none());
    }

    #[test]
    fn query_section() {
        let config = parse(
            r#"
[query]
default_field = "body"
default_operator = "or"
"#,
        );
        let query = config.query.unwrap();
        assert_eq!(query.default_field.as_deref(), Some("body"));
        assert_eq!(query.default_operator.as_deref(), Some("or"));
    }

    #[test]
    fn partial_query_section() {
        let config = parse("[query]\ndefault_operator = \"and\"\n");
        let query = config.query.unwrap();
        assert!(query.default_field.is_none());
        assert_eq!(query.default_operator.as_deref(), Some("and"));
    }

    #[test]
    fn search_fields_list() {
        let config = parse("[fields]\nsearch = [\"title^3\", \"body\"]\n");
        assert_eq!(
            config.fields.unwrap().search,
            Some(vec!["title^3".to_string(), "body".to_string()])
        );
    }

    #[test]
    fn search_fields_single_string() {
        let config = parse("[fields]\nsearch = \"body\"\n");
        assert_eq!(
            config.fields.unwrap().search,
            Some(vec!["body".to_string()])
        );
    }

    #[test]
    fn empty_fields_section() {
        let config = parse("[fields]\n");
        assert!(config.fields.unwrap().search.is_none());
    }

    #[test]
    fn invalid_toml() {
        let result = parse_config_str("this is not valid toml [[[", Path::new("test.toml"));
        assert!(matches!(result, Err(ConfigError::ParseToml { .. })));
    }

    #[test]
    fn wrong_type() {
        let result = parse_config_str("[query]\ndefault_field = 3\n", Path::new("test.toml"));
        assert!(matches!(result, Err(ConfigError::ParseToml { .. })));
    }

    #[test]
    fn unknown_fields_ignored() {
        let config = parse(
            r#"
[query]
default_field = "body"
unknown = "ignored"

[unknown_section]
foo = "bar"
"#,
        );
        assert_eq!(config.query.unwrap().default_field.as_deref(), Some("body"));
    }

    #[test]
    fn missing_file() {
        let result = parse_config_file(Path::new("/nonexistent/path/.seek.toml"));
        assert!(matches!(result, Err(ConfigError::ReadFile { .. })));
    }

    #[test]
    fn root_flag() {
        assert_eq!(parse("root = true\n").root, Some(true));
        assert_eq!(parse("root = false\n").root, Some(false));
    }

    #[test]
    fn is_root_config_reads_flag() {
        let dir = ConfigTree::new();
        assert!(is_root_config(&dir.root_config("a")));
        assert!(!is_root_config(&dir.config_with("b", "root = false\n")));
        assert!(!is_root_config(&dir.config("c")));
        assert!(!is_root_config(&dir.config_with("d", "root = [[[")));
        assert!(!is_root_config(Path::new("/nonexistent/.seek.toml")));
    }
}
