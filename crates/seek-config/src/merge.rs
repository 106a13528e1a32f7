//! Configuration merging.
//!
//! Merges multiple `RawConfig` files into a single resolved `Config`, applying precedence rules
//! and validating operator and field values.

use std::path::PathBuf;

use seek_dsl::SearchFields;
use seek_query::{DefaultOperator, normalize_field};

use crate::{
    Config, ConfigError, FieldSettings, QuerySettings,
    parse::{RawConfig, RawFieldSettings, RawQuerySettings},
};

/// A parsed config file with its source path.
pub struct ParsedConfig {
    /// Path to the config file.
    pub path: PathBuf,
    /// Parsed raw configuration.
    pub config: RawConfig,
}

/// Merges multiple configuration files into a single resolved `Config`.
///
/// Configs should be provided in precedence order: highest precedence first (closest to CWD),
/// lowest precedence last (global config).
///
/// Merge rules:
/// - Scalar settings: first defined value wins (highest precedence)
/// - `fields.search`: taken whole from the highest-precedence file that sets it
pub fn merge_configs(configs: &[ParsedConfig]) -> Result<Config, ConfigError> {
    if configs.is_empty() {
        return Ok(Config::default());
    }

    let mut query = QuerySettings::default();
    let mut fields = FieldSettings::default();

    // Lowest precedence first so higher precedence overwrites
    for parsed in configs.iter().rev() {
        if let Some(ref raw) = parsed.config.query {
            apply_raw_query(&mut query, raw, parsed)?;
        }
        if let Some(ref raw) = parsed.config.fields {
            apply_raw_fields(&mut fields, raw, parsed)?;
        }
    }

    let config_root = configs
        .first()
        .and_then(|c| c.path.parent())
        .map(PathBuf::from);

    Ok(Config {
        query,
        fields,
        config_root,
        sources: configs.iter().map(|c| c.path.clone()).collect(),
    })
}

/// Applies a raw `[query]` section, overwriting any present values.
fn apply_raw_query(
    result: &mut QuerySettings,
    raw: &RawQuerySettings,
    source: &ParsedConfig,
) -> Result<(), ConfigError> {
    if let Some(ref field) = raw.default_field {
        result.default_field = normalize_field(field.trim()).to_string();
    }
    if let Some(ref operator) = raw.default_operator {
        result.default_operator = operator.trim().parse::<DefaultOperator>().map_err(|err| {
            ConfigError::InvalidOperator {
                path: source.path.clone(),
                source: err,
            }
        })?;
    }
    Ok(())
}

/// Applies a raw `[fields]` section, replacing the field list if present.
fn apply_raw_fields(
    result: &mut FieldSettings,
    raw: &RawFieldSettings,
    source: &ParsedConfig,
) -> Result<(), ConfigError> {
    if let Some(ref specs) = raw.search {
        result.search = SearchFields::parse(specs).map_err(|err| ConfigError::InvalidFields {
            path: source.path.clone(),
            source: err,
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use seek_dsl::{DslError, WeightedField};

    use super::*;
    use crate::parse::parse_config_str;

    fn parsed(path: &str, toml: &str) -> ParsedConfig {
        ParsedConfig {
            path: PathBuf::from(path),
            config: parse_config_str(toml, Path::new(path)).unwrap(),
        }
    }

    #[test]
    fn empty_list_is_default() {
        let config = merge_configs(&[]).unwrap();
        assert_eq!(config.query.default_field, "");
        assert_eq!(config.query.default_operator, DefaultOperator::And);
        assert_eq!(config.fields.search, SearchFields::default());
        assert!(config.config_root.is_none());
        assert!(config.sources.is_empty());
    }

    #[test]
    fn single_file() {
        let config = merge_configs(&[parsed(
            "/project/.seek.toml",
            "[query]\ndefault_field = \"body\"\ndefault_operator = \"OR\"\n",
        )])
        .unwrap();
        assert_eq!(config.query.default_field, "body");
        assert_eq!(config.query.default_operator, DefaultOperator::Or);
        assert_eq!(config.config_root, Some(PathBuf::from("/project")));
    }

    #[test]
    fn closest_scalar_wins() {
        let config = merge_configs(&[
            parsed("/a/b/.seek.toml", "[query]\ndefault_operator = \"or\"\n"),
            parsed(
                "/a/.seek.toml",
                "[query]\ndefault_field = \"title\"\ndefault_operator = \"and\"\n",
            ),
        ])
        .unwrap();
        assert_eq!(config.query.default_operator, DefaultOperator::Or);
        assert_eq!(config.query.default_field, "title");
        assert_eq!(config.config_root, Some(PathBuf::from("/a/b")));
        assert_eq!(config.sources.len(), 2);
    }

    #[test]
    fn field_list_replaced_whole() {
        let config = merge_configs(&[
            parsed("/a/b/.seek.toml", "[fields]\nsearch = \"body\"\n"),
            parsed("/a/.seek.toml", "[fields]\nsearch = [\"title^2\", \"tags\"]\n"),
        ])
        .unwrap();
        assert_eq!(
            config.fields.search.as_slice(),
            &[WeightedField::unweighted("body")]
        );
    }

    #[test]
    fn all_alias_normalized() {
        let config = merge_configs(&[parsed(
            "/a/.seek.toml",
            "[query]\ndefault_field = \"<all>\"\n",
        )])
        .unwrap();
        assert_eq!(config.query.default_field, "");
    }

    #[test]
    fn invalid_operator_reports_file() {
        let err = merge_configs(&[parsed(
            "/a/.seek.toml",
            "[query]\ndefault_operator = \"xor\"\n",
        )])
        .unwrap_err();
        match err {
            ConfigError::InvalidOperator { path, .. } => {
                assert_eq!(path, PathBuf::from("/a/.seek.toml"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn invalid_fields_report_file() {
        let err = merge_configs(&[parsed("/a/.seek.toml", "[fields]\nsearch = []\n")])
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidFields {
                source: DslError::EmptyFieldList,
                ..
            }
        ));

        let err = merge_configs(&[parsed("/a/.seek.toml", "[fields]\nsearch = \"title^x\"\n")])
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidFields {
                source: DslError::InvalidWeight { .. },
                ..
            }
        ));
    }
}
