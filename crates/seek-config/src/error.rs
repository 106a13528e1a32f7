//! Failures raised while reading, merging or writing `.seek.toml` files.

use std::{io, path::PathBuf};

use seek_dsl::DslError;
use seek_query::QueryError;
use thiserror::Error;
use toml::{de, ser};

/// Everything that can go wrong between a `.seek.toml` on disk and a [`crate::Config`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A discovered or named config file could not be opened.
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        /// Offending file.
        path: PathBuf,
        /// OS-level cause.
        source: io::Error,
    },

    /// The file is not TOML, or a known key holds the wrong type.
    #[error("failed to parse config file {path}: {source}")]
    ParseToml {
        /// Offending file.
        path: PathBuf,
        /// Position and reason reported by the TOML reader.
        source: de::Error,
    },

    /// `query.default_operator` is not a known operator.
    #[error("invalid default operator in {path}: {source}")]
    InvalidOperator {
        /// File whose `[query]` table holds the bad name.
        path: PathBuf,
        /// Rejected operator name.
        source: QueryError,
    },

    /// `fields.search` is empty or contains a malformed field spec.
    #[error("invalid search fields in {path}: {source}")]
    InvalidFields {
        /// File whose `[fields]` table holds the bad list.
        path: PathBuf,
        /// First spec that failed.
        source: DslError,
    },

    /// Effective settings could not be rendered for `seek config`.
    #[error("failed to serialize settings: {0}")]
    SerializeToml(#[source] ser::Error),

    /// `seek init` could not create its file.
    #[error("failed to write config file {path}: {source}")]
    WriteFile {
        /// Target file.
        path: PathBuf,
        /// OS-level cause.
        source: io::Error,
    },

    /// `--global` was requested but there is no home directory to hold `~/.seek.toml`.
    #[error("could not determine home directory")]
    NoHomeDirectory,
}
