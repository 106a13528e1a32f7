//! Configuration file discovery.
//!
//! Collects `.seek.toml` files from the working directory and its ancestors, then the global
//! `~/.seek.toml`.

use std::path::{Path, PathBuf};

use directories::BaseDirs;
use tracing::trace;

use crate::parse::is_root_config;

/// The configuration filename.
pub const CONFIG_FILENAME: &str = ".seek.toml";

/// Discovers all configuration files relevant to the given directory.
///
/// Returns paths in precedence order: closest to `cwd` first, global (`~/.seek.toml`) last.
/// Discovery stops at the first file with `root = true`; the global file is then skipped too.
///
/// Returns an empty vector if no configuration files are found.
pub fn discover_config_files(cwd: &Path) -> Vec<PathBuf> {
    discover_with_global(cwd, global_config_path().as_deref())
}

/// Discovery with an explicit global config location.
fn discover_with_global(cwd: &Path, global: Option<&Path>) -> Vec<PathBuf> {
    let mut configs = Vec::new();

    for dir in cwd.ancestors() {
        let candidate = dir.join(CONFIG_FILENAME);
        if !candidate.is_file() {
            continue;
        }
        let is_root = is_root_config(&candidate);
        trace!(path = %candidate.display(), is_root, "found config file");
        configs.push(candidate);
        if is_root {
            return configs;
        }
    }

    if let Some(global) = global
        && global.is_file()
        && !configs.iter().any(|path| path == global)
    {
        configs.push(global.to_path_buf());
    }

    configs
}

/// Returns the path to the global configuration file (`~/.seek.toml`).
///
/// Returns `None` if the home directory cannot be determined.
pub fn global_config_path() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().join(CONFIG_FILENAME))
}

/// Checks if a path is the global configuration file.
pub fn is_global_config(path: &Path) -> bool {
    global_config_path().is_some_and(|global| path == global)
}
