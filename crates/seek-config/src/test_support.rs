//! Scratch directory trees for seek-config unit tests.

use std::{
    fs,
    path::{Path, PathBuf},
};

use tempfile::TempDir;

use crate::discovery::CONFIG_FILENAME;

/// A throwaway directory tree that `.seek.toml` files are written into.
pub struct ConfigTree {
    /// Removed when the tree is dropped.
    dir: TempDir,
}

impl ConfigTree {
    /// Empty tree.
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    /// Top of the tree.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// `rel` under the top, created along with its parents. `""` is the top itself.
    pub fn dir(&self, rel: &str) -> PathBuf {
        let path = self.dir.path().join(rel);
        fs::create_dir_all(&path).unwrap();
        path
    }

    /// Writes `body` as the `.seek.toml` of `rel` and returns the file path.
    pub fn config_with(&self, rel: &str, body: &str) -> PathBuf {
        let file = self.dir(rel).join(CONFIG_FILENAME);
        fs::write(&file, body).unwrap();
        file
    }

    /// Config file holding only a comment.
    pub fn config(&self, rel: &str) -> PathBuf {
        self.config_with(rel, &format!("# {rel}\n"))
    }

    /// Config file that stops upward discovery.
    pub fn root_config(&self, rel: &str) -> PathBuf {
        self.config_with(rel, "root = true\n")
    }

    /// Config file setting only the `[query]` table.
    pub fn query_config(&self, rel: &str, default_field: &str, operator: &str) -> PathBuf {
        self.config_with(
            rel,
            &format!("[query]\ndefault_field = \"{default_field}\"\ndefault_operator = \"{operator}\"\n"),
        )
    }
}
