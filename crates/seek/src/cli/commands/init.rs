//! Implementation of `seek init`.

use std::{
    fs,
    path::{Path, PathBuf},
    process::ExitCode,
};

use seek_config::{
    CONFIG_FILENAME, ConfigError, global_config_path, global_template, local_template,
};

use crate::cli::{args::InitCommand, context::CommandContext};

/// Where `seek init` writes, and which template it uses.
struct Target {
    /// Config file to create.
    path: PathBuf,
    /// Whether this is the global `~/.seek.toml`.
    global: bool,
}

impl Target {
    /// Picks the global file for `--global` or when run from the home directory.
    fn resolve(cwd: &Path, force_global: bool) -> Result<Self, ConfigError> {
        let global_path = global_config_path();
        let in_home = global_path
            .as_deref()
            .and_then(Path::parent)
            .is_some_and(|home| home == cwd);

        if force_global || in_home {
            let path = global_path.ok_or(ConfigError::NoHomeDirectory)?;
            return Ok(Self { path, global: true });
        }
        Ok(Self {
            path: cwd.join(CONFIG_FILENAME),
            global: false,
        })
    }

    /// Commented template for this target.
    fn template(&self) -> String {
        if self.global {
            global_template()
        } else {
            local_template()
        }
    }
}

/// Initializes a `.seek.toml` configuration file.
pub fn run(ctx: &CommandContext, cmd: &InitCommand) -> ExitCode {
    let target = match Target::resolve(&ctx.cwd, cmd.global) {
        Ok(target) => target,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    if target.path.exists() && !cmd.force {
        eprintln!(
            "error: configuration file already exists: {}",
            target.path.display()
        );
        eprintln!("use --force to overwrite");
        return ExitCode::FAILURE;
    }

    let template = target.template();
    if let Err(source) = fs::write(&target.path, &template) {
        let err = ConfigError::WriteFile {
            path: target.path,
            source,
        };
        eprintln!("error: {err}");
        return ExitCode::FAILURE;
    }

    println!("Created {}", target.path.display());
    println!();
    println!("Configuration written:");
    for line in template.lines() {
        println!("   {line}");
    }

    ExitCode::SUCCESS
}
