//! Per-invocation state shared by every subcommand.

use std::{env, fmt::Display, path::PathBuf, process::ExitCode};

use seek_config::Config;
use seek_dsl::QueryCompiler;
use tracing::debug;

use super::args::QueryArgs;

/// Working directory plus the configuration discovered from it.
pub struct CommandContext {
    /// Directory the command was started in.
    pub cwd: PathBuf,
    /// Merged configuration; defaults when no `.seek.toml` applies.
    pub config: Config,
}

impl CommandContext {
    /// Resolves the working directory and loads every applicable config file.
    pub fn load() -> Result<Self, ExitCode> {
        let cwd = env::current_dir().map_err(|e| report("could not determine current directory", e))?;
        let config = Config::load(&cwd).map_err(|e| report("failed to load configuration", e))?;
        debug!(
            sources = config.sources.len(),
            default_field = %config.query.default_field,
            operator = %config.query.default_operator,
            "loaded configuration"
        );
        Ok(Self { cwd, config })
    }

    /// Resolves the working directory only, leaving configuration at its defaults.
    ///
    /// `init` and `tokens` go through here so a broken `.seek.toml` cannot block them.
    pub fn load_cwd_only() -> Result<Self, ExitCode> {
        let cwd = env::current_dir().map_err(|e| report("could not determine current directory", e))?;
        Ok(Self {
            cwd,
            config: Config::default(),
        })
    }

    /// Compiler for `args`, with `--field` and `--operator` taking precedence over config.
    pub fn compiler(&self, args: &QueryArgs) -> QueryCompiler {
        let compiler = self.config.compiler();
        let compiler = match &args.field {
            Some(field) => compiler.with_default_field(field),
            None => compiler,
        };
        match args.operator {
            Some(operator) => compiler.with_operator(operator),
            None => compiler,
        }
    }
}

/// Prints `error: <what>: <err>` and yields the failure exit code.
fn report(what: &str, err: impl Display) -> ExitCode {
    eprintln!("error: {what}: {err}");
    ExitCode::FAILURE
}
