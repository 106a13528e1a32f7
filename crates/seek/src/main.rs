//! Command-line interface for the `seek` query compiler.

use std::process::ExitCode;

use seek::cli::{
    CommandContext,
    args::{Commands, parse_cli},
    commands,
    logging::init_logging,
};

fn main() -> ExitCode {
    let cli = parse_cli();
    init_logging(cli.verbose);

    // Commands that never read settings keep working when a config file is broken
    let ctx = match cli.command {
        Commands::Init(_) | Commands::Tokens(_) => CommandContext::load_cwd_only(),
        _ => CommandContext::load(),
    };
    let ctx = match ctx {
        Ok(ctx) => ctx,
        Err(code) => return code,
    };

    commands::run(cli.command, &ctx)
}
