//! Implementation of `seek parse`.

use std::process::ExitCode;

use crate::cli::{args::ParseCommand, context::CommandContext, output::print_query};

/// Compiles the queries and prints the structured query.
///
/// Several queries are alternatives; each is compiled on its own.
pub fn run(ctx: &CommandContext, cmd: &ParseCommand) -> ExitCode {
    let compiler = ctx.compiler(&cmd.query);
    let query = compiler.compile_any(cmd.query.queries.as_slice());
    print_query(query.as_ref(), cmd.compact)
}
