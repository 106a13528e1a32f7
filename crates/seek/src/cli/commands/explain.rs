//! Implementation of `seek explain`.

use std::process::ExitCode;

use seek_query::{AstBuilder, parse_any_with};

use crate::cli::{args::ExplainCommand, context::CommandContext};

/// Printed when a query has no clauses.
const EMPTY_QUERY: &str = "(empty query)";

/// Prints the infix explanation of the queries, and optionally the parsed tree.
pub fn run(ctx: &CommandContext, cmd: &ExplainCommand) -> ExitCode {
    let compiler = ctx.compiler(&cmd.query);
    let queries = cmd.query.queries.as_slice();

    let explanation = compiler.explain_any(queries);
    if explanation.is_empty() {
        println!("{EMPTY_QUERY}");
    } else {
        println!("{explanation}");
    }

    if cmd.tree
        && let Some(tree) = parse_any_with(
            &AstBuilder,
            queries,
            compiler.default_field(),
            compiler.operator(),
        )
    {
        println!();
        print!("{tree}");
    }

    ExitCode::SUCCESS
}
