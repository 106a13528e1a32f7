//! Implementation of `seek tokens`.

use std::process::ExitCode;

use seek_query::tokenize;

use crate::cli::{
    args::TokensCommand,
    output::{JsonToken, print_json, token_table},
};

/// Tokenizes a query and prints the token sequence.
pub fn run(cmd: &TokensCommand) -> ExitCode {
    let tokens = tokenize(&cmd.query);

    if cmd.json {
        let records: Vec<_> = tokens
            .iter()
            .enumerate()
            .map(|(index, token)| JsonToken::new(index, token))
            .collect();
        return print_json(&records, false);
    }

    println!("{}", token_table(&tokens));
    ExitCode::SUCCESS
}
