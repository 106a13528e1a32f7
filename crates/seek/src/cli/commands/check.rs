//! Implementation of `seek check`.

use std::process::ExitCode;

use seek_config::ConfigWarning;

use crate::cli::context::CommandContext;

/// Shows configuration files, effective query settings and validation warnings.
///
/// Exits with failure when the configuration has warnings.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let config = &ctx.config;

    if config.sources.is_empty() {
        println!("No configuration files found.");
        println!();
        println!("Run 'seek init' to create a configuration file.");
        return ExitCode::SUCCESS;
    }

    println!("Config files:");
    for path in &config.sources {
        println!("   {}", path.display());
    }
    println!();

    let default_field = if config.query.default_field.is_empty() {
        "(all search fields)"
    } else {
        config.query.default_field.as_str()
    };
    println!("Query:");
    println!("   default field:    {default_field}");
    println!("   default operator: {}", config.query.default_operator);
    println!("   search fields:    {}", config.fields.search.specs().join(", "));
    println!();

    let warnings = config.validate();
    if warnings.is_empty() {
        println!("No issues found.");
        return ExitCode::SUCCESS;
    }

    println!("Warnings ({}):", warnings.len());
    for w in &warnings {
        println!("   - {w}");
    }
    println!();

    print_hints(&warnings);

    ExitCode::FAILURE
}

/// Prints hints for resolving common warnings.
fn print_hints(warnings: &[ConfigWarning]) {
    let mut hints: Vec<_> = warnings
        .iter()
        .map(|w| match w {
            ConfigWarning::DefaultFieldNotSearched { .. } => {
                "Hint: add the default field to [fields] search, or set default_field = \"\""
            }
            ConfigWarning::DuplicateSearchField { .. } => {
                "Hint: list each field once in [fields] search"
            }
            ConfigWarning::UnaddressableField { .. } => {
                "Hint: field names typed in queries must match [a-z_][a-z0-9._-]+"
            }
        })
        .collect();
    hints.sort_unstable();
    hints.dedup();

    for hint in hints {
        println!("{hint}");
    }
}
