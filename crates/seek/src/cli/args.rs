//! Clap argument definitions for the `seek` CLI.

use std::{env, process::exit};

use clap::{ArgAction, Args, CommandFactory, Parser, Subcommand, error::ErrorKind};
use seek_query::DefaultOperator;

/// Parse a default operator from a string.
fn parse_operator(s: &str) -> Result<DefaultOperator, String> {
    s.parse::<DefaultOperator>().map_err(|e| e.to_string())
}

/// Top-level CLI options.
#[derive(Parser)]
#[command(name = "seek")]
#[command(about = "Compile search-box queries into structured search queries")]
pub struct Cli {
    /// Log verbosity (-v for debug, -vv for trace); overrides SEEK_LOG
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Query input and compilation overrides shared by `parse` and `explain`.
#[derive(Args, Debug, Clone)]
pub struct QueryArgs {
    /// Queries to compile (several are alternatives, each parsed on its own)
    #[arg(required = true, allow_hyphen_values = true)]
    pub queries: Vec<String>,

    /// Field for words without a field prefix; "<all>" for the search field list [default: from config]
    #[arg(short = 'f', long)]
    pub field: Option<String>,

    /// How clauses without an explicit AND / OR combine: and, or [default: from config]
    #[arg(short = 'o', long, value_parser = parse_operator)]
    pub operator: Option<DefaultOperator>,
}

/// Arguments for `seek parse`.
#[derive(Args, Debug, Clone)]
pub struct ParseCommand {
    #[command(flatten)]
    /// Query input and overrides.
    pub query: QueryArgs,

    /// Print the query on a single line
    #[arg(long)]
    pub compact: bool,
}

/// Arguments for `seek explain`.
#[derive(Args, Debug, Clone)]
pub struct ExplainCommand {
    #[command(flatten)]
    /// Query input and overrides.
    pub query: QueryArgs,

    /// Also print the parsed query tree
    #[arg(long)]
    pub tree: bool,
}

/// Arguments for `seek tokens`.
#[derive(Args, Debug, Clone)]
pub struct TokensCommand {
    /// Query to tokenize
    pub query: String,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `seek init`.
#[derive(Args, Debug, Clone)]
pub struct InitCommand {
    /// Create global ~/.seek.toml instead
    #[arg(long)]
    pub global: bool,

    /// Overwrite existing configuration file
    #[arg(long)]
    pub force: bool,
}

/// Query syntax summary shown after `parse` and `explain` help.
const QUERY_SYNTAX: &str = "\
QUERY SYNTAX:
  term              Term must appear
  term1 term2       Both terms (implicit AND, or OR with -o or)
  \"phrase\"          Exact phrase match
  pre*              Prefix match
  -term, NOT term   Term must NOT appear (put -- first if it clashes with a flag)
  +term             Term is required
  term1 OR term2    Either term
  term1 AND term2   Both terms
  (expr)            Grouping
  a..b, ..b         Inclusive range
  *                 Match everything

FIELD QUERIES:
  title:term        Search in one field only
  title:(a b)       Scope a group to a field
  title:*           Field must exist

EXAMPLES:
  seek parse rust async
  seek parse '\"error handling\"'
  seek explain 'rust -deprecated'
  seek explain -draft
  seek explain -- -old
  seek explain -o or 'rust golang +async'
  seek parse 'title:guide (rust OR golang)'
  seek parse 'date:2020..2024 release'";

/// Supported `seek` subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Compile queries and print the structured query as JSON
    #[command(after_help = QUERY_SYNTAX)]
    Parse(ParseCommand),

    /// Print a compact infix rendering of how queries are understood
    #[command(after_help = QUERY_SYNTAX)]
    Explain(ExplainCommand),

    /// Show the tokens a query is split into
    Tokens(TokensCommand),

    /// Show effective configuration settings
    Config,

    /// Validate configuration and diagnose issues
    Check,

    /// Initialize seek configuration in current directory
    Init(InitCommand),
}

/// Parses CLI arguments, printing a compact command list for top-level `--help`.
pub fn parse_cli() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            if e.kind() == ErrorKind::DisplayHelp {
                let args: Vec<_> = env::args().collect();
                if args.len() <= 2 {
                    print_command_help();
                    exit(0);
                }
            }
            e.exit();
        }
    }
}

/// Prints custom help listing every subcommand on one line.
fn print_command_help() {
    let cmd = Cli::command();
    let about = cmd.get_about().map(|s| s.to_string()).unwrap_or_default();

    println!("{about}");
    println!();
    println!("Usage: seek [OPTIONS] <COMMAND>");
    println!();
    println!("Commands:");

    for sub in cmd.get_subcommands() {
        let name = sub.get_name();
        if name == "help" {
            continue;
        }
        let about = sub.get_about().map(|s| s.to_string()).unwrap_or_default();
        println!("  {name:10} {about}");
    }

    println!(
        "  {:<10} Print this message or the help of the given subcommand(s)",
        "help"
    );
    println!();
    println!("Options:");
    println!("  -v, --verbose...  Increase log verbosity");
    println!("  -h, --help        Print help");
}
