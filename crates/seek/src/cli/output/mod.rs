//! Rendering and JSON serialization for CLI output.

use std::process::ExitCode;

use comfy_table::{Cell, Table, presets::UTF8_FULL_CONDENSED};
use seek_query::Token;
use serde::Serialize;
use serde_json::Value;

/// JSON output for a single token.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct JsonToken<'a> {
    /// Position in the token sequence.
    pub index: usize,
    /// Token kind name.
    pub kind: String,
    /// Lexeme carried by the token, omitted when empty.
    #[serde(skip_serializing_if = "str::is_empty")]
    pub text: &'a str,
}

impl<'a> JsonToken<'a> {
    /// Describes the token at `index`.
    pub fn new(index: usize, token: &'a Token) -> Self {
        Self {
            index,
            kind: token.kind().to_string(),
            text: token.text(),
        }
    }
}

/// Serializes a value and prints it to stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T, compact: bool) -> ExitCode {
    let rendered = if compact {
        serde_json::to_string(value)
    } else {
        serde_json::to_string_pretty(value)
    };
    match rendered {
        Ok(json_str) => {
            println!("{json_str}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to serialize JSON: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Prints a compiled query, or `null` when the query has no clauses.
pub fn print_query(query: Option<&Value>, compact: bool) -> ExitCode {
    print_json(&query.unwrap_or(&Value::Null), compact)
}

/// Builds a table listing each token with its kind and text.
pub fn token_table(tokens: &[Token]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["#", "Kind", "Text"]);
    for (index, token) in tokens.iter().enumerate() {
        table.add_row(vec![
            Cell::new(index),
            Cell::new(token.kind()),
            Cell::new(token.text()),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use seek_query::tokenize;

    use super::*;

    #[test]
    fn json_token_omits_empty_text() {
        let tokens = tokenize("title:(rust");
        let records: Vec<_> = tokens
            .iter()
            .enumerate()
            .map(|(i, t)| serde_json::to_value(JsonToken::new(i, t)).unwrap())
            .collect();

        assert_eq!(
            records[0],
            serde_json::json!({"index": 0, "kind": "Field", "text": "title"})
        );
        assert_eq!(
            records[1],
            serde_json::json!({"index": 1, "kind": "OpenParen"})
        );
    }

    #[test]
    fn token_table_has_row_per_token() {
        let tokens = tokenize("rust OR go");
        let rendered = token_table(&tokens).to_string();
        assert!(rendered.contains("Term"));
        assert!(rendered.contains("Or"));
        assert!(rendered.contains("rust"));
        assert!(rendered.contains("End"));
    }
}
