//! Query parser.
//!
//! Parses a token stream by recursive descent, calling into a [`Builder`] for every fragment.
//!
//! # Grammar
//!
//! ```text
//! query      → expression*                       (clause runs, joined by the default operator)
//! expression → ( or_expr | "+" compound | ("-" | "NOT") compound | "*" )*
//! or_expr    → and_expr ("OR" and_expr)*
//! and_expr   → not_expr ("AND" not_expr)*
//! not_expr   → compound ("NOT" compound)*
//! compound   → TERM+ [".." [TERM]] | ".." [TERM] | PHRASE+ SEPARATOR | PREFIX
//!            | FIELD "*" | FIELD compound | "(" expression ")" | "*"
//! ```
//!
//! # Precedence (loosest to tightest)
//!
//! 1. Clause runs (implicit, joined by the default operator)
//! 2. OR
//! 3. AND
//! 4. NOT
//! 5. Compound
//!
//! There is no error state. A token that cannot be used where it appears ends the current rule,
//! and the top level skips it, so every input produces some (possibly empty) result.

use std::{cell::Cell, slice};

use tracing::trace;

use crate::{
    builder::{BoolQuery, Builder, DefaultOperator, normalize_field},
    cursor::Cursor,
    lexer::{MAX_NESTING, Token, tokenize},
};

/// Recursive descent parser driving a [`Builder`].
pub struct Parser<'b, B> {
    /// Sink for query fragments.
    builder: &'b B,
    /// How implicit clause runs are combined.
    operator: DefaultOperator,
    /// Groups currently open.
    depth: Cell<usize>,
}

impl<'b, B: Builder> Parser<'b, B> {
    /// Creates a parser that emits fragments through `builder`.
    pub fn new(builder: &'b B, operator: DefaultOperator) -> Self {
        Self {
            builder,
            operator,
            depth: Cell::new(0),
        }
    }

    /// Parses a query string.
    ///
    /// Returns `None` when the input contains no clauses.
    pub fn parse(&self, input: &str, default_field: &str) -> Option<B::Query> {
        let tokens = tokenize(input);
        self.parse_tokens(&tokens, default_field)
    }

    /// Parses an already tokenized query.
    pub fn parse_tokens(&self, tokens: &[Token], default_field: &str) -> Option<B::Query> {
        let field = normalize_field(default_field);
        let mut cursor = Cursor::new(tokens);
        let mut clauses = Vec::new();

        while !cursor.at_end() {
            let (fragments, next) = self.expression(cursor, field);
            clauses.extend(fragments);
            cursor = if next.position() == cursor.position() {
                trace!(token = ?cursor.current(), position = cursor.position(), "ignoring token");
                next.advance()
            } else {
                next
            };
        }

        trace!(clauses = clauses.len(), operator = %self.operator, "parsed query");
        self.combine(clauses)
    }

    /// Parses one clause run, sorting compounds into default, required and excluded buckets.
    fn expression<'t>(&self, cursor: Cursor<'t>, field: &str) -> (Vec<B::Query>, Cursor<'t>) {
        let mut default = Vec::new();
        let mut required = Vec::new();
        let mut excluded = Vec::new();
        let mut cursor = cursor;

        loop {
            let start = cursor.position();
            match cursor.current() {
                Token::Term(_)
                | Token::Prefix(_)
                | Token::Phrase(_)
                | Token::Field(_)
                | Token::OpenParen
                | Token::Range
                | Token::And
                | Token::Or => {
                    let (query, next) = self.or_expr(cursor, field);
                    default.extend(query);
                    cursor = next;
                }
                Token::Plus => {
                    let (query, next) = self.compound(cursor.advance(), field);
                    match self.operator {
                        DefaultOperator::And => default.extend(query),
                        DefaultOperator::Or => required.extend(query),
                    }
                    cursor = next;
                }
                Token::Minus | Token::Not => {
                    let (query, next) = self.compound(cursor.advance(), field);
                    excluded.extend(query);
                    cursor = next;
                }
                Token::Star => {
                    let (query, next) = self.compound(cursor, field);
                    default.extend(query);
                    cursor = next;
                }
                _ => break,
            }
            if cursor.position() == start {
                break;
            }
        }

        (self.fold(default, required, excluded), cursor)
    }

    /// Folds the buckets of a clause run into the fragments it contributes.
    ///
    /// Without required or excluded clauses the default clauses are returned as they are, to be
    /// joined with the surrounding clauses.
    fn fold(
        &self,
        default: Vec<B::Query>,
        required: Vec<B::Query>,
        excluded: Vec<B::Query>,
    ) -> Vec<B::Query> {
        if required.is_empty() && excluded.is_empty() {
            return default;
        }

        let query = match self.operator {
            DefaultOperator::And => BoolQuery::must(default).with_must_not(excluded),
            DefaultOperator::Or => BoolQuery {
                should: default,
                must: required,
                must_not: excluded,
            },
        };
        vec![self.builder.boolean(query)]
    }

    /// Parses: or_expr → and_expr ("OR" and_expr)*
    fn or_expr<'t>(&self, cursor: Cursor<'t>, field: &str) -> (Option<B::Query>, Cursor<'t>) {
        let (first, mut cursor) = self.and_expr(cursor, field);
        let mut alternatives: Vec<B::Query> = first.into_iter().collect();

        while matches!(cursor.current(), Token::Or) {
            let (query, next) = self.and_expr(cursor.advance(), field);
            alternatives.extend(query);
            cursor = next;
        }

        (self.join(alternatives, BoolQuery::should), cursor)
    }

    /// Parses: and_expr → not_expr ("AND" not_expr)*
    fn and_expr<'t>(&self, cursor: Cursor<'t>, field: &str) -> (Option<B::Query>, Cursor<'t>) {
        let (first, mut cursor) = self.not_expr(cursor, field);
        let mut conjuncts: Vec<B::Query> = first.into_iter().collect();

        while matches!(cursor.current(), Token::And) {
            let (query, next) = self.not_expr(cursor.advance(), field);
            conjuncts.extend(query);
            cursor = next;
        }

        (self.join(conjuncts, BoolQuery::must), cursor)
    }

    /// Parses: not_expr → compound ("NOT" compound)*
    fn not_expr<'t>(&self, cursor: Cursor<'t>, field: &str) -> (Option<B::Query>, Cursor<'t>) {
        let (leading, mut cursor) = self.compound(cursor, field);
        let mut negated = Vec::new();

        while matches!(cursor.current(), Token::Not) {
            let (query, next) = self.compound(cursor.advance(), field);
            negated.extend(query);
            cursor = next;
        }

        if negated.is_empty() {
            return (leading, cursor);
        }

        let query = BoolQuery::must(leading.into_iter().collect()).with_must_not(negated);
        (Some(self.builder.boolean(query)), cursor)
    }

    /// Parses a single compound: a term run, range, phrase, prefix, field scope, group or `*`.
    fn compound<'t>(&self, cursor: Cursor<'t>, field: &str) -> (Option<B::Query>, Cursor<'t>) {
        match cursor.current() {
            Token::Term(_) | Token::And | Token::Or => self.term_run(cursor, field),
            Token::Range => self.range(cursor, field, None),
            Token::Phrase(_) => self.phrase(cursor, field),
            Token::Prefix(prefix) => (Some(self.builder.prefix(field, prefix)), cursor.advance()),
            Token::Field(_) => self.scoped(cursor, field),
            Token::OpenParen => {
                let depth = self.depth.get();
                if depth >= MAX_NESTING {
                    trace!(position = cursor.position(), "group nested too deeply");
                    return (None, cursor);
                }
                self.depth.set(depth + 1);
                let (fragments, cursor) = self.expression(cursor.advance(), field);
                self.depth.set(depth);
                let cursor = if matches!(cursor.current(), Token::CloseParen) {
                    cursor.advance()
                } else {
                    cursor
                };
                (self.combine(fragments), cursor)
            }
            Token::Star => (Some(self.builder.all()), cursor.advance()),
            _ => (None, cursor),
        }
    }

    /// Parses a run of field prefixes and the compound they scope. The last prefix wins.
    fn scoped<'t>(&self, cursor: Cursor<'t>, field: &str) -> (Option<B::Query>, Cursor<'t>) {
        let mut cursor = cursor;
        let mut scope = field;
        while let Token::Field(name) = cursor.current() {
            if matches!(cursor.lookahead(), Token::Star) {
                return (Some(self.builder.exists(name)), cursor.advance().advance());
            }
            scope = name.as_str();
            cursor = cursor.advance();
        }
        self.compound(cursor, scope)
    }

    /// Parses consecutive terms, optionally ending in a range whose start is the last term.
    ///
    /// A leading `AND` or `OR` is taken as a literal word.
    fn term_run<'t>(&self, cursor: Cursor<'t>, field: &str) -> (Option<B::Query>, Cursor<'t>) {
        let mut cursor = cursor;
        let mut terms = Vec::new();

        if matches!(cursor.current(), Token::And | Token::Or) {
            terms.push(cursor.current().text().to_string());
            cursor = cursor.advance();
        }
        while let Token::Term(text) = cursor.current() {
            terms.push(text.clone());
            cursor = cursor.advance();
        }

        if !matches!(cursor.current(), Token::Range) {
            return (self.terms(field, &terms), cursor);
        }

        let start = terms.pop();
        let (range, cursor) = self.range(cursor, field, start.as_deref());
        let rest = self.terms(field, &terms);
        (self.combine(range.into_iter().chain(rest).collect()), cursor)
    }

    /// Parses a range operator and its optional end bound. The cursor is on the `..` token.
    fn range<'t>(
        &self,
        cursor: Cursor<'t>,
        field: &str,
        start: Option<&str>,
    ) -> (Option<B::Query>, Cursor<'t>) {
        let cursor = cursor.advance();
        let (end, cursor) = match cursor.current() {
            Token::Term(text) => (Some(text.as_str()), cursor.advance()),
            _ => (None, cursor),
        };
        (Some(self.builder.range(field, start, end)), cursor)
    }

    /// Parses the words of a quoted phrase and its trailing separator.
    fn phrase<'t>(&self, cursor: Cursor<'t>, field: &str) -> (Option<B::Query>, Cursor<'t>) {
        let mut cursor = cursor;
        let mut terms = Vec::new();

        while let Token::Phrase(text) = cursor.current() {
            terms.push(text.clone());
            cursor = cursor.advance();
        }
        if matches!(cursor.current(), Token::Separator) {
            cursor = cursor.advance();
        }

        (Some(self.builder.phrase(field, &terms)), cursor)
    }

    /// Builds the match for a run of terms.
    ///
    /// Under `And` the run is a single conjunctive match; under `Or` each word is its own
    /// alternative.
    fn terms(&self, field: &str, terms: &[String]) -> Option<B::Query> {
        match (self.operator, terms) {
            (_, []) => None,
            (DefaultOperator::And, _) | (DefaultOperator::Or, [_]) => {
                Some(self.builder.match_terms(field, terms))
            }
            (DefaultOperator::Or, _) => {
                let alternatives = terms
                    .iter()
                    .map(|term| self.builder.match_terms(field, slice::from_ref(term)))
                    .collect();
                Some(self.builder.boolean(BoolQuery::should(alternatives)))
            }
        }
    }

    /// Joins fragments with the default operator.
    fn combine(&self, fragments: Vec<B::Query>) -> Option<B::Query> {
        match self.operator {
            DefaultOperator::And => self.join(fragments, BoolQuery::must),
            DefaultOperator::Or => self.join(fragments, BoolQuery::should),
        }
    }

    /// Returns the single fragment unwrapped, or composes two or more with `compose`.
    fn join(
        &self,
        mut fragments: Vec<B::Query>,
        compose: fn(Vec<B::Query>) -> BoolQuery<B::Query>,
    ) -> Option<B::Query> {
        match fragments.len() {
            0 => None,
            1 => fragments.pop(),
            _ => Some(self.builder.boolean(compose(fragments))),
        }
    }
}

/// Parses a query string with the given builder.
///
/// Returns `None` for queries without clauses. Never fails.
pub fn parse_with<B: Builder>(
    builder: &B,
    input: &str,
    default_field: &str,
    operator: DefaultOperator,
) -> Option<B::Query> {
    Parser::new(builder, operator).parse(input, default_field)
}

/// Parses several query strings independently and offers them as alternatives.
///
/// Each input is tokenized on its own, so an unbalanced quote or parenthesis in one cannot reach
/// into the next. A single non-empty result is returned as is.
pub fn parse_any_with<B: Builder, S: AsRef<str>>(
    builder: &B,
    inputs: &[S],
    default_field: &str,
    operator: DefaultOperator,
) -> Option<B::Query> {
    let parser = Parser::new(builder, operator);
    let mut alternatives: Vec<B::Query> = inputs
        .iter()
        .filter_map(|input| parser.parse(input.as_ref(), default_field))
        .collect();
    match alternatives.len() {
        0 | 1 => alternatives.pop(),
        _ => Some(builder.boolean(BoolQuery::should(alternatives))),
    }
}
