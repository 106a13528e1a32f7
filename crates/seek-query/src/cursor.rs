//! Token stream cursor.
//!
//! An immutable position in a token sequence. Grammar rules take a cursor and return the
//! cursor just past whatever they consumed, so lookahead never needs backtracking or shared
//! mutable state.

use crate::lexer::Token;

/// The token returned for positions past the end of the sequence.
static END: Token = Token::End;

/// A position in a token sequence.
#[derive(Debug, Clone, Copy)]
pub struct Cursor<'t> {
    /// The full token sequence.
    tokens: &'t [Token],
    /// Index of the current token.
    position: usize,
}

impl<'t> Cursor<'t> {
    /// Creates a cursor at the start of `tokens`.
    pub fn new(tokens: &'t [Token]) -> Self {
        Self {
            tokens,
            position: 0,
        }
    }

    /// Returns the index of the current token.
    pub fn position(self) -> usize {
        self.position
    }

    /// Returns the current token, or `End` past the end of the sequence.
    pub fn current(self) -> &'t Token {
        self.tokens.get(self.position).unwrap_or(&END)
    }

    /// Returns the token after the current one.
    pub fn lookahead(self) -> &'t Token {
        self.tokens.get(self.position + 1).unwrap_or(&END)
    }

    /// Returns the token before the current one, if any.
    pub fn previous(self) -> Option<&'t Token> {
        self.position
            .checked_sub(1)
            .and_then(|idx| self.tokens.get(idx))
    }

    /// Returns true if the current token is `End`.
    pub fn at_end(self) -> bool {
        matches!(self.current(), Token::End)
    }

    /// Returns a cursor one token further along. `End` is never stepped past.
    #[must_use]
    pub fn advance(self) -> Self {
        if self.at_end() {
            return self;
        }
        Self {
            position: self.position + 1,
            ..self
        }
    }
}
