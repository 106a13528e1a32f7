//! Query lexer (tokenizer).
//!
//! Converts a search-box string into a stream of tokens for the parser. Tokenizing never fails:
//! characters that cannot start a token are skipped one at a time, a `)` without a matching `(`
//! is dropped, nesting deeper than [`MAX_NESTING`] is flattened, and parentheses still open at the end of input are closed automatically.

use std::{fmt, iter};

use tracing::{debug, trace};

/// The literal range operator.
const RANGE: &str = "..";

/// Deepest parenthesis nesting that is tokenized; `(` beyond it is dropped with its `)`.
pub const MAX_NESTING: usize = 64;

/// Boolean keywords, matched case-sensitively as whole words.
const KEYWORDS: [(&str, Token); 3] = [("AND", Token::And), ("OR", Token::Or), ("NOT", Token::Not)];

/// A token in the query language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// End of input. Always the last token of a sequence.
    End,

    /// Phrase boundary marker emitted after the words of a quoted phrase.
    Separator,

    /// A bare word.
    Term(String),

    /// One word of a quoted phrase.
    Phrase(String),

    /// Field prefix (e.g., "title:" produces Field("title")).
    Field(String),

    /// Left parenthesis.
    OpenParen,

    /// Right parenthesis.
    CloseParen,

    /// Required prefix (+).
    Plus,

    /// Excluded prefix (-).
    Minus,

    /// The AND keyword.
    And,

    /// The OR keyword.
    Or,

    /// The NOT keyword.
    Not,

    /// A lone `*`, at the start of the query or right after a field prefix.
    Star,

    /// A word truncated by a trailing `*` (the `*` is stripped).
    Prefix(String),

    /// The `..` range operator.
    Range,
}

/// The kind of a [`Token`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// See [`Token::End`].
    End,
    /// See [`Token::Separator`].
    Separator,
    /// See [`Token::Term`].
    Term,
    /// See [`Token::Phrase`].
    Phrase,
    /// See [`Token::Field`].
    Field,
    /// See [`Token::OpenParen`].
    OpenParen,
    /// See [`Token::CloseParen`].
    CloseParen,
    /// See [`Token::Plus`].
    Plus,
    /// See [`Token::Minus`].
    Minus,
    /// See [`Token::And`].
    And,
    /// See [`Token::Or`].
    Or,
    /// See [`Token::Not`].
    Not,
    /// See [`Token::Star`].
    Star,
    /// See [`Token::Prefix`].
    Prefix,
    /// See [`Token::Range`].
    Range,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl Token {
    /// Returns the kind of this token.
    pub fn kind(&self) -> TokenKind {
        match self {
            Self::End => TokenKind::End,
            Self::Separator => TokenKind::Separator,
            Self::Term(_) => TokenKind::Term,
            Self::Phrase(_) => TokenKind::Phrase,
            Self::Field(_) => TokenKind::Field,
            Self::OpenParen => TokenKind::OpenParen,
            Self::CloseParen => TokenKind::CloseParen,
            Self::Plus => TokenKind::Plus,
            Self::Minus => TokenKind::Minus,
            Self::And => TokenKind::And,
            Self::Or => TokenKind::Or,
            Self::Not => TokenKind::Not,
            Self::Star => TokenKind::Star,
            Self::Prefix(_) => TokenKind::Prefix,
            Self::Range => TokenKind::Range,
        }
    }

    /// Returns the lexeme carried by this token.
    ///
    /// Words and field names return their text, keywords return the keyword itself, `Range`
    /// returns `..`, and punctuation tokens return an empty string.
    pub fn text(&self) -> &str {
        match self {
            Self::Term(text) | Self::Phrase(text) | Self::Field(text) | Self::Prefix(text) => text,
            Self::And => "AND",
            Self::Or => "OR",
            Self::Not => "NOT",
            Self::Range => RANGE,
            _ => "",
        }
    }
}

/// Returns true for characters that may start or continue a word.
fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

/// Returns true for punctuation allowed inside, but never at the start of, a word.
///
/// Covers contractions (`don't`), dotted acronyms (`U.S.A`), `AT&T`, `C++`, hyphenated words and
/// the trailing `*` of a prefix.
fn is_word_joiner(ch: char) -> bool {
    matches!(ch, '\'' | '.' | '&' | '*' | '+' | '-')
}

/// Returns the byte length of the word at the start of `text`, or 0 if there is none.
///
/// A word never swallows a `..` range operator.
fn word_len(text: &str) -> usize {
    let mut chars = text.char_indices();
    let Some((_, first)) = chars.next() else {
        return 0;
    };
    if !is_word_char(first) {
        return 0;
    }

    let mut end = first.len_utf8();
    for (idx, ch) in chars {
        if ch == '.' && text[idx + 1..].starts_with('.') {
            break;
        }
        if !is_word_char(ch) && !is_word_joiner(ch) {
            break;
        }
        end = idx + ch.len_utf8();
    }
    end
}

/// Returns the byte length of a field name at the start of `text` if it is directly followed by
/// a colon.
///
/// Field names match `[a-z_][a-z0-9._-]+` and are ASCII-only.
fn field_len(text: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    let first = *bytes.first()?;
    if !(first.is_ascii_lowercase() || first == b'_') {
        return None;
    }

    let mut end = 1;
    while let Some(&b) = bytes.get(end) {
        if b == b'.' && bytes.get(end + 1) == Some(&b'.') {
            break;
        }
        if !(b.is_ascii_lowercase() || b.is_ascii_digit() || matches!(b, b'.' | b'_' | b'-')) {
            break;
        }
        end += 1;
    }

    (end >= 2 && bytes.get(end) == Some(&b':')).then_some(end)
}

/// Returns true if `name` can be written as a `name:` field prefix in a query.
pub fn is_field_name(name: &str) -> bool {
    field_len(&format!("{name}:")) == Some(name.len())
}

/// Matches a boolean keyword at the start of `text`, returning the token and its length.
fn keyword(text: &str) -> Option<(Token, usize)> {
    KEYWORDS.iter().find_map(|(word, token)| {
        let rest = text.strip_prefix(word)?;
        (!rest.starts_with(is_word_char)).then(|| (token.clone(), word.len()))
    })
}

/// Splits `text` into words using the same rules as bare terms.
fn words(text: &str) -> Vec<&str> {
    let mut words = Vec::new();
    let mut position = 0;
    while let Some(ch) = text[position..].chars().next() {
        let len = word_len(&text[position..]);
        if len == 0 {
            position += ch.len_utf8();
        } else {
            words.push(&text[position..position + len]);
            position += len;
        }
    }
    words
}

/// Tokenizes a query string.
struct Lexer<'a> {
    /// The original input string.
    input: &'a str,
    /// Current byte position in input.
    position: usize,
    /// Tokens emitted so far.
    tokens: Vec<Token>,
    /// Number of `(` not yet matched by a `)`.
    open_parens: usize,
    /// Number of dropped `(` past [`MAX_NESTING`] not yet matched by a `)`.
    dropped_parens: usize,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input.
    fn new(input: &'a str) -> Self {
        Self {
            input,
            position: 0,
            tokens: Vec::new(),
            open_parens: 0,
            dropped_parens: 0,
        }
    }

    /// Tokenizes the entire input, closing any open parentheses and appending `End`.
    fn tokenize(mut self) -> Vec<Token> {
        while let Some(ch) = self.peek() {
            self.step(ch);
        }

        let unclosed = self.open_parens;
        self.tokens.extend(iter::repeat_n(Token::CloseParen, unclosed));
        self.tokens.push(Token::End);

        debug!(
            tokens = self.tokens.len(),
            unclosed_parens = unclosed,
            "tokenized query"
        );
        self.tokens
    }

    /// Consumes input starting at `ch`, emitting at most a handful of tokens.
    ///
    /// Always advances by at least one character.
    fn step(&mut self, ch: char) {
        match ch {
            _ if ch.is_whitespace() => self.advance(ch.len_utf8()),
            '(' => {
                self.advance(1);
                if self.open_parens < MAX_NESTING {
                    self.open_parens += 1;
                    self.tokens.push(Token::OpenParen);
                } else {
                    self.dropped_parens += 1;
                }
            }
            ')' => {
                self.advance(1);
                if self.dropped_parens > 0 {
                    self.dropped_parens -= 1;
                } else if self.open_parens > 0 {
                    self.open_parens -= 1;
                    self.tokens.push(Token::CloseParen);
                } else {
                    trace!(position = self.position - 1, "dropping unmatched ')'");
                }
            }
            '*' if matches!(self.tokens.last(), None | Some(Token::Field(_))) => {
                self.advance(1);
                self.tokens.push(Token::Star);
            }
            '+' => {
                self.advance(1);
                self.tokens.push(Token::Plus);
            }
            '-' => {
                self.advance(1);
                self.tokens.push(Token::Minus);
            }
            '.' if self.rest().starts_with(RANGE) => {
                self.advance(RANGE.len());
                self.tokens.push(Token::Range);
            }
            '"' => {
                if !self.read_phrase() {
                    self.skip(ch);
                }
            }
            _ => {
                if !self.read_word() {
                    self.skip(ch);
                }
            }
        }
    }

    /// Skips a character that cannot start a token.
    fn skip(&mut self, ch: char) {
        trace!(%ch, position = self.position, "skipping character");
        self.advance(ch.len_utf8());
    }

    /// Reads a quoted phrase, returning false if the quote is never closed.
    ///
    /// A phrase with no words produces no tokens. Otherwise each word becomes a `Phrase` token
    /// and a single `Separator` marks the end of the phrase.
    fn read_phrase(&mut self) -> bool {
        let rest = &self.rest()[1..];
        let Some(close) = rest.find('"') else {
            return false;
        };

        let content = &rest[..close];
        let words = words(content);
        if !words.is_empty() {
            self.tokens
                .extend(words.into_iter().map(|w| Token::Phrase(w.to_string())));
            self.tokens.push(Token::Separator);
        }

        self.advance(close + 2);
        true
    }

    /// Reads a keyword, field prefix, or word. Returns false if none starts here.
    fn read_word(&mut self) -> bool {
        let rest = self.rest();

        if let Some((token, len)) = keyword(rest) {
            self.advance(len);
            self.tokens.push(token);
            return true;
        }

        if let Some(len) = field_len(rest) {
            let name = rest[..len].to_string();
            self.advance(len + 1);
            self.tokens.push(Token::Field(name));
            return true;
        }

        let len = word_len(rest);
        if len == 0 {
            return false;
        }

        let word = &rest[..len];
        let token = match word.strip_suffix('*') {
            Some(prefix) => Token::Prefix(prefix.to_string()),
            None => Token::Term(word.to_string()),
        };
        self.advance(len);
        self.tokens.push(token);
        true
    }

    /// Returns the unconsumed input.
    fn rest(&self) -> &'a str {
        &self.input[self.position..]
    }

    /// Returns the next character without consuming it.
    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Advances by `len` bytes.
    fn advance(&mut self, len: usize) {
        self.position = (self.position + len).min(self.input.len());
    }
}

/// Tokenizes a query string.
///
/// The result always ends with exactly one [`Token::End`].
pub fn tokenize(input: &str) -> Vec<Token> {
    Lexer::new(input).tokenize()
}

/// Tokenizes raw bytes that may not be valid UTF-8.
///
/// Invalid sequences are replaced with U+FFFD, which is not a word character and is therefore
/// skipped like any other unrecognized character.
pub fn tokenize_bytes(input: &[u8]) -> Vec<Token> {
    tokenize(&String::from_utf8_lossy(input))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn term(s: &str) -> Token {
        Token::Term(s.into())
    }

    fn phrase(s: &str) -> Token {
        Token::Phrase(s.into())
    }

    fn field(s: &str) -> Token {
        Token::Field(s.into())
    }

    #[test]
    fn empty_input() {
        assert_eq!(tokenize(""), vec![Token::End]);
    }

    #[test]
    fn whitespace_only() {
        assert_eq!(tokenize("  \t\n "), vec![Token::End]);
    }

    #[test]
    fn multiple_terms() {
        assert_eq!(
            tokenize("rust async"),
            vec![term("rust"), term("async"), Token::End]
        );
    }

    #[test]
    fn quoted_phrase() {
        assert_eq!(
            tokenize("\"hello world\""),
            vec![
                phrase("hello"),
                phrase("world"),
                Token::Separator,
                Token::End
            ]
        );
    }

    #[test]
    fn adjacent_phrases_stay_separate() {
        assert_eq!(
            tokenize("\"a b\"\"c\""),
            vec![
                phrase("a"),
                phrase("b"),
                Token::Separator,
                phrase("c"),
                Token::Separator,
                Token::End
            ]
        );
    }

    #[test]
    fn empty_phrase_is_dropped() {
        assert_eq!(tokenize("\"\" \" ,; \""), vec![Token::End]);
    }

    #[test]
    fn unclosed_quote_is_skipped() {
        assert_eq!(
            tokenize("\"hello world"),
            vec![term("hello"), term("world"), Token::End]
        );
    }

    #[test]
    fn keywords_are_case_sensitive() {
        assert_eq!(
            tokenize("a AND b OR c NOT d"),
            vec![
                term("a"),
                Token::And,
                term("b"),
                Token::Or,
                term("c"),
                Token::Not,
                term("d"),
                Token::End
            ]
        );
        assert_eq!(
            tokenize("rust or golang"),
            vec![term("rust"), term("or"), term("golang"), Token::End]
        );
    }

    #[test]
    fn keywords_match_whole_words_only() {
        assert_eq!(
            tokenize("ANDROID ORACLE NOTE"),
            vec![term("ANDROID"), term("ORACLE"), term("NOTE"), Token::End]
        );
    }

    #[test]
    fn plus_and_minus() {
        assert_eq!(
            tokenize("+rust -deprecated"),
            vec![
                Token::Plus,
                term("rust"),
                Token::Minus,
                term("deprecated"),
                Token::End
            ]
        );
    }

    #[test]
    fn joiners_inside_words() {
        assert_eq!(
            tokenize("don't AT&T C++ U.S.A e-mail"),
            vec![
                term("don't"),
                term("AT&T"),
                term("C++"),
                term("U.S.A"),
                term("e-mail"),
                Token::End
            ]
        );
    }

    #[test]
    fn unicode_words() {
        assert_eq!(
            tokenize("café naïve 東京"),
            vec![term("café"), term("naïve"), term("東京"), Token::End]
        );
    }

    #[test]
    fn prefix() {
        assert_eq!(
            tokenize("foo* bar"),
            vec![Token::Prefix("foo".into()), term("bar"), Token::End]
        );
    }

    #[test]
    fn star_only_at_start_or_after_field() {
        assert_eq!(tokenize("*"), vec![Token::Star, Token::End]);
        assert_eq!(
            tokenize("title:*"),
            vec![field("title"), Token::Star, Token::End]
        );
        assert_eq!(tokenize("foo *"), vec![term("foo"), Token::End]);
    }

    #[test]
    fn field_prefix() {
        assert_eq!(
            tokenize("title:guide post.meta_key-2:x"),
            vec![
                field("title"),
                term("guide"),
                field("post.meta_key-2"),
                term("x"),
                Token::End
            ]
        );
    }

    #[test]
    fn field_names_are_lowercase_ascii() {
        // Single-character and uppercase names are not fields; the colon is skipped.
        assert_eq!(
            tokenize("a:b Title:c"),
            vec![term("a"), term("b"), term("Title"), term("c"), Token::End]
        );
    }

    #[test]
    fn field_name_check() {
        assert!(is_field_name("title"));
        assert!(is_field_name("post.meta_key-2"));
        assert!(!is_field_name("t"));
        assert!(!is_field_name("Title"));
        assert!(!is_field_name("a..b"));
        assert!(!is_field_name("my field"));
    }

    #[test]
    fn range_between_terms() {
        assert_eq!(
            tokenize("10..20"),
            vec![term("10"), Token::Range, term("20"), Token::End]
        );
    }

    #[test]
    fn open_ranges() {
        assert_eq!(tokenize("10.."), vec![term("10"), Token::Range, Token::End]);
        assert_eq!(tokenize("..20"), vec![Token::Range, term("20"), Token::End]);
    }

    #[test]
    fn range_text_is_canonical() {
        assert_eq!(Token::Range.text(), "..");
    }

    #[test]
    fn dotted_term_before_range() {
        assert_eq!(
            tokenize("1.5..2.5"),
            vec![term("1.5"), Token::Range, term("2.5"), Token::End]
        );
    }

    #[test]
    fn parentheses() {
        assert_eq!(
            tokenize("(rust async)"),
            vec![
                Token::OpenParen,
                term("rust"),
                term("async"),
                Token::CloseParen,
                Token::End
            ]
        );
    }

    #[test]
    fn unmatched_close_paren_is_dropped() {
        assert_eq!(tokenize(")))"), vec![Token::End]);
        assert_eq!(
            tokenize("a) (b))"),
            vec![
                term("a"),
                Token::OpenParen,
                term("b"),
                Token::CloseParen,
                Token::End
            ]
        );
    }

    #[test]
    fn unclosed_parens_are_closed() {
        assert_eq!(
            tokenize("((a"),
            vec![
                Token::OpenParen,
                Token::OpenParen,
                term("a"),
                Token::CloseParen,
                Token::CloseParen,
                Token::End
            ]
        );
    }

    #[test]
    fn nesting_is_capped() {
        let depth = MAX_NESTING + 10;
        let input = format!("{}a{} b", "(".repeat(depth), ")".repeat(depth));
        let tokens = tokenize(&input);

        let opens = tokens.iter().filter(|t| **t == Token::OpenParen).count();
        let closes = tokens.iter().filter(|t| **t == Token::CloseParen).count();
        assert_eq!(opens, MAX_NESTING);
        assert_eq!(closes, MAX_NESTING);
        assert_eq!(&tokens[MAX_NESTING], &term("a"));
        assert_eq!(&tokens[tokens.len() - 2..], &[term("b"), Token::End]);
    }

    #[test]
    fn unclosed_deep_nesting_is_closed() {
        let tokens = tokenize(&"(".repeat(1000));
        assert_eq!(tokens.len(), 2 * MAX_NESTING + 1);
        assert_eq!(tokens.last(), Some(&Token::End));
    }

    #[test]
    fn punctuation_is_skipped() {
        assert_eq!(
            tokenize("!@#$ ,hello; ^~"),
            vec![term("hello"), Token::End]
        );
    }

    #[test]
    fn invalid_utf8_is_skipped() {
        assert_eq!(
            tokenize_bytes(b"ab \xff\xfe cd"),
            vec![term("ab"), term("cd"), Token::End]
        );
    }

    #[test]
    fn token_kinds_and_text() {
        let tokens = tokenize("title:foo* AND");
        let kinds: Vec<TokenKind> = tokens.iter().map(Token::kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Field,
                TokenKind::Prefix,
                TokenKind::And,
                TokenKind::End
            ]
        );
        assert_eq!(tokens[0].text(), "title");
        assert_eq!(tokens[1].text(), "foo");
        assert_eq!(tokens[2].text(), "AND");
        assert_eq!(tokens[3].text(), "");
    }

    #[test]
    fn complex_query() {
        assert_eq!(
            tokenize("title:guide (rust OR golang) -deprecated"),
            vec![
                field("title"),
                term("guide"),
                Token::OpenParen,
                term("rust"),
                Token::Or,
                term("golang"),
                Token::CloseParen,
                Token::Minus,
                term("deprecated"),
                Token::End
            ]
        );
    }
}
