//! Lexer for Yarn v1 lockfiles.
//!
//! Converts raw lockfile text into a flat, eagerly materialized sequence of
//! [`Token`]s terminated by a single [`Token::EndOfInput`].
//!
//! Leading spaces on a line become an [`Token::Indent`] carrying the
//! indentation level in two-space units; spaces anywhere else are
//! separators and produce no token.

use tracing::trace;

use super::error::{ParseError, ParseResult};
use super::token::Token;

/// Characters that end a bare (unquoted) string.
const BARE_STOP_CHARS: [char; 5] = [':', '\n', '\r', ',', ' '];

/// Tokenizes a complete lockfile.
///
/// # Errors
///
/// Fails on an odd-width indentation run, an unterminated quoted string, or
/// a digit run that overflows `u64`. An unclassifiable character is not an
/// error here: it is emitted as [`Token::Invalid`], lexing stops, and the
/// parser rejects it.
///
/// # Example
///
/// ```
/// use lockscope::parser::lexer::tokenize;
/// use lockscope::parser::Token;
///
/// let tokens = tokenize("a:\n  b 1\n").unwrap();
/// assert_eq!(tokens[0], Token::String("a".to_string()));
/// assert_eq!(tokens[3], Token::Indent(1));
/// assert_eq!(tokens.last(), Some(&Token::EndOfInput));
/// ```
pub fn tokenize(input: &str) -> ParseResult<Vec<Token>> {
    Lexer::new(input).run()
}

struct Lexer<'a> {
    input: &'a str,
    pos: usize,
    line: usize,
    after_newline: bool,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            line: 1,
            after_newline: false,
            tokens: Vec::new(),
        }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn push(&mut self, token: Token) {
        self.after_newline = matches!(token, Token::Newline);
        self.tokens.push(token);
    }

    fn run(mut self) -> ParseResult<Vec<Token>> {
        while let Some(c) = self.rest().chars().next() {
            match c {
                '\n' | '\r' => self.lex_newline(c),
                '#' => self.lex_comment(),
                ' ' => self.lex_space()?,
                '"' => self.lex_quoted()?,
                '0'..='9' => self.lex_number()?,
                ':' => {
                    self.pos += 1;
                    self.push(Token::Colon);
                }
                ',' => {
                    self.pos += 1;
                    self.push(Token::Comma);
                }
                't' | 'f' if self.at_boolean() => self.lex_boolean(),
                'a'..='z' | 'A'..='Z' | '/' | '.' | '-' => self.lex_bare(),
                _ => {
                    trace!(line = self.line, character = %c, "unclassifiable input");
                    self.push(Token::Invalid);
                    break;
                }
            }
        }

        self.tokens.push(Token::EndOfInput);
        Ok(self.tokens)
    }

    fn lex_newline(&mut self, c: char) {
        self.pos += 1;
        if c == '\r' && self.rest().starts_with('\n') {
            self.pos += 1;
        }
        self.line += 1;
        self.push(Token::Newline);
    }

    fn lex_comment(&mut self) {
        let body = &self.rest()[1..];
        let end = body.find(['\n', '\r']).unwrap_or(body.len());
        let text = body[..end].to_string();
        self.pos += 1 + end;
        self.push(Token::Comment(text));
    }

    fn lex_space(&mut self) -> ParseResult<()> {
        if !self.after_newline {
            self.pos += 1;
            return Ok(());
        }

        let width = self
            .rest()
            .find(|c: char| c != ' ')
            .unwrap_or(self.rest().len());
        if width % 2 != 0 {
            return Err(ParseError::InvalidIndent {
                line: self.line,
                width,
            });
        }

        self.pos += width;
        self.push(Token::Indent(width / 2));
        Ok(())
    }

    fn lex_quoted(&mut self) -> ParseResult<()> {
        let body = &self.rest()[1..];
        let end = match body.find(['"', '\n', '\r']) {
            Some(end) if body[end..].starts_with('"') => end,
            _ => return Err(ParseError::UnterminatedString { line: self.line }),
        };

        let value = body[..end].replace(':', "");
        self.pos += end + 2;
        self.push(Token::String(value));
        Ok(())
    }

    fn lex_number(&mut self) -> ParseResult<()> {
        let rest = self.rest();
        let len = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        let literal = &rest[..len];

        let value = literal.parse::<u64>().map_err(|_| ParseError::InvalidNumber {
            line: self.line,
            literal: literal.to_string(),
        })?;

        self.pos += len;
        self.push(Token::Number(value));
        Ok(())
    }

    fn at_boolean(&self) -> bool {
        self.rest().starts_with("true") || self.rest().starts_with("false")
    }

    fn lex_boolean(&mut self) {
        let value = self.rest().starts_with("true");
        self.pos += if value { 4 } else { 5 };
        self.push(Token::Boolean(value));
    }

    fn lex_bare(&mut self) {
        let rest = self.rest();
        let len = rest.find(BARE_STOP_CHARS).unwrap_or(rest.len());
        let value = rest[..len].to_string();
        self.pos += len;
        self.push(Token::String(value));
    }
}
