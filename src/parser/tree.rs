//! Indentation-aware recursive-descent parser.
//!
//! Builds a nested [`Mapping`] from the token sequence produced by the
//! [lexer](super::lexer). Nesting is inferred purely from `Indent` tokens:
//! each recursive call handles one block and receives its indentation level
//! as a parameter. The token position lives in a [`Cursor`] passed by
//! mutable reference, so independent parses never share state.
//!
//! A key may be followed by a scalar on the same line, or by a colon and an
//! indented child block:
//!
//! ```text
//! "a@^1.0.0", a@^1.1.0:
//!   version "1.2.0"
//!   dependencies:
//!     b "^2.0.0"
//! ```
//!
//! Comma-separated keys all receive the same value.

use std::fmt;

use indexmap::IndexMap;
use tracing::trace;

use super::error::{ParseError, ParseResult};
use super::token::Token;

/// One block of the parse tree, keyed in insertion order.
pub type Mapping = IndexMap<String, Value>;

/// A value in the parse tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Boolean(bool),
    Number(u64),
    String(String),
    Map(Mapping),
}

impl Value {
    /// Returns the nested mapping, if this value is one.
    pub fn as_map(&self) -> Option<&Mapping> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Returns the string form of a scalar, or `None` for a nested mapping.
    pub fn scalar_string(&self) -> Option<String> {
        match self {
            Value::Map(_) => None,
            scalar => Some(scalar.to_string()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", n),
            Value::String(s) => write!(f, "{}", s),
            Value::Map(map) => write!(f, "{{{} entries}}", map.len()),
        }
    }
}

static END_OF_INPUT: Token = Token::EndOfInput;

/// Read position into a materialized token sequence.
///
/// The sequence always ends with [`Token::EndOfInput`]; the cursor never
/// moves past it.
#[derive(Debug)]
pub struct Cursor<'t> {
    tokens: &'t [Token],
    pos: usize,
    line: usize,
}

impl<'t> Cursor<'t> {
    pub fn new(tokens: &'t [Token]) -> Self {
        Self {
            tokens,
            pos: 0,
            line: 1,
        }
    }

    /// The token under the cursor.
    pub fn current(&self) -> &'t Token {
        self.tokens.get(self.pos).unwrap_or(&END_OF_INPUT)
    }

    /// Moves to the next token.
    pub fn advance(&mut self) {
        if matches!(self.current(), Token::Newline) {
            self.line += 1;
        }
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
    }

    /// 1-based line of the current token.
    pub fn line(&self) -> usize {
        self.line
    }
}

/// Parses a complete token sequence into the root mapping.
///
/// # Errors
///
/// Returns the first grammar violation encountered. Tokens left over after
/// the root block ends are a violation too, so a partial tree is never
/// returned.
pub fn parse_tokens(tokens: &[Token]) -> ParseResult<Mapping> {
    let mut cursor = Cursor::new(tokens);
    let root = parse_block(&mut cursor, 0)?;

    match cursor.current() {
        Token::EndOfInput => Ok(root),
        other => Err(ParseError::UnexpectedToken {
            line: cursor.line(),
            found: other.kind(),
        }),
    }
}

/// Parses one indentation block at `indent`.
///
/// Returns when the input ends or when a line is indented differently from
/// `indent`. The token that ends the block is left under the cursor for the
/// caller.
pub fn parse_block(cursor: &mut Cursor<'_>, indent: usize) -> ParseResult<Mapping> {
    trace!(indent, line = cursor.line(), "entering block");
    let mut map = Mapping::new();

    loop {
        match cursor.current() {
            Token::EndOfInput => break,
            Token::Newline => {
                cursor.advance();
                if indent == 0 {
                    continue;
                }
                match cursor.current() {
                    Token::Indent(level) if *level == indent => cursor.advance(),
                    _ => break,
                }
            }
            Token::Indent(level) => {
                if *level != indent {
                    break;
                }
                cursor.advance();
            }
            Token::Comment(_) => cursor.advance(),
            Token::String(first) => {
                let keys = parse_keys(cursor, first)?;

                let has_colon = matches!(cursor.current(), Token::Colon);
                if has_colon {
                    cursor.advance();
                }

                let token = cursor.current();
                if let Some(value) = scalar_value(token) {
                    assign(&mut map, &keys, value);
                    cursor.advance();
                } else if has_colon {
                    let child = parse_block(cursor, indent + 1)?;
                    assign(&mut map, &keys, Value::Map(child));

                    // A nested block that ended without an Indent token means
                    // the next line sits at a shallower level than this one.
                    if indent > 0 && !matches!(cursor.current(), Token::Indent(_)) {
                        break;
                    }
                } else {
                    return Err(ParseError::InvalidValueType {
                        line: cursor.line(),
                        found: token.kind(),
                    });
                }
            }
            other => {
                return Err(ParseError::UnexpectedToken {
                    line: cursor.line(),
                    found: other.kind(),
                })
            }
        }
    }

    trace!(indent, entries = map.len(), "leaving block");
    Ok(map)
}

/// Collects a comma-separated key list starting at the current string token.
fn parse_keys(cursor: &mut Cursor<'_>, first: &str) -> ParseResult<Vec<String>> {
    let mut keys = vec![first.to_string()];
    cursor.advance();

    while matches!(cursor.current(), Token::Comma) {
        cursor.advance();
        match cursor.current() {
            Token::String(key) => keys.push(key.clone()),
            other => {
                return Err(ParseError::ExpectedString {
                    line: cursor.line(),
                    found: other.kind(),
                })
            }
        }
        cursor.advance();
    }

    Ok(keys)
}

fn scalar_value(token: &Token) -> Option<Value> {
    match token {
        Token::Boolean(b) => Some(Value::Boolean(*b)),
        Token::Number(n) => Some(Value::Number(*n)),
        Token::String(s) => Some(Value::String(s.clone())),
        _ => None,
    }
}

fn assign(map: &mut Mapping, keys: &[String], value: Value) {
    for key in keys {
        map.insert(key.clone(), value.clone());
    }
}
