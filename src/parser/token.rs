//! Token types produced by the lockfile lexer.

use std::fmt;

/// A single lexical token.
///
/// Only the kinds that carry data have a payload. `Indent` holds the
/// indentation *level* (raw space count halved), not the number of spaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// `true` or `false`.
    Boolean(bool),
    /// Quoted or bare string.
    String(String),
    /// Reserved; the lexer currently reports bare words as `String`.
    Identifier,
    /// Marks the end of the token sequence.
    EndOfInput,
    /// `:`
    Colon,
    /// `\n`, `\r\n` or a lone `\r`.
    Newline,
    /// Text following `#` up to the end of the line.
    Comment(String),
    /// Leading indentation of a line, in two-space units.
    Indent(usize),
    /// Unclassifiable input. Lexing stops after emitting it.
    Invalid,
    /// Run of decimal digits.
    Number(u64),
    /// `,`
    Comma,
}

/// The payload-free kind of a [`Token`], used for dispatch and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Boolean,
    String,
    Identifier,
    EndOfInput,
    Colon,
    Newline,
    Comment,
    Indent,
    Invalid,
    Number,
    Comma,
}

impl Token {
    /// Returns the kind of this token.
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::Boolean(_) => TokenKind::Boolean,
            Token::String(_) => TokenKind::String,
            Token::Identifier => TokenKind::Identifier,
            Token::EndOfInput => TokenKind::EndOfInput,
            Token::Colon => TokenKind::Colon,
            Token::Newline => TokenKind::Newline,
            Token::Comment(_) => TokenKind::Comment,
            Token::Indent(_) => TokenKind::Indent,
            Token::Invalid => TokenKind::Invalid,
            Token::Number(_) => TokenKind::Number,
            Token::Comma => TokenKind::Comma,
        }
    }

    /// Returns true if the token can stand as a property value.
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            Token::Boolean(_) | Token::String(_) | Token::Number(_)
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TokenKind::Boolean => "boolean",
            TokenKind::String => "string",
            TokenKind::Identifier => "identifier",
            TokenKind::EndOfInput => "end of input",
            TokenKind::Colon => "colon",
            TokenKind::Newline => "newline",
            TokenKind::Comment => "comment",
            TokenKind::Indent => "indent",
            TokenKind::Invalid => "invalid character",
            TokenKind::Number => "number",
            TokenKind::Comma => "comma",
        };
        write!(f, "{}", s)
    }
}
