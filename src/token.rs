use std::fmt;

use crate::position::Span;

/// Token kinds produced by the lexer.
///
/// Number literals carry their value; every other kind is bare.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TokenKind {
    /// Integer literal (`42`).
    Int(i64),
    /// Float literal (`4.2`, `4.`).
    Float(f64),
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `(`
    LParen,
    /// `)`
    RParen,
}

impl TokenKind {
    /// Upper-case tag used when printing tokens.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Int(_) => "INT",
            Self::Float(_) => "FLOAT",
            Self::Plus => "PLUS",
            Self::Minus => "MINUS",
            Self::Mul => "MUL",
            Self::Div => "DIV",
            Self::LParen => "LPAREN",
            Self::RParen => "RPAREN",
        }
    }

    /// Source spelling: the numeral for literals, the symbol otherwise.
    #[must_use]
    pub fn symbol(self) -> String {
        match self {
            Self::Int(v) => v.to_string(),
            Self::Float(v) => {
                let text = v.to_string();
                if text.contains('.') || !v.is_finite() {
                    text
                } else {
                    text + ".0"
                }
            }
            Self::Plus => "+".to_string(),
            Self::Minus => "-".to_string(),
            Self::Mul => "*".to_string(),
            Self::Div => "/".to_string(),
            Self::LParen => "(".to_string(),
            Self::RParen => ")".to_string(),
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{}:{v}", self.name()),
            // Debug keeps the fractional part: `1.0`, not `1`.
            Self::Float(v) => write!(f, "{}:{v:?}", self.name()),
            _ => f.write_str(self.name()),
        }
    }
}

/// A single token with its kind and source location.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    #[must_use]
    pub const fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.kind.fmt(f)
    }
}
