use std::fmt;

use crate::position::{Position, Span};
use crate::token::{Token, TokenKind};

/// Classifies a lexer error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexErrorKind {
    /// Character that cannot start any token.
    IllegalCharacter(char),
    /// Integer numeral too large for `i64`.
    NumberOutOfRange(String),
}

impl LexErrorKind {
    /// Human-readable error name shown before the details.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::IllegalCharacter(_) => "Illegal Character",
            Self::NumberOutOfRange(_) => "Number Out Of Range",
        }
    }
}

impl fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IllegalCharacter(ch) => write!(f, "'{}'", ch.escape_debug()),
            Self::NumberOutOfRange(numeral) => {
                write!(f, "'{numeral}' does not fit in a 64-bit integer")
            }
        }
    }
}

/// Error produced during lexing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error(
    "{}: {kind}\nFILE {}, LINE {}",
    kind.name(),
    span.start.file_name(),
    span.start.line() + 1
)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub span: Span,
}

impl LexError {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// The offending source line with the span underlined.
    #[must_use]
    pub fn excerpt(&self) -> String {
        self.span.excerpt()
    }
}

/// Tokenize `text`, read from the source called `file_name`.
///
/// Spaces and tabs separate tokens. Any other character outside
/// digits, `.` inside a numeral, and `+ - * / ( )` aborts the whole
/// call; no partial token stream is returned.
///
/// # Errors
///
/// Returns `LexError` on the first illegal character or on an
/// integer numeral that overflows `i64`.
pub fn tokenize(file_name: &str, text: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(file_name, text).tokenize()
}

struct Lexer {
    chars: Vec<char>,
    pos: Position,
}

impl Lexer {
    fn new(file_name: &str, text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
            pos: Position::start(file_name, text),
        }
    }

    fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        while let Some(ch) = self.current() {
            let kind = match ch {
                ' ' | '\t' => {
                    self.advance(ch);
                    continue;
                }
                '0'..='9' => {
                    tokens.push(self.read_number()?);
                    continue;
                }
                '+' => TokenKind::Plus,
                '-' => TokenKind::Minus,
                '*' => TokenKind::Mul,
                '/' => TokenKind::Div,
                '(' => TokenKind::LParen,
                ')' => TokenKind::RParen,
                _ => {
                    let start = self.pos.clone();
                    self.advance(ch);
                    let err = LexError {
                        kind: LexErrorKind::IllegalCharacter(ch),
                        span: Span::new(start, self.pos.clone()),
                    };
                    tracing::debug!(
                        line = err.span.start.line(),
                        column = err.span.start.column(),
                        "illegal character {ch:?}"
                    );
                    return Err(err);
                }
            };
            let start = self.pos.clone();
            self.advance(ch);
            tokens.push(self.finish(kind, start));
        }

        Ok(tokens)
    }

    fn current(&self) -> Option<char> {
        self.chars.get(self.pos.index()).copied()
    }

    const fn advance(&mut self, ch: char) {
        self.pos.advance(ch);
    }

    fn finish(&self, kind: TokenKind, start: Position) -> Token {
        let token = Token::new(kind, Span::new(start, self.pos.clone()));
        tracing::trace!(token = %token, index = token.span.start.index(), "token");
        token
    }

    /// Digits with at most one `.`; a second `.` ends the numeral
    /// and is left for the next scan step.
    fn read_number(&mut self) -> Result<Token, LexError> {
        let start = self.pos.clone();
        let mut numeral = String::new();
        let mut seen_dot = false;

        while let Some(ch) = self.current() {
            if ch == '.' {
                if seen_dot {
                    break;
                }
                seen_dot = true;
            } else if !ch.is_ascii_digit() {
                break;
            }
            numeral.push(ch);
            self.advance(ch);
        }

        let kind = if seen_dot {
            numeral.parse().map(TokenKind::Float).ok()
        } else {
            numeral.parse().map(TokenKind::Int).ok()
        };

        match kind {
            Some(kind) => Ok(self.finish(kind, start)),
            None => Err(LexError {
                kind: LexErrorKind::NumberOutOfRange(numeral),
                span: Span::new(start, self.pos.clone()),
            }),
        }
    }
}
