use std::fmt;

use crate::ast::Node;
use crate::position::Span;
use crate::token::{Token, TokenKind};

/// Classifies a parser error.
///
/// `found: None` means the token stream ended.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseErrorKind {
    /// Expected a number literal.
    ExpectedNumber { found: Option<TokenKind> },
    /// Expected a number, a sign or `(` (grouping enabled).
    ExpectedOperand { found: Option<TokenKind> },
    /// Expected `)` closing a group.
    ExpectedCloseParen { found: Option<TokenKind> },
    /// Token left over after a complete expression (trailing input
    /// rejected).
    UnexpectedToken(TokenKind),
    /// Parentheses or signs nested deeper than the configured limit.
    TooDeep { limit: usize },
}

impl ParseErrorKind {
    /// Human-readable error name shown before the details.
    #[must_use]
    #[allow(clippy::unused_self)]
    pub const fn name(&self) -> &'static str {
        "Invalid Syntax"
    }
}

struct Found(Option<TokenKind>);

impl fmt::Display for Found {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(kind) => write!(f, "found {kind}"),
            None => f.write_str("found end of input"),
        }
    }
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExpectedNumber { found } => {
                write!(f, "Expected int or float, {}", Found(*found))
            }
            Self::ExpectedOperand { found } => {
                write!(
                    f,
                    "Expected int, float, '+', '-' or '(', {}",
                    Found(*found)
                )
            }
            Self::ExpectedCloseParen { found } => {
                write!(f, "Expected ')', {}", Found(*found))
            }
            Self::UnexpectedToken(kind) => {
                write!(f, "Expected '+', '-', '*' or '/', {}", Found(Some(*kind)))
            }
            Self::TooDeep { limit } => {
                write!(f, "Groups and signs nested deeper than {limit}")
            }
        }
    }
}

/// Error produced during parsing.
///
/// `span` is `None` only when the token stream was empty, since no
/// location exists then; [`crate::run`] fills it in from the source.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{}: {kind}{}", kind.name(), Location(span.as_ref()))]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Option<Span>,
}

struct Location<'a>(Option<&'a Span>);

impl fmt::Display for Location<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(span) => write!(
                f,
                "\nFILE {}, LINE {}",
                span.start.file_name(),
                span.start.line() + 1
            ),
            None => Ok(()),
        }
    }
}

impl ParseError {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// The offending source line with the span underlined.
    #[must_use]
    pub fn excerpt(&self) -> Option<String> {
        self.span.as_ref().map(Span::excerpt)
    }
}

/// Default for [`ParseOptions::max_nesting`].
pub const DEFAULT_MAX_NESTING: usize = 128;

/// Optional grammar extensions. `Default` gives the literal-only
/// grammar with unvalidated trailing tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Fail if tokens remain after the top-level expression.
    pub reject_trailing: bool,
    /// Accept `( expr )` and leading `+`/`-` in operand position.
    pub grouping: bool,
    /// Deepest allowed nesting of groups and signs. Operator chains
    /// are folded in a loop and never count against it.
    pub max_nesting: usize,
}

impl ParseOptions {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            reject_trailing: false,
            grouping: false,
            max_nesting: DEFAULT_MAX_NESTING,
        }
    }

    /// Both extensions enabled.
    #[must_use]
    pub const fn strict() -> Self {
        Self {
            reject_trailing: true,
            grouping: true,
            max_nesting: DEFAULT_MAX_NESTING,
        }
    }

    #[must_use]
    pub const fn with_max_nesting(mut self, limit: usize) -> Self {
        self.max_nesting = limit;
        self
    }

    #[must_use]
    pub const fn with_reject_trailing(mut self, enabled: bool) -> Self {
        self.reject_trailing = enabled;
        self
    }

    #[must_use]
    pub const fn with_grouping(mut self, enabled: bool) -> Self {
        self.grouping = enabled;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a token stream into an expression tree using the default
/// literal-only grammar:
///
/// ```text
/// expr   := term ( (PLUS | MINUS) term )*
/// term   := factor ( (MUL | DIV) factor )*
/// factor := INT | FLOAT
/// ```
///
/// Binary operators are left-associative. Tokens after the first
/// complete `expr` are ignored.
///
/// # Errors
///
/// Returns `ParseError` when an operand is missing or is not a number.
pub fn parse(tokens: &[Token]) -> Result<Node, ParseError> {
    parse_with(tokens, ParseOptions::default())
}

/// Parse with the given grammar extensions.
///
/// # Errors
///
/// Returns `ParseError` on the first token the grammar cannot accept.
pub fn parse_with(tokens: &[Token], options: ParseOptions) -> Result<Node, ParseError> {
    Parser::new(tokens, options).parse()
}

const ADDITIVE: &[TokenKind] = &[TokenKind::Plus, TokenKind::Minus];
const MULTIPLICATIVE: &[TokenKind] = &[TokenKind::Mul, TokenKind::Div];

type Rule<'a> = fn(&mut Parser<'a>) -> Result<Node, ParseError>;

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    depth: usize,
    options: ParseOptions,
}

impl<'a> Parser<'a> {
    const fn new(tokens: &'a [Token], options: ParseOptions) -> Self {
        Self {
            tokens,
            pos: 0,
            depth: 0,
            options,
        }
    }

    fn parse(mut self) -> Result<Node, ParseError> {
        let node = self.expr()?;

        if self.options.reject_trailing {
            if let Some(token) = self.current() {
                return Err(ParseError {
                    kind: ParseErrorKind::UnexpectedToken(token.kind),
                    span: Some(token.span.clone()),
                });
            }
        }

        Ok(node)
    }

    fn current(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn expr(&mut self) -> Result<Node, ParseError> {
        self.binary_op(Self::term, ADDITIVE)
    }

    fn term(&mut self) -> Result<Node, ParseError> {
        self.binary_op(Self::factor, MULTIPLICATIVE)
    }

    /// `operand ( op operand )*`, folded to the left.
    fn binary_op(&mut self, operand: Rule<'a>, ops: &[TokenKind]) -> Result<Node, ParseError> {
        let mut left = operand(self)?;

        while let Some(op) = self.current().filter(|t| ops.contains(&t.kind)) {
            self.pos += 1;
            let right = operand(self)?;
            tracing::trace!(op = %op, "reduce");
            left = Node::binary(left, op.clone(), right);
        }

        Ok(left)
    }

    fn factor(&mut self) -> Result<Node, ParseError> {
        let Some(token) = self.current() else {
            return Err(self.expected_operand(None));
        };

        match token.kind {
            TokenKind::Int(_) | TokenKind::Float(_) => {
                self.pos += 1;
                Ok(Node::Number(token.clone()))
            }
            TokenKind::Plus | TokenKind::Minus if self.options.grouping => {
                self.enter(token)?;
                let operand = self.factor();
                self.depth -= 1;
                Ok(Node::unary(token.clone(), operand?))
            }
            TokenKind::LParen if self.options.grouping => {
                self.enter(token)?;
                let inner = self.expr().and_then(|inner| {
                    self.expect_close_paren()?;
                    Ok(inner)
                });
                self.depth -= 1;
                inner
            }
            _ => Err(self.expected_operand(Some(token))),
        }
    }

    /// Step past an opening sign or `(`, counting one level of nesting.
    fn enter(&mut self, token: &Token) -> Result<(), ParseError> {
        if self.depth >= self.options.max_nesting {
            return Err(ParseError {
                kind: ParseErrorKind::TooDeep {
                    limit: self.options.max_nesting,
                },
                span: Some(token.span.clone()),
            });
        }
        self.depth += 1;
        self.pos += 1;
        Ok(())
    }

    fn expect_close_paren(&mut self) -> Result<(), ParseError> {
        match self.current() {
            Some(token) if token.kind == TokenKind::RParen => {
                self.pos += 1;
                Ok(())
            }
            Some(token) => Err(ParseError {
                kind: ParseErrorKind::ExpectedCloseParen {
                    found: Some(token.kind),
                },
                span: Some(token.span.clone()),
            }),
            None => Err(ParseError {
                kind: ParseErrorKind::ExpectedCloseParen { found: None },
                span: self.eof_span(),
            }),
        }
    }

    fn expected_operand(&self, token: Option<&Token>) -> ParseError {
        let found = token.map(|t| t.kind);
        let kind = if self.options.grouping {
            ParseErrorKind::ExpectedOperand { found }
        } else {
            ParseErrorKind::ExpectedNumber { found }
        };
        let span = token.map_or_else(|| self.eof_span(), |t| Some(t.span.clone()));
        ParseError { kind, span }
    }

    /// Empty span just past the last token.
    fn eof_span(&self) -> Option<Span> {
        self.tokens
            .last()
            .map(|last| Span::empty(last.span.end.clone()))
    }
}
