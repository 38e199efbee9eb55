//! Lexer and parser for a small arithmetic expression language.
//!
//! Source text is tokenized with precise positions, then parsed by
//! precedence-layered recursive descent into a typed expression tree.
//! Both stages stop at the first error and report where it happened.
//!
//! # Quick start
//!
//! ```
//! use basic_lang::run;
//!
//! let ast = run("<stdin>", "1 + 2 * 3").unwrap();
//! assert_eq!(ast.to_string(), "(INT:1, PLUS, (INT:2, MUL, INT:3))");
//! ```
//!
//! ## Diagnostics
//!
//! ```
//! use basic_lang::run;
//!
//! let err = run("calc.bas", "1 + @").unwrap_err();
//! assert_eq!(err.to_string(), "Illegal Character: '@'\nFILE calc.bas, LINE 1");
//! assert_eq!(err.excerpt(), "1 + @\n    ^");
//! ```

#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod ast;
pub mod formatter;
pub mod lexer;
pub mod parser;
pub mod position;
pub mod token;

pub use ast::Node;
pub use formatter::{format, tree};
pub use lexer::{LexError, LexErrorKind, tokenize};
pub use parser::{
    DEFAULT_MAX_NESTING, ParseError, ParseErrorKind, ParseOptions, parse, parse_with,
};
pub use position::{Position, Span};
pub use token::{Token, TokenKind};

/// Unified error type covering both lexing and parsing.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// A lexer error.
    #[error("{0}")]
    Lex(#[from] LexError),
    /// A parser error.
    #[error("{0}")]
    Parse(#[from] ParseError),
}

impl Error {
    /// Error name, e.g. `Illegal Character` or `Invalid Syntax`.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Lex(e) => e.name(),
            Self::Parse(e) => e.name(),
        }
    }

    /// Free-form details following the name.
    #[must_use]
    pub fn details(&self) -> String {
        match self {
            Self::Lex(e) => e.kind.to_string(),
            Self::Parse(e) => e.kind.to_string(),
        }
    }

    /// Where the error happened. Always present for errors returned
    /// by [`run`].
    #[must_use]
    pub const fn span(&self) -> Option<&Span> {
        match self {
            Self::Lex(e) => Some(&e.span),
            Self::Parse(e) => e.span.as_ref(),
        }
    }

    /// The offending source line with the error underlined, or an
    /// empty string when the error has no location.
    #[must_use]
    pub fn excerpt(&self) -> String {
        self.span().map(Span::excerpt).unwrap_or_default()
    }
}

/// Tokenize and parse `text` with the default grammar.
///
/// `file_name` only labels positions and diagnostics; nothing is read
/// from disk.
pub fn run(file_name: &str, text: &str) -> Result<Node, Error> {
    run_with(file_name, text, ParseOptions::default())
}

/// Tokenize and parse `text` with the given grammar extensions.
///
/// A lexing failure is returned without running the parser.
pub fn run_with(file_name: &str, text: &str, options: ParseOptions) -> Result<Node, Error> {
    tracing::debug!(file = file_name, len = text.len(), ?options, "run");

    let tokens = tokenize(file_name, text)?;
    tracing::debug!(file = file_name, count = tokens.len(), "tokenized");

    parse_with(&tokens, options).map_err(|mut err| {
        // Only an empty token stream leaves the span unset.
        if err.span.is_none() {
            err.span = Some(Span::empty(Position::start(file_name, text)));
        }
        tracing::debug!(file = file_name, error = %err.kind, "parse failed");
        Error::Parse(err)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lex_error_short_circuits() {
        let err = run("<test>", "1.2.3").unwrap_err();
        assert!(matches!(
            err,
            Error::Lex(LexError {
                kind: LexErrorKind::IllegalCharacter('.'),
                ..
            })
        ));
    }

    #[test]
    fn empty_input_gets_location() {
        let err = run("empty.bas", "   ").unwrap_err();
        assert_eq!(err.name(), "Invalid Syntax");
        assert_eq!(
            err.to_string(),
            "Invalid Syntax: Expected int or float, found end of input\nFILE empty.bas, LINE 1"
        );
        assert_eq!(err.span().map(|s| s.start.index()), Some(0));
    }

    #[test]
    fn details_and_name() {
        let err = run("<test>", "2 * ?").unwrap_err();
        assert_eq!(err.name(), "Illegal Character");
        assert_eq!(err.details(), "'?'");
    }

    #[test]
    fn run_with_options() {
        let ast = run_with("<test>", "-(1+2)", ParseOptions::strict()).expect("parse failed");
        assert_eq!(ast.to_string(), "(MINUS, (INT:1, PLUS, INT:2))");
        assert!(run("<test>", "-(1+2)").is_err());
    }
}
