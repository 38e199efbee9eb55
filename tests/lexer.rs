//! Lexer edge cases and error tests.

mod common;

use basic_lang::{LexErrorKind, TokenKind, tokenize};
use common::kinds;

// -----------------------------------------------------------
// Basic lexer behaviour.
// -----------------------------------------------------------

#[test]
fn lex_empty_input() {
    assert!(kinds("").is_empty());
}

#[test]
fn lex_only_whitespace() {
    assert!(kinds(" \t  \t").is_empty());
}

#[test]
fn lex_single_integer() {
    assert_eq!(kinds("1234"), [TokenKind::Int(1234)]);
}

#[test]
fn lex_single_float() {
    assert_eq!(kinds("12.5"), [TokenKind::Float(12.5)]);
}

#[test]
fn lex_leading_zeros() {
    assert_eq!(kinds("007"), [TokenKind::Int(7)]);
    assert_eq!(kinds("00.50"), [TokenKind::Float(0.5)]);
}

#[test]
fn lex_i64_max() {
    assert_eq!(kinds("9223372036854775807"), [TokenKind::Int(i64::MAX)]);
}

#[test]
fn lex_expression() {
    assert_eq!(
        kinds("3 * (4 - 1.5)"),
        [
            TokenKind::Int(3),
            TokenKind::Mul,
            TokenKind::LParen,
            TokenKind::Int(4),
            TokenKind::Minus,
            TokenKind::Float(1.5),
            TokenKind::RParen,
        ]
    );
}

#[test]
fn lex_adjacent_numbers() {
    // Whitespace separates numerals into distinct tokens.
    assert_eq!(kinds("1 2"), [TokenKind::Int(1), TokenKind::Int(2)]);
}

#[test]
fn lex_sign_is_separate_token() {
    assert_eq!(kinds("-5"), [TokenKind::Minus, TokenKind::Int(5)]);
}

#[test]
fn lex_token_display() {
    let rendered: Vec<_> = tokenize("<test>", "1+2.0/(3)")
        .expect("tokenize")
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(
        rendered,
        ["INT:1", "PLUS", "FLOAT:2.0", "DIV", "LPAREN", "INT:3", "RPAREN"]
    );
}

// -----------------------------------------------------------
// Errors.
// -----------------------------------------------------------

#[test]
fn lex_error_illegal_character() {
    let err = tokenize("<test>", "1+@2").unwrap_err();
    assert_eq!(err.kind, LexErrorKind::IllegalCharacter('@'));
    assert_eq!(err.span.start.index(), 2);
    assert_eq!(err.span.end.index(), 3);
    assert_eq!(err.span.len(), 1);
}

#[test]
fn lex_error_second_dot() {
    // `1.2` is one numeral; the second `.` cannot start a token.
    let err = tokenize("<test>", "1.2.3").unwrap_err();
    assert_eq!(err.kind, LexErrorKind::IllegalCharacter('.'));
    assert_eq!(err.span.start.column(), 3);
}

#[test]
fn lex_error_lone_dot() {
    let err = tokenize("<test>", ".5").unwrap_err();
    assert_eq!(err.kind, LexErrorKind::IllegalCharacter('.'));
    assert_eq!(err.span.start.index(), 0);
}

#[test]
fn lex_error_newline_is_not_whitespace() {
    let err = tokenize("<test>", "1\n+2").unwrap_err();
    assert_eq!(err.kind, LexErrorKind::IllegalCharacter('\n'));
    assert_eq!(err.span.start.line(), 0);
    assert_eq!(err.span.start.column(), 1);
    assert_eq!(err.span.end.line(), 1);
    assert_eq!(err.span.end.column(), 0);
}

#[test]
fn lex_error_letters() {
    let err = tokenize("<test>", "2 * x").unwrap_err();
    assert_eq!(err.kind, LexErrorKind::IllegalCharacter('x'));
    assert_eq!(err.span.start.column(), 4);
}

#[test]
fn lex_error_non_ascii() {
    let err = tokenize("<test>", "1 × 2").unwrap_err();
    assert_eq!(err.kind, LexErrorKind::IllegalCharacter('×'));
    assert_eq!(err.span.start.column(), 2);
    assert_eq!(err.span.end.column(), 3);
}

#[test]
fn lex_error_first_illegal_wins() {
    let err = tokenize("<test>", "1 # 2 $").unwrap_err();
    assert_eq!(err.kind, LexErrorKind::IllegalCharacter('#'));
}

#[test]
fn lex_error_integer_overflow() {
    let err = tokenize("<test>", "1 + 9223372036854775808").unwrap_err();
    assert_eq!(
        err.kind,
        LexErrorKind::NumberOutOfRange("9223372036854775808".to_string())
    );
    assert_eq!(err.span.start.column(), 4);
    assert_eq!(err.span.len(), 19);
}

#[test]
fn lex_error_display_includes_location() {
    let err = tokenize("calc.bas", "4 ! 2").unwrap_err();
    assert_eq!(err.to_string(), "Illegal Character: '!'\nFILE calc.bas, LINE 1");
    assert_eq!(err.excerpt(), "4 ! 2\n  ^");
}
