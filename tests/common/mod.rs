#![allow(dead_code)]

use basic_lang::{Node, ParseOptions, TokenKind, format, parse_with, run, run_with, tokenize};

/// Parse with the default grammar, panicking on any error.
pub fn ast(input: &str) -> Node {
    run("<test>", input).unwrap_or_else(|e| panic!("failed to parse {input:?}:\n{e}"))
}

/// Parse with both grammar extensions enabled.
pub fn strict_ast(input: &str) -> Node {
    run_with("<test>", input, ParseOptions::strict())
        .unwrap_or_else(|e| panic!("failed to parse {input:?}:\n{e}"))
}

/// Token kinds of `input`, panicking on a lex error.
pub fn kinds(input: &str) -> Vec<TokenKind> {
    tokenize("<test>", input)
        .unwrap_or_else(|e| panic!("failed to tokenize {input:?}:\n{e}"))
        .into_iter()
        .map(|t| t.kind)
        .collect()
}

/// Format a tree, parse the text back, and assert the shape is unchanged.
pub fn assert_format_roundtrip(original: &Node, options: ParseOptions) {
    let formatted = format(original);
    let tokens = tokenize("<formatted>", &formatted)
        .unwrap_or_else(|e| panic!("formatted output does not lex: {e}\n{formatted}"));
    let parsed = parse_with(&tokens, options)
        .unwrap_or_else(|e| panic!("formatted output does not parse: {e}\n{formatted}"));

    assert_eq!(
        original.to_string(),
        parsed.to_string(),
        "shape mismatch\n--- formatted ---\n{formatted}"
    );
}
