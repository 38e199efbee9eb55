//! Read-only renderers for expression trees.
//!
//! [`tree`] prints the bracketed token notation used in diagnostics
//! and the CLI. [`format`] prints canonical source text that parses
//! back to the same tree. Both walk an explicit stack, so tree depth
//! is bounded by memory rather than by the call stack.

use std::fmt::Write as _;

use crate::ast::Node;
use crate::token::{Token, TokenKind};

/// Pending output, popped last-in first-out.
enum Step<'a> {
    Text(&'static str),
    Token(&'a Token),
    Node(&'a Node),
    /// A subtree, wrapped in parentheses when `grouped`.
    Operand(&'a Node, bool),
}

/// Render `node` as nested `(left, OP, right)` groups.
///
/// Literals print as their token (`INT:1`), unary nodes as
/// `(MINUS, operand)`.
#[must_use]
pub fn tree(node: &Node) -> String {
    let mut out = String::new();
    let mut steps = vec![Step::Node(node)];

    while let Some(step) = steps.pop() {
        match step {
            Step::Text(text) => out.push_str(text),
            Step::Token(token) | Step::Node(Node::Number(token)) => {
                let _ = write!(out, "{token}");
            }
            Step::Node(Node::BinaryOp { left, op, right }) => {
                steps.extend([
                    Step::Text(")"),
                    Step::Node(right),
                    Step::Text(", "),
                    Step::Token(op),
                    Step::Text(", "),
                    Step::Node(left),
                    Step::Text("("),
                ]);
            }
            Step::Node(Node::UnaryOp { op, operand }) => {
                steps.extend([
                    Step::Text(")"),
                    Step::Node(operand),
                    Step::Text(", "),
                    Step::Token(op),
                    Step::Text("("),
                ]);
            }
            Step::Operand(node, _) => steps.push(Step::Node(node)),
        }
    }

    out
}

/// Format `node` as source text with single spaces around binary
/// operators and the fewest parentheses that keep its shape.
///
/// Parser output without unary nodes never needs parentheses, so the
/// result re-parses under the default grammar.
#[must_use]
pub fn format(node: &Node) -> String {
    let mut out = String::new();
    let mut steps = vec![Step::Operand(node, false)];

    while let Some(step) = steps.pop() {
        match step {
            Step::Text(text) => out.push_str(text),
            Step::Token(token) => out.push_str(&token.kind.symbol()),
            Step::Operand(node, true) => {
                steps.extend([
                    Step::Text(")"),
                    Step::Operand(node, false),
                    Step::Text("("),
                ]);
            }
            Step::Operand(node, false) | Step::Node(node) => match node {
                Node::Number(token) => out.push_str(&token.kind.symbol()),
                Node::BinaryOp { left, op, right } => {
                    let level = binding(node);
                    // Left-associative: an equal-level right child needs grouping.
                    steps.extend([
                        Step::Operand(right, binding(right) <= level),
                        Step::Text(" "),
                        Step::Token(op),
                        Step::Text(" "),
                        Step::Operand(left, binding(left) < level),
                    ]);
                }
                Node::UnaryOp { op, operand } => {
                    steps.extend([
                        Step::Operand(operand, binding(operand) < UNARY),
                        Step::Token(op),
                    ]);
                }
            },
        }
    }

    out
}

const UNARY: u8 = 3;
const ATOM: u8 = 4;

const fn binding(node: &Node) -> u8 {
    match node {
        Node::Number(_) => ATOM,
        Node::UnaryOp { .. } => UNARY,
        Node::BinaryOp { op, .. } => match op.kind {
            TokenKind::Mul | TokenKind::Div => 2,
            _ => 1,
        },
    }
}
