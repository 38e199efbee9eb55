use std::{fmt, mem};

use crate::position::Span;
use crate::token::{Token, TokenKind};

/// A parsed expression.
///
/// Children are owned through `Box`, so a tree has no sharing and
/// no back references. Long operator chains nest as deep as they are
/// long, so every traversal here (including `Drop` and `PartialEq`)
/// walks an explicit stack instead of recursing.
pub enum Node {
    /// Number literal wrapping an `Int` or `Float` token.
    Number(Token),
    /// `left op right`, where `op` is `+`, `-`, `*` or `/`.
    BinaryOp {
        left: Box<Self>,
        op: Token,
        right: Box<Self>,
    },
    /// `op operand` for a leading `+` or `-`.
    ///
    /// Only produced when sign and grouping support is enabled.
    UnaryOp { op: Token, operand: Box<Self> },
}

impl Node {
    #[must_use]
    pub fn binary(left: Self, op: Token, right: Self) -> Self {
        Self::BinaryOp {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    #[must_use]
    pub fn unary(op: Token, operand: Self) -> Self {
        Self::UnaryOp {
            op,
            operand: Box::new(operand),
        }
    }

    /// Source range covered by this node, from its leftmost token to
    /// its rightmost token.
    #[must_use]
    pub fn span(&self) -> Span {
        let mut first = self;
        let start = loop {
            match first {
                Self::Number(token) => break &token.span,
                Self::BinaryOp { left, .. } => first = &**left,
                Self::UnaryOp { op, .. } => break &op.span,
            }
        };

        let mut last = self;
        let end = loop {
            match last {
                Self::Number(token) => break &token.span,
                Self::BinaryOp { right, .. } => last = &**right,
                Self::UnaryOp { operand, .. } => last = &**operand,
            }
        };

        start.to(end)
    }

    /// Operator kind for operator nodes, `None` for literals.
    #[must_use]
    pub const fn operator(&self) -> Option<TokenKind> {
        match self {
            Self::Number(_) => None,
            Self::BinaryOp { op, .. } | Self::UnaryOp { op, .. } => Some(op.kind),
        }
    }

    /// Number of nodes in the tree.
    #[must_use]
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut pending = vec![self];

        while let Some(node) = pending.pop() {
            count += 1;
            match node {
                Self::Number(_) => {}
                Self::BinaryOp { left, right, .. } => {
                    pending.push(left);
                    pending.push(right);
                }
                Self::UnaryOp { operand, .. } => pending.push(operand),
            }
        }

        count
    }

    /// Move the children out, leaving cheap leaves in their place.
    fn detach_children(&mut self, into: &mut Vec<Self>) {
        match self {
            Self::Number(_) => {}
            Self::BinaryOp { left, op, right } => {
                into.push(mem::replace(&mut **left, Self::Number(op.clone())));
                into.push(mem::replace(&mut **right, Self::Number(op.clone())));
            }
            Self::UnaryOp { op, operand } => {
                into.push(mem::replace(&mut **operand, Self::Number(op.clone())));
            }
        }
    }
}

impl Drop for Node {
    fn drop(&mut self) {
        if let Self::Number(_) = self {
            return;
        }

        let mut pending = Vec::new();
        self.detach_children(&mut pending);
        while let Some(mut node) = pending.pop() {
            node.detach_children(&mut pending);
        }
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        let mut pending = vec![(self, other)];

        while let Some(pair) = pending.pop() {
            match pair {
                (Self::Number(a), Self::Number(b)) => {
                    if a != b {
                        return false;
                    }
                }
                (
                    Self::BinaryOp {
                        left: l1,
                        op: o1,
                        right: r1,
                    },
                    Self::BinaryOp {
                        left: l2,
                        op: o2,
                        right: r2,
                    },
                ) => {
                    if o1 != o2 {
                        return false;
                    }
                    pending.push((&**l1, &**l2));
                    pending.push((&**r1, &**r2));
                }
                (Self::UnaryOp { op: o1, operand: a }, Self::UnaryOp { op: o2, operand: b }) => {
                    if o1 != o2 {
                        return false;
                    }
                    pending.push((&**a, &**b));
                }
                _ => return false,
            }
        }

        true
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node({self})")
    }
}

/// Renders the bracketed tree notation, e.g. `(INT:1, PLUS, INT:2)`.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::formatter::tree(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::run;

    fn chain(ops: usize) -> String {
        format!("1{}", "+1".repeat(ops))
    }

    #[test]
    fn long_chain_drops_without_overflow() {
        let node = run("<test>", &chain(200_000)).expect("parse failed");
        assert_eq!(node.node_count(), 400_001);
        drop(node);
    }

    #[test]
    fn long_chain_span_and_equality() {
        let src = chain(100_000);
        let a = run("<test>", &src).expect("parse failed");
        let b = run("<test>", &src).expect("parse failed");
        assert!(a == b);
        let span = a.span();
        assert_eq!(span.start.index(), 0);
        assert_eq!(span.end.index(), src.len());
    }

    #[test]
    fn equality_sees_operator_and_shape() {
        let sum = run("<test>", "1+2").expect("parse failed");
        let diff = run("<test>", "1-2").expect("parse failed");
        let lone = run("<test>", "1").expect("parse failed");
        assert!(sum != diff);
        assert!(sum != lone);
    }

    #[test]
    fn debug_uses_tree_notation() {
        let node = run("<test>", "2*3").expect("parse failed");
        assert_eq!(format!("{node:?}"), "Node((INT:2, MUL, INT:3))");
    }
}
