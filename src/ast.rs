//! AST types for compiled patterns.

use std::fmt;

use crate::range::CharRange;

/// Repetition policy carried by every node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cardinality {
    #[default]
    One,
    ZeroOrMore,
    AtMost(usize),
    AtLeast(usize),
    Exactly(usize),
    Between(usize, usize),
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::One => write!(f, "1"),
            Self::ZeroOrMore => write!(f, "#"),
            Self::AtMost(n) => write!(f, "<{n}"),
            Self::AtLeast(n) => write!(f, ">{n}"),
            Self::Exactly(n) => write!(f, "{n}"),
            Self::Between(n, m) => write!(f, "{n}<x<{m}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryKind {
    And,
    Or,
}

/// One pattern node: an expression plus the cardinality under which the
/// evaluator repeats it.
#[derive(Debug)]
pub struct Node {
    pub cardinality: Cardinality,
    pub expr: Expr,
}

/// The closed set of expression forms.
///
/// Nodes exclusively own their children; the tree is immutable after
/// construction and released recursively on drop.
#[derive(Debug)]
pub enum Expr {
    /// One byte within an inclusive range.
    Range(CharRange),
    /// Ordered concatenation; order is significant.
    Sequence(Vec<Node>),
    /// Boolean join of two independently evaluated sub-patterns.
    Binary {
        kind: BinaryKind,
        left: Box<Node>,
        right: Box<Node>,
    },
    /// Negates the child's match result only, not its consumption.
    Not(Box<Node>),
    /// Applies this node's cardinality to repeated evaluation of the child.
    Group(Box<Node>),
}

impl Node {
    pub fn new(cardinality: Cardinality, expr: Expr) -> Self {
        Self { cardinality, expr }
    }

    /// A node matching exactly one `byte`.
    pub fn literal(byte: u8) -> Self {
        Self::range(byte, byte)
    }

    /// A node matching one byte in `from..=to`.
    pub fn range(from: u8, to: u8) -> Self {
        Self::new(Cardinality::One, Expr::Range(CharRange::new(from, to)))
    }

    /// A node matching any single byte (the `*` wildcard).
    pub fn any() -> Self {
        Self::new(Cardinality::One, Expr::Range(CharRange::any()))
    }

    pub fn sequence(items: Vec<Node>) -> Self {
        Self::new(Cardinality::One, Expr::Sequence(items))
    }

    pub fn binary(kind: BinaryKind, left: Node, right: Node) -> Self {
        Self::new(
            Cardinality::One,
            Expr::Binary {
                kind,
                left: Box::new(left),
                right: Box::new(right),
            },
        )
    }

    pub fn negated(child: Node) -> Self {
        Self::new(Cardinality::One, Expr::Not(Box::new(child)))
    }

    /// Wrap `child` in a group repeated under `cardinality`.
    pub fn group(cardinality: Cardinality, child: Node) -> Self {
        Self::new(cardinality, Expr::Group(Box::new(child)))
    }
}
