//! Recursive descent parser for pattern strings.

use crate::ast::{BinaryKind, Cardinality, Node};

/// Errors that can occur while parsing a pattern.
///
/// Any of these aborts the whole parse; no partial tree is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// A `:` range with no preceding literal, a missing or reserved upper
    /// bound, or inverted bounds.
    MalformedRange,
    /// A `|` or `&` with a missing operand.
    DanglingOperator(char),
    /// A unit that produced no node at all.
    EmptyUnit,
    /// A `!` with an empty operand.
    MalformedNegation,
    /// A unit opened with `(` that ran off the end of the pattern.
    UnterminatedGroup,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedRange => write!(f, "Invalid range expression in pattern"),
            Self::DanglingOperator(op) => write!(f, "Operator {op:?} is missing an operand"),
            Self::EmptyUnit => write!(f, "Empty pattern"),
            Self::MalformedNegation => write!(f, "Negation with no operand"),
            Self::UnterminatedGroup => write!(f, "Unclosed group '(' in pattern"),
        }
    }
}

impl std::error::Error for ParseError {}

/// Parse a pattern string into a [`Node`] tree.
pub fn parse(pattern: &str) -> Result<Node, ParseError> {
    Parser {
        bytes: pattern.as_bytes(),
        pos: 0,
    }
    .parse_unit()
}

struct Parser<'a> {
    bytes: &'a [u8],
    pos: usize,
}

/// Bytes with reserved meaning outside an escape.
fn is_reserved(byte: u8) -> bool {
    matches!(byte, b':' | b'|' | b'(' | b'&' | b'*' | b'!' | b')')
}

impl Parser<'_> {
    /// Parse one grammar unit: optional `(`, optional cardinality prefix,
    /// then a left-to-right scan of items merged onto an accumulator.
    ///
    /// A unit that opened with `(` consumes its closing `)`; otherwise the
    /// `)` is left for the enclosing unit.
    fn parse_unit(&mut self) -> Result<Node, ParseError> {
        let opened = self.peek() == Some(b'(');
        if opened {
            self.bump();
        }
        let cardinality = self.parse_cardinality();

        let mut run: Vec<u8> = Vec::new();
        let mut acc: Option<Node> = None;
        let mut closed = false;
        let mut escaped = false;

        while let Some(byte) = self.peek() {
            if escaped {
                run.push(byte);
                escaped = false;
                self.bump();
                continue;
            }
            match byte {
                b'\\' => {
                    escaped = true;
                    self.bump();
                }
                b'!' => {
                    self.bump();
                    flush_run(&mut run, &mut acc);
                    let operand = self.parse_unit().map_err(|err| match err {
                        ParseError::EmptyUnit => ParseError::MalformedNegation,
                        other => other,
                    })?;
                    acc = Some(concat(acc, Node::negated(operand)));
                }
                b'|' | b'&' => {
                    flush_run(&mut run, &mut acc);
                    let left = acc
                        .take()
                        .ok_or(ParseError::DanglingOperator(byte as char))?;
                    self.bump();
                    // The right operand is the entire remainder of this unit:
                    // `|` and `&` bind loosest.
                    let right = self.parse_unit().map_err(|err| match err {
                        ParseError::EmptyUnit => ParseError::DanglingOperator(byte as char),
                        other => other,
                    })?;
                    let kind = if byte == b'|' {
                        BinaryKind::Or
                    } else {
                        BinaryKind::And
                    };
                    acc = Some(Node::binary(kind, left, right));
                }
                b'(' => {
                    flush_run(&mut run, &mut acc);
                    let nested = self.parse_unit()?;
                    acc = Some(concat(acc, nested));
                }
                b')' => {
                    if opened {
                        self.bump();
                        closed = true;
                    }
                    break;
                }
                b':' => {
                    // Lower bound is the last byte of the pending literal run.
                    let Some(from) = run.pop() else {
                        return Err(ParseError::MalformedRange);
                    };
                    self.bump();
                    let to = match self.peek() {
                        Some(b'\\') => {
                            self.bump();
                            self.peek().ok_or(ParseError::MalformedRange)?
                        }
                        Some(byte) if is_reserved(byte) => {
                            return Err(ParseError::MalformedRange);
                        }
                        Some(byte) => byte,
                        None => return Err(ParseError::MalformedRange),
                    };
                    self.bump();
                    if from > to {
                        return Err(ParseError::MalformedRange);
                    }
                    flush_run(&mut run, &mut acc);
                    acc = Some(concat(acc, Node::range(from, to)));
                }
                b'*' => {
                    flush_run(&mut run, &mut acc);
                    acc = Some(concat(acc, Node::any()));
                    self.bump();
                }
                _ => {
                    run.push(byte);
                    self.bump();
                }
            }
        }

        if opened && !closed {
            return Err(ParseError::UnterminatedGroup);
        }
        flush_run(&mut run, &mut acc);
        let node = acc.ok_or(ParseError::EmptyUnit)?;
        Ok(match cardinality {
            Cardinality::One => node,
            prefix => Node::group(prefix, node),
        })
    }

    /// Recognize an optional cardinality prefix at unit start.
    ///
    /// `>`, `<` and `=` count only when a digit follows; otherwise they fall
    /// through to the literal scan.
    fn parse_cardinality(&mut self) -> Cardinality {
        match self.peek() {
            Some(b'#') => {
                self.bump();
                Cardinality::ZeroOrMore
            }
            Some(op @ (b'>' | b'<' | b'='))
                if self.peek_at(1).is_some_and(|b| b.is_ascii_digit()) =>
            {
                self.bump();
                let count = self.parse_count();
                match op {
                    b'>' => Cardinality::AtLeast(count),
                    b'<' => Cardinality::AtMost(count),
                    _ => Cardinality::Exactly(count),
                }
            }
            _ => Cardinality::One,
        }
    }

    /// Accumulate a decimal count, saturating on overflow.
    fn parse_count(&mut self) -> usize {
        let mut count = 0usize;
        while let Some(digit) = self.peek().filter(u8::is_ascii_digit) {
            count = count.saturating_mul(10).saturating_add((digit - b'0') as usize);
            self.bump();
        }
        count
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    fn bump(&mut self) {
        self.pos += 1;
    }
}

/// Collapse the pending literal run into a sequence of single-byte nodes and
/// merge it onto the accumulator.
fn flush_run(run: &mut Vec<u8>, acc: &mut Option<Node>) {
    if run.is_empty() {
        return;
    }
    let items = run.drain(..).map(Node::literal).collect();
    *acc = Some(concat(acc.take(), Node::sequence(items)));
}

/// Left-associative implicit-sequence merge.
fn concat(prev: Option<Node>, next: Node) -> Node {
    match prev {
        Some(prev) => Node::sequence(vec![prev, next]),
        None => next,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Expr;

    fn parse_ok(s: &str) -> Node {
        parse(s).expect("parse should succeed")
    }
    fn parse_err(s: &str) -> ParseError {
        parse(s).expect_err("parse should fail")
    }

    fn literal_of(node: &Node) -> u8 {
        match &node.expr {
            Expr::Range(r) if r.is_literal() => r.from,
            other => panic!("expected literal range, got {other:?}"),
        }
    }

    // --- Literal runs ---

    #[test]
    fn literal_run_collapses_into_sequence() {
        let node = parse_ok("abc");
        assert_eq!(node.cardinality, Cardinality::One);
        match &node.expr {
            Expr::Sequence(items) => {
                let bytes: Vec<u8> = items.iter().map(literal_of).collect();
                assert_eq!(bytes, b"abc");
            }
            other => panic!("expected Sequence, got {other:?}"),
        }
    }

    #[test]
    fn escape_forces_literal() {
        let node = parse_ok(r"\*\|");
        match &node.expr {
            Expr::Sequence(items) => {
                let bytes: Vec<u8> = items.iter().map(literal_of).collect();
                assert_eq!(bytes, b"*|");
            }
            other => panic!("expected Sequence, got {other:?}"),
        }
    }

    #[test]
    fn mid_unit_cardinality_bytes_are_literals() {
        // '#', '<', '>' and '=' are only special at unit start
        let node = parse_ok("a#b");
        match &node.expr {
            Expr::Sequence(items) => assert_eq!(items.len(), 3),
            other => panic!("expected Sequence, got {other:?}"),
        }
    }

    // --- Ranges ---

    #[test]
    fn range_expression() {
        let node = parse_ok("a:z");
        match &node.expr {
            Expr::Range(r) => {
                assert_eq!((r.from, r.to), (b'a', b'z'));
            }
            other => panic!("expected Range, got {other:?}"),
        }
    }

    #[test]
    fn range_takes_last_byte_of_run() {
        // "xa:z" = literal 'x' followed by range a..=z
        let node = parse_ok("xa:z");
        match &node.expr {
            Expr::Sequence(items) => {
                assert_eq!(items.len(), 2);
                match &items[1].expr {
                    Expr::Range(r) => assert_eq!((r.from, r.to), (b'a', b'z')),
                    other => panic!("expected Range, got {other:?}"),
                }
            }
            other => panic!("expected Sequence, got {other:?}"),
        }
    }

    #[test]
    fn range_upper_bound_may_be_escaped() {
        let node = parse_ok(r"a:\|");
        match &node.expr {
            Expr::Range(r) => assert_eq!((r.from, r.to), (b'a', b'|')),
            other => panic!("expected Range, got {other:?}"),
        }
    }

    #[test]
    fn range_errors() {
        assert_eq!(parse_err("a:"), ParseError::MalformedRange);
        assert_eq!(parse_err(":b"), ParseError::MalformedRange);
        assert_eq!(parse_err("a:|"), ParseError::MalformedRange);
        assert_eq!(parse_err(r"a:\"), ParseError::MalformedRange);
        assert_eq!(parse_err("z:a"), ParseError::MalformedRange);
    }

    // --- Wildcard ---

    #[test]
    fn wildcard_is_full_range() {
        let node = parse_ok("*");
        match &node.expr {
            Expr::Range(r) => assert!(r.is_any()),
            other => panic!("expected Range, got {other:?}"),
        }
    }

    // --- Cardinality prefixes ---

    #[test]
    fn cardinality_prefixes() {
        assert_eq!(parse_ok("#ab").cardinality, Cardinality::ZeroOrMore);
        assert_eq!(parse_ok(">12x").cardinality, Cardinality::AtLeast(12));
        assert_eq!(parse_ok("<3x").cardinality, Cardinality::AtMost(3));
        assert_eq!(parse_ok("=4x").cardinality, Cardinality::Exactly(4));
    }

    #[test]
    fn prefix_wraps_unit_in_group() {
        let node = parse_ok("#ab");
        match &node.expr {
            Expr::Group(child) => {
                assert_eq!(child.cardinality, Cardinality::One);
                assert!(matches!(child.expr, Expr::Sequence(_)));
            }
            other => panic!("expected Group, got {other:?}"),
        }
    }

    #[test]
    fn comparison_byte_without_digit_is_literal() {
        let node = parse_ok(">x");
        match &node.expr {
            Expr::Sequence(items) => {
                let bytes: Vec<u8> = items.iter().map(literal_of).collect();
                assert_eq!(bytes, b">x");
            }
            other => panic!("expected Sequence, got {other:?}"),
        }
    }

    // --- Negation ---

    #[test]
    fn negation_wraps_one_unit() {
        let node = parse_ok("!a");
        assert!(matches!(node.expr, Expr::Not(_)));
    }

    #[test]
    fn negation_errors() {
        assert_eq!(parse_err("!"), ParseError::MalformedNegation);
        assert_eq!(parse_err("(!)"), ParseError::MalformedNegation);
    }

    // --- Binary combinators ---

    #[test]
    fn alternation_binds_loosest() {
        let node = parse_ok("ab|cd");
        match &node.expr {
            Expr::Binary { kind, left, right } => {
                assert_eq!(*kind, BinaryKind::Or);
                assert!(matches!(left.expr, Expr::Sequence(_)));
                assert!(matches!(right.expr, Expr::Sequence(_)));
            }
            other => panic!("expected Binary, got {other:?}"),
        }
    }

    #[test]
    fn conjunction() {
        let node = parse_ok("a&b");
        match &node.expr {
            Expr::Binary { kind, .. } => assert_eq!(*kind, BinaryKind::And),
            other => panic!("expected Binary, got {other:?}"),
        }
    }

    #[test]
    fn dangling_operator_errors() {
        assert_eq!(parse_err("a|"), ParseError::DanglingOperator('|'));
        assert_eq!(parse_err("|a"), ParseError::DanglingOperator('|'));
        assert_eq!(parse_err("a&"), ParseError::DanglingOperator('&'));
    }

    // --- Groups ---

    #[test]
    fn nested_group_concatenates() {
        // "x(>1y)" = literal x, then a counted group
        let node = parse_ok("x(>1y)");
        match &node.expr {
            Expr::Sequence(items) => {
                assert_eq!(items.len(), 2);
                assert_eq!(items[1].cardinality, Cardinality::AtLeast(1));
            }
            other => panic!("expected Sequence, got {other:?}"),
        }
    }

    #[test]
    fn top_level_group_ends_at_its_paren() {
        // A pattern whose top-level unit opens with '(' ends at the matching
        // ')'; trailing text is ignored.
        let node = parse_ok("(a)b");
        match &node.expr {
            Expr::Sequence(items) => assert_eq!(items.len(), 1),
            other => panic!("expected Sequence, got {other:?}"),
        }
    }

    #[test]
    fn unterminated_group() {
        assert_eq!(parse_err("(ab"), ParseError::UnterminatedGroup);
        assert_eq!(parse_err("("), ParseError::UnterminatedGroup);
    }

    // --- Empty units ---

    #[test]
    fn empty_pattern_errors() {
        assert_eq!(parse_err(""), ParseError::EmptyUnit);
        assert_eq!(parse_err("()"), ParseError::EmptyUnit);
        assert_eq!(parse_err("#"), ParseError::EmptyUnit);
    }
}
