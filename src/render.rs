//! Diagnostic tree renderer.

use std::fmt::Write;

use crate::ast::{BinaryKind, Expr, Node};
use crate::range::CharRange;

/// Render `node` as an indented diagnostic tree, one line per node.
///
/// Purely observational: deterministic for a given tree, never consulted by
/// the evaluator.
pub fn render(node: &Node) -> String {
    let mut out = String::new();
    render_node(node, " ", &mut out);
    out
}

fn render_node(node: &Node, prefix: &str, out: &mut String) {
    let child_prefix = format!("{prefix} ");
    match &node.expr {
        Expr::Range(range) => {
            let _ = writeln!(out, "{prefix} - {}", leaf_label(range));
        }
        Expr::Group(child) => {
            let _ = writeln!(out, "{prefix} + ({}) group:", node.cardinality);
            render_node(child, &child_prefix, out);
        }
        Expr::Not(child) => {
            let _ = writeln!(out, "{prefix} + ({}) not:", node.cardinality);
            render_node(child, &child_prefix, out);
        }
        Expr::Binary { kind, left, right } => {
            let label = match kind {
                BinaryKind::And => "and",
                BinaryKind::Or => "or",
            };
            let _ = writeln!(out, "{prefix} + ({}) {label}:", node.cardinality);
            render_node(left, &child_prefix, out);
            render_node(right, &child_prefix, out);
        }
        Expr::Sequence(items) => {
            let _ = writeln!(out, "{prefix} + ({}) sequence:", node.cardinality);
            for item in items {
                render_node(item, &child_prefix, out);
            }
        }
    }
}

fn leaf_label(range: &CharRange) -> String {
    if range.is_any() {
        "any *".to_string()
    } else if range.is_literal() {
        format!("char {}", range.from.escape_ascii())
    } else {
        format!(
            "range ({} - {})",
            range.from.escape_ascii(),
            range.to.escape_ascii()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::match_at;
    use crate::parser::parse;

    #[test]
    fn renders_leaf_kinds() {
        assert_eq!(render(&parse("a:z").unwrap()), "  - range (a - z)\n");
        assert_eq!(render(&parse("*").unwrap()), "  - any *\n");
    }

    #[test]
    fn renders_composites_with_cardinality() {
        let tree = render(&parse("(>1!x)").unwrap());
        assert_eq!(
            tree,
            "  + (>1) group:\n   + (1) not:\n    + (1) sequence:\n     - char x\n"
        );
    }

    #[test]
    fn renders_sequences_indented() {
        let tree = render(&parse("ab").unwrap());
        assert_eq!(tree, "  + (1) sequence:\n   - char a\n   - char b\n");
    }

    #[test]
    fn escapes_unprintable_bytes() {
        let tree = render(&parse("!\n").unwrap());
        assert_eq!(tree, "  + (1) not:\n   + (1) sequence:\n    - char \\n\n");
    }

    #[test]
    fn rendering_does_not_affect_matching() {
        let node = parse("a(#!x)b").unwrap();
        let before = match_at(&node, "aqqb", 0);
        let first = render(&node);
        assert_eq!(render(&node), first);
        assert_eq!(match_at(&node, "aqqb", 0), before);
    }
}
