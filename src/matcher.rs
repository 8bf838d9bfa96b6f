//! Pattern evaluator: anchored matching of a compiled [`Node`] tree.
//!
//! All positions are **byte** indices into the input. Matching is a single
//! deterministic pass with no backtracking: alternatives commit to the
//! structure produced at parse time.

use crate::ast::{BinaryKind, Cardinality, Expr, Node};

/// The outcome of [`match_at`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchResult {
    pub matched: bool,
    /// Final caret position. On failure this is a diagnostic hint, not a
    /// stability guarantee.
    pub end: usize,
}

/// One evaluation step.
///
/// `End` reports a byte test at or past the input's logical end. Unlike
/// `NoMatch` it survives `!` inversion, so a negated test cannot succeed by
/// running off the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Match,
    NoMatch,
    End,
}

impl Step {
    fn matched(self) -> bool {
        matches!(self, Step::Match)
    }
}

/// Match `node` against `input`, scanning from byte position `start`.
///
/// The pattern must match at the caret or not at all; there is no search.
pub fn match_at(node: &Node, input: &str, start: usize) -> MatchResult {
    let mut caret = start;
    let step = eval(input.as_bytes(), &mut caret, node);
    MatchResult {
        matched: step.matched(),
        end: caret,
    }
}

// ─── Cardinality dispatch ───────────────────────────────────────────────────

/// Evaluate `node` under its own cardinality, advancing `caret`.
fn eval(input: &[u8], caret: &mut usize, node: &Node) -> Step {
    if *caret > input.len() {
        return Step::End;
    }
    let cardinality = node.cardinality;
    if cardinality == Cardinality::One {
        return eval_once(input, caret, node);
    }

    let mut count = 0usize;
    while eval_once(input, caret, node).matched() {
        count += 1;
        let over = match cardinality {
            Cardinality::AtMost(k) | Cardinality::Exactly(k) => count > k,
            Cardinality::Between(_, m) => count > m,
            _ => false,
        };
        if over {
            return Step::NoMatch;
        }
    }
    // The final failed attempt consumed one byte; step back.
    *caret = caret.saturating_sub(1);
    let ok = match cardinality {
        Cardinality::One => count == 1,
        Cardinality::ZeroOrMore => true,
        Cardinality::AtMost(k) => count <= k,
        Cardinality::AtLeast(k) => count >= k,
        Cardinality::Exactly(k) => count == k,
        Cardinality::Between(k, m) => (k..=m).contains(&count),
    };
    if ok { Step::Match } else { Step::NoMatch }
}

// ─── Expression dispatch ────────────────────────────────────────────────────

fn eval_once(input: &[u8], caret: &mut usize, node: &Node) -> Step {
    match &node.expr {
        Expr::Range(range) => {
            let byte = input.get(*caret).copied();
            *caret += 1; // a byte test always consumes, even on failure
            match byte {
                Some(b) if range.contains(b) => Step::Match,
                Some(_) => Step::NoMatch,
                None => Step::End,
            }
        }
        Expr::Binary { kind, left, right } => {
            // Both branches evaluate speculatively from the same caret; the
            // shorter consumption wins regardless of which branch matched.
            let mut left_caret = *caret;
            let mut right_caret = *caret;
            let left_step = eval(input, &mut left_caret, left);
            let right_step = eval(input, &mut right_caret, right);
            *caret = left_caret.min(right_caret);
            let ok = match kind {
                BinaryKind::And => left_step.matched() && right_step.matched(),
                BinaryKind::Or => left_step.matched() || right_step.matched(),
            };
            if ok {
                Step::Match
            } else if left_step == Step::End || right_step == Step::End {
                Step::End
            } else {
                Step::NoMatch
            }
        }
        Expr::Not(child) => match eval(input, caret, child) {
            Step::Match => Step::NoMatch,
            Step::NoMatch => Step::Match,
            Step::End => Step::End,
        },
        Expr::Sequence(items) => {
            for item in items {
                let step = eval(input, caret, item);
                if !step.matched() {
                    // Caret stays partially advanced; no rollback.
                    return step;
                }
            }
            Step::Match
        }
        Expr::Group(child) => eval(input, caret, child),
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
