//! A tiny anchored pattern matcher.
//!
//! Compiles a compact pattern language into an owned expression tree and
//! matches it against an input string from a given start position, reporting
//! success and how far the scan advanced. Matching is byte-oriented and
//! anchored: the pattern matches at the caret or not at all, there is no
//! search over offsets.
//!
//! # Pattern syntax
//!
//! | Token   | Meaning                                         |
//! |---------|-------------------------------------------------|
//! | `x`     | One literal byte                                |
//! | `\x`    | Escaped literal (even if `x` is reserved)       |
//! | `a:b`   | One byte in the inclusive range `a..=b`         |
//! | `*`     | Exactly one byte of any value                   |
//! | `!X`    | Negate the match result of `X`                  |
//! | `X\|Y`  | Either side matches                             |
//! | `X&Y`   | Both sides match                                |
//! | `(X)`   | Grouping                                        |
//! | `#X`    | Zero or more (prefix, at unit start)            |
//! | `>nX`   | At least n                                      |
//! | `<nX`   | At most n                                       |
//! | `=nX`   | Exactly n                                       |
//!
//! `|` and `&` bind loosest within a unit and evaluate both sides from the
//! same position; the final caret is the *smaller* of the two branch carets,
//! whichever branch matched.
//!
//! # Example
//!
//! ```rust
//! use rxtree::{match_at, parse};
//!
//! // One '|'-delimited table cell: '|', then a nonempty run of non-'|' bytes.
//! let cell = parse("\\|(>1!\\|)").unwrap();
//!
//! let result = match_at(&cell, "| A | B |", 0);
//! assert!(result.matched);
//! assert_eq!(result.end, 4); // scanned "| A " up to the next '|'
//! ```

pub mod ast;
pub mod matcher;
pub mod parser;
pub mod range;
pub mod render;

pub use ast::{BinaryKind, Cardinality, Expr, Node};
pub use matcher::{MatchResult, match_at};
pub use parser::{ParseError, parse};
pub use range::CharRange;
pub use render::render;
