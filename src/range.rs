//! Inclusive byte ranges, the atomic matchers of the pattern language.

/// An inclusive range of byte values.
///
/// A literal byte is the degenerate range `from == to`; the `*` wildcard is
/// the full span `0..=255`.  Invariant: `from <= to` (the parser rejects
/// inverted `a:b` ranges).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharRange {
    pub from: u8,
    pub to: u8,
}

impl CharRange {
    pub fn new(from: u8, to: u8) -> Self {
        Self { from, to }
    }

    /// The range matching exactly one byte value.
    pub fn literal(byte: u8) -> Self {
        Self::new(byte, byte)
    }

    /// The range matching any byte (the `*` wildcard).
    pub fn any() -> Self {
        Self::new(u8::MIN, u8::MAX)
    }

    pub fn contains(&self, byte: u8) -> bool {
        self.from <= byte && byte <= self.to
    }

    pub fn is_literal(&self) -> bool {
        self.from == self.to
    }

    pub fn is_any(&self) -> bool {
        self.from == u8::MIN && self.to == u8::MAX
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_matches_only_itself() {
        let r = CharRange::literal(b'x');
        assert!(r.contains(b'x'));
        assert!(!r.contains(b'y'));
        assert!(r.is_literal());
    }

    #[test]
    fn range_bounds_are_inclusive() {
        let r = CharRange::new(b'a', b'z');
        assert!(r.contains(b'a'));
        assert!(r.contains(b'm'));
        assert!(r.contains(b'z'));
        assert!(!r.contains(b'A'));
        assert!(!r.contains(b'{'));
    }

    #[test]
    fn any_matches_every_byte() {
        let r = CharRange::any();
        assert!(r.contains(0x00));
        assert!(r.contains(b'\n'));
        assert!(r.contains(0xff));
        assert!(r.is_any());
        assert!(!r.is_literal());
    }
}
