//! Invariant checks excluded from coverage reports.

#![cfg_attr(coverage_nightly, coverage(off))]

use super::core::Parser;
use super::cst::SyntaxKind;

impl Parser<'_> {
    #[inline]
    pub(super) fn assert_current(&mut self, expected_kind: SyntaxKind) {
        let current_kind = self.current();
        assert_eq!(
            current_kind, expected_kind,
            "broken parser invariant: expected {:?} but found {:?} (upstream caller's responsibility)",
            expected_kind, current_kind,
        );
    }

    /// Every production pops what it pushes, even when recovering.
    #[inline]
    pub(super) fn assert_delimiters_closed(&self) {
        assert!(
            self.open.is_empty(),
            "broken parser invariant: {} delimiter(s) left open at end of input",
            self.open.len(),
        );
    }
}
