//! Test-only dump methods for grammar inspection.
