//! Errors that can occur during matching.
//!
//! Ordinary non-match is not an error; these are the structural failures.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MatchSafetyError {
    /// A sub-grammar was entered again at the token where it is already active.
    #[error("sub-grammar `{name}` re-entered at token {position} without consuming input")]
    ZeroProgressRecursion { name: String, position: usize },

    /// Execution fuel exhausted (too many matcher steps).
    #[error("matching step limit exceeded ({0} steps)")]
    ExecFuelExhausted(u32),

    /// Recursion fuel exhausted (too many nested constructs active at once).
    #[error("matching depth limit exceeded ({0} nested constructs)")]
    RecursionLimitExceeded(u32),

    /// The grammar refers to a name missing from its table.
    #[error("sub-grammar `{0}` is not defined")]
    UnknownSubGrammar(String),
}
