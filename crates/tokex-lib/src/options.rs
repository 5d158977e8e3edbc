//! Options for compiling and matching.

use crate::engine::{DEFAULT_EXEC_FUEL, DEFAULT_RECURSION_FUEL};

/// Default parser recursion fuel (grammar nesting depth).
pub const DEFAULT_PARSER_RECURSION_FUEL: u32 = 256;
/// Default parser execution fuel.
pub const DEFAULT_PARSER_EXEC_FUEL: u32 = 1_000_000;

/// Options for [`compile_with`](crate::compile_with).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOptions {
    /// When false, every `@name: ... @@` definition is a compile error.
    /// Turn this off for grammars that come from untrusted parties.
    pub allow_sub_grammar_definitions: bool,
    /// Parser nesting limit; `None` disables it.
    pub recursion_fuel: Option<u32>,
    /// Parser step limit; `None` disables it.
    pub exec_fuel: Option<u32>,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            allow_sub_grammar_definitions: true,
            recursion_fuel: Some(DEFAULT_PARSER_RECURSION_FUEL),
            exec_fuel: Some(DEFAULT_PARSER_EXEC_FUEL),
        }
    }
}

impl CompileOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allow_sub_grammar_definitions(mut self, allow: bool) -> Self {
        self.allow_sub_grammar_definitions = allow;
        self
    }

    pub fn with_recursion_fuel(mut self, fuel: Option<u32>) -> Self {
        self.recursion_fuel = fuel;
        self
    }

    pub fn with_exec_fuel(mut self, fuel: Option<u32>) -> Self {
        self.exec_fuel = fuel;
        self
    }
}

/// Options for matching input against a compiled grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchOptions {
    /// Require the match to consume every token.
    pub match_entirety: bool,
    /// Matcher step limit.
    pub exec_fuel: u32,
    /// Limit on constructs active at once.
    pub recursion_fuel: u32,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            match_entirety: true,
            exec_fuel: DEFAULT_EXEC_FUEL,
            recursion_fuel: DEFAULT_RECURSION_FUEL,
        }
    }
}

impl MatchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn match_entirety(mut self, value: bool) -> Self {
        self.match_entirety = value;
        self
    }

    pub fn with_exec_fuel(mut self, fuel: u32) -> Self {
        self.exec_fuel = fuel;
        self
    }

    pub fn with_recursion_fuel(mut self, fuel: u32) -> Self {
        self.recursion_fuel = fuel;
        self
    }
}
