pub mod ast;
pub mod check;
pub mod dump;
pub mod exec;
pub mod grammar_loader;
pub mod run_common;
pub mod tokens;
pub mod trace;

#[cfg(test)]
mod grammar_loader_tests;
