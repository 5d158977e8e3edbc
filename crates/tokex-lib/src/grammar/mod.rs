//! Grammar compilation pipeline.
//!
//! Stages: parse → definitions → references → recursion → lowering.
//! Every stage reports into the same diagnostics; any error fails compilation,
//! but all stages still run so that one pass reports as much as possible.

mod dump;
mod lower;
mod node;
mod printer;
mod recursion;
mod symbol_table;

#[cfg(test)]
mod grammar_tests;

pub use node::{CompiledGrammar, GrammarNode, SubGrammarTable, TokenRegex, is_word};
pub use printer::{GrammarPrinter, PatternPrinter};
pub use symbol_table::SymbolTable;

use crate::diagnostics::Diagnostics;
use crate::parser::{self, ParseResult, Root, SyntaxNode};
use crate::{CompileOptions, Error, Result};

pub struct GrammarBuilder<'src> {
    source: &'src str,
    options: CompileOptions,
}

impl<'src> GrammarBuilder<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            options: CompileOptions::default(),
        }
    }

    pub fn with_options(mut self, options: &CompileOptions) -> Self {
        self.options = options.clone();
        self
    }

    /// Fails only when the parser runs out of fuel; syntax errors land in diagnostics.
    pub fn parse(self) -> Result<ParsedGrammar<'src>> {
        let ParseResult { root, diagnostics } = parser::parse(
            self.source,
            self.options.exec_fuel,
            self.options.recursion_fuel,
        )?;

        Ok(ParsedGrammar {
            source: self.source,
            root,
            diagnostics,
            options: self.options,
        })
    }
}

pub struct ParsedGrammar<'src> {
    source: &'src str,
    root: Root,
    diagnostics: Diagnostics,
    options: CompileOptions,
}

impl<'src> ParsedGrammar<'src> {
    pub fn analyze(mut self) -> AnalyzedGrammar<'src> {
        let symbols = self.collect_definitions();
        self.check_references(&symbols);
        self.validate_recursion(&symbols);

        let table = self.lower_table(&symbols);
        let root = self.lower_root();

        AnalyzedGrammar {
            source: self.source,
            root: self.root,
            symbols,
            diagnostics: self.diagnostics,
            compiled: CompiledGrammar::new(root, table),
        }
    }

    pub fn root(&self) -> &Root {
        &self.root
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }
}

/// A grammar after every compile stage has run, valid or not.
#[derive(Debug, Clone)]
pub struct AnalyzedGrammar<'src> {
    source: &'src str,
    root: Root,
    symbols: SymbolTable,
    diagnostics: Diagnostics,
    compiled: CompiledGrammar,
}

impl<'src> AnalyzedGrammar<'src> {
    pub fn is_valid(&self) -> bool {
        !self.diagnostics.has_errors()
    }

    pub fn source(&self) -> &'src str {
        self.source
    }

    pub fn root(&self) -> &Root {
        &self.root
    }

    pub fn syntax(&self) -> &SyntaxNode {
        self.root.as_cst()
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// The lowered tree. Only meaningful when [`is_valid`](Self::is_valid).
    pub fn compiled(&self) -> &CompiledGrammar {
        &self.compiled
    }

    pub fn into_compiled(self) -> Result<CompiledGrammar> {
        if self.is_valid() {
            Ok(self.compiled)
        } else {
            Err(Error::GrammarCompile(self.diagnostics))
        }
    }
}

/// Runs the whole pipeline.
pub fn analyze<'src>(source: &'src str, options: &CompileOptions) -> Result<AnalyzedGrammar<'src>> {
    Ok(GrammarBuilder::new(source)
        .with_options(options)
        .parse()?
        .analyze())
}
