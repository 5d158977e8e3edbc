//! Symbol table: definition collection and reference checking.
//!
//! Two-pass approach:
//! 1. Collect every `@name: ... @@` definition, at any depth
//! 2. Check that every `@name@` reference is defined

use indexmap::{IndexMap, IndexSet};

use crate::diagnostics::DiagnosticKind;
use crate::parser::ast::Def;

use super::ParsedGrammar;

/// Definition name to its syntax node, in source order.
pub type SymbolTable = IndexMap<String, Def>;

impl ParsedGrammar<'_> {
    pub(super) fn collect_definitions(&mut self) -> SymbolTable {
        let mut symbols = SymbolTable::new();

        for def in self.root.defs() {
            let Some(name_token) = def.name() else {
                continue;
            };
            let name = name_token.text();

            if !self.options.allow_sub_grammar_definitions {
                self.diagnostics
                    .report(DiagnosticKind::DefinitionNotAllowed, name_token.text_range())
                    .emit();
            }

            if let Some(first) = symbols.get(name).and_then(Def::name) {
                self.diagnostics
                    .report(DiagnosticKind::DuplicateDefinition, name_token.text_range())
                    .message(name)
                    .related_to("first defined here", first.text_range())
                    .emit();
                continue;
            }

            symbols.insert(name.to_string(), def);
        }

        symbols
    }

    pub(super) fn check_references(&mut self, symbols: &SymbolTable) {
        let mut referenced = IndexSet::new();

        for r in self.root.refs() {
            let Some(name_token) = r.name() else {
                continue;
            };
            let name = name_token.text();

            if symbols.contains_key(name) {
                referenced.insert(name.to_string());
                continue;
            }

            self.diagnostics
                .report(DiagnosticKind::UndefinedReference, name_token.text_range())
                .message(name)
                .emit();
        }

        for (name, def) in symbols {
            if referenced.contains(name) {
                continue;
            }
            let Some(name_token) = def.name() else {
                continue;
            };
            self.diagnostics
                .report(DiagnosticKind::UnusedDefinition, name_token.text_range())
                .message(name)
                .emit();
        }
    }
}
