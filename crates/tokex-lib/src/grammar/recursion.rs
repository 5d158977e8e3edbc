//! Escape path analysis for recursive definitions.
//!
//! A group of mutually recursive definitions where every path leads back into
//! the group can never finish matching. Left recursion that does have an exit
//! is left to the matcher's zero-progress guard.

use indexmap::{IndexMap, IndexSet};
use rowan::TextRange;

use super::ParsedGrammar;
use super::symbol_table::SymbolTable;
use crate::diagnostics::DiagnosticKind;
use crate::parser::Expr;

impl ParsedGrammar<'_> {
    pub(super) fn validate_recursion(&mut self, symbols: &SymbolTable) {
        for scc in find_sccs(symbols) {
            let scc_set: IndexSet<&str> = scc.iter().map(String::as_str).collect();

            let has_escape = scc.iter().any(|name| {
                symbols
                    .get(name.as_str())
                    .and_then(|def| def.body())
                    .is_none_or(|body| expr_has_escape(&body, &scc_set))
            });
            if has_escape {
                continue;
            }

            let chain = build_cycle_chain(symbols, &scc);
            self.emit_recursion_error(symbols, &scc, chain);
        }
    }

    fn emit_recursion_error(
        &mut self,
        symbols: &SymbolTable,
        scc: &[String],
        related: Vec<(TextRange, String)>,
    ) {
        let primary_name = &scc[0];
        let mut cycle: Vec<_> = scc.iter().map(|s| format!("`{s}`")).collect();
        cycle.push(format!("`{primary_name}`"));
        let cycle_str = cycle.join(" → ");

        let def_range = symbols
            .get(primary_name.as_str())
            .and_then(|def| def.name())
            .map(|n| n.text_range());

        let range = related
            .first()
            .map(|(r, _)| *r)
            .or(def_range)
            .unwrap_or_else(|| TextRange::empty(0.into()));

        let mut builder = self
            .diagnostics
            .report(DiagnosticKind::RecursionNoEscape, range)
            .message(format!("cycle {cycle_str}"));

        for (rel_range, rel_msg) in related {
            builder = builder.related_to(rel_msg, rel_range);
        }

        if scc.len() > 1
            && let Some(range) = def_range
        {
            builder = builder.related_to(format!("`{primary_name}` is defined here"), range);
        }

        builder.emit();
    }
}

/// Tarjan's algorithm over the reference graph. Only recursive components are returned.
fn find_sccs(symbols: &SymbolTable) -> Vec<Vec<String>> {
    struct State<'a> {
        symbols: &'a SymbolTable,
        index: usize,
        stack: Vec<String>,
        on_stack: IndexSet<String>,
        indices: IndexMap<String, usize>,
        lowlinks: IndexMap<String, usize>,
        sccs: Vec<Vec<String>>,
    }

    fn strongconnect(name: &str, state: &mut State<'_>) {
        state.indices.insert(name.to_string(), state.index);
        state.lowlinks.insert(name.to_string(), state.index);
        state.index += 1;
        state.stack.push(name.to_string());
        state.on_stack.insert(name.to_string());

        for ref_name in &refs_of(state.symbols, name) {
            if !state.symbols.contains_key(ref_name.as_str()) {
                continue;
            }
            let candidate = if !state.indices.contains_key(ref_name.as_str()) {
                strongconnect(ref_name, state);
                state.lowlinks[ref_name.as_str()]
            } else if state.on_stack.contains(ref_name.as_str()) {
                state.indices[ref_name.as_str()]
            } else {
                continue;
            };
            if let Some(my_lowlink) = state.lowlinks.get_mut(name) {
                *my_lowlink = (*my_lowlink).min(candidate);
            }
        }

        if state.lowlinks[name] != state.indices[name] {
            return;
        }
        let mut scc = Vec::new();
        while let Some(w) = state.stack.pop() {
            state.on_stack.swap_remove(&w);
            let done = w == name;
            scc.push(w);
            if done {
                break;
            }
        }
        state.sccs.push(scc);
    }

    let mut state = State {
        symbols,
        index: 0,
        stack: Vec::new(),
        on_stack: IndexSet::new(),
        indices: IndexMap::new(),
        lowlinks: IndexMap::new(),
        sccs: Vec::new(),
    };

    for name in symbols.keys() {
        if !state.indices.contains_key(name) {
            strongconnect(name, &mut state);
        }
    }

    state
        .sccs
        .into_iter()
        .filter(|scc| scc.len() > 1 || refs_of(symbols, &scc[0]).contains(scc[0].as_str()))
        .map(|mut scc| {
            // Tarjan pops in reverse discovery order
            scc.reverse();
            scc
        })
        .collect()
}

/// Walks the component as a cycle so each hop can be pointed at.
fn build_cycle_chain(symbols: &SymbolTable, scc: &[String]) -> Vec<(TextRange, String)> {
    fn find_path(
        current: &str,
        start: &str,
        scc_set: &IndexSet<&str>,
        symbols: &SymbolTable,
        visited: &mut IndexSet<String>,
        path: &mut Vec<String>,
    ) -> bool {
        if visited.contains(current) {
            return current == start && !path.is_empty();
        }
        visited.insert(current.to_string());
        path.push(current.to_string());

        for ref_name in &refs_of(symbols, current) {
            if scc_set.contains(ref_name.as_str())
                && find_path(ref_name, start, scc_set, symbols, visited, path)
            {
                return true;
            }
        }

        path.pop();
        false
    }

    let scc_set: IndexSet<&str> = scc.iter().map(String::as_str).collect();
    let mut visited = IndexSet::new();
    let mut path = Vec::new();
    find_path(&scc[0], &scc[0], &scc_set, symbols, &mut visited, &mut path);

    if path.len() == 1 {
        let name = &path[0];
        return find_reference_location(symbols, name, name)
            .map(|range| vec![(range, format!("`{name}` references itself"))])
            .unwrap_or_default();
    }

    path.iter()
        .enumerate()
        .filter_map(|(i, from)| {
            let to = &path[(i + 1) % path.len()];
            find_reference_location(symbols, from, to).map(|range| {
                let msg = if i == path.len() - 1 {
                    format!("`{from}` references `{to}` (completing cycle)")
                } else {
                    format!("`{from}` references `{to}`")
                };
                (range, msg)
            })
        })
        .collect()
}

fn find_reference_location(symbols: &SymbolTable, from: &str, to: &str) -> Option<TextRange> {
    let body = symbols.get(from)?.body()?;
    find_ref_in_expr(&body, to)
}

fn expr_has_escape(expr: &Expr, scc: &IndexSet<&str>) -> bool {
    match expr {
        Expr::Ref(r) => r.name().is_none_or(|name| !scc.contains(name.text())),
        Expr::Alt(_) => expr.children().iter().any(|c| expr_has_escape(c, scc)),
        Expr::Quantifier(q) => {
            q.is_optional() || q.inner().is_none_or(|inner| expr_has_escape(&inner, scc))
        }
        Expr::Seq(_) | Expr::Group(_) | Expr::Capture(_) => {
            expr.children().iter().all(|c| expr_has_escape(c, scc))
        }
        Expr::Str(_)
        | Expr::Bare(_)
        | Expr::Pattern(_)
        | Expr::AnyToken(_)
        | Expr::WordClass(_)
        | Expr::SingleChar(_) => true,
    }
}

fn refs_of(symbols: &SymbolTable, name: &str) -> IndexSet<String> {
    let mut refs = IndexSet::new();
    if let Some(body) = symbols.get(name).and_then(|def| def.body()) {
        collect_refs_into(&body, &mut refs);
    }
    refs
}

fn collect_refs_into(expr: &Expr, refs: &mut IndexSet<String>) {
    if let Expr::Ref(r) = expr
        && let Some(name_token) = r.name()
    {
        refs.insert(name_token.text().to_string());
    }

    for child in expr.children() {
        collect_refs_into(&child, refs);
    }
}

fn find_ref_in_expr(expr: &Expr, target: &str) -> Option<TextRange> {
    if let Expr::Ref(r) = expr {
        let name_token = r.name()?;
        if name_token.text() == target {
            return Some(name_token.text_range());
        }
    }

    expr.children()
        .iter()
        .find_map(|child| find_ref_in_expr(child, target))
}
