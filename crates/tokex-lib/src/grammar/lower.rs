//! Lowering from the typed AST to the compiled pattern tree.
//!
//! Lowering always produces a tree. Invalid pieces are reported and replaced
//! by the closest harmless node so that later diagnostics stay meaningful.

use rowan::TextRange;

use super::ParsedGrammar;
use super::node::{GrammarNode, SubGrammarTable, TokenRegex};
use super::symbol_table::SymbolTable;
use crate::diagnostics::DiagnosticKind;
use crate::parser::ast::{self, Expr};

impl ParsedGrammar<'_> {
    pub(super) fn lower_table(&mut self, symbols: &SymbolTable) -> SubGrammarTable {
        let mut table = SubGrammarTable::new();
        for (name, def) in symbols {
            let body = match def.body() {
                Some(body) => self.lower_expr(&body),
                None => GrammarNode::empty(),
            };
            table.insert(name.clone(), body);
        }
        table
    }

    pub(super) fn lower_root(&mut self) -> GrammarNode {
        match self.root.body() {
            Some(body) => self.lower_expr(&body),
            None => GrammarNode::empty(),
        }
    }

    fn lower_expr(&mut self, expr: &Expr) -> GrammarNode {
        match expr {
            Expr::Seq(seq) => {
                let mut children: Vec<_> = seq.children().map(|c| self.lower_expr(&c)).collect();
                if children.len() == 1 {
                    children.pop().unwrap_or_else(GrammarNode::empty)
                } else {
                    GrammarNode::Sequence(children)
                }
            }
            Expr::Alt(alt) => {
                GrammarNode::Alternation(alt.branches().map(|b| self.lower_expr(&b)).collect())
            }
            Expr::Group(group) => self.lower_optional(group.inner()),
            Expr::Str(s) => self.lower_str(s),
            Expr::Bare(bare) => bare
                .word()
                .map(|w| GrammarNode::Literal(w.text().to_string()))
                .unwrap_or_else(GrammarNode::empty),
            Expr::Pattern(pattern) => self.lower_pattern(pattern),
            Expr::AnyToken(_) => GrammarNode::AnyToken,
            Expr::WordClass(_) => GrammarNode::Word,
            Expr::SingleChar(_) => GrammarNode::AnySingleChar,
            Expr::Quantifier(q) => self.lower_quantifier(q),
            Expr::Capture(capture) => {
                let body = self.lower_optional(capture.inner());
                match capture.name() {
                    Some(name) => GrammarNode::NamedCapture {
                        name: name.text().to_string(),
                        body: Box::new(body),
                    },
                    None => body,
                }
            }
            Expr::Ref(r) => r
                .name()
                .map(|name| GrammarNode::SubGrammarRef(name.text().to_string()))
                .unwrap_or_else(GrammarNode::empty),
        }
    }

    fn lower_optional(&mut self, expr: Option<Expr>) -> GrammarNode {
        match expr {
            Some(expr) => self.lower_expr(&expr),
            None => GrammarNode::empty(),
        }
    }

    fn lower_str(&mut self, s: &ast::Str) -> GrammarNode {
        let text = s.value().map(|v| unescape(v.text())).unwrap_or_default();
        if text.is_empty() {
            self.diagnostics
                .report(DiagnosticKind::EmptyLiteral, s.as_cst().text_range())
                .emit();
        }
        GrammarNode::Literal(text)
    }

    fn lower_pattern(&mut self, pattern: &ast::Pattern) -> GrammarNode {
        let range = pattern.as_cst().text_range();
        let source = pattern.source().unwrap_or_default();
        if source.is_empty() {
            self.diagnostics
                .report(DiagnosticKind::InvalidRegex, range)
                .message("empty pattern")
                .emit();
            return GrammarNode::AnyToken;
        }
        match TokenRegex::new(&source) {
            Ok(regex) => GrammarNode::Regex(regex),
            Err(err) => {
                self.diagnostics
                    .report(DiagnosticKind::InvalidRegex, range)
                    .message(first_line(&err.to_string()))
                    .emit();
                GrammarNode::AnyToken
            }
        }
    }

    fn lower_quantifier(&mut self, q: &ast::Quantifier) -> GrammarNode {
        let body = self.lower_optional(q.inner());

        let bounds = if let Some(op) = q.operator() {
            match op.text() {
                "*" => Some((0, None)),
                "+" => Some((1, None)),
                _ => Some((0, Some(1))),
            }
        } else if let Some(bounds) = q.bounds() {
            self.lower_bounds(&bounds)
        } else {
            None
        };

        match bounds {
            Some((min, max)) => GrammarNode::Repetition {
                body: Box::new(body),
                min,
                max,
            },
            None => body,
        }
    }

    /// Validates `{n}`, `{n,}`, `{,m}` and `{n,m}`.
    fn lower_bounds(&mut self, bounds: &ast::Bounds) -> Option<(u32, Option<u32>)> {
        let range = bounds.as_cst().text_range();
        let min_token = bounds.min();
        let max_token = bounds.max();

        let min = match &min_token {
            Some(t) => Some(self.parse_bound(t.text(), t.text_range())?),
            None => None,
        };
        let max = match &max_token {
            Some(t) => Some(self.parse_bound(t.text(), t.text_range())?),
            None => None,
        };

        let resolved = match (min, max, bounds.has_comma()) {
            (None, None, _) => {
                self.bounds_error(range, "at least one bound is required");
                return None;
            }
            (Some(n), None, false) => (n, Some(n)),
            (n, m, _) => (n.unwrap_or(0), m),
        };

        match resolved {
            (_, Some(0)) => {
                self.bounds_error(range, "maximum must be at least 1");
                None
            }
            (n, Some(m)) if n > m => {
                self.bounds_error(range, &format!("minimum {n} exceeds maximum {m}"));
                None
            }
            ok => Some(ok),
        }
    }

    fn parse_bound(&mut self, text: &str, range: TextRange) -> Option<u32> {
        match text.parse::<u32>() {
            Ok(n) => Some(n),
            Err(_) => {
                self.bounds_error(range, &format!("`{text}` is not a number"));
                None
            }
        }
    }

    fn bounds_error(&mut self, range: TextRange, detail: &str) {
        self.diagnostics
            .report(DiagnosticKind::InvalidRepetitionBounds, range)
            .message(detail)
            .emit();
    }
}

/// Processes `\\ \' \" \n \t`. Any other escaped character is kept as written.
fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some(escaped @ ('\\' | '\'' | '"')) => out.push(escaped),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or(text)
}
