use std::fmt::Write;

use rowan::NodeOrToken;

use super::AnalyzedGrammar;
use super::node::{CompiledGrammar, GrammarNode, format_bounds};
use crate::Colors;
use crate::parser::ast::{self, Expr};
use crate::parser::{SyntaxKind, SyntaxNode};

/// Dumps the syntax of a grammar: typed AST by default, raw CST with `raw(true)`.
pub struct GrammarPrinter<'g, 'src> {
    grammar: &'g AnalyzedGrammar<'src>,
    raw: bool,
    trivia: bool,
    spans: bool,
    symbols: bool,
}

impl<'g, 'src> GrammarPrinter<'g, 'src> {
    pub fn new(grammar: &'g AnalyzedGrammar<'src>) -> Self {
        Self {
            grammar,
            raw: false,
            trivia: false,
            spans: false,
            symbols: false,
        }
    }

    pub fn raw(mut self, value: bool) -> Self {
        self.raw = value;
        self
    }

    pub fn with_trivia(mut self, value: bool) -> Self {
        self.trivia = value;
        self
    }

    pub fn with_spans(mut self, value: bool) -> Self {
        self.spans = value;
        self
    }

    pub fn only_symbols(mut self, value: bool) -> Self {
        self.symbols = value;
        self
    }

    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        if self.symbols {
            self.format_symbols(w)
        } else if self.raw {
            self.format_cst(self.grammar.syntax(), 0, w)
        } else {
            self.format_root(self.grammar.root(), w)
        }
    }

    fn format_symbols(&self, w: &mut impl Write) -> std::fmt::Result {
        for (name, def) in self.grammar.symbols() {
            let span = self.span_str(def.as_cst().text_range());
            writeln!(w, "{name}{span}")?;
        }
        Ok(())
    }

    fn format_cst(&self, node: &SyntaxNode, indent: usize, w: &mut impl Write) -> std::fmt::Result {
        let prefix = "  ".repeat(indent);
        let span = self.span_str(node.text_range());

        writeln!(w, "{}{:?}{}", prefix, node.kind(), span)?;

        for child in node.children_with_tokens() {
            match child {
                NodeOrToken::Node(n) => self.format_cst(&n, indent + 1, w)?,
                NodeOrToken::Token(t) => {
                    if self.trivia || !t.kind().is_trivia() {
                        let child_prefix = "  ".repeat(indent + 1);
                        let child_span = self.span_str(t.text_range());
                        writeln!(
                            w,
                            "{}{:?}{} {:?}",
                            child_prefix,
                            t.kind(),
                            child_span,
                            t.text()
                        )?;
                    }
                }
            }
        }
        Ok(())
    }

    fn format_root(&self, root: &ast::Root, w: &mut impl Write) -> std::fmt::Result {
        let span = self.span_str(root.as_cst().text_range());
        writeln!(w, "Root{span}")?;
        if let Some(body) = root.body() {
            self.format_expr(&body, 1, w)?;
        }
        Ok(())
    }

    fn format_def(&self, def: &ast::Def, indent: usize, w: &mut impl Write) -> std::fmt::Result {
        let prefix = "  ".repeat(indent);
        let span = self.span_str(def.as_cst().text_range());
        match def.name() {
            Some(name) => writeln!(w, "{}Def{} {}", prefix, span, name.text())?,
            None => writeln!(w, "{prefix}Def{span}")?,
        }
        if let Some(body) = def.body() {
            self.format_expr(&body, indent + 1, w)?;
        }
        Ok(())
    }

    fn format_expr(&self, expr: &Expr, indent: usize, w: &mut impl Write) -> std::fmt::Result {
        let prefix = "  ".repeat(indent);
        let span = self.span_str(expr.as_cst().text_range());

        match expr {
            Expr::Seq(seq) => {
                writeln!(w, "{prefix}Seq{span}")?;
                // Definitions keep their position among the items
                for child in seq.as_cst().children() {
                    if child.kind() == SyntaxKind::Def {
                        if let Some(def) = ast::Def::cast(child) {
                            self.format_def(&def, indent + 1, w)?;
                        }
                    } else if let Some(item) = Expr::cast(child) {
                        self.format_expr(&item, indent + 1, w)?;
                    }
                }
                return Ok(());
            }
            Expr::Alt(_) => writeln!(w, "{prefix}Alt{span}")?,
            Expr::Group(_) => writeln!(w, "{prefix}Group{span}")?,
            Expr::Str(s) => {
                let value = s.value().map(|t| t.text().to_string()).unwrap_or_default();
                writeln!(w, "{prefix}Str{span} {value:?}")?;
            }
            Expr::Bare(b) => {
                let word = b.word().map(|t| t.text().to_string()).unwrap_or_default();
                writeln!(w, "{prefix}Bare{span} {word}")?;
            }
            Expr::Pattern(p) => {
                let source = p.source().unwrap_or_default();
                writeln!(w, "{prefix}Pattern{span} ~{source}~")?;
            }
            Expr::AnyToken(_) => writeln!(w, "{prefix}AnyToken{span}")?,
            Expr::WordClass(_) => writeln!(w, "{prefix}WordClass{span}")?,
            Expr::SingleChar(_) => writeln!(w, "{prefix}SingleChar{span}")?,
            Expr::Quantifier(q) => {
                let op = match (q.operator(), q.bounds()) {
                    (Some(op), _) => op.text().to_string(),
                    (None, Some(bounds)) => bounds.as_cst().text().to_string(),
                    (None, None) => String::new(),
                };
                writeln!(w, "{prefix}Quantifier{span} {op}")?;
            }
            Expr::Capture(c) => {
                let name = c.name().map(|t| t.text().to_string()).unwrap_or_default();
                writeln!(w, "{prefix}Capture{span} {name}")?;
            }
            Expr::Ref(r) => {
                let name = r.name().map(|t| t.text().to_string()).unwrap_or_default();
                writeln!(w, "{prefix}Ref{span} {name}")?;
            }
        }

        for child in expr.children() {
            self.format_expr(&child, indent + 1, w)?;
        }
        Ok(())
    }

    fn span_str(&self, range: rowan::TextRange) -> String {
        if !self.spans {
            return String::new();
        }
        format!(
            " [{}..{}]",
            u32::from(range.start()),
            u32::from(range.end())
        )
    }
}

impl<'src> AnalyzedGrammar<'src> {
    pub fn printer(&self) -> GrammarPrinter<'_, 'src> {
        GrammarPrinter::new(self)
    }
}

/// Dumps a compiled pattern tree and its sub-grammar table.
pub struct PatternPrinter<'g> {
    grammar: &'g CompiledGrammar,
    colors: Colors,
}

impl<'g> PatternPrinter<'g> {
    pub fn new(grammar: &'g CompiledGrammar) -> Self {
        Self {
            grammar,
            colors: Colors::OFF,
        }
    }

    pub fn colored(mut self, enabled: bool) -> Self {
        self.colors = Colors::new(enabled);
        self
    }

    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        let c = &self.colors;
        writeln!(w, "{}Root{}", c.dim, c.reset)?;
        self.format_node(&self.grammar.root, 1, w)?;
        for (name, body) in self.grammar.table.iter() {
            writeln!(w, "{}Def{} {}{}{}", c.dim, c.reset, c.blue, name, c.reset)?;
            self.format_node(body, 1, w)?;
        }
        Ok(())
    }

    fn format_node(&self, node: &GrammarNode, indent: usize, w: &mut impl Write) -> std::fmt::Result {
        let c = &self.colors;
        let prefix = "  ".repeat(indent);
        match node {
            GrammarNode::Literal(text) => {
                writeln!(w, "{prefix}Literal {}{text:?}{}", c.green, c.reset)
            }
            GrammarNode::Word => writeln!(w, "{prefix}Word"),
            GrammarNode::AnySingleChar => writeln!(w, "{prefix}AnySingleChar"),
            GrammarNode::AnyToken => writeln!(w, "{prefix}AnyToken"),
            GrammarNode::Regex(regex) => {
                writeln!(w, "{prefix}Regex {}~{}~{}", c.green, regex.pattern(), c.reset)
            }
            GrammarNode::Sequence(children) => {
                writeln!(w, "{prefix}Sequence")?;
                children
                    .iter()
                    .try_for_each(|child| self.format_node(child, indent + 1, w))
            }
            GrammarNode::Alternation(children) => {
                writeln!(w, "{prefix}Alternation")?;
                children
                    .iter()
                    .try_for_each(|child| self.format_node(child, indent + 1, w))
            }
            GrammarNode::Repetition { body, min, max } => {
                let bounds = format_bounds(*min, *max);
                writeln!(w, "{prefix}Repetition {}{bounds}{}", c.dim, c.reset)?;
                self.format_node(body, indent + 1, w)
            }
            GrammarNode::NamedCapture { name, body } => {
                writeln!(w, "{prefix}Capture {}{name}{}", c.blue, c.reset)?;
                self.format_node(body, indent + 1, w)
            }
            GrammarNode::SubGrammarRef(name) => {
                writeln!(w, "{prefix}Ref {}{name}{}", c.blue, c.reset)
            }
        }
    }
}

impl CompiledGrammar {
    pub fn printer(&self) -> PatternPrinter<'_> {
        PatternPrinter::new(self)
    }
}
