//! Typed AST wrappers over CST nodes.
//!
//! Each struct wraps a `SyntaxNode` and provides typed accessors.
//! Cast is infallible for correct `SyntaxKind` - validation happens elsewhere.

use super::cst::{SyntaxKind, SyntaxNode, SyntaxToken};

macro_rules! ast_node {
    ($name:ident, $kind:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(SyntaxNode);

        impl $name {
            pub fn cast(node: SyntaxNode) -> Option<Self> {
                (node.kind() == SyntaxKind::$kind).then(|| Self(node))
            }

            pub fn as_cst(&self) -> &SyntaxNode {
                &self.0
            }
        }
    };
}

ast_node!(Root, Root);
ast_node!(Def, Def);
ast_node!(Alt, Alt);
ast_node!(Seq, Seq);
ast_node!(Group, Group);
ast_node!(Str, Str);
ast_node!(Bare, Bare);
ast_node!(Pattern, Pattern);
ast_node!(AnyToken, AnyToken);
ast_node!(WordClass, WordClass);
ast_node!(SingleChar, SingleChar);
ast_node!(Quantifier, Quantifier);
ast_node!(Bounds, Bounds);
ast_node!(Capture, Capture);
ast_node!(Ref, Ref);

/// Any pattern that produces a matcher node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expr {
    Alt(Alt),
    Seq(Seq),
    Group(Group),
    Str(Str),
    Bare(Bare),
    Pattern(Pattern),
    AnyToken(AnyToken),
    WordClass(WordClass),
    SingleChar(SingleChar),
    Quantifier(Quantifier),
    Capture(Capture),
    Ref(Ref),
}

impl Expr {
    pub fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::Alt => Alt::cast(node).map(Expr::Alt),
            SyntaxKind::Seq => Seq::cast(node).map(Expr::Seq),
            SyntaxKind::Group => Group::cast(node).map(Expr::Group),
            SyntaxKind::Str => Str::cast(node).map(Expr::Str),
            SyntaxKind::Bare => Bare::cast(node).map(Expr::Bare),
            SyntaxKind::Pattern => Pattern::cast(node).map(Expr::Pattern),
            SyntaxKind::AnyToken => AnyToken::cast(node).map(Expr::AnyToken),
            SyntaxKind::WordClass => WordClass::cast(node).map(Expr::WordClass),
            SyntaxKind::SingleChar => SingleChar::cast(node).map(Expr::SingleChar),
            SyntaxKind::Quantifier => Quantifier::cast(node).map(Expr::Quantifier),
            SyntaxKind::Capture => Capture::cast(node).map(Expr::Capture),
            SyntaxKind::Ref => Ref::cast(node).map(Expr::Ref),
            _ => None,
        }
    }

    pub fn as_cst(&self) -> &SyntaxNode {
        match self {
            Expr::Alt(n) => n.as_cst(),
            Expr::Seq(n) => n.as_cst(),
            Expr::Group(n) => n.as_cst(),
            Expr::Str(n) => n.as_cst(),
            Expr::Bare(n) => n.as_cst(),
            Expr::Pattern(n) => n.as_cst(),
            Expr::AnyToken(n) => n.as_cst(),
            Expr::WordClass(n) => n.as_cst(),
            Expr::SingleChar(n) => n.as_cst(),
            Expr::Quantifier(n) => n.as_cst(),
            Expr::Capture(n) => n.as_cst(),
            Expr::Ref(n) => n.as_cst(),
        }
    }

    /// Direct sub-expressions. Definitions are not expressions and are skipped.
    pub fn children(&self) -> Vec<Expr> {
        match self {
            Expr::Alt(a) => a.branches().collect(),
            Expr::Seq(s) => s.children().collect(),
            Expr::Group(g) => g.inner().into_iter().collect(),
            Expr::Quantifier(q) => q.inner().into_iter().collect(),
            Expr::Capture(c) => c.inner().into_iter().collect(),
            Expr::Str(_)
            | Expr::Bare(_)
            | Expr::Pattern(_)
            | Expr::AnyToken(_)
            | Expr::WordClass(_)
            | Expr::SingleChar(_)
            | Expr::Ref(_) => Vec::new(),
        }
    }
}

fn first_token(node: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxToken> {
    node.children_with_tokens()
        .filter_map(|it| it.into_token())
        .find(|t| t.kind() == kind)
}

impl Root {
    /// The top-level pattern: a `Seq` or an `Alt`.
    pub fn body(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }

    /// Every definition in the grammar, at any depth, in source order.
    pub fn defs(&self) -> impl Iterator<Item = Def> + '_ {
        self.0.descendants().filter_map(Def::cast)
    }

    /// Every reference in the grammar, at any depth, in source order.
    pub fn refs(&self) -> impl Iterator<Item = Ref> + '_ {
        self.0.descendants().filter_map(Ref::cast)
    }
}

impl Def {
    pub fn name(&self) -> Option<SyntaxToken> {
        first_token(&self.0, SyntaxKind::Id)
    }

    pub fn body(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }
}

impl Alt {
    /// One `Seq` per branch.
    pub fn branches(&self) -> impl Iterator<Item = Expr> + '_ {
        self.0.children().filter_map(Expr::cast)
    }
}

impl Seq {
    /// Pattern items; definitions nested in the sequence are skipped.
    pub fn children(&self) -> impl Iterator<Item = Expr> + '_ {
        self.0.children().filter_map(Expr::cast)
    }

    pub fn defs(&self) -> impl Iterator<Item = Def> + '_ {
        self.0.children().filter_map(Def::cast)
    }
}

impl Group {
    pub fn inner(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }
}

impl Str {
    /// Raw text between the quotes, escapes not yet processed. `None` for `''`.
    pub fn value(&self) -> Option<SyntaxToken> {
        first_token(&self.0, SyntaxKind::StrVal)
    }
}

impl Bare {
    pub fn word(&self) -> Option<SyntaxToken> {
        first_token(&self.0, SyntaxKind::Id)
    }
}

impl Pattern {
    pub fn literal(&self) -> Option<SyntaxToken> {
        first_token(&self.0, SyntaxKind::RegexLiteral)
    }

    /// Regex source with the surrounding `~` stripped and `\~` unescaped.
    pub fn source(&self) -> Option<String> {
        let token = self.literal()?;
        let text = token.text();
        let inner = text.strip_prefix('~')?.strip_suffix('~')?;
        Some(inner.replace("\\~", "~"))
    }
}

impl Quantifier {
    pub fn inner(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }

    /// `*`, `+` or `?`; `None` when the quantifier is written with braces.
    pub fn operator(&self) -> Option<SyntaxToken> {
        self.0
            .children_with_tokens()
            .filter_map(|it| it.into_token())
            .find(|t| {
                matches!(
                    t.kind(),
                    SyntaxKind::Star | SyntaxKind::Plus | SyntaxKind::Question
                )
            })
    }

    pub fn bounds(&self) -> Option<Bounds> {
        self.0.children().find_map(Bounds::cast)
    }

    /// Whether zero repetitions are accepted. Malformed bounds count as optional.
    pub fn is_optional(&self) -> bool {
        if let Some(op) = self.operator() {
            return op.kind() != SyntaxKind::Plus;
        }
        let Some(bounds) = self.bounds() else {
            return true;
        };
        bounds
            .min()
            .and_then(|t| t.text().parse::<u32>().ok())
            .is_none_or(|min| min == 0)
    }
}

impl Bounds {
    pub fn min(&self) -> Option<SyntaxToken> {
        self.0
            .children_with_tokens()
            .filter_map(|it| it.into_token())
            .take_while(|t| t.kind() != SyntaxKind::Comma)
            .find(|t| t.kind() == SyntaxKind::Id)
    }

    pub fn max(&self) -> Option<SyntaxToken> {
        self.0
            .children_with_tokens()
            .filter_map(|it| it.into_token())
            .skip_while(|t| t.kind() != SyntaxKind::Comma)
            .find(|t| t.kind() == SyntaxKind::Id)
    }

    pub fn has_comma(&self) -> bool {
        first_token(&self.0, SyntaxKind::Comma).is_some()
    }
}

impl Capture {
    pub fn name(&self) -> Option<SyntaxToken> {
        first_token(&self.0, SyntaxKind::Id)
    }

    pub fn inner(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }
}

impl Ref {
    pub fn name(&self) -> Option<SyntaxToken> {
        first_token(&self.0, SyntaxKind::Id)
    }
}
