//! Compiled pattern tree.

use std::fmt;
use std::sync::LazyLock;

use indexmap::IndexMap;
use regex_automata::meta::{BuildError, Regex};

/// A node of the compiled pattern tree. Immutable once lowering finishes.
#[derive(Debug, Clone, PartialEq)]
pub enum GrammarNode {
    /// A token whose text equals the literal.
    Literal(String),
    /// A token made only of word characters.
    Word,
    /// A token of exactly one character.
    AnySingleChar,
    /// Any token.
    AnyToken,
    /// A token the regex matches in full.
    Regex(TokenRegex),
    Sequence(Vec<GrammarNode>),
    /// Ordered choice.
    Alternation(Vec<GrammarNode>),
    /// Greedy repetition; `max: None` is unbounded.
    Repetition {
        body: Box<GrammarNode>,
        min: u32,
        max: Option<u32>,
    },
    NamedCapture {
        name: String,
        body: Box<GrammarNode>,
    },
    /// Resolved by name through the sub-grammar table at match time.
    SubGrammarRef(String),
}

impl GrammarNode {
    /// Empty sequence: matches without consuming anything.
    pub fn empty() -> Self {
        GrammarNode::Sequence(Vec::new())
    }

    /// Terminal nodes consume exactly one token.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            GrammarNode::Literal(_)
                | GrammarNode::Word
                | GrammarNode::AnySingleChar
                | GrammarNode::AnyToken
                | GrammarNode::Regex(_)
        )
    }

    /// Whether every match of this node consumes exactly one token.
    ///
    /// Sub-grammar references are not followed and count as multi-token.
    pub fn is_single_token(&self) -> bool {
        match self {
            GrammarNode::Sequence(children) => {
                matches!(children.as_slice(), [only] if only.is_single_token())
            }
            GrammarNode::Alternation(children) => {
                !children.is_empty() && children.iter().all(GrammarNode::is_single_token)
            }
            GrammarNode::Repetition {
                body,
                min: 1,
                max: Some(1),
            } => body.is_single_token(),
            GrammarNode::NamedCapture { body, .. } => body.is_single_token(),
            node => node.is_terminal(),
        }
    }

    /// Whether a terminal node accepts the token text. Always false for non-terminals.
    pub fn accepts(&self, text: &str) -> bool {
        match self {
            GrammarNode::Literal(literal) => literal == text,
            GrammarNode::Word => is_word(text),
            GrammarNode::AnySingleChar => text.chars().count() == 1,
            GrammarNode::AnyToken => true,
            GrammarNode::Regex(regex) => regex.is_full_match(text),
            _ => false,
        }
    }

    /// Short label used by tracing and dumps.
    pub fn label(&self) -> String {
        match self {
            GrammarNode::Literal(text) => format!("{text:?}"),
            GrammarNode::Word => "%".to_string(),
            GrammarNode::AnySingleChar => ".".to_string(),
            GrammarNode::AnyToken => "$".to_string(),
            GrammarNode::Regex(regex) => format!("~{}~", regex.pattern()),
            GrammarNode::Sequence(children) => format!("seq[{}]", children.len()),
            GrammarNode::Alternation(children) => format!("alt[{}]", children.len()),
            GrammarNode::Repetition { min, max, .. } => format_bounds(*min, *max),
            GrammarNode::NamedCapture { name, .. } => format!("<{name}>"),
            GrammarNode::SubGrammarRef(name) => format!("@{name}@"),
        }
    }
}

pub(crate) fn format_bounds(min: u32, max: Option<u32>) -> String {
    match (min, max) {
        (0, None) => "*".to_string(),
        (1, None) => "+".to_string(),
        (0, Some(1)) => "?".to_string(),
        (n, Some(m)) if n == m => format!("{{{n}}}"),
        (n, None) => format!("{{{n},}}"),
        (n, Some(m)) => format!("{{{n},{m}}}"),
    }
}

static WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\w+$").expect("word regex is valid"));

/// Same notion of "word" as the input tokenizer's `\w+`.
pub fn is_word(text: &str) -> bool {
    WORD.is_match(text)
}

/// A regex anchored at both ends, so it only accepts whole tokens.
#[derive(Clone)]
pub struct TokenRegex {
    pattern: String,
    regex: Regex,
}

impl TokenRegex {
    /// Fails unless `pattern` is a valid regex on its own, so that it cannot close
    /// the anchoring group early.
    pub fn new(pattern: &str) -> Result<Self, BuildError> {
        Regex::new(pattern)?;
        let regex = Regex::new(&format!("^(?:{pattern})$"))?;
        Ok(Self {
            pattern: pattern.to_string(),
            regex,
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn is_full_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

impl PartialEq for TokenRegex {
    fn eq(&self, other: &Self) -> bool {
        self.pattern == other.pattern
    }
}

impl fmt::Debug for TokenRegex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TokenRegex").field(&self.pattern).finish()
    }
}

/// Named sub-grammars in definition order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubGrammarTable {
    entries: IndexMap<String, GrammarNode>,
}

impl SubGrammarTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` and keeps the existing body when `name` is already present.
    pub fn insert(&mut self, name: impl Into<String>, body: GrammarNode) -> bool {
        match self.entries.entry(name.into()) {
            indexmap::map::Entry::Occupied(_) => false,
            indexmap::map::Entry::Vacant(entry) => {
                entry.insert(body);
                true
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&GrammarNode> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &GrammarNode)> {
        self.entries.iter().map(|(name, body)| (name.as_str(), body))
    }
}

/// Root pattern plus the sub-grammar table. Shared freely across matches.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledGrammar {
    pub(crate) root: GrammarNode,
    pub(crate) table: SubGrammarTable,
}

impl CompiledGrammar {
    pub fn new(root: GrammarNode, table: SubGrammarTable) -> Self {
        Self { root, table }
    }

    pub fn root(&self) -> &GrammarNode {
        &self.root
    }

    pub fn table(&self) -> &SubGrammarTable {
        &self.table
    }
}
