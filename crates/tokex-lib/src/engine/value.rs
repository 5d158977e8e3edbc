//! Values produced by a successful match.

use indexmap::IndexMap;
use serde::Serialize;

/// Key under which the top-level capture map is stored.
pub const WHOLE_MATCH: &str = "$match";

/// Named captures in grammar order.
pub type Captures = IndexMap<String, Value>;

/// A captured value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Text of a single token.
    Token(String),
    /// Token texts of a multi-token capture, or the values of a repeated capture.
    List(Vec<Value>),
    /// Nested named captures.
    Map(Captures),
}

impl Value {
    pub fn as_token(&self) -> Option<&str> {
        match self {
            Value::Token(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Captures> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Token texts in match order, flattening lists and maps.
    pub fn texts(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_texts(&mut out);
        out
    }

    fn collect_texts<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Value::Token(text) => out.push(text),
            Value::List(items) => items.iter().for_each(|item| item.collect_texts(out)),
            Value::Map(map) => map.values().for_each(|item| item.collect_texts(out)),
        }
    }
}

/// Outcome of one matcher run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MatchResult {
    pub matched: bool,
    /// Index one past the last consumed token.
    pub end: usize,
    /// Holds [`WHOLE_MATCH`] when `matched`.
    pub captures: Captures,
}

impl MatchResult {
    pub fn no_match() -> Self {
        Self::default()
    }

    /// The top-level capture map, if the run matched.
    pub fn whole_match(&self) -> Option<&Captures> {
        if !self.matched {
            return None;
        }
        self.captures.get(WHOLE_MATCH).and_then(Value::as_map)
    }

    pub fn into_whole_match(mut self) -> Option<Captures> {
        if !self.matched {
            return None;
        }
        match self.captures.shift_remove(WHOLE_MATCH) {
            Some(Value::Map(map)) => Some(map),
            _ => None,
        }
    }
}
