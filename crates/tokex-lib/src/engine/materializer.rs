//! Materializer turns an effect log into output values.

use indexmap::IndexSet;

use crate::tokenizer::Token;

use super::effect::Effect;
use super::value::{Captures, Value};

/// Materializer transforms effect logs into output values.
pub trait Materializer<'g> {
    type Output;

    fn materialize(&self, effects: &[Effect<'g>]) -> Self::Output;
}

/// Builds the top-level capture map as a [`Value::Map`].
pub struct ValueMaterializer<'t> {
    tokens: &'t [Token<'t>],
}

impl<'t> ValueMaterializer<'t> {
    pub fn new(tokens: &'t [Token<'t>]) -> Self {
        Self { tokens }
    }

    fn capture_value(&self, scope: Scope<'_>, end: usize) -> Value {
        if !scope.entries.is_empty() {
            return Value::Map(scope.entries);
        }
        let mut texts = self
            .tokens
            .get(scope.start..end)
            .unwrap_or_default()
            .iter()
            .map(|t| Value::Token(t.text.to_string()));
        if scope.scalar && end == scope.start + 1
            && let Some(token) = texts.next()
        {
            return token;
        }
        Value::List(texts.collect())
    }
}

/// Capture scope under construction.
#[derive(Default)]
struct Scope<'g> {
    start: usize,
    scalar: bool,
    entries: Captures,
    /// Names already holding a list of captures.
    lists: IndexSet<&'g str>,
    /// Open repetitions with `max > 1` inside this scope.
    repeat_depth: u32,
}

impl<'g> Scope<'g> {
    fn insert(&mut self, name: &'g str, value: Value) {
        if self.lists.contains(name) {
            if let Some(Value::List(items)) = self.entries.get_mut(name) {
                items.push(value);
            }
            return;
        }

        match self.entries.get_mut(name) {
            Some(existing) => {
                let first = std::mem::replace(existing, Value::List(Vec::new()));
                *existing = Value::List(vec![first, value]);
                self.lists.insert(name);
            }
            None if self.repeat_depth > 0 => {
                self.entries.insert(name.to_string(), Value::List(vec![value]));
                self.lists.insert(name);
            }
            None => {
                self.entries.insert(name.to_string(), value);
            }
        }
    }
}

impl<'g> Materializer<'g> for ValueMaterializer<'_> {
    type Output = Value;

    fn materialize(&self, effects: &[Effect<'g>]) -> Value {
        let mut stack: Vec<(Option<&'g str>, Scope<'g>)> = vec![(None, Scope::default())];

        for effect in effects {
            match *effect {
                Effect::Open {
                    name,
                    start,
                    scalar,
                } => {
                    let scope = Scope {
                        start,
                        scalar,
                        ..Scope::default()
                    };
                    stack.push((Some(name), scope));
                }
                Effect::Close { end } => {
                    let (name, scope) = stack.pop().expect("Close without Open");
                    let name = name.expect("Close popped the root scope");
                    let value = self.capture_value(scope, end);
                    let (_, parent) = stack.last_mut().expect("root scope is never popped");
                    parent.insert(name, value);
                }
                Effect::RepeatOpen => {
                    let (_, scope) = stack.last_mut().expect("root scope is never popped");
                    scope.repeat_depth += 1;
                }
                Effect::RepeatClose => {
                    let (_, scope) = stack.last_mut().expect("root scope is never popped");
                    scope.repeat_depth = scope.repeat_depth.saturating_sub(1);
                }
            }
        }

        debug_assert_eq!(stack.len(), 1, "unbalanced capture effects");
        let (_, root) = stack.swap_remove(0);
        Value::Map(root.entries)
    }
}
