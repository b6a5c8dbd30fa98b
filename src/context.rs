// ABOUTME: The host-supplied, read-only context bag evaluation resolves identifiers against

use crate::value::Value;
use std::collections::BTreeMap;

/// A mapping from string to value, supplied by the host at evaluation time.
///
/// Read-only from the evaluator's perspective — nothing in this crate ever
/// takes `&mut Context` after construction (spec §5 "Shared resources").
#[derive(Debug, Clone, Default)]
pub struct Context {
    root: BTreeMap<String, Value>,
}

impl Context {
    pub fn new() -> Self {
        Context {
            root: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.root.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.root.get(key)
    }
}

impl From<serde_json::Value> for Context {
    fn from(json: serde_json::Value) -> Self {
        let root = match Value::from(json) {
            Value::Map(map) => map,
            _ => BTreeMap::new(),
        };
        Context { root }
    }
}

impl From<&Context> for serde_json::Value {
    fn from(ctx: &Context) -> Self {
        serde_json::Value::Object(
            ctx.root
                .iter()
                .map(|(k, v)| (k.clone(), serde_json::Value::from(v)))
                .collect(),
        )
    }
}
