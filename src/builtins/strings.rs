// ABOUTME: lower/upper/trim, contains/containsAny, startsWith/endsWith, join, split

use super::arg;
use crate::value::Value;

pub fn lower(args: &[Value]) -> Value {
    match arg(args, 0) {
        Value::String(s) => Value::String(s.to_lowercase()),
        other => other,
    }
}

pub fn upper(args: &[Value]) -> Value {
    match arg(args, 0) {
        Value::String(s) => Value::String(s.to_uppercase()),
        other => other,
    }
}

/// Trims the ASCII whitespace set the lexer uses, extended with Unicode
/// whitespace via `str::trim` (spec §4.4).
pub fn trim(args: &[Value]) -> Value {
    match arg(args, 0) {
        Value::String(s) => Value::String(s.trim().to_string()),
        other => other,
    }
}

pub fn contains(args: &[Value]) -> Value {
    let (a, b) = (arg(args, 0), arg(args, 1));
    let result = match (&a, &b) {
        (Value::Array(items), needle) => items.iter().any(|item| item.deep_eq(needle)),
        (Value::String(haystack), Value::String(needle)) => haystack.contains(needle.as_str()),
        _ => false,
    };
    Value::Bool(result)
}

pub fn contains_any(args: &[Value]) -> Value {
    let (a, b) = (arg(args, 0), arg(args, 1));
    let result = match (&a, &b) {
        (Value::Array(haystack), Value::Array(needles)) => needles
            .iter()
            .any(|n| haystack.iter().any(|h| h.deep_eq(n))),
        _ => false,
    };
    Value::Bool(result)
}

pub fn starts_with(args: &[Value]) -> Value {
    let (a, b) = (arg(args, 0), arg(args, 1));
    let result = match (&a, &b) {
        (Value::String(s), Value::String(prefix)) => s.starts_with(prefix.as_str()),
        _ => false,
    };
    Value::Bool(result)
}

pub fn ends_with(args: &[Value]) -> Value {
    let (a, b) = (arg(args, 0), arg(args, 1));
    let result = match (&a, &b) {
        (Value::String(s), Value::String(suffix)) => s.ends_with(suffix.as_str()),
        _ => false,
    };
    Value::Bool(result)
}

/// Sequence + separator ⇒ concatenation; non-sequence first arg ⇒ empty
/// string, unless it is itself a string (spec §9 open question: preserved
/// as specified, including the non-sequence-non-string case).
pub fn join(args: &[Value]) -> Value {
    let (a, sep) = (arg(args, 0), arg(args, 1));
    let sep = sep.stringify();
    match &a {
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().map(Value::stringify).collect();
            Value::String(parts.join(&sep))
        }
        Value::String(s) => Value::String(s.clone()),
        _ => Value::String(String::new()),
    }
}

pub fn split(args: &[Value]) -> Value {
    let (a, sep) = (arg(args, 0), arg(args, 1));
    match (&a, &sep) {
        (Value::String(s), Value::String(sep)) => {
            if sep.is_empty() {
                Value::Array(
                    s.chars()
                        .map(|c| Value::String(c.to_string()))
                        .collect(),
                )
            } else {
                Value::Array(s.split(sep.as_str()).map(|p| Value::String(p.to_string())).collect())
            }
        }
        _ => Value::Array(vec![]),
    }
}
