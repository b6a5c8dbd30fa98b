// ABOUTME: has/exists, size, first, last, collect, coalesce

use super::arg;
use crate::value::Value;

pub fn has_exists(args: &[Value]) -> Value {
    let v = arg(args, 0);
    let result = match &v {
        Value::Array(items) => !items.is_empty(),
        _ => !v.is_null_or_undefined(),
    };
    Value::Bool(result)
}

pub fn size(args: &[Value]) -> Value {
    let v = arg(args, 0);
    let n = match &v {
        Value::Array(items) => items.len(),
        Value::String(s) => s.chars().count(),
        Value::Map(map) => map.len(),
        _ => 0,
    };
    Value::Number(n as f64)
}

pub fn first(args: &[Value]) -> Value {
    let v = arg(args, 0);
    match &v {
        Value::Array(items) => items.first().cloned().unwrap_or(Value::Undefined),
        _ => v,
    }
}

pub fn last(args: &[Value]) -> Value {
    let v = arg(args, 0);
    match &v {
        Value::Array(items) => items.last().cloned().unwrap_or(Value::Undefined),
        _ => v,
    }
}

pub fn collect(args: &[Value]) -> Value {
    match args {
        [single] => match single {
            Value::Array(items) => Value::Array(items.clone()),
            other => Value::Array(vec![other.clone()]),
        },
        many => Value::Array(many.to_vec()),
    }
}

/// First argument that is neither null, undefined, nor an empty sequence.
pub fn coalesce(args: &[Value]) -> Value {
    for a in args {
        let empty_seq = matches!(a, Value::Array(items) if items.is_empty());
        if !a.is_null_or_undefined() && !empty_seq {
            return a.clone();
        }
    }
    Value::Undefined
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn has_on_sequence_checks_length() {
        assert!(matches!(has_exists(&[Value::Array(vec![])]), Value::Bool(false)));
        assert!(matches!(
            has_exists(&[Value::Array(vec![Value::Number(1.0)])]),
            Value::Bool(true)
        ));
    }

    #[test]
    fn has_on_scalar_checks_null_undefined() {
        assert!(matches!(has_exists(&[Value::Null]), Value::Bool(false)));
        assert!(matches!(has_exists(&[Value::Number(0.0)]), Value::Bool(true)));
    }

    #[test]
    fn size_variants() {
        assert!(matches!(
            size(&[Value::String("héllo".into())]),
            Value::Number(n) if n == 5.0
        ));
        assert!(matches!(size(&[Value::Bool(true)]), Value::Number(n) if n == 0.0));
    }

    #[test]
    fn first_last_on_empty_sequence() {
        assert!(matches!(first(&[Value::Array(vec![])]), Value::Undefined));
        assert!(matches!(last(&[Value::Array(vec![])]), Value::Undefined));
    }

    #[test]
    fn first_last_pass_through_non_sequence() {
        assert!(matches!(first(&[Value::Number(5.0)]), Value::Number(n) if n == 5.0));
    }

    #[test]
    fn collect_wraps_single_non_sequence() {
        let result = collect(&[Value::Number(1.0)]);
        assert!(matches!(result, Value::Array(items) if items.len() == 1));
    }

    #[test]
    fn collect_passes_through_single_sequence() {
        let items = vec![Value::Number(1.0), Value::Number(2.0)];
        let result = collect(&[Value::Array(items.clone())]);
        assert!(matches!(result, Value::Array(r) if r.len() == 2));
    }

    #[test]
    fn collect_gathers_multiple_args() {
        let result = collect(&[Value::Number(1.0), Value::Number(2.0)]);
        assert!(matches!(result, Value::Array(items) if items.len() == 2));
    }

    #[test]
    fn coalesce_skips_null_and_empty_sequence() {
        let result = coalesce(&[Value::Null, Value::Array(vec![]), Value::String("fallback".into())]);
        assert!(matches!(result, Value::String(s) if s == "fallback"));
    }

    #[test]
    fn coalesce_all_absent_yields_undefined() {
        assert!(matches!(coalesce(&[Value::Null, Value::Undefined]), Value::Undefined));
    }
}
