// ABOUTME: matches and regexReplace — the only builtins that can raise at evaluation time

use super::arg;
use crate::error::Error;
use crate::value::Value;
use regex::Regex;

/// Patterns are ECMAScript-compatible as exposed by the `regex` crate's
/// default syntax (spec §4.4, §9 "Regex flavor"); a non-ECMAScript feature
/// (lookaround, backreferences) is rejected at compile time the same as
/// any other malformed pattern.
pub fn matches(args: &[Value]) -> Result<Value, Error> {
    let (subject, pattern) = (arg(args, 0), arg(args, 1));
    match (&subject, &pattern) {
        (Value::String(s), Value::String(p)) => {
            let re = compile(p)?;
            Ok(Value::Bool(re.is_match(s)))
        }
        _ => Ok(Value::Bool(false)),
    }
}

pub fn regex_replace(args: &[Value]) -> Result<Value, Error> {
    let (subject, pattern, replacement) = (arg(args, 0), arg(args, 1), arg(args, 2));
    match (&subject, &pattern, &replacement) {
        (Value::String(s), Value::String(p), Value::String(r)) => {
            let re = compile(p)?;
            Ok(Value::String(re.replace_all(s, r.as_str()).into_owned()))
        }
        _ => Ok(subject),
    }
}

fn compile(pattern: &str) -> Result<Regex, Error> {
    Regex::new(pattern).map_err(|e| Error::RegexCompile {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_non_strings_is_false() {
        let result = matches(&[Value::Number(1.0), Value::String("x".into())]).unwrap();
        assert!(matches!(result, Value::Bool(false)));
    }

    #[test]
    fn matches_true_and_false() {
        let s = Value::String("user@example.com".into());
        let p = Value::String(r"^\w+@\w+\.\w+$".into());
        assert!(matches!(matches(&[s, p]).unwrap(), Value::Bool(true)));
    }

    #[test]
    fn invalid_pattern_is_regex_compile_error() {
        let s = Value::String("x".into());
        let p = Value::String("(".into());
        assert!(matches!(matches(&[s, p]), Err(Error::RegexCompile { .. })));
    }

    #[test]
    fn regex_replace_replaces_all() {
        let s = Value::String("a1b2c3".into());
        let p = Value::String(r"\d".into());
        let r = Value::String("#".into());
        let result = regex_replace(&[s, p, r]).unwrap();
        assert!(matches!(result, Value::String(s) if s == "a#b#c#"));
    }

    #[test]
    fn regex_replace_non_strings_passes_first_through() {
        let result = regex_replace(&[Value::Number(5.0), Value::String("x".into()), Value::String("y".into())]).unwrap();
        assert!(matches!(result, Value::Number(n) if n == 5.0));
    }
}
