//! Closed function allow-list (spec §4.4).
//!
//! Unknown names raise `Error::FunctionNotAllowed`. There is no
//! receiver-based method dispatch: a member-access callee such as
//! `x.lower()` is resolved by name only (`lower`), ignoring `x` as a
//! receiver — `lower` still reads its value from the call arguments.

mod collections;
mod regexfn;
mod strings;

use crate::error::Error;
use crate::value::Value;

/// Names of every function in the allow-list, for hosts that want to
/// surface the closed set (e.g. editor auto-complete, out of scope here).
pub const ALLOWED_NAMES: &[&str] = &[
    "has",
    "exists",
    "size",
    "first",
    "last",
    "collect",
    "lower",
    "upper",
    "trim",
    "contains",
    "containsAny",
    "startsWith",
    "endsWith",
    "matches",
    "regexReplace",
    "coalesce",
    "join",
    "split",
];

/// Dispatch a call by name. Arguments have already been evaluated
/// left-to-right by the caller.
pub fn call(name: &str, args: &[Value]) -> Result<Value, Error> {
    match name {
        "has" | "exists" => Ok(collections::has_exists(args)),
        "size" => Ok(collections::size(args)),
        "first" => Ok(collections::first(args)),
        "last" => Ok(collections::last(args)),
        "collect" => Ok(collections::collect(args)),
        "coalesce" => Ok(collections::coalesce(args)),
        "lower" => Ok(strings::lower(args)),
        "upper" => Ok(strings::upper(args)),
        "trim" => Ok(strings::trim(args)),
        "contains" => Ok(strings::contains(args)),
        "containsAny" => Ok(strings::contains_any(args)),
        "startsWith" => Ok(strings::starts_with(args)),
        "endsWith" => Ok(strings::ends_with(args)),
        "join" => Ok(strings::join(args)),
        "split" => Ok(strings::split(args)),
        "matches" => regexfn::matches(args),
        "regexReplace" => regexfn::regex_replace(args),
        other => Err(Error::FunctionNotAllowed(other.to_string())),
    }
}

/// First positional argument, or `Undefined` if absent — the evaluator's
/// "sparse contexts never throw" stance applies to builtin arity too.
pub(crate) fn arg(args: &[Value], index: usize) -> Value {
    args.get(index).cloned().unwrap_or(Value::Undefined)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_function_is_rejected() {
        let err = call("system", &[]).unwrap_err();
        assert_eq!(err, Error::FunctionNotAllowed("system".to_string()));
    }

    #[test]
    fn allow_list_matches_dispatch_arms() {
        for name in ALLOWED_NAMES {
            // Every allow-listed name must dispatch to *something* other
            // than FunctionNotAllowed, even with zero arguments.
            let result = call(name, &[]);
            if let Err(Error::FunctionNotAllowed(_)) = result {
                panic!("{name} is allow-listed but not dispatched");
            }
        }
    }
}
