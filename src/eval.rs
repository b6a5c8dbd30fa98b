// ABOUTME: Tree-walking evaluator with short-circuit semantics and resource limits (spec §4.3)

use crate::ast::{BinaryOp, Expr, ExprKind};
use crate::builtins;
use crate::context::Context;
use crate::error::Error;
use crate::program::Options;
use crate::sandbox::{is_poison_key, CallDepthGuard};
use crate::tracer::Tracer;
use crate::value::Value;

/// Per-call scratch state: call-depth counter, option snapshot, and an
/// optional bounded trace buffer (spec §3 "Evaluation state").
pub struct EvalState<'a> {
    context: &'a Context,
    depth: CallDepthGuard,
    tracer: Option<Tracer>,
}

impl<'a> EvalState<'a> {
    pub fn new(context: &'a Context, options: &Options, tracing: bool) -> Self {
        EvalState {
            context,
            depth: CallDepthGuard::new(options.max_call_depth),
            tracer: tracing.then(|| Tracer::new(options.max_trace_entries)),
        }
    }

    pub fn into_trace(self) -> Vec<crate::tracer::TraceEntry> {
        self.tracer.map(Tracer::into_entries).unwrap_or_default()
    }
}

/// Evaluate `expr` against `state`, recording a post-order trace entry for
/// every node actually visited (short-circuited branches are never
/// recorded, per spec §4.5).
pub fn eval(expr: &Expr, state: &mut EvalState) -> Result<Value, Error> {
    let value = eval_kind(expr, state)?;
    if let Some(tracer) = state.tracer.as_mut() {
        tracer.record(expr, &value);
    }
    Ok(value)
}

fn eval_kind(expr: &Expr, state: &mut EvalState) -> Result<Value, Error> {
    match &expr.kind {
        ExprKind::Literal(v) => Ok(v.clone()),

        ExprKind::Identifier(name) => Ok(state
            .context
            .get(name)
            .cloned()
            .unwrap_or(Value::Undefined)),

        ExprKind::Array(items) => {
            let mut out = Vec::with_capacity(items.len());
            for item in items {
                out.push(eval(item, state)?);
            }
            Ok(Value::Array(out))
        }

        ExprKind::Member { object, property } => {
            let obj = eval(object, state)?;
            Ok(member_access(&obj, property))
        }

        ExprKind::Index { object, index } => {
            let obj = eval(object, state)?;
            let idx = eval(index, state)?;
            Ok(index_access(&obj, &idx))
        }

        ExprKind::Unary { operand } => {
            let v = eval(operand, state)?;
            Ok(Value::Bool(!v.is_truthy()))
        }

        ExprKind::Binary { op, left, right } => eval_binary(*op, left, right, state),

        ExprKind::Ternary {
            cond,
            then_branch,
            else_branch,
        } => {
            let c = eval(cond, state)?;
            if c.is_truthy() {
                eval(then_branch, state)
            } else {
                eval(else_branch, state)
            }
        }

        ExprKind::Call { callee, args } => eval_call(expr, callee, args, state),
    }
}

fn eval_binary(
    op: BinaryOp,
    left: &Expr,
    right: &Expr,
    state: &mut EvalState,
) -> Result<Value, Error> {
    match op {
        BinaryOp::And => {
            let l = eval(left, state)?;
            if !l.is_truthy() {
                return Ok(Value::Bool(false));
            }
            let r = eval(right, state)?;
            Ok(Value::Bool(r.is_truthy()))
        }
        BinaryOp::Or => {
            let l = eval(left, state)?;
            if l.is_truthy() {
                return Ok(Value::Bool(true));
            }
            let r = eval(right, state)?;
            Ok(Value::Bool(r.is_truthy()))
        }
        BinaryOp::Eq => {
            let (l, r) = (eval(left, state)?, eval(right, state)?);
            Ok(Value::Bool(l.deep_eq(&r)))
        }
        BinaryOp::Ne => {
            let (l, r) = (eval(left, state)?, eval(right, state)?);
            Ok(Value::Bool(!l.deep_eq(&r)))
        }
        BinaryOp::Lt => numeric_cmp(left, right, state, |a, b| a < b),
        BinaryOp::Le => numeric_cmp(left, right, state, |a, b| a <= b),
        BinaryOp::Gt => numeric_cmp(left, right, state, |a, b| a > b),
        BinaryOp::Ge => numeric_cmp(left, right, state, |a, b| a >= b),
        BinaryOp::Add => {
            let (l, r) = (eval(left, state)?, eval(right, state)?);
            Ok(add(&l, &r))
        }
        BinaryOp::In => {
            let (l, r) = (eval(left, state)?, eval(right, state)?);
            Ok(Value::Bool(in_op(&l, &r)))
        }
    }
}

fn numeric_cmp(
    left: &Expr,
    right: &Expr,
    state: &mut EvalState,
    cmp: impl Fn(f64, f64) -> bool,
) -> Result<Value, Error> {
    let (l, r) = (eval(left, state)?, eval(right, state)?);
    let (a, b) = (l.to_number(), r.to_number());
    if a.is_nan() || b.is_nan() {
        return Ok(Value::Bool(false));
    }
    Ok(Value::Bool(cmp(a, b)))
}

/// `+`: string concatenation if either side is a string, otherwise numeric
/// addition. Undefined renders as the empty string as the general rule
/// states, but null is a preserved exception: concatenated against a
/// string it renders as the literal text `"null"` (spec §4.3, §9).
fn add(l: &Value, r: &Value) -> Value {
    let l_is_str = matches!(l, Value::String(_));
    let r_is_str = matches!(r, Value::String(_));
    if l_is_str || r_is_str {
        Value::String(format!("{}{}", add_str_part(l), add_str_part(r)))
    } else {
        Value::Number(l.to_number() + r.to_number())
    }
}

fn add_str_part(v: &Value) -> String {
    match v {
        Value::Null => "null".to_string(),
        Value::Undefined => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// `in`: right side determines semantics (spec §4.3).
fn in_op(l: &Value, r: &Value) -> bool {
    match r {
        Value::Array(items) => items.iter().any(|item| item.deep_eq(l)),
        Value::String(haystack) => match l {
            Value::String(needle) => haystack.contains(needle.as_str()),
            _ => false,
        },
        Value::Map(map) => match l {
            Value::String(key) => map.contains_key(key),
            _ => false,
        },
        _ => false,
    }
}

/// Member access with poison-key filtering (spec §4.3).
fn member_access(obj: &Value, property: &str) -> Value {
    if obj.is_null_or_undefined() {
        return Value::Undefined;
    }
    if is_poison_key(property) {
        return Value::Undefined;
    }
    match obj {
        Value::Map(map) => map.get(property).cloned().unwrap_or(Value::Undefined),
        _ => Value::Undefined,
    }
}

/// Index access: numeric index into a sequence, string index (poison-key
/// filtered) into a map, anything else ⇒ undefined (spec §4.3).
fn index_access(obj: &Value, index: &Value) -> Value {
    if obj.is_null_or_undefined() {
        return Value::Undefined;
    }
    match index {
        Value::Number(n) => match obj {
            Value::Array(items) => {
                if *n < 0.0 || n.fract() != 0.0 {
                    return Value::Undefined;
                }
                items.get(*n as usize).cloned().unwrap_or(Value::Undefined)
            }
            _ => Value::Undefined,
        },
        Value::String(key) => {
            if is_poison_key(key) {
                return Value::Undefined;
            }
            match obj {
                Value::Map(map) => map.get(key).cloned().unwrap_or(Value::Undefined),
                _ => Value::Undefined,
            }
        }
        _ => Value::Undefined,
    }
}

/// The callee must be an identifier or a member access (spec §4.3).
/// Member-access callees ignore the receiver value and dispatch purely by
/// the property name — there is no receiver-based method lookup (§4.4,
/// §9).
fn eval_call(
    call_expr: &Expr,
    callee: &Expr,
    args: &[Expr],
    state: &mut EvalState,
) -> Result<Value, Error> {
    let name = match &callee.kind {
        ExprKind::Identifier(name) => name.clone(),
        ExprKind::Member { property, .. } => property.clone(),
        _ => return Err(Error::InvalidCallTarget { pos: call_expr.pos }),
    };

    state.depth.enter()?;
    let result = (|| {
        let mut values = Vec::with_capacity(args.len());
        for a in args {
            values.push(eval(a, state)?);
        }
        builtins::call(&name, &values)
    })();
    state.depth.exit();
    result
}
