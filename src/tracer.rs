// ABOUTME: Optional per-node evaluation trace with a deterministic pretty-printer (spec §4.5)

use crate::ast::{BinaryOp, Expr, ExprKind};
use crate::value::Value;
use serde::Serialize;

/// A post-order record of one node's id, kind, pretty-printed form, and
/// produced value.
#[derive(Debug, Clone, Serialize)]
pub struct TraceEntry {
    pub id: u32,
    pub kind: &'static str,
    pub expr: String,
    pub value: serde_json::Value,
}

/// Bounded recording buffer. Once it reaches `max_entries`, further writes
/// are silently dropped — evaluation continues to completion regardless
/// (spec §4.5, §3 Options).
pub struct Tracer {
    entries: Vec<TraceEntry>,
    max_entries: usize,
}

impl Tracer {
    pub fn new(max_entries: usize) -> Self {
        Tracer {
            entries: Vec::new(),
            max_entries,
        }
    }

    pub fn record(&mut self, expr: &Expr, value: &Value) {
        if self.entries.len() >= self.max_entries {
            tracing::trace!(max = self.max_entries, "trace buffer truncated");
            return;
        }
        self.entries.push(TraceEntry {
            id: expr.id,
            kind: kind_tag(&expr.kind),
            expr: pretty_print(expr),
            value: serde_json::Value::from(value),
        });
    }

    pub fn into_entries(self) -> Vec<TraceEntry> {
        self.entries
    }
}

fn kind_tag(kind: &ExprKind) -> &'static str {
    match kind {
        ExprKind::Literal(_) => "literal",
        ExprKind::Identifier(_) => "identifier",
        ExprKind::Member { .. } => "member",
        ExprKind::Index { .. } => "index",
        ExprKind::Call { .. } => "call",
        ExprKind::Unary { .. } => "unary",
        ExprKind::Binary { .. } => "binary",
        ExprKind::Array(_) => "array",
        ExprKind::Ternary { .. } => "ternary",
    }
}

/// Deterministic pretty-printer (spec §4.5).
pub fn pretty_print(expr: &Expr) -> String {
    match &expr.kind {
        ExprKind::Literal(Value::String(s)) => {
            serde_json::to_string(s).unwrap_or_else(|_| format!("{s:?}"))
        }
        ExprKind::Literal(v) => v.to_string(),
        ExprKind::Identifier(name) => name.clone(),
        ExprKind::Member { object, property } => {
            format!("{}.{}", pretty_print(object), property)
        }
        ExprKind::Index { object, index } => {
            format!("{}[{}]", pretty_print(object), pretty_print(index))
        }
        ExprKind::Array(items) => {
            let inner: Vec<String> = items.iter().map(pretty_print).collect();
            format!("[{}]", inner.join(", "))
        }
        ExprKind::Call { callee, args } => {
            let inner: Vec<String> = args.iter().map(pretty_print).collect();
            format!("{}({})", pretty_print(callee), inner.join(", "))
        }
        ExprKind::Unary { operand } => format!("!{}", pretty_print(operand)),
        ExprKind::Binary { op, left, right } => format!(
            "({} {} {})",
            pretty_print(left),
            op_str(*op),
            pretty_print(right)
        ),
        ExprKind::Ternary {
            cond,
            then_branch,
            else_branch,
        } => format!(
            "({} ? {} : {})",
            pretty_print(cond),
            pretty_print(then_branch),
            pretty_print(else_branch)
        ),
    }
}

fn op_str(op: BinaryOp) -> &'static str {
    op.as_str()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;
    use crate::parser::Parser;

    fn parse(src: &str) -> Expr {
        let tokens = Lexer::new(src).tokenize().unwrap();
        Parser::new(tokens, 2000).parse().unwrap()
    }

    #[test]
    fn pretty_prints_binary() {
        let expr = parse("a + b");
        assert_eq!(pretty_print(&expr), "(a + b)");
    }

    #[test]
    fn pretty_prints_string_literal_as_json_quoted() {
        let expr = parse("'hi'");
        assert_eq!(pretty_print(&expr), "\"hi\"");
    }

    #[test]
    fn pretty_prints_call_and_member() {
        let expr = parse("lower(a.b)");
        assert_eq!(pretty_print(&expr), "lower(a.b)");
    }

    #[test]
    fn buffer_stops_recording_past_limit() {
        let mut tracer = Tracer::new(1);
        let expr = parse("a");
        tracer.record(&expr, &Value::Number(1.0));
        tracer.record(&expr, &Value::Number(2.0));
        assert_eq!(tracer.into_entries().len(), 1);
    }
}
