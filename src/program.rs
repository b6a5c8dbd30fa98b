// ABOUTME: Compiled-program facade tying lexer, parser, and evaluator together (spec §3, §5)

use crate::ast::Expr;
use crate::context::Context;
use crate::error::Error;
use crate::eval::{eval, EvalState};
use crate::lexer::Lexer;
use crate::parser::Parser;
use crate::tracer::TraceEntry;
use crate::value::Value;

/// Resource limits enforced during compilation and evaluation (spec §3).
///
/// Defaults are chosen to comfortably cover identity-provider attribute
/// mapping expressions while keeping a single evaluation boundable.
#[derive(Debug, Clone, Copy)]
pub struct Options {
    pub max_expression_length: usize,
    pub max_ast_nodes: usize,
    pub max_call_depth: usize,
    pub max_trace_entries: usize,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            max_expression_length: 4096,
            max_ast_nodes: 2000,
            max_call_depth: 50,
            max_trace_entries: 5000,
        }
    }
}

/// A compiled expression: the original source plus its parsed AST, ready
/// to be evaluated against any number of contexts.
#[derive(Debug, Clone)]
pub struct Program {
    source: String,
    ast: Expr,
    options: Options,
}

/// Result of `Program::explain`: the evaluated value plus the post-order
/// trace of every node visited (spec §4.5).
#[derive(Debug, Clone)]
pub struct ExplainResult {
    pub result: Value,
    pub trace: Vec<TraceEntry>,
}

impl Program {
    /// Lex, parse, and bound-check `source` without evaluating it.
    pub fn compile(source: &str, options: Options) -> Result<Program, Error> {
        if source.len() > options.max_expression_length {
            return Err(Error::ExpressionTooLong {
                len: source.len(),
                max: options.max_expression_length,
            });
        }
        let tokens = Lexer::new(source).tokenize()?;
        let ast = Parser::new(tokens, options.max_ast_nodes).parse()?;
        let program = Program {
            source: source.to_string(),
            ast,
            options,
        };
        tracing::debug!(
            len = source.len(),
            nodes = program.ast_node_count(),
            "compiled expression"
        );
        Ok(program)
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn options(&self) -> Options {
        self.options
    }

    /// Total AST node count, for hosts that want to report it alongside
    /// `maxAstNodes` without re-parsing.
    pub fn ast_node_count(&self) -> usize {
        count_nodes(&self.ast)
    }

    pub fn eval(&self, context: &Context) -> Result<Value, Error> {
        let mut state = EvalState::new(context, &self.options, false);
        eval(&self.ast, &mut state)
    }

    pub fn explain(&self, context: &Context) -> Result<ExplainResult, Error> {
        let mut state = EvalState::new(context, &self.options, true);
        let result = eval(&self.ast, &mut state)?;
        Ok(ExplainResult {
            result,
            trace: state.into_trace(),
        })
    }
}

fn count_nodes(expr: &Expr) -> usize {
    use crate::ast::ExprKind;
    1 + match &expr.kind {
        ExprKind::Literal(_) | ExprKind::Identifier(_) => 0,
        ExprKind::Member { object, .. } => count_nodes(object),
        ExprKind::Index { object, index } => count_nodes(object) + count_nodes(index),
        ExprKind::Call { callee, args } => {
            count_nodes(callee) + args.iter().map(count_nodes).sum::<usize>()
        }
        ExprKind::Unary { operand } => count_nodes(operand),
        ExprKind::Binary { left, right, .. } => count_nodes(left) + count_nodes(right),
        ExprKind::Array(items) => items.iter().map(count_nodes).sum(),
        ExprKind::Ternary {
            cond,
            then_branch,
            else_branch,
        } => count_nodes(cond) + count_nodes(then_branch) + count_nodes(else_branch),
    }
}

/// Convenience free function mirroring `Program::compile` with default
/// options, for callers that don't need custom limits.
pub fn compile(source: &str) -> Result<Program, Error> {
    Program::compile(source, Options::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compile_rejects_oversized_source() {
        let options = Options {
            max_expression_length: 4,
            ..Options::default()
        };
        let err = Program::compile("12345", options).unwrap_err();
        assert!(matches!(err, Error::ExpressionTooLong { .. }));
    }

    #[test]
    fn eval_and_explain_agree() {
        let program = compile("1 + 2").unwrap();
        let ctx = Context::new();
        let direct = program.eval(&ctx).unwrap();
        let explained = program.explain(&ctx).unwrap();
        assert!(direct.deep_eq(&explained.result));
        assert!(!explained.trace.is_empty());
    }

    #[test]
    fn eval_and_explain_agree_on_nan_result() {
        let program = compile("[] + []").unwrap();
        let ctx = Context::new();
        let direct = program.eval(&ctx).unwrap();
        let explained = program.explain(&ctx).unwrap();
        assert!(direct.deep_eq(&explained.result));
    }

    #[test]
    fn source_round_trips() {
        let program = compile("a.b").unwrap();
        assert_eq!(program.source(), "a.b");
    }

    #[test]
    fn ast_node_count_counts_every_node() {
        let program = compile("1 + 2").unwrap();
        assert_eq!(program.ast_node_count(), 3);
    }

    #[test]
    fn max_ast_nodes_is_enforced_at_compile_time() {
        let options = Options {
            max_ast_nodes: 1,
            ..Options::default()
        };
        let err = Program::compile("1 + 2", options).unwrap_err();
        assert!(matches!(err, Error::TooComplex { .. }));
    }
}
