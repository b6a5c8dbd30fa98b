// ABOUTME: Command-line frontend for compiling and evaluating expressions

use anyhow::{Context as _, Result};
use cel_lite::{Context, ExplainResult, Options, Program};
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::PathBuf;

/// Compact, sandboxed expression evaluator for identity-provider attribute
/// mapping and policy rules
#[derive(Parser, Debug)]
#[command(name = "cel-lite")]
#[command(version)]
#[command(about = "Evaluate and explain CEL-lite expressions")]
struct CliArgs {
    #[command(subcommand)]
    command: Command,

    /// Maximum source length in bytes
    #[arg(long, global = true, default_value_t = Options::default().max_expression_length)]
    max_expression_length: usize,

    /// Maximum number of AST nodes
    #[arg(long, global = true, default_value_t = Options::default().max_ast_nodes)]
    max_ast_nodes: usize,

    /// Maximum function-call nesting depth
    #[arg(long, global = true, default_value_t = Options::default().max_call_depth)]
    max_call_depth: usize,

    /// Maximum number of recorded trace entries
    #[arg(long, global = true, default_value_t = Options::default().max_trace_entries)]
    max_trace_entries: usize,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate an expression and print its result as JSON
    Eval {
        /// The expression source
        expression: String,

        /// JSON file supplying the evaluation context (defaults to stdin if omitted)
        #[arg(long, value_name = "FILE")]
        context: Option<PathBuf>,
    },
    /// Evaluate an expression and print the result plus its evaluation trace
    Explain {
        /// The expression source
        expression: String,

        /// JSON file supplying the evaluation context (defaults to stdin if omitted)
        #[arg(long, value_name = "FILE")]
        context: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = CliArgs::parse();
    let options = Options {
        max_expression_length: args.max_expression_length,
        max_ast_nodes: args.max_ast_nodes,
        max_call_depth: args.max_call_depth,
        max_trace_entries: args.max_trace_entries,
    };

    match args.command {
        Command::Eval { expression, context } => {
            let program = compile(&expression, options)?;
            let ctx = load_context(context)?;
            let result = program.eval(&ctx).context("evaluation failed")?;
            println!("{}", serde_json::to_string_pretty(&serde_json::Value::from(&result))?);
        }
        Command::Explain { expression, context } => {
            let program = compile(&expression, options)?;
            let ctx = load_context(context)?;
            let ExplainResult { result, trace } =
                program.explain(&ctx).context("evaluation failed")?;
            let output = serde_json::json!({
                "result": serde_json::Value::from(&result),
                "trace": trace,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}

fn compile(expression: &str, options: Options) -> Result<Program> {
    Program::compile(expression, options).map_err(|e| anyhow::anyhow!("{}", e.message()))
}

fn load_context(path: Option<PathBuf>) -> Result<Context> {
    let raw = match path {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("reading context file {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading context from stdin")?;
            if buf.trim().is_empty() {
                "{}".to_string()
            } else {
                buf
            }
        }
    };
    let json: serde_json::Value =
        serde_json::from_str(&raw).context("parsing context as JSON")?;
    Ok(Context::from(json))
}
