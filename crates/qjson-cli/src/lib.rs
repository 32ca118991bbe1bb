//! `qjson-eval`, a command-line tool that evaluates a small path/arithmetic
//! query expression against a JSON document.
//!
//! This crate is the ambient stack around the core lex/parse/evaluate
//! pipeline in `qjson-json`, `qjson-query`, and `qjson-eval`: argument
//! parsing, file I/O, logging initialization, diagnostic rendering, and
//! exit-code discipline.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser as ClapParser;
use thiserror::Error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use qjson_eval::{standard_registry, Evaluator};
use qjson_json::parse_document;
use qjson_query::parse_expression;
use qjson_util::{render_errors, Error};

/// `qjson-eval <path_to_json> [query]`
#[derive(ClapParser, Debug)]
#[command(name = "qjson-eval")]
#[command(author = "Fax Team")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Evaluate a query expression against a JSON document", long_about = None)]
pub struct Cli {
    /// Path to the JSON document to read
    pub json_path: PathBuf,

    /// Query expression to evaluate. An empty or absent query prints the
    /// whole parsed document.
    pub query: Option<String>,

    /// Increase logging verbosity (repeatable: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

/// Operational failures at the CLI boundary: things that go wrong before
/// there is any source text to hand to a lexer. Distinct from the
/// lexical/syntactic/semantic `Error` record the core raises, but
/// converted into one so the renderer has a single code path.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("failed to read '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<CliError> for Error {
    fn from(error: CliError) -> Self {
        match &error {
            CliError::ReadFile { path, source } => {
                Error::new("CLI", format!("Failed to read '{}': {source}", path.display()), 0, 0)
            }
        }
    }
}

/// Initializes the global `tracing` subscriber. Verbosity raises the
/// default filter by one level per `-v` occurrence; this only changes how
/// much diagnostic noise is emitted, never program behavior or output.
///
/// Failure here is not part of the documented exit-code contract (§7), so
/// it is surfaced through `anyhow` at the `main` boundary rather than the
/// `Error` diagnostic record.
pub fn init_logging(verbose: u8) -> anyhow::Result<()> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_thread_ids(false).with_thread_names(false))
        .try_init()
        .context("failed to initialize the tracing subscriber")
}

/// Runs the full read → lex/parse → (optionally) lex/parse the query →
/// evaluate → render pipeline, returning the process exit code.
pub fn run(cli: &Cli) -> i32 {
    tracing::debug!(path = %cli.json_path.display(), "reading input file");

    let source = match std::fs::read_to_string(&cli.json_path) {
        Ok(source) => source,
        Err(source) => {
            let error: Error = CliError::ReadFile { path: cli.json_path.clone(), source }.into();
            render_errors(&[error]);
            return 1;
        }
    };

    tracing::trace!(bytes = source.len(), "lexing and parsing json document");
    let document = match parse_document(&source) {
        Ok(value) => value,
        Err(errors) => {
            render_errors(&errors);
            return 1;
        }
    };

    let query = cli.query.as_deref().unwrap_or("").trim();
    if query.is_empty() {
        println!("{}", document.render());
        return 0;
    }

    tracing::trace!(query, "lexing and parsing query expression");
    let expression = match parse_expression(query) {
        Ok(expression) => expression,
        Err(errors) => {
            render_errors(&errors);
            return 1;
        }
    };

    let registry = standard_registry();
    let evaluator = Evaluator::new(&document, &registry);

    tracing::debug!("evaluating expression");
    match evaluator.evaluate_expression(&expression) {
        Ok(result) => {
            println!("{}", result.render());
            0
        }
        Err(error) => {
            render_errors(&[error]);
            1
        }
    }
}
