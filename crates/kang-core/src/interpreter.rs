//! Interpreter for the KANG language.
//!
//! Execution is a single top-to-bottom pass over the source lines. Each line
//! is classified into a [`Statement`] and handed to the handler for its
//! variant. There are no jumps and no blocks: `grind` and `fr` only append
//! output and never repeat or skip the lines after them.

use serde::Serialize;

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::error::{ErrorKind, ErrorReport, RuntimeError};
use crate::span::Span;
use crate::statement::{ArithOp, Statement, StatementKind};
use crate::value::{parse_value, string_literal, Value, Variable, Variables};

/// State of one run: variables, output, and the error that stopped it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExecutionContext {
    variables: Variables,
    output: Vec<String>,
    error: Option<RuntimeError>,
}

impl ExecutionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Output lines in the order they were produced.
    pub fn output(&self) -> &[String] {
        &self.output
    }

    /// Snapshot of all bound variables, sorted by name.
    pub fn variables(&self) -> Vec<&Variable> {
        let mut vars: Vec<_> = self.variables.values().collect();
        vars.sort_by(|a, b| a.name.cmp(&b.name));
        vars
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.variables.get(name).map(|v| &v.value)
    }

    pub fn error(&self) -> Option<&RuntimeError> {
        self.error.as_ref()
    }

    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(|e| e.to_string())
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// Serializable view of the run.
    pub fn report(&self) -> ExecutionReport<'_> {
        ExecutionReport {
            status: if self.is_ok() { "ok" } else { "error" },
            output: &self.output,
            variables: self.variables(),
            error: self.error.as_ref().map(ErrorReport::from),
        }
    }

    fn bind(&mut self, name: &str, value: Value) {
        self.variables
            .insert(name.to_string(), Variable::new(name, value));
    }

    fn lookup(&self, name: &str) -> Result<&Value, ErrorKind> {
        self.get(name).ok_or_else(|| ErrorKind::UnboundVariable {
            name: name.to_string(),
        })
    }

    fn resolve(&self, expr: &str) -> Result<Value, ErrorKind> {
        parse_value(expr, &self.variables)
    }

    /// Run one statement against this context.
    fn apply(&mut self, statement: &Statement<'_>) -> Result<(), ErrorKind> {
        match *statement {
            Statement::Declare { name, expr } => self.declare(name, expr),
            Statement::Shout { expr } => self.shout(expr),
            Statement::Arithmetic {
                op,
                target,
                source,
                expr,
            } => self.arithmetic(op, target, source, expr),
            Statement::Grind { count } => self.grind(count),
            Statement::Compare { name, expr } => self.compare(name, expr),
            Statement::Keep { name, expr } => self.keep(name, expr),
        }
    }

    fn declare(&mut self, name: &str, expr: &str) -> Result<(), ErrorKind> {
        let value = self.resolve(expr)?;
        self.bind(name, value);
        Ok(())
    }

    fn shout(&mut self, expr: &str) -> Result<(), ErrorKind> {
        // Only quoted literals and variable names; `shout 42` is a lookup of `42`.
        let text = match string_literal(expr) {
            Some(inner) => inner.to_string(),
            None => self.lookup(expr)?.to_string(),
        };
        self.output.push(text);
        Ok(())
    }

    fn arithmetic(
        &mut self,
        op: ArithOp,
        target: &str,
        source: &str,
        expr: &str,
    ) -> Result<(), ErrorKind> {
        let lhs = self.lookup(source)?.clone();
        let rhs = self.resolve(expr)?;
        let result = match op {
            ArithOp::Add => lhs.add(&rhs),
            ArithOp::Sub => lhs.sub(&rhs),
            ArithOp::Mult => lhs.mult(&rhs),
            ArithOp::Div => lhs.div(&rhs),
        }?;
        self.bind(target, result);
        Ok(())
    }

    fn grind(&mut self, count: &str) -> Result<(), ErrorKind> {
        let value = self.resolve(count)?;
        let n = match value {
            Value::Number(n) if n.is_finite() && n >= 0.0 => n.ceil() as u64,
            other => {
                return Err(ErrorKind::InvalidLoopCount {
                    found: other.display_literal(),
                })
            }
        };
        for i in 1..=n {
            self.output.push(format!("Loop iteration {}", i));
        }
        Ok(())
    }

    fn compare(&mut self, name: &str, expr: &str) -> Result<(), ErrorKind> {
        let current = self.lookup(name)?.clone();
        let expected = self.resolve(expr)?;
        let line = if current.same(&expected) {
            format!("Condition true: {} equals {}", name, expected)
        } else {
            format!(
                "Condition false: {} ({}) does not equal {}",
                name, current, expected
            )
        };
        self.output.push(line);
        Ok(())
    }

    fn keep(&mut self, name: &str, expr: &str) -> Result<(), ErrorKind> {
        let value = self.resolve(expr)?;
        self.output
            .push(format!("Keeping {} vibing high at {}", name, value));
        self.bind(name, value);
        Ok(())
    }
}

/// Serializable result of a run.
#[derive(Debug, Serialize)]
pub struct ExecutionReport<'a> {
    pub status: &'static str,
    pub output: &'a [String],
    pub variables: Vec<&'a Variable>,
    pub error: Option<ErrorReport>,
}

/// One source line with its position.
struct SourceLine<'a> {
    number: usize,
    raw: &'a str,
    span: Span,
}

impl<'a> SourceLine<'a> {
    fn trimmed(&self) -> &'a str {
        self.raw.trim()
    }

    fn is_indented(&self) -> bool {
        self.raw.starts_with([' ', '\t'])
    }

    /// Blank lines and `//` comments are not statements.
    fn is_statement(&self) -> bool {
        let text = self.trimmed();
        !text.is_empty() && !text.starts_with("//")
    }

    fn error(&self, kind: ErrorKind) -> RuntimeError {
        RuntimeError::new(self.number, self.trimmed(), self.span, kind)
    }
}

fn source_lines(source: &str) -> impl Iterator<Item = SourceLine<'_>> {
    let mut offset = 0;
    source
        .split_inclusive('\n')
        .enumerate()
        .map(move |(index, chunk)| {
            let raw = chunk.trim_end_matches('\n').trim_end_matches('\r');
            let line = SourceLine {
                number: index + 1,
                raw,
                span: Span::line(index + 1, offset, raw),
            };
            offset += chunk.len();
            line
        })
}

/// Execute a program and return the resulting context.
///
/// Never fails: the first error is stored in the context together with the
/// output and bindings produced before it.
#[tracing::instrument(level = "debug", skip_all, fields(bytes = source.len()))]
pub fn execute(source: &str) -> ExecutionContext {
    let mut context = ExecutionContext::new();

    for line in source_lines(source).filter(SourceLine::is_statement) {
        let result =
            Statement::parse(line.trimmed()).and_then(|statement| {
                tracing::debug!(line = line.number, kind = ?statement.kind(), "executing");
                context.apply(&statement)
            });

        if let Err(kind) = result {
            let err = line.error(kind);
            tracing::debug!(error = %err, "run aborted");
            context.error = Some(err);
            return context;
        }
    }

    tracing::debug!(output_lines = context.output.len(), "run completed");
    context
}

/// Check a program's statement shapes without running it.
///
/// Unlike [`execute`], every line is examined: all syntax errors are
/// reported, plus a warning for indented lines under `grind` or `fr`, which
/// run once as ordinary statements rather than as a body.
pub fn validate(source: &str, file: &str) -> Diagnostics {
    let mut diagnostics = Diagnostics::new();
    let mut opener: Option<(StatementKind, usize)> = None;

    for line in source_lines(source).filter(SourceLine::is_statement) {
        let kind = match Statement::parse(line.trimmed()) {
            Ok(statement) => Some(statement.kind()),
            Err(err) => {
                diagnostics.push(line.error(err).to_diagnostic(file));
                None
            }
        };

        if !line.is_indented() {
            opener = kind
                .filter(|k| matches!(k, StatementKind::Grind | StatementKind::Compare))
                .map(|k| (k, line.number));
            continue;
        }

        if let Some((opener_kind, opener_line)) = opener {
            let keyword = if opener_kind == StatementKind::Grind { "grind" } else { "fr" };
            diagnostics.push(
                Diagnostic::warning(
                    "W001",
                    format!(
                        "Indented line is not a body of `{}` on line {}; it runs once",
                        keyword, opener_line
                    ),
                )
                .with_file(file)
                .with_span(line.span)
                .with_context(line.trimmed())
                .with_help("`grind` only prints loop iterations and `fr` only reports the comparison")
                .build(),
            );
        }
    }

    diagnostics
}
