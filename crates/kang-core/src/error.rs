//! Runtime errors.
//!
//! Every error is fatal to the run that raised it. The interpreter stores the
//! first one in the execution context alongside the output produced so far.

use miette::SourceSpan;
use serde::Serialize;
use thiserror::Error;

use crate::diagnostics::Diagnostic;
use crate::span::Span;

/// What went wrong, independent of where.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ErrorKind {
    #[error("{message}: {text}")]
    Syntax { message: &'static str, text: String },

    #[error("Variable '{name}' not found")]
    UnboundVariable { name: String },

    #[error("Unknown value: {text}")]
    UnresolvedValue { text: String },

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Loop count must be a non-negative number, got {found}")]
    InvalidLoopCount { found: String },

    #[error("Cannot {op} {left} and {right}")]
    TypeMismatch {
        op: &'static str,
        left: &'static str,
        right: &'static str,
    },
}

impl ErrorKind {
    /// Stable error code.
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::Syntax { .. } => "E001",
            ErrorKind::UnboundVariable { .. } => "E002",
            ErrorKind::UnresolvedValue { .. } => "E003",
            ErrorKind::DivisionByZero => "E004",
            ErrorKind::InvalidLoopCount { .. } => "E005",
            ErrorKind::TypeMismatch { .. } => "E006",
        }
    }

    /// Short kind name, e.g. `SyntaxError`.
    pub fn name(&self) -> &'static str {
        match self {
            ErrorKind::Syntax { .. } => "SyntaxError",
            ErrorKind::UnboundVariable { .. } => "UnboundVariableError",
            ErrorKind::UnresolvedValue { .. } => "UnresolvedValueError",
            ErrorKind::DivisionByZero => "DivisionByZeroError",
            ErrorKind::InvalidLoopCount { .. } => "InvalidLoopCountError",
            ErrorKind::TypeMismatch { .. } => "TypeMismatchError",
        }
    }

    pub fn help(&self) -> Option<&'static str> {
        match self {
            ErrorKind::Syntax { .. } => Some(
                "statements start with vibe, shout, add, sub, mult, div, grind, fr or keep vibing",
            ),
            ErrorKind::UnboundVariable { .. } => Some("declare it first with `vibe NAME = VALUE`"),
            ErrorKind::UnresolvedValue { .. } => {
                Some("values are \"strings\", decimal numbers, true, false or variable names")
            }
            ErrorKind::TypeMismatch { op: "add", .. } => Some(
                "add works on two numbers, or on a string and any value; booleans are never coerced to numbers",
            ),
            ErrorKind::TypeMismatch { .. } => {
                Some("both operands must be numbers; booleans are never coerced to numbers")
            }
            ErrorKind::DivisionByZero | ErrorKind::InvalidLoopCount { .. } => None,
        }
    }
}

/// An error raised while executing one line.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("line {line}: {kind}")]
pub struct RuntimeError {
    /// 1-based source line
    pub line: usize,
    /// The trimmed statement text
    pub text: String,
    /// Span of the whole source line
    pub span: Span,
    pub kind: ErrorKind,
}

impl RuntimeError {
    pub fn new(line: usize, text: impl Into<String>, span: Span, kind: ErrorKind) -> Self {
        Self {
            line,
            text: text.into(),
            span,
            kind,
        }
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Convert into a diagnostic for machine-readable output.
    pub fn to_diagnostic(&self, file: &str) -> Diagnostic {
        let mut builder = Diagnostic::error(self.code(), self.kind.to_string())
            .with_file(file)
            .with_span(self.span)
            .with_context(self.text.clone());
        if let Some(help) = self.kind.help() {
            builder = builder.with_help(help);
        }
        builder.build()
    }
}

impl miette::Diagnostic for RuntimeError {
    fn code<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        Some(Box::new(format!("kang::{}", self.kind.name())))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        self.kind
            .help()
            .map(|h| Box::new(h) as Box<dyn std::fmt::Display + 'a>)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = miette::LabeledSpan> + '_>> {
        let span: SourceSpan = self.span.into();
        Some(Box::new(std::iter::once(miette::LabeledSpan::new_with_span(
            Some(self.kind.name().to_string()),
            span,
        ))))
    }
}

/// Serialized form of a runtime error.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorReport {
    pub code: &'static str,
    pub kind: &'static str,
    pub line: usize,
    pub message: String,
}

impl From<&RuntimeError> for ErrorReport {
    fn from(err: &RuntimeError) -> Self {
        Self {
            code: err.code(),
            kind: err.kind.name(),
            line: err.line,
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn syntax_error() -> RuntimeError {
        RuntimeError::new(
            1,
            "foo bar",
            Span::line(1, 0, "foo bar"),
            ErrorKind::Syntax {
                message: "Unknown statement",
                text: "foo bar".into(),
            },
        )
    }

    #[test]
    fn test_message_names_line_and_text() {
        assert_eq!(syntax_error().to_string(), "line 1: Unknown statement: foo bar");
    }

    #[test]
    fn test_codes_are_distinct() {
        let kinds = [
            ErrorKind::Syntax { message: "", text: String::new() },
            ErrorKind::UnboundVariable { name: String::new() },
            ErrorKind::UnresolvedValue { text: String::new() },
            ErrorKind::DivisionByZero,
            ErrorKind::InvalidLoopCount { found: String::new() },
            ErrorKind::TypeMismatch { op: "sub", left: "string", right: "number" },
        ];
        let codes: std::collections::HashSet<_> = kinds.iter().map(|k| k.code()).collect();
        assert_eq!(codes.len(), kinds.len());
    }

    #[test]
    fn test_type_mismatch_help_mentions_booleans() {
        for op in ["add", "sub"] {
            let kind = ErrorKind::TypeMismatch { op, left: "boolean", right: "number" };
            let help = kind.help().unwrap();
            assert!(help.contains("booleans are never coerced"), "{}", help);
        }
    }

    #[test]
    fn test_to_diagnostic() {
        let diag = syntax_error().to_diagnostic("main.kang");
        assert_eq!(diag.code, "E001");
        assert_eq!(diag.file, "main.kang");
        assert_eq!(diag.span.start.line, 1);
        assert_eq!(diag.context.as_deref(), Some("foo bar"));
        assert!(diag.help.is_some());
    }

    #[test]
    fn test_miette_metadata() {
        let err = syntax_error();
        let code = miette::Diagnostic::code(&err).unwrap().to_string();
        assert_eq!(code, "kang::SyntaxError");
        let labels: Vec<_> = miette::Diagnostic::labels(&err).unwrap().collect();
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].len(), 7);
    }
}
