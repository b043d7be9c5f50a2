//! KANG Core Library
//!
//! This crate provides the core functionality for the KANG language: a
//! display-only lexer and highlighter, and a line-by-line interpreter that
//! returns its output, variables and first error as an [`ExecutionContext`].

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod examples;
pub mod highlight;
pub mod interpreter;
pub mod lexer;
pub mod span;
pub mod statement;
pub mod value;

pub use config::{Config, ConfigError, OutputFormat};
pub use diagnostics::{Diagnostic, DiagnosticSeverity, Diagnostics};
pub use error::{ErrorKind, RuntimeError};
pub use highlight::{highlight, highlight_with, HighlightTheme};
pub use interpreter::{execute, validate, ExecutionContext, ExecutionReport};
pub use lexer::{tokenize, Lexer, Token, TokenKind};
pub use span::Span;
pub use statement::{Statement, StatementKind};
pub use value::{Value, Variable};
