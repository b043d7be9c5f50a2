//! Diagnostic types for `check` results and machine-readable error output.

use serde::{Deserialize, Serialize};

use crate::span::Span;

/// Severity level of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticSeverity {
    Error,
    Warning,
}

/// A diagnostic message with source location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: DiagnosticSeverity,
    /// Error code (e.g., "E001")
    pub code: String,
    pub message: String,
    /// Source file path, empty when the source did not come from a file
    pub file: String,
    pub span: Span,
    /// The offending source line
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
}

impl Diagnostic {
    pub fn error(code: impl Into<String>, message: impl Into<String>) -> DiagnosticBuilder {
        DiagnosticBuilder::new(DiagnosticSeverity::Error, code.into(), message.into())
    }

    pub fn warning(code: impl Into<String>, message: impl Into<String>) -> DiagnosticBuilder {
        DiagnosticBuilder::new(DiagnosticSeverity::Warning, code.into(), message.into())
    }

    pub fn line(&self) -> usize {
        self.span.start.line
    }
}

/// Builder for constructing diagnostics.
pub struct DiagnosticBuilder {
    diagnostic: Diagnostic,
}

impl DiagnosticBuilder {
    pub fn new(severity: DiagnosticSeverity, code: String, message: String) -> Self {
        Self {
            diagnostic: Diagnostic {
                severity,
                code,
                message,
                file: String::new(),
                span: Span::default(),
                context: None,
                help: None,
            },
        }
    }

    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.diagnostic.file = file.into();
        self
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.diagnostic.span = span;
        self
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.diagnostic.context = Some(context.into());
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.diagnostic.help = Some(help.into());
        self
    }

    pub fn build(self) -> Diagnostic {
        self.diagnostic
    }
}

/// Collection of diagnostics, in source order.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Diagnostics {
    diagnostics: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.with_severity(DiagnosticSeverity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.with_severity(DiagnosticSeverity::Warning)
    }

    fn with_severity(&self, severity: DiagnosticSeverity) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(move |d| d.severity == severity)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }
}

/// JSON output format for `check`.
#[derive(Debug, Serialize, Deserialize)]
pub struct DiagnosticsOutput {
    pub version: String,
    pub status: String,
    pub errors: Vec<Diagnostic>,
    pub warnings: Vec<Diagnostic>,
    pub summary: DiagnosticsSummary,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DiagnosticsSummary {
    pub total_errors: usize,
    pub total_warnings: usize,
}

impl DiagnosticsOutput {
    pub fn from_diagnostics(diagnostics: &Diagnostics) -> Self {
        let errors: Vec<_> = diagnostics.errors().cloned().collect();
        let warnings: Vec<_> = diagnostics.warnings().cloned().collect();

        Self {
            version: "1.0".to_string(),
            status: if errors.is_empty() { "ok" } else { "error" }.to_string(),
            summary: DiagnosticsSummary {
                total_errors: errors.len(),
                total_warnings: warnings.len(),
            },
            errors,
            warnings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_filters() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.push(Diagnostic::warning("W001", "indented").build());
        assert!(!diagnostics.has_errors());

        diagnostics.push(Diagnostic::error("E001", "unknown").with_file("a.kang").build());
        assert!(diagnostics.has_errors());
        assert_eq!(diagnostics.errors().count(), 1);
        assert_eq!(diagnostics.warnings().count(), 1);
        assert_eq!(diagnostics.len(), 2);
    }

    #[test]
    fn test_output_summary() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.push(Diagnostic::error("E001", "unknown").build());
        let output = DiagnosticsOutput::from_diagnostics(&diagnostics);
        assert_eq!(output.status, "error");
        assert_eq!(output.summary.total_errors, 1);

        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(json["errors"][0]["severity"], "error");
        assert!(json["errors"][0].get("help").is_none());
    }
}
