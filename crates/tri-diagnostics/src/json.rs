// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! JSON diagnostic output for machine consumption.
//!
//! Use `--format json` to get this output from `tric`.

use serde::Serialize;
use tri_ast::LineMap;

use crate::{codes::ErrorCodeRegistry, Diagnostic, LabelStyle, Severity};

/// A complete JSON diagnostic report for a compilation run.
#[derive(Debug, Serialize)]
pub struct DiagnosticReport {
    /// Schema version for forward compatibility.
    pub version: u32,
    /// The file that was compiled.
    pub file: String,
    /// Whether compilation succeeded (no errors).
    pub success: bool,
    /// The compilation phase that produced these diagnostics.
    pub phase: String,
    pub diagnostics: Vec<JsonDiagnostic>,
    pub error_count: usize,
    pub warning_count: usize,
}

/// A single diagnostic in JSON form, enriched with source context.
#[derive(Debug, Serialize)]
pub struct JsonDiagnostic {
    /// Severity: "error", "warning", or "note".
    pub severity: Severity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Error category (e.g., "Type", "Syntax").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub message: String,
    /// Primary source location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<SourceLocation>,
    pub labels: Vec<JsonLabel>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
}

/// A source location with line/column (1-based).
#[derive(Debug, Serialize)]
pub struct SourceLocation {
    pub line: u32,
    pub column: u32,
    pub byte_offset: usize,
    /// The source line text for context.
    pub source_line: String,
}

/// A labeled span in JSON form.
#[derive(Debug, Serialize)]
pub struct JsonLabel {
    pub role: LabelStyle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub start: LineCol,
    pub end: LineCol,
}

/// Line/column pair (1-based).
#[derive(Debug, Serialize)]
pub struct LineCol {
    pub line: u32,
    pub column: u32,
    pub byte_offset: usize,
}

/// Convert diagnostics to a structured JSON report.
pub fn to_json_report(diagnostics: &[Diagnostic], source: &str, file: &str, phase: &str) -> DiagnosticReport {
    let registry = ErrorCodeRegistry::default();
    let lines = LineMap::new(source);

    let json_diags: Vec<JsonDiagnostic> = diagnostics
        .iter()
        .map(|d| to_json_diagnostic(d, source, &lines, &registry))
        .collect();
    let error_count = diagnostics.iter().filter(|d| d.severity == Severity::Error).count();
    let warning_count = diagnostics.iter().filter(|d| d.severity == Severity::Warning).count();

    DiagnosticReport {
        version: 1,
        file: file.to_string(),
        success: error_count == 0,
        phase: phase.to_string(),
        diagnostics: json_diags,
        error_count,
        warning_count,
    }
}

fn to_json_diagnostic(
    diag: &Diagnostic,
    source: &str,
    lines: &LineMap,
    registry: &ErrorCodeRegistry,
) -> JsonDiagnostic {
    let code = diag.code.as_ref().map(|c| c.0.clone());
    let category = code
        .as_ref()
        .and_then(|c| registry.get(c))
        .map(|info| info.category.to_string());

    let location = diag.primary_span().map(|span| {
        let (line, column) = lines.offset_to_line_col(span.start);
        SourceLocation {
            line,
            column,
            byte_offset: span.start,
            source_line: lines.line_text(source, line).unwrap_or("").to_string(),
        }
    });

    let line_col = |offset: usize| {
        let (line, column) = lines.offset_to_line_col(offset);
        LineCol {
            line,
            column,
            byte_offset: offset,
        }
    };

    let labels = diag
        .labels
        .iter()
        .map(|l| JsonLabel {
            role: l.style,
            message: l.message.clone(),
            start: line_col(l.span.start),
            end: line_col(l.span.end),
        })
        .collect();

    JsonDiagnostic {
        severity: diag.severity,
        code,
        category,
        message: diag.message.clone(),
        location,
        labels,
        notes: diag.notes.clone(),
        help: diag.help.clone(),
    }
}

/// Serialize a diagnostic report to pretty JSON.
pub fn to_json_string(report: &DiagnosticReport) -> String {
    serde_json::to_string_pretty(report).unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tri_ast::Span;

    #[test]
    fn report_shape() {
        let src = "pass;\nz = 3";
        let diags = vec![Diagnostic::error("undefined symbol: `z`")
            .with_code("E0200")
            .with_primary(Span::new(6, 7), "not found in this scope")];
        let report = to_json_report(&diags, src, "main.tri", "identification");
        assert!(!report.success);
        assert_eq!(report.error_count, 1);

        let value: serde_json::Value = serde_json::from_str(&to_json_string(&report)).unwrap();
        let diag = &value["diagnostics"][0];
        assert_eq!(diag["severity"], "error");
        assert_eq!(diag["code"], "E0200");
        assert_eq!(diag["category"], "Identification");
        assert_eq!(diag["location"]["line"], 2);
        assert_eq!(diag["location"]["column"], 1);
        assert_eq!(diag["location"]["source_line"], "z = 3");
        assert_eq!(diag["labels"][0]["role"], "primary");
        assert!(diag.get("help").is_none());
    }

    #[test]
    fn empty_report_is_success() {
        let report = to_json_report(&[], "pass", "main.tri", "codegen");
        assert!(report.success);
        assert_eq!(report.warning_count, 0);
    }
}
