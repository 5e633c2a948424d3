//! Editor diagnostics for lint violations.
//!
//! Violations become Language Server Protocol diagnostics: 0-based
//! positions, error severity, the rule id as code.

use std::path::PathBuf;

use lsp_types::{Diagnostic, DiagnosticSeverity, NumberOrString, Position, Range, Url};

use crate::lint::Violation;

pub const DIAGNOSTIC_SOURCE: &str = "vue-html-bridge";

pub fn to_diagnostics(violations: &[Violation]) -> Vec<Diagnostic> {
    violations.iter().map(to_diagnostic).collect()
}

/// Single-line range from the violation's start across its raw fragment.
pub fn to_diagnostic(v: &Violation) -> Diagnostic {
    let line = v.line.saturating_sub(1);
    let raw_len = u32::try_from(v.raw.chars().count()).unwrap_or(u32::MAX);
    let range = Range::new(
        Position::new(line, v.col.saturating_sub(1)),
        Position::new(line, v.col.saturating_add(raw_len).saturating_sub(1)),
    );
    Diagnostic::new(
        range,
        Some(DiagnosticSeverity::ERROR),
        (!v.rule_id.is_empty()).then(|| NumberOrString::String(v.rule_id.clone())),
        Some(DIAGNOSTIC_SOURCE.to_string()),
        format!("{}\n\nGenerated HTML:\n{}", v.message, v.related_info),
        None,
        None,
    )
}

/// Only local `.vue` documents can be validated: the validator resolves its
/// configuration from the file path.
pub fn should_validate_uri(uri: &str) -> bool {
    (uri.ends_with(".vue") || uri.ends_with(".vue.git")) && uri.starts_with("file://")
}

/// Local path of a `file://` URI; `None` for other schemes or URIs that do
/// not name a local file.
pub fn uri_to_file_path(uri: &str) -> Option<PathBuf> {
    let url = Url::parse(uri).ok().filter(|url| url.scheme() == "file")?;
    url.to_file_path().ok()
}
