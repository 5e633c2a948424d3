//! Error types for the bridge pipeline.
//!
//! Template markup errors are fatal for one invocation and carry a stable
//! error code plus the SFC position where parsing stopped. Script analysis
//! never errors (it degrades to an empty catalog), and the formatter and
//! location remapper have their own non-fatal fallbacks.

use serde::Serialize;
use thiserror::Error;

// ═══════════════════════════════════════════════════════════════════════════════
// ERROR CODES
// ═══════════════════════════════════════════════════════════════════════════════

pub const X_MISSING_END_TAG: &str = "X_MISSING_END_TAG";
pub const X_INVALID_END_TAG: &str = "X_INVALID_END_TAG";
pub const X_EOF_IN_COMMENT: &str = "X_EOF_IN_COMMENT";
pub const X_EOF_IN_TAG: &str = "X_EOF_IN_TAG";
pub const X_MISSING_INTERPOLATION_END: &str = "X_MISSING_INTERPOLATION_END";
pub const X_DUPLICATE_ATTRIBUTE: &str = "X_DUPLICATE_ATTRIBUTE";
pub const X_MISSING_ATTRIBUTE_VALUE: &str = "X_MISSING_ATTRIBUTE_VALUE";

/// A fatal template markup error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[serde(rename_all = "camelCase")]
#[error("{code}: {message} ({line}:{column})")]
pub struct ParseError {
    pub code: &'static str,
    pub message: String,
    pub line: u32,
    pub column: u32,
}

impl ParseError {
    pub fn new(code: &'static str, message: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            code,
            message: message.into(),
            line,
            column,
        }
    }
}

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("template parse error: {0}")]
    TemplateParse(#[from] ParseError),

    #[error("validator failed on scenario {scenario}: {message}")]
    Validator { scenario: usize, message: String },
}

impl BridgeError {
    /// Stable code for the error, used by the CLI and napi surfaces.
    pub fn code(&self) -> &'static str {
        match self {
            BridgeError::TemplateParse(err) => err.code,
            BridgeError::Validator { .. } => "X_VALIDATOR_FAILED",
        }
    }
}
