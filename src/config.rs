//! Options for a bridge run.
//!
//! The same structs are filled from CLI flags and from the JSON object handed
//! to the napi export, so every field has a serde default.

use serde::{Deserialize, Serialize};

/// Prefix of synthesized placeholder values (`mock-title`, `mock-item`).
pub const MOCK_PREFIX: &str = "mock-";

/// Emitted for interpolations and bound attributes that resolve to nothing.
pub const UNRESOLVED: &str = "{{unresolved}}";

/// Wrapper tag that is unwrapped when it carries a conditional branch.
pub const TEMPLATE_TAG: &str = "template";

pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

pub fn is_void_element(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BridgeOptions {
    pub format: FormatOptions,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormatOptions {
    pub enabled: bool,
    pub print_width: usize,
    pub indent_width: usize,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            print_width: 80,
            indent_width: 2,
        }
    }
}

impl BridgeOptions {
    /// Options that leave rendered HTML exactly as the renderer produced it.
    pub fn unformatted() -> Self {
        Self {
            format: FormatOptions {
                enabled: false,
                ..FormatOptions::default()
            },
        }
    }
}
