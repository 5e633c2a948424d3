//! # vue-html-bridge
//!
//! Enumerates every statically reachable HTML rendering of a Vue single-file
//! component so that a plain HTML validator can check markup that only exists
//! at runtime.
//!
//! ## Pipeline
//!
//! 1. **Split** the SFC into blocks (`document`).
//! 2. **Catalog** the finite value domain of every `<script setup>` binding
//!    that can reach the template (`catalog`, backed by `bindings`).
//! 3. **Contexts**: the cartesian product of those domains (`context`).
//! 4. **Parse** the template with SFC positions (`parse`).
//! 5. **Permute** each sibling list per context: `v-if` chains, `v-show`
//!    toggles and `v-for` loops multiply the scenarios (`segment`, `permute`).
//! 6. **Render** every scenario twice, plain and annotated with source
//!    positions, then **format** both (`render`, `format`).
//!
//! Findings reported against the annotated HTML are mapped back to the SFC by
//! `remap`; `lint` and `diagnostics` wire that to an external validator and
//! to editor diagnostics.
//!
//! ## Ordering
//!
//! Outputs are ordered by context (catalog key order, then value order), then
//! by scenario. The same input always yields the same list.

#[cfg(feature = "napi")]
use napi_derive::napi;
use serde::{Deserialize, Serialize};

pub mod bindings;
pub mod catalog;
pub mod config;
pub mod context;
pub mod diagnostics;
pub mod discovery;
pub mod document;
pub mod error;
pub mod format;
pub mod ir;
pub mod lint;
pub mod logging;
pub mod parse;
pub mod permute;
pub mod remap;
pub mod render;
pub mod segment;

#[cfg(test)]
mod bridge_tests;
#[cfg(test)]
mod lint_tests;

pub use config::{BridgeOptions, FormatOptions};
pub use error::{BridgeError, ParseError};
pub use lint::{lint, Finding, HtmlValidator, Violation};
pub use remap::{map_location, SourcePosition};

use crate::catalog::build_catalog;
use crate::context::generate_contexts;
use crate::document::parse_sfc;
use crate::format::format_html;
use crate::parse::parse_template;
use crate::permute::PermutationEngine;
use crate::render::Renderer;

/// One rendering scenario of a component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BridgeOutput {
    pub plain: String,
    /// Same markup with `data-*-line` / `data-*-column` source positions.
    pub annotated: String,
}

pub fn bridge(source: &str) -> Result<Vec<BridgeOutput>, BridgeError> {
    bridge_with_options(source, &BridgeOptions::default())
}

pub fn bridge_with_options(
    source: &str,
    options: &BridgeOptions,
) -> Result<Vec<BridgeOutput>, BridgeError> {
    let sfc = parse_sfc(source)?;

    let script = sfc.script_setup.as_ref().map_or("", |block| block.content);
    let catalog = build_catalog(script);
    let contexts = generate_contexts(&catalog.definitions);

    let nodes = match &sfc.template {
        Some(block) => parse_template(source, block.offset..block.offset + block.content.len())?,
        None => Vec::new(),
    };

    let mut outputs = Vec::new();
    for context in &contexts {
        let scenarios = PermutationEngine::new(context, &catalog.static_arrays).permute(&nodes);
        let plain = Renderer::new(context, false);
        let annotated = Renderer::new(context, true);
        outputs.extend(scenarios.iter().map(|scenario| BridgeOutput {
            plain: format_html(&plain.render(scenario), &options.format),
            annotated: format_html(&annotated.render(scenario), &options.format),
        }));
    }

    tracing::trace!(
        bindings = catalog.definitions.len(),
        contexts = contexts.len(),
        outputs = outputs.len(),
        "bridged component"
    );
    Ok(outputs)
}

// ═══════════════════════════════════════════════════════════════════════════════
// NAPI EXPORTS
// ═══════════════════════════════════════════════════════════════════════════════

/// `options_json` is a partial `BridgeOptions` object; missing keys keep
/// their defaults.
#[cfg(feature = "napi")]
#[napi]
pub fn bridge_native(source: String, options_json: Option<String>) -> napi::Result<serde_json::Value> {
    let options = match options_json.as_deref() {
        Some(json) => serde_json::from_str(json).map_err(|e| napi::Error::from_reason(e.to_string()))?,
        None => BridgeOptions::default(),
    };
    let outputs = bridge_with_options(&source, &options)
        .map_err(|e| napi::Error::from_reason(format!("[{}] {e}", e.code())))?;
    serde_json::to_value(outputs).map_err(|e| napi::Error::from_reason(e.to_string()))
}

#[cfg(feature = "napi")]
#[napi]
pub fn remap_location_native(html: String, line: u32, col: u32, raw: String) -> serde_json::Value {
    serde_json::to_value(map_location(&html, line, col, &raw)).unwrap_or(serde_json::Value::Null)
}
