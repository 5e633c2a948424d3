//! # Lint Pipeline
//!
//! Runs an external HTML validator over every annotated scenario of a
//! component and reports its findings against the SFC.
//!
//! Each scenario is validated under the synthetic name `<template_path>.html`
//! so path-based validator configuration still applies. Validation runs on the
//! rayon pool; results are gathered in scenario order and then deduplicated
//! by `(rule_id, message)`, so the first scenario to trigger a finding is the
//! one reported.

use std::collections::HashSet;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::BridgeOptions;
use crate::error::BridgeError;
use crate::remap::map_location;
use crate::{bridge_with_options, BridgeOutput};

/// A finding in validator coordinates: `line`/`col` point into the
/// annotated HTML, `raw` is the flagged source fragment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    pub rule_id: String,
    pub message: String,
    pub line: u32,
    pub col: u32,
    pub raw: String,
}

/// A finding remapped to the SFC, with the plain HTML of the scenario that
/// produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Violation {
    pub rule_id: String,
    pub message: String,
    pub line: u32,
    pub col: u32,
    pub raw: String,
    pub related_info: String,
}

pub trait HtmlValidator: Send + Sync {
    fn validate(&self, html: &str, name: &str) -> anyhow::Result<Vec<Finding>>;
}

impl<F> HtmlValidator for F
where
    F: Fn(&str, &str) -> anyhow::Result<Vec<Finding>> + Send + Sync,
{
    fn validate(&self, html: &str, name: &str) -> anyhow::Result<Vec<Finding>> {
        self(html, name)
    }
}

pub fn lint(
    source: &str,
    template_path: &str,
    validator: &dyn HtmlValidator,
    options: &BridgeOptions,
) -> Result<Vec<Violation>, BridgeError> {
    let outputs = bridge_with_options(source, options)?;
    lint_outputs(&outputs, template_path, validator)
}

/// Validates already bridged scenarios.
pub fn lint_outputs(
    outputs: &[BridgeOutput],
    template_path: &str,
    validator: &dyn HtmlValidator,
) -> Result<Vec<Violation>, BridgeError> {
    let name = format!("{template_path}.html");

    let results: Vec<anyhow::Result<Vec<Finding>>> = outputs
        .par_iter()
        .map(|output| validator.validate(&output.annotated, &name))
        .collect();

    // The lowest failing scenario is reported, whichever finished first.
    let per_scenario = results
        .into_iter()
        .enumerate()
        .map(|(scenario, result)| {
            result.map_err(|err| BridgeError::Validator {
                scenario,
                message: format!("{err:#}"),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut seen: HashSet<(String, String)> = HashSet::new();
    let mut violations = Vec::new();
    for (output, findings) in outputs.iter().zip(per_scenario) {
        for finding in findings {
            if !seen.insert((finding.rule_id.clone(), finding.message.clone())) {
                continue;
            }
            let mapped = map_location(&output.annotated, finding.line, finding.col, &finding.raw);
            violations.push(Violation {
                rule_id: finding.rule_id,
                message: finding.message,
                line: mapped.line,
                col: mapped.col,
                raw: finding.raw,
                related_info: output.plain.clone(),
            });
        }
    }

    tracing::debug!(
        scenarios = outputs.len(),
        violations = violations.len(),
        "lint finished"
    );
    Ok(violations)
}
