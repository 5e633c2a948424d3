use std::sync::Mutex;

use indoc::indoc;
use lsp_types::NumberOrString;
use similar_asserts::assert_eq;

use crate::diagnostics::to_diagnostics;
use crate::error::BridgeError;
use crate::lint::{lint, Finding, HtmlValidator, Violation};
use crate::BridgeOptions;

/// Flags `<img>` without `alt` and `aria-hidden` values other than
/// `true`/`false`, the way a markup linter reports them.
struct FakeLinter {
    names: Mutex<Vec<String>>,
}

impl FakeLinter {
    fn new() -> Self {
        Self {
            names: Mutex::new(Vec::new()),
        }
    }
}

impl HtmlValidator for FakeLinter {
    fn validate(&self, html: &str, name: &str) -> anyhow::Result<Vec<Finding>> {
        self.names.lock().unwrap().push(name.to_string());

        let mut findings = Vec::new();
        for (i, line) in html.lines().enumerate() {
            for (col, _) in line.match_indices("<img") {
                let tag_end = line[col..].find('>').map_or(line.len(), |e| col + e);
                if !line[col..tag_end].contains(" alt=") {
                    findings.push(finding(
                        "required-attr",
                        "The \"img\" element expects the \"alt\" attribute",
                        i,
                        col,
                        "<img",
                    ));
                }
            }
            for (col, raw) in line.match_indices(r#"aria-hidden="invalid""#) {
                findings.push(finding(
                    "wai-aria",
                    "The \"aria-hidden\" state does not accept \"invalid\"",
                    i,
                    col,
                    raw,
                ));
            }
        }
        Ok(findings)
    }
}

fn finding(rule_id: &str, message: &str, line_index: usize, byte_col: usize, raw: &str) -> Finding {
    Finding {
        rule_id: rule_id.to_string(),
        message: message.to_string(),
        line: line_index as u32 + 1,
        col: byte_col as u32 + 1,
        raw: raw.to_string(),
    }
}

#[test]
fn test_violation_maps_to_element() {
    let input = indoc! {r#"
        <template>
          <img src="foo">
        </template>"#};

    let linter = FakeLinter::new();
    let violations = lint(input, "/app/src/App.vue", &linter, &BridgeOptions::default()).unwrap();

    assert_eq!(
        violations,
        vec![Violation {
            rule_id: "required-attr".to_string(),
            message: "The \"img\" element expects the \"alt\" attribute".to_string(),
            line: 2,
            col: 3,
            raw: "<img".to_string(),
            related_info: r#"<img src="foo">"#.to_string(),
        }]
    );
    assert_eq!(*linter.names.lock().unwrap(), vec!["/app/src/App.vue.html"]);
}

#[test]
fn test_violation_maps_to_attribute() {
    let input = indoc! {r#"
        <template>
          <div aria-hidden="invalid"></div>
        </template>"#};

    let violations = lint(input, "App.vue", &FakeLinter::new(), &BridgeOptions::default()).unwrap();
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].rule_id, "wai-aria");
    assert_eq!((violations[0].line, violations[0].col), (2, 8));
}

#[test]
fn test_duplicate_findings_are_reported_once() {
    let input = indoc! {r#"
        <template>
          <img src="a">
          <img src="b">
        </template>"#};

    let violations = lint(input, "App.vue", &FakeLinter::new(), &BridgeOptions::default()).unwrap();
    assert_eq!(violations.len(), 1);
    assert_eq!((violations[0].line, violations[0].col), (2, 3));
}

#[test]
fn test_first_scenario_wins_across_permutations() {
    let input = indoc! {r#"
        <template>
          <div v-if="true">
             <img src="a">
          </div>
          <div v-else>
             <img src="b">
          </div>
        </template>"#};

    let linter = FakeLinter::new();
    let violations = lint(input, "App.vue", &linter, &BridgeOptions::default()).unwrap();

    assert_eq!(linter.names.lock().unwrap().len(), 2);
    assert_eq!(violations.len(), 1);
    assert_eq!((violations[0].line, violations[0].col), (3, 6));
    assert_eq!(violations[0].related_info, r#"<div><img src="a"></div>"#);
}

#[test]
fn test_clean_markup_has_no_violations() {
    let input = indoc! {r#"
        <template>
          <img src="a" alt="A">
        </template>"#};

    let violations = lint(input, "App.vue", &FakeLinter::new(), &BridgeOptions::default()).unwrap();
    assert!(violations.is_empty());
}

#[test]
fn test_validator_failure_names_the_scenario() {
    let input = indoc! {r#"
        <template>
          <p v-if="ok">x</p>
        </template>"#};

    let failing = |html: &str, _name: &str| -> anyhow::Result<Vec<Finding>> {
        if html.is_empty() {
            anyhow::bail!("empty document");
        }
        Ok(Vec::new())
    };

    match lint(input, "App.vue", &failing, &BridgeOptions::default()) {
        Err(BridgeError::Validator { scenario, message }) => {
            assert_eq!(scenario, 1);
            assert_eq!(message, "empty document");
        }
        other => panic!("expected a validator error, got {other:?}"),
    }
}

#[test]
fn test_earliest_failing_scenario_is_reported() {
    let input = indoc! {r#"
        <template>
          <p v-if="ok">x</p>
        </template>"#};

    let failing = |html: &str, _name: &str| -> anyhow::Result<Vec<Finding>> {
        if html.is_empty() {
            anyhow::bail!("empty document");
        }
        std::thread::sleep(std::time::Duration::from_millis(200));
        anyhow::bail!("slow failure")
    };

    for _ in 0..3 {
        match lint(input, "App.vue", &failing, &BridgeOptions::default()) {
            Err(BridgeError::Validator { scenario, message }) => {
                assert_eq!(scenario, 0);
                assert_eq!(message, "slow failure");
            }
            other => panic!("expected a validator error, got {other:?}"),
        }
    }
}

#[test]
fn test_template_errors_stop_linting() {
    let result = lint(
        "<template><div></template>",
        "App.vue",
        &FakeLinter::new(),
        &BridgeOptions::default(),
    );
    assert!(matches!(result, Err(BridgeError::TemplateParse(_))));
}

#[test]
fn test_violations_become_diagnostics() {
    let input = indoc! {r#"
        <template>
          <img src="foo">
        </template>"#};

    let violations = lint(input, "App.vue", &FakeLinter::new(), &BridgeOptions::default()).unwrap();
    let diagnostics = to_diagnostics(&violations);

    assert_eq!(diagnostics.len(), 1);
    assert_eq!(
        (diagnostics[0].range.start.line, diagnostics[0].range.start.character),
        (1, 2)
    );
    assert_eq!(diagnostics[0].range.end.character, 6);
    assert_eq!(
        diagnostics[0].code,
        Some(NumberOrString::String("required-attr".to_string()))
    );
    assert!(diagnostics[0]
        .message
        .ends_with("\n\nGenerated HTML:\n<img src=\"foo\">"));
}
