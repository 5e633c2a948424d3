use indoc::indoc;
use similar_asserts::assert_eq;

use crate::error::{BridgeError, X_MISSING_END_TAG};
use crate::remap::{map_location, SourcePosition};
use crate::{bridge, bridge_with_options, BridgeOptions, BridgeOutput};

fn output(plain: &str, annotated: &str) -> BridgeOutput {
    BridgeOutput {
        plain: plain.to_string(),
        annotated: annotated.to_string(),
    }
}

fn plain(outputs: &[BridgeOutput]) -> Vec<&str> {
    outputs.iter().map(|o| o.plain.as_str()).collect()
}

fn unformatted(source: &str) -> Vec<BridgeOutput> {
    bridge_with_options(source, &BridgeOptions::unformatted()).unwrap()
}

// ═══════════════════════════════════════════════════════════════════════════════
// SCRIPT ANALYSIS
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_union_typed_prop() {
    let input = indoc! {r#"
        <template>
          <div :aria-hidden="hidden">test</div>
        </template>
        <script lang="ts" setup>
        const props = defineProps<{ hidden: 'true' | 'false' }>()
        </script>"#};

    assert_eq!(
        bridge(input).unwrap(),
        vec![
            output(
                r#"<div aria-hidden="true">test</div>"#,
                r#"<div data-start-line="2" data-start-column="3" data-end-line="2" data-end-column="40" aria-hidden="true" data-aria-hidden-start-line="2" data-aria-hidden-start-column="8" data-aria-hidden-end-line="2" data-aria-hidden-end-column="29">test</div>"#,
            ),
            output(
                r#"<div aria-hidden="false">test</div>"#,
                r#"<div data-start-line="2" data-start-column="3" data-end-line="2" data-end-column="40" aria-hidden="false" data-aria-hidden-start-line="2" data-aria-hidden-start-column="8" data-aria-hidden-end-line="2" data-aria-hidden-end-column="29">test</div>"#,
            ),
        ]
    );
}

#[test]
fn test_boolean_prop() {
    let input = indoc! {r#"
        <template>
          <button :disabled="isDisabled">Click</button>
        </template>
        <script lang="ts" setup>
        defineProps<{ isDisabled: boolean }>()
        </script>"#};

    assert_eq!(
        bridge(input).unwrap(),
        vec![
            output(
                r#"<button disabled="true">Click</button>"#,
                r#"<button data-start-line="2" data-start-column="3" data-end-line="2" data-end-column="48" disabled="true" data-disabled-start-line="2" data-disabled-start-column="11" data-disabled-end-line="2" data-disabled-end-column="33">Click</button>"#,
            ),
            output(
                r#"<button disabled="false">Click</button>"#,
                r#"<button data-start-line="2" data-start-column="3" data-end-line="2" data-end-column="48" disabled="false" data-disabled-start-line="2" data-disabled-start-column="11" data-disabled-end-line="2" data-disabled-end-column="33">Click</button>"#,
            ),
        ]
    );
}

#[test]
fn test_type_annotation_beats_initializer() {
    let input = indoc! {r#"
        <template>
          <span :class="theme">text</span>
        </template>
        <script lang="ts" setup>
        const theme: 'light' | 'dark' = 'light'
        </script>"#};

    let outputs = bridge(input).unwrap();
    assert_eq!(
        plain(&outputs),
        vec![
            r#"<span class="light">text</span>"#,
            r#"<span class="dark">text</span>"#,
        ]
    );
    assert_eq!(
        outputs[1].annotated,
        r#"<span data-start-line="2" data-start-column="3" data-end-line="2" data-end-column="35" class="dark" data-class-start-line="2" data-class-start-column="9" data-class-end-line="2" data-class-end-column="23">text</span>"#
    );
}

#[test]
fn test_destructured_default_is_the_only_value() {
    let input = indoc! {r#"
        <template>
          <p :data-size="size">{{ label }}</p>
        </template>
        <script setup lang="ts">
        const { size = 'md' } = defineProps<{ size?: string; label: string }>()
        </script>"#};

    assert_eq!(
        plain(&bridge(input).unwrap()),
        vec![r#"<p data-size="md">mock-label</p>"#]
    );
}

#[test]
fn test_unparseable_script_renders_unresolved() {
    let input = indoc! {r#"
        <template>
          <p :title="title">{{ title }}</p>
        </template>
        <script setup>
        const title = = "x"
        </script>"#};

    assert_eq!(
        plain(&bridge(input).unwrap()),
        vec![r#"<p title="{{unresolved}}">{{unresolved}}</p>"#]
    );
}

#[test]
fn test_output_count_is_contexts_times_scenarios() {
    let input = indoc! {r#"
        <template>
          <div>
            <b v-if="open">{{ size }}</b>
            <i v-show="visible">x</i>
          </div>
        </template>
        <script setup lang="ts">
        defineProps<{ open: boolean; size: 'sm' | 'md' | 'lg' }>()
        const visible = true
        </script>"#};

    // open(2) x size(3) x visible(1) contexts, 2 x 2 scenarios each.
    let outputs = bridge(input).unwrap();
    assert_eq!(outputs.len(), 24);
    assert_eq!(outputs[0].plain, "<div><b>sm</b><i>x</i></div>");
    assert_eq!(outputs[3].plain, "<div></div>");
}

// ═══════════════════════════════════════════════════════════════════════════════
// TEMPLATE PERMUTATION
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_if_else_pair() {
    let input = indoc! {r#"
        <template>
          <div v-if="true">A</div>
          <div v-else>B</div>
        </template>"#};

    assert_eq!(
        bridge(input).unwrap(),
        vec![
            output(
                "<div>A</div>",
                r#"<div data-start-line="2" data-start-column="3" data-end-line="2" data-end-column="27">A</div>"#,
            ),
            output(
                "<div>B</div>",
                r#"<div data-start-line="3" data-start-column="3" data-end-line="3" data-end-column="22">B</div>"#,
            ),
        ]
    );
}

#[test]
fn test_implicit_else_renders_nothing() {
    let input = indoc! {r#"
        <template>
          <span v-if="loaded">Done</span>
        </template>"#};

    assert_eq!(
        bridge(input).unwrap(),
        vec![
            output(
                "<span>Done</span>",
                r#"<span data-start-line="2" data-start-column="3" data-end-line="2" data-end-column="34">Done</span>"#,
            ),
            output("", ""),
        ]
    );
}

#[test]
fn test_show_toggle() {
    let input = indoc! {r#"
        <template>
          <div v-show="isOpen">Content</div>
        </template>"#};

    assert_eq!(
        bridge(input).unwrap(),
        vec![
            output(
                "<div>Content</div>",
                r#"<div data-start-line="2" data-start-column="3" data-end-line="2" data-end-column="37">Content</div>"#,
            ),
            output("", ""),
        ]
    );
}

const TEMPLATE_UNWRAP: &str = indoc! {r#"
    <template>
      <div class="root">
        <template v-if="true">
          <span>Child</span>
        </template>
      </div>
    </template>"#};

#[test]
fn test_template_branch_is_unwrapped() {
    assert_eq!(
        unformatted(TEMPLATE_UNWRAP),
        vec![
            output(
                r#"<div class="root"><span>Child</span></div>"#,
                r#"<div data-start-line="2" data-start-column="3" data-end-line="6" data-end-column="9" class="root" data-class-start-line="2" data-class-start-column="8" data-class-end-line="2" data-class-end-column="20"><span data-start-line="4" data-start-column="7" data-end-line="4" data-end-column="25">Child</span></div>"#,
            ),
            output(
                r#"<div class="root"></div>"#,
                r#"<div data-start-line="2" data-start-column="3" data-end-line="6" data-end-column="9" class="root" data-class-start-line="2" data-class-start-column="8" data-class-end-line="2" data-class-end-column="20"></div>"#,
            ),
        ]
    );
}

#[test]
fn test_formatting_breaks_wide_annotated_markup() {
    let outputs = bridge(TEMPLATE_UNWRAP).unwrap();
    assert_eq!(outputs[0].plain, r#"<div class="root"><span>Child</span></div>"#);
    assert_eq!(
        outputs[0].annotated,
        indoc! {r#"
            <div data-start-line="2" data-start-column="3" data-end-line="6" data-end-column="9" class="root" data-class-start-line="2" data-class-start-column="8" data-class-end-line="2" data-class-end-column="20">
              <span data-start-line="4" data-start-column="7" data-end-line="4" data-end-column="25">Child</span>
            </div>"#}
    );
}

#[test]
fn test_formatting_keeps_pre_content() {
    let input = "<template>\n  <pre>a\n   b</pre>\n</template>";

    let formatted = bridge(input).unwrap();
    assert_eq!(plain(&formatted), vec!["<pre>a\n   b</pre>"]);
    assert_eq!(formatted, unformatted(input));
}

// ═══════════════════════════════════════════════════════════════════════════════
// RENDERING & INJECTION
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_interpolation() {
    let input = indoc! {r#"
        <template>
          <h1>{{ title }}</h1>
        </template>
        <script lang="ts" setup>
        const title = "Hello"
        </script>"#};

    assert_eq!(
        bridge(input).unwrap(),
        vec![output(
            "<h1>Hello</h1>",
            r#"<h1 data-start-line="2" data-start-column="3" data-end-line="2" data-end-column="23">Hello</h1>"#,
        )]
    );
}

#[test]
fn test_for_over_literal_array_has_no_empty_case() {
    let input = indoc! {r#"
        <template>
          <ul>
            <li v-for="tag in tags">{{ tag }}</li>
          </ul>
        </template>
        <script lang="ts" setup>
        const tags = ["A", "B"]
        </script>"#};

    assert_eq!(
        unformatted(input),
        vec![output(
            "<ul><li>A</li><li>B</li></ul>",
            r#"<ul data-start-line="2" data-start-column="3" data-end-line="4" data-end-column="8"><li data-start-line="3" data-start-column="5" data-end-line="3" data-end-column="43">A</li><li data-start-line="3" data-start-column="5" data-end-line="3" data-end-column="43">B</li></ul>"#,
        )]
    );
}

#[test]
fn test_for_over_ref_array_includes_empty_case() {
    let input = indoc! {r#"
        <template>
          <ul>
            <li v-for="tag in tags">{{ tag }}</li>
          </ul>
        </template>
        <script lang="ts" setup>
        import { ref } from 'vue'
        const tags = ref(["A", "B"])
        </script>"#};

    let outputs = unformatted(input);
    assert_eq!(
        plain(&outputs),
        vec!["<ul></ul>", "<ul><li>A</li><li>B</li></ul>"]
    );
    assert_eq!(
        outputs[0].annotated,
        r#"<ul data-start-line="2" data-start-column="3" data-end-line="4" data-end-column="8"></ul>"#
    );
}

#[test]
fn test_for_over_unknown_array() {
    let input = indoc! {r#"
        <template>
          <div>
            <span v-for="item in unknownList">{{ item }}</span>
          </div>
        </template>"#};

    let span = r#"<span data-start-line="3" data-start-column="5" data-end-line="3" data-end-column="56">mock-item</span>"#;
    let div = r#"<div data-start-line="2" data-start-column="3" data-end-line="4" data-end-column="9">"#;
    assert_eq!(
        unformatted(input),
        vec![
            output("<div></div>", &format!("{div}</div>")),
            output(
                "<div><span>mock-item</span></div>",
                &format!("{div}{span}</div>"),
            ),
            output(
                "<div><span>mock-item</span><span>mock-item</span></div>",
                &format!("{div}{span}{span}</div>"),
            ),
        ]
    );
}

#[test]
fn test_positions_account_for_script_before_template() {
    let input = indoc! {r#"
        <script setup lang="ts">
        const title = "Hi"
        </script>

        <template>
          <h1>{{ title }}</h1>
        </template>"#};

    assert_eq!(
        bridge(input).unwrap()[0].annotated,
        r#"<h1 data-start-line="6" data-start-column="3" data-end-line="6" data-end-column="23">Hi</h1>"#
    );
}

// ═══════════════════════════════════════════════════════════════════════════════
// EDGE CASES
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_missing_template_yields_one_empty_output() {
    let outputs = bridge("<script setup>\nconst a = 1\n</script>").unwrap();
    assert_eq!(outputs, vec![output("", "")]);
}

#[test]
fn test_unclosed_element_is_fatal() {
    let input = indoc! {r#"
        <template>
          <p>ok</p>
          <div>
        </template>"#};

    match bridge(input) {
        Err(BridgeError::TemplateParse(err)) => {
            assert_eq!(err.code, X_MISSING_END_TAG);
            assert_eq!((err.line, err.column), (3, 3));
        }
        other => panic!("expected a template parse error, got {other:?}"),
    }
}

#[test]
fn test_bridge_is_deterministic() {
    let input = indoc! {r#"
        <template>
          <a v-if="x" :href="url">link</a>
          <li v-for="i in items">{{ i }}</li>
        </template>
        <script setup lang="ts">
        defineProps<{ x: boolean; url: '/a' | '/b' }>()
        </script>"#};

    assert_eq!(bridge(input).unwrap(), bridge(input).unwrap());
}

#[test]
fn test_annotated_positions_round_trip() {
    let input = indoc! {r#"
        <template>
          <div class="root">
            <img src="a.png">
            <label :for="id">Name</label>
          </div>
        </template>"#};

    let outputs = bridge(input).unwrap();
    let annotated = &outputs[0].annotated;

    let line_col = |needle: &str| -> (u32, u32) {
        let offset = annotated.find(needle).unwrap();
        let before = &annotated[..offset];
        let line = before.matches('\n').count() as u32 + 1;
        let col = (offset - before.rfind('\n').map_or(0, |i| i + 1)) as u32 + 1;
        (line, col)
    };

    let (line, col) = line_col("<img");
    assert_eq!(map_location(annotated, line, col, "<img"), SourcePosition { line: 3, col: 5 });

    let (line, col) = line_col("src=");
    assert_eq!(
        map_location(annotated, line, col, r#"src="a.png""#),
        SourcePosition { line: 3, col: 10 }
    );

    let (line, col) = line_col("for=");
    assert_eq!(
        map_location(annotated, line, col, "for"),
        SourcePosition { line: 4, col: 12 }
    );

    let (line, col) = line_col("Name");
    assert_eq!(
        map_location(annotated, line, col, "Name"),
        SourcePosition { line: 4, col: 5 }
    );
}
