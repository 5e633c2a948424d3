//! Template IR produced by the template parser.
//!
//! Every element and every attribute carries a [`SourceSpan`] in SFC
//! coordinates: 1-based line and column, end exclusive. These spans are what
//! the annotated renderer embeds as `data-*-line` / `data-*-column` values.

use serde::Serialize;

// ═══════════════════════════════════════════════════════════════════════════════
// POSITIONS
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub line: u32,
    pub column: u32,
    /// Byte offset into the SFC source.
    pub offset: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceSpan {
    pub start: Position,
    pub end: Position,
}

// ═══════════════════════════════════════════════════════════════════════════════
// NODES
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum TemplateNode {
    Element(ElementNode),
    Text(TextNode),
    Comment(CommentNode),
    Interpolation(InterpolationNode),
}

impl TemplateNode {
    pub fn as_element(&self) -> Option<&ElementNode> {
        match self {
            TemplateNode::Element(el) => Some(el),
            _ => None,
        }
    }

    pub fn span(&self) -> SourceSpan {
        match self {
            TemplateNode::Element(el) => el.span,
            TemplateNode::Text(t) => t.span,
            TemplateNode::Comment(c) => c.span,
            TemplateNode::Interpolation(i) => i.span,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementNode {
    pub tag: String,
    pub props: Vec<Prop>,
    pub children: Vec<TemplateNode>,
    pub span: SourceSpan,
    pub self_closing: bool,
}

impl ElementNode {
    /// Finds a directive by its normalized name (`if`, `else-if`, `bind`, ...).
    pub fn directive(&self, name: &str) -> Option<&DirectiveProp> {
        self.props.iter().find_map(|prop| match prop {
            Prop::Directive(dir) if dir.name == name => Some(dir),
            _ => None,
        })
    }

    pub fn has_directive(&self, name: &str) -> bool {
        self.directive(name).is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextNode {
    pub content: String,
    pub span: SourceSpan,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentNode {
    pub content: String,
    pub span: SourceSpan,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InterpolationNode {
    /// Raw expression text between `{{` and `}}`, untrimmed.
    pub content: String,
    pub span: SourceSpan,
}

// ═══════════════════════════════════════════════════════════════════════════════
// ATTRIBUTES & DIRECTIVES
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Prop {
    Attribute(AttributeProp),
    Directive(DirectiveProp),
}

impl Prop {
    pub fn span(&self) -> SourceSpan {
        match self {
            Prop::Attribute(attr) => attr.span,
            Prop::Directive(dir) => dir.span,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeProp {
    pub name: String,
    pub value: Option<String>,
    pub span: SourceSpan,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectiveProp {
    /// Normalized name without the `v-` prefix or shorthand (`bind`, `on`, `if`, ...).
    pub name: String,
    /// The attribute name exactly as written (`:class`, `v-if`, `@click.stop`).
    pub raw_name: String,
    pub arg: Option<DirectiveArg>,
    pub exp: Option<String>,
    pub modifiers: Vec<String>,
    pub span: SourceSpan,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectiveArg {
    pub content: String,
    /// False for `[dynamic]` arguments.
    pub is_static: bool,
}
