//! # Annotated Renderer
//!
//! Serializes one permutation result to an HTML string under its render
//! context. In annotated mode every element carries its own source span as
//! `data-start-line`, `data-start-column`, `data-end-line` and
//! `data-end-column`, and every emitted attribute is followed by
//! `data-<name>-start-line` and friends pointing at the attribute in the SFC.
//!
//! Only static attributes and `v-bind` with a static argument are emitted.
//! Every other directive is a rendering instruction and disappears.

use crate::config::{is_void_element, UNRESOLVED};
use crate::context::RenderContext;
use crate::ir::{AttributeProp, DirectiveProp, ElementNode, Prop, SourceSpan, TemplateNode};
use crate::permute::{LoopBinding, PermutedNode};

pub struct Renderer<'c> {
    context: &'c RenderContext,
    annotate: bool,
}

impl<'c> Renderer<'c> {
    pub fn new(context: &'c RenderContext, annotate: bool) -> Self {
        Self { context, annotate }
    }

    /// Renders a sibling list. Nodes are concatenated without separators.
    pub fn render(&self, nodes: &[PermutedNode<'_>]) -> String {
        let mut out = String::new();
        let mut scope = Vec::new();
        for node in nodes {
            self.render_node(node, &mut scope, &mut out);
        }
        out
    }

    fn render_node<'n>(
        &self,
        node: &'n PermutedNode<'_>,
        scope: &mut Vec<&'n LoopBinding>,
        out: &mut String,
    ) {
        match node {
            PermutedNode::Leaf(TemplateNode::Text(text)) => out.push_str(text.content.trim()),
            PermutedNode::Leaf(TemplateNode::Interpolation(interp)) => {
                out.push_str(&self.resolve(interp.content.trim(), scope));
            }
            PermutedNode::Leaf(_) => {}
            PermutedNode::Element {
                element,
                binding,
                children,
            } => {
                if let Some(binding) = binding {
                    scope.push(binding);
                }
                self.render_element(element, children, scope, out);
                if binding.is_some() {
                    scope.pop();
                }
            }
        }
    }

    fn render_element<'n>(
        &self,
        element: &ElementNode,
        children: &'n [PermutedNode<'_>],
        scope: &mut Vec<&'n LoopBinding>,
        out: &mut String,
    ) {
        out.push('<');
        out.push_str(&element.tag);
        out.push_str(&self.render_attributes(element, scope));
        out.push('>');

        if is_void_element(&element.tag) {
            return;
        }

        for child in children {
            self.render_node(child, scope, out);
        }
        out.push_str("</");
        out.push_str(&element.tag);
        out.push('>');
    }

    fn render_attributes(&self, element: &ElementNode, scope: &[&LoopBinding]) -> String {
        let mut attrs = Vec::new();
        if self.annotate {
            push_span(&mut attrs, "data", element.span);
        }

        for prop in &element.props {
            match prop {
                Prop::Attribute(attr) => self.static_attribute(attr, &mut attrs),
                Prop::Directive(dir) if dir.name == "bind" => {
                    self.bound_attribute(dir, scope, &mut attrs)
                }
                Prop::Directive(_) => {}
            }
        }

        if attrs.is_empty() {
            String::new()
        } else {
            format!(" {}", attrs.join(" "))
        }
    }

    fn static_attribute(&self, attr: &AttributeProp, attrs: &mut Vec<String>) {
        let value = attr.value.as_deref().unwrap_or("");
        attrs.push(format!("{}=\"{}\"", attr.name, escape_attr(value)));
        if self.annotate {
            push_span(attrs, &format!("data-{}", attr.name), attr.span);
        }
    }

    fn bound_attribute(&self, dir: &DirectiveProp, scope: &[&LoopBinding], attrs: &mut Vec<String>) {
        // `v-bind="obj"` and `:[dynamic]` have no attribute name to emit.
        let Some(arg) = dir.arg.as_ref().filter(|arg| arg.is_static) else {
            return;
        };

        let value = match dir.exp.as_deref().map(str::trim) {
            Some(exp) if !exp.is_empty() => self.resolve(exp, scope),
            _ => UNRESOLVED.to_string(),
        };
        attrs.push(format!("{}=\"{}\"", arg.content, escape_attr(&value)));
        if self.annotate {
            push_span(attrs, &format!("data-{}", arg.content), dir.span);
        }
    }

    /// Loop bindings shadow the context; innermost loop wins.
    fn resolve(&self, key: &str, scope: &[&LoopBinding]) -> String {
        if let Some(binding) = scope.iter().rev().find(|b| b.iterator == key) {
            return binding.value.clone();
        }
        match self.context.get(key) {
            Some(value) => value.to_string(),
            None => UNRESOLVED.to_string(),
        }
    }
}

fn push_span(attrs: &mut Vec<String>, prefix: &str, span: SourceSpan) {
    attrs.push(format!("{prefix}-start-line=\"{}\"", span.start.line));
    attrs.push(format!("{prefix}-start-column=\"{}\"", span.start.column));
    attrs.push(format!("{prefix}-end-line=\"{}\"", span.end.line));
    attrs.push(format!("{prefix}-end-column=\"{}\"", span.end.column));
}

fn escape_attr(value: &str) -> String {
    value.replace('"', "&quot;")
}
