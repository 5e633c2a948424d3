//! # HTML Formatting
//!
//! A small pretty-printer for rendered scenarios. Rendered HTML is a single
//! line; formatting breaks it into one top-level node per line and indents
//! the children of elements that do not fit `print_width`.
//!
//! Rules:
//!
//! - an element stays on one line if it fits, or if it has no element children
//! - open tags are never broken
//! - whitespace-only text between tags is dropped, other text is trimmed and
//!   its whitespace runs collapsed
//! - `<pre>` and `<textarea>` keep their text verbatim and are never broken
//! - output lines are joined with `\n`, without a trailing newline
//!
//! Formatting its own output yields the same output. Input that does not
//! form a balanced tree is reported as a [`FormatError`], and [`format_html`]
//! falls back to the raw string.

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

use crate::config::{is_void_element, FormatOptions};

lazy_static! {
    static ref COMMENT_RE: Regex = Regex::new(r"^<!--[\s\S]*?-->").unwrap();
    static ref OPEN_TAG_RE: Regex =
        Regex::new(r#"^<([a-zA-Z][a-zA-Z0-9:-]*)(?:[^>"']|"[^"]*"|'[^']*')*>"#).unwrap();
    static ref CLOSE_TAG_RE: Regex = Regex::new(r"^</([a-zA-Z][a-zA-Z0-9:-]*)\s*>").unwrap();
    static ref WHITESPACE_RUN_RE: Regex = Regex::new(r"\s+").unwrap();
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("unexpected closing tag </{tag}> at offset {offset}")]
    UnexpectedEndTag { tag: String, offset: usize },
    #[error("element <{tag}> is never closed")]
    Unclosed { tag: String },
    #[error("`<` at offset {offset} does not start a tag")]
    StrayAngle { offset: usize },
}

/// Formats `html`, or returns it unchanged when formatting is disabled, the
/// input is blank, or the input cannot be formatted.
pub fn format_html(html: &str, options: &FormatOptions) -> String {
    if !options.enabled || html.trim().is_empty() {
        return html.to_string();
    }
    match pretty_print(html, options) {
        Ok(formatted) => formatted,
        Err(err) => {
            tracing::debug!(error = %err, "leaving rendered html unformatted");
            html.to_string()
        }
    }
}

pub fn pretty_print(html: &str, options: &FormatOptions) -> Result<String, FormatError> {
    let nodes = build_tree(html)?;
    let mut printer = Printer {
        options,
        lines: Vec::new(),
    };
    for node in &nodes {
        printer.print(node, 0);
    }
    Ok(printer.lines.join("\n"))
}

// ═══════════════════════════════════════════════════════════════════════════════
// TREE
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug)]
enum Node {
    Element(Element),
    Text(String),
    Comment(String),
}

#[derive(Debug)]
struct Element {
    tag: String,
    /// Open tag exactly as written.
    open: String,
    /// Void or self-closed: printed without a close tag.
    leaf: bool,
    /// Inside `<pre>`/`<textarea>`, itself included.
    preformatted: bool,
    children: Vec<Node>,
}

impl Element {
    fn has_element_children(&self) -> bool {
        self.children.iter().any(|c| matches!(c, Node::Element(_)))
    }
}

fn build_tree(html: &str) -> Result<Vec<Node>, FormatError> {
    let mut roots = Vec::new();
    let mut stack: Vec<Element> = Vec::new();
    let mut pos = 0;

    while pos < html.len() {
        let rest = &html[pos..];

        if !rest.starts_with('<') {
            let end = rest.find('<').unwrap_or(rest.len());
            let text = if stack.last().is_some_and(|el| el.preformatted) {
                rest[..end].into()
            } else {
                WHITESPACE_RUN_RE.replace_all(rest[..end].trim(), " ")
            };
            if !text.is_empty() {
                attach(&mut stack, &mut roots, Node::Text(text.into_owned()));
            }
            pos += end;
            continue;
        }

        if let Some(m) = COMMENT_RE.find(rest) {
            attach(&mut stack, &mut roots, Node::Comment(m.as_str().to_string()));
            pos += m.end();
            continue;
        }

        if let Some(caps) = CLOSE_TAG_RE.captures(rest) {
            let tag = &caps[1];
            match stack.pop() {
                Some(el) if el.tag.eq_ignore_ascii_case(tag) => {
                    attach(&mut stack, &mut roots, Node::Element(el));
                }
                _ => {
                    return Err(FormatError::UnexpectedEndTag {
                        tag: tag.to_string(),
                        offset: pos,
                    })
                }
            }
            pos += caps[0].len();
            continue;
        }

        let Some(caps) = OPEN_TAG_RE.captures(rest) else {
            return Err(FormatError::StrayAngle { offset: pos });
        };
        let open = caps[0].to_string();
        let tag = caps[1].to_string();
        let lower = tag.to_ascii_lowercase();
        let leaf = open.ends_with("/>") || is_void_element(&lower);
        let preformatted = matches!(lower.as_str(), "pre" | "textarea")
            || stack.last().is_some_and(|el| el.preformatted);
        pos += open.len();

        let el = Element {
            tag,
            open,
            leaf,
            preformatted,
            children: Vec::new(),
        };
        if leaf {
            attach(&mut stack, &mut roots, Node::Element(el));
        } else {
            stack.push(el);
        }
    }

    match stack.pop() {
        Some(el) => Err(FormatError::Unclosed { tag: el.tag }),
        None => Ok(roots),
    }
}

fn attach(stack: &mut [Element], roots: &mut Vec<Node>, node: Node) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None => roots.push(node),
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// PRINTER
// ═══════════════════════════════════════════════════════════════════════════════

struct Printer<'o> {
    options: &'o FormatOptions,
    lines: Vec<String>,
}

impl Printer<'_> {
    fn print(&mut self, node: &Node, depth: usize) {
        let indent = " ".repeat(depth * self.options.indent_width);
        let inline = inline(node);

        if let Node::Element(el) = node {
            let fits = indent.len() + inline.chars().count() <= self.options.print_width;
            if !fits && !el.preformatted && el.has_element_children() {
                self.lines.push(format!("{indent}{}", el.open));
                for child in &el.children {
                    self.print(child, depth + 1);
                }
                self.lines.push(format!("{indent}</{}>", el.tag));
                return;
            }
        }
        self.lines.push(format!("{indent}{inline}"));
    }
}

fn inline(node: &Node) -> String {
    match node {
        Node::Text(text) | Node::Comment(text) => text.clone(),
        Node::Element(el) if el.leaf => el.open.clone(),
        Node::Element(el) => {
            let children: String = el.children.iter().map(inline).collect();
            format!("{}{children}</{}>", el.open, el.tag)
        }
    }
}
