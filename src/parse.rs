//! Parse Module for the template block.
//!
//! A hand-written scanner over the template byte range of an SFC. It keeps
//! exact source spans for every element and attribute (html5ever-style tree
//! builders drop those), splits Vue directive names into name / argument /
//! modifiers, and condenses whitespace the way the Vue compiler does by
//! default.
//!
//! Markup errors are fatal: the first one aborts the parse with a
//! [`ParseError`] carrying its SFC line and column.

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;
use std::ops::Range;

use crate::error::{
    ParseError, X_DUPLICATE_ATTRIBUTE, X_EOF_IN_COMMENT, X_EOF_IN_TAG, X_INVALID_END_TAG,
    X_MISSING_ATTRIBUTE_VALUE, X_MISSING_END_TAG, X_MISSING_INTERPOLATION_END,
};
use crate::ir::{
    AttributeProp, CommentNode, DirectiveArg, DirectiveProp, ElementNode, InterpolationNode,
    Position, Prop, SourceSpan, TemplateNode, TextNode,
};

lazy_static! {
    static ref WHITESPACE_RUN_RE: Regex = Regex::new(r"[\t\r\n\x0C ]+").unwrap();
}

/// Elements whose content is taken verbatim up to the matching end tag.
const RAW_TEXT_TAGS: &[&str] = &["script", "style", "textarea", "title"];

// ═══════════════════════════════════════════════════════════════════════════════
// LINE INDEX
// ═══════════════════════════════════════════════════════════════════════════════

/// Maps byte offsets to 1-based line/column positions.
pub struct LineIndex<'a> {
    source: &'a str,
    line_starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    pub fn new(source: &'a str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(source.match_indices('\n').map(|(i, _)| i + 1));
        Self {
            source,
            line_starts,
        }
    }

    pub fn position(&self, offset: usize) -> Position {
        let line = self.line_starts.partition_point(|&start| start <= offset);
        let line_start = self.line_starts[line.saturating_sub(1)];
        let column = self
            .source
            .get(line_start..offset)
            .map(|s| s.chars().count())
            .unwrap_or(0)
            + 1;
        Position {
            line: line as u32,
            column: column as u32,
            offset,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// PARSER
// ═══════════════════════════════════════════════════════════════════════════════

/// Parse the template content occupying `range` of the SFC `source`.
pub fn parse_template(source: &str, range: Range<usize>) -> Result<Vec<TemplateNode>, ParseError> {
    Parser::new(source, range).parse()
}

/// Parse a standalone template string; positions are relative to it.
pub fn parse_fragment(template: &str) -> Result<Vec<TemplateNode>, ParseError> {
    parse_template(template, 0..template.len())
}

struct OpenElement {
    tag: String,
    props: Vec<Prop>,
    children: Vec<TemplateNode>,
    start: usize,
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
    end: usize,
    index: LineIndex<'a>,
    stack: Vec<OpenElement>,
    root: Vec<TemplateNode>,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str, range: Range<usize>) -> Self {
        Self {
            src,
            pos: range.start,
            end: range.end.min(src.len()),
            index: LineIndex::new(src),
            stack: Vec::new(),
            root: Vec::new(),
        }
    }

    fn parse(mut self) -> Result<Vec<TemplateNode>, ParseError> {
        while self.pos < self.end {
            if let Some(tag) = self.raw_text_parent() {
                self.parse_raw_text(&tag)?;
                continue;
            }

            let rest = self.rest();
            if rest.starts_with("<!--") {
                self.parse_comment()?;
            } else if rest.starts_with("</") {
                self.parse_end_tag()?;
            } else if rest.starts_with("<!") {
                self.parse_bogus_comment()?;
            } else if starts_tag(rest) {
                self.parse_start_tag()?;
            } else if rest.starts_with("{{") {
                self.parse_interpolation()?;
            } else {
                self.parse_text();
            }
        }

        if let Some(open) = self.stack.last() {
            return Err(self.error(
                open.start,
                X_MISSING_END_TAG,
                format!("Element <{}> is missing end tag.", open.tag),
            ));
        }

        let mut root = std::mem::take(&mut self.root);
        condense_whitespace(&mut root);
        Ok(root)
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..self.end]
    }

    fn span(&self, start: usize, end: usize) -> SourceSpan {
        SourceSpan {
            start: self.index.position(start),
            end: self.index.position(end),
        }
    }

    fn error(&self, offset: usize, code: &'static str, message: impl Into<String>) -> ParseError {
        let pos = self.index.position(offset);
        ParseError::new(code, message, pos.line, pos.column)
    }

    fn raw_text_parent(&self) -> Option<String> {
        self.stack
            .last()
            .filter(|el| RAW_TEXT_TAGS.contains(&el.tag.to_ascii_lowercase().as_str()))
            .map(|el| el.tag.to_ascii_lowercase())
    }

    fn push_node(&mut self, node: TemplateNode) {
        let siblings = match self.stack.last_mut() {
            Some(parent) => &mut parent.children,
            None => &mut self.root,
        };
        if let (Some(TemplateNode::Text(prev)), TemplateNode::Text(next)) = (siblings.last_mut(), &node) {
            prev.content.push_str(&next.content);
            prev.span.end = next.span.end;
            return;
        }
        siblings.push(node);
    }

    fn skip_whitespace(&mut self) {
        let rest = self.rest();
        let trimmed = rest.trim_start();
        self.pos += rest.len() - trimmed.len();
    }

    // ─── text, comments, interpolation ──────────────────────────────────────

    fn parse_text(&mut self) {
        let rest = self.rest();
        let first = rest.chars().next().map(char::len_utf8).unwrap_or(1);
        let bytes = rest.as_bytes();
        let mut len = first;
        while len < bytes.len() {
            let at = &rest[len..];
            if (bytes[len] == b'<' && (at.starts_with("</") || at.starts_with("<!") || starts_tag(at)))
                || at.starts_with("{{")
            {
                break;
            }
            len += 1;
            while len < bytes.len() && !rest.is_char_boundary(len) {
                len += 1;
            }
        }

        let start = self.pos;
        self.pos += len;
        let node = TemplateNode::Text(TextNode {
            content: rest[..len].to_string(),
            span: self.span(start, self.pos),
        });
        self.push_node(node);
    }

    fn parse_comment(&mut self) -> Result<(), ParseError> {
        let start = self.pos;
        let rest = self.rest();
        let close = rest[4..]
            .find("-->")
            .ok_or_else(|| self.error(start, X_EOF_IN_COMMENT, "Unterminated comment."))?;
        self.pos += 4 + close + 3;
        let node = TemplateNode::Comment(CommentNode {
            content: rest[4..4 + close].to_string(),
            span: self.span(start, self.pos),
        });
        self.push_node(node);
        Ok(())
    }

    /// `<!DOCTYPE ...>` and other `<!` markup, kept as a comment.
    fn parse_bogus_comment(&mut self) -> Result<(), ParseError> {
        let start = self.pos;
        let rest = self.rest();
        let close = rest
            .find('>')
            .ok_or_else(|| self.error(start, X_EOF_IN_TAG, "Unexpected EOF in tag."))?;
        self.pos += close + 1;
        let node = TemplateNode::Comment(CommentNode {
            content: rest[2..close].to_string(),
            span: self.span(start, self.pos),
        });
        self.push_node(node);
        Ok(())
    }

    fn parse_interpolation(&mut self) -> Result<(), ParseError> {
        let start = self.pos;
        let rest = self.rest();
        let close = rest[2..].find("}}").ok_or_else(|| {
            self.error(
                start,
                X_MISSING_INTERPOLATION_END,
                "Interpolation end sign was not found.",
            )
        })?;
        self.pos += 2 + close + 2;
        let node = TemplateNode::Interpolation(InterpolationNode {
            content: rest[2..2 + close].to_string(),
            span: self.span(start, self.pos),
        });
        self.push_node(node);
        Ok(())
    }

    fn parse_raw_text(&mut self, tag: &str) -> Result<(), ParseError> {
        let rest = self.rest();
        let needle = format!("</{tag}");
        let Some(close) = rest.to_ascii_lowercase().find(&needle) else {
            let start = self.stack.last().map(|el| el.start).unwrap_or(self.pos);
            return Err(self.error(
                start,
                X_MISSING_END_TAG,
                format!("Element <{tag}> is missing end tag."),
            ));
        };
        if close > 0 {
            let start = self.pos;
            self.pos += close;
            let node = TemplateNode::Text(TextNode {
                content: rest[..close].to_string(),
                span: self.span(start, self.pos),
            });
            self.push_node(node);
        }
        self.parse_end_tag()
    }

    // ─── tags ───────────────────────────────────────────────────────────────

    fn parse_start_tag(&mut self) -> Result<(), ParseError> {
        let start = self.pos;
        let rest = self.rest();
        let name_len = rest[1..]
            .find(|c: char| c.is_whitespace() || c == '/' || c == '>')
            .map(|i| i + 1)
            .unwrap_or(rest.len());
        let tag = rest[1..name_len].to_string();
        self.pos += name_len;

        let mut props = Vec::new();
        let mut seen = HashSet::new();
        let self_closing = loop {
            self.skip_whitespace();
            let rest = self.rest();
            if rest.is_empty() {
                return Err(self.error(start, X_EOF_IN_TAG, "Unexpected EOF in tag."));
            }
            if rest.starts_with("/>") {
                self.pos += 2;
                break true;
            }
            if rest.starts_with('>') {
                self.pos += 1;
                break false;
            }
            if rest.starts_with('/') {
                self.pos += 1;
                continue;
            }

            let (raw_name, prop) = self.parse_attribute(start)?;
            if !seen.insert(raw_name.clone()) {
                return Err(self.error(
                    prop.span().start.offset,
                    X_DUPLICATE_ATTRIBUTE,
                    format!("Duplicate attribute `{raw_name}`."),
                ));
            }
            props.push(prop);
        };

        let open = OpenElement {
            tag,
            props,
            children: Vec::new(),
            start,
        };
        if self_closing || crate::config::is_void_element(&open.tag.to_ascii_lowercase()) {
            self.finish_element(open, self_closing);
        } else {
            self.stack.push(open);
        }
        Ok(())
    }

    /// Parses one attribute; returns its raw name and the built prop.
    fn parse_attribute(&mut self, tag_start: usize) -> Result<(String, Prop), ParseError> {
        let start = self.pos;
        let rest = self.rest();
        let name_len = match rest.find(|c: char| c.is_whitespace() || c == '=' || c == '>' || c == '/') {
            Some(0) | None => rest.chars().next().map(char::len_utf8).unwrap_or(rest.len()),
            Some(len) => len,
        };
        let raw_name = rest[..name_len].to_string();
        self.pos += name_len;
        let name_end = self.pos;

        self.skip_whitespace();
        let (value, end) = if self.rest().starts_with('=') {
            self.pos += 1;
            self.skip_whitespace();
            let rest = self.rest();
            match rest.chars().next() {
                None => return Err(self.error(tag_start, X_EOF_IN_TAG, "Unexpected EOF in tag.")),
                Some(quote @ ('"' | '\'')) => {
                    let close = rest[1..]
                        .find(quote)
                        .ok_or_else(|| self.error(tag_start, X_EOF_IN_TAG, "Unexpected EOF in tag."))?;
                    self.pos += close + 2;
                    (Some(rest[1..1 + close].to_string()), self.pos)
                }
                Some('>') => {
                    return Err(self.error(
                        start,
                        X_MISSING_ATTRIBUTE_VALUE,
                        format!("Attribute `{raw_name}` is missing a value."),
                    ))
                }
                Some(_) => {
                    let len = rest
                        .find(|c: char| c.is_whitespace() || c == '>')
                        .unwrap_or(rest.len());
                    self.pos += len;
                    (Some(rest[..len].to_string()), self.pos)
                }
            }
        } else {
            self.pos = name_end;
            (None, name_end)
        };

        let span = self.span(start, end);
        let prop = match parse_directive_name(&raw_name) {
            Some((name, arg, modifiers)) => Prop::Directive(DirectiveProp {
                name,
                raw_name: raw_name.clone(),
                arg,
                exp: value,
                modifiers,
                span,
            }),
            None => Prop::Attribute(AttributeProp {
                name: raw_name.clone(),
                value,
                span,
            }),
        };
        Ok((raw_name, prop))
    }

    fn parse_end_tag(&mut self) -> Result<(), ParseError> {
        let start = self.pos;
        let rest = self.rest();
        let name_end = rest[2..]
            .find(|c: char| c.is_whitespace() || c == '>')
            .map(|i| i + 2)
            .unwrap_or(rest.len());
        let tag = &rest[2..name_end];
        let close = rest
            .find('>')
            .ok_or_else(|| self.error(start, X_EOF_IN_TAG, "Unexpected EOF in tag."))?;
        self.pos += close + 1;

        let matched = self
            .stack
            .iter()
            .rposition(|el| !tag.is_empty() && el.tag.eq_ignore_ascii_case(tag));
        match matched {
            None => Err(self.error(start, X_INVALID_END_TAG, format!("Invalid end tag `</{tag}>`."))),
            Some(i) if i + 1 != self.stack.len() => {
                let unclosed = &self.stack[self.stack.len() - 1];
                Err(self.error(
                    unclosed.start,
                    X_MISSING_END_TAG,
                    format!("Element <{}> is missing end tag.", unclosed.tag),
                ))
            }
            Some(_) => {
                if let Some(open) = self.stack.pop() {
                    self.finish_element(open, false);
                }
                Ok(())
            }
        }
    }

    fn finish_element(&mut self, open: OpenElement, self_closing: bool) {
        let OpenElement {
            tag,
            props,
            mut children,
            start,
        } = open;
        let in_pre = tag == "pre" || self.stack.iter().any(|el| el.tag == "pre");
        if !in_pre {
            condense_whitespace(&mut children);
        }
        let node = TemplateNode::Element(ElementNode {
            tag,
            props,
            children,
            span: self.span(start, self.pos),
            self_closing,
        });
        self.push_node(node);
    }
}

fn starts_tag(s: &str) -> bool {
    let mut chars = s.chars();
    chars.next() == Some('<') && chars.next().is_some_and(|c| c.is_ascii_alphabetic())
}

// ═══════════════════════════════════════════════════════════════════════════════
// DIRECTIVES
// ═══════════════════════════════════════════════════════════════════════════════

/// Splits `v-name:arg.mod`, `:arg`, `.arg`, `@arg` and `#arg` into
/// (name, argument, modifiers). Returns `None` for plain attributes.
fn parse_directive_name(raw: &str) -> Option<(String, Option<DirectiveArg>, Vec<String>)> {
    let mut modifiers = Vec::new();
    let (name, tail, has_arg) = if let Some(rest) = raw.strip_prefix("v-") {
        let end = rest.find(|c: char| c == ':' || c == '.').unwrap_or(rest.len());
        if end == 0 {
            return None;
        }
        let tail = &rest[end..];
        match tail.strip_prefix(':') {
            Some(arg) => (&rest[..end], arg, true),
            None => (&rest[..end], tail, false),
        }
    } else if let Some(arg) = raw.strip_prefix(':') {
        ("bind", arg, true)
    } else if let Some(arg) = raw.strip_prefix('@') {
        ("on", arg, true)
    } else if let Some(arg) = raw.strip_prefix('#') {
        ("slot", arg, true)
    } else if let Some(arg) = raw.strip_prefix('.') {
        modifiers.push("prop".to_string());
        ("bind", arg, true)
    } else {
        return None;
    };

    let (arg, modifier_str) = if !has_arg {
        (None, tail)
    } else if let Some(dynamic) = tail.strip_prefix('[') {
        match dynamic.find(']') {
            Some(close) => (
                Some(DirectiveArg {
                    content: dynamic[..close].to_string(),
                    is_static: false,
                }),
                &dynamic[close + 1..],
            ),
            None => (
                Some(DirectiveArg {
                    content: dynamic.to_string(),
                    is_static: false,
                }),
                "",
            ),
        }
    } else {
        let end = tail.find('.').unwrap_or(tail.len());
        if end == 0 {
            return None;
        }
        (
            Some(DirectiveArg {
                content: tail[..end].to_string(),
                is_static: true,
            }),
            &tail[end..],
        )
    };

    modifiers.extend(
        modifier_str
            .split('.')
            .filter(|m| !m.is_empty())
            .map(str::to_string),
    );
    Some((name.to_string(), arg, modifiers))
}

// ═══════════════════════════════════════════════════════════════════════════════
// WHITESPACE
// ═══════════════════════════════════════════════════════════════════════════════

fn is_all_whitespace(s: &str) -> bool {
    s.chars().all(|c| matches!(c, ' ' | '\t' | '\r' | '\n' | '\x0C'))
}

/// Vue's default "condense" whitespace strategy for one sibling list.
fn condense_whitespace(nodes: &mut Vec<TemplateNode>) {
    let is_element = |n: &TemplateNode| matches!(n, TemplateNode::Element(_));
    let is_comment = |n: &TemplateNode| matches!(n, TemplateNode::Comment(_));

    let mut remove = vec![false; nodes.len()];
    for (i, node) in nodes.iter().enumerate() {
        let TemplateNode::Text(text) = node else {
            continue;
        };
        if !is_all_whitespace(&text.content) {
            continue;
        }
        let prev = i.checked_sub(1).and_then(|j| nodes.get(j));
        let next = nodes.get(i + 1);
        remove[i] = match (prev, next) {
            (Some(prev), Some(next)) => {
                (is_comment(prev) && (is_comment(next) || is_element(next)))
                    || (is_element(prev)
                        && (is_comment(next) || (is_element(next) && text.content.contains('\n'))))
            }
            _ => true,
        };
    }

    for (node, removed) in nodes.iter_mut().zip(&remove) {
        if let (TemplateNode::Text(text), false) = (node, *removed) {
            text.content = WHITESPACE_RUN_RE.replace_all(&text.content, " ").into_owned();
        }
    }

    let mut flags = remove.into_iter();
    nodes.retain(|_| !flags.next().unwrap_or(false));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element(node: &TemplateNode) -> &ElementNode {
        node.as_element().unwrap()
    }

    fn directive(prop: &Prop) -> &DirectiveProp {
        match prop {
            Prop::Directive(dir) => dir,
            Prop::Attribute(attr) => panic!("expected directive, got attribute {}", attr.name),
        }
    }

    #[test]
    fn test_line_index_positions() {
        let index = LineIndex::new("ab\ncd\n\nx");
        assert_eq!(index.position(0).line, 1);
        assert_eq!(index.position(0).column, 1);
        assert_eq!((index.position(4).line, index.position(4).column), (2, 2));
        assert_eq!((index.position(6).line, index.position(6).column), (3, 1));
        assert_eq!((index.position(7).line, index.position(7).column), (4, 1));
    }

    #[test]
    fn test_element_and_attribute_spans_in_sfc_coordinates() {
        let sfc = "<template>\n  <div :aria-hidden=\"hidden\">test</div>\n</template>";
        let start = "<template>".len();
        let end = sfc.len() - "</template>".len();
        let nodes = parse_template(sfc, start..end).unwrap();

        assert_eq!(nodes.len(), 1);
        let div = element(&nodes[0]);
        assert_eq!(div.tag, "div");
        assert_eq!((div.span.start.line, div.span.start.column), (2, 3));
        assert_eq!((div.span.end.line, div.span.end.column), (2, 40));

        let bind = directive(&div.props[0]);
        assert_eq!(bind.name, "bind");
        assert_eq!(bind.arg.as_ref().unwrap().content, "aria-hidden");
        assert_eq!(bind.exp.as_deref(), Some("hidden"));
        assert_eq!((bind.span.start.line, bind.span.start.column), (2, 8));
        assert_eq!((bind.span.end.line, bind.span.end.column), (2, 29));
    }

    #[test]
    fn test_directive_name_forms() {
        let nodes = parse_fragment(
            r#"<input v-model.trim="a" @click.stop="go" .value="v" v-bind:[key]="k" #default v-else>"#,
        )
        .unwrap();
        let input = element(&nodes[0]);

        let model = directive(&input.props[0]);
        assert_eq!(model.name, "model");
        assert!(model.arg.is_none());
        assert_eq!(model.modifiers, vec!["trim"]);

        let on = directive(&input.props[1]);
        assert_eq!(on.name, "on");
        assert_eq!(on.arg.as_ref().unwrap().content, "click");
        assert_eq!(on.modifiers, vec!["stop"]);

        let prop = directive(&input.props[2]);
        assert_eq!(prop.name, "bind");
        assert_eq!(prop.modifiers, vec!["prop"]);

        let dynamic = directive(&input.props[3]);
        assert!(!dynamic.arg.as_ref().unwrap().is_static);
        assert_eq!(dynamic.arg.as_ref().unwrap().content, "key");

        let slot = directive(&input.props[4]);
        assert_eq!(slot.name, "slot");
        assert!(slot.exp.is_none());

        assert_eq!(directive(&input.props[5]).name, "else");
    }

    #[test]
    fn test_static_attributes() {
        let nodes = parse_fragment(r#"<a href=/x title='t' disabled>x</a>"#).unwrap();
        let a = element(&nodes[0]);
        let values: Vec<_> = a
            .props
            .iter()
            .map(|p| match p {
                Prop::Attribute(attr) => (attr.name.as_str(), attr.value.as_deref()),
                Prop::Directive(_) => panic!("unexpected directive"),
            })
            .collect();
        assert_eq!(
            values,
            vec![("href", Some("/x")), ("title", Some("t")), ("disabled", None)]
        );
    }

    #[test]
    fn test_whitespace_condense() {
        let nodes = parse_fragment("\n  <p>\n    hello\n    world\n  </p>\n  <span>a</span> <b>b</b>\n").unwrap();
        assert_eq!(nodes.len(), 4);

        let p = element(&nodes[0]);
        match &p.children[0] {
            TemplateNode::Text(t) => assert_eq!(t.content, " hello world "),
            other => panic!("unexpected {other:?}"),
        }

        assert_eq!(element(&nodes[1]).tag, "span");
        match &nodes[2] {
            TemplateNode::Text(t) => assert_eq!(t.content, " "),
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(element(&nodes[3]).tag, "b");
    }

    #[test]
    fn test_inline_space_between_elements_is_kept() {
        let nodes = parse_fragment("<div><span>a</span> <b>b</b></div>").unwrap();
        let div = element(&nodes[0]);
        assert_eq!(div.children.len(), 3);
        match &div.children[1] {
            TemplateNode::Text(t) => assert_eq!(t.content, " "),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_pre_keeps_whitespace() {
        let nodes = parse_fragment("<pre>  a\n   b  </pre>").unwrap();
        let pre = element(&nodes[0]);
        match &pre.children[0] {
            TemplateNode::Text(t) => assert_eq!(t.content, "  a\n   b  "),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_interpolation_comment_and_void() {
        let nodes = parse_fragment("<h1>{{ title }}</h1><!-- note --><br><img src=\"a\"/>").unwrap();
        assert_eq!(nodes.len(), 4);
        let h1 = element(&nodes[0]);
        match &h1.children[0] {
            TemplateNode::Interpolation(i) => assert_eq!(i.content, " title "),
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(&nodes[1], TemplateNode::Comment(c) if c.content == " note "));
        assert_eq!(element(&nodes[2]).tag, "br");
        assert!(element(&nodes[3]).self_closing);
    }

    #[test]
    fn test_raw_text_elements() {
        let nodes = parse_fragment("<textarea><b>not a tag</b></textarea>").unwrap();
        let textarea = element(&nodes[0]);
        assert_eq!(textarea.children.len(), 1);
        match &textarea.children[0] {
            TemplateNode::Text(t) => assert_eq!(t.content, "<b>not a tag</b>"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_lone_angle_bracket_is_text() {
        let nodes = parse_fragment("<p>a < b</p>").unwrap();
        let p = element(&nodes[0]);
        match &p.children[0] {
            TemplateNode::Text(t) => assert_eq!(t.content, "a < b"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_fatal_errors() {
        let cases = [
            ("<div>", X_MISSING_END_TAG),
            ("<div><span></div>", X_MISSING_END_TAG),
            ("</div>", X_INVALID_END_TAG),
            ("<!-- open", X_EOF_IN_COMMENT),
            ("{{ open", X_MISSING_INTERPOLATION_END),
            ("<div class=\"a", X_EOF_IN_TAG),
            ("<div a=\"1\" a=\"2\"></div>", X_DUPLICATE_ATTRIBUTE),
            ("<div a=></div>", X_MISSING_ATTRIBUTE_VALUE),
        ];
        for (src, code) in cases {
            let err = parse_fragment(src).unwrap_err();
            assert_eq!(err.code, code, "source: {src}");
        }
    }

    #[test]
    fn test_error_position() {
        let err = parse_fragment("<p>ok</p>\n  <div>").unwrap_err();
        assert_eq!((err.line, err.column), (2, 3));
    }
}
