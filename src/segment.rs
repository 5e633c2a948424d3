//! # Segment Grouping
//!
//! Partitions one sibling list into the units the permutation engine
//! expands: static nodes, `v-if` chains, `v-show` toggles and `v-for` loops.
//! Grouping is local to a single sibling level; an element's children are
//! grouped again when the engine descends into it.

use lazy_static::lazy_static;
use regex::Regex;

use crate::catalog::Literal;
use crate::ir::{ElementNode, TemplateNode};

lazy_static! {
    static ref V_FOR_RE: Regex = Regex::new(r"(\w+)\s+in\s+(\w+|\[.*\])").unwrap();
}

#[derive(Debug, Clone, PartialEq)]
pub enum Segment<'t> {
    Static(&'t TemplateNode),
    IfBlock(Vec<Branch<'t>>),
    ShowBlock(&'t ElementNode),
    ForBlock(ForBlock<'t>),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Branch<'t> {
    Element(&'t ElementNode),
    /// Synthetic fallback of a chain without `v-else`: renders nothing.
    ImplicitElse,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForBlock<'t> {
    pub element: &'t ElementNode,
    pub iterator: String,
    /// Identifier or bracketed literal, exactly as written.
    pub source: String,
    pub inline_array: Option<Vec<Literal>>,
}

pub fn group_segments(nodes: &[TemplateNode]) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut i = 0;

    while i < nodes.len() {
        let node = &nodes[i];
        let Some(el) = node.as_element() else {
            segments.push(Segment::Static(node));
            i += 1;
            continue;
        };

        if el.has_directive("if") {
            let (branches, next) = collect_if_branches(nodes, i);
            segments.push(Segment::IfBlock(branches));
            i = next;
            continue;
        }

        let segment = if el.has_directive("show") {
            Segment::ShowBlock(el)
        } else if let Some(for_block) = for_block(el) {
            Segment::ForBlock(for_block)
        } else {
            Segment::Static(node)
        };
        segments.push(segment);
        i += 1;
    }

    segments
}

fn collect_if_branches(nodes: &[TemplateNode], start: usize) -> (Vec<Branch<'_>>, usize) {
    let mut branches = Vec::new();
    if let Some(el) = nodes[start].as_element() {
        branches.push(Branch::Element(el));
    }

    let mut next = start + 1;
    let mut ends_with_else = false;
    while let Some(el) = nodes.get(next).and_then(TemplateNode::as_element) {
        if !el.has_directive("else-if") && !el.has_directive("else") {
            break;
        }
        ends_with_else = el.has_directive("else");
        branches.push(Branch::Element(el));
        next += 1;
    }

    if !ends_with_else {
        branches.push(Branch::ImplicitElse);
    }
    (branches, next)
}

fn for_block(el: &ElementNode) -> Option<ForBlock<'_>> {
    let exp = el.directive("for")?.exp.as_deref().unwrap_or("");
    let caps = V_FOR_RE.captures(exp)?;
    let source = caps[2].to_string();
    let inline_array = source
        .starts_with('[')
        .then(|| parse_inline_array(&source));
    Some(ForBlock {
        element: el,
        iterator: caps[1].to_string(),
        source,
        inline_array,
    })
}

/// `[1, 'a', "b", c]` to literals: numbers stay numbers, quotes are
/// stripped, anything else is kept as written.
pub fn parse_inline_array(expr: &str) -> Vec<Literal> {
    let inner = expr
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .unwrap_or(expr)
        .trim();
    if inner.is_empty() {
        return Vec::new();
    }
    inner
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(parse_array_part)
        .collect()
}

fn parse_array_part(part: &str) -> Literal {
    let numeric = part
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'));
    if numeric {
        if let Ok(n) = part.parse::<f64>() {
            return Literal::Num(n);
        }
    }

    let quoted = part.len() >= 2
        && ((part.starts_with('\'') && part.ends_with('\''))
            || (part.starts_with('"') && part.ends_with('"')));
    if quoted {
        Literal::Str(part[1..part.len() - 1].to_string())
    } else {
        Literal::Str(part.to_string())
    }
}
