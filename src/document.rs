//! # SFC Document Splitting
//!
//! Splits a `.vue` single-file component into its top-level blocks. Only the
//! top level is scanned: a `<script>` nested inside the template belongs to
//! the template, and nested `<template>` tags are balanced so the outer
//! block's content ends at its own closing tag.
//!
//! Block contents are borrowed slices of the source together with their byte
//! offset, so the template parser can report positions in SFC coordinates.

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;

use crate::error::{ParseError, X_EOF_IN_COMMENT, X_MISSING_END_TAG};
use crate::parse::LineIndex;

lazy_static! {
    static ref BLOCK_OPEN_RE: Regex =
        Regex::new(r"(?i)^<([a-z][a-z0-9-]*)\b([^>]*)>").unwrap();
    static ref ATTR_REGEX: Regex =
        Regex::new(r#"(?i)([a-z0-9-]+)(?:=(?:"([^"]*)"|'([^']*)'|([^>\s]+)))?"#).unwrap();
    static ref TEMPLATE_TAG_RE: Regex =
        Regex::new(r"<!--[\s\S]*?(?:-->|\z)|<template\b[^>]*>|</template\s*>").unwrap();
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SfcBlock<'a> {
    pub tag: String,
    pub content: &'a str,
    /// Byte offset of `content` in the SFC source.
    pub offset: usize,
    pub attributes: HashMap<String, String>,
}

impl SfcBlock<'_> {
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn lang(&self) -> Option<&str> {
        self.attr("lang")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SfcDescriptor<'a> {
    pub template: Option<SfcBlock<'a>>,
    pub script: Option<SfcBlock<'a>>,
    pub script_setup: Option<SfcBlock<'a>>,
    pub styles: Vec<SfcBlock<'a>>,
}

impl<'a> SfcDescriptor<'a> {
    /// Template content, or the empty string when the component has no template.
    pub fn template_content(&self) -> &'a str {
        self.template.as_ref().map(|t| t.content).unwrap_or("")
    }
}

/// Split an SFC into its top-level blocks.
pub fn parse_sfc(source: &str) -> Result<SfcDescriptor<'_>, ParseError> {
    let mut descriptor = SfcDescriptor::default();
    let mut pos = 0;

    while let Some(rel) = source[pos..].find('<') {
        let lt = pos + rel;
        let rest = &source[lt..];

        if rest.starts_with("<!--") {
            match rest.find("-->") {
                Some(end) => {
                    pos = lt + end + 3;
                    continue;
                }
                None => return Err(error_at(source, lt, X_EOF_IN_COMMENT, "Unterminated comment.")),
            }
        }

        let Some(caps) = BLOCK_OPEN_RE.captures(rest) else {
            pos = lt + 1;
            continue;
        };
        let open_len = caps[0].len();
        let tag = caps[1].to_ascii_lowercase();
        let attr_string = caps.get(2).map(|m| m.as_str()).unwrap_or("");
        let attributes = parse_block_attributes(attr_string);
        let content_start = lt + open_len;

        if attr_string.trim_end().ends_with('/') {
            pos = content_start;
            continue;
        }

        let (content_end, block_end) = if tag == "template" {
            find_template_end(source, content_start)
        } else {
            find_raw_end(source, content_start, &tag)
        }
        .ok_or_else(|| {
            error_at(
                source,
                lt,
                X_MISSING_END_TAG,
                format!("Element <{tag}> is missing end tag."),
            )
        })?;

        let block = SfcBlock {
            tag: tag.clone(),
            content: &source[content_start..content_end],
            offset: content_start,
            attributes,
        };

        match tag.as_str() {
            "template" if descriptor.template.is_none() => descriptor.template = Some(block),
            "script" if block.attributes.contains_key("setup") => {
                if descriptor.script_setup.is_none() {
                    descriptor.script_setup = Some(block);
                }
            }
            "script" if descriptor.script.is_none() => descriptor.script = Some(block),
            "style" => descriptor.styles.push(block),
            _ => {}
        }

        pos = block_end;
    }

    Ok(descriptor)
}

fn parse_block_attributes(attr_string: &str) -> HashMap<String, String> {
    let mut attributes = HashMap::new();
    for attr_caps in ATTR_REGEX.captures_iter(attr_string) {
        if let Some(name) = attr_caps.get(1) {
            let value = attr_caps
                .get(2)
                .or_else(|| attr_caps.get(3))
                .or_else(|| attr_caps.get(4))
                .map(|m| m.as_str().to_string())
                .unwrap_or_else(|| "true".to_string());
            attributes.insert(name.as_str().to_ascii_lowercase(), value);
        }
    }
    attributes
}

/// Returns (content end, block end) for a `<template>` whose content starts at `from`.
fn find_template_end(source: &str, from: usize) -> Option<(usize, usize)> {
    let mut depth = 1usize;
    for m in TEMPLATE_TAG_RE.find_iter(&source[from..]) {
        let text = m.as_str();
        if text.starts_with("<!--") {
            continue;
        }
        if text.starts_with("</") {
            depth -= 1;
            if depth == 0 {
                return Some((from + m.start(), from + m.end()));
            }
        } else if !text.ends_with("/>") {
            depth += 1;
        }
    }
    None
}

fn find_raw_end(source: &str, from: usize, tag: &str) -> Option<(usize, usize)> {
    let close = Regex::new(&format!(r"(?i)</{}\s*>", regex::escape(tag))).ok()?;
    close
        .find(&source[from..])
        .map(|m| (from + m.start(), from + m.end()))
}

fn error_at(source: &str, offset: usize, code: &'static str, message: impl Into<String>) -> ParseError {
    let pos = LineIndex::new(source).position(offset);
    ParseError::new(code, message, pos.line, pos.column)
}
