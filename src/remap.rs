//! # Location Remapping
//!
//! Maps a position reported against annotated HTML back to the SFC. The tag
//! enclosing the reported position carries its own source span in
//! `data-start-line` / `data-start-column`; when the flagged fragment names
//! an attribute, that attribute's `data-<name>-start-*` pair wins.
//!
//! Remapping never fails: anything it cannot resolve returns the reported
//! position unchanged.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
    static ref LINE_BREAK_RE: Regex = Regex::new(r"\r?\n").unwrap();
    static ref START_LINE_RE: Regex = Regex::new(r#"data-start-line="(\d+)""#).unwrap();
    static ref START_COLUMN_RE: Regex = Regex::new(r#"data-start-column="(\d+)""#).unwrap();
    static ref ATTR_NAME_RE: Regex = Regex::new(r"^([a-zA-Z0-9-:]+)(?:=|$)").unwrap();
}

/// 1-based line and column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourcePosition {
    pub line: u32,
    pub col: u32,
}

pub fn map_location(html: &str, line: u32, col: u32, raw: &str) -> SourcePosition {
    let reported = SourcePosition { line, col };
    let chars: Vec<char> = html.chars().collect();
    if chars.is_empty() {
        return reported;
    }

    let index = char_index(html, line, col).min(chars.len() - 1);
    let Some(tag_start) = chars[..=index].iter().rposition(|&c| c == '<') else {
        return reported;
    };
    let Some(tag_len) = chars[tag_start..].iter().position(|&c| c == '>') else {
        return reported;
    };
    let tag: String = chars[tag_start..=tag_start + tag_len].iter().collect();

    let Some(element) = read_pair(&tag, &START_LINE_RE, &START_COLUMN_RE) else {
        return reported;
    };
    attribute_position(&tag, raw).unwrap_or(element)
}

/// Character offset of a 1-based (line, column); lines past the end
/// contribute nothing.
fn char_index(html: &str, line: u32, col: u32) -> usize {
    let preceding: usize = LINE_BREAK_RE
        .split(html)
        .take(line.saturating_sub(1) as usize)
        .map(|l| l.chars().count() + 1)
        .sum();
    (preceding + col as usize).saturating_sub(1)
}

fn attribute_position(tag: &str, raw: &str) -> Option<SourcePosition> {
    let name = ATTR_NAME_RE.captures(raw)?.get(1)?.as_str();
    let name = regex::escape(name);
    let line_re = Regex::new(&format!(r#"data-{name}-start-line="(\d+)""#)).ok()?;
    let col_re = Regex::new(&format!(r#"data-{name}-start-column="(\d+)""#)).ok()?;
    read_pair(tag, &line_re, &col_re)
}

fn read_pair(tag: &str, line_re: &Regex, col_re: &Regex) -> Option<SourcePosition> {
    let line = line_re.captures(tag)?[1].parse().ok()?;
    let col = col_re.captures(tag)?[1].parse().ok()?;
    Some(SourcePosition { line, col })
}
