//! Comment and declaration mini-grammar.
//!
//! Every pattern is compiled once and only driven through fresh
//! `captures_iter` cursors, so each call scans its own text from the start.

use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Prefix that opens a tag inside a comment.
pub const MARKER: char = '@';

// -- Regex patterns -----------------------------------------------------------

// Leading free text: after an optional `/**`, up to the first tag or `*/`
static RE_DESCRIPTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\A\s*(?:/\*+)?([^@]*?)(?:\*/|@|\z)").unwrap());

// `@name` followed by everything up to the next marker
static RE_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(@[A-Za-z][\w-]*)([^@]*)").unwrap());

// Optional `{type}` (or start of text), optional name, trailing free text
static RE_TAG_DESCRIPTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\{[^{}]*\}|\A)\s*(?:([^\s{}]+)\s+)?([^{}]+)").unwrap()
});

static RE_TYPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([^{}]*)\}\s*([^\s{}]*)").unwrap());

// A name only counts when more text follows it
static RE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{[^{}]*\}\s*([^\s{}]+)\s+").unwrap());

static RE_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

// `[type ]name[?][: annotation][= default]`; `=>` belongs to the annotation
static RE_PROTO_PARAM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?s)\A\s*(?:([^:=]+?)\s+)?[*&]*(?:\.\.\.)?([A-Za-z_$][\w$]*)\??",
        r"\s*(?::\s*(.+?))?\s*(?:=[^>].*)?\z"
    ))
    .unwrap()
});

static RE_DATA_ENTRY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"["']?([A-Za-z_$][\w$]*)["']?\??\s*:\s*([^,;{}\s][^,;{}\n]*)"#).unwrap()
});

// -- Helpers ------------------------------------------------------------------

fn group<'h>(caps: &Captures<'h>, i: usize) -> &'h str {
    caps.get(i).map_or("", |m| m.as_str())
}

/// Strip comment delimiters and bullets, collapse whitespace, trim.
pub fn clean(text: &str) -> String {
    let stripped = text.replace("/**", "").replace("*/", "").replace('*', "");
    RE_WHITESPACE.replace_all(&stripped, " ").trim().to_string()
}

fn non_blank(text: &str) -> Option<String> {
    let text = clean(text);
    (!text.is_empty()).then_some(text)
}

// -- Comment grammar ----------------------------------------------------------

/// The comment's leading description, if it has any text before its first tag.
pub fn description(comment: &str) -> Option<String> {
    RE_DESCRIPTION
        .captures(comment)
        .and_then(|caps| non_blank(group(&caps, 1)))
}

/// Raw `(marked label, content)` pairs in order of appearance.
pub fn tags(comment: &str) -> impl Iterator<Item = (&str, &str)> {
    RE_TAG
        .captures_iter(comment)
        .map(|caps| (group(&caps, 1), group(&caps, 2)))
}

/// Free-text descriptions found in a cleaned tag body.
pub fn tag_descriptions(content: &str) -> impl Iterator<Item = String> + '_ {
    RE_TAG_DESCRIPTION
        .captures_iter(content)
        .filter_map(|caps| non_blank(group(&caps, 2)))
}

/// `(type, name)` pairs; the type is `any` when the braces are empty and
/// the name is empty when none follows.
pub fn types(content: &str) -> impl Iterator<Item = (String, &str)> {
    RE_TYPE.captures_iter(content).map(|caps| {
        let ty = group(&caps, 1).trim();
        let ty = if ty.is_empty() { "any" } else { ty };
        (ty.to_string(), group(&caps, 2))
    })
}

/// Names declared after a type, first word only.
pub fn names(content: &str) -> impl Iterator<Item = &str> {
    RE_NAME.captures_iter(content).filter_map(|caps| {
        let name = caps.get(1)?.as_str();
        name.split_whitespace().next()
    })
}

// -- Declaration grammar ------------------------------------------------------

/// `(name, value)` entries of a data-type declaration.
pub fn data_entries(decl: &str) -> impl Iterator<Item = (&str, &str)> {
    RE_DATA_ENTRY
        .captures_iter(decl)
        .map(|caps| (group(&caps, 1), group(&caps, 2).trim()))
}

/// `(name, type)` entries of a prototype's first parameter list.
///
/// The type is the leading C-style type or the trailing annotation, and is
/// empty for untyped parameters.
pub fn proto_params(decl: &str) -> impl Iterator<Item = (&str, &str)> {
    split_top_level(param_list(decl))
        .into_iter()
        .filter_map(|segment| RE_PROTO_PARAM.captures(segment))
        .map(|caps| {
            let ty = caps.get(1).or_else(|| caps.get(3)).map_or("", |m| m.as_str());
            (group(&caps, 2), ty.trim())
        })
}

/// Text between the first `(` and its matching `)`. Empty when unbalanced.
fn param_list(decl: &str) -> &str {
    let Some(open) = decl.find('(') else {
        return "";
    };
    let mut depth = 0usize;
    for (i, c) in decl[open..].char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return &decl[open + 1..open + i];
                }
            }
            _ => {}
        }
    }
    ""
}

/// Split on commas that are not nested in `()`, `[]` or `{}`.
fn split_top_level(list: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in list.char_indices() {
        match c {
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                segments.push(&list[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    segments.push(&list[start..]);
    segments.retain(|s| !s.trim().is_empty());
    segments
}
