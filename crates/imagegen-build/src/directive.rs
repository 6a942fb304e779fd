//! The inclusion directive grammar.
//!
//! ```text
//! directive  = "FROM" ws+ identifier ws*
//! identifier = (ALPHA | "-")+
//! ```
//!
//! A directive names a sibling fragment. Anything else, including regular
//! image references such as `FROM debian:bookworm-slim` or
//! `FROM registry.jetbrains.team/p/sa/containers/qodana:2024.1`, is literal
//! Dockerfile text.

use regex::Regex;
use std::sync::LazyLock;

static DIRECTIVE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^FROM\s+([A-Za-z-]+)\s*$").expect("directive regex is valid"));

/// One parsed line of fragment text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line<'a> {
    /// `FROM <identifier>` referring to another fragment
    Include { identifier: &'a str, raw: &'a str },
    Literal(&'a str),
}

impl<'a> Line<'a> {
    pub fn parse(line: &'a str) -> Self {
        match DIRECTIVE.captures(line).and_then(|c| c.get(1)) {
            Some(identifier) => Line::Include {
                identifier: identifier.as_str(),
                raw: line,
            },
            None => Line::Literal(line),
        }
    }
}

/// Splits fragment text into parsed lines.
pub fn parse(text: &str) -> impl Iterator<Item = Line<'_>> {
    text.lines().map(Line::parse)
}
