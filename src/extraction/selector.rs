//! Selector resolution
//!
//! Turns the user-facing selector string into a [`Query`]:
//!
//! - `canonical` → `abstract(link, rel -eq 'canonical', href)`
//! - `title` → `abstract(title, tagName -eq 'TITLE', innerText)`
//! - `abstract(tag, predicate, property)` → parsed generically
//!
//! Arguments of `abstract(...)` are split on top-level commas only. Commas
//! inside quoted literals or inside balanced parentheses belong to the
//! argument. Quoting follows the predicate literal rules: `'` or `"`, with a
//! doubled quote or a backslash escaping the next character.

use super::predicate::{read_literal, Predicate};
use super::query::{Property, Query};
use crate::error::SelectorError;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Named selector shortcuts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Canonical link target
    Canonical,
    /// Page title
    Title,
}

impl Preset {
    /// The query this preset stands for
    pub fn query(self) -> Query {
        match self {
            Preset::Canonical => Query::canonical(),
            Preset::Title => Query::title(),
        }
    }

    /// Selector keyword
    pub fn name(self) -> &'static str {
        match self {
            Preset::Canonical => "canonical",
            Preset::Title => "title",
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "canonical" => Ok(Preset::Canonical),
            "title" => Ok(Preset::Title),
            _ => Err(SelectorError::Unrecognized(s.to_string())),
        }
    }
}

impl FromStr for Query {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        resolve(s)
    }
}

/// Resolve a selector string into a query.
pub fn resolve(selector: &str) -> Result<Query, SelectorError> {
    let text = selector.trim();
    if let Ok(preset) = text.parse::<Preset>() {
        debug!("Resolved preset selector '{}'", preset);
        return Ok(preset.query());
    }

    let inner =
        abstract_body(text).ok_or_else(|| SelectorError::Unrecognized(text.to_string()))?;
    let args = split_arguments(inner)?;
    if args.len() != 3 {
        return Err(SelectorError::ArgumentCount(args.len()));
    }
    if let Some(pos) = args.iter().position(|a| a.is_empty()) {
        return Err(SelectorError::EmptyArgument(pos + 1));
    }

    let tag = unquote(&args[0])?;
    let predicate = Predicate::parse(&args[1])?;
    let property = Property::parse(&unquote(&args[2])?)?;
    let query = Query::new(&tag, predicate, property)?;

    debug!("Resolved generic selector to {}", query);
    Ok(query)
}

/// Return the text between `abstract(` and the final `)`.
fn abstract_body(text: &str) -> Option<&str> {
    let keyword = "abstract";
    let head = text.get(..keyword.len())?;
    if !head.eq_ignore_ascii_case(keyword) {
        return None;
    }
    let rest = text[keyword.len()..].trim_start();
    rest.strip_prefix('(')?.strip_suffix(')')
}

/// Split an argument list on top-level commas.
///
/// Each argument is returned trimmed, with quoting left intact.
pub fn split_arguments(inner: &str) -> Result<Vec<String>, SelectorError> {
    let mut args = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;
    let mut pos = 0usize;

    while pos < inner.len() {
        let c = inner[pos..].chars().next().unwrap_or_default();
        match c {
            '\'' | '"' => {
                let (_, end) = read_literal(inner, pos)?;
                pos = end;
                continue;
            }
            '(' => depth += 1,
            ')' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or(SelectorError::UnbalancedParens(pos))?;
            }
            ',' if depth == 0 => {
                args.push(inner[start..pos].trim().to_string());
                start = pos + 1;
            }
            _ => {}
        }
        pos += c.len_utf8();
    }

    if depth != 0 {
        return Err(SelectorError::UnbalancedParens(inner.len()));
    }
    args.push(inner[start..].trim().to_string());
    Ok(args)
}

/// Strip one level of quoting from a fully quoted argument.
fn unquote(arg: &str) -> Result<String, SelectorError> {
    if arg.starts_with(['\'', '"']) {
        let (value, end) = read_literal(arg, 0)?;
        if end == arg.len() {
            return Ok(value);
        }
    }
    Ok(arg.to_string())
}
