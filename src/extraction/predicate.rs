//! Element predicates
//!
//! Predicates are a closed set of comparisons over one element property,
//! parsed from selector text such as `name -eq 'description'`. Nothing is
//! evaluated as free-form code.
//!
//! Grammar:
//!
//! ```text
//! predicate := property WS* operator WS* literal
//! operator  := -eq | == | equals
//!            | -contains | contains
//!            | -like                  (wildcards: * and ?)
//!            | -match | =~ | matches  (regular expression)
//! literal   := 'text' | "text" | bare-word
//! ```
//!
//! Inside a quoted literal a doubled quote (`'it''s'`) or a backslash
//! escape (`\'`, `\"`, `\\`) yields the literal character. Any other
//! backslash is kept as written, so `'^/p/\d+$'` reaches the regex intact.
//! Operator words are case-insensitive. All comparisons ignore case, using
//! Unicode lower-casing.

use super::query::Property;
use crate::error::SelectorError;
use regex::{Regex, RegexBuilder};
use scraper::ElementRef;
use std::fmt;

/// A structured predicate over one element property
#[derive(Debug, Clone)]
pub enum Predicate {
    /// Property equals the value
    Equals {
        /// Property to compare
        property: Property,
        /// Expected value
        value: String,
    },
    /// Property contains the value as a substring
    Contains {
        /// Property to compare
        property: Property,
        /// Substring to look for
        value: String,
    },
    /// Property matches the regular expression
    Matches {
        /// Property to compare
        property: Property,
        /// Compiled, case-insensitive pattern
        pattern: Regex,
    },
}

impl PartialEq for Predicate {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                Predicate::Equals { property: a, value: x },
                Predicate::Equals { property: b, value: y },
            )
            | (
                Predicate::Contains { property: a, value: x },
                Predicate::Contains { property: b, value: y },
            ) => a == b && x == y,
            (
                Predicate::Matches { property: a, pattern: x },
                Predicate::Matches { property: b, pattern: y },
            ) => a == b && x.as_str() == y.as_str(),
            _ => false,
        }
    }
}

impl Predicate {
    /// Parse predicate text.
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        let invalid = |reason: &str| SelectorError::Predicate {
            input: input.to_string(),
            reason: reason.to_string(),
        };

        let text = input.trim();
        if text.is_empty() {
            return Err(invalid("predicate is empty"));
        }

        let prop_end = text
            .find(|c: char| c.is_whitespace() || c == '=')
            .ok_or_else(|| invalid("expected an operator after the property"))?;
        let property = Property::parse(&text[..prop_end])?;

        let rest = text[prop_end..].trim_start();
        let (operator, rest) = split_operator(rest).ok_or_else(|| {
            invalid("expected an operator (-eq, -contains, -like or -match)")
        })?;

        let rest = rest.trim_start();
        let value = if rest.starts_with(['\'', '"']) {
            let (value, end) = read_literal(rest, 0)?;
            if !rest[end..].trim().is_empty() {
                return Err(invalid("unexpected text after the quoted value"));
            }
            value
        } else {
            let bare = rest.trim();
            if bare.is_empty() {
                return Err(invalid("expected a value after the operator"));
            }
            if bare.contains(char::is_whitespace) {
                return Err(invalid("values containing whitespace must be quoted"));
            }
            bare.to_string()
        };

        match operator {
            Operator::Equals => Ok(Predicate::Equals { property, value }),
            Operator::Contains => Ok(Predicate::Contains { property, value }),
            Operator::Like => {
                let pattern = compile(&wildcard_to_regex(&value))
                    .map_err(|e| invalid(&e.to_string()))?;
                Ok(Predicate::Matches { property, pattern })
            }
            Operator::Matches => {
                let pattern = compile(&value).map_err(|e| invalid(&e.to_string()))?;
                Ok(Predicate::Matches { property, pattern })
            }
        }
    }

    /// The property this predicate inspects
    pub fn property(&self) -> &Property {
        match self {
            Predicate::Equals { property, .. }
            | Predicate::Contains { property, .. }
            | Predicate::Matches { property, .. } => property,
        }
    }

    /// Evaluate against a single element.
    ///
    /// An attribute the element does not carry never satisfies a predicate.
    pub fn evaluate(&self, element: &ElementRef<'_>) -> bool {
        let Some(actual) = self.property().read(element) else {
            return false;
        };
        self.test(&actual)
    }

    /// Evaluate against an already-read property value
    pub fn test(&self, actual: &str) -> bool {
        match self {
            Predicate::Equals { value, .. } => actual.to_lowercase() == value.to_lowercase(),
            Predicate::Contains { value, .. } => {
                actual.to_lowercase().contains(&value.to_lowercase())
            }
            Predicate::Matches { pattern, .. } => pattern.is_match(actual),
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (property, op, value) = match self {
            Predicate::Equals { property, value } => (property, "-eq", value.as_str()),
            Predicate::Contains { property, value } => (property, "-contains", value.as_str()),
            Predicate::Matches { property, pattern } => (property, "-match", pattern.as_str()),
        };
        let escaped = value.replace('\\', "\\\\").replace('\'', "''");
        write!(f, "{property} {op} '{escaped}'")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operator {
    Equals,
    Contains,
    Like,
    Matches,
}

fn split_operator(text: &str) -> Option<(Operator, &str)> {
    for symbol in ["==", "=~"] {
        if let Some(rest) = text.strip_prefix(symbol) {
            let op = if symbol == "==" {
                Operator::Equals
            } else {
                Operator::Matches
            };
            return Some((op, rest));
        }
    }

    let end = text.find(char::is_whitespace).unwrap_or(text.len());
    let word = text[..end].to_ascii_lowercase();
    let op = match word.as_str() {
        "-eq" | "-ieq" | "equals" => Operator::Equals,
        "-contains" | "contains" => Operator::Contains,
        "-like" | "-ilike" => Operator::Like,
        "-match" | "-imatch" | "matches" => Operator::Matches,
        _ => return None,
    };
    Some((op, &text[end..]))
}

fn compile(pattern: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(pattern).case_insensitive(true).build()
}

fn wildcard_to_regex(glob: &str) -> String {
    let mut out = String::with_capacity(glob.len() + 4);
    out.push('^');
    for c in glob.chars() {
        match c {
            '*' => out.push_str(".*"),
            '?' => out.push('.'),
            other => out.push_str(&regex::escape(&other.to_string())),
        }
    }
    out.push('$');
    out
}

/// Read a quoted literal starting at byte offset `start` (the opening quote).
///
/// Returns the unescaped text and the offset just past the closing quote.
pub(crate) fn read_literal(text: &str, start: usize) -> Result<(String, usize), SelectorError> {
    let mut chars = text[start..].char_indices().peekable();
    let Some((_, quote)) = chars.next() else {
        return Err(SelectorError::UnterminatedLiteral(start));
    };

    let mut value = String::new();
    while let Some((offset, c)) = chars.next() {
        if c == '\\' {
            match chars.peek() {
                Some(&(_, next)) if matches!(next, '\'' | '"' | '\\') => {
                    chars.next();
                    value.push(next);
                }
                _ => value.push(c),
            }
        } else if c == quote {
            if matches!(chars.peek(), Some((_, next)) if *next == quote) {
                chars.next();
                value.push(quote);
            } else {
                return Ok((value, start + offset + c.len_utf8()));
            }
        } else {
            value.push(c);
        }
    }
    Err(SelectorError::UnterminatedLiteral(start))
}
