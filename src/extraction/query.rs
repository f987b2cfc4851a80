//! Resolved extraction queries
//!
//! A [`Query`] is the (tag, predicate, property) triple that drives the
//! [`AttributeExtractor`](super::AttributeExtractor). Queries are built once
//! per batch, from a preset or from an `abstract(...)` selector, and are
//! immutable afterwards.

use super::predicate::Predicate;
use crate::error::SelectorError;
use scraper::ElementRef;
use std::fmt;

/// A readable property of an element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Property {
    /// Upper-case tag name (`TITLE`, `LINK`, ...)
    TagName,
    /// Concatenated text of all descendants
    InnerText,
    /// Serialized children
    InnerHtml,
    /// Serialized element including its own tag
    OuterHtml,
    /// A named attribute, stored lower-case
    Attribute(String),
}

impl Property {
    /// Parse a property name.
    ///
    /// Names are case-insensitive and may carry a `$_.` prefix, so
    /// `$_.innerText`, `innertext` and `InnerText` are the same property.
    pub fn parse(name: &str) -> Result<Self, SelectorError> {
        let trimmed = name.trim();
        let bare = trimmed.strip_prefix("$_.").unwrap_or(trimmed);
        if bare.is_empty()
            || !bare
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':' | '.'))
        {
            return Err(SelectorError::InvalidProperty(trimmed.to_string()));
        }

        let lower = bare.to_ascii_lowercase();
        Ok(match lower.as_str() {
            "tagname" => Property::TagName,
            "innertext" | "textcontent" | "text" => Property::InnerText,
            "innerhtml" => Property::InnerHtml,
            "outerhtml" => Property::OuterHtml,
            _ => Property::Attribute(lower),
        })
    }

    /// Read this property from an element.
    ///
    /// Returns `None` only for an attribute the element does not carry;
    /// computed properties always have a value.
    pub fn read(&self, element: &ElementRef<'_>) -> Option<String> {
        match self {
            Property::TagName => Some(element.value().name().to_ascii_uppercase()),
            Property::InnerText => Some(element.text().collect()),
            Property::InnerHtml => Some(element.inner_html()),
            Property::OuterHtml => Some(element.html()),
            Property::Attribute(name) => element
                .value()
                .attrs()
                .find(|(key, _)| key.eq_ignore_ascii_case(name))
                .map(|(_, value)| value.to_string()),
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Property::TagName => f.write_str("tagName"),
            Property::InnerText => f.write_str("innerText"),
            Property::InnerHtml => f.write_str("innerHTML"),
            Property::OuterHtml => f.write_str("outerHTML"),
            Property::Attribute(name) => f.write_str(name),
        }
    }
}

/// Resolved (tag, predicate, property) triple
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    tag_name: String,
    predicate: Predicate,
    property: Property,
}

impl Query {
    /// Build a query, validating the tag name.
    pub fn new(
        tag_name: &str,
        predicate: Predicate,
        property: Property,
    ) -> Result<Self, SelectorError> {
        let tag = tag_name.trim();
        if tag.is_empty() {
            return Err(SelectorError::EmptyArgument(1));
        }
        if !tag
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':'))
        {
            return Err(SelectorError::InvalidTag(tag.to_string()));
        }
        Ok(Self {
            tag_name: tag.to_ascii_lowercase(),
            predicate,
            property,
        })
    }

    /// `<link rel="canonical">` → `href`
    pub fn canonical() -> Self {
        Self {
            tag_name: "link".to_string(),
            predicate: Predicate::Equals {
                property: Property::Attribute("rel".to_string()),
                value: "canonical".to_string(),
            },
            property: Property::Attribute("href".to_string()),
        }
    }

    /// `<title>` → inner text
    pub fn title() -> Self {
        Self {
            tag_name: "title".to_string(),
            predicate: Predicate::Equals {
                property: Property::TagName,
                value: "TITLE".to_string(),
            },
            property: Property::InnerText,
        }
    }

    /// Lower-case tag name to match
    pub fn tag_name(&self) -> &str {
        &self.tag_name
    }

    /// Filter applied to each element with the tag
    pub fn predicate(&self) -> &Predicate {
        &self.predicate
    }

    /// Property read from the first surviving element
    pub fn property(&self) -> &Property {
        &self.property
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "abstract({}, {}, {})",
            self.tag_name, self.predicate, self.property
        )
    }
}
