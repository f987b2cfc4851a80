//! Generic attribute extraction
//!
//! Given a parsed [`Document`] and a resolved [`Query`], find the first
//! element with the query's tag that satisfies its predicate and read the
//! query's property from it.

use super::document::Document;
use super::query::Query;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, instrument};

/// Sentinel surfaced for items without a value
pub const NOT_AVAILABLE: &str = "n/a";

/// Outcome of one extraction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ExtractionResult {
    /// Trimmed property value of the first matching element; empty when the
    /// element matched but lacks the property
    Value(String),
    /// No element matched
    NotAvailable,
}

impl ExtractionResult {
    /// The extracted value, if any
    pub fn value(&self) -> Option<&str> {
        match self {
            ExtractionResult::Value(v) => Some(v),
            ExtractionResult::NotAvailable => None,
        }
    }

    /// Whether an element matched
    pub fn is_available(&self) -> bool {
        matches!(self, ExtractionResult::Value(_))
    }

    /// Text used when rendering output: the value, or `n/a`
    pub fn as_display(&self) -> &str {
        self.value().unwrap_or(NOT_AVAILABLE)
    }
}

impl fmt::Display for ExtractionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_display())
    }
}

/// Attribute extraction functionality
pub struct AttributeExtractor;

impl AttributeExtractor {
    /// Run a query against a document
    #[instrument(skip_all, fields(query = %query))]
    pub fn extract(document: &Document, query: &Query) -> ExtractionResult {
        let first = document
            .elements_by_tag(query.tag_name())
            .find(|el| query.predicate().evaluate(el));

        let Some(element) = first else {
            debug!("No <{}> element satisfied the predicate", query.tag_name());
            return ExtractionResult::NotAvailable;
        };

        let value = query
            .property()
            .read(&element)
            .map(|v| v.trim().to_string())
            .unwrap_or_default();
        debug!("Matched <{}>, {} = {:?}", query.tag_name(), query.property(), value);
        ExtractionResult::Value(value)
    }

    /// Parse markup and run a query against it
    pub fn extract_from_markup(markup: &str, query: &Query) -> ExtractionResult {
        Self::extract(&Document::parse(markup), query)
    }
}
