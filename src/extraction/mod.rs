//! Attribute extraction module
//!
//! This module resolves selector strings into queries and runs those
//! queries against parsed HTML documents.

pub mod document;
pub mod extractor;
pub mod predicate;
pub mod query;
pub mod selector;

pub use document::Document;
pub use extractor::{AttributeExtractor, ExtractionResult, NOT_AVAILABLE};
pub use predicate::Predicate;
pub use query::{Property, Query};
pub use selector::{resolve, Preset};
