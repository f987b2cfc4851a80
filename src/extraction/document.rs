//! Parsed HTML documents

use scraper::{ElementRef, Html};

/// A parsed HTML document
///
/// Wraps the `scraper` tree for the lifetime of one item. html5ever recovers
/// from malformed markup, so parsing itself never fails.
pub struct Document {
    html: Html,
}

impl Document {
    /// Parse a full HTML document
    pub fn parse(markup: &str) -> Self {
        let html = Html::parse_document(markup);
        if !html.errors.is_empty() {
            tracing::trace!("Parser recovered from {} markup errors", html.errors.len());
        }
        Self { html }
    }

    /// All elements with the given tag name, in document order.
    ///
    /// Tag names compare case-insensitively.
    pub fn elements_by_tag<'a>(
        &'a self,
        tag_name: &'a str,
    ) -> impl Iterator<Item = ElementRef<'a>> + 'a {
        self.html
            .root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
            .filter(move |el| el.value().name().eq_ignore_ascii_case(tag_name))
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("errors", &self.html.errors.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elements_in_document_order() {
        let doc = Document::parse(
            r#"<html><head><meta name="a"><META name="b"></head>
               <body><div><meta name="c"></div></body></html>"#,
        );
        let names: Vec<_> = doc
            .elements_by_tag("Meta")
            .filter_map(|el| el.value().attr("name"))
            .collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_missing_tag_yields_nothing() {
        let doc = Document::parse("<p>hello</p>");
        assert_eq!(doc.elements_by_tag("title").count(), 0);
    }
}
