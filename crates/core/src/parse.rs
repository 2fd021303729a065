//! HTML parsing and element selection.
//!
//! This module provides the [`Document`] and [`Element`] types that the
//! extractor uses to query third-party article pages with CSS selectors.
//!
//! # Example
//!
//! ```rust
//! use articast_core::parse::Document;
//!
//! let html = r#"
//!     <html>
//!         <body>
//!             <div id="js_content"><p>Paragraph</p></div>
//!         </body>
//!     </html>
//! "#;
//!
//! let doc = Document::parse(html).unwrap();
//! let body = doc.select("#js_content").unwrap();
//! assert_eq!(body.len(), 1);
//! ```

use scraper::{Html, Selector};

use crate::{ArticastError, Result};

/// Represents a parsed HTML document.
///
/// Parsing is lenient: html5ever recovers from any markup, so a document is
/// always produced. Only selectors can fail.
pub struct Document {
    html: Html,
}

impl Document {
    /// Parses HTML from a string.
    ///
    /// # Example
    ///
    /// ```rust
    /// use articast_core::parse::Document;
    ///
    /// let doc = Document::parse("<html><body><h1>Title</h1></body></html>").unwrap();
    /// assert_eq!(doc.select("h1").unwrap()[0].text(), "Title");
    /// ```
    pub fn parse(html: &str) -> Result<Self> {
        let html = Html::parse_document(html);
        Ok(Self { html })
    }

    /// Selects elements using a CSS selector, in document order.
    ///
    /// Selector groups (`"a, b"`) yield each matching element once, in the
    /// order it appears in the document.
    ///
    /// # Errors
    ///
    /// Returns [`ArticastError::HtmlParseError`] if the selector is invalid.
    pub fn select(&'_ self, selector: &str) -> Result<Vec<Element<'_>>> {
        let sel = parse_selector(selector)?;
        Ok(self.html.select(&sel).map(|el| Element { element: el }).collect())
    }

    /// Gets the title of the document.
    pub fn title(&self) -> Option<String> {
        let selector = Selector::parse("title").ok()?;
        self.html
            .select(&selector)
            .next()
            .map(|el| el.text().collect::<String>())
    }
}

/// A thin wrapper around scraper's ElementRef.
#[derive(Clone, Debug)]
pub struct Element<'a> {
    element: scraper::ElementRef<'a>,
}

impl<'a> Element<'a> {
    /// Gets the text content of this element.
    ///
    /// Returns the concatenation of all descendant text nodes.
    pub fn text(&self) -> String {
        self.element.text().collect()
    }
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| ArticastError::HtmlParseError(format!("Invalid selector: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_HTML: &str = r#"
        <!DOCTYPE html>
        <html lang="zh-CN">
        <head>
            <meta charset="UTF-8">
            <title>Test Page</title>
        </head>
        <body>
            <h1 class="article-title">Heading</h1>
            <div class="article-content"><p>Paragraph 1</p></div>
            <p class="note">Paragraph 2</p>
            <a href="https://example.com">Link</a>
        </body>
        </html>
    "#;

    #[test]
    fn test_parse_document() {
        let doc = Document::parse(SAMPLE_HTML).unwrap();
        assert_eq!(doc.title(), Some("Test Page".to_string()));
    }

    #[test]
    fn test_select_elements() {
        let doc = Document::parse(SAMPLE_HTML).unwrap();
        let elements = doc.select("p").unwrap();

        assert_eq!(elements.len(), 2);
        assert_eq!(elements[0].text(), "Paragraph 1");
        assert_eq!(elements[1].text(), "Paragraph 2");
    }

    #[test]
    fn test_selector_group_keeps_document_order() {
        let doc = Document::parse(SAMPLE_HTML).unwrap();
        let elements = doc.select(".article-content, .article-title").unwrap();

        assert_eq!(elements.len(), 2);
        assert_eq!(elements[0].text(), "Heading");
        assert_eq!(elements[1].text(), "Paragraph 1");
    }

    #[test]
    fn test_invalid_selector() {
        let doc = Document::parse(SAMPLE_HTML).unwrap();
        let result = doc.select("[[invalid");

        assert!(matches!(result, Err(ArticastError::HtmlParseError(_))));
    }
}
