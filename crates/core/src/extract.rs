//! Article body extraction.
//!
//! Extraction is a two-step strategy. The platform's body selector is tried
//! first; if it yields no text, every `<p>` in the document is joined with
//! newlines instead. Results shorter than [`MIN_CONTENT_CHARS`] are discarded.
//!
//! Extraction never returns an error. A page that cannot be used simply
//! produces `None`, and the conversion continues with the URL alone.

use tracing::{debug, warn};

use crate::parse::{Document, Element};

/// Minimum length, in characters, for extracted text to be usable.
pub const MIN_CONTENT_CHARS: usize = 50;

/// Selector used by the paragraph fallback.
const FALLBACK_SELECTOR: &str = "p";

/// Which step of the strategy produced the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// The platform's body selector matched non-empty text.
    Selector,
    /// The selector was empty and paragraphs were concatenated instead.
    Paragraphs,
}

/// Text pulled out of an article page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    /// The trimmed article text.
    pub text: String,
    /// How the text was obtained.
    pub strategy: Strategy,
    /// Length of `text` in characters.
    pub char_count: usize,
}

/// Extracts article text from `html` using `selector`, with paragraph fallback.
///
/// Returns `None` when neither strategy yields at least [`MIN_CONTENT_CHARS`]
/// characters, or when `selector` is not a valid CSS selector.
///
/// # Example
///
/// ```rust
/// use articast_core::extract;
///
/// let body = "An article body that is comfortably longer than fifty characters.";
/// let html = format!(r#"<div id="js_content">  {body}  </div>"#);
///
/// assert_eq!(extract(&html, "#js_content").as_deref(), Some(body));
/// assert_eq!(extract("<p>too short</p>", "#js_content"), None);
/// ```
pub fn extract(html: &str, selector: &str) -> Option<String> {
    extract_detailed(html, selector).map(|extraction| extraction.text)
}

/// Like [`extract`], but also reports which strategy produced the text.
pub fn extract_detailed(html: &str, selector: &str) -> Option<Extraction> {
    let doc = Document::parse(html).ok()?;

    let selected = match doc.select(selector) {
        Ok(elements) => elements.iter().map(Element::text).collect::<String>(),
        Err(e) => {
            warn!(selector, error = %e, "body selector rejected");
            return None;
        }
    };

    let (text, strategy) = match selected.trim() {
        "" => (paragraph_text(&doc), Strategy::Paragraphs),
        trimmed => (trimmed.to_string(), Strategy::Selector),
    };

    let char_count = text.chars().count();
    if char_count < MIN_CONTENT_CHARS {
        debug!(selector, ?strategy, char_count, "extracted text below minimum length");
        return None;
    }

    debug!(selector, ?strategy, char_count, "extracted article text");
    Some(Extraction { text, strategy, char_count })
}

/// Joins the text of every paragraph with newlines, in document order.
fn paragraph_text(doc: &Document) -> String {
    doc.select(FALLBACK_SELECTOR)
        .map(|paragraphs| paragraphs.iter().map(Element::text).collect::<Vec<_>>().join("\n"))
        .unwrap_or_default()
        .trim()
        .to_string()
}
