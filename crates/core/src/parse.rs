//! HTML parsing and DOM navigation.
//!
//! This module provides the [`Document`] and [`Element`] types for parsing
//! story pages and navigating them with CSS selectors.
//!
//! # Example
//!
//! ```rust
//! use abstractor_core::parse::Document;
//!
//! let html = r#"
//!     <dl class="stats">
//!         <dt>Words:</dt><dd>1,234</dd>
//!         <dt>Works:</dt><dd>4</dd>
//!     </dl>
//! "#;
//!
//! let doc = Document::parse(html);
//! let words = doc.select_first("dl.stats dd").unwrap().unwrap();
//! assert_eq!(words.text_trimmed(), "1,234");
//! ```

use scraper::{ElementRef, Html, Selector};

use crate::{AbstractorError, Result};

fn compile(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| AbstractorError::HtmlParseError(format!("Invalid selector: {}", e)))
}

/// Represents a parsed HTML document.
///
/// A Document wraps a story or series page and provides methods for
/// querying elements using CSS selectors.
///
/// # Example
///
/// ```rust
/// use abstractor_core::parse::Document;
///
/// let html = "<html><body><h2 class=\"title heading\">Example</h2></body></html>";
/// let doc = Document::parse(html);
/// let title = doc.require("h2.title", "title").unwrap();
/// assert_eq!(title.text_trimmed(), "Example");
/// ```
pub struct Document {
    html: Html,
}

impl Document {
    /// Parses HTML from a string.
    ///
    /// html5ever recovers from any malformed input, so parsing itself never
    /// fails; missing structure surfaces later as a missing field.
    pub fn parse(html: &str) -> Self {
        Self { html: Html::parse_document(html) }
    }

    /// Parses an HTML fragment (a summary or series note) rather than a page.
    pub fn parse_fragment(html: &str) -> Self {
        Self { html: Html::parse_fragment(html) }
    }

    /// Gets the root element of the document.
    pub fn root(&'_ self) -> Element<'_> {
        Element { element: self.html.root_element() }
    }

    /// Selects elements using a CSS selector.
    ///
    /// # Errors
    ///
    /// Returns [`AbstractorError::HtmlParseError`] if the selector is invalid.
    ///
    /// # Example
    ///
    /// ```rust
    /// use abstractor_core::parse::Document;
    ///
    /// let html = r#"<p class="content">First</p><p class="content">Second</p>"#;
    /// let doc = Document::parse(html);
    /// let elements = doc.select("p.content").unwrap();
    /// assert_eq!(elements.len(), 2);
    /// ```
    pub fn select(&'_ self, selector: &str) -> Result<Vec<Element<'_>>> {
        let sel = compile(selector)?;
        Ok(self.html.select(&sel).map(|el| Element { element: el }).collect())
    }

    /// Selects the first element matching a CSS selector, if any.
    pub fn select_first(&'_ self, selector: &str) -> Result<Option<Element<'_>>> {
        let sel = compile(selector)?;
        Ok(self.html.select(&sel).next().map(|el| Element { element: el }))
    }

    /// Like [`Document::select_first`], but a missing match is a layout change.
    pub fn require(&'_ self, selector: &str, field: &'static str) -> Result<Element<'_>> {
        self.select_first(selector)?.ok_or(AbstractorError::MissingField { field })
    }
}

/// A wrapper around scraper's ElementRef for easier DOM navigation.
///
/// # Example
///
/// ```rust
/// use abstractor_core::parse::Document;
///
/// let html = r#"<a href="/works/1">Link text</a>"#;
/// let doc = Document::parse(html);
/// let link = &doc.select("a").unwrap()[0];
///
/// assert_eq!(link.text(), "Link text");
/// assert_eq!(link.attr("href"), Some("/works/1"));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Element<'a> {
    element: ElementRef<'a>,
}

impl<'a> Element<'a> {
    pub(crate) fn element_ref(&self) -> ElementRef<'a> {
        self.element
    }

    /// Gets the text content of this element.
    ///
    /// Returns the concatenation of all text nodes within this element.
    pub fn text(&self) -> String {
        self.element.text().collect()
    }

    /// Gets the text content with surrounding whitespace removed.
    pub fn text_trimmed(&self) -> String {
        self.text().trim().to_string()
    }

    /// Gets the value of an attribute.
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.element.value().attr(name)
    }

    /// Gets the lowercase tag name of this element.
    pub fn tag_name(&self) -> String {
        self.element.value().name().to_lowercase()
    }

    /// Selects descendant elements using a CSS selector.
    ///
    /// # Errors
    ///
    /// Returns [`AbstractorError::HtmlParseError`] if the selector is invalid.
    pub fn select(&self, selector: &str) -> Result<Vec<Element<'a>>> {
        let sel = compile(selector)?;
        Ok(self.element.select(&sel).map(|el| Element { element: el }).collect())
    }

    /// Selects the first descendant matching a CSS selector, if any.
    pub fn select_first(&self, selector: &str) -> Result<Option<Element<'a>>> {
        let sel = compile(selector)?;
        Ok(self.element.select(&sel).next().map(|el| Element { element: el }))
    }

    /// Text of every descendant link, in document order.
    ///
    /// Tag containers (`dd.fandom.tags` and friends) hold one `<a>` per tag.
    pub fn link_texts(&self) -> Result<Vec<String>> {
        Ok(self.select("a")?.iter().map(Element::text_trimmed).collect())
    }

    /// Direct element children, in document order.
    pub fn children(&self) -> Vec<Element<'a>> {
        self.element
            .children()
            .filter_map(ElementRef::wrap)
            .map(|el| Element { element: el })
            .collect()
    }
}
