use scraper::{ElementRef, Html, Selector};

use crate::error::DomError;

/// The handful of read-only queries the extractor needs from a parsed page.
/// Kept small so the extractor doesn't depend on a particular HTML parser.
pub trait DomNode: Sized {
    /// First descendant matching `selector`.
    fn query_selector(&self, selector: &str) -> Result<Option<Self>, DomError>;

    /// All descendants matching `selector`, in document order.
    fn query_selector_all(&self, selector: &str) -> Result<Vec<Self>, DomError>;

    fn attribute(&self, name: &str) -> Option<String>;

    /// Concatenated text of the node and its descendants, untrimmed.
    fn text_content(&self) -> String;
}

/// A parsed search page. Owned by a single pipeline run and dropped once
/// the listings are extracted.
pub struct Document {
    html: Html,
}

impl Document {
    /// Best-effort parse: broken or truncated markup still yields a tree.
    pub fn parse(markup: &str) -> Document {
        let html = Html::parse_document(markup);
        if !html.errors.is_empty() {
            log::debug!("tolerated {} markup errors", html.errors.len());
        }
        Document { html }
    }

    pub fn root(&self) -> ElementRef<'_> {
        self.html.root_element()
    }
}

fn compile(selector: &str) -> Result<Selector, DomError> {
    Selector::parse(selector).map_err(|e| DomError::Selector {
        selector: selector.to_string(),
        message: e.to_string(),
    })
}

impl<'a> DomNode for ElementRef<'a> {
    fn query_selector(&self, selector: &str) -> Result<Option<Self>, DomError> {
        let selector = compile(selector)?;
        Ok(self.select(&selector).next())
    }

    fn query_selector_all(&self, selector: &str) -> Result<Vec<Self>, DomError> {
        let selector = compile(selector)?;
        Ok(self.select(&selector).collect())
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.value().attr(name).map(str::to_string)
    }

    fn text_content(&self) -> String {
        self.text().collect()
    }
}
