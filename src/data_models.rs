use serde::{Deserialize, Serialize};

use crate::error::ScrapeError;

/// A validated search keyword.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    keyword: String,
}

impl SearchRequest {
    /// Trims the raw input; blank keywords are rejected.
    pub fn new(raw: &str) -> Result<SearchRequest, ScrapeError> {
        let keyword = raw.trim();
        if keyword.is_empty() {
            return Err(ScrapeError::Validation);
        }
        Ok(SearchRequest {
            keyword: keyword.to_string(),
        })
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }
}

/// One product card. Every field is independent: a missing rating says
/// nothing about the title.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ListingItem {
    pub title: Option<String>,
    pub rating: Option<f64>,
    pub reviews_count: Option<u64>,
    pub image_url: Option<String>,
    pub product_url: Option<String>,
}

/// What a search returns to the caller.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    keyword: String,
    scraped_from: String,
    count: usize,
    #[serde(rename = "results")]
    items: Vec<ListingItem>,
}

impl SearchResult {
    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn scraped_from(&self) -> &str {
        &self.scraped_from
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn items(&self) -> &[ListingItem] {
        &self.items
    }
}

/// Packages extracted items with the request metadata. `count` always
/// mirrors the number of items.
pub fn assemble(keyword: &str, search_url: &str, items: Vec<ListingItem>) -> SearchResult {
    SearchResult {
        keyword: keyword.to_string(),
        scraped_from: search_url.to_string(),
        count: items.len(),
        items,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_request_trims() {
        let req = SearchRequest::new("  wireless mouse \n").unwrap();
        assert_eq!(req.keyword(), "wireless mouse");
    }

    #[test]
    fn test_search_request_rejects_blank() {
        assert!(matches!(SearchRequest::new(""), Err(ScrapeError::Validation)));
        assert!(matches!(SearchRequest::new(" \t\n"), Err(ScrapeError::Validation)));
    }

    #[test]
    fn test_assemble_counts_items() {
        let items = vec![ListingItem::default(), ListingItem::default()];
        let result = assemble("mouse", "https://www.amazon.com/s?k=mouse", items);
        assert_eq!(result.count(), 2);
        assert_eq!(result.count(), result.items().len());
    }

    #[test]
    fn test_wire_shape() {
        let item = ListingItem {
            title: Some("Mouse".into()),
            rating: Some(4.5),
            reviews_count: Some(1234),
            image_url: None,
            product_url: Some("https://www.amazon.com/dp/B1".into()),
        };
        let result = assemble("mouse", "https://www.amazon.com/s?k=mouse", vec![item]);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "keyword": "mouse",
                "scrapedFrom": "https://www.amazon.com/s?k=mouse",
                "count": 1,
                "results": [{
                    "title": "Mouse",
                    "rating": 4.5,
                    "reviewsCount": 1234,
                    "imageUrl": null,
                    "productUrl": "https://www.amazon.com/dp/B1"
                }]
            })
        );
    }
}
