use crate::dom::DomNode;
use crate::error::DomError;

/// Listing cards: inside the main results slot, carrying both the item id
/// (`data-asin`) and the search-result component marker. Ads, carousels and
/// other widgets in the slot lack one of the two.
pub const RESULT_NODE_SELECTOR: &str =
    r#"div.s-main-slot div[data-asin][data-component-type="s-search-result"]"#;

/// Candidate listing nodes in document order. No match is an empty list,
/// not an error.
pub fn locate<N: DomNode>(root: &N) -> Result<Vec<N>, DomError> {
    root.query_selector_all(RESULT_NODE_SELECTOR)
}
