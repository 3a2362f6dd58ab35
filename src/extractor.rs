use crate::data_models::ListingItem;
use crate::dom::DomNode;
use crate::error::{DomError, ExtractError};
use crate::normalize::{make_absolute, parse_rating, parse_reviews_count};

/// One way of reading a value out of a node. `Ok(None)` means this markup
/// variant isn't present and the next lookup in the chain should be tried.
pub type Lookup<N, T> = fn(&N) -> Result<Option<T>, DomError>;

/// Runs `chain` in order and returns the first value found. A lookup that
/// faults is skipped; the fault is reported only if no later lookup hits.
pub fn first_match<N, T>(node: &N, chain: &[Lookup<N, T>]) -> Result<Option<T>, DomError> {
    let mut fault = None;
    for lookup in chain {
        match lookup(node) {
            Ok(Some(value)) => return Ok(Some(value)),
            Ok(None) => {}
            Err(e) => {
                fault.get_or_insert(e);
            }
        }
    }
    match fault {
        Some(e) => Err(e),
        None => Ok(None),
    }
}

fn text_at<N: DomNode>(node: &N, selector: &str) -> Result<Option<String>, DomError> {
    Ok(node
        .query_selector(selector)?
        .map(|el| el.text_content())
        .filter(|text| !text.trim().is_empty()))
}

fn attr_at<N: DomNode>(node: &N, selector: &str, name: &str) -> Result<Option<String>, DomError> {
    Ok(node
        .query_selector(selector)?
        .and_then(|el| non_empty_attr(&el, name)))
}

fn non_empty_attr<N: DomNode>(node: &N, name: &str) -> Option<String> {
    node.attribute(name).filter(|value| !value.trim().is_empty())
}

// Markup variants, one lookup each.

fn heading_label<N: DomNode>(node: &N) -> Result<Option<String>, DomError> {
    Ok(text_at(node, "h2 a span")?.map(|t| t.trim().to_string()))
}

fn heading_href<N: DomNode>(node: &N) -> Result<Option<String>, DomError> {
    attr_at(node, "h2 a", "href")
}

fn primary_image<N: DomNode>(node: &N) -> Result<Option<N>, DomError> {
    node.query_selector("img.s-image")
}

fn dynamic_image<N: DomNode>(node: &N) -> Result<Option<N>, DomError> {
    node.query_selector("img.a-dynamic-image")
}

fn latency_tracked_image<N: DomNode>(node: &N) -> Result<Option<N>, DomError> {
    node.query_selector("img[data-image-latency]")
}

fn image_src<N: DomNode>(img: &N) -> Result<Option<String>, DomError> {
    Ok(non_empty_attr(img, "src"))
}

fn image_data_src<N: DomNode>(img: &N) -> Result<Option<String>, DomError> {
    Ok(non_empty_attr(img, "data-src"))
}

fn star_icon_alt<N: DomNode>(node: &N) -> Result<Option<String>, DomError> {
    text_at(node, "i span.a-icon-alt")
}

fn any_icon_alt<N: DomNode>(node: &N) -> Result<Option<String>, DomError> {
    text_at(node, "span.a-icon-alt")
}

fn reviews_link<N: DomNode>(node: &N) -> Result<Option<String>, DomError> {
    text_at(node, r#"a[href*="/product-reviews/"]"#)
}

// Generic and imprecise: on some layouts this hits unrelated short text.
fn small_text_span<N: DomNode>(node: &N) -> Result<Option<String>, DomError> {
    text_at(node, "span.a-size-base")
}

// Fallback chains, highest priority first.

pub fn title_chain<N: DomNode>() -> [Lookup<N, String>; 1] {
    [heading_label]
}

pub fn product_url_chain<N: DomNode>() -> [Lookup<N, String>; 1] {
    [heading_href]
}

pub fn image_element_chain<N: DomNode>() -> [Lookup<N, N>; 3] {
    [primary_image, dynamic_image, latency_tracked_image]
}

pub fn image_source_chain<N: DomNode>() -> [Lookup<N, String>; 2] {
    [image_src, image_data_src]
}

pub fn rating_text_chain<N: DomNode>() -> [Lookup<N, String>; 2] {
    [star_icon_alt, any_icon_alt]
}

pub fn reviews_text_chain<N: DomNode>() -> [Lookup<N, String>; 2] {
    [reviews_link, small_text_span]
}

/// Field extractor for search-result cards. Holds the shop base used to
/// make links absolute.
#[derive(Debug, Clone)]
pub struct ListingExtractor {
    site_base: String,
}

impl ListingExtractor {
    pub fn new(site_base: impl Into<String>) -> ListingExtractor {
        ListingExtractor {
            site_base: site_base.into(),
        }
    }

    /// Extracts one card. A field whose lookups fault is left empty; the
    /// node is only rejected when every field faulted.
    pub fn extract<N: DomNode>(&self, node: &N) -> Result<ListingItem, ExtractError> {
        let mut faults = FaultTally::default();

        let title = faults.absorb("title", first_match(node, &title_chain::<N>()));
        let product_url = faults
            .absorb("productUrl", first_match(node, &product_url_chain::<N>()))
            .and_then(|href| make_absolute(&href, &self.site_base));
        let image_url = faults
            .absorb("imageUrl", image_reference(node))
            .and_then(|src| make_absolute(&src, &self.site_base));
        let rating = faults
            .absorb("rating", first_match(node, &rating_text_chain::<N>()))
            .and_then(|text| parse_rating(&text));
        let reviews_count = faults
            .absorb("reviewsCount", first_match(node, &reviews_text_chain::<N>()))
            .and_then(|text| parse_reviews_count(&text));

        if let Some(fault) = faults.into_total_failure(FIELD_COUNT) {
            return Err(ExtractError::AllFieldsFailed(fault));
        }

        Ok(ListingItem {
            title,
            rating,
            reviews_count,
            image_url,
            product_url,
        })
    }

    /// Extracts every node in order, dropping the ones that could not be
    /// read at all.
    pub fn extract_all<N: DomNode>(&self, nodes: &[N]) -> Vec<ListingItem> {
        nodes
            .iter()
            .enumerate()
            .filter_map(|(index, node)| match self.extract(node) {
                Ok(item) => Some(item),
                Err(e) => {
                    log::debug!("dropping listing #{index}: {e}");
                    None
                }
            })
            .collect()
    }
}

const FIELD_COUNT: usize = 5;

/// The first image element found decides; its `src` wins over `data-src`.
fn image_reference<N: DomNode>(node: &N) -> Result<Option<String>, DomError> {
    match first_match(node, &image_element_chain::<N>())? {
        Some(img) => first_match(&img, &image_source_chain::<N>()),
        None => Ok(None),
    }
}

#[derive(Default)]
struct FaultTally {
    count: usize,
    first: Option<DomError>,
}

impl FaultTally {
    fn absorb<T>(&mut self, field: &str, result: Result<Option<T>, DomError>) -> Option<T> {
        match result {
            Ok(value) => value,
            Err(e) => {
                log::debug!("field {field} unreadable: {e}");
                self.count += 1;
                self.first.get_or_insert(e);
                None
            }
        }
    }

    fn into_total_failure(self, fields: usize) -> Option<DomError> {
        if self.count == fields { self.first } else { None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Stub(&'static str);

    fn miss(_: &Stub) -> Result<Option<String>, DomError> {
        Ok(None)
    }

    fn hit(node: &Stub) -> Result<Option<String>, DomError> {
        Ok(Some(node.0.to_string()))
    }

    fn broken(_: &Stub) -> Result<Option<String>, DomError> {
        Err(DomError::Selector {
            selector: "??".into(),
            message: "bad".into(),
        })
    }

    #[test]
    fn test_first_match_takes_first_hit() {
        let chain: [Lookup<Stub, String>; 3] = [miss, hit, broken];
        assert_eq!(first_match(&Stub("x"), &chain).unwrap(), Some("x".to_string()));
    }

    #[test]
    fn test_first_match_skips_faults_when_a_later_lookup_hits() {
        let chain: [Lookup<Stub, String>; 2] = [broken, hit];
        assert_eq!(first_match(&Stub("y"), &chain).unwrap(), Some("y".to_string()));
    }

    #[test]
    fn test_first_match_reports_fault_without_hit() {
        let chain: [Lookup<Stub, String>; 2] = [miss, broken];
        assert!(first_match(&Stub("z"), &chain).is_err());
    }

    #[test]
    fn test_first_match_all_miss() {
        let chain: [Lookup<Stub, String>; 2] = [miss, miss];
        assert_eq!(first_match(&Stub("z"), &chain).unwrap(), None);
        assert_eq!(first_match::<Stub, String>(&Stub("z"), &[]).unwrap(), None);
    }
}
