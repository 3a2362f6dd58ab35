use tracing::{debug, error, info};

use crate::config::Config;
use crate::data_models::{SearchRequest, SearchResult, assemble};
use crate::dom::Document;
use crate::error::{FetchError, ScrapeError};
use crate::extractor::ListingExtractor;
use crate::fetcher::Fetcher;
use crate::locator::locate;

/// Runs a search end to end: fetch, parse, locate, extract, assemble.
/// Each call owns its page and its nodes, so concurrent searches share
/// nothing but the HTTP client.
#[derive(Debug, Clone)]
pub struct ListingScraper {
    fetcher: Fetcher,
    extractor: ListingExtractor,
}

impl ListingScraper {
    pub fn new(config: &Config) -> Result<ListingScraper, FetchError> {
        Ok(ListingScraper {
            fetcher: Fetcher::new(config)?,
            extractor: ListingExtractor::new(config.site_base.clone()),
        })
    }

    pub async fn search(&self, raw_keyword: &str) -> Result<SearchResult, ScrapeError> {
        let request = SearchRequest::new(raw_keyword).inspect_err(|e| {
            debug!("rejected keyword {raw_keyword:?}: {e}");
        })?;
        let search_url = self.fetcher.search_url(request.keyword());

        let markup = self.fetcher.fetch(&search_url).await.inspect_err(|e| {
            error!(keyword = request.keyword(), "search page fetch failed: {e}");
        })?;

        let result = scrape_markup(&self.extractor, request.keyword(), &search_url, &markup)
            .inspect_err(|e| {
                error!(keyword = request.keyword(), "search page parse failed: {e}");
            })?;

        info!(
            keyword = result.keyword(),
            count = result.count(),
            "scraped {}",
            result.scraped_from()
        );
        Ok(result)
    }
}

/// The offline half of a search. Deterministic in its inputs: the same
/// markup always yields the same result.
pub fn scrape_markup(
    extractor: &ListingExtractor,
    keyword: &str,
    search_url: &str,
    markup: &str,
) -> Result<SearchResult, ScrapeError> {
    let document = Document::parse(markup);
    let nodes = locate(&document.root())?;
    let items = extractor.extract_all(&nodes);
    Ok(assemble(keyword, search_url, items))
}
