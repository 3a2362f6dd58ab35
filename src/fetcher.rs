use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderValue};

use crate::config::Config;
use crate::error::FetchError;

const ACCEPT_HTML: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8";

/// Downloads search pages. The shop serves a stripped or blocking page to
/// clients that don't look like a desktop browser, so every request carries
/// browser-like headers. One attempt per call, no retries.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: reqwest::Client,
    site_base: String,
}

impl Fetcher {
    pub fn new(config: &Config) -> Result<Fetcher, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_HTML));
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));

        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .timeout(config.request_timeout)
            .build()
            .map_err(FetchError::Client)?;

        Ok(Fetcher {
            client,
            site_base: config.site_base.clone(),
        })
    }

    pub fn site_base(&self) -> &str {
        &self.site_base
    }

    /// `<base>/s?k=<keyword>` with the keyword percent-encoded.
    pub fn search_url(&self, keyword: &str) -> String {
        search_url(&self.site_base, keyword)
    }

    pub async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        log::debug!("fetching {url}");
        let res = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| classify(url, e))?;

        let status = res.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = res.text().await.map_err(|e| classify(url, e))?;
        log::debug!("fetched {} bytes from {url}", body.len());
        Ok(body)
    }
}

pub fn search_url(site_base: &str, keyword: &str) -> String {
    format!("{}/s?k={}", site_base, urlencoding::encode(keyword))
}

fn classify(url: &str, e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else if e.is_builder() {
        FetchError::InvalidUrl {
            url: url.to_string(),
            message: e.to_string(),
        }
    } else {
        FetchError::Transport {
            url: url.to_string(),
            source: e,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_url_encodes_keyword() {
        assert_eq!(
            search_url("https://www.amazon.com", "usb c hub"),
            "https://www.amazon.com/s?k=usb%20c%20hub"
        );
        assert_eq!(
            search_url("https://www.amazon.com", "a&b=c"),
            "https://www.amazon.com/s?k=a%26b%3Dc"
        );
    }

    #[test]
    fn test_fetcher_uses_configured_base() {
        let config = Config::default().with_site_base("http://127.0.0.1:9/");
        let fetcher = Fetcher::new(&config).unwrap();
        assert_eq!(fetcher.site_base(), "http://127.0.0.1:9");
        assert_eq!(fetcher.search_url("mouse"), "http://127.0.0.1:9/s?k=mouse");
    }
}
