//! Tosho catalog adapter
//!
//! Fetches HTML search listing pages and extracts one raw candidate per
//! release row. Listing markup drifts over time, so extraction tries a
//! list of selectors from most to least specific.

use async_trait::async_trait;
use scraper::{Html, Selector};

use crate::client::{CatalogClient, ClientConfig};
use crate::error::AdapterError;
use crate::source::{SourceAdapter, SourceOption};
use crate::types::RawCandidate;

/// Default public instance
const DEFAULT_BASE_URL: &str = "https://www.tokyotosho.info";

/// HTML-listing adapter for tosho-style catalogs.
pub struct ToshoAdapter {
    base_url: String,
    client: CatalogClient,
}

impl ToshoAdapter {
    /// Create an adapter against the default public instance.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn new() -> Result<Self, AdapterError> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Create an adapter against a custom base URL (mirror or test server).
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, AdapterError> {
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: CatalogClient::with_config(ClientConfig::default())?,
        })
    }
}

#[async_trait]
impl SourceAdapter for ToshoAdapter {
    fn name(&self) -> &'static str {
        "tosho"
    }

    fn options(&self) -> Vec<SourceOption> {
        vec![SourceOption {
            flag: "tosho-url",
            description: "Base URL of the tosho instance to search",
            shape: "URL",
        }]
    }

    async fn fetch(&self, query: &str) -> Result<Vec<RawCandidate>, AdapterError> {
        let url = format!(
            "{}/search.php?terms={}",
            self.base_url,
            urlencoding::encode(query)
        );

        let html = self.client.fetch(&url).await?;
        parse_listing(&html)
    }
}

/// Parse a search listing page into raw candidates.
///
/// An empty page is a normal outcome. Rows without a usable link or
/// title are skipped.
pub(crate) fn parse_listing(html: &str) -> Result<Vec<RawCandidate>, AdapterError> {
    let document = Html::parse_document(html);

    // Release title cells, most specific selector first
    let row_selectors = [
        "table.listing td.desc-top a",
        ".release-list a.release-title",
        "table.listing td a",
    ];

    for selector_str in &row_selectors {
        let selector = Selector::parse(selector_str)
            .map_err(|e| AdapterError::Malformed(format!("invalid selector: {:?}", e)))?;

        let mut candidates = Vec::new();
        for element in document.select(&selector) {
            if let Some(candidate) = parse_listing_row(&element) {
                candidates.push(candidate);
            }
        }

        if !candidates.is_empty() {
            return Ok(candidates);
        }
    }

    Ok(Vec::new())
}

/// Parse a single anchor element into a candidate.
fn parse_listing_row(element: &scraper::ElementRef) -> Option<RawCandidate> {
    let link = element.value().attr("href")?.to_string();
    if link.is_empty() {
        return None;
    }

    let title = element.text().collect::<String>().trim().to_string();
    if title.is_empty() {
        return None;
    }

    Some(RawCandidate { title, link })
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const LISTING: &str = r#"<html><body>
      <table class="listing">
        <tr>
          <td class="desc-top">
            <a href="https://example.org/t/1.torrent">[Fans] Show Name - 05 [720p]</a>
          </td>
        </tr>
        <tr>
          <td class="desc-top">
            <a href="https://example.org/t/2.torrent">Show.Name.S01E06.1080p-Fans</a>
          </td>
        </tr>
        <tr>
          <td class="desc-top"><a href="">empty link row</a></td>
        </tr>
      </table>
    </body></html>"#;

    #[test]
    fn test_parse_listing() {
        let candidates = parse_listing(LISTING).unwrap();
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].title, "[Fans] Show Name - 05 [720p]");
        assert_eq!(candidates[1].link, "https://example.org/t/2.torrent");
    }

    #[test]
    fn test_parse_listing_empty_page() {
        let candidates = parse_listing("<html><body></body></html>").unwrap();
        assert!(candidates.is_empty());
    }

    #[test]
    fn test_parse_listing_fallback_selector() {
        let html = r#"<table class="listing"><tr>
            <td><a href="/t/9">Show Name - 09 [480p]</a></td>
        </tr></table>"#;
        let candidates = parse_listing(html).unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].link, "/t/9");
    }

    #[tokio::test]
    async fn test_fetch_queries_search_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search.php"))
            .and(query_param("terms", "show name"))
            .respond_with(ResponseTemplate::new(200).set_body_string(LISTING))
            .mount(&server)
            .await;

        let adapter = ToshoAdapter::with_base_url(server.uri()).unwrap();
        let candidates = adapter.fetch("show name").await.unwrap();
        assert_eq!(candidates.len(), 2);
    }
}
