//! Nyaa catalog adapter
//!
//! Fetches the RSS search feed (`/?page=rss&q=...`) and extracts one raw
//! candidate per `<item>`. The base URL is configurable so mirrors and
//! tests can point the adapter elsewhere.

use async_trait::async_trait;
use quick_xml::events::Event;
use quick_xml::reader::Reader;

use crate::client::{CatalogClient, ClientConfig};
use crate::error::AdapterError;
use crate::source::{SourceAdapter, SourceOption};
use crate::types::RawCandidate;

/// Default public instance
const DEFAULT_BASE_URL: &str = "https://nyaa.si";

/// RSS-based adapter for nyaa-style catalogs.
pub struct NyaaAdapter {
    base_url: String,
    category: Option<String>,
    client: CatalogClient,
}

impl NyaaAdapter {
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
            category: None,
            client: CatalogClient::with_config(ClientConfig::default())?,
        })
    }

    /// Restrict the listing to one catalog category, e.g. `"1_2"`.
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

#[async_trait]
impl SourceAdapter for NyaaAdapter {
    fn name(&self) -> &'static str {
        "nyaa"
    }

    fn options(&self) -> Vec<SourceOption> {
        vec![
            SourceOption {
                flag: "nyaa-url",
                description: "Base URL of the nyaa instance to search",
                shape: "URL",
            },
            SourceOption {
                flag: "nyaa-category",
                description: "Restrict the listing to one category, e.g. 1_2",
                shape: "CATEGORY",
            },
        ]
    }

    async fn fetch(&self, query: &str) -> Result<Vec<RawCandidate>, AdapterError> {
        let mut url = format!(
            "{}/?page=rss&q={}",
            self.base_url,
            urlencoding::encode(query)
        );
        if let Some(category) = &self.category {
            url.push_str("&c=");
            url.push_str(category);
        }

        let xml = self.client.fetch(&url).await?;
        parse_rss_feed(xml.as_bytes())
    }
}

/// Parse an RSS search feed into raw candidates.
///
/// Items missing a title or link are skipped rather than failing the
/// feed; only unreadable XML is an error.
pub(crate) fn parse_rss_feed(xml: &[u8]) -> Result<Vec<RawCandidate>, AdapterError> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);

    let mut candidates = Vec::new();
    let mut buf = Vec::new();

    let mut current_item: Option<CandidateBuilder> = None;
    let mut current_element = String::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                current_element = name.clone();

                if name == "item" {
                    current_item = Some(CandidateBuilder::default());
                }
            }
            Ok(Event::End(e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_string();

                if name == "item" {
                    if let Some(builder) = current_item.take() {
                        if let Some(candidate) = builder.build() {
                            candidates.push(candidate);
                        }
                    }
                }
                current_element.clear();
            }
            Ok(Event::Text(e)) => {
                if let Some(ref mut item) = current_item {
                    let text = e.unescape().unwrap_or_default().to_string();
                    if !text.is_empty() {
                        match current_element.as_str() {
                            "title" => item.title = Some(text),
                            "link" => item.link = Some(text),
                            _ => {}
                        }
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(AdapterError::Malformed(format!("XML parse error: {}", e))),
            _ => {}
        }
        buf.clear();
    }

    Ok(candidates)
}

#[derive(Default)]
struct CandidateBuilder {
    title: Option<String>,
    link: Option<String>,
}

impl CandidateBuilder {
    fn build(self) -> Option<RawCandidate> {
        Some(RawCandidate {
            title: self.title?,
            link: self.link?,
        })
    }
}
