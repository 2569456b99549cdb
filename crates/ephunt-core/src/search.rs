//! High-level search API
//!
//! Combines the source adapters, the metadata parser and the selection
//! engine: fetch raw candidates from every adapter, parse what can be
//! parsed, merge into one pool, then select. Fetch and parse failures
//! are contained per adapter and per title — partial results are the
//! normal case, and an empty pool is a valid outcome.

use futures::future::join_all;

use crate::parser::parse_candidate;
use crate::query::Query;
use crate::select::select;
use crate::source::SourceAdapter;
use crate::types::Episode;

/// Episode search across a set of catalog adapters.
///
/// # Example
/// ```no_run
/// use ephunt_core::search::EpisodeSearch;
/// use ephunt_core::sources::NyaaAdapter;
/// use ephunt_core::query::Query;
///
/// # async fn example() -> Result<(), ephunt_core::AdapterError> {
/// let search = EpisodeSearch::with_adapters(vec![Box::new(NyaaAdapter::new()?)]);
/// let query = Query::builder().match_latest(true).build();
/// let episodes = search.run("show name", &query).await;
/// for episode in episodes {
///     println!("{} #{}", episode.series, episode.number);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct EpisodeSearch {
    adapters: Vec<Box<dyn SourceAdapter>>,
}

impl EpisodeSearch {
    /// Create a search with no adapters. Useless until adapters are added.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a search over the given adapters.
    pub fn with_adapters(adapters: Vec<Box<dyn SourceAdapter>>) -> Self {
        Self { adapters }
    }

    /// Add one adapter.
    pub fn add_adapter(&mut self, adapter: Box<dyn SourceAdapter>) {
        self.adapters.push(adapter);
    }

    /// Names of the wired adapters, in wiring order.
    pub fn adapter_names(&self) -> Vec<&'static str> {
        self.adapters.iter().map(|a| a.name()).collect()
    }

    /// Build the episode pool for a search text.
    ///
    /// All adapters are queried concurrently; the pool is closed once
    /// every fetch has resolved. A failing adapter is logged and
    /// contributes nothing; an unparsable title is logged and dropped.
    /// Duplicate identities across (or within) adapters are expected —
    /// the selection stage resolves them.
    pub async fn gather(&self, search_text: &str) -> Vec<Episode> {
        let fetches = self.adapters.iter().map(|adapter| adapter.fetch(search_text));
        let results = join_all(fetches).await;

        let mut pool = Vec::new();
        for (adapter, result) in self.adapters.iter().zip(results) {
            match result {
                Ok(candidates) => {
                    tracing::debug!(
                        source = adapter.name(),
                        count = candidates.len(),
                        "fetched candidates"
                    );
                    for candidate in &candidates {
                        match parse_candidate(candidate) {
                            Ok(episode) => pool.push(episode),
                            Err(error) => {
                                tracing::debug!(source = adapter.name(), %error, "dropping title");
                            }
                        }
                    }
                }
                Err(error) => {
                    tracing::warn!(
                        source = adapter.name(),
                        %error,
                        "source fetch failed, continuing without it"
                    );
                }
            }
        }
        pool
    }

    /// Run a full search: gather the pool, then select against `query`.
    pub async fn run(&self, search_text: &str, query: &Query) -> Vec<Episode> {
        let pool = self.gather(search_text).await;
        select(&pool, query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AdapterError;
    use crate::source::SourceAdapter;
    use crate::types::RawCandidate;
    use async_trait::async_trait;

    /// Adapter returning canned candidates, or failing on demand.
    struct StubAdapter {
        name: &'static str,
        candidates: Vec<RawCandidate>,
        fail: bool,
    }

    impl StubAdapter {
        fn with_titles(name: &'static str, titles: &[&str]) -> Self {
            Self {
                name,
                candidates: titles
                    .iter()
                    .map(|title| RawCandidate {
                        title: title.to_string(),
                        link: format!("https://example.org/{}", title.len()),
                    })
                    .collect(),
                fail: false,
            }
        }

        fn failing(name: &'static str) -> Self {
            Self {
                name,
                candidates: Vec::new(),
                fail: true,
            }
        }
    }

    #[async_trait]
    impl SourceAdapter for StubAdapter {
        fn name(&self) -> &'static str {
            self.name
        }

        async fn fetch(&self, _query: &str) -> Result<Vec<RawCandidate>, AdapterError> {
            if self.fail {
                return Err(AdapterError::Malformed("stub failure".to_string()));
            }
            Ok(self.candidates.clone())
        }
    }

    #[tokio::test]
    async fn test_gather_merges_adapters() {
        let search = EpisodeSearch::with_adapters(vec![
            Box::new(StubAdapter::with_titles(
                "one",
                &["[Fans] Show Name - 01 [720p]"],
            )),
            Box::new(StubAdapter::with_titles(
                "two",
                &["Show.Name.S01E02.1080p-Fans"],
            )),
        ]);

        let pool = search.gather("show name").await;
        assert_eq!(pool.len(), 2);
    }

    #[tokio::test]
    async fn test_gather_drops_unparsable_titles() {
        let search = EpisodeSearch::with_adapters(vec![Box::new(StubAdapter::with_titles(
            "one",
            &["[Fans] Show Name - 01 [720p]", "Interview With The Author"],
        ))]);

        let pool = search.gather("show name").await;
        assert_eq!(pool.len(), 1);
    }

    #[tokio::test]
    async fn test_failing_adapter_does_not_poison_batch() {
        let search = EpisodeSearch::with_adapters(vec![
            Box::new(StubAdapter::failing("broken")),
            Box::new(StubAdapter::with_titles(
                "working",
                &["[Fans] Show Name - 01 [720p]"],
            )),
        ]);

        let pool = search.gather("show name").await;
        assert_eq!(pool.len(), 1);
    }

    #[tokio::test]
    async fn test_no_adapters_yields_empty_pool() {
        let search = EpisodeSearch::new();
        assert!(search.gather("anything").await.is_empty());
    }

    #[tokio::test]
    async fn test_run_selects_over_pool() {
        let search = EpisodeSearch::with_adapters(vec![Box::new(StubAdapter::with_titles(
            "one",
            &[
                "[GroupA] SeriesX - 01 [720p]",
                "[GroupB] SeriesX - 01 [1080p]",
                "[GroupA] SeriesX - 02 [720p]",
            ],
        ))]);

        let query = Query::builder()
            .seasons("1")
            .unwrap()
            .match_latest(true)
            .build();
        let result = search.run("seriesx", &query).await;
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].number, 2);
    }

    #[tokio::test]
    async fn test_adapter_names() {
        let search = EpisodeSearch::with_adapters(vec![
            Box::new(StubAdapter::with_titles("one", &[])),
            Box::new(StubAdapter::with_titles("two", &[])),
        ]);
        assert_eq!(search.adapter_names(), vec!["one", "two"]);
    }
}
