//! Error types for the episode search engine
//!
//! Three failure classes with different blast radii: a `ParseError` drops
//! one title, an `AdapterError` drops one catalog's contribution, and a
//! `QueryError` aborts the run before selection starts. Only the last one
//! is ever fatal.

use thiserror::Error;

/// A single catalog title could not yield the mandatory episode number.
///
/// Non-fatal: the pool builder logs the title and moves on. One bad title
/// must never abort a batch.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("no recognizable episode number in title {title:?}")]
pub struct ParseError {
    /// The raw title that failed to parse
    pub title: String,
}

impl ParseError {
    /// Create a parse error for the given raw title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

/// A source adapter could not be reached or returned malformed data.
///
/// Non-fatal to the overall search: the failing adapter contributes zero
/// candidates and the remaining adapters proceed.
#[derive(Error, Debug)]
pub enum AdapterError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Catalog returned data the adapter could not interpret
    #[error("malformed catalog data: {0}")]
    Malformed(String),

    /// Rate limited by the catalog (HTTP 429) after all retries
    #[error("rate limited - too many requests")]
    RateLimited,

    /// Requested catalog resource was not found (HTTP 404)
    #[error("catalog resource not found: {0}")]
    NotFound(String),
}

/// A query criterion was built from a raw value it cannot accept.
///
/// Fatal: surfaced to the caller before selection runs, with the criterion
/// and the offending raw value so the input can be corrected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// Resolution token was neither a known resolution nor the wildcard
    #[error("unknown resolution {value:?} (expected 480p, 720p, 1080p or \"any\")")]
    UnknownResolution {
        /// The raw token supplied
        value: String,
    },

    /// A number list entry did not parse as a non-negative integer
    #[error("invalid {criterion} number {value:?}")]
    InvalidNumber {
        /// Which criterion the value was supplied for ("season", "episode")
        criterion: &'static str,
        /// The raw token supplied
        value: String,
    },

    /// A number range ran backwards, e.g. "5-2"
    #[error("invalid {criterion} range {value:?} (start exceeds end)")]
    InvalidRange {
        /// Which criterion the value was supplied for
        criterion: &'static str,
        /// The raw range supplied
        value: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let error = ParseError::new("Interview With The Author");
        assert_eq!(
            error.to_string(),
            "no recognizable episode number in title \"Interview With The Author\""
        );
    }

    #[test]
    fn test_adapter_error_display_malformed() {
        let error = AdapterError::Malformed("unexpected EOF in feed".to_string());
        assert_eq!(
            error.to_string(),
            "malformed catalog data: unexpected EOF in feed"
        );
    }

    #[test]
    fn test_adapter_error_display_rate_limited() {
        let error = AdapterError::RateLimited;
        assert_eq!(error.to_string(), "rate limited - too many requests");
    }

    #[test]
    fn test_adapter_error_display_not_found() {
        let error = AdapterError::NotFound("https://example.org/rss".to_string());
        assert_eq!(
            error.to_string(),
            "catalog resource not found: https://example.org/rss"
        );
    }

    #[test]
    fn test_query_error_display_unknown_resolution() {
        let error = QueryError::UnknownResolution {
            value: "4k".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "unknown resolution \"4k\" (expected 480p, 720p, 1080p or \"any\")"
        );
    }

    #[test]
    fn test_query_error_display_invalid_number() {
        let error = QueryError::InvalidNumber {
            criterion: "season",
            value: "one".to_string(),
        };
        assert_eq!(error.to_string(), "invalid season number \"one\"");
    }

    #[test]
    fn test_query_error_display_invalid_range() {
        let error = QueryError::InvalidRange {
            criterion: "episode",
            value: "9-3".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "invalid episode range \"9-3\" (start exceeds end)"
        );
    }
}
