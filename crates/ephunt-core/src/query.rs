//! Declarative match criteria
//!
//! A [`Query`] is built once per search invocation from user
//! configuration and is immutable thereafter. [`QueryBuilder`] applies a
//! fixed, ordered sequence of validated transformations over raw string
//! input, so malformed criteria fail loudly before any selection runs.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::QueryError;
use crate::types::Resolution;

/// Wildcard token accepted by the resolution and extension criteria.
///
/// Supplying it resets that dimension back to unconstrained, overriding
/// any earlier accumulation in the same configuration pass.
pub const ANY_TOKEN: &str = "any";

/// Declarative set of match criteria for a search invocation.
///
/// An empty criterion set always means "unconstrained on that dimension",
/// never "match nothing".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    /// Seasons to match; empty = any season
    pub seasons: BTreeSet<u32>,
    /// Episode numbers to match; empty = any episode
    pub episodes: BTreeSet<u32>,
    /// Keep only the latest episode per series (or per listed season)
    pub match_latest: bool,
    /// Resolution whitelist; empty = any resolution
    pub resolutions: BTreeSet<Resolution>,
    /// Lower-cased extension whitelist; empty = any file type
    pub extensions: BTreeSet<String>,
    /// Release-group whitelist; empty = any group. An episode advertising
    /// no group at all passes this criterion even when non-empty.
    pub groups: BTreeSet<String>,
    /// Keep every matching release variant instead of one per identity
    pub allow_duplicates: bool,
}

impl Query {
    /// The maximally permissive query: no criteria, no latest filter,
    /// duplicates suppressed to one representative per identity.
    pub fn any() -> Self {
        Self::default()
    }

    /// Start building a query.
    pub fn builder() -> QueryBuilder {
        QueryBuilder::default()
    }
}

/// Builder applying validated transformations in the order they are given.
///
/// # Example
/// ```
/// use ephunt_core::query::Query;
///
/// let query = Query::builder()
///     .seasons("1,3-4")?
///     .resolution("720p")?
///     .resolution("any")? // resets the resolution criterion
///     .match_latest(true)
///     .build();
/// assert!(query.resolutions.is_empty());
/// # Ok::<(), ephunt_core::QueryError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    query: Query,
}

impl QueryBuilder {
    /// Create a builder with no criteria set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add seasons from a list spec such as `"2"` or `"1,3-6"`.
    ///
    /// # Errors
    /// `QueryError::InvalidNumber` / `QueryError::InvalidRange` when an
    /// entry is not a non-negative integer or a forward range.
    pub fn seasons(mut self, spec: &str) -> Result<Self, QueryError> {
        parse_number_list(spec, "season", &mut self.query.seasons)?;
        Ok(self)
    }

    /// Add a single season.
    pub fn season(mut self, season: u32) -> Self {
        self.query.seasons.insert(season);
        self
    }

    /// Add episode numbers from a list spec such as `"5"` or `"1-4,12"`.
    ///
    /// # Errors
    /// `QueryError::InvalidNumber` / `QueryError::InvalidRange` when an
    /// entry is not a non-negative integer or a forward range.
    pub fn episodes(mut self, spec: &str) -> Result<Self, QueryError> {
        parse_number_list(spec, "episode", &mut self.query.episodes)?;
        Ok(self)
    }

    /// Add a single episode number.
    pub fn episode(mut self, number: u32) -> Self {
        self.query.episodes.insert(number);
        self
    }

    /// Add a resolution token, or reset the criterion with [`ANY_TOKEN`].
    ///
    /// # Errors
    /// `QueryError::UnknownResolution` for tokens that are neither a
    /// known resolution nor the wildcard.
    pub fn resolution(mut self, token: &str) -> Result<Self, QueryError> {
        let trimmed = token.trim();
        if trimmed.eq_ignore_ascii_case(ANY_TOKEN) {
            self.query.resolutions.clear();
            return Ok(self);
        }
        match Resolution::from_token(trimmed) {
            Resolution::Unknown => Err(QueryError::UnknownResolution {
                value: trimmed.to_string(),
            }),
            resolution => {
                self.query.resolutions.insert(resolution);
                Ok(self)
            }
        }
    }

    /// Add a file-type token, or reset the criterion with [`ANY_TOKEN`].
    ///
    /// Tokens are stored lower-cased; matching is case-insensitive.
    pub fn extension(mut self, token: &str) -> Self {
        let trimmed = token.trim();
        if trimmed.eq_ignore_ascii_case(ANY_TOKEN) {
            self.query.extensions.clear();
        } else if !trimmed.is_empty() {
            self.query
                .extensions
                .insert(trimmed.to_ascii_lowercase());
        }
        self
    }

    /// Add a release group to the whitelist.
    pub fn group(mut self, name: &str) -> Self {
        let trimmed = name.trim();
        if !trimmed.is_empty() {
            self.query.groups.insert(trimmed.to_string());
        }
        self
    }

    /// Restrict results to the latest episode per scope.
    pub fn match_latest(mut self, latest: bool) -> Self {
        self.query.match_latest = latest;
        self
    }

    /// Keep every matching release variant instead of one per identity.
    pub fn allow_duplicates(mut self, allow: bool) -> Self {
        self.query.allow_duplicates = allow;
        self
    }

    /// Finish building. All validation happened per transformation, so
    /// this cannot fail.
    pub fn build(self) -> Query {
        self.query
    }
}

/// Parse a comma-separated list of numbers and forward ranges into `out`.
fn parse_number_list(
    spec: &str,
    criterion: &'static str,
    out: &mut BTreeSet<u32>,
) -> Result<(), QueryError> {
    for entry in spec.split(',') {
        let entry = entry.trim();
        if entry.is_empty() {
            continue;
        }
        match entry.split_once('-') {
            Some((start, end)) => {
                let start: u32 = parse_entry(start.trim(), criterion)?;
                let end: u32 = parse_entry(end.trim(), criterion)?;
                if start > end {
                    return Err(QueryError::InvalidRange {
                        criterion,
                        value: entry.to_string(),
                    });
                }
                out.extend(start..=end);
            }
            None => {
                out.insert(parse_entry(entry, criterion)?);
            }
        }
    }
    Ok(())
}

fn parse_entry(token: &str, criterion: &'static str) -> Result<u32, QueryError> {
    token.parse().map_err(|_| QueryError::InvalidNumber {
        criterion,
        value: token.to_string(),
    })
}
