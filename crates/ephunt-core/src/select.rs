//! Selection engine
//!
//! Evaluates a [`Query`] against a pool of parsed episodes: attribute
//! filter, then the latest-episode refinement, then duplicate
//! suppression, then a deterministic presentation order. A pure,
//! synchronous computation over an immutable pool snapshot — it never
//! mutates its inputs and never errors; an empty result is a valid
//! outcome, not a failure.

use std::cmp::Reverse;
use std::collections::BTreeMap;

use crate::query::Query;
use crate::types::{Episode, EpisodeKey, Resolution};

/// Select the episodes matching `query` from `pool`.
///
/// Deterministic for a given pool and query: repeated runs yield the
/// same sequence, and the chosen representative for a duplicated
/// identity is always the same one.
///
/// # Arguments
/// * `pool` - Parsed episodes from all sources, duplicates expected
/// * `query` - Declarative match criteria
///
/// # Returns
/// Matching episodes ordered by `(series, season, episode)`; ties
/// (possible only with duplicates allowed) follow the representative
/// order — resolution descending, group ascending, extension ascending.
pub fn select(pool: &[Episode], query: &Query) -> Vec<Episode> {
    let mut kept: Vec<&Episode> = pool
        .iter()
        .filter(|episode| matches_attributes(episode, query))
        .collect();

    // "Latest" refines the attribute-filtered candidates, it does not
    // replace the other criteria.
    if query.match_latest {
        kept = latest_only(kept, !query.seasons.is_empty());
    }

    if !query.allow_duplicates {
        let mut best: BTreeMap<EpisodeKey, &Episode> = BTreeMap::new();
        for episode in kept {
            best.entry(episode.key())
                .and_modify(|current| {
                    if variant_rank(episode) < variant_rank(current) {
                        *current = episode;
                    }
                })
                .or_insert(episode);
        }
        kept = best.into_values().collect();
    }

    kept.sort_by(|a, b| {
        a.key()
            .cmp(&b.key())
            .then_with(|| variant_rank(a).cmp(&variant_rank(b)))
    });
    kept.into_iter().cloned().collect()
}

/// Check an episode against every attribute criterion of the query.
///
/// Empty criterion sets are unconstrained. Extensions compare
/// case-insensitively; an episode advertising no group passes a group
/// whitelist.
fn matches_attributes(episode: &Episode, query: &Query) -> bool {
    let season = episode.season.unwrap_or(1);
    if !query.seasons.is_empty() && !query.seasons.contains(&season) {
        return false;
    }
    if !query.episodes.is_empty() && !query.episodes.contains(&episode.number) {
        return false;
    }
    if !query.resolutions.is_empty() && !query.resolutions.contains(&episode.resolution) {
        return false;
    }
    if !query.extensions.is_empty()
        && !query
            .extensions
            .contains(&episode.extension.to_ascii_lowercase())
    {
        return false;
    }
    if !query.groups.is_empty() {
        if let Some(group) = &episode.group {
            if !query.groups.contains(group) {
                return false;
            }
        }
    }
    true
}

/// Keep only the highest-numbered episode(s) within each scope.
///
/// With a season restriction the scope is the `(series, season)` pair;
/// without one it is the series, compared by `(season, number)` so a
/// higher season always outranks any episode of a lower season. All
/// release variants tied at the maximum survive.
fn latest_only(kept: Vec<&Episode>, per_season: bool) -> Vec<&Episode> {
    if per_season {
        let mut max: BTreeMap<(String, u32), u32> = BTreeMap::new();
        for episode in &kept {
            let key = episode.key();
            max.entry((key.series, key.season))
                .and_modify(|current| *current = (*current).max(key.number))
                .or_insert(key.number);
        }
        kept.into_iter()
            .filter(|episode| {
                let key = episode.key();
                max.get(&(key.series, key.season)) == Some(&key.number)
            })
            .collect()
    } else {
        let mut max: BTreeMap<String, (u32, u32)> = BTreeMap::new();
        for episode in &kept {
            let key = episode.key();
            let pair = (key.season, key.number);
            max.entry(key.series)
                .and_modify(|current| *current = (*current).max(pair))
                .or_insert(pair);
        }
        kept.into_iter()
            .filter(|episode| {
                let key = episode.key();
                max.get(&key.series) == Some(&(key.season, key.number))
            })
            .collect()
    }
}

/// Total order over release variants sharing an identity: resolution
/// descending, then group ascending (untagged first), then extension
/// ascending. The smallest-ranked variant is the representative.
fn variant_rank(episode: &Episode) -> (Reverse<Resolution>, Option<&str>, &str) {
    (
        Reverse(episode.resolution),
        episode.group.as_deref(),
        &episode.extension,
    )
}
