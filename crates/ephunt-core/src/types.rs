//! Data types for the episode search engine
//!
//! This module contains the core data structures shared by the parser,
//! the selection engine and the source adapters. All types implement
//! Serialize and Deserialize for JSON output.

use serde::{Deserialize, Serialize};

/// Video resolution advertised by a release title.
///
/// The variant order is meaningful: `Unknown` ranks below every concrete
/// resolution, and higher resolutions rank higher, so "best resolution
/// first" tie-breaks can lean on `Ord` directly.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum Resolution {
    /// No recognizable resolution token in the title
    #[default]
    Unknown,
    /// 480p (SD)
    R480p,
    /// 720p (HD)
    R720p,
    /// 1080p (Full HD)
    R1080p,
}

impl Resolution {
    /// Parse a resolution from a literal token.
    ///
    /// Recognizes `480p`, `720p` and `1080p` case-insensitively; any other
    /// token maps to `Unknown`.
    ///
    /// # Examples
    /// ```
    /// use ephunt_core::types::Resolution;
    ///
    /// assert_eq!(Resolution::from_token("1080p"), Resolution::R1080p);
    /// assert_eq!(Resolution::from_token("720P"), Resolution::R720p);
    /// assert_eq!(Resolution::from_token("4K"), Resolution::Unknown);
    /// ```
    pub fn from_token(token: &str) -> Self {
        match token.to_ascii_lowercase().as_str() {
            "480p" => Resolution::R480p,
            "720p" => Resolution::R720p,
            "1080p" => Resolution::R1080p,
            _ => Resolution::Unknown,
        }
    }

    /// The literal token for this resolution, or `None` for `Unknown`.
    pub fn as_token(&self) -> Option<&'static str> {
        match self {
            Resolution::Unknown => None,
            Resolution::R480p => Some("480p"),
            Resolution::R720p => Some("720p"),
            Resolution::R1080p => Some("1080p"),
        }
    }
}

/// One identifiable episode extracted from a catalog title.
///
/// Episodes are immutable once parsed; they live for the duration of a
/// single search invocation. Matching identity ignores the release
/// attributes (group, resolution, extension) — see [`Episode::key`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode {
    /// Series title as written in the source, separators collapsed
    pub series: String,
    /// Season number, if the title encoded one (identity defaults to 1)
    pub season: Option<u32>,
    /// Episode number within the season
    pub number: u32,
    /// Release group / publisher tag, if the title encoded one
    pub group: Option<String>,
    /// Advertised resolution
    pub resolution: Resolution,
    /// Lower-cased file type token ("mkv", "torrent", ...); empty if undetermined
    pub extension: String,
    /// Opaque locator used only by the download stage, never by matching
    pub link: String,
}

impl Episode {
    /// Derive the identity key for this episode.
    ///
    /// Two episodes are "the same episode" iff their keys are equal,
    /// regardless of group, resolution or extension.
    pub fn key(&self) -> EpisodeKey {
        EpisodeKey {
            series: normalize_series(&self.series),
            season: self.season.unwrap_or(1),
            number: self.number,
        }
    }
}

/// Identity key: `(normalized series, season-or-1, episode number)`.
///
/// The series component is case-folded and whitespace-normalized so the
/// same show advertised with different casing or spacing compares equal.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EpisodeKey {
    /// Normalized series title
    pub series: String,
    /// Season number, absent seasons folded to 1
    pub season: u32,
    /// Episode number
    pub number: u32,
}

/// Normalize a series title for identity comparison.
///
/// Folds case and collapses runs of whitespace to a single space.
pub fn normalize_series(name: &str) -> String {
    name.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Raw `(title, link)` candidate yielded by a source adapter, before parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCandidate {
    /// Freeform catalog entry title
    pub title: String,
    /// Locator for the download stage
    pub link: String,
}
