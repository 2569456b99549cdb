//! Release-title parsers
//!
//! Turns a freeform catalog entry title into a structured [`Episode`]
//! under competing naming conventions:
//! - `bracketed`: `[Group] Series Name - NN [Resolution][ext]`
//! - `dotted`: `Series.Name.SxxEyy.Resolution-Group.ext`
//!
//! Conventions are attempted in that fixed order; the first one able to
//! extract an episode number wins. The episode number is the only
//! mandatory field — everything else falls back to its absent value.

pub mod bracketed;
pub mod dotted;

use crate::error::ParseError;
use crate::types::{Episode, RawCandidate};

/// File type tokens accepted as a trailing filename extension.
pub(crate) const KNOWN_EXTENSIONS: [&str; 6] = ["mkv", "mp4", "avi", "webm", "ts", "torrent"];

/// Check whether a token is a recognized file type.
pub(crate) fn is_known_extension(token: &str) -> bool {
    KNOWN_EXTENSIONS
        .iter()
        .any(|ext| token.eq_ignore_ascii_case(ext))
}

/// Split a trailing `.ext` filename extension off a title.
///
/// Only tokens from [`KNOWN_EXTENSIONS`] count; anything else stays part
/// of the title so dotted series names are not mistaken for filenames.
pub(crate) fn split_trailing_extension(title: &str) -> (&str, Option<String>) {
    let trimmed = title.trim_end();
    if let Some((stem, ext)) = trimmed.rsplit_once('.') {
        if is_known_extension(ext) {
            return (stem, Some(ext.to_ascii_lowercase()));
        }
    }
    (trimmed, None)
}

/// Collapse runs of whitespace to single spaces, preserving case.
pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Parse a raw catalog title into a structured episode.
///
/// Tries the bracketed convention first, then the dotted convention.
/// Fields the matched convention does not encode are left absent
/// (season → implicit 1 for identity, group → none, resolution →
/// `Unknown`, extension → empty); only a missing episode number fails.
///
/// # Arguments
/// * `raw_title` - Freeform title as advertised by a catalog
///
/// # Returns
/// * `Ok(Episode)` with the extracted identity (link left empty)
/// * `Err(ParseError)` if no convention yields an episode number
///
/// # Examples
/// ```
/// use ephunt_core::parser::parse;
/// use ephunt_core::types::Resolution;
///
/// let episode = parse("[Fans] Show Name - 05 [720p]").unwrap();
/// assert_eq!(episode.series, "Show Name");
/// assert_eq!(episode.number, 5);
/// assert_eq!(episode.group.as_deref(), Some("Fans"));
/// assert_eq!(episode.resolution, Resolution::R720p);
/// ```
pub fn parse(raw_title: &str) -> Result<Episode, ParseError> {
    bracketed::parse(raw_title)
        .or_else(|| dotted::parse(raw_title))
        .ok_or_else(|| ParseError::new(raw_title))
}

/// Parse a raw candidate and attach its locator to the resulting episode.
pub fn parse_candidate(candidate: &RawCandidate) -> Result<Episode, ParseError> {
    parse(&candidate.title).map(|episode| Episode {
        link: candidate.link.clone(),
        ..episode
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Resolution;
    use proptest::prelude::*;

    #[test]
    fn test_parse_bracketed_convention() {
        let episode = parse("[Fans] Show Name - 05 [720p]").unwrap();
        assert_eq!(episode.series, "Show Name");
        assert_eq!(episode.season, None);
        assert_eq!(episode.key().season, 1);
        assert_eq!(episode.number, 5);
        assert_eq!(episode.group.as_deref(), Some("Fans"));
        assert_eq!(episode.resolution, Resolution::R720p);
    }

    #[test]
    fn test_parse_dotted_convention() {
        let episode = parse("Show.Name.S02E10.1080p-Fans").unwrap();
        assert_eq!(episode.series, "Show Name");
        assert_eq!(episode.season, Some(2));
        assert_eq!(episode.number, 10);
        assert_eq!(episode.group.as_deref(), Some("Fans"));
        assert_eq!(episode.resolution, Resolution::R1080p);
    }

    #[test]
    fn test_parse_no_episode_number_fails() {
        assert!(parse("Interview With The Author").is_err());
        assert!(parse("").is_err());
        assert!(parse("[Fans] Special [720p]").is_err());
    }

    #[test]
    fn test_parse_error_carries_title() {
        let error = parse("Not An Episode").unwrap_err();
        assert_eq!(error.title, "Not An Episode");
    }

    #[test]
    fn test_parse_leading_zeros() {
        let episode = parse("[Fans] Show Name - 07 [480p]").unwrap();
        assert_eq!(episode.number, 7);

        let episode = parse("Show.Name.S03E07").unwrap();
        assert_eq!(episode.season, Some(3));
        assert_eq!(episode.number, 7);
    }

    #[test]
    fn test_parse_candidate_attaches_link() {
        let candidate = RawCandidate {
            title: "[Fans] Show Name - 05 [720p]".to_string(),
            link: "https://example.org/t/42".to_string(),
        };
        let episode = parse_candidate(&candidate).unwrap();
        assert_eq!(episode.link, "https://example.org/t/42");
    }

    #[test]
    fn test_split_trailing_extension() {
        assert_eq!(
            split_trailing_extension("Show.Name.S01E01.mkv"),
            ("Show.Name.S01E01", Some("mkv".to_string()))
        );
        // Non-extension dot tokens stay in the title
        assert_eq!(
            split_trailing_extension("Show.Name.S01E01"),
            ("Show.Name.S01E01", None)
        );
    }

    proptest! {
        // The parser is total and deterministic: arbitrary input never
        // panics and repeated calls agree.
        #[test]
        fn parse_never_panics(title in ".*") {
            match (parse(&title), parse(&title)) {
                (Ok(a), Ok(b)) => prop_assert_eq!(a, b),
                (Err(a), Err(b)) => prop_assert_eq!(a.title, b.title),
                _ => prop_assert!(false, "parse is not deterministic"),
            }
        }

        // Any digit sequence after a spaced dash is recoverable.
        #[test]
        fn parse_recovers_bracketed_number(number in 0u32..1000) {
            let episode = parse(&format!("[Grp] Some Show - {number} [720p]")).unwrap();
            prop_assert_eq!(episode.number, number);
        }
    }
}
