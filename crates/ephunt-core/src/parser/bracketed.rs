//! Bracketed-convention parser
//!
//! Handles titles in the fansub style `[Group] Series Name - NN
//! [Resolution][ext]`: group in a leading bracket tag, episode number
//! after a spaced dash, release attributes in trailing bracket tags.

use crate::types::{Episode, Resolution};

use super::{collapse_whitespace, is_known_extension, split_trailing_extension};

/// Try to parse a title under the bracketed convention.
///
/// The episode number after a spaced dash is the only required token;
/// the leading group tag and every trailing bracket tag are optional.
/// Trailing tags that are neither a resolution nor a known file type
/// (checksums, language markers) are ignored.
pub(crate) fn parse(raw_title: &str) -> Option<Episode> {
    let (stem, file_extension) = split_trailing_extension(raw_title);
    let mut rest = stem.trim();

    // Leading [Group] tag
    let mut group = None;
    let re_leading = regex_lite::Regex::new(r"^\[([^\[\]]+)\]\s*").ok()?;
    if let Some(caps) = re_leading.captures(rest) {
        group = Some(caps.get(1)?.as_str().trim().to_string());
        rest = &rest[caps.get(0)?.end()..];
    }

    // Trailing bracket tags, innermost last: [720p], [mkv], [A1B2C3D4], ...
    let mut resolution = Resolution::Unknown;
    let mut extension = file_extension.unwrap_or_default();
    let re_trailing = regex_lite::Regex::new(r"\[([^\[\]]*)\]\s*$").ok()?;
    while let Some(caps) = re_trailing.captures(rest) {
        let tag = caps.get(1)?.as_str().trim();
        if resolution == Resolution::Unknown && Resolution::from_token(tag) != Resolution::Unknown {
            resolution = Resolution::from_token(tag);
        } else if extension.is_empty() && is_known_extension(tag) {
            extension = tag.to_ascii_lowercase();
        }
        rest = rest[..caps.get(0)?.start()].trim_end();
    }

    // Mandatory: episode number after a spaced dash, optional vN revision
    let re_episode = regex_lite::Regex::new(r"^(?P<series>.+?)\s+-\s+(?P<number>\d+)(?:[vV]\d+)?$").ok()?;
    let caps = re_episode.captures(rest)?;
    let number: u32 = caps.name("number")?.as_str().parse().ok()?;
    let mut series = collapse_whitespace(caps.name("series")?.as_str());
    if series.is_empty() {
        return None;
    }

    // Optional trailing season marker in the series part: "Show S2 - 05"
    let mut season = None;
    let re_season = regex_lite::Regex::new(r"(?i)\s+S(\d{1,2})$").ok()?;
    let marker = re_season
        .captures(&series)
        .and_then(|scaps| Some((scaps.get(1)?.as_str().parse().ok()?, scaps.get(0)?.start())));
    if let Some((parsed, end)) = marker {
        season = Some(parsed);
        series.truncate(end);
    }

    Some(Episode {
        series,
        season,
        number,
        group,
        resolution,
        extension,
        link: String::new(),
    })
}
