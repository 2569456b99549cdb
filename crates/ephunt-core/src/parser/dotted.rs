//! Dotted-convention parser
//!
//! Handles titles in the scene style `Series.Name.SxxEyy.Resolution-Group`:
//! season and episode in an `SxxEyy` token, resolution as a free token,
//! group as a trailing hyphen suffix, dots (or underscores) as separators.

use crate::types::{Episode, Resolution};

use super::{collapse_whitespace, split_trailing_extension};

/// Try to parse a title under the dotted convention.
///
/// The `SxxEyy` token is the required anchor; everything after it is an
/// optional attribute tail. The series part keeps its original casing
/// with dots and underscores folded to spaces.
pub(crate) fn parse(raw_title: &str) -> Option<Episode> {
    let (stem, file_extension) = split_trailing_extension(raw_title);

    let re_code = regex_lite::Regex::new(
        r"(?i)^(?P<series>.+?)[.\s_]+S(?P<season>\d{1,2})E(?P<number>\d{1,3})(?P<rest>.*)$",
    )
    .ok()?;
    let caps = re_code.captures(stem.trim())?;

    let season: u32 = caps.name("season")?.as_str().parse().ok()?;
    let number: u32 = caps.name("number")?.as_str().parse().ok()?;
    let rest = caps.name("rest")?.as_str();

    let series = collapse_whitespace(&caps.name("series")?.as_str().replace(['.', '_'], " "));
    if series.is_empty() {
        return None;
    }

    // Trailing -Group suffix on the attribute tail
    let mut group = None;
    let mut attrs = rest;
    let re_group = regex_lite::Regex::new(r"-(?P<group>[A-Za-z0-9]+)\s*$").ok()?;
    if let Some(gcaps) = re_group.captures(rest) {
        group = Some(gcaps.name("group")?.as_str().to_string());
        attrs = &rest[..gcaps.get(0)?.start()];
    }

    // Resolution as a free token anywhere in the tail; underscores are
    // separators too, so fold them before the word-boundary match
    let mut resolution = Resolution::Unknown;
    let attrs = attrs.replace('_', ".");
    let re_res = regex_lite::Regex::new(r"(?i)\b(\d{3,4}p)\b").ok()?;
    if let Some(rcaps) = re_res.captures(&attrs) {
        resolution = Resolution::from_token(rcaps.get(1)?.as_str());
    }

    Some(Episode {
        series,
        season: Some(season),
        number,
        group,
        resolution,
        extension: file_extension.unwrap_or_default(),
        link: String::new(),
    })
}
