//! Result rendering
//!
//! Renders a selected episode back to a display string in either of the
//! naming conventions the parser understands. Purely presentational:
//! consumes the immutable episode fields and plays no part in matching.

use serde::{Deserialize, Serialize};

use crate::types::Episode;

/// Display convention for rendered episodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RenderStyle {
    /// `[Group] Series Name - NN [720p][mkv]`
    #[default]
    Bracketed,
    /// `Series.Name.S01E05.720p-Group.mkv`
    Dotted,
}

/// Render an episode in the given style.
///
/// Absent fields simply leave their slot out; the episode number is
/// zero-padded to two digits in both styles.
///
/// # Examples
/// ```
/// use ephunt_core::render::{render, RenderStyle};
/// use ephunt_core::parser::parse;
///
/// let episode = parse("[Fans] Show Name - 05 [720p]").unwrap();
/// assert_eq!(render(&episode, RenderStyle::Bracketed), "[Fans] Show Name - 05 [720p]");
/// assert_eq!(render(&episode, RenderStyle::Dotted), "Show.Name.S01E05.720p-Fans");
/// ```
pub fn render(episode: &Episode, style: RenderStyle) -> String {
    match style {
        RenderStyle::Bracketed => render_bracketed(episode),
        RenderStyle::Dotted => render_dotted(episode),
    }
}

fn render_bracketed(episode: &Episode) -> String {
    let mut out = String::new();
    if let Some(group) = &episode.group {
        out.push_str(&format!("[{}] ", group));
    }
    out.push_str(&episode.series);
    // The bracketed convention has no season slot; restate an explicit
    // non-default season as a series marker
    if let Some(season) = episode.season {
        if season != 1 {
            out.push_str(&format!(" S{}", season));
        }
    }
    out.push_str(&format!(" - {:02}", episode.number));
    if let Some(token) = episode.resolution.as_token() {
        out.push_str(&format!(" [{}]", token));
    }
    if !episode.extension.is_empty() {
        out.push_str(&format!("[{}]", episode.extension));
    }
    out
}

fn render_dotted(episode: &Episode) -> String {
    let mut out = episode.series.split_whitespace().collect::<Vec<_>>().join(".");
    out.push_str(&format!(
        ".S{:02}E{:02}",
        episode.season.unwrap_or(1),
        episode.number
    ));
    if let Some(token) = episode.resolution.as_token() {
        out.push_str(&format!(".{}", token));
    }
    if let Some(group) = &episode.group {
        out.push_str(&format!("-{}", group));
    }
    if !episode.extension.is_empty() {
        out.push_str(&format!(".{}", episode.extension));
    }
    out
}
