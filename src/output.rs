//! Plain-text rendering for CLI output

use unicode_width::UnicodeWidthStr;

use crate::models::{Character, Episode};

/// Column width for episode names
const NAME_WIDTH: usize = 36;

/// One line of the episode table
pub struct EpisodeRow<'a> {
    /// Episode to show
    pub episode: &'a Episode,
    /// Whether it is a favourite
    pub favourite: bool,
    /// Resolved thumbnail URL, if any
    pub image_url: Option<&'a str>,
}

/// Pad or truncate `text` to exactly `width` display columns
pub fn fit(text: &str, width: usize) -> String {
    if text.width() <= width {
        let pad = width - text.width();
        return format!("{text}{}", " ".repeat(pad));
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    used += 1;
    out.push_str(&" ".repeat(width.saturating_sub(used)));
    out
}

/// Render one episode line
pub fn episode_line(row: &EpisodeRow<'_>) -> String {
    let marker = if row.favourite { "♥" } else { " " };
    let aired = row
        .episode
        .aired_on()
        .map_or_else(|| row.episode.air_date.clone(), |d| d.format("%Y-%m-%d").to_string());

    let mut line = format!(
        "{marker} {:>3}  {:<8} {} {:<10}",
        row.episode.id,
        row.episode.episode_code,
        fit(&row.episode.name, NAME_WIDTH),
        aired
    );
    if let Some(url) = row.image_url {
        line.push_str("  ");
        line.push_str(url);
    }
    line.trim_end().to_string()
}

/// Render a character as a name line followed by detail rows
pub fn character_block(character: &Character) -> String {
    let mut out = format!("{}\n", character.display_name());
    out.push_str(&"─".repeat(character.display_name().width().max(12)));
    out.push('\n');
    for detail in character.details() {
        out.push_str(&format!("  {:<9} {}\n", detail.title, detail.value));
    }
    if let Some(image) = &character.image_url {
        out.push_str(&format!("  {:<9} {}\n", "Image", image));
    }
    out
}
