use chrono::{DateTime, Datelike, TimeZone};
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};

use super::theme::ThemeColors;

// Layout constants
pub const BORDER_PADDING: u16 = 4; // Total horizontal padding from borders (2 per side)

/// Post date as "March 3rd 2024, 4:05 PM"
pub fn format_post_date<Tz>(date: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let day = date.day();
    format!(
        "{} {}{} {}, {}",
        date.format("%B"),
        day,
        ordinal_suffix(day),
        date.year(),
        date.format("%-I:%M %p")
    )
}

fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

/// Human-readable payload size
pub fn format_byte_size(bytes: usize) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;

    let size = bytes as f64;
    if size >= MB {
        format!("{:.1} MB", size / MB)
    } else if size >= KB {
        format!("{:.1} KB", size / KB)
    } else {
        format!("{} B", bytes)
    }
}

/// Wrap post content to `max_width`, highlighting @mentions and #tags
pub fn format_post_content_with_width(
    content: &str,
    is_selected: bool,
    theme: &ThemeColors,
    max_width: usize,
) -> Vec<Line<'static>> {
    let mut lines = vec![];
    let wrap_width = max_width.saturating_sub(4).max(1);

    for line in content.lines() {
        for wrapped_line in textwrap::wrap(line, wrap_width) {
            let mut spans = vec![Span::raw("  ")];
            for (i, word) in wrapped_line.split(' ').enumerate() {
                if i > 0 {
                    spans.push(Span::raw(" "));
                }
                push_styled_word(&mut spans, word, is_selected, theme);
            }
            lines.push(Line::from(spans));
        }
    }

    lines
}

fn push_styled_word(spans: &mut Vec<Span<'static>>, word: &str, is_selected: bool, theme: &ThemeColors) {
    let style = if word.starts_with('#') || word.starts_with('@') {
        Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
    } else if is_selected {
        Style::default().fg(theme.text).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.text)
    };
    spans.push(Span::styled(word.to_string(), style));
}

/// Shorten a single line to `max_width` display columns
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

    if text.width() <= max_width {
        return text.to_string();
    }

    let mut out = String::new();
    let mut width = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if width + w + 1 > max_width {
            break;
        }
        width += w;
        out.push(ch);
    }
    out.push('…');
    out
}
