use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::super::formatting::truncate_to_width;
use super::super::theme::get_theme_colors;
use super::centered_rect;
use crate::app::App;
use crate::components::ImageGallery;

fn dialog<'a>(lines: Vec<Line<'a>>, title: &'a str, border: Color, background: Color) -> Paragraph<'a> {
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border).add_modifier(Modifier::BOLD))
                .title(title)
                .title_alignment(Alignment::Center)
                .style(Style::default().bg(background)),
        )
}

/// Blocking error dialog; nothing else takes input until it is dismissed
pub fn render_alert_modal(frame: &mut Frame, app: &App, message: &str, area: Rect) {
    let theme = get_theme_colors(app);
    let modal_area = centered_rect(60, 30, area);
    frame.render_widget(Clear, modal_area);

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(message.to_string(), Style::default().fg(theme.text))),
        Line::from(""),
    ];
    if app.alerts.len() > 1 {
        lines.push(Line::from(Span::styled(
            format!("({} more)", app.alerts.len() - 1),
            Style::default().fg(theme.text_dim),
        )));
    }
    lines.push(Line::from(Span::styled(
        "Enter/Esc: OK",
        Style::default().fg(theme.text_dim),
    )));

    frame.render_widget(dialog(lines, " Error ", theme.error, theme.background), modal_area);
}

pub fn render_logout_confirmation(frame: &mut Frame, app: &App, area: Rect) {
    let theme = get_theme_colors(app);
    let modal_area = centered_rect(50, 25, area);
    frame.render_widget(Clear, modal_area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Log out and forget the stored credential?",
            Style::default().fg(theme.text),
        )),
        Line::from(""),
        Line::from(Span::styled("y: Log out | n/Esc: Cancel", Style::default().fg(theme.text_dim))),
    ];
    frame.render_widget(dialog(lines, " Logout ", theme.warning, theme.background), modal_area);
}

pub fn render_delete_image_confirmation(
    frame: &mut Frame,
    app: &App,
    gallery: &ImageGallery,
    image_id: &str,
    area: Rect,
) {
    let theme = get_theme_colors(app);
    let modal_area = centered_rect(50, 25, area);
    frame.render_widget(Clear, modal_area);

    let name = gallery
        .images
        .iter()
        .find(|image| image.id == image_id)
        .map(|image| image.name.as_str())
        .unwrap_or(image_id);
    let width = modal_area.width.saturating_sub(4) as usize;

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled("Delete this image?", Style::default().fg(theme.text))),
        Line::from(Span::styled(
            truncate_to_width(name, width),
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled("y: Delete | n/Esc: Cancel", Style::default().fg(theme.text_dim))),
    ];
    frame.render_widget(dialog(lines, " Delete Image ", theme.error, theme.background), modal_area);
}
