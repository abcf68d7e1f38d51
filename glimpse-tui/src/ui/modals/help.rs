use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::super::theme::get_theme_colors;
use super::centered_rect;
use crate::app::{App, Screen};

/// Render help modal
pub fn render_help_modal(frame: &mut Frame, app: &App, area: Rect) {
    let theme = get_theme_colors(app);

    // Create centered modal area (80% width, 85% height)
    let modal_area = centered_rect(80, 85, area);

    frame.render_widget(Clear, modal_area);

    let mut lines = vec![Line::from("")];

    for (category, items) in get_shortcuts_for_context(app) {
        lines.push(Line::from(Span::styled(
            category,
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(""));

        for (key, description) in items {
            lines.push(Line::from(vec![
                Span::styled(format!("  {:<15}", key), Style::default().fg(theme.success)),
                Span::styled(description, Style::default().fg(theme.text)),
            ]));
        }

        lines.push(Line::from(""));
    }

    let help_content = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.accent).add_modifier(Modifier::BOLD))
                .title(" Keyboard Shortcuts ")
                .title_alignment(Alignment::Center)
                .style(Style::default().bg(theme.background)),
        )
        .wrap(ratatui::widgets::Wrap { trim: false });

    frame.render_widget(help_content, modal_area);
}

type Shortcuts = Vec<(&'static str, Vec<(&'static str, &'static str)>)>;

/// Shortcut groups for the screen currently mounted
pub fn get_shortcuts_for_context(app: &App) -> Shortcuts {
    let mut groups: Shortcuts = vec![(
        "Global",
        vec![
            ("Tab / Shift+Tab", "Next / previous link"),
            ("1-4", "Jump to link"),
            ("r", "Refresh"),
            ("t", "Toggle dark mode"),
            ("Shift+L", "Log out"),
            ("?", "Toggle help"),
            ("q / Esc", "Quit or close"),
        ],
    )];

    match &app.screen {
        Screen::Profile(_) => {
            groups.push((
                "Posts",
                vec![
                    ("j / k", "Move selection"),
                    ("l", "Like / unlike"),
                    ("Space / x", "Expand / collapse"),
                    ("Enter", "Open post"),
                    ("n", "New post"),
                    ("e", "Edit your post"),
                    ("d", "Delete post"),
                ],
            ));
            groups.push((
                "Editing",
                vec![
                    ("Ctrl+S", "Submit"),
                    ("Ctrl+D", "Delete (edit only)"),
                    ("Esc", "Cancel"),
                ],
            ));
        }
        Screen::Images(_) => groups.push((
            "Images",
            vec![
                ("j / k", "Move selection"),
                ("d", "Delete image"),
            ],
        )),
        Screen::About => {}
    }

    groups
}
