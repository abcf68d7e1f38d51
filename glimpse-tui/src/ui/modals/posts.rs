use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use tui_textarea::TextArea;

use super::super::formatting::{format_byte_size, format_post_date, truncate_to_width};
use super::super::theme::get_theme_colors;
use super::centered_rect;
use crate::app::App;
use crate::components::profile_page::PostForm;
use crate::components::{PostCard, ProfilePage};

/// Shared editor layout: text area on top, one line of instructions below
fn render_editor(
    frame: &mut Frame,
    app: &App,
    title: &str,
    editor: &TextArea<'static>,
    instructions: &str,
    area: Rect,
) {
    let theme = get_theme_colors(app);

    let modal_area = centered_rect(70, 50, area);
    frame.render_widget(Clear, modal_area);

    let outer = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent).add_modifier(Modifier::BOLD))
        .title(format!(" {} ", title))
        .title_alignment(Alignment::Center)
        .style(Style::default().bg(theme.background));
    let inner = outer.inner(modal_area);
    frame.render_widget(outer, modal_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(3)])
        .split(inner);

    let content_block = Block::default()
        .borders(Borders::ALL)
        .title("Content")
        .border_style(Style::default().fg(theme.primary));
    let content_area = content_block.inner(chunks[0]);
    frame.render_widget(content_block, chunks[0]);
    frame.render_widget(editor, content_area);

    let footer = Paragraph::new(instructions.to_string())
        .style(Style::default().fg(theme.text))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.border)),
        );
    frame.render_widget(footer, chunks[1]);
}

pub fn render_post_form_modal(frame: &mut Frame, app: &App, form: &PostForm, area: Rect) {
    let instructions = if form.submitting {
        "Posting..."
    } else {
        "Ctrl+S: Post | Esc: Cancel"
    };
    render_editor(frame, app, "New Post", &form.editor, instructions, area);
}

pub fn render_edit_modal(frame: &mut Frame, app: &App, card: &PostCard, area: Rect) {
    if let Some(editor) = &card.editor {
        render_editor(
            frame,
            app,
            "Edit Post",
            editor,
            "Ctrl+S: Save | Ctrl+D: Delete | Esc: Cancel",
            area,
        );
    }
}

pub fn render_delete_post_confirmation(
    frame: &mut Frame,
    app: &App,
    page: &ProfilePage,
    post_id: &str,
    area: Rect,
) {
    let theme = get_theme_colors(app);

    let modal_area = centered_rect(50, 25, area);
    frame.render_widget(Clear, modal_area);

    let preview = page
        .cards
        .iter()
        .find(|card| card.post.id == post_id)
        .map(|card| card.post.content.lines().next().unwrap_or_default().to_string())
        .unwrap_or_default();
    let width = modal_area.width.saturating_sub(4) as usize;

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Are you sure you want to delete this post?",
            Style::default().fg(theme.text),
        )),
        Line::from(Span::styled(
            truncate_to_width(&preview, width),
            Style::default().fg(theme.text_dim).add_modifier(Modifier::ITALIC),
        )),
        Line::from(""),
        Line::from(Span::styled("y: Delete | n/Esc: Cancel", Style::default().fg(theme.text_dim))),
    ];

    let modal = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.error).add_modifier(Modifier::BOLD))
            .title(" Delete Post ")
            .title_alignment(Alignment::Center)
            .style(Style::default().bg(theme.background)),
    );
    frame.render_widget(modal, modal_area);
}

/// Full post with its counts and attachment
pub fn render_post_detail_modal(frame: &mut Frame, app: &App, card: &PostCard, area: Rect) {
    let theme = get_theme_colors(app);

    let modal_area = centered_rect(80, 70, area);
    frame.render_widget(Clear, modal_area);

    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                format!("@{}", card.post.username),
                Style::default().fg(theme.primary).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {}", format_post_date(&card.post.date.with_timezone(&chrono::Local))),
                Style::default().fg(theme.text_dim),
            ),
        ]),
        Line::from(""),
    ];
    let display = card.content();
    let mut body: Vec<Line> = display
        .text
        .lines()
        .map(|line| Line::from(Span::styled(line.to_string(), Style::default().fg(theme.text))))
        .collect();
    if let Some(affordance) = display.affordance {
        let icon = Span::styled(
            affordance.icon(),
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        );
        match body.last_mut() {
            Some(last) => last.spans.push(icon),
            None => body.push(Line::from(icon)),
        }
    }
    lines.extend(body);
    lines.push(Line::from(""));

    if let Some(image) = &card.image {
        lines.push(Line::from(Span::styled(
            format!("Image: {} ({})", image.content_type, format_byte_size(image.byte_len)),
            Style::default().fg(theme.accent),
        )));
        lines.push(Line::from(Span::styled(
            truncate_to_width(&image.data_uri, modal_area.width.saturating_sub(4) as usize),
            Style::default().fg(theme.text_dim),
        )));
        lines.push(Line::from(""));
    }

    let likes = card
        .like_count
        .map(|count| format!("Likes: {}", count))
        .unwrap_or_default();
    lines.push(Line::from(vec![
        Span::styled(
            format!("{}  ", card.like_state.action_label()),
            Style::default().fg(theme.liked).add_modifier(Modifier::BOLD),
        ),
        Span::styled(likes, Style::default().fg(theme.text)),
        Span::styled(
            format!("   Comment ({})", card.comment_label()),
            Style::default().fg(theme.text),
        ),
    ]));

    let modal = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent))
            .title(" Post ")
            .title_bottom(Line::from(" l: Like/Unlike | Space: Expand/Collapse | Esc: Close ").centered())
            .style(Style::default().bg(theme.background)),
    );
    frame.render_widget(modal, modal_area);
}
