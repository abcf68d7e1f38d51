use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use super::formatting::{
    format_byte_size, format_post_content_with_width, format_post_date, truncate_to_width, BORDER_PADDING,
};
use super::theme::{get_theme_colors, ThemeColors};
use crate::app::App;
use crate::components::{ImageGallery, PostCard, ProfilePage};
use crate::server_config::ServerConfigManager;

/// Navigation links across the top, with the signed-in user on the right
pub fn render_nav_bar(frame: &mut Frame, app: &App, area: Rect) {
    let theme = get_theme_colors(app);

    let mut spans = vec![Span::styled(
        " Glimpse ",
        Style::default().fg(theme.primary).add_modifier(Modifier::BOLD),
    )];
    for (i, link) in app.nav.links().iter().enumerate() {
        let style = if *link == app.nav.selected {
            Style::default()
                .fg(theme.success)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(theme.text_dim)
        };
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(format!("{} {}", i + 1, link.label()), style));
    }

    let user = match app.nav.username() {
        Some(username) => format!(" @{} ", username),
        None => " not signed in ".to_string(),
    };

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border))
            .title_top(Line::from(Span::styled(user, Style::default().fg(theme.accent))).right_aligned()),
    );
    frame.render_widget(header, area);
}

/// Status notice if one is showing, otherwise key hints and the server
pub fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let theme = get_theme_colors(app);

    frame.render_widget(Clear, area);

    let line = match &app.notice {
        Some(notice) => {
            let color = if notice.is_error { theme.error } else { theme.success };
            Line::from(Span::styled(notice.text.clone(), Style::default().fg(color)))
        }
        None => {
            let server = app.ctx.backend.base_url();
            Line::from(vec![
                Span::styled(
                    "Tab: Next | 1-4: Jump | r: Refresh | t: Theme | L: Logout | ?: Help | q: Quit",
                    Style::default().fg(theme.text_dim),
                ),
                Span::styled(
                    format!("  {} ({})", ServerConfigManager::describe(server), server),
                    Style::default().fg(theme.border),
                ),
            ])
        }
    };

    let footer = Paragraph::new(line)
        .style(Style::default().bg(theme.background))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.border)),
        );
    frame.render_widget(footer, area);
}

fn placeholder<'a>(theme: &ThemeColors, title: &'a str, text: String) -> Paragraph<'a> {
    Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(text, Style::default().fg(theme.text_dim))),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border))
            .title(title),
    )
}

pub fn render_profile_screen(frame: &mut Frame, app: &App, page: &ProfilePage, area: Rect) {
    let theme = get_theme_colors(app);

    let Some(user) = page.user() else {
        frame.render_widget(
            placeholder(&theme, " Profile ", "Sign in to see your profile".to_string()),
            area,
        );
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(0)])
        .split(area);

    let count = |value: Option<i64>| value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string());
    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            format!("@{}", user.username),
            Style::default().fg(theme.primary).add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled(count(page.followers), Style::default().fg(theme.text).add_modifier(Modifier::BOLD)),
            Span::styled(" followers  ", Style::default().fg(theme.text_dim)),
            Span::styled(count(page.following), Style::default().fg(theme.text).add_modifier(Modifier::BOLD)),
            Span::styled(" following  ", Style::default().fg(theme.text_dim)),
            Span::styled(
                format!("{} posts", page.cards.len()),
                Style::default().fg(theme.text_dim),
            ),
        ]),
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border))
            .title(" Profile "),
    );
    frame.render_widget(header, chunks[0]);

    if page.loading && page.cards.is_empty() {
        frame.render_widget(placeholder(&theme, " Posts ", "⟳ Loading posts...".to_string()), chunks[1]);
        return;
    }
    if page.cards.is_empty() {
        frame.render_widget(
            placeholder(&theme, " Posts ", "No posts yet. Press n to write one.".to_string()),
            chunks[1],
        );
        return;
    }

    let width = chunks[1].width.saturating_sub(BORDER_PADDING) as usize;
    let items: Vec<ListItem> = page
        .cards
        .iter()
        .enumerate()
        .map(|(i, card)| ListItem::new(card_lines(card, i == page.selected, &theme, width)))
        .collect();

    let mut state = ListState::default();
    state.select(Some(page.selected));

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.border))
                .title(" Posts "),
        )
        .highlight_style(Style::default().bg(theme.highlight_bg));
    frame.render_stateful_widget(list, chunks[1], &mut state);
}

/// Lines for one post card
pub fn card_lines(card: &PostCard, is_selected: bool, theme: &ThemeColors, width: usize) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(vec![
        Span::styled(
            format!("@{}", card.post.username),
            Style::default().fg(theme.primary).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  {}", format_post_date(&card.post.date.with_timezone(&chrono::Local))),
            Style::default().fg(theme.text_dim),
        ),
    ])];

    let display = card.content();
    let mut content = format_post_content_with_width(&display.text, is_selected, theme, width);
    if let Some(affordance) = display.affordance {
        let icon = Span::styled(affordance.icon(), Style::default().fg(theme.accent));
        match content.last_mut() {
            Some(last) => last.spans.push(icon),
            None => content.push(Line::from(icon)),
        }
    }
    lines.extend(content);

    if let Some(image) = &card.image {
        lines.push(Line::from(Span::styled(
            format!("  [image {} {}]", image.content_type, format_byte_size(image.byte_len)),
            Style::default().fg(theme.accent).add_modifier(Modifier::ITALIC),
        )));
    } else if card.post.image_id.is_some() {
        lines.push(Line::from(Span::styled(
            "  [loading image...]",
            Style::default().fg(theme.text_dim),
        )));
    }

    let heart = if card.like_state.is_liked() { "♥" } else { "♡" };
    let mut actions = vec![
        Span::styled(format!("  {} ", heart), Style::default().fg(theme.liked)),
        Span::styled(card.like_state.action_label(), Style::default().fg(theme.text)),
    ];
    if card.is_like_pending() {
        actions.push(Span::styled(" …", Style::default().fg(theme.text_dim)));
    }
    if let Some(likes) = card.like_count {
        actions.push(Span::styled(format!("   Likes: {}", likes), Style::default().fg(theme.text_dim)));
    }
    actions.push(Span::styled(
        format!("   Comment ({})", card.comment_label()),
        Style::default().fg(theme.text_dim),
    ));
    lines.push(Line::from(actions));
    lines.push(Line::from(""));

    lines
}

pub fn render_gallery_screen(frame: &mut Frame, app: &App, gallery: &ImageGallery, area: Rect) {
    let theme = get_theme_colors(app);

    if !gallery.is_authorized() {
        let unauthorized = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "Unauthorized",
                Style::default().fg(theme.error).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Sign in to view and manage images.",
                Style::default().fg(theme.text_dim),
            )),
            Line::from(Span::styled(
                "Restart with --token <credential> or set GLIMPSE_ACCESS_TOKEN.",
                Style::default().fg(theme.text_dim),
            )),
        ])
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.error))
                .title(" Images "),
        );
        frame.render_widget(unauthorized, area);
        return;
    }

    if gallery.loading {
        frame.render_widget(placeholder(&theme, " Images ", "⟳ Loading images...".to_string()), area);
        return;
    }
    if gallery.images.is_empty() {
        frame.render_widget(placeholder(&theme, " Images ", "No images uploaded".to_string()), area);
        return;
    }

    // Room left after borders, highlight symbol and indent
    let uri_width = area.width.saturating_sub(8) as usize;
    let items: Vec<ListItem> = gallery
        .images
        .iter()
        .enumerate()
        .map(|(index, image)| {
            let mut first = vec![Span::styled(
                image.name.clone(),
                Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
            )];
            if gallery.deleting.as_deref() == Some(image.id.as_str()) {
                first.push(Span::styled("  deleting...", Style::default().fg(theme.warning)));
            }
            let mut lines = vec![Line::from(first)];
            if !image.desc.is_empty() {
                lines.push(Line::from(Span::styled(
                    format!("  {}", image.desc),
                    Style::default().fg(theme.text_dim),
                )));
            }
            lines.push(Line::from(Span::styled(
                format!(
                    "  {} · {}",
                    image.img.content_type,
                    format_byte_size(image.img.data.byte_len())
                ),
                Style::default().fg(theme.accent),
            )));
            // Inline form of the selected image only; the others stay compact
            if index == gallery.selected {
                lines.push(Line::from(Span::styled(
                    format!("  {}", truncate_to_width(&image.img.data_uri(), uri_width)),
                    Style::default().fg(theme.text_dim),
                )));
            }
            ListItem::new(lines)
        })
        .collect();

    let mut state = ListState::default();
    state.select(Some(gallery.selected));

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.border))
                .title(format!(" Images ({}) ", gallery.images.len())),
        )
        .highlight_style(Style::default().bg(theme.highlight_bg))
        .highlight_symbol("▶ ");
    frame.render_stateful_widget(list, area, &mut state);
}

pub fn render_about_screen(frame: &mut Frame, app: &App, area: Rect) {
    let theme = get_theme_colors(app);

    let about = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("Glimpse {}", env!("CARGO_PKG_VERSION")),
            Style::default().fg(theme.primary).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Share posts and images with the people you follow.",
            Style::default().fg(theme.text),
        )),
        Line::from(Span::styled(
            "Likes, comments and follower counts come straight from the server.",
            Style::default().fg(theme.text),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("Server: {}", app.ctx.backend.base_url()),
            Style::default().fg(theme.text_dim),
        )),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border))
            .title(" About "),
    );
    frame.render_widget(about, area);
}
