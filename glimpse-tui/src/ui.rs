// UI module - split into cohesive submodules for maintainability
pub mod formatting;
pub mod theme;
mod modals;
mod screens;

// Re-export main render function
pub use self::render_main::render;

// Main render logic
mod render_main {
    use ratatui::{
        layout::{Alignment, Constraint, Direction, Layout},
        style::{Modifier, Style},
        text::{Line, Span},
        widgets::{Block, Borders, Clear, Paragraph},
        Frame,
    };

    use super::modals;
    use super::screens::{
        render_about_screen, render_footer, render_gallery_screen, render_nav_bar, render_profile_screen,
    };
    use super::theme::get_theme_colors;
    use crate::app::{App, Screen};

    pub const MIN_WIDTH: u16 = 60;
    pub const MIN_HEIGHT: u16 = 20;

    /// Render the UI
    pub fn render(app: &mut App, frame: &mut Frame) {
        let app: &App = app;
        let area = frame.area();

        let theme = get_theme_colors(app);

        frame.render_widget(Clear, area);

        let background = Block::default().style(Style::default().bg(theme.background));
        frame.render_widget(background, area);

        if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
            let warning = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    "Terminal Too Small",
                    Style::default().fg(theme.error).add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from(Span::styled(
                    format!("Minimum size: {}x{}", MIN_WIDTH, MIN_HEIGHT),
                    Style::default().fg(theme.text),
                )),
                Line::from(Span::styled(
                    format!("Current size: {}x{}", area.width, area.height),
                    Style::default().fg(theme.warning),
                )),
                Line::from(""),
                Line::from(Span::styled(
                    "Please resize your terminal window",
                    Style::default().fg(theme.text_dim),
                )),
            ])
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme.error)),
            );

            frame.render_widget(warning, area);
            return;
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(3)])
            .split(area);

        render_nav_bar(frame, app, chunks[0]);
        match &app.screen {
            Screen::Profile(page) => render_profile_screen(frame, app, page, chunks[1]),
            Screen::Images(gallery) => render_gallery_screen(frame, app, gallery, chunks[1]),
            Screen::About => render_about_screen(frame, app, chunks[1]),
        }
        render_footer(frame, app, chunks[2]);

        // Screen-owned modals first, app-level dialogs on top
        match &app.screen {
            Screen::Profile(page) => {
                if let Some(form) = &page.form {
                    modals::render_post_form_modal(frame, app, form, area);
                } else if let Some(card) = page.cards.iter().find(|card| card.is_editing()) {
                    modals::render_edit_modal(frame, app, card, area);
                } else if let Some(post_id) = &page.confirm_delete {
                    modals::render_delete_post_confirmation(frame, app, page, post_id, area);
                } else if let Some(card) = page.selected_card().filter(|card| card.show_detail) {
                    modals::render_post_detail_modal(frame, app, card, area);
                }
            }
            Screen::Images(gallery) => {
                if let Some(image_id) = &gallery.confirm_delete {
                    modals::render_delete_image_confirmation(frame, app, gallery, image_id, area);
                }
            }
            Screen::About => {}
        }

        if app.show_logout_confirmation {
            modals::render_logout_confirmation(frame, app, area);
        }
        if app.show_help {
            modals::render_help_modal(frame, app, area);
        }
        if let Some(message) = app.current_alert() {
            modals::render_alert_modal(frame, app, message, area);
        }
    }
}
