use crate::app::state::{App, Screen};
use crate::components::{ImageGallery, NavLink, ProfilePage};
use crate::log_key_event;
use crate::text_wrapper::{wrap_textarea_if_needed, WrapConfig};
use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tui_textarea::{Input, TextArea};

pub fn handle_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    if key.kind != KeyEventKind::Press {
        return Ok(());
    }
    log_key_event!(app.log_config, "{:?} {:?} on {}", key.code, key.modifiers, app.screen.name());

    // Priority 1: Alerts block everything until dismissed
    if app.current_alert().is_some() {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
            app.dismiss_alert();
        }
        return Ok(());
    }

    // Priority 2: Help modal
    if app.show_help {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
            app.toggle_help();
        }
        return Ok(());
    }

    // Priority 3: Logout confirmation
    if app.show_logout_confirmation {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => app.logout(),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.cancel_logout(),
            _ => {}
        }
        return Ok(());
    }

    // Priority 4: Modals and text entry owned by the mounted view
    let handled = match &mut app.screen {
        Screen::Profile(page) => handle_profile_modal_keys(page, &app.ctx, key),
        Screen::Images(gallery) => handle_gallery_modal_keys(gallery, &app.ctx, key),
        Screen::About => false,
    };
    if handled {
        return Ok(());
    }

    // Priority 5: Global navigation
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => {
            app.quit();
            return Ok(());
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.quit();
            return Ok(());
        }
        KeyCode::Char('?') => {
            app.toggle_help();
            return Ok(());
        }
        KeyCode::Tab => {
            app.next_link();
            return Ok(());
        }
        KeyCode::BackTab => {
            app.previous_link();
            return Ok(());
        }
        KeyCode::Char(c @ '1'..='9') => {
            if let Some(link) = NavLink::from_digit(c) {
                app.select_link(link);
            }
            return Ok(());
        }
        KeyCode::Char('t') => {
            app.toggle_color_scheme();
            return Ok(());
        }
        KeyCode::Char('L') => {
            app.request_logout();
            return Ok(());
        }
        KeyCode::Char('r') => {
            app.refresh();
            return Ok(());
        }
        _ => {}
    }

    // Priority 6: Screen keys
    match &mut app.screen {
        Screen::Profile(page) => handle_profile_keys(page, &app.ctx, key),
        Screen::Images(gallery) => handle_gallery_keys(gallery, key),
        Screen::About => {}
    }
    Ok(())
}

fn is_submit(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && matches!(key.code, KeyCode::Char('s') | KeyCode::Enter)
}

/// Forward a key to an editor and keep long lines wrapped
fn edit(textarea: &mut TextArea<'static>, key: KeyEvent) {
    textarea.input(Input::from(Event::Key(key)));
    wrap_textarea_if_needed(textarea, WrapConfig::COMPOSER);
}

/// Returns true when the key was consumed by a form, editor or modal
fn handle_profile_modal_keys(
    page: &mut ProfilePage,
    ctx: &crate::components::ViewContext,
    key: KeyEvent,
) -> bool {
    if let Some(form) = page.form.as_mut() {
        if key.code == KeyCode::Esc {
            page.close_form();
        } else if is_submit(&key) {
            page.submit_post(ctx);
        } else if !form.submitting {
            edit(&mut form.editor, key);
        }
        return true;
    }

    if let Some(card) = page.editing_card_mut() {
        if key.code == KeyCode::Esc {
            card.cancel_edit();
        } else if is_submit(&key) {
            card.submit_edit(ctx);
        } else if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('d') {
            card.submit_delete(ctx);
        } else if let Some(editor) = card.editor.as_mut() {
            edit(editor, key);
        }
        return true;
    }

    if page.confirm_delete.is_some() {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => page.confirm_delete(ctx),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => page.cancel_delete(),
            _ => {}
        }
        return true;
    }

    if let Some(card) = page.selected_card_mut().filter(|card| card.show_detail) {
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => card.show_detail = false,
            KeyCode::Char('l') => card.toggle_like(ctx),
            KeyCode::Char(' ') | KeyCode::Char('x') => card.toggle_expanded(),
            _ => {}
        }
        return true;
    }

    false
}

fn handle_gallery_modal_keys(
    gallery: &mut ImageGallery,
    ctx: &crate::components::ViewContext,
    key: KeyEvent,
) -> bool {
    if gallery.confirm_delete.is_none() {
        return false;
    }
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => gallery.confirm_delete(ctx),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => gallery.cancel_delete(),
        _ => {}
    }
    true
}

fn handle_profile_keys(page: &mut ProfilePage, ctx: &crate::components::ViewContext, key: KeyEvent) {
    match key.code {
        KeyCode::Down | KeyCode::Char('j') => page.select_next(),
        KeyCode::Up | KeyCode::Char('k') => page.select_previous(),
        KeyCode::Char('n') => {
            page.open_form();
        }
        KeyCode::Char('d') => page.request_delete(),
        KeyCode::Char('l') => {
            if let Some(card) = page.selected_card_mut() {
                card.toggle_like(ctx);
            }
        }
        KeyCode::Char(' ') | KeyCode::Char('x') => {
            if let Some(card) = page.selected_card_mut() {
                card.toggle_expanded();
            }
        }
        KeyCode::Enter => {
            if let Some(card) = page.selected_card_mut() {
                card.show_detail = true;
            }
        }
        KeyCode::Char('e') => {
            if let Some(card) = page.selected_card_mut() {
                card.begin_edit(&ctx.session);
            }
        }
        _ => {}
    }
}

fn handle_gallery_keys(gallery: &mut ImageGallery, key: KeyEvent) {
    match key.code {
        KeyCode::Down | KeyCode::Char('j') => gallery.select_next(),
        KeyCode::Up | KeyCode::Char('k') => gallery.select_previous(),
        KeyCode::Char('d') => gallery.request_delete(),
        _ => {}
    }
}
