use super::*;
use crate::api::testing::{post, FakeBackend};
use crate::components::test_support::{context, drain, signed_in};
use crate::session::SessionStore;
use crate::storage::{FileCredentialStore, MemoryCredentialStore};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use glimpse_types::{ColorScheme, LikeState};
use ratatui::{backend::TestBackend, Terminal};
use std::sync::Arc;
use tempfile::TempDir;
use tokio::sync::mpsc::UnboundedReceiver;

/// Helper to create a KeyEvent
fn key_event(code: KeyCode) -> KeyEvent {
    key_event_with_modifiers(code, KeyModifiers::empty())
}

fn key_event_with_modifiers(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
    let mut event = KeyEvent::new(code, modifiers);
    event.kind = KeyEventKind::Press;
    event
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        app.handle_key_event(key_event(KeyCode::Char(c))).unwrap();
    }
}

fn seeded() -> Arc<FakeBackend> {
    Arc::new(FakeBackend::new().with(|s| {
        s.posts = vec![post("p1", "ana", "first post"), post("p2", "ana", "second post")];
    }))
}

fn app_with(backend: Arc<FakeBackend>, session: Session) -> (App, UnboundedReceiver<ViewEvent>) {
    let (ctx, rx) = context(backend, session);
    let app = App::new(
        ctx,
        Box::new(MemoryCredentialStore::new()),
        None,
        LogConfig::disabled(),
    );
    (app, rx)
}

/// Feed every pending result back into the app until things settle
async fn pump(app: &mut App, rx: &mut UnboundedReceiver<ViewEvent>) {
    loop {
        let events = drain(rx).await;
        if events.is_empty() {
            return;
        }
        for event in events {
            app.handle_view_event(event);
        }
    }
}

/// Draw one frame and return the screen contents, row after row
fn rendered(app: &mut App) -> String {
    let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
    terminal.draw(|frame| crate::ui::render(app, frame)).unwrap();
    terminal
        .backend()
        .buffer()
        .content
        .iter()
        .map(|cell| cell.symbol())
        .collect()
}

fn profile(app: &App) -> &ProfilePage {
    match &app.screen {
        Screen::Profile(page) => page,
        _ => panic!("profile screen expected"),
    }
}

#[tokio::test]
async fn test_escape_closes_help_modal_first() {
    let (mut app, _rx) = app_with(seeded(), Session::anonymous());
    app.show_help = true;

    // Escape should close help, not exit app
    app.handle_key_event(key_event(KeyCode::Esc)).unwrap();

    assert!(!app.show_help, "Help modal should be closed");
    assert!(app.running, "App should still be running");
}

#[tokio::test]
async fn test_question_mark_toggles_help() {
    let (mut app, _rx) = app_with(seeded(), Session::anonymous());

    app.handle_key_event(key_event(KeyCode::Char('?'))).unwrap();
    assert!(app.show_help, "Help modal should be open");

    app.handle_key_event(key_event(KeyCode::Char('?'))).unwrap();
    assert!(!app.show_help, "Help modal should be closed");
}

#[tokio::test]
async fn test_q_quits() {
    let (mut app, _rx) = app_with(seeded(), Session::anonymous());
    app.handle_key_event(key_event(KeyCode::Char('q'))).unwrap();
    assert!(!app.running);
}

#[tokio::test]
async fn test_key_release_is_ignored() {
    let (mut app, _rx) = app_with(seeded(), Session::anonymous());
    let mut release = key_event(KeyCode::Char('q'));
    release.kind = KeyEventKind::Release;
    app.handle_key_event(release).unwrap();
    assert!(app.running);
}

#[tokio::test]
async fn test_alert_blocks_input_until_dismissed() {
    let backend = seeded();
    backend.fail("posts_by_username");
    let (mut app, mut rx) = app_with(backend, signed_in("u1", "ana"));
    pump(&mut app, &mut rx).await;

    assert_eq!(
        app.current_alert(),
        Some("Unable to get posts from http://backend.test/posts/getAllByUsername/ana")
    );

    app.handle_key_event(key_event(KeyCode::Char('q'))).unwrap();
    assert!(app.running, "q must not reach the app while an alert is up");
    app.handle_key_event(key_event(KeyCode::Tab)).unwrap();
    assert_eq!(app.nav.selected, NavLink::Profile);

    app.handle_key_event(key_event(KeyCode::Enter)).unwrap();
    assert!(app.current_alert().is_none());
}

#[tokio::test]
async fn test_tab_cycles_links_and_mounts_screens() {
    let (mut app, _rx) = app_with(seeded(), signed_in("u1", "ana"));

    app.handle_key_event(key_event(KeyCode::Tab)).unwrap();
    assert_eq!(app.nav.selected, NavLink::CreatePost);
    assert!(matches!(app.screen, Screen::Profile(_)));

    app.handle_key_event(key_event(KeyCode::Esc)).unwrap(); // close the form
    app.handle_key_event(key_event(KeyCode::Tab)).unwrap();
    assert_eq!(app.nav.selected, NavLink::Images);
    assert!(matches!(app.screen, Screen::Images(_)));

    app.handle_key_event(key_event(KeyCode::BackTab)).unwrap();
    assert_eq!(app.nav.selected, NavLink::CreatePost);
    assert!(profile(&app).form.is_some());
    app.handle_key_event(key_event(KeyCode::Esc)).unwrap();
    app.handle_key_event(key_event(KeyCode::Char('4'))).unwrap();
    assert!(matches!(app.screen, Screen::About));
}

#[tokio::test]
async fn test_leaving_a_screen_drops_its_results() {
    let backend = Arc::new(FakeBackend::new().with(|s| {
        s.images = vec![crate::api::testing::image("a", "x")];
    }));
    let (mut app, mut rx) = app_with(backend, signed_in("u1", "ana"));
    pump(&mut app, &mut rx).await;

    app.select_link(NavLink::Images);
    app.select_link(NavLink::About);
    pump(&mut app, &mut rx).await;

    assert!(matches!(app.screen, Screen::About));
    assert!(app.alerts.is_empty());
}

#[tokio::test]
async fn test_create_post_through_form() {
    let backend = seeded();
    let (mut app, mut rx) = app_with(backend.clone(), signed_in("u1", "ana"));
    pump(&mut app, &mut rx).await;

    app.handle_key_event(key_event(KeyCode::Char('n'))).unwrap();
    assert!(profile(&app).form.is_some());

    // Shortcuts are plain text while the form is open
    type_text(&mut app, "quiet day");
    assert!(app.running);
    app.handle_key_event(key_event_with_modifiers(KeyCode::Char('s'), KeyModifiers::CONTROL))
        .unwrap();
    pump(&mut app, &mut rx).await;

    assert!(profile(&app).form.is_none());
    assert_eq!(profile(&app).cards.len(), 3);
    assert!(backend.calls().contains(&"create_post quiet day".to_string()));
}

#[tokio::test]
async fn test_create_post_link_requires_session() {
    let (mut app, _rx) = app_with(seeded(), Session::anonymous());
    app.select_link(NavLink::CreatePost);

    assert!(profile(&app).form.is_none());
    assert!(app.notice.as_ref().is_some_and(|n| n.is_error));
}

#[tokio::test]
async fn test_like_key_toggles_selected_card() {
    let (mut app, mut rx) = app_with(seeded(), signed_in("u1", "ana"));
    pump(&mut app, &mut rx).await;

    app.handle_key_event(key_event(KeyCode::Char('j'))).unwrap();
    app.handle_key_event(key_event(KeyCode::Char('l'))).unwrap();
    pump(&mut app, &mut rx).await;

    let page = profile(&app);
    assert_eq!(page.selected, 1);
    assert_eq!(page.cards[1].like_state, LikeState::Liked);
    assert_eq!(page.cards[1].like_count, Some(1));
    assert_eq!(page.cards[0].like_state, LikeState::Unliked);
}

#[tokio::test]
async fn test_failed_like_sets_notice() {
    let backend = seeded();
    backend.fail("like_post");
    let (mut app, mut rx) = app_with(backend, signed_in("u1", "ana"));
    pump(&mut app, &mut rx).await;

    app.handle_key_event(key_event(KeyCode::Char('l'))).unwrap();
    pump(&mut app, &mut rx).await;

    assert!(app.notice.as_ref().is_some_and(|n| n.is_error));
    assert!(app.alerts.is_empty());
    assert_eq!(profile(&app).cards[0].like_state, LikeState::Unliked);
}

#[tokio::test]
async fn test_delete_needs_confirmation() {
    let backend = seeded();
    let (mut app, mut rx) = app_with(backend.clone(), signed_in("u1", "ana"));
    pump(&mut app, &mut rx).await;

    app.handle_key_event(key_event(KeyCode::Char('d'))).unwrap();
    app.handle_key_event(key_event(KeyCode::Char('n'))).unwrap();
    assert!(profile(&app).confirm_delete.is_none());
    assert!(!backend.calls().iter().any(|c| c.starts_with("delete_post")));

    app.handle_key_event(key_event(KeyCode::Char('d'))).unwrap();
    app.handle_key_event(key_event(KeyCode::Char('y'))).unwrap();
    pump(&mut app, &mut rx).await;

    let ids: Vec<&str> = profile(&app).cards.iter().map(|c| c.post.id.as_str()).collect();
    assert_eq!(ids, vec!["p2"]);
}

#[tokio::test]
async fn test_edit_surface_captures_keys() {
    let backend = seeded();
    let (mut app, mut rx) = app_with(backend.clone(), signed_in("u1", "ana"));
    pump(&mut app, &mut rx).await;

    app.handle_key_event(key_event(KeyCode::Char('e'))).unwrap();
    assert!(profile(&app).cards[0].is_editing());

    type_text(&mut app, "!q");
    assert!(app.running);
    app.handle_key_event(key_event_with_modifiers(KeyCode::Char('s'), KeyModifiers::CONTROL))
        .unwrap();
    pump(&mut app, &mut rx).await;

    assert_eq!(profile(&app).cards[0].post.content, "first post!q");
}

#[tokio::test]
async fn test_enter_opens_and_closes_detail() {
    let (mut app, mut rx) = app_with(seeded(), signed_in("u1", "ana"));
    pump(&mut app, &mut rx).await;

    app.handle_key_event(key_event(KeyCode::Enter)).unwrap();
    assert!(profile(&app).cards[0].show_detail);

    app.handle_key_event(key_event(KeyCode::Esc)).unwrap();
    assert!(!profile(&app).cards[0].show_detail);
    assert!(app.running);
}

#[tokio::test]
async fn test_logout_clears_stored_credential() {
    let temp_dir = TempDir::new().unwrap();
    let store = SessionStore::at(temp_dir.path().join("session"));
    store.save("header.payload.signature").unwrap();

    let (ctx, mut rx) = context(seeded(), signed_in("u1", "ana"));
    let mut app = App::new(
        ctx,
        Box::new(FileCredentialStore::with_store(store.clone())),
        None,
        LogConfig::disabled(),
    );
    pump(&mut app, &mut rx).await;

    app.handle_key_event(key_event(KeyCode::Char('L'))).unwrap();
    assert!(app.show_logout_confirmation);
    app.handle_key_event(key_event(KeyCode::Char('y'))).unwrap();

    assert!(!app.is_signed_in());
    assert!(app.nav.username().is_none());
    assert!(store.load().unwrap().is_none());
    assert!(profile(&app).cards.is_empty());
}

#[tokio::test]
async fn test_theme_toggle_is_persisted() {
    let temp_dir = TempDir::new().unwrap();
    let manager = ConfigManager::at(temp_dir.path().to_path_buf()).unwrap();

    let (ctx, _rx) = context(seeded(), Session::anonymous());
    let mut app = App::new(
        ctx,
        Box::new(MemoryCredentialStore::new()),
        Some(manager.clone()),
        LogConfig::disabled(),
    );
    assert_eq!(app.preferences.color_scheme, ColorScheme::Light);

    app.handle_key_event(key_event(KeyCode::Char('t'))).unwrap();
    assert_eq!(app.preferences.color_scheme, ColorScheme::Dark);
    assert_eq!(manager.load_preferences().unwrap().color_scheme, ColorScheme::Dark);
}

#[tokio::test]
async fn test_gallery_delete_through_keys() {
    let backend = Arc::new(FakeBackend::new().with(|s| {
        s.images = vec![
            crate::api::testing::image("a", "x"),
            crate::api::testing::image("b", "y"),
        ];
    }));
    let (mut app, mut rx) = app_with(backend, signed_in("u1", "ana"));
    app.handle_key_event(key_event(KeyCode::Char('3'))).unwrap();
    pump(&mut app, &mut rx).await;

    app.handle_key_event(key_event(KeyCode::Char('d'))).unwrap();
    // Esc cancels the confirmation instead of quitting
    app.handle_key_event(key_event(KeyCode::Esc)).unwrap();
    assert!(app.running);

    app.handle_key_event(key_event(KeyCode::Char('d'))).unwrap();
    app.handle_key_event(key_event(KeyCode::Char('y'))).unwrap();
    pump(&mut app, &mut rx).await;

    let Screen::Images(gallery) = &app.screen else {
        panic!("images screen expected");
    };
    let ids: Vec<&str> = gallery.images.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, vec!["b"]);
}

#[tokio::test]
async fn test_detail_modal_expands_long_content() {
    let backend = Arc::new(FakeBackend::new().with(|s| {
        s.posts = vec![post("p1", "ana", &"a".repeat(120))];
    }));
    let (mut app, mut rx) = app_with(backend, signed_in("u1", "ana"));
    pump(&mut app, &mut rx).await;

    app.handle_key_event(key_event(KeyCode::Enter)).unwrap();
    let card = &profile(&app).cards[0];
    assert!(card.show_detail);
    assert_eq!(card.content().text.chars().count(), 96);
    let screen = rendered(&mut app);
    assert!(screen.contains("Space: Expand/Collapse"));
    assert!(screen.contains("[...]"));

    app.handle_key_event(key_event(KeyCode::Char(' '))).unwrap();
    let card = &profile(&app).cards[0];
    assert!(card.show_detail, "Space must stay inside the detail modal");
    assert!(card.expanded);
    assert_eq!(card.content().text.chars().count(), 120);
    assert!(rendered(&mut app).contains("[^]"));

    app.handle_key_event(key_event(KeyCode::Char('x'))).unwrap();
    assert!(!profile(&app).cards[0].expanded);
}

#[tokio::test]
async fn test_gallery_without_session_draws_unauthorized_message() {
    let backend = Arc::new(FakeBackend::new().with(|s| {
        s.images = vec![crate::api::testing::image("a", "x")];
    }));
    let (mut app, mut rx) = app_with(backend.clone(), Session::from_credential(Some("garbage")));
    app.handle_key_event(key_event(KeyCode::Char('3'))).unwrap();
    pump(&mut app, &mut rx).await;

    let screen = rendered(&mut app);
    assert!(screen.contains("Unauthorized"));
    assert!(screen.contains("GLIMPSE_ACCESS_TOKEN"));
    assert!(!screen.contains("Images (1)"));
    assert!(!backend.calls().iter().any(|c| c.starts_with("get_all_images")));
}

#[tokio::test]
async fn test_gallery_shows_data_uri_of_selected_image() {
    let backend = Arc::new(FakeBackend::new().with(|s| {
        s.images = vec![
            crate::api::testing::image("a", "x"),
            crate::api::testing::image("b", "y"),
        ];
    }));
    let (mut app, mut rx) = app_with(backend, signed_in("u1", "ana"));
    app.handle_key_event(key_event(KeyCode::Char('3'))).unwrap();
    pump(&mut app, &mut rx).await;

    let screen = rendered(&mut app);
    assert!(screen.contains("Images (2)"));
    assert_eq!(screen.matches("data:image/png;base64,AQID").count(), 1);
}
