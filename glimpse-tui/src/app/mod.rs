mod handlers;
mod state;

#[cfg(test)]
mod tests;

pub use state::*;

use std::collections::VecDeque;

use anyhow::Result;
use crossterm::event::KeyEvent;

use crate::components::{
    Feedback, ImageGallery, NavBar, NavLink, Notice, ProfilePage, ViewContext, ViewEvent, ViewUpdate,
};
use crate::config::{ConfigManager, UserPreferences};
use crate::logging::LogConfig;
use crate::session::Session;
use crate::storage::CredentialStore;
use crate::{log_api_call, log_debug, log_view_state};

impl App {
    /// Build the app and mount the profile view
    pub fn new(
        ctx: ViewContext,
        credentials: Box<dyn CredentialStore>,
        config_manager: Option<ConfigManager>,
        log_config: LogConfig,
    ) -> Self {
        let preferences = match config_manager.as_ref().map(ConfigManager::load_preferences) {
            Some(Ok(prefs)) => prefs,
            Some(Err(e)) => {
                log::warn!("Failed to load preferences, using defaults: {:#}", e);
                UserPreferences::default()
            }
            None => UserPreferences::default(),
        };

        let nav = NavBar::new(&ctx.session);
        let screen = Screen::Profile(ProfilePage::activate(&ctx));

        Self {
            running: true,
            ctx,
            nav,
            screen,
            alerts: VecDeque::new(),
            notice: None,
            show_help: false,
            show_logout_confirmation: false,
            preferences,
            log_config,
            config_manager,
            credentials,
        }
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) -> Result<()> {
        handlers::handle_key_event(self, key)
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Toggle help modal
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn next_link(&mut self) {
        self.select_link(self.nav.selected.next());
    }

    pub fn previous_link(&mut self) {
        self.select_link(self.nav.selected.previous());
    }

    /// Activate the screen behind a nav link. "Create Post" is the profile
    /// screen with its form open.
    pub fn select_link(&mut self, link: NavLink) {
        self.nav.selected = link;
        match link {
            NavLink::Profile => {
                if !matches!(self.screen, Screen::Profile(_)) {
                    self.mount(Screen::Profile(ProfilePage::activate(&self.ctx)));
                }
            }
            NavLink::CreatePost => {
                if !matches!(self.screen, Screen::Profile(_)) {
                    self.mount(Screen::Profile(ProfilePage::activate(&self.ctx)));
                }
                if let Screen::Profile(page) = &mut self.screen {
                    if !page.open_form() {
                        self.notice = Some(Notice::error("Sign in to create posts"));
                    }
                }
            }
            NavLink::Images => {
                if !matches!(self.screen, Screen::Images(_)) {
                    self.mount(Screen::Images(ImageGallery::activate(&self.ctx)));
                }
            }
            NavLink::About => self.mount(Screen::About),
        }
    }

    fn mount(&mut self, screen: Screen) {
        log_view_state!(self.log_config, "Mounting {} (was {})", screen.name(), self.screen.name());
        self.screen = screen;
    }

    /// Re-activate the current screen, fetching everything again
    pub fn refresh(&mut self) {
        let screen = match &self.screen {
            Screen::Profile(_) => Screen::Profile(ProfilePage::activate(&self.ctx)),
            Screen::Images(_) => Screen::Images(ImageGallery::activate(&self.ctx)),
            Screen::About => return,
        };
        self.mount(screen);
        self.notice = Some(Notice::info("Refreshing..."));
    }

    /// Apply a finished request to the view that issued it, if still mounted
    pub fn handle_view_event(&mut self, event: ViewEvent) {
        let ViewEvent { token, update } = event;
        log_api_call!(self.log_config, "Response for view {} on {}", token, self.screen.name());
        let feedback = match (update, &mut self.screen) {
            (ViewUpdate::Gallery(update), Screen::Images(gallery)) => {
                if !gallery.apply(token, update) {
                    log_view_state!(self.log_config, "Dropped stale gallery result {}", token);
                }
                None
            }
            (ViewUpdate::Profile(update), Screen::Profile(page)) if page.owns(token) => {
                page.apply(&self.ctx, token, update)
            }
            (ViewUpdate::Card { post_id, update }, Screen::Profile(page)) if page.has_card(token) => {
                page.apply_card(&self.ctx, token, &post_id, update)
            }
            (update, _) => {
                log_view_state!(self.log_config, "Dropped result for unmounted view {}: {:?}", token, update);
                None
            }
        };

        match feedback {
            Some(Feedback::Notice(notice)) => self.notice = Some(notice),
            Some(Feedback::Alert(text)) => {
                log_debug!(self.log_config, "Alert: {}", text);
                self.alerts.push_back(text);
            }
            None => {}
        }
    }

    pub fn current_alert(&self) -> Option<&str> {
        self.alerts.front().map(String::as_str)
    }

    pub fn dismiss_alert(&mut self) {
        self.alerts.pop_front();
    }

    /// Clear the status notice once it has been visible long enough
    pub fn clear_expired_notice(&mut self) {
        if self.notice.as_ref().is_some_and(Notice::is_expired) {
            self.notice = None;
        }
    }

    /// Switch between light and dark and remember the choice
    pub fn toggle_color_scheme(&mut self) {
        self.preferences.color_scheme = self.preferences.color_scheme.toggled();
        let scheme = self.preferences.color_scheme.as_str();

        if let Some(manager) = &self.config_manager {
            if let Err(e) = manager.save_preferences(&self.preferences) {
                log::warn!("Failed to save preferences: {:#}", e);
                self.notice = Some(Notice::error(format!("{} theme (not saved)", scheme)));
                return;
            }
        }
        self.notice = Some(Notice::info(format!("{} theme", scheme)));
    }

    pub fn request_logout(&mut self) {
        if self.ctx.session.is_authenticated() {
            self.show_logout_confirmation = true;
        }
    }

    pub fn cancel_logout(&mut self) {
        self.show_logout_confirmation = false;
    }

    /// Forget the stored credential and continue as an anonymous viewer
    pub fn logout(&mut self) {
        self.show_logout_confirmation = false;
        if let Err(e) = self.credentials.clear_credentials() {
            log::warn!("Failed to clear stored credential: {:#}", e);
        }

        self.ctx.session = Session::anonymous();
        self.nav = NavBar::new(&self.ctx.session);
        self.mount(Screen::Profile(ProfilePage::activate(&self.ctx)));
        self.notice = Some(Notice::info("Signed out"));
        log::info!("User signed out");
    }

    pub fn is_signed_in(&self) -> bool {
        self.ctx.session.is_authenticated()
    }
}
