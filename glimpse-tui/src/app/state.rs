use std::collections::VecDeque;

use crate::components::{ImageGallery, NavBar, Notice, ProfilePage, ViewContext};
use crate::config::{ConfigManager, UserPreferences};
use crate::logging::LogConfig;
use crate::storage::CredentialStore;

/// The mounted view. Replacing it drops the previous view's scope, which
/// aborts its outstanding requests.
pub enum Screen {
    Profile(ProfilePage),
    Images(ImageGallery),
    About,
}

impl Screen {
    pub fn name(&self) -> &'static str {
        match self {
            Screen::Profile(_) => "profile",
            Screen::Images(_) => "images",
            Screen::About => "about",
        }
    }
}

/// Main application state
pub struct App {
    pub running: bool,
    pub ctx: ViewContext,
    pub nav: NavBar,
    pub screen: Screen,
    /// Blocking dialogs, shown one at a time in arrival order
    pub alerts: VecDeque<String>,
    pub notice: Option<Notice>,
    pub show_help: bool,
    pub show_logout_confirmation: bool,
    pub preferences: UserPreferences,
    pub log_config: LogConfig,
    pub(crate) config_manager: Option<ConfigManager>,
    pub(crate) credentials: Box<dyn CredentialStore>,
}
