use crate::session::Session;

/// Fixed set of top-level destinations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavLink {
    Profile,
    CreatePost,
    Images,
    About,
}

impl NavLink {
    pub const ALL: [NavLink; 4] = [
        NavLink::Profile,
        NavLink::CreatePost,
        NavLink::Images,
        NavLink::About,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            NavLink::Profile => "Profile",
            NavLink::CreatePost => "Create Post",
            NavLink::Images => "Images",
            NavLink::About => "About",
        }
    }

    fn index(&self) -> usize {
        Self::ALL.iter().position(|link| link == self).unwrap_or(0)
    }

    pub fn next(&self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn previous(&self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Number-key shortcut, 1-based
    pub fn from_digit(digit: char) -> Option<Self> {
        let index = digit.to_digit(10)? as usize;
        index.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }
}

/// Navigation header. It reads the session user for display only.
#[derive(Debug, Clone)]
pub struct NavBar {
    pub selected: NavLink,
    username: Option<String>,
}

impl NavBar {
    pub fn new(session: &Session) -> Self {
        Self {
            selected: NavLink::Profile,
            username: session.user().map(|user| user.username.clone()),
        }
    }

    pub fn links(&self) -> &'static [NavLink] {
        &NavLink::ALL
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }
}
