use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ColorScheme {
    #[default]
    Light,
    Dark,
}

impl ColorScheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorScheme::Light => "Light",
            ColorScheme::Dark => "Dark",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Light" => Some(ColorScheme::Light),
            "Dark" => Some(ColorScheme::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ColorScheme::Light => ColorScheme::Dark,
            ColorScheme::Dark => ColorScheme::Light,
        }
    }
}

/// Whether the viewer has liked a post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LikeState {
    #[default]
    Unliked,
    Liked,
}

impl LikeState {
    pub fn from_liked(liked: bool) -> Self {
        if liked {
            LikeState::Liked
        } else {
            LikeState::Unliked
        }
    }

    pub fn is_liked(&self) -> bool {
        matches!(self, LikeState::Liked)
    }

    /// Button label offered for the transition out of this state
    pub fn action_label(&self) -> &'static str {
        match self {
            LikeState::Unliked => "Like",
            LikeState::Liked => "Unlike",
        }
    }
}
