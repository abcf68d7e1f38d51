use crate::app::App;
use glimpse_types::ColorScheme;
use ratatui::style::Color;

pub struct ThemeColors {
    pub primary: Color,
    pub accent: Color,
    pub text: Color,
    pub text_dim: Color,
    pub background: Color,
    pub border: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub highlight_bg: Color,
    /// Filled heart once the viewer has liked a post
    pub liked: Color,
}

/// Theme colors for the user's color scheme preference
pub fn get_theme_colors(app: &App) -> ThemeColors {
    theme_for(app.preferences.color_scheme)
}

pub fn theme_for(scheme: ColorScheme) -> ThemeColors {
    match scheme {
        ColorScheme::Dark => ThemeColors {
            primary: Color::Rgb(100, 200, 255),   // Light blue
            accent: Color::Rgb(255, 100, 200),    // Pink
            text: Color::Rgb(220, 220, 220),
            text_dim: Color::Rgb(120, 120, 120),
            background: Color::Rgb(20, 20, 25),
            border: Color::Rgb(60, 60, 70),
            success: Color::Rgb(100, 255, 150),
            warning: Color::Rgb(255, 200, 100),
            error: Color::Rgb(255, 100, 100),
            highlight_bg: Color::Rgb(40, 40, 50),
            liked: Color::Rgb(255, 90, 120),
        },

        ColorScheme::Light => ThemeColors {
            primary: Color::Rgb(0, 100, 200),     // Dark blue
            accent: Color::Rgb(200, 0, 100),      // Magenta
            text: Color::Rgb(30, 30, 30),
            text_dim: Color::Rgb(100, 100, 100),
            background: Color::Rgb(250, 250, 250),
            border: Color::Rgb(180, 180, 180),
            success: Color::Rgb(0, 150, 50),
            warning: Color::Rgb(200, 150, 0),
            error: Color::Rgb(200, 0, 0),
            highlight_bg: Color::Rgb(230, 240, 255),
            liked: Color::Rgb(220, 20, 60),
        },
    }
}
