// Modal rendering modules
mod dialogs;
mod help;
mod posts;

use ratatui::layout::{Constraint, Direction, Layout, Rect};

// Re-export all public functions
pub use dialogs::*;
pub use help::*;
pub use posts::*;

/// Rect of `percent_x` by `percent_y` centered inside `area`
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
