/// Editor helpers shared by the post form and the edit surface
use tui_textarea::{CursorMove, TextArea};

/// Configuration for text wrapping behavior
pub struct WrapConfig {
    /// Maximum width before wrapping (in characters)
    pub wrap_width: usize,
}

impl WrapConfig {
    pub const COMPOSER: Self = Self { wrap_width: 72 };
}

/// Editor pre-filled with `content`
pub fn new_editor(content: &str) -> TextArea<'static> {
    let mut textarea = if content.is_empty() {
        TextArea::default()
    } else {
        TextArea::from(content.lines().map(str::to_string))
    };
    textarea.set_hard_tab_indent(true);
    textarea.move_cursor(CursorMove::Bottom);
    textarea.move_cursor(CursorMove::End);
    textarea
}

/// Editor content with lines joined back together
pub fn editor_text(textarea: &TextArea<'_>) -> String {
    textarea.lines().join("\n")
}

/// Soft-wrap the line under the cursor once it grows past `config.wrap_width`,
/// breaking at the last space before the limit.
pub fn wrap_textarea_if_needed(textarea: &mut TextArea<'static>, config: WrapConfig) {
    let (row, col) = textarea.cursor();
    let lines: Vec<String> = textarea.lines().to_vec();

    let Some(current_line) = lines.get(row) else {
        return;
    };
    let chars: Vec<char> = current_line.chars().collect();
    if chars.len() <= config.wrap_width {
        return;
    }

    let wrap_point = (0..config.wrap_width)
        .rev()
        .find(|&i| chars[i] == ' ')
        .unwrap_or(config.wrap_width);

    let head: String = chars[..wrap_point].iter().collect();
    let tail: String = chars[wrap_point..].iter().collect();
    let head = head.trim_end().to_string();
    let tail = tail.trim_start().to_string();

    let mut new_lines = Vec::with_capacity(lines.len() + 1);
    new_lines.extend_from_slice(&lines[..row]);
    new_lines.push(head);
    new_lines.push(tail.clone());
    new_lines.extend_from_slice(&lines[row + 1..]);

    *textarea = TextArea::from(new_lines);
    textarea.set_hard_tab_indent(true);

    let new_col = if col > wrap_point {
        col - wrap_point - 1
    } else {
        tail.chars().count()
    };
    textarea.move_cursor(CursorMove::Jump(row as u16 + 1, new_col as u16));
}
