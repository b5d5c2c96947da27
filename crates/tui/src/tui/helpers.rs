use std::cmp::min;

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::tui::constants::{CHECKBOX_WIDTH, DELETE_GLYPH};

pub const BG_BASE: Color = Color::Rgb(14, 17, 23);
pub const BG_PANEL: Color = Color::Rgb(22, 26, 34);
pub const BG_ACCENT: Color = Color::Rgb(32, 37, 47);
pub const FG_ACCENT: Color = Color::Rgb(120, 161, 255);

pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = min(width, area.width);
    let h = min(height, area.height);
    Rect {
        x: area.x + (area.width.saturating_sub(w)) / 2,
        y: area.y + (area.height.saturating_sub(h)) / 2,
        width: w,
        height: h,
    }
}

pub fn checkbox(completed: bool) -> &'static str {
    if completed {
        "[x]"
    } else {
        "[ ]"
    }
}

/// Lay out `[x] text … ✕` so the delete glyph lands in the last of `width` columns.
/// Text that does not fit is cut with an ellipsis.
pub fn row_text(completed: bool, text: &str, width: usize) -> String {
    let fixed = usize::from(CHECKBOX_WIDTH) + 1 + 1 + DELETE_GLYPH.chars().count();
    let room = width.saturating_sub(fixed);
    let count = text.chars().count();
    let shown: String = if count > room {
        let mut cut: String = text.chars().take(room.saturating_sub(1)).collect();
        if room > 0 {
            cut.push('…');
        }
        cut
    } else {
        text.to_string()
    };
    let pad = room.saturating_sub(shown.chars().count());
    format!(
        "{} {}{} {}",
        checkbox(completed),
        shown,
        " ".repeat(pad),
        DELETE_GLYPH
    )
}

pub fn build_help_lines() -> Vec<(&'static str, &'static str)> {
    vec![
        ("j / k or ↓ / ↑", "Move selection"),
        ("a", "Add a task"),
        ("Space / c", "Toggle complete"),
        ("x / Delete", "Delete task"),
        ("J / K", "Move task down / up"),
        ("mouse drag", "Drag a row to reorder, release to drop"),
        ("click [ ] / ✕", "Toggle / delete that row"),
        ("f", "Cycle filter: all → active → completed"),
        ("1 / 2 / 3", "Show all / active / completed"),
        ("v", "Hide or show the list"),
        ("Esc", "Cancel drag, close overlays"),
        ("h / ?", "Toggle this help overlay"),
        ("q", "Quit"),
    ]
}

pub fn accent_title(text: &str) -> Line<'static> {
    Line::from(vec![Span::styled(
        text.to_owned(),
        Style::default().fg(FG_ACCENT).add_modifier(Modifier::BOLD),
    )])
}
