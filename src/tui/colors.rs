use crate::catalog::Category;
use ratatui::style::{Color, Modifier, Style};

pub const ACCENT: Color = Color::Rgb(99, 102, 241);
pub const HEADER_BG: Color = Color::Rgb(0, 95, 135);
pub const CARD_SELECTED_BG: Color = Color::Rgb(40, 40, 60);
pub const MUTED: Color = Color::DarkGray;

pub fn color_for_category(category: Category) -> Color {
    match category {
        Category::Tutorial => Color::LightBlue,
        Category::Article => Color::LightMagenta,
    }
}

pub fn badge_style(category: Category) -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(color_for_category(category))
        .add_modifier(Modifier::BOLD)
}

pub fn icon_for_category(category: Category) -> &'static str {
    match category {
        Category::Tutorial => "\u{1F393}", // graduation cap
        Category::Article => "\u{1F4F0}",  // newspaper
    }
}

/// Border style for a focusable widget
pub fn focus_border(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(MUTED)
    }
}

const SPINNER: [&str; 8] = [
    "\u{280B}", "\u{2819}", "\u{2839}", "\u{2838}", "\u{283C}", "\u{2834}", "\u{2826}", "\u{2827}",
];

pub fn spinner_frame(tick: usize) -> &'static str {
    SPINNER[tick % SPINNER.len()]
}
