use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, BorderType, Borders},
};
use super::theme::get_theme;

pub fn focused_block<'a>(title: &'a str, is_focused: bool) -> Block<'a> {
    let theme = get_theme();
    let border_color = if is_focused {
        theme.border_focused
    } else {
        theme.border_unfocused
    };

    let border_type = if is_focused {
        BorderType::Rounded
    } else {
        BorderType::Plain
    };

    let title_style = if is_focused {
        Style::default().fg(theme.text_highlight).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.text_primary)
    };

    Block::default()
        .title(title)
        .title_style(title_style)
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(Style::default().fg(border_color))
}

/// Filled red heart for favorites, outline otherwise.
pub fn heart(is_favorite: bool) -> Span<'static> {
    let theme = get_theme();
    if is_favorite {
        Span::styled("♥", Style::default().fg(theme.heart_on))
    } else {
        Span::styled("♡", Style::default().fg(theme.heart_off))
    }
}

/// Dimmed `key: action` hint line.
pub fn key_hints(hints: &[(&str, &str)]) -> String {
    hints
        .iter()
        .map(|(k, action)| format!("{}: {}", k, action))
        .collect::<Vec<_>>()
        .join("  ")
}

pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
