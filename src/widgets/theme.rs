use ratatui::style::Color;

#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub border_focused: Color,
    pub border_unfocused: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_highlight: Color,
    pub accent: Color,
    pub heart_on: Color,
    pub heart_off: Color,
    pub status_completed: Color,
    pub status_failed: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Color::Rgb(0x1E, 0x1E, 0x1E),
            border_focused: Color::Rgb(0xBA, 0x55, 0xD3),
            border_unfocused: Color::Rgb(0x33, 0x33, 0x33),
            text_primary: Color::White,
            text_secondary: Color::Gray,
            text_highlight: Color::Rgb(0xBA, 0x55, 0xD3),
            accent: Color::Rgb(0xBA, 0x55, 0xD3),
            heart_on: Color::Red,
            heart_off: Color::White,
            status_completed: Color::Green,
            status_failed: Color::Red,
        }
    }
}

pub static THEME: std::sync::LazyLock<Theme> = std::sync::LazyLock::new(Theme::default);

pub fn get_theme() -> &'static Theme {
    &THEME
}
