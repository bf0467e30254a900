use super::{Component, ViewContext};
use crate::event::AppMsg;
use crate::model::gradient::{ActiveColor, Channel, Gradient, GradientDirection, Rgb};
use crate::widgets::common::{focused_block, key_hints};
use crate::widgets::theme::get_theme;
use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

const FINE_STEP: i16 = 1;
const COARSE_STEP: i16 = 16;

pub struct GradientBuilderState {
    pub gradient: Gradient,
    pub active: ActiveColor,
    pub channel: Channel,
    /// Hex text being typed, `None` when not in hex entry.
    hex_input: Option<String>,
}

impl Default for GradientBuilderState {
    fn default() -> Self {
        Self {
            gradient: Gradient::default(),
            active: ActiveColor::First,
            channel: Channel::Red,
            hex_input: None,
        }
    }
}

impl GradientBuilderState {
    /// True while keystrokes go to the hex field.
    pub fn is_editing(&self) -> bool {
        self.hex_input.is_some()
    }

    fn handle_hex_key(&mut self, code: KeyCode) -> Option<AppMsg> {
        let input = self.hex_input.as_mut()?;
        match code {
            KeyCode::Char(c) if c.is_ascii_hexdigit() && input.len() < 6 => {
                input.push(c.to_ascii_uppercase());
                None
            }
            KeyCode::Backspace => {
                input.pop();
                None
            }
            KeyCode::Esc => {
                self.hex_input = None;
                None
            }
            KeyCode::Enter => {
                let text = self.hex_input.take().unwrap_or_default();
                match Rgb::from_hex(&text) {
                    Ok(color) => {
                        *self.gradient.color_mut(self.active) = color;
                        None
                    }
                    Err(e) => Some(AppMsg::ErrorOccurred(e.to_string())),
                }
            }
            _ => None,
        }
    }
}

impl Component for GradientBuilderState {
    fn update(&mut self, msg: &AppMsg, _ctx: &ViewContext) -> Option<AppMsg> {
        let AppMsg::Key(key) = msg else {
            return None;
        };
        if self.hex_input.is_some() {
            return self.handle_hex_key(key.code);
        }

        let step = if key.modifiers.contains(KeyModifiers::SHIFT) {
            COARSE_STEP
        } else {
            FINE_STEP
        };

        match key.code {
            KeyCode::Tab | KeyCode::BackTab => self.active = self.active.toggle(),
            KeyCode::Up | KeyCode::Char('k') => self.channel = self.channel.prev(),
            KeyCode::Down | KeyCode::Char('j') => self.channel = self.channel.next(),
            KeyCode::Right | KeyCode::Char('l') => {
                self.gradient.color_mut(self.active).adjust(self.channel, step)
            }
            KeyCode::Left | KeyCode::Char('h') => {
                self.gradient.color_mut(self.active).adjust(self.channel, -step)
            }
            KeyCode::Char('L') => {
                self.gradient.color_mut(self.active).adjust(self.channel, COARSE_STEP)
            }
            KeyCode::Char('H') => {
                self.gradient.color_mut(self.active).adjust(self.channel, -COARSE_STEP)
            }
            KeyCode::Char('#') => self.hex_input = Some(String::new()),
            KeyCode::Char('1') => self.gradient.direction = GradientDirection::Horizontal,
            KeyCode::Char('2') => self.gradient.direction = GradientDirection::Vertical,
            KeyCode::Char('3') => self.gradient.direction = GradientDirection::Diagonal,
            KeyCode::Esc | KeyCode::Backspace => return Some(AppMsg::Back),
            _ => {}
        }
        None
    }

    fn render(&mut self, area: Rect, buf: &mut Buffer, _ctx: &ViewContext, is_focused: bool) {
        let theme = get_theme();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(5),
                Constraint::Length(6),
                Constraint::Length(4),
                Constraint::Length(1),
            ])
            .split(area);

        // Preview
        let block = focused_block("Gradient Builder", is_focused);
        let inner = block.inner(chunks[0]);
        block.render(chunks[0], buf);
        for y in 0..inner.height {
            for x in 0..inner.width {
                let c = self.gradient.sample(x, y, inner.width, inner.height);
                buf[(inner.x + x, inner.y + y)]
                    .set_symbol(" ")
                    .set_bg(Color::Rgb(c.r, c.g, c.b));
            }
        }

        // Colors
        let color_block = focused_block("Colors", false);
        let color_inner = color_block.inner(chunks[1]);
        color_block.render(chunks[1], buf);
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(color_inner);
        for (which, label, col) in [
            (ActiveColor::First, "Color 1", columns[0]),
            (ActiveColor::Second, "Color 2", columns[1]),
        ] {
            let color = self.gradient.color(which);
            let is_active = which == self.active;
            let mut lines = vec![Line::from(vec![
                Span::styled("  ", Style::default().bg(Color::Rgb(color.r, color.g, color.b))),
                Span::raw(" "),
                Span::styled(
                    label,
                    if is_active {
                        Style::default()
                            .fg(theme.accent)
                            .add_modifier(Modifier::BOLD)
                    } else {
                        Style::default().fg(theme.text_primary)
                    },
                ),
                Span::raw(" "),
                Span::styled(
                    match (&self.hex_input, is_active) {
                        (Some(input), true) => format!("#{}_", input),
                        _ => color.to_hex(),
                    },
                    Style::default().fg(theme.text_secondary),
                ),
            ])];
            for ch in Channel::ALL {
                let marker = if is_active && ch == self.channel { ">" } else { " " };
                lines.push(Line::from(format!(
                    "{} {} {:>3}",
                    marker,
                    ch.label(),
                    color.channel(ch)
                )));
            }
            Paragraph::new(lines).render(col, buf);
        }

        // Direction
        let dir_block = focused_block("Gradient Direction", false);
        let dir_inner = dir_block.inner(chunks[2]);
        dir_block.render(chunks[2], buf);
        let spans: Vec<Span> = GradientDirection::ALL
            .iter()
            .enumerate()
            .flat_map(|(i, dir)| {
                let selected = *dir == self.gradient.direction;
                let style = if selected {
                    Style::default()
                        .fg(theme.accent)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(theme.text_primary)
                };
                [
                    Span::styled(format!("[{}] {}", i + 1, dir.label()), style),
                    Span::raw("   "),
                ]
            })
            .collect();
        let css = Line::from(Span::styled(
            format!("linear-gradient({})", self.gradient.direction.css()),
            Style::default().fg(theme.text_secondary),
        ));
        Paragraph::new(vec![Line::from(spans), css]).render(dir_inner, buf);

        let hints = key_hints(&[
            ("Tab", "color"),
            ("↑↓", "channel"),
            ("←→", "adjust"),
            ("#", "hex"),
            ("1-3", "direction"),
            ("Esc", "back"),
        ]);
        Paragraph::new(hints)
            .style(Style::default().fg(theme.text_secondary))
            .render(chunks[3], buf);
    }
}
