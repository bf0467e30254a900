use crate::model::{FavoriteSet, WallpaperRecord};
use crate::widgets::common::{focused_block, heart};
use crate::widgets::theme::get_theme;
use crossterm::event::KeyCode;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

const COLUMNS: usize = 2;
const TILE_HEIGHT: u16 = 4;

/// Two-column grid of wallpaper tiles with a movable selection.
///
/// The grid holds only its cursor; the items and their favorite marks are
/// passed in on every call.
#[derive(Debug, Default)]
pub struct WallpaperGrid {
    selected: usize,
    first_row: usize,
}

impl WallpaperGrid {
    pub fn selected(&self, len: usize) -> Option<usize> {
        if len == 0 {
            None
        } else {
            Some(self.selected.min(len - 1))
        }
    }

    pub fn select(&mut self, idx: usize) {
        self.selected = idx;
    }

    /// Moves the selection for arrow/hjkl keys. Returns whether the key
    /// was consumed.
    pub fn handle_nav(&mut self, code: KeyCode, len: usize) -> bool {
        if len == 0 {
            return matches!(
                code,
                KeyCode::Left
                    | KeyCode::Right
                    | KeyCode::Up
                    | KeyCode::Down
                    | KeyCode::Char('h' | 'j' | 'k' | 'l')
            );
        }
        self.selected = self.selected.min(len - 1);

        match code {
            KeyCode::Left | KeyCode::Char('h') => {
                if self.selected % COLUMNS > 0 {
                    self.selected -= 1;
                }
            }
            KeyCode::Right | KeyCode::Char('l') => {
                if self.selected % COLUMNS < COLUMNS - 1 && self.selected + 1 < len {
                    self.selected += 1;
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if self.selected >= COLUMNS {
                    self.selected -= COLUMNS;
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + COLUMNS < len {
                    self.selected += COLUMNS;
                }
            }
            _ => return false,
        }
        true
    }

    pub fn render(
        &mut self,
        title: &str,
        items: &[&WallpaperRecord],
        favorites: &FavoriteSet,
        area: Rect,
        buf: &mut Buffer,
        is_focused: bool,
    ) {
        let block = focused_block(title, is_focused);
        let inner = block.inner(area);
        block.render(area, buf);

        let Some(selected) = self.selected(items.len()) else {
            return;
        };
        if inner.width < 4 || inner.height < TILE_HEIGHT {
            return;
        }

        let visible_rows = (inner.height / TILE_HEIGHT) as usize;
        let selected_row = selected / COLUMNS;
        if selected_row < self.first_row {
            self.first_row = selected_row;
        } else if selected_row >= self.first_row + visible_rows {
            self.first_row = selected_row + 1 - visible_rows;
        }

        let tile_width = inner.width / COLUMNS as u16;
        let theme = get_theme();

        for (idx, record) in items.iter().enumerate().skip(self.first_row * COLUMNS) {
            let row = idx / COLUMNS - self.first_row;
            if row >= visible_rows {
                break;
            }
            let col = idx % COLUMNS;
            let tile = Rect::new(
                inner.x + col as u16 * tile_width,
                inner.y + row as u16 * TILE_HEIGHT,
                tile_width,
                TILE_HEIGHT,
            );

            let is_selected = idx == selected;
            let border_style = if is_selected && is_focused {
                Style::default().fg(theme.accent)
            } else {
                Style::default().fg(theme.border_unfocused)
            };
            let tile_block = Block::default()
                .borders(Borders::ALL)
                .border_type(if is_selected { BorderType::Thick } else { BorderType::Plain })
                .border_style(border_style);

            let id_style = Style::default()
                .fg(theme.text_primary)
                .add_modifier(Modifier::BOLD);
            let lines = vec![
                Line::from(vec![
                    Span::styled(record.id.to_string(), id_style),
                    Span::raw("  "),
                    heart(favorites.contains(record.id)),
                ]),
                Line::from(Span::styled(
                    record.title.as_str(),
                    Style::default().fg(theme.text_secondary),
                )),
            ];

            Paragraph::new(lines).block(tile_block).render(tile, buf);
        }
    }
}
