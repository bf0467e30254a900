use super::grid::WallpaperGrid;
use super::{Component, ViewContext};
use crate::event::AppMsg;
use crate::model::Route;
use crate::widgets::common::{focused_block, key_hints};
use crate::widgets::theme::get_theme;
use crossterm::event::KeyCode;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    widgets::{Paragraph, Widget},
};

#[derive(Debug, Default)]
pub struct FavoritesState {
    grid: WallpaperGrid,
}

impl Component for FavoritesState {
    fn update(&mut self, msg: &AppMsg, ctx: &ViewContext) -> Option<AppMsg> {
        let AppMsg::Key(key) = msg else {
            return None;
        };
        let items = ctx.favorites.filter_catalog(ctx.catalog);
        if self.grid.handle_nav(key.code, items.len()) {
            return None;
        }

        let selected = self.grid.selected(items.len()).map(|i| items[i]);
        match key.code {
            KeyCode::Enter => selected.map(|w| {
                AppMsg::Navigate(Route::Preview {
                    wallpaper: w.clone(),
                })
            }),
            KeyCode::Char('f') | KeyCode::Char(' ') => {
                selected.map(|w| AppMsg::ToggleFavorite(w.id))
            }
            KeyCode::Esc | KeyCode::Backspace => Some(AppMsg::Back),
            _ => None,
        }
    }

    fn render(&mut self, area: Rect, buf: &mut Buffer, ctx: &ViewContext, is_focused: bool) {
        let theme = get_theme();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(4),
                Constraint::Length(1),
            ])
            .split(area);

        Paragraph::new("← Favorites")
            .style(
                Style::default()
                    .fg(theme.text_primary)
                    .add_modifier(Modifier::BOLD),
            )
            .render(chunks[0], buf);

        let items = ctx.favorites.filter_catalog(ctx.catalog);
        if items.is_empty() {
            let block = focused_block("Favorites", is_focused);
            Paragraph::new("No favorites yet")
                .alignment(Alignment::Center)
                .style(Style::default().fg(theme.text_secondary))
                .block(block)
                .render(chunks[1], buf);
        } else {
            self.grid
                .render("Favorites", &items, ctx.favorites, chunks[1], buf, is_focused);
        }

        let hints = key_hints(&[("Enter", "preview"), ("f", "unfavorite"), ("Esc", "back")]);
        Paragraph::new(hints)
            .style(Style::default().fg(theme.text_secondary))
            .render(chunks[2], buf);
    }
}
