use super::grid::WallpaperGrid;
use super::{Component, ViewContext};
use crate::event::AppMsg;
use crate::model::Route;
use crate::widgets::common::key_hints;
use crate::widgets::theme::get_theme;
use crossterm::event::KeyCode;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

#[derive(Debug, Default)]
pub struct HomeState {
    grid: WallpaperGrid,
}

impl Component for HomeState {
    fn update(&mut self, msg: &AppMsg, ctx: &ViewContext) -> Option<AppMsg> {
        let AppMsg::Key(key) = msg else {
            return None;
        };
        let len = ctx.catalog.len();
        if self.grid.handle_nav(key.code, len) {
            return None;
        }

        let selected = self.grid.selected(len).map(|i| &ctx.catalog[i]);
        match key.code {
            KeyCode::Enter => selected.map(|w| {
                AppMsg::Navigate(Route::Preview {
                    wallpaper: w.clone(),
                })
            }),
            KeyCode::Char('f') | KeyCode::Char(' ') => {
                selected.map(|w| AppMsg::ToggleFavorite(w.id))
            }
            KeyCode::Char('v') => Some(AppMsg::Navigate(Route::Favorites)),
            KeyCode::Char('g') => Some(AppMsg::Navigate(Route::GradientBuilder)),
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

        let header = Line::from(vec![
            Span::styled(
                "Wavy Walls",
                Style::default()
                    .fg(theme.text_primary)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("   "),
            Span::styled(
                format!("♥ {}", ctx.favorites.filter_catalog(ctx.catalog).len()),
                Style::default().fg(theme.heart_on),
            ),
        ]);
        Paragraph::new(header).render(chunks[0], buf);

        let items: Vec<_> = ctx.catalog.iter().collect();
        if items.is_empty() {
            Paragraph::new("The catalog is empty")
                .style(Style::default().fg(theme.text_secondary))
                .render(chunks[1], buf);
        } else {
            self.grid
                .render("Wallpapers", &items, ctx.favorites, chunks[1], buf, is_focused);
        }

        let hints = key_hints(&[
            ("Enter", "preview"),
            ("f", "favorite"),
            ("v", "favorites"),
            ("g", "gradient"),
            ("q", "quit"),
        ]);
        Paragraph::new(hints)
            .style(Style::default().fg(theme.text_secondary))
            .render(chunks[2], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::test_util::{buffer_text, key};
    use crate::model::{FavoriteSet, StaticCatalog, WallpaperCatalog, WallpaperId};

    #[test]
    fn enter_opens_preview_of_selected() {
        let catalog = StaticCatalog::builtin();
        let favorites = FavoriteSet::new();
        let ctx = ViewContext {
            catalog: catalog.all(),
            favorites: &favorites,
        };
        let mut home = HomeState::default();

        home.update(&key(KeyCode::Right), &ctx);
        match home.update(&key(KeyCode::Enter), &ctx) {
            Some(AppMsg::Navigate(Route::Preview { wallpaper })) => {
                assert_eq!(wallpaper.id, WallpaperId(719));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn f_requests_toggle_without_touching_state() {
        let catalog = StaticCatalog::builtin();
        let favorites = FavoriteSet::new();
        let ctx = ViewContext {
            catalog: catalog.all(),
            favorites: &favorites,
        };
        let mut home = HomeState::default();

        let msg = home.update(&key(KeyCode::Char('f')), &ctx);
        assert!(matches!(msg, Some(AppMsg::ToggleFavorite(WallpaperId(720)))));
        assert!(favorites.is_empty());
    }

    #[test]
    fn renders_filled_heart_only_for_favorites() {
        let catalog = StaticCatalog::builtin();
        let favorites: FavoriteSet = [WallpaperId(720)].into_iter().collect();
        let ctx = ViewContext {
            catalog: catalog.all(),
            favorites: &favorites,
        };
        let mut home = HomeState::default();

        let area = Rect::new(0, 0, 60, 30);
        let mut buf = Buffer::empty(area);
        home.render(area, &mut buf, &ctx, true);
        let text = buffer_text(&buf);

        assert!(text.contains("Wavy Walls"));
        assert_eq!(text.matches('♥').count(), 2, "header count + one tile");
        assert_eq!(text.matches('♡').count(), 5);
    }
}
