use super::{Component, ViewContext};
use crate::event::AppMsg;
use crate::model::{ImageRef, WallpaperRecord};
use crate::service::WallpaperTarget;
use crate::widgets::common::{centered_rect, focused_block, heart, key_hints};
use crate::widgets::theme::get_theme;
use crossterm::event::KeyCode;
use log::warn;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, StatefulWidget, Widget, Wrap},
};
use ratatui_image::{StatefulImage, picker::Picker, protocol::StatefulProtocol};

const MENU_CANCEL: usize = WallpaperTarget::ALL.len();

enum ImageSlot {
    Remote,
    Loading,
    Ready(StatefulProtocol),
    Failed(String),
}

pub struct PreviewState {
    picker: Option<Picker>,
    wallpaper: Option<WallpaperRecord>,
    image: ImageSlot,
    menu: Option<ListState>,
}

impl Default for PreviewState {
    fn default() -> Self {
        Self {
            picker: None,
            wallpaper: None,
            image: ImageSlot::Remote,
            menu: None,
        }
    }
}

impl PreviewState {
    pub fn new(picker: Option<Picker>) -> Self {
        Self {
            picker,
            ..Self::default()
        }
    }

    /// Points the screen at `wallpaper`. Returns the image to decode when
    /// it is a local file that is not already shown. A failed decode is
    /// retried each time the screen is opened again.
    pub fn show(&mut self, wallpaper: &WallpaperRecord) -> Option<ImageRef> {
        if self.wallpaper.as_ref() == Some(wallpaper)
            && !matches!(self.image, ImageSlot::Failed(_))
        {
            return None;
        }
        self.wallpaper = Some(wallpaper.clone());
        self.menu = None;

        if wallpaper.image.local_path().is_some() && self.picker.is_some() {
            self.image = ImageSlot::Loading;
            Some(wallpaper.image.clone())
        } else {
            self.image = ImageSlot::Remote;
            None
        }
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu.is_some()
    }

    fn is_current(&self, image: &ImageRef) -> bool {
        self.wallpaper.as_ref().is_some_and(|w| &w.image == image)
    }

    fn handle_menu_key(&mut self, code: KeyCode) -> Option<AppMsg> {
        let menu = self.menu.as_mut()?;
        let idx = menu.selected().unwrap_or(0);
        match code {
            KeyCode::Up | KeyCode::Char('k') => {
                menu.select(Some(if idx == 0 { MENU_CANCEL } else { idx - 1 }));
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                menu.select(Some(if idx >= MENU_CANCEL { 0 } else { idx + 1 }));
                None
            }
            KeyCode::Enter => {
                self.menu = None;
                let target = WallpaperTarget::ALL.get(idx)?;
                let image = self.wallpaper.as_ref()?.image.clone();
                Some(AppMsg::SetWallpaper(image, *target))
            }
            KeyCode::Esc => {
                self.menu = None;
                None
            }
            _ => None,
        }
    }

    fn render_image(&mut self, area: Rect, buf: &mut Buffer, wallpaper: &WallpaperRecord) {
        let theme = get_theme();
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border_unfocused));
        let inner = block.inner(area);
        block.render(area, buf);

        let placeholder = |text: String| {
            Paragraph::new(text)
                .alignment(Alignment::Center)
                .style(Style::default().fg(theme.text_secondary))
                .wrap(Wrap { trim: true })
        };

        match &mut self.image {
            ImageSlot::Ready(protocol) => {
                StatefulWidget::render(StatefulImage::default(), inner, buf, protocol);
            }
            ImageSlot::Loading => placeholder("Loading preview...".to_string()).render(inner, buf),
            ImageSlot::Failed(err) => {
                placeholder(format!("Could not load image: {}", err)).render(inner, buf)
            }
            ImageSlot::Remote => {
                placeholder(format!("Image: {}", wallpaper.image)).render(inner, buf)
            }
        }
    }

    fn render_menu(&mut self, area: Rect, buf: &mut Buffer) {
        let Some(menu) = self.menu.as_mut() else {
            return;
        };
        let theme = get_theme();
        let popup_area = centered_rect(50, 50, area);
        Clear.render(popup_area, buf);

        let block = focused_block("Set Wallpaper", true);
        let inner = block.inner(popup_area);
        block.render(popup_area, buf);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Min(1)])
            .split(inner);
        Paragraph::new("Choose where to set the wallpaper:")
            .style(Style::default().fg(theme.text_primary))
            .render(chunks[0], buf);

        let mut items: Vec<ListItem> = WallpaperTarget::ALL
            .iter()
            .map(|t| ListItem::new(t.menu_text()))
            .collect();
        items.push(ListItem::new("Cancel").style(Style::default().fg(theme.text_secondary)));

        let list = List::new(items)
            .highlight_style(
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol(">> ");
        StatefulWidget::render(list, chunks[1], buf, menu);
    }
}

impl Component for PreviewState {
    fn update(&mut self, msg: &AppMsg, _ctx: &ViewContext) -> Option<AppMsg> {
        match msg {
            AppMsg::PreviewLoaded(image, decoded) => {
                if self.is_current(image)
                    && let Some(picker) = self.picker.as_mut()
                {
                    self.image = ImageSlot::Ready(picker.new_resize_protocol(decoded.clone()));
                }
                None
            }
            AppMsg::PreviewFailed(image, err) => {
                if self.is_current(image) {
                    warn!("preview failed for {}: {}", image, err);
                    self.image = ImageSlot::Failed(err.clone());
                }
                None
            }
            AppMsg::Key(key) => {
                if self.menu.is_some() {
                    return self.handle_menu_key(key.code);
                }
                let wallpaper = self.wallpaper.as_ref()?;
                match key.code {
                    KeyCode::Char('d') => Some(AppMsg::Download(wallpaper.image.clone())),
                    KeyCode::Char('s') => {
                        let mut menu = ListState::default();
                        menu.select(Some(0));
                        self.menu = Some(menu);
                        None
                    }
                    KeyCode::Char('f') | KeyCode::Char(' ') => {
                        Some(AppMsg::ToggleFavorite(wallpaper.id))
                    }
                    KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('x') => Some(AppMsg::Back),
                    _ => None,
                }
            }
            _ => None,
        }
    }

    fn render(&mut self, area: Rect, buf: &mut Buffer, ctx: &ViewContext, is_focused: bool) {
        let Some(wallpaper) = self.wallpaper.clone() else {
            return;
        };
        let theme = get_theme();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(3),
                Constraint::Length(1),
            ])
            .split(area);

        let title = Line::from(vec![
            Span::styled(
                wallpaper.title.as_str(),
                Style::default()
                    .fg(theme.text_primary)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  #{}  ", wallpaper.id),
                Style::default().fg(theme.text_secondary),
            ),
            heart(ctx.is_favorite(&wallpaper)),
        ]);
        Paragraph::new(title).render(chunks[0], buf);

        self.render_image(chunks[1], buf, &wallpaper);

        let hints = key_hints(&[
            ("d", "Download"),
            ("s", "Set Wallpaper"),
            ("f", "Favorite"),
            ("Esc", "close"),
        ]);
        Paragraph::new(hints)
            .style(Style::default().fg(if is_focused {
                theme.text_primary
            } else {
                theme.text_secondary
            }))
            .render(chunks[2], buf);

        self.render_menu(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::test_util::{buffer_text, key};
    use crate::model::{FavoriteSet, WallpaperId};

    fn record() -> WallpaperRecord {
        WallpaperRecord::new(719, "Droid Beauty", "https://picsum.photos/id/1016/400/800")
    }

    fn ctx_with<'a>(favorites: &'a FavoriteSet, catalog: &'a [WallpaperRecord]) -> ViewContext<'a> {
        ViewContext { catalog, favorites }
    }

    #[test]
    fn remote_image_needs_no_decode() {
        let mut preview = PreviewState::new(None);
        assert!(preview.show(&record()).is_none());
        // Same record again is a no-op.
        assert!(preview.show(&record()).is_none());
    }

    #[test]
    fn failed_local_image_is_requested_again() {
        let mut preview = PreviewState::new(Some(Picker::from_fontsize((8, 16))));
        let local = WallpaperRecord::new(1, "Lake", "/walls/lake.png");
        assert_eq!(preview.show(&local), Some(local.image.clone()));
        // Still loading: no second request.
        assert!(preview.show(&local).is_none());

        let favorites = FavoriteSet::new();
        let catalog = vec![local.clone()];
        let ctx = ctx_with(&favorites, &catalog);
        preview.update(
            &AppMsg::PreviewFailed(local.image.clone(), "not found".to_string()),
            &ctx,
        );
        assert_eq!(preview.show(&local), Some(local.image.clone()));
    }

    #[test]
    fn local_image_without_picker_is_not_decoded() {
        let mut preview = PreviewState::new(None);
        let local = WallpaperRecord::new(1, "Lake", "/walls/lake.png");
        assert!(preview.show(&local).is_none());
    }

    #[test]
    fn action_keys_map_to_messages() {
        let favorites = FavoriteSet::new();
        let catalog = vec![record()];
        let ctx = ctx_with(&favorites, &catalog);
        let mut preview = PreviewState::new(None);
        preview.show(&record());

        assert!(matches!(
            preview.update(&key(KeyCode::Char('d')), &ctx),
            Some(AppMsg::Download(_))
        ));
        assert!(matches!(
            preview.update(&key(KeyCode::Char('f')), &ctx),
            Some(AppMsg::ToggleFavorite(WallpaperId(719)))
        ));
        assert!(matches!(preview.update(&key(KeyCode::Esc), &ctx), Some(AppMsg::Back)));
    }

    #[test]
    fn target_menu_picks_lock_screen() {
        let favorites = FavoriteSet::new();
        let catalog = vec![record()];
        let ctx = ctx_with(&favorites, &catalog);
        let mut preview = PreviewState::new(None);
        preview.show(&record());

        assert!(preview.update(&key(KeyCode::Char('s')), &ctx).is_none());
        assert!(preview.is_menu_open());
        preview.update(&key(KeyCode::Down), &ctx);

        match preview.update(&key(KeyCode::Enter), &ctx) {
            Some(AppMsg::SetWallpaper(image, target)) => {
                assert_eq!(image, record().image);
                assert_eq!(target, WallpaperTarget::Lock);
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(!preview.is_menu_open());
    }

    #[test]
    fn cancel_closes_menu_without_request() {
        let favorites = FavoriteSet::new();
        let catalog = vec![record()];
        let ctx = ctx_with(&favorites, &catalog);
        let mut preview = PreviewState::new(None);
        preview.show(&record());

        preview.update(&key(KeyCode::Char('s')), &ctx);
        preview.update(&key(KeyCode::Up), &ctx);
        assert!(preview.update(&key(KeyCode::Enter), &ctx).is_none());
        assert!(!preview.is_menu_open());
    }

    #[test]
    fn heart_follows_current_snapshot() {
        let catalog = vec![record()];
        let mut preview = PreviewState::new(None);
        preview.show(&record());
        let area = Rect::new(0, 0, 60, 10);

        let empty = FavoriteSet::new();
        let mut buf = Buffer::empty(area);
        preview.render(area, &mut buf, &ctx_with(&empty, &catalog), true);
        assert!(buffer_text(&buf).contains('♡'));

        let liked: FavoriteSet = [WallpaperId(719)].into_iter().collect();
        let mut buf = Buffer::empty(area);
        preview.render(area, &mut buf, &ctx_with(&liked, &catalog), true);
        let text = buffer_text(&buf);
        assert!(text.contains('♥'));
        assert!(!text.contains('♡'));
    }
}
