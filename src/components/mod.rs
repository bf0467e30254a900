use crate::event::AppMsg;
use crate::model::{FavoriteSet, WallpaperRecord};
use ratatui::{buffer::Buffer, layout::Rect};

pub mod favorites;
pub mod gradient_builder;
pub mod grid;
pub mod home;
pub mod notices;
pub mod preview;

/// Everything a screen may read during one update or render pass.
///
/// Built fresh from the store's current snapshot each time, so no screen
/// ever keeps favorite state of its own.
#[derive(Clone, Copy)]
pub struct ViewContext<'a> {
    pub catalog: &'a [WallpaperRecord],
    pub favorites: &'a FavoriteSet,
}

impl ViewContext<'_> {
    pub fn is_favorite(&self, record: &WallpaperRecord) -> bool {
        self.favorites.contains(record.id)
    }
}

pub trait Component {
    fn update(&mut self, msg: &AppMsg, ctx: &ViewContext) -> Option<AppMsg>;

    fn render(&mut self, area: Rect, buf: &mut Buffer, ctx: &ViewContext, is_focused: bool);
}

#[cfg(test)]
pub(crate) mod test_util {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::buffer::Buffer;

    pub fn key(code: KeyCode) -> crate::event::AppMsg {
        crate::event::AppMsg::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    pub fn buffer_text(buf: &Buffer) -> String {
        let area = buf.area;
        let mut out = String::new();
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }
}
