use anyhow::Result;
use crossbeam_channel::{Receiver, Sender, unbounded};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::{debug, info};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::{Block, Widget},
};
use ratatui_image::picker::Picker;
use std::io;
use std::sync::Arc;

use crate::components::{
    Component, ViewContext, favorites::FavoritesState, gradient_builder::GradientBuilderState,
    home::HomeState, notices::NoticesState, preview::PreviewState,
};
use crate::config::Config;
use crate::event::AppMsg;
use crate::model::{FavoritesStore, Navigator, Route, StaticCatalog, WallpaperCatalog};
use crate::service::WallpaperService;
use crate::service_worker::ServiceWorker;
use crate::widgets::theme::get_theme;

const NOTICES_HEIGHT: u16 = 6;

/// Root of the app. Owns the favorites store and hands a fresh snapshot
/// of it to every screen on each update and render pass.
pub struct App {
    pub config: Config,
    catalog: StaticCatalog,
    store: FavoritesStore,
    navigator: Navigator,
    home: HomeState,
    favorites: FavoritesState,
    preview: PreviewState,
    gradient: GradientBuilderState,
    notices: NoticesState,
    worker: ServiceWorker,
    rx: Receiver<AppMsg>,
    should_quit: bool,
}

impl App {
    pub fn new(
        config: Config,
        catalog: StaticCatalog,
        service: Arc<dyn WallpaperService>,
        picker: Option<Picker>,
    ) -> Self {
        let (tx, rx): (Sender<AppMsg>, Receiver<AppMsg>) = unbounded();
        let mut notices = NoticesState::default();
        notices.push(format!("Loaded {} wallpapers", catalog.len()));

        Self {
            config,
            catalog,
            store: FavoritesStore::new(),
            navigator: Navigator::new(),
            home: HomeState::default(),
            favorites: FavoritesState::default(),
            preview: PreviewState::new(picker),
            gradient: GradientBuilderState::default(),
            notices,
            worker: ServiceWorker::new(tx, service),
            rx,
            should_quit: false,
        }
    }

    pub fn store(&self) -> &FavoritesStore {
        &self.store
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn notices(&self) -> &NoticesState {
        &self.notices
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Applies `msg` and any follow-up messages the screens return.
    pub fn dispatch(&mut self, msg: AppMsg) {
        let mut next = Some(msg);
        while let Some(msg) = next.take() {
            next = self.handle(msg);
        }
    }

    /// Applies everything background workers have reported so far.
    pub fn drain_pending(&mut self) {
        while let Ok(msg) = self.rx.try_recv() {
            self.dispatch(msg);
        }
    }

    fn handle(&mut self, msg: AppMsg) -> Option<AppMsg> {
        match msg {
            AppMsg::Tick => None,
            AppMsg::Quit => {
                self.should_quit = true;
                None
            }
            AppMsg::Key(key) => self.handle_key(key),
            AppMsg::ToggleFavorite(id) => {
                self.store.toggle_favorite(id);
                None
            }
            AppMsg::Navigate(route) => {
                self.navigator.navigate(route);
                self.sync_route();
                None
            }
            AppMsg::Back => {
                if self.navigator.back() {
                    self.sync_route();
                }
                None
            }
            AppMsg::Download(image) => {
                info!("download requested for {}", image);
                self.worker.start_download(image);
                None
            }
            AppMsg::SetWallpaper(image, target) => {
                info!("set wallpaper requested for {} ({})", image, target.label());
                self.worker.start_set_wallpaper(image, target);
                None
            }
            AppMsg::PreviewLoaded(..) | AppMsg::PreviewFailed(..) => {
                let favorites = self.store.current_favorites();
                let ctx = ViewContext {
                    catalog: self.catalog.all(),
                    favorites: &favorites,
                };
                self.preview.update(&msg, &ctx)
            }
            AppMsg::ServiceFinished(_) | AppMsg::Notice(_) | AppMsg::ErrorOccurred(_) => {
                let favorites = self.store.current_favorites();
                let ctx = ViewContext {
                    catalog: self.catalog.all(),
                    favorites: &favorites,
                };
                self.notices.update(&msg, &ctx)
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<AppMsg> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Some(AppMsg::Quit);
        }
        let typing = self.gradient.is_editing() || self.preview.is_menu_open();
        if key.code == KeyCode::Char('q') && !typing {
            return Some(AppMsg::Quit);
        }

        let favorites = self.store.current_favorites();
        let ctx = ViewContext {
            catalog: self.catalog.all(),
            favorites: &favorites,
        };
        let msg = AppMsg::Key(key);
        match self.navigator.current() {
            Route::Home => self.home.update(&msg, &ctx),
            Route::Favorites => self.favorites.update(&msg, &ctx),
            Route::Preview { .. } => self.preview.update(&msg, &ctx),
            Route::GradientBuilder => self.gradient.update(&msg, &ctx),
        }
    }

    fn sync_route(&mut self) {
        if let Route::Preview { wallpaper } = self.navigator.current()
            && let Some(image) = self.preview.show(wallpaper)
        {
            debug!("decoding preview {}", image);
            self.worker.start_preview_load(image);
        }
    }

    /// Draws one frame. Every screen reads the same favorites snapshot.
    pub fn render(&mut self, area: Rect, buf: &mut Buffer) {
        let theme = get_theme();
        Block::default()
            .style(Style::default().bg(theme.background))
            .render(area, buf);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(6), Constraint::Length(NOTICES_HEIGHT)])
            .split(area);

        let favorites = self.store.current_favorites();
        let ctx = ViewContext {
            catalog: self.catalog.all(),
            favorites: &favorites,
        };

        match self.navigator.current() {
            Route::Home => self.home.render(chunks[0], buf, &ctx, true),
            Route::Favorites => self.favorites.render(chunks[0], buf, &ctx, true),
            Route::Preview { .. } => self.preview.render(chunks[0], buf, &ctx, true),
            Route::GradientBuilder => self.gradient.render(chunks[0], buf, &ctx, true),
        }
        self.notices.render(chunks[1], buf, &ctx, false);
    }

    pub fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.hide_cursor()?;

        let res = self.event_loop(&mut terminal);

        // Restore terminal
        if let Err(e) = restore_terminal(&mut terminal) {
            return res.and(Err(e));
        }
        res
    }

    fn event_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        let tick_rate = self.config.tick_rate();
        info!("entering event loop");

        while !self.should_quit {
            terminal.draw(|f| {
                let area = f.area();
                self.render(area, f.buffer_mut());
            })?;

            if event::poll(tick_rate)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        self.dispatch(AppMsg::Key(key));
                    }
                    Event::Resize(_, _) => {}
                    _ => {}
                }
            } else {
                self.dispatch(AppMsg::Tick);
            }

            self.drain_pending();
        }

        info!("leaving event loop");
        Ok(())
    }
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    terminal.show_cursor().ok();
    disable_raw_mode().ok();
    // LeaveAlternateScreen must be executed on the same stdout the backend uses
    let mut out = io::stdout();
    execute!(out, LeaveAlternateScreen)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::test_util::{buffer_text, key};
    use crate::model::{ImageRef, WallpaperId, WallpaperRecord};
    use crate::service::{Delivery, PlaceholderService, ServiceFailure, WallpaperTarget};
    use std::time::Duration;

    fn app() -> App {
        App::new(
            Config::default(),
            StaticCatalog::builtin(),
            Arc::new(PlaceholderService),
            None,
        )
    }

    fn wait_for_worker(app: &mut App) {
        let msg = app
            .rx
            .recv_timeout(Duration::from_secs(5))
            .expect("worker did not report");
        app.dispatch(msg);
    }

    fn screen(app: &mut App) -> String {
        let area = Rect::new(0, 0, 70, 36);
        let mut buf = Buffer::empty(area);
        app.render(area, &mut buf);
        buffer_text(&buf)
    }

    #[test]
    fn favorites_scenario_with_stale_id() {
        let mut app = app();
        app.dispatch(AppMsg::ToggleFavorite(WallpaperId(719)));
        app.dispatch(AppMsg::ToggleFavorite(WallpaperId(999)));

        let favorites = app.store().current_favorites();
        let expected: crate::model::FavoriteSet =
            [WallpaperId(719), WallpaperId(999)].into_iter().collect();
        assert_eq!(*favorites, expected);

        app.dispatch(AppMsg::Navigate(Route::Favorites));
        let text = screen(&mut app);
        assert!(text.contains("719"));
        assert!(!text.contains("999"));
    }

    #[test]
    fn toggle_on_home_shows_up_in_favorites() {
        let mut app = app();
        app.dispatch(key(KeyCode::Char('f')));
        assert!(app.store().is_favorite(WallpaperId(720)));

        app.dispatch(key(KeyCode::Char('v')));
        assert_eq!(app.navigator().current(), &Route::Favorites);
        assert!(screen(&mut app).contains("720"));

        // Unfavorite from the favorites screen; home reflects it after going back.
        app.dispatch(key(KeyCode::Char('f')));
        assert!(app.store().current_favorites().is_empty());
        app.dispatch(key(KeyCode::Esc));
        assert_eq!(app.navigator().current(), &Route::Home);
        let text = screen(&mut app);
        assert!(text.contains("♥ 0"));
        assert_eq!(text.matches('♥').count(), 1);
    }

    #[test]
    fn preview_favorite_is_visible_on_home() {
        let mut app = app();
        app.dispatch(key(KeyCode::Down));
        app.dispatch(key(KeyCode::Enter));
        match app.navigator().current() {
            Route::Preview { wallpaper } => assert_eq!(wallpaper.id, WallpaperId(718)),
            other => panic!("unexpected route {:?}", other),
        }

        app.dispatch(key(KeyCode::Char('f')));
        app.dispatch(key(KeyCode::Esc));
        assert!(app.store().is_favorite(WallpaperId(718)));
        assert!(screen(&mut app).contains("♥ 1"));
    }

    #[test]
    fn download_reports_notice_and_success() {
        let mut app = app();
        app.dispatch(AppMsg::Navigate(Route::Preview {
            wallpaper: WallpaperRecord::new(720, "Droid Beauty", "https://picsum.photos/id/1015/400/800"),
        }));
        app.dispatch(key(KeyCode::Char('d')));
        wait_for_worker(&mut app);

        assert_eq!(app.notices().last(), Some("Success: Wallpaper downloaded successfully!"));
        assert!(app.store().current_favorites().is_empty());
    }

    #[test]
    fn set_wallpaper_both_via_menu() {
        let mut app = app();
        app.dispatch(key(KeyCode::Enter));
        app.dispatch(key(KeyCode::Char('s')));
        // 'q' is swallowed by the open menu.
        app.dispatch(key(KeyCode::Char('q')));
        assert!(!app.should_quit());

        app.dispatch(key(KeyCode::Down));
        app.dispatch(key(KeyCode::Down));
        app.dispatch(key(KeyCode::Enter));
        wait_for_worker(&mut app);

        let text = app.notices().notices.join("\n");
        assert!(text.contains("Wallpaper setting functionality for BOTH will be implemented soon."));
        assert!(text.contains("Wallpaper set on both screens!"));
    }

    #[test]
    fn failing_service_gives_generic_retry_message() {
        struct Offline;
        impl WallpaperService for Offline {
            fn download(&self, _image: &ImageRef) -> std::result::Result<Delivery, ServiceFailure> {
                Err(ServiceFailure::Unavailable)
            }
            fn set_wallpaper(
                &self,
                _image: &ImageRef,
                _target: WallpaperTarget,
            ) -> std::result::Result<Delivery, ServiceFailure> {
                Err(ServiceFailure::Rejected)
            }
        }

        let mut app = App::new(Config::default(), StaticCatalog::builtin(), Arc::new(Offline), None);
        app.dispatch(AppMsg::SetWallpaper(ImageRef::new("x.png"), WallpaperTarget::Home));
        wait_for_worker(&mut app);
        assert_eq!(
            app.notices().last(),
            Some("ERROR: Failed to set wallpaper. Please try again.")
        );
    }

    #[test]
    fn failed_preview_is_decoded_again_on_revisit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("late.png");
        let record = WallpaperRecord::new(1, "Late", path.to_string_lossy());
        let mut app = App::new(
            Config::default(),
            StaticCatalog::new(vec![record.clone()]),
            Arc::new(PlaceholderService),
            Some(Picker::from_fontsize((8, 16))),
        );

        app.dispatch(AppMsg::Navigate(Route::Preview {
            wallpaper: record.clone(),
        }));
        let msg = app.rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert!(matches!(msg, AppMsg::PreviewFailed(..)));
        app.dispatch(msg);
        assert!(screen(&mut app).contains("Could not load image"));

        image::RgbaImage::new(4, 8).save(&path).unwrap();
        app.dispatch(AppMsg::Back);
        app.dispatch(AppMsg::Navigate(Route::Preview { wallpaper: record }));
        let msg = app.rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert!(matches!(msg, AppMsg::PreviewLoaded(..)));
        app.dispatch(msg);
        assert!(!screen(&mut app).contains("Could not load image"));
    }

    #[test]
    fn gradient_screen_and_back() {
        let mut app = app();
        app.dispatch(key(KeyCode::Char('g')));
        assert_eq!(app.navigator().current(), &Route::GradientBuilder);
        assert!(screen(&mut app).contains("Gradient Direction"));

        app.dispatch(key(KeyCode::Esc));
        assert_eq!(app.navigator().current(), &Route::Home);
    }

    #[test]
    fn q_quits_from_home() {
        let mut app = app();
        app.dispatch(key(KeyCode::Char('q')));
        assert!(app.should_quit());
    }
}
