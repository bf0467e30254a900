use crossterm::event::KeyEvent;
use image::DynamicImage;

use crate::model::{ImageRef, Route, WallpaperId};
use crate::service::{ServiceReport, WallpaperTarget};

#[derive(Clone, Debug)]
pub enum AppMsg {
    Tick,
    Key(KeyEvent),
    Quit,

    // Favorites
    ToggleFavorite(WallpaperId),

    // Navigation
    Navigate(Route),
    Back,

    // Collaborators
    Download(ImageRef),
    SetWallpaper(ImageRef, WallpaperTarget),
    ServiceFinished(ServiceReport),

    // Preview image decoding
    PreviewLoaded(ImageRef, DynamicImage),
    PreviewFailed(ImageRef, String),

    // General
    Notice(String),
    ErrorOccurred(String),
}
