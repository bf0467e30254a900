// Download and set-wallpaper collaborators

use crate::model::ImageRef;
use log::info;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WallpaperTarget {
    Home,
    Lock,
    Both,
}

impl WallpaperTarget {
    pub const ALL: [WallpaperTarget; 3] =
        [WallpaperTarget::Home, WallpaperTarget::Lock, WallpaperTarget::Both];

    pub fn label(&self) -> &'static str {
        match self {
            WallpaperTarget::Home => "HOME",
            WallpaperTarget::Lock => "LOCK",
            WallpaperTarget::Both => "BOTH",
        }
    }

    pub fn menu_text(&self) -> &'static str {
        match self {
            WallpaperTarget::Home => "Home Screen",
            WallpaperTarget::Lock => "Lock Screen",
            WallpaperTarget::Both => "Both",
        }
    }
}

/// Success payload. `notice` is shown to the user when present.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Delivery {
    pub notice: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ServiceFailure {
    Unsupported,
    Unavailable,
    Rejected,
}

impl fmt::Display for ServiceFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceFailure::Unsupported => write!(f, "operation not supported on this platform"),
            ServiceFailure::Unavailable => write!(f, "service unavailable"),
            ServiceFailure::Rejected => write!(f, "request rejected"),
        }
    }
}

impl std::error::Error for ServiceFailure {}

pub trait WallpaperService: Send + Sync {
    fn download(&self, image: &ImageRef) -> Result<Delivery, ServiceFailure>;

    fn set_wallpaper(
        &self,
        image: &ImageRef,
        target: WallpaperTarget,
    ) -> Result<Delivery, ServiceFailure>;
}

/// Stand-in until real download and wallpaper APIs are wired up.
/// Always succeeds.
#[derive(Debug, Default)]
pub struct PlaceholderService;

impl WallpaperService for PlaceholderService {
    fn download(&self, image: &ImageRef) -> Result<Delivery, ServiceFailure> {
        info!("downloading wallpaper: {}", image);
        Ok(Delivery {
            notice: Some("Wallpaper download functionality will be implemented soon.".to_string()),
        })
    }

    fn set_wallpaper(
        &self,
        image: &ImageRef,
        target: WallpaperTarget,
    ) -> Result<Delivery, ServiceFailure> {
        info!("setting wallpaper: {} for screen: {}", image, target.label());
        Ok(Delivery {
            notice: Some(format!(
                "Wallpaper setting functionality for {} will be implemented soon.",
                target.label()
            )),
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ServiceAction {
    Download,
    SetWallpaper(WallpaperTarget),
}

impl ServiceAction {
    pub fn success_message(&self) -> &'static str {
        match self {
            ServiceAction::Download => "Wallpaper downloaded successfully!",
            ServiceAction::SetWallpaper(WallpaperTarget::Home) => "Wallpaper set as home screen!",
            ServiceAction::SetWallpaper(WallpaperTarget::Lock) => "Wallpaper set as lock screen!",
            ServiceAction::SetWallpaper(WallpaperTarget::Both) => "Wallpaper set on both screens!",
        }
    }

    pub fn failure_message(&self) -> &'static str {
        match self {
            ServiceAction::Download => "Failed to download wallpaper. Please try again.",
            ServiceAction::SetWallpaper(_) => "Failed to set wallpaper. Please try again.",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ServiceReport {
    pub action: ServiceAction,
    pub image: ImageRef,
    pub result: Result<Delivery, ServiceFailure>,
}

impl ServiceReport {
    /// Lines to show the user, in order. Failure detail is left out;
    /// every failure reads the same.
    pub fn user_messages(&self) -> Vec<String> {
        match &self.result {
            Ok(delivery) => {
                let mut lines = Vec::new();
                if let Some(notice) = &delivery.notice {
                    lines.push(notice.clone());
                }
                lines.push(format!("Success: {}", self.action.success_message()));
                lines
            }
            Err(_) => vec![format!("ERROR: {}", self.action.failure_message())],
        }
    }
}
