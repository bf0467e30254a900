pub mod catalog;
pub mod favorites;
pub mod gradient;
pub mod route;
pub mod wallpaper;

pub use catalog::{StaticCatalog, WallpaperCatalog};
pub use favorites::{FavoriteSet, FavoritesStore};
pub use route::{Navigator, Route};
pub use wallpaper::{ImageRef, WallpaperId, WallpaperRecord};
