use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(transparent)]
pub struct WallpaperId(pub i64);

impl fmt::Display for WallpaperId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for WallpaperId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// Reference to a wallpaper image: a URI or a filesystem path.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct ImageRef(String);

impl ImageRef {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Path on disk if this reference points at a local file.
    ///
    /// `file://` URIs and plain paths are local; anything else with a
    /// scheme (`https://`, `content://`, ...) is not.
    pub fn local_path(&self) -> Option<PathBuf> {
        if let Some(rest) = self.0.strip_prefix("file://") {
            return Some(PathBuf::from(rest));
        }
        if self.0.contains("://") {
            return None;
        }
        if self.0.is_empty() {
            return None;
        }
        Some(PathBuf::from(&self.0))
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct WallpaperRecord {
    pub id: WallpaperId,
    pub title: String,
    pub image: ImageRef,
}

impl WallpaperRecord {
    pub fn new(id: i64, title: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            id: WallpaperId(id),
            title: title.into(),
            image: ImageRef::new(image),
        }
    }
}
