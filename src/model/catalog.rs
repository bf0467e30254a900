use super::wallpaper::WallpaperRecord;
use crate::config::Config;
use anyhow::{Context, Result, bail};
use log::info;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

const IMAGE_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "webp", "bmp", "gif"];

pub trait WallpaperCatalog {
    fn all(&self) -> &[WallpaperRecord];
}

#[derive(Clone, Debug, Default)]
pub struct StaticCatalog {
    records: Vec<WallpaperRecord>,
}

#[derive(Deserialize)]
struct CatalogFile {
    #[serde(default)]
    wallpaper: Vec<WallpaperRecord>,
}

impl StaticCatalog {
    pub fn new(records: Vec<WallpaperRecord>) -> Self {
        Self { records }
    }

    pub fn builtin() -> Self {
        let photos = [
            (720, 1015),
            (719, 1016),
            (718, 1018),
            (717, 1019),
            (716, 1020),
            (715, 1021),
        ];
        let records = photos
            .iter()
            .map(|(id, photo)| {
                WallpaperRecord::new(
                    *id,
                    "Droid Beauty",
                    format!("https://picsum.photos/id/{}/400/800", photo),
                )
            })
            .collect();
        Self { records }
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        let file: CatalogFile = toml::from_str(s).context("invalid catalog file")?;

        let mut seen = HashSet::new();
        for record in &file.wallpaper {
            if !seen.insert(record.id) {
                bail!("duplicate wallpaper id {} in catalog", record.id);
            }
        }

        Ok(Self {
            records: file.wallpaper,
        })
    }

    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read catalog {}", path.display()))?;
        Self::from_toml_str(&content)
    }

    /// Builds a catalog from the image files under `dir`.
    ///
    /// Ids are assigned from 1 in path order, so they are stable for a
    /// given directory listing.
    pub fn from_directory<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            bail!("wallpaper directory {} does not exist", dir.display());
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(dir)
            .max_depth(2)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            if let Some(ext) = path.extension() {
                let ext_str = ext.to_string_lossy().to_lowercase();
                if IMAGE_EXTENSIONS.contains(&ext_str.as_str()) {
                    files.push(path.to_path_buf());
                }
            }
        }
        files.sort();

        let records = files
            .iter()
            .enumerate()
            .map(|(idx, path)| {
                let title = path
                    .file_stem()
                    .map(|s| s.to_string_lossy().to_string())
                    .unwrap_or_else(|| "Untitled".to_string());
                WallpaperRecord::new(idx as i64 + 1, title, path.to_string_lossy())
            })
            .collect();

        Ok(Self { records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl WallpaperCatalog for StaticCatalog {
    fn all(&self) -> &[WallpaperRecord] {
        &self.records
    }
}

/// Picks the catalog source named by the config: a catalog file first,
/// then a wallpaper directory, otherwise the built-in list.
pub fn load_catalog(config: &Config) -> Result<StaticCatalog> {
    let catalog = if let Some(file) = &config.catalog_file {
        info!("loading catalog from {}", file.display());
        StaticCatalog::from_toml_file(file)?
    } else if let Some(dir) = &config.wallpaper_dir {
        info!("scanning wallpapers in {}", dir.display());
        StaticCatalog::from_directory(dir)?
    } else {
        StaticCatalog::builtin()
    };
    info!("catalog ready with {} wallpapers", catalog.len());
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::WallpaperId;
    use tempfile::tempdir;

    #[test]
    fn builtin_catalog_lists_six_droid_wallpapers() {
        let catalog = StaticCatalog::builtin();
        let ids: Vec<i64> = catalog.all().iter().map(|w| w.id.0).collect();
        assert_eq!(ids, vec![720, 719, 718, 717, 716, 715]);
        assert_eq!(
            catalog.all()[2].image.as_str(),
            "https://picsum.photos/id/1018/400/800"
        );
        assert!(catalog.all().iter().all(|w| w.title == "Droid Beauty"));
    }

    #[test]
    fn toml_catalog_parses_records_in_order() {
        let src = r#"
            [[wallpaper]]
            id = 3
            title = "Dunes"
            image = "/walls/dunes.png"

            [[wallpaper]]
            id = 1
            title = "Coast"
            image = "https://example.com/coast.jpg"
        "#;
        let catalog = StaticCatalog::from_toml_str(src).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.all()[0].title, "Dunes");
        assert_eq!(catalog.all()[1].id, WallpaperId(1));
    }

    #[test]
    fn toml_catalog_rejects_duplicate_ids() {
        let src = r#"
            [[wallpaper]]
            id = 7
            title = "A"
            image = "a.png"

            [[wallpaper]]
            id = 7
            title = "B"
            image = "b.png"
        "#;
        let err = StaticCatalog::from_toml_str(src).unwrap_err();
        assert!(err.to_string().contains("duplicate wallpaper id 7"));
    }

    #[test]
    fn empty_toml_is_empty_catalog() {
        let catalog = StaticCatalog::from_toml_str("").unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn directory_catalog_skips_non_images() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("b_forest.JPG"), b"x").unwrap();
        fs::write(dir.path().join("a_lake.png"), b"x").unwrap();
        fs::write(dir.path().join("notes.txt"), b"x").unwrap();

        let catalog = StaticCatalog::from_directory(dir.path()).unwrap();
        let titles: Vec<&str> = catalog.all().iter().map(|w| w.title.as_str()).collect();
        assert_eq!(titles, vec!["a_lake", "b_forest"]);
        assert_eq!(catalog.all()[0].id, WallpaperId(1));
        assert_eq!(catalog.all()[1].id, WallpaperId(2));
        assert!(catalog.all()[0].image.local_path().is_some());
    }

    #[test]
    fn directory_catalog_scans_one_level_of_subfolders() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("nature");
        let deep = nested.join("archive");
        fs::create_dir_all(&deep).unwrap();
        fs::write(dir.path().join("top.png"), b"x").unwrap();
        fs::write(nested.join("forest.jpg"), b"x").unwrap();
        fs::write(deep.join("old.png"), b"x").unwrap();

        let catalog = StaticCatalog::from_directory(dir.path()).unwrap();
        let titles: Vec<&str> = catalog.all().iter().map(|w| w.title.as_str()).collect();
        assert_eq!(titles, vec!["forest", "top"]);
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempdir().unwrap();
        assert!(StaticCatalog::from_directory(dir.path().join("nope")).is_err());
    }

    #[test]
    fn load_catalog_prefers_catalog_file() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("catalog.toml");
        fs::write(&file, "[[wallpaper]]\nid = 5\ntitle = \"Only\"\nimage = \"x.png\"\n").unwrap();

        let config = Config {
            catalog_file: Some(file),
            wallpaper_dir: Some(dir.path().to_path_buf()),
            ..Config::default()
        };
        let catalog = load_catalog(&config).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.all()[0].title, "Only");
    }

    #[test]
    fn load_catalog_defaults_to_builtin() {
        let catalog = load_catalog(&Config::default()).unwrap();
        assert_eq!(catalog.len(), 6);
    }
}
