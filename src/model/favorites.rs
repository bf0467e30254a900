use super::wallpaper::{WallpaperId, WallpaperRecord};
use log::debug;
use std::collections::HashSet;
use std::sync::Arc;

/// Set of favorited wallpaper ids.
///
/// Keeps insertion order for iteration, but equality ignores order.
/// Ids that have no catalog entry are allowed and are skipped by
/// [`FavoriteSet::filter_catalog`].
#[derive(Clone, Debug, Default)]
pub struct FavoriteSet {
    ids: Vec<WallpaperId>,
    members: HashSet<WallpaperId>,
}

impl FavoriteSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: WallpaperId) -> bool {
        self.members.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = WallpaperId> + '_ {
        self.ids.iter().copied()
    }

    /// Copy of this set with `id` flipped. `self` is left untouched.
    pub fn toggled(&self, id: WallpaperId) -> Self {
        let mut next = self.clone();
        if next.members.remove(&id) {
            next.ids.retain(|f| *f != id);
        } else {
            next.insert(id);
        }
        next
    }

    fn insert(&mut self, id: WallpaperId) {
        if self.members.insert(id) {
            self.ids.push(id);
        }
    }

    /// Catalog records that are in this set, in catalog order.
    pub fn filter_catalog<'a>(&self, catalog: &'a [WallpaperRecord]) -> Vec<&'a WallpaperRecord> {
        catalog.iter().filter(|w| self.contains(w.id)).collect()
    }
}

impl PartialEq for FavoriteSet {
    fn eq(&self, other: &Self) -> bool {
        self.members == other.members
    }
}

impl Eq for FavoriteSet {}

impl FromIterator<WallpaperId> for FavoriteSet {
    fn from_iter<T: IntoIterator<Item = WallpaperId>>(iter: T) -> Self {
        let mut set = FavoriteSet::new();
        for id in iter {
            set.insert(id);
        }
        set
    }
}

/// Single source of truth for which wallpapers are favorited.
///
/// Readers get an `Arc` snapshot. A toggle swaps in a new snapshot rather
/// than editing the shared one, so anything still holding the old `Arc`
/// keeps seeing a consistent value.
#[derive(Debug, Default)]
pub struct FavoritesStore {
    current: Arc<FavoriteSet>,
}

impl FavoritesStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_favorites(&self) -> Arc<FavoriteSet> {
        Arc::clone(&self.current)
    }

    pub fn is_favorite(&self, id: WallpaperId) -> bool {
        self.current.contains(id)
    }

    pub fn toggle_favorite(&mut self, id: WallpaperId) {
        let next = self.current.toggled(id);
        debug!(
            "favorite {} {} ({} total)",
            id,
            if next.contains(id) { "added" } else { "removed" },
            next.len()
        );
        self.current = Arc::new(next);
    }
}
