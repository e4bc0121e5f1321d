// Copyright 2025 vitria contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Name-sorted registry of the driver's texture resources.
//!
//! Entries are kept sorted by canonical name in a flat vector, so lookup is
//! a binary search followed by an equal-range scan. The cache holds one
//! owning [`TextureHandle`] per entry; dropping an entry releases that
//! reference and the texture itself once no caller holds another handle.

use std::sync::Arc;

use vitria_core::renderer::api::{NamedPath, TextureHandle};

/// Sorted, name-keyed storage for shared texture handles.
#[derive(Debug, Default)]
pub struct TextureCache {
    textures: Vec<TextureHandle>,
}

impl TextureCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered textures.
    #[inline]
    pub fn len(&self) -> usize {
        self.textures.len()
    }

    /// Returns `true` if no textures are registered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    /// Returns the texture at `index` in name order, or `None` past the end.
    pub fn get(&self, index: usize) -> Option<TextureHandle> {
        self.textures.get(index).cloned()
    }

    /// First index whose entry sorts at or after `key`.
    fn lower_bound(&self, key: &str) -> usize {
        self.textures
            .partition_point(|t| t.internal_name().as_str() < key)
    }

    /// Looks up a texture by name.
    ///
    /// The name is canonicalized before the search, so spelling differences
    /// in case or path separators still find the texture. When several
    /// entries share a canonical name, the first registered one wins.
    pub fn find(&self, name: &str) -> Option<TextureHandle> {
        let key = NamedPath::canonicalize(name);
        let start = self.lower_bound(&key);
        self.textures[start..]
            .iter()
            .take_while(|t| t.internal_name() == key)
            .next()
            .cloned()
    }

    /// Registers `texture`, keeping the cache sorted.
    ///
    /// If an entry with the same canonical name already exists, the cache is
    /// left untouched and the existing handle is returned instead.
    pub fn add(&mut self, texture: TextureHandle) -> TextureHandle {
        let key = texture.internal_name();
        let start = self.lower_bound(&key);
        if let Some(existing) = self.textures[start..]
            .iter()
            .take_while(|t| t.internal_name() == key)
            .next()
        {
            log::debug!("Texture '{key}' already registered; returning existing handle");
            return existing.clone();
        }
        self.textures.insert(start, texture.clone());
        texture
    }

    /// Unregisters `texture`, matching by handle identity rather than name.
    ///
    /// ## Returns
    /// `false` if the texture was not registered.
    pub fn remove(&mut self, texture: &TextureHandle) -> bool {
        let key = texture.internal_name();
        let start = self.lower_bound(&key);
        let in_range = self.textures[start..]
            .iter()
            .take_while(|t| t.internal_name() == key)
            .position(|t| Arc::ptr_eq(t, texture));
        // A handle renamed behind the cache's back no longer sorts where its
        // name says; fall back to a full scan before giving up.
        let index = match in_range {
            Some(offset) => Some(start + offset),
            None => self.textures.iter().position(|t| Arc::ptr_eq(t, texture)),
        };
        match index {
            Some(index) => {
                self.textures.remove(index);
                true
            }
            None => false,
        }
    }

    /// Renames `texture` and restores the sort order.
    ///
    /// The name is changed even if the texture is not registered here, but
    /// re-sorting only happens when it is.
    ///
    /// ## Returns
    /// `true` if the texture was registered in this cache.
    pub fn rename(&mut self, texture: &TextureHandle, new_name: &str) -> bool {
        texture.set_name(new_name);
        let registered = self.textures.iter().any(|t| Arc::ptr_eq(t, texture));
        if registered {
            self.textures
                .sort_by(|a, b| a.internal_name().cmp(&b.internal_name()));
        }
        registered
    }

    /// Unregisters every texture, releasing all of the cache's handles.
    pub fn clear(&mut self) {
        self.textures.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitria_core::renderer::api::{Texture, TextureDescriptor, TextureFormat};

    fn texture(name: &str) -> TextureHandle {
        Arc::new(Texture::new(&TextureDescriptor::new_2d(
            name,
            4,
            4,
            TextureFormat::Rgba8Unorm,
        )))
    }

    #[test]
    fn find_is_canonical_name_insensitive() {
        let mut cache = TextureCache::new();
        cache.add(texture("Media\\Wall.PNG"));
        let found = cache.find("media/wall.png").unwrap();
        assert_eq!(found.name().as_str(), "Media\\Wall.PNG");
        assert!(cache.find("media/floor.png").is_none());
    }

    #[test]
    fn entries_stay_sorted_by_canonical_name() {
        let mut cache = TextureCache::new();
        cache.add(texture("c.png"));
        cache.add(texture("A.png"));
        cache.add(texture("b.png"));
        let names: Vec<String> = (0..cache.len())
            .map(|i| cache.get(i).unwrap().internal_name())
            .collect();
        assert_eq!(names, ["a.png", "b.png", "c.png"]);
    }

    #[test]
    fn duplicate_add_returns_first_registered() {
        let mut cache = TextureCache::new();
        let first = cache.add(texture("wall.png"));
        let second = cache.add(texture("WALL.png"));
        assert_eq!(cache.len(), 1);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn remove_matches_identity_and_releases_the_handle() {
        let mut cache = TextureCache::new();
        let tex = cache.add(texture("wall.png"));
        assert_eq!(Arc::strong_count(&tex), 2);
        assert!(cache.remove(&tex));
        assert_eq!(Arc::strong_count(&tex), 1);
        assert!(!cache.remove(&tex));
    }

    #[test]
    fn remove_distinguishes_same_named_entries() {
        let mut cache = TextureCache::new();
        let a = cache.add(texture("a.png"));
        let b = cache.add(texture("b.png"));
        // Rename b onto a's name so the two collide.
        cache.rename(&b, "a.png");
        assert_eq!(cache.len(), 2);
        assert!(cache.remove(&b));
        assert!(Arc::ptr_eq(&cache.find("a.png").unwrap(), &a));
    }

    #[test]
    fn rename_reorders_lookup() {
        let mut cache = TextureCache::new();
        let tex = cache.add(texture("a.png"));
        cache.add(texture("m.png"));
        cache.add(texture("z.png"));

        assert!(cache.rename(&tex, "zz.png"));
        assert!(cache.find("a.png").is_none());
        assert!(Arc::ptr_eq(&cache.find("zz.png").unwrap(), &tex));
        assert!(Arc::ptr_eq(&cache.get(cache.len() - 1).unwrap(), &tex));
    }

    #[test]
    fn rename_of_unregistered_texture_still_sets_the_name() {
        let mut cache = TextureCache::new();
        let loose = texture("loose.png");
        assert!(!cache.rename(&loose, "renamed.png"));
        assert_eq!(loose.internal_name(), "renamed.png");
    }

    #[test]
    fn clear_releases_every_handle() {
        let mut cache = TextureCache::new();
        let a = cache.add(texture("a.png"));
        let b = cache.add(texture("b.png"));
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(Arc::strong_count(&a), 1);
        assert_eq!(Arc::strong_count(&b), 1);
    }
}
