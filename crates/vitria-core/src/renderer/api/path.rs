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

//! Path-like resource names with a canonical internal form.

use std::cmp::Ordering;
use std::fmt;

/// A resource name that keeps both the path as given and a canonical form.
///
/// Texture identity, ordering, and duplicate detection all operate on the
/// canonical form: backslashes folded to `/` and characters lowercased, so
/// `Media\\Wall.PNG` and `media/wall.png` name the same resource. The
/// original spelling is preserved for display and round-tripping.
#[derive(Debug, Clone, Default)]
pub struct NamedPath {
    path: String,
    internal: String,
}

impl NamedPath {
    /// Creates a named path from the given spelling.
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        let internal = Self::canonicalize(&path);
        Self { path, internal }
    }

    /// Produces the canonical form used for identity and ordering.
    pub fn canonicalize(path: &str) -> String {
        path.replace('\\', "/").to_lowercase()
    }

    /// The path as originally given.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.path
    }

    /// The canonical internal name.
    #[inline]
    pub fn internal_name(&self) -> &str {
        &self.internal
    }

    /// Returns `true` if the path is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// Replaces the path, recomputing the canonical form.
    pub fn set_path(&mut self, path: impl Into<String>) {
        self.path = path.into();
        self.internal = Self::canonicalize(&self.path);
    }
}

impl fmt::Display for NamedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

impl PartialEq for NamedPath {
    /// Equality compares the canonical form, not the original spelling.
    fn eq(&self, other: &Self) -> bool {
        self.internal == other.internal
    }
}

impl Eq for NamedPath {}

impl PartialOrd for NamedPath {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for NamedPath {
    /// Ordering compares the canonical form, matching equality.
    fn cmp(&self, other: &Self) -> Ordering {
        self.internal.cmp(&other.internal)
    }
}

impl From<&str> for NamedPath {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_form_folds_case_and_separators() {
        let a = NamedPath::new("Media\\Wall.PNG");
        let b = NamedPath::new("media/wall.png");
        assert_eq!(a, b);
        assert_eq!(a.internal_name(), "media/wall.png");
        assert_eq!(a.as_str(), "Media\\Wall.PNG");
    }

    #[test]
    fn ordering_uses_canonical_form() {
        let upper = NamedPath::new("B.png");
        let lower = NamedPath::new("a.png");
        assert!(lower < upper);
    }

    #[test]
    fn set_path_recomputes_internal() {
        let mut p = NamedPath::new("old.png");
        p.set_path("Dir\\New.PNG");
        assert_eq!(p.internal_name(), "dir/new.png");
    }
}
