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

//! Defines data structures related to GPU texture resources.

use crate::math::Extent3D;
use crate::renderer::api::path::NamedPath;
use std::sync::{Arc, RwLock};

/// The format of the texels in a texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureFormat {
    /// 8-bit per channel RGBA, unsigned normalized.
    Rgba8Unorm,
    /// 8-bit per channel RGBA, sRGB-encoded.
    Rgba8UnormSrgb,
    /// 16-bit per channel RGBA, float.
    Rgba16Float,
    /// Packed 1-bit alpha, 5-bit RGB.
    A1R5G5B5,
}

impl TextureFormat {
    /// Returns the number of bytes one texel of this format occupies.
    pub fn bytes_per_pixel(&self) -> u32 {
        match self {
            TextureFormat::Rgba8Unorm | TextureFormat::Rgba8UnormSrgb => 4,
            TextureFormat::Rgba16Float => 8,
            TextureFormat::A1R5G5B5 => 2,
        }
    }
}

/// A descriptor used to create a [`Texture`].
#[derive(Debug, Clone)]
pub struct TextureDescriptor {
    /// The path-like name identifying the texture. Must not be empty.
    pub name: String,
    /// The dimensions of the texture.
    pub size: Extent3D,
    /// The format of the texels in the texture.
    pub format: TextureFormat,
    /// The number of mipmap levels for the texture.
    pub mip_level_count: u32,
}

impl TextureDescriptor {
    /// Creates a 2D single-mip descriptor with the given name and size.
    pub fn new_2d(name: impl Into<String>, width: u32, height: u32, format: TextureFormat) -> Self {
        Self {
            name: name.into(),
            size: Extent3D::new_2d(width, height),
            format,
            mip_level_count: 1,
        }
    }
}

/// A device-resident texture resource.
///
/// Textures are shared through [`Arc`]; the driver's texture cache holds one
/// owning reference per unique name, and a texture is destroyed when its
/// last reference is dropped.
///
/// The name is readable but deliberately not publicly writable: renaming
/// must go through the driver's `rename_texture` so the cache can re-sort
/// its entries afterwards.
#[derive(Debug)]
pub struct Texture {
    name: RwLock<NamedPath>,
    size: Extent3D,
    format: TextureFormat,
    mip_level_count: u32,
}

/// A shared, owning handle to a [`Texture`].
pub type TextureHandle = Arc<Texture>;

impl Texture {
    /// Creates a texture record from a descriptor.
    pub fn new(descriptor: &TextureDescriptor) -> Self {
        Self {
            name: RwLock::new(NamedPath::new(descriptor.name.clone())),
            size: descriptor.size,
            format: descriptor.format,
            mip_level_count: descriptor.mip_level_count,
        }
    }

    /// Returns a copy of the texture's name.
    pub fn name(&self) -> NamedPath {
        self.name
            .read()
            .expect("texture name lock poisoned")
            .clone()
    }

    /// Returns the canonical internal name used for cache identity.
    pub fn internal_name(&self) -> String {
        self.name
            .read()
            .expect("texture name lock poisoned")
            .internal_name()
            .to_owned()
    }

    /// Replaces the texture's name.
    ///
    /// Callers must use the driver's `rename_texture` instead of calling
    /// this directly; a cache holding this texture sorts by name and needs
    /// to re-sort after the change.
    pub fn set_name(&self, new_name: impl Into<String>) {
        self.name
            .write()
            .expect("texture name lock poisoned")
            .set_path(new_name.into());
    }

    /// The dimensions of the texture.
    #[inline]
    pub fn size(&self) -> Extent3D {
        self.size
    }

    /// The format of the texels in the texture.
    #[inline]
    pub fn format(&self) -> TextureFormat {
        self.format
    }

    /// The number of mipmap levels.
    #[inline]
    pub fn mip_level_count(&self) -> u32 {
        self.mip_level_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn texture_exposes_descriptor_fields() {
        let desc = TextureDescriptor::new_2d("media/wall.png", 64, 32, TextureFormat::Rgba8Unorm);
        let tex = Texture::new(&desc);
        assert_eq!(tex.size().width, 64);
        assert_eq!(tex.size().height, 32);
        assert_eq!(tex.format(), TextureFormat::Rgba8Unorm);
        assert_eq!(tex.mip_level_count(), 1);
        assert_eq!(tex.internal_name(), "media/wall.png");
    }

    #[test]
    fn rename_changes_canonical_name() {
        let desc = TextureDescriptor::new_2d("a.png", 1, 1, TextureFormat::A1R5G5B5);
        let tex = Texture::new(&desc);
        tex.set_name("B\\C.PNG");
        assert_eq!(tex.internal_name(), "b/c.png");
        assert_eq!(tex.name().as_str(), "B\\C.PNG");
    }

    #[test]
    fn format_sizes() {
        assert_eq!(TextureFormat::Rgba8Unorm.bytes_per_pixel(), 4);
        assert_eq!(TextureFormat::A1R5G5B5.bytes_per_pixel(), 2);
        assert_eq!(TextureFormat::Rgba16Float.bytes_per_pixel(), 8);
    }
}
