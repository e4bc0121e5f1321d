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

//! Pixel-based extents used to describe texture dimensions.

/// A three-dimensional extent, representing width, height, and depth.
///
/// Used for texture dimensions; 2D textures have a depth of 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Extent3D {
    /// The width component of the extent.
    pub width: u32,
    /// The height component of the extent.
    pub height: u32,
    /// The depth or number of array layers.
    pub depth_or_array_layers: u32,
}

impl Extent3D {
    /// Creates a 2D extent with a depth of 1.
    #[inline]
    pub const fn new_2d(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            depth_or_array_layers: 1,
        }
    }
}

impl Default for Extent3D {
    /// A 1x1x1 extent.
    fn default() -> Self {
        Self::new_2d(1, 1)
    }
}
