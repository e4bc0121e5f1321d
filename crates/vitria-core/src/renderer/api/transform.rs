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

//! Enumerates the transformation-matrix slots exposed by a video driver.
//!
//! The slots form two families sharing one dirty mask: the affine 4x3-style
//! family derived from the world and view matrices, and the projective 4x4
//! family derived from the projection matrix. Only the three *primary* slots
//! ([`World`](AffineTransformSlot::World), [`View`](AffineTransformSlot::View)
//! and [`Proj`](ProjectionTransformSlot::Proj)) are ever written by callers;
//! every other slot is derived lazily by the driver when read.
//!
//! Each slot owns a fixed `dependents()` bit set: the slots whose cached
//! values become stale when that primary is overwritten. The slot set is
//! closed and small, so the dependency information is a flat lookup rather
//! than a runtime graph.

/// A transformation slot from the affine (4x3-style) family.
///
/// Stored matrices always keep a last row of `(0, 0, 0, 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum AffineTransformSlot {
    /// The world (model) matrix. Primary slot.
    World = 0,
    /// The camera view matrix. Primary slot.
    View = 1,
    /// The world transform followed by the view transform (`view * world`).
    WorldView = 2,
    /// The inverse of the world matrix.
    WorldInverse = 3,
    /// The inverse of the view matrix.
    ViewInverse = 4,
    /// The inverse of the world-view matrix.
    WorldViewInverse = 5,
    /// The transpose of the upper-left 3x3 block of the world-view inverse.
    NormalMatrix = 6,
}

/// Number of affine transformation slots.
pub const AFFINE_SLOT_COUNT: usize = 7;

/// A transformation slot from the projective (4x4) family.
///
/// Projective slot bits live above the affine family in the shared dirty
/// mask, offset by [`AFFINE_SLOT_COUNT`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum ProjectionTransformSlot {
    /// The projection matrix. Primary slot.
    Proj = 0,
    /// The view transform followed by the projection (`proj * view`).
    ProjView = 1,
    /// The full model-view-projection matrix (`proj * view * world`).
    ProjViewWorld = 2,
    /// The inverse of the projection matrix.
    ProjInverse = 3,
    /// The inverse of the projection-view matrix.
    ProjViewInverse = 4,
    /// The inverse of the projection-view-world matrix.
    ProjViewWorldInverse = 5,
}

/// Number of projective transformation slots.
pub const PROJECTION_SLOT_COUNT: usize = 6;

/// Total number of transformation slots tracked by one dirty mask.
pub const TRANSFORM_SLOT_COUNT: usize = AFFINE_SLOT_COUNT + PROJECTION_SLOT_COUNT;

impl AffineTransformSlot {
    /// All affine slots, in index order.
    pub const ALL: [Self; AFFINE_SLOT_COUNT] = [
        Self::World,
        Self::View,
        Self::WorldView,
        Self::WorldInverse,
        Self::ViewInverse,
        Self::WorldViewInverse,
        Self::NormalMatrix,
    ];

    /// The bit marking this slot in the shared dirty mask.
    #[inline]
    pub const fn bit(self) -> u32 {
        1 << (self as u32)
    }

    /// Returns `true` for slots a caller may write directly.
    #[inline]
    pub const fn is_primary(self) -> bool {
        matches!(self, Self::World | Self::View)
    }

    /// The set of slots invalidated by writing this slot, including itself.
    ///
    /// Zero for derived slots, which are never written directly.
    pub const fn dependents(self) -> u32 {
        // WorldView depends on both primaries, so its chain staleness is
        // shared between the World and View writes.
        let common = Self::WorldView.bit()
            | Self::WorldViewInverse.bit()
            | Self::NormalMatrix.bit()
            | ProjectionTransformSlot::ProjViewWorld.bit()
            | ProjectionTransformSlot::ProjViewWorldInverse.bit();
        match self {
            Self::World => Self::World.bit() | Self::WorldInverse.bit() | common,
            Self::View => {
                Self::View.bit()
                    | Self::ViewInverse.bit()
                    | ProjectionTransformSlot::ProjView.bit()
                    | ProjectionTransformSlot::ProjViewInverse.bit()
                    | common
            }
            _ => 0,
        }
    }
}

impl ProjectionTransformSlot {
    /// All projective slots, in index order.
    pub const ALL: [Self; PROJECTION_SLOT_COUNT] = [
        Self::Proj,
        Self::ProjView,
        Self::ProjViewWorld,
        Self::ProjInverse,
        Self::ProjViewInverse,
        Self::ProjViewWorldInverse,
    ];

    /// The bit marking this slot in the shared dirty mask.
    #[inline]
    pub const fn bit(self) -> u32 {
        1 << (self as u32 + AFFINE_SLOT_COUNT as u32)
    }

    /// Returns `true` for slots a caller may write directly.
    #[inline]
    pub const fn is_primary(self) -> bool {
        matches!(self, Self::Proj)
    }

    /// The set of slots invalidated by writing this slot, including itself.
    ///
    /// Writing the projection matrix stales the entire projective family;
    /// zero for derived slots.
    pub const fn dependents(self) -> u32 {
        match self {
            Self::Proj => {
                Self::Proj.bit()
                    | Self::ProjView.bit()
                    | Self::ProjViewWorld.bit()
                    | Self::ProjInverse.bit()
                    | Self::ProjViewInverse.bit()
                    | Self::ProjViewWorldInverse.bit()
            }
            _ => 0,
        }
    }
}
