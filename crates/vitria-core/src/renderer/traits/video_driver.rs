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

use crate::math::Mat4;
use crate::renderer::api::{
    AffineTransformSlot, Material, ProjectionTransformSlot, TextureDescriptor, TextureHandle,
};
use crate::renderer::error::TextureError;
use std::fmt::Debug;

/// The device boundary of a rendering backend.
///
/// Models single-rendering-thread device state: no method blocks or
/// suspends, and implementations provide no internal locking — a
/// multi-threaded host must serialize access to one driver instance itself.
///
/// Callers never see dirty-tracking state; the transform getters always
/// return final, fresh matrices.
pub trait VideoDriver: Debug {
    /// Starts a new frame. Must be called before any rendering.
    ///
    /// ## Returns
    /// `false` if the driver could not begin the frame.
    fn begin_scene(&mut self) -> bool;

    /// Finishes the current frame.
    ///
    /// ## Returns
    /// `false` if the driver could not present the frame.
    fn end_scene(&mut self) -> bool;

    /// Binds `material` as the current render state.
    ///
    /// The driver keeps an owning reference to the material's texture until
    /// another material is bound.
    fn set_material(&mut self, material: Material);

    /// Stores `matrix` into an affine transformation slot.
    ///
    /// Only the primary slots ([`AffineTransformSlot::World`] and
    /// [`AffineTransformSlot::View`]) are writable; writes to derived slots
    /// are ignored. A write that would not change the stored value is a
    /// no-op.
    fn set_affine_transform(&mut self, slot: AffineTransformSlot, matrix: Mat4);

    /// Returns the matrix in an affine transformation slot, recomputing it
    /// first if a primary it derives from was overwritten.
    fn get_affine_transform(&mut self, slot: AffineTransformSlot) -> Mat4;

    /// Stores `matrix` into a projective transformation slot.
    ///
    /// Only [`ProjectionTransformSlot::Proj`] is writable; writes to derived
    /// slots are ignored. A write that would not change the stored value is
    /// a no-op.
    fn set_projection_transform(&mut self, slot: ProjectionTransformSlot, matrix: Mat4);

    /// Returns the matrix in a projective transformation slot, recomputing
    /// it first if a primary it derives from was overwritten.
    fn get_projection_transform(&mut self, slot: ProjectionTransformSlot) -> Mat4;

    /// Creates a device texture and registers it in the driver's cache.
    ///
    /// If a texture with the same canonical name is already registered, the
    /// existing texture is returned and no new resource is created —
    /// first-registered-wins.
    ///
    /// ## Errors
    /// * [`TextureError::UnnamedTexture`] - the descriptor's name is empty.
    /// * [`TextureError::CreationFailed`] - the device could not allocate
    ///   the texture.
    fn add_texture(&mut self, descriptor: &TextureDescriptor)
        -> Result<TextureHandle, TextureError>;

    /// Looks up a registered texture by name.
    ///
    /// ## Returns
    /// `None` if no texture with that canonical name is registered.
    fn get_texture(&self, name: &str) -> Option<TextureHandle>;

    /// Returns a registered texture by position, or `None` past the end.
    fn get_texture_by_index(&self, index: usize) -> Option<TextureHandle>;

    /// Returns the number of textures currently registered.
    fn texture_count(&self) -> usize;

    /// Unregisters `texture`, releasing the cache's owning reference.
    /// No-op if the texture is not registered.
    fn remove_texture(&mut self, texture: &TextureHandle);

    /// Unregisters every texture, releasing all of the cache's references.
    ///
    /// Also resets the bound material, so no bound handle keeps an
    /// about-to-be-destroyed texture alive.
    fn remove_all_textures(&mut self);

    /// Renames `texture` and restores the cache's name ordering.
    fn rename_texture(&mut self, texture: &TextureHandle, new_name: &str);
}
