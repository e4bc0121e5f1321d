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

//! A headless [`VideoDriver`] implementation.
//!
//! The null driver performs no GPU work. It carries the full device-state
//! model (transformation cache, texture registry, bound material, frame
//! accounting) and is the reference backend for driver-contract tests.

use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Arc;

use vitria_core::math::Mat4;
use vitria_core::renderer::api::{
    AffineTransformSlot, Material, ProjectionTransformSlot, Texture, TextureDescriptor,
    TextureHandle,
};
use vitria_core::renderer::error::TextureError;
use vitria_core::renderer::traits::VideoDriver;

use super::texture_cache::TextureCache;
use super::transform_state::TransformState;

/// A driver that models device state without touching a GPU.
#[derive(Debug)]
pub struct NullDriver {
    transforms: TransformState,
    textures: TextureCache,
    material: Material,
    frame_count: u64,
    primitives_drawn: u64,
    scene_active: bool,
    // Counts device-texture allocations since the last reset. Atomic so
    // observers (tooling, tests) can read it through a shared reference.
    texture_allocations: AtomicI32,
}

impl NullDriver {
    /// Creates a driver with identity transforms and an empty texture cache.
    pub fn new() -> Self {
        log::info!("Using null video driver");
        Self {
            transforms: TransformState::new(),
            textures: TextureCache::new(),
            material: Material::none(),
            frame_count: 0,
            primitives_drawn: 0,
            scene_active: false,
            texture_allocations: AtomicI32::new(0),
        }
    }

    /// Total frames finished since creation.
    #[inline]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Primitives submitted during the current frame.
    #[inline]
    pub fn primitives_drawn(&self) -> u64 {
        self.primitives_drawn
    }

    /// Records `count` primitives as submitted this frame.
    pub fn register_primitives(&mut self, count: u64) {
        self.primitives_drawn += count;
    }

    /// The material currently bound.
    #[inline]
    pub fn material(&self) -> &Material {
        &self.material
    }

    /// Derived-matrix recomputations performed by the transform cache.
    #[inline]
    pub fn transform_recompute_count(&self) -> u64 {
        self.transforms.recompute_count()
    }

    /// Device-texture allocations performed since the last reset.
    #[inline]
    pub fn texture_allocation_count(&self) -> i32 {
        self.texture_allocations.load(Ordering::Relaxed)
    }

    /// Resets the texture-allocation counter to zero.
    pub fn reset_texture_allocation_count(&self) {
        self.texture_allocations.store(0, Ordering::Relaxed);
    }
}

impl Default for NullDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl VideoDriver for NullDriver {
    fn begin_scene(&mut self) -> bool {
        if self.scene_active {
            log::warn!("begin_scene called while a scene is already active");
            return false;
        }
        self.scene_active = true;
        self.primitives_drawn = 0;
        true
    }

    fn end_scene(&mut self) -> bool {
        if !self.scene_active {
            log::warn!("end_scene called without a matching begin_scene");
            return false;
        }
        self.scene_active = false;
        self.frame_count += 1;
        true
    }

    fn set_material(&mut self, material: Material) {
        self.material = material;
    }

    fn set_affine_transform(&mut self, slot: AffineTransformSlot, matrix: Mat4) {
        self.transforms.set_affine(slot, matrix);
    }

    fn get_affine_transform(&mut self, slot: AffineTransformSlot) -> Mat4 {
        self.transforms.get_affine(slot)
    }

    fn set_projection_transform(&mut self, slot: ProjectionTransformSlot, matrix: Mat4) {
        self.transforms.set_projection(slot, matrix);
    }

    fn get_projection_transform(&mut self, slot: ProjectionTransformSlot) -> Mat4 {
        self.transforms.get_projection(slot)
    }

    fn add_texture(
        &mut self,
        descriptor: &TextureDescriptor,
    ) -> Result<TextureHandle, TextureError> {
        if descriptor.name.is_empty() {
            log::error!("Rejecting texture with empty name");
            return Err(TextureError::UnnamedTexture);
        }
        if let Some(existing) = self.textures.find(&descriptor.name) {
            return Ok(existing);
        }
        let texture = Arc::new(Texture::new(descriptor));
        self.texture_allocations.fetch_add(1, Ordering::Relaxed);
        log::debug!(
            "Created texture '{}' ({}x{})",
            descriptor.name,
            descriptor.size.width,
            descriptor.size.height
        );
        Ok(self.textures.add(texture))
    }

    fn get_texture(&self, name: &str) -> Option<TextureHandle> {
        self.textures.find(name)
    }

    fn get_texture_by_index(&self, index: usize) -> Option<TextureHandle> {
        self.textures.get(index)
    }

    fn texture_count(&self) -> usize {
        self.textures.len()
    }

    fn remove_texture(&mut self, texture: &TextureHandle) {
        if !self.textures.remove(texture) {
            log::debug!(
                "remove_texture: '{}' was not registered",
                texture.internal_name()
            );
        }
    }

    fn remove_all_textures(&mut self) {
        // The bound material may own one of the cached textures; reset it
        // first so the purge actually releases every driver-held reference.
        self.material = Material::none();
        log::debug!("Removing all {} textures", self.textures.len());
        self.textures.clear();
    }

    fn rename_texture(&mut self, texture: &TextureHandle, new_name: &str) {
        if !self.textures.rename(texture, new_name) {
            log::debug!(
                "rename_texture: '{}' was not registered",
                texture.internal_name()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitria_core::math::{Vec3, Vec4, EPSILON};
    use vitria_core::renderer::api::TextureFormat;

    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn descriptor(name: &str) -> TextureDescriptor {
        TextureDescriptor::new_2d(name, 16, 16, TextureFormat::Rgba8Unorm)
    }

    #[test]
    fn scene_bracketing_counts_frames() {
        init_logging();
        let mut driver = NullDriver::new();
        assert!(driver.begin_scene());
        assert!(!driver.begin_scene());
        driver.register_primitives(12);
        assert_eq!(driver.primitives_drawn(), 12);
        assert!(driver.end_scene());
        assert!(!driver.end_scene());
        assert_eq!(driver.frame_count(), 1);

        assert!(driver.begin_scene());
        assert_eq!(driver.primitives_drawn(), 0);
        assert!(driver.end_scene());
        assert_eq!(driver.frame_count(), 2);
    }

    #[test]
    fn translated_world_flows_into_proj_view_world() {
        let mut driver = NullDriver::new();
        driver.set_affine_transform(
            AffineTransformSlot::World,
            Mat4::from_translation(Vec3::new(1.0, 0.0, 0.0)),
        );
        let pvw = driver.get_projection_transform(ProjectionTransformSlot::ProjViewWorld);
        let origin = pvw * Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert!((origin.x - 1.0).abs() < EPSILON);
        assert!(origin.y.abs() < EPSILON && origin.z.abs() < EPSILON);
    }

    #[test]
    fn transform_reads_are_cached_across_the_trait() {
        let mut driver = NullDriver::new();
        driver.set_affine_transform(
            AffineTransformSlot::View,
            Mat4::from_translation(Vec3::new(0.0, 0.0, -5.0)),
        );
        driver.get_affine_transform(AffineTransformSlot::WorldView);
        driver.get_projection_transform(ProjectionTransformSlot::ProjView);
        let count = driver.transform_recompute_count();
        driver.get_affine_transform(AffineTransformSlot::WorldView);
        driver.get_projection_transform(ProjectionTransformSlot::ProjView);
        assert_eq!(driver.transform_recompute_count(), count);
    }

    #[test]
    fn add_texture_rejects_empty_names() {
        let mut driver = NullDriver::new();
        let err = driver.add_texture(&descriptor("")).unwrap_err();
        assert!(matches!(err, TextureError::UnnamedTexture));
        assert_eq!(driver.texture_count(), 0);
    }

    #[test]
    fn duplicate_names_share_one_texture() {
        init_logging();
        let mut driver = NullDriver::new();
        let first = driver.add_texture(&descriptor("media/wall.png")).unwrap();
        let second = driver.add_texture(&descriptor("MEDIA\\wall.png")).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(driver.texture_count(), 1);
        // Only one device allocation happened.
        assert_eq!(driver.texture_allocation_count(), 1);
    }

    #[test]
    fn allocation_counter_resets() {
        let mut driver = NullDriver::new();
        driver.add_texture(&descriptor("a.png")).unwrap();
        driver.add_texture(&descriptor("b.png")).unwrap();
        assert_eq!(driver.texture_allocation_count(), 2);
        driver.reset_texture_allocation_count();
        assert_eq!(driver.texture_allocation_count(), 0);
    }

    #[test]
    fn removed_texture_lives_while_a_handle_remains() {
        let mut driver = NullDriver::new();
        let tex = driver.add_texture(&descriptor("wall.png")).unwrap();
        assert_eq!(Arc::strong_count(&tex), 2);
        driver.remove_texture(&tex);
        assert!(driver.get_texture("wall.png").is_none());
        // The caller's handle keeps the texture alive.
        assert_eq!(Arc::strong_count(&tex), 1);
        assert_eq!(tex.internal_name(), "wall.png");
    }

    #[test]
    fn remove_all_textures_resets_the_bound_material() {
        let mut driver = NullDriver::new();
        let tex = driver.add_texture(&descriptor("wall.png")).unwrap();
        driver.set_material(Material {
            texture: Some(tex.clone()),
        });
        assert_eq!(Arc::strong_count(&tex), 3);

        driver.remove_all_textures();
        assert_eq!(driver.texture_count(), 0);
        assert!(driver.material().texture.is_none());
        assert_eq!(Arc::strong_count(&tex), 1);
    }

    #[test]
    fn rename_is_visible_through_lookup() {
        let mut driver = NullDriver::new();
        let tex = driver.add_texture(&descriptor("old.png")).unwrap();
        driver.rename_texture(&tex, "New\\Name.PNG");
        assert!(driver.get_texture("old.png").is_none());
        let found = driver.get_texture("new/name.png").unwrap();
        assert!(Arc::ptr_eq(&found, &tex));
    }

    #[test]
    fn textures_enumerate_in_name_order() {
        let mut driver = NullDriver::new();
        driver.add_texture(&descriptor("z.png")).unwrap();
        driver.add_texture(&descriptor("a.png")).unwrap();
        driver.add_texture(&descriptor("M.png")).unwrap();
        let names: Vec<String> = (0..driver.texture_count())
            .map(|i| driver.get_texture_by_index(i).unwrap().internal_name())
            .collect();
        assert_eq!(names, ["a.png", "m.png", "z.png"]);
        assert!(driver.get_texture_by_index(3).is_none());
    }
}
