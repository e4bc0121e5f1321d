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

//! Lazily-evaluated cache of the driver's transformation matrices.
//!
//! The cache stores one matrix per slot and a single `u32` dirty mask over
//! all thirteen slots. Writing a primary slot marks its `dependents()` bits
//! stale; nothing is recomputed until a stale slot is actually read, so a
//! caller that overwrites the world matrix a thousand times between reads
//! pays for at most one recomputation per derived slot.

use vitria_core::math::{Mat3, Mat4};
use vitria_core::renderer::api::{
    AffineTransformSlot, ProjectionTransformSlot, AFFINE_SLOT_COUNT, PROJECTION_SLOT_COUNT,
};

/// Dirty-tracked storage for the affine and projective transformation slots.
///
/// All slots start out as the identity with a clean mask, which is a
/// consistent state: every derivation of identities is the identity.
#[derive(Debug)]
pub struct TransformState {
    affine: [Mat4; AFFINE_SLOT_COUNT],
    projection: [Mat4; PROJECTION_SLOT_COUNT],
    dirty: u32,
    recomputes: u64,
}

impl TransformState {
    /// Creates a cache with every slot set to the identity.
    pub fn new() -> Self {
        Self {
            affine: [Mat4::IDENTITY; AFFINE_SLOT_COUNT],
            projection: [Mat4::IDENTITY; PROJECTION_SLOT_COUNT],
            dirty: 0,
            recomputes: 0,
        }
    }

    /// Number of derived-matrix recomputations performed so far.
    ///
    /// Instrumentation only; lets callers verify that reads are served from
    /// cache and that redundant writes trigger no work.
    #[inline]
    pub fn recompute_count(&self) -> u64 {
        self.recomputes
    }

    /// Stores `matrix` into an affine slot, marking its dependents stale.
    ///
    /// Writes to derived slots are ignored. If the slot's whole dependent
    /// set is already stale the value is stored without the cost of an
    /// equality check; otherwise a write of the already-stored value is a
    /// complete no-op.
    pub fn set_affine(&mut self, slot: AffineTransformSlot, matrix: Mat4) {
        if !slot.is_primary() {
            log::warn!("Ignoring write to derived transform slot {slot:?}");
            return;
        }
        let deps = slot.dependents();
        let idx = slot as usize;
        if self.dirty & deps != deps {
            if self.affine[idx] == matrix {
                return;
            }
            self.dirty |= deps;
        }
        self.affine[idx] = matrix;
    }

    /// Stores `matrix` into a projective slot, marking its dependents stale.
    ///
    /// Same write contract as [`set_affine`](Self::set_affine).
    pub fn set_projection(&mut self, slot: ProjectionTransformSlot, matrix: Mat4) {
        if !slot.is_primary() {
            log::warn!("Ignoring write to derived transform slot {slot:?}");
            return;
        }
        let deps = slot.dependents();
        let idx = slot as usize;
        if self.dirty & deps != deps {
            if self.projection[idx] == matrix {
                return;
            }
            self.dirty |= deps;
        }
        self.projection[idx] = matrix;
    }

    /// Returns the matrix in an affine slot, refreshing it first if stale.
    pub fn get_affine(&mut self, slot: AffineTransformSlot) -> Mat4 {
        self.refresh_affine(slot);
        self.affine[slot as usize]
    }

    /// Returns the matrix in a projective slot, refreshing it first if stale.
    pub fn get_projection(&mut self, slot: ProjectionTransformSlot) -> Mat4 {
        self.refresh_projection(slot);
        self.projection[slot as usize]
    }

    /// Recomputes an affine slot (and the slots it reads) if stale, then
    /// clears its dirty bit.
    fn refresh_affine(&mut self, slot: AffineTransformSlot) {
        if self.dirty & slot.bit() == 0 {
            return;
        }
        match slot {
            // Primary slots hold caller-written values; the stored matrix
            // is already current, only the bit needs clearing.
            AffineTransformSlot::World | AffineTransformSlot::View => {}
            AffineTransformSlot::WorldView => {
                let m = self.affine[AffineTransformSlot::View as usize]
                    * self.affine[AffineTransformSlot::World as usize];
                self.affine[AffineTransformSlot::WorldView as usize] = m;
                self.recomputes += 1;
            }
            AffineTransformSlot::WorldInverse => {
                self.invert_affine_into(AffineTransformSlot::World, AffineTransformSlot::WorldInverse);
            }
            AffineTransformSlot::ViewInverse => {
                self.invert_affine_into(AffineTransformSlot::View, AffineTransformSlot::ViewInverse);
            }
            AffineTransformSlot::WorldViewInverse => {
                self.refresh_affine(AffineTransformSlot::WorldView);
                self.invert_affine_into(
                    AffineTransformSlot::WorldView,
                    AffineTransformSlot::WorldViewInverse,
                );
            }
            AffineTransformSlot::NormalMatrix => {
                self.refresh_affine(AffineTransformSlot::WorldViewInverse);
                let wvi = &self.affine[AffineTransformSlot::WorldViewInverse as usize];
                let m = Mat3::from_mat4(wvi).transpose().to_mat4();
                self.affine[AffineTransformSlot::NormalMatrix as usize] = m;
                self.recomputes += 1;
            }
        }
        self.dirty &= !slot.bit();
    }

    /// Recomputes a projective slot (and the slots it reads) if stale, then
    /// clears its dirty bit.
    fn refresh_projection(&mut self, slot: ProjectionTransformSlot) {
        if self.dirty & slot.bit() == 0 {
            return;
        }
        match slot {
            ProjectionTransformSlot::Proj => {}
            ProjectionTransformSlot::ProjView => {
                let m = self.projection[ProjectionTransformSlot::Proj as usize]
                    * self.affine[AffineTransformSlot::View as usize];
                self.projection[ProjectionTransformSlot::ProjView as usize] = m;
                self.recomputes += 1;
            }
            ProjectionTransformSlot::ProjViewWorld => {
                self.refresh_affine(AffineTransformSlot::WorldView);
                let m = self.projection[ProjectionTransformSlot::Proj as usize]
                    * self.affine[AffineTransformSlot::WorldView as usize];
                self.projection[ProjectionTransformSlot::ProjViewWorld as usize] = m;
                self.recomputes += 1;
            }
            ProjectionTransformSlot::ProjInverse => {
                self.invert_projection_into(
                    ProjectionTransformSlot::Proj,
                    ProjectionTransformSlot::ProjInverse,
                );
            }
            ProjectionTransformSlot::ProjViewInverse => {
                self.refresh_projection(ProjectionTransformSlot::ProjView);
                self.invert_projection_into(
                    ProjectionTransformSlot::ProjView,
                    ProjectionTransformSlot::ProjViewInverse,
                );
            }
            ProjectionTransformSlot::ProjViewWorldInverse => {
                self.refresh_projection(ProjectionTransformSlot::ProjViewWorld);
                self.invert_projection_into(
                    ProjectionTransformSlot::ProjViewWorld,
                    ProjectionTransformSlot::ProjViewWorldInverse,
                );
            }
        }
        self.dirty &= !slot.bit();
    }

    /// Inverts affine slot `src` into slot `dst`.
    ///
    /// A singular source keeps the previous value of `dst`; staleness is
    /// still consumed, so the failed inversion is not retried until the
    /// source changes again.
    fn invert_affine_into(&mut self, src: AffineTransformSlot, dst: AffineTransformSlot) {
        self.recomputes += 1;
        match self.affine[src as usize].affine_inverse() {
            Some(inv) => self.affine[dst as usize] = inv,
            None => {
                log::warn!("Singular matrix in {src:?}; keeping previous value of {dst:?}");
            }
        }
    }

    /// Inverts projective slot `src` into slot `dst`, with the same singular
    /// policy as the affine variant.
    fn invert_projection_into(
        &mut self,
        src: ProjectionTransformSlot,
        dst: ProjectionTransformSlot,
    ) {
        self.recomputes += 1;
        match self.projection[src as usize].inverse() {
            Some(inv) => self.projection[dst as usize] = inv,
            None => {
                log::warn!("Singular matrix in {src:?}; keeping previous value of {dst:?}");
            }
        }
    }
}

impl Default for TransformState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use vitria_core::math::{Vec3, Vec4, EPSILON};

    fn mat4_approx_eq(a: &Mat4, b: &Mat4) -> bool {
        (0..4).all(|c| {
            let (ca, cb) = (a.cols[c], b.cols[c]);
            (0..4).all(|r| (ca.get(r) - cb.get(r)).abs() < EPSILON)
        })
    }

    #[test]
    fn fresh_cache_serves_identities_without_recomputing() {
        let mut state = TransformState::new();
        for slot in AffineTransformSlot::ALL {
            assert_eq!(state.get_affine(slot), Mat4::IDENTITY);
        }
        for slot in ProjectionTransformSlot::ALL {
            assert_eq!(state.get_projection(slot), Mat4::IDENTITY);
        }
        assert_eq!(state.recompute_count(), 0);
    }

    #[test]
    fn repeated_reads_recompute_once() {
        let mut state = TransformState::new();
        state.set_affine(AffineTransformSlot::World, Mat4::from_translation(Vec3::new(3.0, 0.0, 0.0)));
        let first = state.get_affine(AffineTransformSlot::WorldView);
        let count = state.recompute_count();
        for _ in 0..10 {
            assert_eq!(state.get_affine(AffineTransformSlot::WorldView), first);
        }
        assert_eq!(state.recompute_count(), count);
    }

    #[test]
    fn redundant_writes_coalesce_before_a_read() {
        let mut state = TransformState::new();
        for i in 0..100 {
            let t = Mat4::from_translation(Vec3::new(i as f32, 0.0, 0.0));
            state.set_affine(AffineTransformSlot::World, t);
        }
        state.get_affine(AffineTransformSlot::WorldView);
        // One multiply, no matter how many writes preceded the read.
        assert_eq!(state.recompute_count(), 1);
    }

    #[test]
    fn rewriting_the_stored_value_keeps_the_cache_clean() {
        let mut state = TransformState::new();
        let t = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
        state.set_affine(AffineTransformSlot::World, t);
        state.get_affine(AffineTransformSlot::WorldView);
        let count = state.recompute_count();

        // Same value again: nothing becomes stale.
        state.set_affine(AffineTransformSlot::World, t);
        state.get_affine(AffineTransformSlot::WorldView);
        assert_eq!(state.recompute_count(), count);
    }

    #[test]
    fn writes_to_derived_slots_are_ignored() {
        let mut state = TransformState::new();
        state.set_affine(
            AffineTransformSlot::WorldView,
            Mat4::from_scale(Vec3::new(2.0, 2.0, 2.0)),
        );
        assert_eq!(state.get_affine(AffineTransformSlot::WorldView), Mat4::IDENTITY);
        state.set_projection(
            ProjectionTransformSlot::ProjView,
            Mat4::from_scale(Vec3::new(2.0, 2.0, 2.0)),
        );
        assert_eq!(state.get_projection(ProjectionTransformSlot::ProjView), Mat4::IDENTITY);
    }

    #[test]
    fn world_view_is_view_times_world() {
        let mut state = TransformState::new();
        let world = Mat4::from_translation(Vec3::new(1.0, 0.0, 0.0));
        let view = Mat4::from_rotation_y(std::f32::consts::FRAC_PI_2);
        state.set_affine(AffineTransformSlot::World, world);
        state.set_affine(AffineTransformSlot::View, view);
        let wv = state.get_affine(AffineTransformSlot::WorldView);
        assert!(mat4_approx_eq(&wv, &(view * world)));
    }

    #[test]
    fn normal_matrix_is_transposed_inverse_block() {
        let mut state = TransformState::new();
        let world = Mat4::from_scale(Vec3::new(2.0, 2.0, 2.0));
        state.set_affine(AffineTransformSlot::World, world);
        let normal = state.get_affine(AffineTransformSlot::NormalMatrix);
        // Uniform scale by 2 inverts to 0.5 on the diagonal.
        assert_relative_eq!(normal.cols[0].x, 0.5, epsilon = EPSILON);
        assert_relative_eq!(normal.cols[1].y, 0.5, epsilon = EPSILON);
        assert_relative_eq!(normal.cols[2].z, 0.5, epsilon = EPSILON);
    }

    #[test]
    fn normal_matrix_read_refreshes_the_whole_chain() {
        let mut state = TransformState::new();
        state.set_affine(
            AffineTransformSlot::World,
            Mat4::from_translation(Vec3::new(0.0, 5.0, 0.0)),
        );
        state.get_affine(AffineTransformSlot::NormalMatrix);
        // WorldView and WorldViewInverse were refreshed along the way and
        // serve later reads from cache.
        let count = state.recompute_count();
        state.get_affine(AffineTransformSlot::WorldView);
        state.get_affine(AffineTransformSlot::WorldViewInverse);
        assert_eq!(state.recompute_count(), count);
    }

    #[test]
    fn view_write_stales_the_projective_chain() {
        let mut state = TransformState::new();
        let proj = Mat4::perspective_rh_zo(std::f32::consts::FRAC_PI_4, 16.0 / 9.0, 0.1, 100.0);
        state.set_projection(ProjectionTransformSlot::Proj, proj);
        state.get_projection(ProjectionTransformSlot::ProjView);
        let count = state.recompute_count();

        let view = Mat4::from_translation(Vec3::new(0.0, 0.0, -10.0));
        state.set_affine(AffineTransformSlot::View, view);
        let pv = state.get_projection(ProjectionTransformSlot::ProjView);
        assert!(state.recompute_count() > count);
        assert!(mat4_approx_eq(&pv, &(proj * view)));
        // The projection-only chain is untouched by a view write.
        assert_eq!(state.get_projection(ProjectionTransformSlot::Proj), proj);
    }

    #[test]
    fn proj_view_world_composes_all_three_primaries() {
        let mut state = TransformState::new();
        let world = Mat4::from_translation(Vec3::new(1.0, 0.0, 0.0));
        state.set_affine(AffineTransformSlot::World, world);
        let pvw = state.get_projection(ProjectionTransformSlot::ProjViewWorld);
        // View and projection are identity, so the composite is the world
        // translation; the point at the origin lands at x = 1.
        let p = pvw * Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert_relative_eq!(p.x, 1.0, epsilon = EPSILON);
        assert!(mat4_approx_eq(&pvw, &world));
    }

    #[test]
    fn proj_inverse_does_not_clobber_proj() {
        let mut state = TransformState::new();
        let proj = Mat4::perspective_rh_zo(std::f32::consts::FRAC_PI_4, 1.0, 0.5, 50.0);
        state.set_projection(ProjectionTransformSlot::Proj, proj);
        let inv = state.get_projection(ProjectionTransformSlot::ProjInverse);
        assert_eq!(state.get_projection(ProjectionTransformSlot::Proj), proj);
        assert!(mat4_approx_eq(&(proj * inv), &Mat4::IDENTITY));
    }

    #[test]
    fn singular_primary_keeps_previous_inverse() {
        let mut state = TransformState::new();
        // Scale with a collapsed axis: affine, but not invertible.
        state.set_affine(
            AffineTransformSlot::World,
            Mat4::from_scale(Vec3::new(1.0, 0.0, 1.0)),
        );
        let inv = state.get_affine(AffineTransformSlot::WorldInverse);
        // Inversion failed; the slot still holds its previous (identity)
        // value and the attempt was consumed.
        assert_eq!(inv, Mat4::IDENTITY);
        let count = state.recompute_count();
        state.get_affine(AffineTransformSlot::WorldInverse);
        assert_eq!(state.recompute_count(), count);
    }

    #[test]
    fn world_inverse_round_trips() {
        let mut state = TransformState::new();
        let world = Mat4::from_translation(Vec3::new(4.0, -2.0, 7.0))
            * Mat4::from_rotation_z(0.3);
        state.set_affine(AffineTransformSlot::World, world);
        let inv = state.get_affine(AffineTransformSlot::WorldInverse);
        assert!(mat4_approx_eq(&(world * inv), &Mat4::IDENTITY));
    }
}
