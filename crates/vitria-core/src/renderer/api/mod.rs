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

//! Backend-agnostic rendering API types.
//!
//! - **[`transform`]**: transformation slot identifiers and dependency bits.
//! - **[`texture`]**: texture resources and their descriptors.
//! - **[`path`]**: canonical resource names.
//! - **[`material`]**: bound render state.

pub mod material;
pub mod path;
pub mod texture;
pub mod transform;

pub use self::material::Material;
pub use self::path::NamedPath;
pub use self::texture::{Texture, TextureDescriptor, TextureFormat, TextureHandle};
pub use self::transform::{
    AffineTransformSlot, ProjectionTransformSlot, AFFINE_SLOT_COUNT, PROJECTION_SLOT_COUNT,
    TRANSFORM_SLOT_COUNT,
};
