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

//! The material state bound to the driver between draws.

use crate::renderer::api::texture::TextureHandle;

/// The render state a driver keeps bound between draw calls.
///
/// Only the parts relevant to resource lifetime are modeled here: a bound
/// material owns a reference to its texture, so a driver must reset the
/// bound material before purging its texture cache or the bound handle
/// would outlive the purge.
#[derive(Debug, Clone, Default)]
pub struct Material {
    /// The texture sampled by this material, if any.
    pub texture: Option<TextureHandle>,
}

impl Material {
    /// A material with no texture bound.
    pub fn none() -> Self {
        Self::default()
    }
}
