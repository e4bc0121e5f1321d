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

//! Defines the hierarchy of error types for the rendering subsystem.
//!
//! "Not found" outcomes are communicated as `Option::None` by the lookup
//! APIs and are never represented here; these types cover genuine failures.

use std::fmt;

/// An error related to the creation or registration of a texture.
#[derive(Debug)]
pub enum TextureError {
    /// A texture was submitted for registration without a name.
    ///
    /// The registry keys textures by name, so an unnamed texture can never
    /// be looked up again; rejecting it is an invalid-argument condition,
    /// distinct from the silent no-op on a duplicate name.
    UnnamedTexture,
    /// The device could not allocate the texture.
    CreationFailed {
        /// The name of the texture that failed to allocate.
        name: String,
        /// Detailed error message from the device.
        details: String,
    },
}

impl fmt::Display for TextureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextureError::UnnamedTexture => {
                write!(f, "Cannot register a texture with an empty name.")
            }
            TextureError::CreationFailed { name, details } => {
                write!(f, "Failed to create texture '{name}': {details}")
            }
        }
    }
}

impl std::error::Error for TextureError {}

/// An error related to the creation or use of a GPU resource.
#[derive(Debug)]
pub enum ResourceError {
    /// A texture-specific error occurred.
    Texture(TextureError),
    /// An error originating from the specific graphics backend implementation.
    BackendError(String),
}

impl fmt::Display for ResourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceError::Texture(err) => write!(f, "Texture resource error: {err}"),
            ResourceError::BackendError(msg) => {
                write!(f, "Backend-specific resource error: {msg}")
            }
        }
    }
}

impl std::error::Error for ResourceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ResourceError::Texture(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TextureError> for ResourceError {
    fn from(err: TextureError) -> Self {
        ResourceError::Texture(err)
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;

    #[test]
    fn texture_error_display() {
        assert_eq!(
            format!("{}", TextureError::UnnamedTexture),
            "Cannot register a texture with an empty name."
        );

        let err = TextureError::CreationFailed {
            name: "media/wall.png".to_string(),
            details: "out of device memory".to_string(),
        };
        assert_eq!(
            format!("{err}"),
            "Failed to create texture 'media/wall.png': out of device memory"
        );
    }

    #[test]
    fn backend_error_display_has_no_source() {
        let err = ResourceError::BackendError("device lost".to_string());
        assert_eq!(
            format!("{err}"),
            "Backend-specific resource error: device lost"
        );
        assert!(err.source().is_none());
    }

    #[test]
    fn resource_error_display_wrapping_texture_error() {
        let res_err: ResourceError = TextureError::UnnamedTexture.into();
        assert_eq!(
            format!("{res_err}"),
            "Texture resource error: Cannot register a texture with an empty name."
        );
        assert!(res_err.source().is_some());
    }
}
