// Copyright 2025 eraflo
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

//! Defines the `LinearRgba` color type used for clear and vertex colors.

/// A color in a **linear RGBA** color space using `f32` components.
///
/// Linear space is what GPU blending expects; sRGB inputs (the values humans
/// usually pick) go through [`LinearRgba::from_srgb`]. `#[repr(C)]` ensures a
/// consistent memory layout when the color is handed to graphics APIs.
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
pub struct LinearRgba {
    /// The red component in linear space.
    pub r: f32,
    /// The green component in linear space.
    pub g: f32,
    /// The blue component in linear space.
    pub b: f32,
    /// The alpha (opacity) component.
    pub a: f32,
}

impl LinearRgba {
    /// Opaque white (`[1.0, 1.0, 1.0, 1.0]`).
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    /// Opaque black (`[0.0, 0.0, 0.0, 1.0]`).
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    /// Fully transparent black (`[0.0, 0.0, 0.0, 0.0]`).
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Creates a new `LinearRgba` with explicit RGBA values.
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a new opaque `LinearRgba` (alpha = 1.0).
    #[inline]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Creates a `LinearRgba` from sRGB components, converting the color
    /// channels to linear space. Alpha is passed through unchanged.
    pub fn from_srgb(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self {
            r: srgb_to_linear(r),
            g: srgb_to_linear(g),
            b: srgb_to_linear(b),
            a,
        }
    }

    /// Returns the components as an array, in `[r, g, b, a]` order.
    #[inline]
    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for LinearRgba {
    fn default() -> Self {
        Self::BLACK
    }
}

impl From<[f32; 4]> for LinearRgba {
    fn from(v: [f32; 4]) -> Self {
        Self::new(v[0], v[1], v[2], v[3])
    }
}

/// Converts an sRGB component to linear space.
#[inline]
fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn constants_have_expected_components() {
        assert_eq!(LinearRgba::WHITE.to_array(), [1.0, 1.0, 1.0, 1.0]);
        assert_eq!(LinearRgba::BLACK.to_array(), [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(LinearRgba::TRANSPARENT.a, 0.0);
    }

    #[test]
    fn srgb_conversion_matches_reference_values() {
        // 0.5 sRGB is ~0.2140 linear; endpoints are fixed points.
        let mid = LinearRgba::from_srgb(0.5, 0.5, 0.5, 1.0);
        assert_relative_eq!(mid.r, 0.21404114, max_relative = 1e-5);

        let white = LinearRgba::from_srgb(1.0, 1.0, 1.0, 0.5);
        assert_relative_eq!(white.g, 1.0, max_relative = 1e-6);
        assert_eq!(white.a, 0.5);

        let black = LinearRgba::from_srgb(0.0, 0.0, 0.0, 1.0);
        assert_eq!(black.b, 0.0);
    }

    #[test]
    fn array_round_trip() {
        let color = LinearRgba::new(0.1, 0.2, 0.3, 0.4);
        assert_eq!(LinearRgba::from(color.to_array()), color);
    }
}
