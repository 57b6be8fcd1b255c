//! Parameter and policy types for draw operations.
//!
//! These types describe *what* to draw, not *how* to draw it. They are the
//! interface between [`Session`](crate::session::Session) (which decides what
//! operations to run) and the [`backend`](super::backend) (which does the
//! actual pixel work). This separation allows swapping backends (e.g. for
//! testing with a mock) without changing operation logic.

use ab_glyph::FontArc;
use serde::{Deserialize, Serialize};

/// Resampling quality for scaled draws.
///
/// `High` means antialiased edges and bicubic-class interpolation; every
/// compositing operation in the pipeline uses it unless noted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SamplingQuality {
    /// Cheap interpolation, for previews.
    Fast,
    #[default]
    High,
}

/// A rectangular region of a raster, in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The full extent of a buffer with the given dimensions.
    pub fn full(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Clamp this region to the bounds of a `width`×`height` buffer.
    /// Returns `None` when nothing of the region remains in bounds.
    pub fn clamped_to(&self, width: u32, height: u32) -> Option<Region> {
        if self.x >= width || self.y >= height {
            return None;
        }
        let w = self.width.min(width - self.x);
        let h = self.height.min(height - self.y);
        if w == 0 || h == 0 {
            return None;
        }
        Some(Region::new(self.x, self.y, w, h))
    }
}

/// Full specification for a blit: which part of the source to read, where it
/// lands in the destination, the size to scale it to, and the resampling
/// quality. A negative origin places the source partially off-canvas; the
/// backend clips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlitParams {
    pub src_region: Region,
    pub dest_origin: (i32, i32),
    pub dest_size: (u32, u32),
    pub quality: SamplingQuality,
}

impl BlitParams {
    /// Draw the whole source at its native size at `(x, y)`.
    pub fn at(src_width: u32, src_height: u32, x: i32, y: i32) -> Self {
        Self {
            src_region: Region::full(src_width, src_height),
            dest_origin: (x, y),
            dest_size: (src_width, src_height),
            quality: SamplingQuality::High,
        }
    }

    /// Scale the whole source to fill a `width`×`height` destination.
    pub fn scaled(src_width: u32, src_height: u32, width: u32, height: u32) -> Self {
        Self {
            src_region: Region::full(src_width, src_height),
            dest_origin: (0, 0),
            dest_size: (width, height),
            quality: SamplingQuality::High,
        }
    }
}

/// Horizontal placement of a footer band appended below the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FooterPosition {
    #[default]
    Left,
    Center,
    Right,
}

/// Placement of a watermark layer on the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WaterMarkPosition {
    Center,
    #[default]
    RightTop,
}

/// A 5×5 color adjustment matrix applied during a single draw call.
///
/// Layout follows the row-vector convention: a pixel `[r, g, b, a, 1]` is
/// multiplied from the left, so `matrix[3][3]` scales the alpha channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorAdjustment {
    matrix: [[f32; 5]; 5],
}

impl ColorAdjustment {
    pub fn identity() -> Self {
        let mut matrix = [[0.0; 5]; 5];
        for (i, row) in matrix.iter_mut().enumerate() {
            row[i] = 1.0;
        }
        Self { matrix }
    }

    /// Identity on RGB, alpha scaled by `factor`. The watermark pipeline uses
    /// a fixed factor of 0.3.
    pub fn alpha_scale(factor: f32) -> Self {
        let mut adjustment = Self::identity();
        adjustment.matrix[3][3] = factor;
        adjustment
    }

    /// The fixed translucency adjustment applied to watermark layers.
    pub fn watermark() -> Self {
        Self::alpha_scale(0.3)
    }

    /// Push one normalized RGBA pixel through the matrix, clamping to [0, 1].
    pub fn apply(&self, rgba: [f32; 4]) -> [f32; 4] {
        let input = [rgba[0], rgba[1], rgba[2], rgba[3], 1.0];
        let mut out = [0.0f32; 4];
        for (channel, slot) in out.iter_mut().enumerate() {
            let mut sum = 0.0;
            for (component, value) in input.iter().enumerate() {
                sum += value * self.matrix[component][channel];
            }
            *slot = sum.clamp(0.0, 1.0);
        }
        out
    }
}

/// Font and size for text drawn onto the image.
#[derive(Debug, Clone)]
pub struct TextStyle {
    pub font: FontArc,
    /// Pixel scale (height) of the rendered glyphs.
    pub scale: f32,
}

impl TextStyle {
    pub fn new(font: FontArc, scale: f32) -> Self {
        Self { font, scale }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_clamped_inside_is_unchanged() {
        let r = Region::new(10, 10, 20, 20);
        assert_eq!(r.clamped_to(100, 100), Some(r));
    }

    #[test]
    fn region_clamped_overhang_is_trimmed() {
        let r = Region::new(90, 95, 20, 20);
        assert_eq!(r.clamped_to(100, 100), Some(Region::new(90, 95, 10, 5)));
    }

    #[test]
    fn region_fully_outside_is_none() {
        let r = Region::new(100, 0, 20, 20);
        assert_eq!(r.clamped_to(100, 100), None);
    }

    #[test]
    fn identity_adjustment_preserves_pixels() {
        let adjustment = ColorAdjustment::identity();
        let pixel = [0.2, 0.4, 0.6, 0.8];
        assert_eq!(adjustment.apply(pixel), pixel);
    }

    #[test]
    fn watermark_adjustment_scales_alpha_only() {
        let adjustment = ColorAdjustment::watermark();
        let out = adjustment.apply([1.0, 0.5, 0.25, 1.0]);
        assert_eq!(out[0], 1.0);
        assert_eq!(out[1], 0.5);
        assert_eq!(out[2], 0.25);
        assert!((out[3] - 0.3).abs() < 1e-6);
    }

    #[test]
    fn adjustment_output_is_clamped() {
        let adjustment = ColorAdjustment::alpha_scale(4.0);
        let out = adjustment.apply([0.0, 0.0, 0.0, 0.9]);
        assert_eq!(out[3], 1.0);
    }

    #[test]
    fn default_positions_match_documented_fallbacks() {
        assert_eq!(FooterPosition::default(), FooterPosition::Left);
        assert_eq!(WaterMarkPosition::default(), WaterMarkPosition::RightTop);
    }
}
