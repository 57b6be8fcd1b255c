//! Raster buffer type, backend trait, and shared error type.
//!
//! The [`RasterBackend`] trait defines the drawing primitives every backend
//! must support: decode, blank-buffer allocation, scaled blit, affine warp,
//! adjusted (color-matrix) blit, text drawing, and JPEG encode.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend) — pure Rust, everything
//! statically linked. Tests use the in-file [`MockBackend`](tests::MockBackend)
//! to assert operation sequencing without touching pixels.

use super::params::{BlitParams, ColorAdjustment, TextStyle};
use super::transform::Affine;
use image::RgbaImage;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to decode image: {0}")]
    Decode(String),
    #[error("failed to encode image: {0}")]
    Encode(String),
    #[error("processing failed: {0}")]
    ProcessingFailed(String),
}

/// An owned RGBA raster buffer.
///
/// Exactly one holder owns a `Raster` at a time; transforms produce a new
/// buffer and the old one is dropped when the holder swaps it out. The pixel
/// storage is private to the imaging module — callers observe only
/// dimensions and the operations of [`RasterBackend`].
#[derive(Debug, Clone)]
pub struct Raster {
    pixels: RgbaImage,
}

impl Raster {
    pub(crate) fn from_pixels(pixels: RgbaImage) -> Self {
        Self { pixels }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.pixels.width(), self.pixels.height())
    }

    pub(crate) fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    pub(crate) fn pixels_mut(&mut self) -> &mut RgbaImage {
        &mut self.pixels
    }
}

/// Trait for raster drawing backends.
///
/// Every backend must implement all seven primitives so the session and
/// pipeline logic stay backend-agnostic. All coordinates are destination
/// pixels; draws that overhang the destination are clipped, never errors.
pub trait RasterBackend {
    /// Decode an encoded image (JPEG, PNG) into a raster.
    fn decode(&self, bytes: &[u8]) -> Result<Raster, BackendError>;

    /// Allocate a blank (fully transparent) buffer.
    fn blank(&self, width: u32, height: u32) -> Raster;

    /// Draw a region of `src` into `dest`, scaled to `params.dest_size`,
    /// alpha-compositing over existing destination pixels.
    fn blit(&self, src: &Raster, dest: &mut Raster, params: &BlitParams)
    -> Result<(), BackendError>;

    /// Draw `src` into `dest` through an affine map (used for rotation).
    /// Destination pixels the mapped source does not cover stay transparent.
    fn warp(&self, src: &Raster, map: &Affine, dest: &mut Raster) -> Result<(), BackendError>;

    /// Draw `src` at native size at `origin`, pushing every source pixel
    /// through `adjustment` before compositing. The adjustment is scoped to
    /// this single draw.
    fn blit_adjusted(
        &self,
        src: &Raster,
        dest: &mut Raster,
        origin: (i32, i32),
        adjustment: &ColorAdjustment,
    ) -> Result<(), BackendError>;

    /// Draw antialiased text at `origin` in the given RGBA color.
    fn draw_text(
        &self,
        dest: &mut Raster,
        text: &str,
        style: &TextStyle,
        color: [u8; 4],
        origin: (i32, i32),
    ) -> Result<(), BackendError>;

    /// Encode the raster to the pipeline's fixed output format (JPEG).
    fn encode(&self, image: &Raster) -> Result<Vec<u8>, BackendError>;
}
