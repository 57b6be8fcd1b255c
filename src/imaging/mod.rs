//! Image geometry and drawing — pure Rust, zero system dependencies.
//!
//! | Concern | Where |
//! |---|---|
//! | **Aspect / fit / placement math** | [`calculations`] (pure functions) |
//! | **Rotation + bounding box** | [`transform`] (pure affine engine) |
//! | **Draw parameters** | [`params`] |
//! | **Backend trait** | [`backend::RasterBackend`] |
//! | **Production backend** | [`rust_backend::RustBackend`] (`image` + `imageproc` + `ab_glyph`) |
//!
//! The split keeps every geometric decision unit-testable without touching a
//! pixel: [`calculations`] and [`transform`] compute *where* and *how big*,
//! the backend does the actual sampling and compositing.

pub mod backend;
pub mod calculations;
pub mod params;
pub mod rust_backend;
pub mod transform;

pub use backend::{BackendError, Raster, RasterBackend};
pub use calculations::{Disposition, disposition};
pub use params::{
    BlitParams, ColorAdjustment, FooterPosition, Region, SamplingQuality, TextStyle,
    WaterMarkPosition,
};
pub use rust_backend::RustBackend;
pub use transform::{Affine, RotationTransform};
