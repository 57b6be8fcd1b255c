//! # photopress
//!
//! An in-memory raster image transform pipeline. A [`Session`] holds one
//! owned image and applies a sequence of geometric and compositing
//! operations — resize, crop, rotate, footer band, watermark, drop-shadow
//! text, overlay — then persists the result as JPEG.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`session`] | The owned image handle and the public operation surface |
//! | [`imaging`] | Geometry (pure fit/placement/rotation math) and the drawing backend |
//! | [`naming`] | Collision-safe output path resolution |
//! | [`config`] | Optional TOML defaults for the CLI |
//!
//! # Design Decisions
//!
//! ## One Owned Buffer, Swapped Atomically
//!
//! A session owns exactly one raster. Each mutating operation builds its
//! replacement through the backend and swaps it in; the old buffer drops at
//! the swap, and intermediates (the scaled image before a crop, the rotated
//! watermark before its blend) drop when their operation returns — on the
//! error path too. There is no sharing and no reference counting, because
//! ownership is always singular and sequential.
//!
//! ## Geometry Is Pure, Drawing Is a Trait
//!
//! Every placement and sizing decision lives in
//! [`imaging::calculations`] and [`imaging::transform`] as pure functions
//! over dimensions, unit-tested without touching a pixel. Actual sampling
//! and compositing sit behind [`imaging::RasterBackend`]; tests assert
//! operation sequencing against a recording mock, and the production
//! [`imaging::RustBackend`] does the pixel work with the `image`,
//! `imageproc`, and `ab_glyph` crates — pure Rust, no system libraries.
//!
//! ## Never Overwrite
//!
//! [`Session::save`] resolves filename collisions with a numeric stem
//! suffix and returns the path actually written. Rapid repeated saves to
//! the same path yield distinct files.

pub mod config;
pub mod imaging;
pub mod naming;
pub mod session;

pub use imaging::{
    Disposition, FooterPosition, Raster, RasterBackend, RustBackend, TextStyle, WaterMarkPosition,
};
pub use session::{Session, SessionError};
