//! The processing session: one owned image, mutated by a sequence of
//! geometric and compositing operations.
//!
//! A [`Session`] holds exactly one live [`Raster`]. Every mutating operation
//! computes a replacement buffer through the backend and swaps it in; the
//! previous buffer is dropped at the swap. Intermediate buffers (the scaled
//! image before a crop, the rotated watermark before its draw) are scoped to
//! the operation that created them and are dropped on every exit path,
//! including errors.
//!
//! Operations are `&mut self`, so a session cannot be mutated concurrently;
//! callers that want parallelism run one session per image.

use crate::imaging::backend::{BackendError, Raster, RasterBackend};
use crate::imaging::calculations::{
    self, Disposition, center_crop_origin, cover_dimensions, fit_within, footer_x,
    watermark_origin,
};
use crate::imaging::params::{
    BlitParams, ColorAdjustment, FooterPosition, Region, SamplingQuality, TextStyle,
    WaterMarkPosition,
};
use crate::imaging::transform::RotationTransform;
use crate::naming;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("invalid target dimensions {width}x{height}: both axes must be positive")]
    InvalidDimension { width: u32, height: u32 },
    #[error("image backend: {0}")]
    Backend(#[from] BackendError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for session operations.
pub type Result<T> = std::result::Result<T, SessionError>;

/// Drop-shadow offset for [`Session::add_text`], in pixels.
const TEXT_SHADOW_OFFSET: i32 = 1;

const BLACK: [u8; 4] = [0, 0, 0, 255];
const WHITE: [u8; 4] = [255, 255, 255, 255];

/// A single-image processing session over a raster backend.
pub struct Session<B: RasterBackend> {
    backend: B,
    current: Raster,
}

impl<B: RasterBackend> Session<B> {
    /// Start a session by decoding an encoded image (JPEG, PNG).
    pub fn from_bytes(backend: B, bytes: &[u8]) -> Result<Self> {
        let current = backend.decode(bytes)?;
        debug!(
            width = current.width(),
            height = current.height(),
            "decoded source image"
        );
        Ok(Self { backend, current })
    }

    /// Start a session from an already-decoded raster.
    pub fn from_raster(backend: B, raster: Raster) -> Self {
        Self {
            backend,
            current: raster,
        }
    }

    /// Start a session by reading and decoding a file.
    pub fn open(backend: B, path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(backend, &bytes)
    }

    pub fn width(&self) -> u32 {
        self.current.width()
    }

    pub fn height(&self) -> u32 {
        self.current.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.current.dimensions()
    }

    /// Aspect classification of the current image. Pure query; repeated
    /// calls without an intervening mutation return the same value.
    pub fn disposition(&self) -> Disposition {
        calculations::disposition(self.width(), self.height())
    }

    /// Borrow the current raster.
    pub fn raster(&self) -> &Raster {
        &self.current
    }

    /// End the session and take ownership of the held buffer.
    pub fn into_raster(self) -> Raster {
        self.current
    }

    /// Resize to exactly `width`×`height`, ignoring aspect ratio.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        validate(width, height)?;
        debug!(
            from_width = self.width(),
            from_height = self.height(),
            width,
            height,
            "resizing"
        );
        let resized = self.scaled(&self.current, width, height)?;
        self.current = resized;
        Ok(())
    }

    /// Resize to fit inside `max_width`×`max_height`, preserving aspect
    /// ratio. Portrait images pin height; Landscape and Square pin width
    /// (see [`fit_within`] for the Square policy).
    pub fn resize_with_max(&mut self, max_width: u32, max_height: u32) -> Result<()> {
        validate(max_width, max_height)?;
        let (width, height) = fit_within(
            self.dimensions(),
            (max_width, max_height),
            self.disposition(),
        );
        debug!(max_width, max_height, width, height, "fitted inside max box");
        self.resize(width, height)
    }

    /// Append a footer band below the image, left-aligned.
    pub fn add_footer(&mut self, footer: &Raster) -> Result<()> {
        self.add_footer_at(footer, FooterPosition::default())
    }

    /// Append a footer band below the image at the given horizontal
    /// placement. The canvas grows by the footer height; the footer row
    /// starts one pixel below the original image.
    pub fn add_footer_at(&mut self, footer: &Raster, position: FooterPosition) -> Result<()> {
        let (width, height) = self.dimensions();
        let x = footer_x(width, footer.width(), position);
        debug!(x, ?position, footer_height = footer.height(), "adding footer");

        let mut dest = self.backend.blank(width, height + footer.height());
        self.backend.blit(
            &self.current,
            &mut dest,
            &BlitParams::at(width, height, 0, 0),
        )?;
        self.backend.blit(
            footer,
            &mut dest,
            &BlitParams::at(footer.width(), footer.height(), x, (height + 1) as i32),
        )?;
        self.current = dest;
        Ok(())
    }

    /// Blend a watermark at the default position (right-top) with no
    /// rotation.
    pub fn add_water_mark(&mut self, mark: &Raster) -> Result<()> {
        self.add_water_mark_at(mark, WaterMarkPosition::default(), 0.0)
    }

    /// Blend a watermark onto the current image.
    ///
    /// A non-zero `angle` rotates the mark first (the rotated intermediate
    /// is dropped when the call returns). The mark's alpha channel is scaled
    /// by the fixed watermark factor during the draw; the current image is
    /// modified in place and keeps its dimensions.
    pub fn add_water_mark_at(
        &mut self,
        mark: &Raster,
        position: WaterMarkPosition,
        angle: f32,
    ) -> Result<()> {
        let rotated;
        let mark = if angle != 0.0 {
            rotated = self.rotated(mark, angle)?;
            &rotated
        } else {
            mark
        };

        let origin = watermark_origin(self.dimensions(), mark.dimensions(), position);
        debug!(?position, angle, x = origin.0, y = origin.1, "adding watermark");
        self.backend.blit_adjusted(
            mark,
            &mut self.current,
            origin,
            &ColorAdjustment::watermark(),
        )?;
        Ok(())
    }

    /// Draw text with a one-pixel black drop shadow, white on top,
    /// antialiased, in place.
    pub fn add_text(&mut self, text: &str, style: &TextStyle, x: i32, y: i32) -> Result<()> {
        debug!(text, x, y, "adding text");
        self.backend.draw_text(
            &mut self.current,
            text,
            style,
            BLACK,
            (x + TEXT_SHADOW_OFFSET, y + TEXT_SHADOW_OFFSET),
        )?;
        self.backend
            .draw_text(&mut self.current, text, style, WHITE, (x, y))?;
        Ok(())
    }

    /// Draw an overlay image at its native size at `(x, y)`, in place.
    pub fn add_image(&mut self, overlay: &Raster, x: i32, y: i32) -> Result<()> {
        debug!(
            x,
            y,
            overlay_width = overlay.width(),
            overlay_height = overlay.height(),
            "adding overlay"
        );
        self.backend.blit(
            overlay,
            &mut self.current,
            &BlitParams::at(overlay.width(), overlay.height(), x, y),
        )
        .map_err(SessionError::from)
    }

    /// Produce and save a square `size`×`size` thumbnail.
    ///
    /// Landscape sources scale height to `size` and center-crop the width;
    /// Portrait is the mirror; Square resizes directly with no crop. The
    /// current image is not modified.
    pub fn save_thumbnail(&self, path: &Path, size: u32) -> Result<PathBuf> {
        validate(size, size)?;
        let (width, height) = self.dimensions();

        let thumb = match self.disposition() {
            Disposition::Landscape => {
                let scaled_width = (size as f32 / height as f32 * width as f32) as u32;
                let scaled = self.scaled(&self.current, scaled_width, size)?;
                self.cropped(&scaled, size, size)?
            }
            Disposition::Portrait => {
                let scaled_height = (size as f32 / width as f32 * height as f32) as u32;
                let scaled = self.scaled(&self.current, size, scaled_height)?;
                self.cropped(&scaled, size, size)?
            }
            Disposition::Square => self.scaled(&self.current, size, size)?,
        };

        let written = self.write(&thumb, path)?;
        info!(size, path = %written.display(), "saved thumbnail");
        Ok(written)
    }

    /// Produce and save a `width`×`height` thumbnail.
    ///
    /// Equal dimensions delegate to [`Session::save_thumbnail`]; otherwise
    /// the source is cover-fitted (scaled to fully cover the target box)
    /// and center-cropped.
    pub fn save_thumbnail_rect(&self, path: &Path, width: u32, height: u32) -> Result<PathBuf> {
        if width == height {
            return self.save_thumbnail(path, width);
        }
        validate(width, height)?;

        let (cover_w, cover_h) = cover_dimensions(self.dimensions(), (width, height));
        let covered = self.scaled(&self.current, cover_w, cover_h)?;
        let thumb = self.cropped(&covered, width, height)?;

        let written = self.write(&thumb, path)?;
        info!(width, height, path = %written.display(), "saved thumbnail");
        Ok(written)
    }

    /// Encode the current image as JPEG and write it, resolving filename
    /// collisions. Returns the path actually written.
    pub fn save(&self, path: &Path) -> Result<PathBuf> {
        let written = self.write(&self.current, path)?;
        info!(path = %written.display(), "saved image");
        Ok(written)
    }

    /// Rotate `src` about its center, returning a buffer sized to the
    /// rotation's bounding box.
    fn rotated(&self, src: &Raster, angle: f32) -> Result<Raster> {
        let transform = RotationTransform::for_source(src.width(), src.height(), angle);
        debug!(
            angle,
            width = transform.width(),
            height = transform.height(),
            "rotation bounding box"
        );
        let mut dest = self.backend.blank(transform.width(), transform.height());
        self.backend.warp(src, &transform.placement(), &mut dest)?;
        Ok(dest)
    }

    /// Scale `src` to exactly `width`×`height` into a fresh buffer.
    fn scaled(&self, src: &Raster, width: u32, height: u32) -> Result<Raster> {
        validate(width, height)?;
        let mut dest = self.backend.blank(width, height);
        self.backend.blit(
            src,
            &mut dest,
            &BlitParams::scaled(src.width(), src.height(), width, height),
        )?;
        Ok(dest)
    }

    /// Center-crop `src` to `width`×`height` into a fresh buffer.
    fn cropped(&self, src: &Raster, width: u32, height: u32) -> Result<Raster> {
        validate(width, height)?;
        let (x, y) = center_crop_origin(src.dimensions(), (width, height));
        let mut dest = self.backend.blank(width, height);
        self.backend.blit(
            src,
            &mut dest,
            &BlitParams {
                src_region: Region::new(x, y, width, height),
                dest_origin: (0, 0),
                dest_size: (width, height),
                quality: SamplingQuality::High,
            },
        )?;
        Ok(dest)
    }

    /// Encode `image` and write it to a collision-free variant of `path`.
    fn write(&self, image: &Raster, path: &Path) -> Result<PathBuf> {
        let target = naming::available_path(path);
        if let Some(parent) = target.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let bytes = self.backend.encode(image)?;
        std::fs::write(&target, bytes)?;
        Ok(target)
    }
}

fn validate(width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(SessionError::InvalidDimension { width, height });
    }
    Ok(())
}
