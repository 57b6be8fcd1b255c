//! Pure Rust drawing backend — everything statically linked.
//!
//! ## Crate mapping
//!
//! | Primitive | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG) | `image::load_from_memory` |
//! | Scaled blit | `image::imageops::resize` (Lanczos3) + `overlay` |
//! | Affine warp | `imageproc::geometric_transformations::warp_into` (bicubic) |
//! | Adjusted blit | per-pixel color matrix + Porter-Duff "over" |
//! | Text | `imageproc::drawing::draw_text_mut` + `ab_glyph` |
//! | Encode → JPEG | `image::codecs::jpeg::JpegEncoder` |

use super::backend::{BackendError, Raster, RasterBackend};
use super::params::{BlitParams, ColorAdjustment, SamplingQuality, TextStyle};
use super::transform::Affine;
use ab_glyph::PxScale;
use image::imageops::FilterType;
use image::{Rgba, RgbaImage};
use imageproc::geometric_transformations::{Interpolation, Projection, warp_into};

/// JPEG quality for all encoded output. Deliberately not configurable.
const JPEG_QUALITY: u8 = 90;

/// Pure Rust backend using the `image`/`imageproc` ecosystem.
///
/// See the [module docs](self) for the crate-to-primitive mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn filter_for(quality: SamplingQuality) -> FilterType {
    match quality {
        SamplingQuality::Fast => FilterType::Triangle,
        SamplingQuality::High => FilterType::Lanczos3,
    }
}

/// Porter-Duff "over": composite one already-adjusted foreground pixel onto
/// the destination.
fn composite_over(background: Rgba<u8>, foreground: [f32; 4]) -> Rgba<u8> {
    let fg_alpha = foreground[3];
    let bg_alpha = background[3] as f32 / 255.0;
    let out_alpha = fg_alpha + bg_alpha * (1.0 - fg_alpha);

    if out_alpha < 0.001 {
        return Rgba([0, 0, 0, 0]);
    }

    let blend = |fg: f32, bg: u8| -> u8 {
        let bg = bg as f32 / 255.0;
        let out = (fg * fg_alpha + bg * bg_alpha * (1.0 - fg_alpha)) / out_alpha;
        (out * 255.0).clamp(0.0, 255.0) as u8
    };

    Rgba([
        blend(foreground[0], background[0]),
        blend(foreground[1], background[1]),
        blend(foreground[2], background[2]),
        (out_alpha * 255.0).clamp(0.0, 255.0) as u8,
    ])
}

impl RasterBackend for RustBackend {
    fn decode(&self, bytes: &[u8]) -> Result<Raster, BackendError> {
        let decoded =
            image::load_from_memory(bytes).map_err(|e| BackendError::Decode(e.to_string()))?;
        Ok(Raster::from_pixels(decoded.to_rgba8()))
    }

    fn blank(&self, width: u32, height: u32) -> Raster {
        Raster::from_pixels(RgbaImage::new(width, height))
    }

    fn blit(
        &self,
        src: &Raster,
        dest: &mut Raster,
        params: &BlitParams,
    ) -> Result<(), BackendError> {
        let Some(region) = params.src_region.clamped_to(src.width(), src.height()) else {
            return Ok(());
        };

        let sub = image::imageops::crop_imm(
            src.pixels(),
            region.x,
            region.y,
            region.width,
            region.height,
        )
        .to_image();

        let (dest_w, dest_h) = params.dest_size;
        if dest_w == 0 || dest_h == 0 {
            return Ok(());
        }

        let (x, y) = params.dest_origin;
        if (region.width, region.height) == (dest_w, dest_h) {
            image::imageops::overlay(dest.pixels_mut(), &sub, x as i64, y as i64);
        } else {
            let scaled =
                image::imageops::resize(&sub, dest_w, dest_h, filter_for(params.quality));
            image::imageops::overlay(dest.pixels_mut(), &scaled, x as i64, y as i64);
        }
        Ok(())
    }

    fn warp(&self, src: &Raster, map: &Affine, dest: &mut Raster) -> Result<(), BackendError> {
        let [a, b, c, d, e, f] = map.coefficients();
        let projection = Projection::from_matrix([a, b, c, d, e, f, 0.0, 0.0, 1.0])
            .ok_or_else(|| {
                BackendError::ProcessingFailed("affine map is not invertible".to_string())
            })?;
        warp_into(
            src.pixels(),
            &projection,
            Interpolation::Bicubic,
            Rgba([0, 0, 0, 0]),
            dest.pixels_mut(),
        );
        Ok(())
    }

    fn blit_adjusted(
        &self,
        src: &Raster,
        dest: &mut Raster,
        origin: (i32, i32),
        adjustment: &ColorAdjustment,
    ) -> Result<(), BackendError> {
        let dest_w = dest.width() as i32;
        let dest_h = dest.height() as i32;
        let (ox, oy) = origin;

        // Visible intersection of the source with the destination.
        let x_start = ox.max(0);
        let y_start = oy.max(0);
        let x_end = (ox + src.width() as i32).min(dest_w);
        let y_end = (oy + src.height() as i32).min(dest_h);

        for ty in y_start..y_end {
            for tx in x_start..x_end {
                let sx = (tx - ox) as u32;
                let sy = (ty - oy) as u32;

                let sp = src.pixels().get_pixel(sx, sy);
                let adjusted = adjustment.apply([
                    sp[0] as f32 / 255.0,
                    sp[1] as f32 / 255.0,
                    sp[2] as f32 / 255.0,
                    sp[3] as f32 / 255.0,
                ]);

                let bg = *dest.pixels().get_pixel(tx as u32, ty as u32);
                dest.pixels_mut()
                    .put_pixel(tx as u32, ty as u32, composite_over(bg, adjusted));
            }
        }
        Ok(())
    }

    fn draw_text(
        &self,
        dest: &mut Raster,
        text: &str,
        style: &TextStyle,
        color: [u8; 4],
        origin: (i32, i32),
    ) -> Result<(), BackendError> {
        imageproc::drawing::draw_text_mut(
            dest.pixels_mut(),
            Rgba(color),
            origin.0,
            origin.1,
            PxScale::from(style.scale),
            &style.font,
            text,
        );
        Ok(())
    }

    fn encode(&self, image: &Raster) -> Result<Vec<u8>, BackendError> {
        let rgb = image::DynamicImage::ImageRgba8(image.pixels().clone()).to_rgb8();
        let mut buf = Vec::new();
        let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buf, JPEG_QUALITY);
        rgb.write_with_encoder(encoder)
            .map_err(|e| BackendError::Encode(e.to_string()))?;
        Ok(buf)
    }
}
