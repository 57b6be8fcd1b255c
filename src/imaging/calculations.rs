//! Pure calculation functions for image geometry.
//!
//! All functions here are pure and testable without any I/O or pixel buffers.
//! They implement the placement and fit policies of the pipeline: aspect
//! classification, max-box fit, cover-fit, center cropping, and layer
//! placement.

use super::params::{FooterPosition, WaterMarkPosition};

/// Aspect classification of an image, derived on demand from its dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    Landscape,
    Portrait,
    Square,
}

impl std::fmt::Display for Disposition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Disposition::Landscape => "landscape",
            Disposition::Portrait => "portrait",
            Disposition::Square => "square",
        };
        f.write_str(name)
    }
}

/// Classify an image by comparing width and height.
///
/// Equal dimensions are `Square`; otherwise the longer axis wins.
pub fn disposition(width: u32, height: u32) -> Disposition {
    if width > height {
        Disposition::Landscape
    } else if height > width {
        Disposition::Portrait
    } else {
        Disposition::Square
    }
}

/// Fit a source image inside a max box, preserving aspect ratio.
///
/// Exactly one axis is pinned to its max; the other is derived from the
/// ratio of the pinned axis to the source's same axis, computed in f32 and
/// truncated. Portrait pins height; Landscape pins width.
///
/// Square sources take the Landscape (width-driven) branch. This asymmetry
/// is a deliberate policy of the original system and is pinned by tests;
/// do not "fix" it to a symmetric fit.
pub fn fit_within(
    source: (u32, u32),
    max: (u32, u32),
    disposition: Disposition,
) -> (u32, u32) {
    let (src_w, src_h) = source;
    let (max_w, max_h) = max;

    match disposition {
        Disposition::Portrait => {
            let height = max_h;
            let width = (max_h as f32 / src_h as f32 * src_w as f32) as u32;
            (width, height)
        }
        Disposition::Landscape | Disposition::Square => {
            let width = max_w;
            let height = (max_w as f32 / src_w as f32 * src_h as f32) as u32;
            (width, height)
        }
    }
}

/// Dimensions that fully cover a target box (resize before center crop).
///
/// Scales both axes uniformly by `max(target_w/src_w, target_h/src_h)`, so
/// the result matches the target exactly on the driving axis and meets or
/// exceeds it on the other.
pub fn cover_dimensions(source: (u32, u32), target: (u32, u32)) -> (u32, u32) {
    let (src_w, src_h) = source;
    let (target_w, target_h) = target;

    let rel_w = target_w as f32 / src_w as f32;
    let rel_h = target_h as f32 / src_h as f32;

    if rel_w > rel_h {
        let height = ((src_h as f32 * rel_w) as u32).max(target_h);
        (target_w, height)
    } else {
        let width = ((src_w as f32 * rel_h) as u32).max(target_w);
        (width, target_h)
    }
}

/// Top-left origin of a centered `target` crop inside `source`.
///
/// Uses integer halving on each axis, matching the original system's
/// `(w/2) - (tw/2)` arithmetic. Saturates at zero when the target exceeds
/// the source on an axis.
pub fn center_crop_origin(source: (u32, u32), target: (u32, u32)) -> (u32, u32) {
    let (src_w, src_h) = source;
    let (target_w, target_h) = target;
    (
        (src_w / 2).saturating_sub(target_w / 2),
        (src_h / 2).saturating_sub(target_h / 2),
    )
}

/// Horizontal placement of a footer band under a `base_width` image.
///
/// May be negative when the footer is wider than the base; the draw clips.
pub fn footer_x(base_width: u32, footer_width: u32, position: FooterPosition) -> i32 {
    let base = base_width as i32;
    let footer = footer_width as i32;
    match position {
        FooterPosition::Left => 0,
        FooterPosition::Center => (base / 2) - (footer / 2),
        FooterPosition::Right => base - footer,
    }
}

/// Margin between a right-top watermark and the image edges, in pixels.
const WATERMARK_MARGIN: i32 = 10;

/// Placement of a watermark layer on an image.
///
/// `Center` centers on both axes with integer halving; `RightTop` insets the
/// layer [`WATERMARK_MARGIN`] pixels from the top-right corner. Coordinates
/// may be negative when the mark is larger than the image; the draw clips.
pub fn watermark_origin(
    image: (u32, u32),
    mark: (u32, u32),
    position: WaterMarkPosition,
) -> (i32, i32) {
    let (img_w, img_h) = (image.0 as i32, image.1 as i32);
    let (mark_w, mark_h) = (mark.0 as i32, mark.1 as i32);
    match position {
        WaterMarkPosition::Center => ((img_w / 2) - (mark_w / 2), (img_h / 2) - (mark_h / 2)),
        WaterMarkPosition::RightTop => (img_w - mark_w - WATERMARK_MARGIN, WATERMARK_MARGIN),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // disposition tests
    // =========================================================================

    #[test]
    fn wider_is_landscape() {
        assert_eq!(disposition(800, 600), Disposition::Landscape);
        assert_eq!(disposition(2, 1), Disposition::Landscape);
    }

    #[test]
    fn taller_is_portrait() {
        assert_eq!(disposition(600, 800), Disposition::Portrait);
        assert_eq!(disposition(1, 2), Disposition::Portrait);
    }

    #[test]
    fn equal_is_square() {
        assert_eq!(disposition(500, 500), Disposition::Square);
        assert_eq!(disposition(1, 1), Disposition::Square);
    }

    // =========================================================================
    // fit_within tests
    // =========================================================================

    #[test]
    fn fit_landscape_pins_width() {
        // 2000x1500 into 1000x1000: width pinned, height = 1000/2000 * 1500
        let fitted = fit_within((2000, 1500), (1000, 1000), Disposition::Landscape);
        assert_eq!(fitted, (1000, 750));
    }

    #[test]
    fn fit_portrait_pins_height() {
        // 1500x2000 into 1000x1000: height pinned, width = 1000/2000 * 1500
        let fitted = fit_within((1500, 2000), (1000, 1000), Disposition::Portrait);
        assert_eq!(fitted, (750, 1000));
    }

    #[test]
    fn fit_square_uses_width_driven_branch() {
        // The max box is not square, so the two branches disagree: the
        // width-driven branch gives (300, 300), the height-driven (200, 200).
        let fitted = fit_within((500, 500), (300, 200), Disposition::Square);
        assert_eq!(fitted, (300, 300));
    }

    #[test]
    fn fit_preserves_aspect_within_one_pixel() {
        for &(w, h) in &[(1024u32, 683u32), (683, 1024), (1920, 1080), (997, 499)] {
            let d = disposition(w, h);
            let (fw, fh) = fit_within((w, h), (400, 400), d);
            let expected_ratio = w as f64 / h as f64;
            let got_ratio = fw as f64 / fh as f64;
            // Derived axis is truncated, so the ratio may be off by up to
            // one pixel on that axis.
            let tolerance = 1.0 / fh.min(fw) as f64 * expected_ratio.max(1.0 / expected_ratio);
            assert!(
                (expected_ratio - got_ratio).abs() <= tolerance + 1e-9,
                "{w}x{h} -> {fw}x{fh}: ratio {got_ratio} vs {expected_ratio}"
            );
        }
    }

    #[test]
    fn fit_truncates_derived_axis() {
        // 1000/999 * 333 = 333.333..., truncated to 333
        let fitted = fit_within((999, 333), (1000, 1000), Disposition::Landscape);
        assert_eq!(fitted, (1000, 333));
    }

    // =========================================================================
    // cover_dimensions tests
    // =========================================================================

    #[test]
    fn cover_wider_source_matches_height() {
        // 800x600 covering 400x500: height drives (500/600 > 400/800)
        let covered = cover_dimensions((800, 600), (400, 500));
        assert_eq!(covered.1, 500);
        assert!(covered.0 >= 400);
    }

    #[test]
    fn cover_taller_source_matches_width() {
        let covered = cover_dimensions((600, 800), (500, 400));
        assert_eq!(covered.0, 500);
        assert!(covered.1 >= 400);
    }

    #[test]
    fn cover_same_aspect_is_exact() {
        assert_eq!(cover_dimensions((800, 600), (400, 300)), (400, 300));
    }

    #[test]
    fn cover_never_undershoots_target() {
        for &(sw, sh) in &[(3u32, 7u32), (7, 3), (1000, 1001), (1, 1), (4096, 11)] {
            for &(tw, th) in &[(5u32, 5u32), (333, 77), (77, 333), (1, 999)] {
                let (w, h) = cover_dimensions((sw, sh), (tw, th));
                assert!(w >= tw && h >= th, "({sw},{sh}) -> ({w},{h}) vs ({tw},{th})");
                assert!(w == tw || h == th, "one axis must match the target");
            }
        }
    }

    // =========================================================================
    // center_crop_origin tests
    // =========================================================================

    #[test]
    fn crop_origin_centers_with_integer_halving() {
        assert_eq!(center_crop_origin((200, 100), (100, 100)), (50, 0));
        // Odd source, even target: 101/2 - 50/2 = 50 - 25 = 25
        assert_eq!(center_crop_origin((101, 101), (50, 50)), (25, 25));
    }

    #[test]
    fn crop_origin_saturates_when_target_exceeds_source() {
        assert_eq!(center_crop_origin((100, 100), (300, 300)), (0, 0));
    }

    // =========================================================================
    // footer_x tests
    // =========================================================================

    #[test]
    fn footer_left_is_zero() {
        assert_eq!(footer_x(100, 40, FooterPosition::Left), 0);
    }

    #[test]
    fn footer_center_halves_both_widths() {
        assert_eq!(footer_x(100, 40, FooterPosition::Center), 30);
        // Equal widths center at 0
        assert_eq!(footer_x(100, 100, FooterPosition::Center), 0);
        // Integer halving of odd widths: 101/2 - 41/2 = 50 - 20 = 30
        assert_eq!(footer_x(101, 41, FooterPosition::Center), 30);
    }

    #[test]
    fn footer_right_aligns_to_edge() {
        assert_eq!(footer_x(100, 40, FooterPosition::Right), 60);
    }

    #[test]
    fn footer_wider_than_base_goes_negative() {
        assert_eq!(footer_x(100, 120, FooterPosition::Right), -20);
        assert_eq!(footer_x(100, 120, FooterPosition::Center), -10);
    }

    // =========================================================================
    // watermark_origin tests
    // =========================================================================

    #[test]
    fn watermark_right_top_insets_ten_pixels() {
        assert_eq!(
            watermark_origin((200, 100), (50, 20), WaterMarkPosition::RightTop),
            (140, 10)
        );
    }

    #[test]
    fn watermark_center_centers_both_axes() {
        assert_eq!(
            watermark_origin((200, 100), (50, 20), WaterMarkPosition::Center),
            (75, 40)
        );
    }

    #[test]
    fn watermark_larger_than_image_goes_negative() {
        assert_eq!(
            watermark_origin((40, 40), (100, 20), WaterMarkPosition::RightTop),
            (-70, 10)
        );
    }
}
