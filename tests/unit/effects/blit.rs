use super::*;
use crate::assets::resample::{ImageResampler, ResampleFilter};
use crate::effects::composite::over;
use crate::surface::image_surface::ImageSurface;

const RED: [u8; 4] = [255, 0, 0, 255];
const CLEAR: [u8; 4] = [0, 0, 0, 0];

fn solid(w: u32, h: u32, px: [u8; 4]) -> image::RgbaImage {
    image::RgbaImage::from_pixel(w, h, image::Rgba(px))
}

fn params(x: i32, y: i32, width: u32, height: u32) -> BlitParams {
    BlitParams {
        x,
        y,
        width,
        height,
    }
}

struct FixedSize(u32, u32);

impl Resampler for FixedSize {
    fn resample(
        &self,
        _source: &image::RgbaImage,
        _width: u32,
        _height: u32,
    ) -> FxResult<ImageSurface> {
        ImageSurface::new(self.0, self.1)
    }
}

fn count(s: &ImageSurface, px: [u8; 4]) -> usize {
    (0..s.height())
        .flat_map(|y| (0..s.width()).map(move |x| (x, y)))
        .filter(|&(x, y)| s.pixel(x, y) == Some(px))
        .count()
}

#[test]
fn opaque_square_lands_at_offset() {
    let mut dest = ImageSurface::new(8, 8).unwrap();
    let src = solid(4, 4, RED);
    blit(
        &mut dest,
        &src,
        params(2, 2, 4, 4),
        &ImageResampler::default(),
        &BlitOpts::default(),
    )
    .unwrap();

    assert_eq!(count(&dest, RED), 16);
    assert_eq!(dest.pixel(2, 2), Some(RED));
    assert_eq!(dest.pixel(5, 5), Some(RED));
    assert_eq!(dest.pixel(1, 2), Some(CLEAR));
    assert_eq!(dest.pixel(6, 6), Some(CLEAR));
    assert_eq!(dest.dirty_generation(), 1);
}

#[test]
fn source_is_resampled_to_requested_size() {
    let mut dest = ImageSurface::new(4, 4).unwrap();
    let src = solid(8, 8, RED);
    let resampler = ImageResampler::new(ResampleFilter::Nearest);
    blit(
        &mut dest,
        &src,
        params(0, 0, 2, 2),
        &resampler,
        &BlitOpts::default(),
    )
    .unwrap();

    assert_eq!(count(&dest, RED), 4);
    assert_eq!(dest.pixel(1, 1), Some(RED));
    assert_eq!(dest.pixel(2, 0), Some(CLEAR));
}

#[test]
fn translucent_source_blends_over_destination() {
    let base = [0, 0, 255, 255];
    let overlay = [255, 0, 0, 128];
    let mut dest = ImageSurface::filled(2, 2, base).unwrap();
    blit(
        &mut dest,
        &solid(1, 1, overlay),
        params(1, 0, 1, 1),
        &ImageResampler::default(),
        &BlitOpts::default(),
    )
    .unwrap();

    assert_eq!(dest.pixel(1, 0), Some(over(base, overlay)));
    assert_eq!(dest.pixel(0, 0), Some(base));
}

#[test]
fn clip_drops_pixels_past_every_edge() {
    let mut dest = ImageSurface::new(4, 2).unwrap();
    blit(
        &mut dest,
        &solid(2, 3, RED),
        params(3, 0, 2, 3),
        &ImageResampler::default(),
        &BlitOpts::default(),
    )
    .unwrap();

    assert_eq!(count(&dest, RED), 2);
    assert_eq!(dest.pixel(3, 0), Some(RED));
    assert_eq!(dest.pixel(3, 1), Some(RED));
    assert_eq!(dest.pixel(0, 1), Some(CLEAR));
}

#[test]
fn clip_handles_negative_offsets() {
    let mut dest = ImageSurface::new(4, 4).unwrap();
    blit(
        &mut dest,
        &solid(3, 3, RED),
        params(-2, -1, 3, 3),
        &ImageResampler::default(),
        &BlitOpts::default(),
    )
    .unwrap();

    assert_eq!(count(&dest, RED), 2);
    assert_eq!(dest.pixel(0, 0), Some(RED));
    assert_eq!(dest.pixel(0, 1), Some(RED));
}

#[test]
fn linear_bounds_wrap_into_next_row() {
    let mut dest = ImageSurface::new(4, 2).unwrap();
    let opts = BlitOpts {
        bounds: BlitBounds::Linear,
    };
    blit(
        &mut dest,
        &solid(2, 1, RED),
        params(3, 0, 2, 1),
        &ImageResampler::default(),
        &opts,
    )
    .unwrap();

    assert_eq!(dest.pixel(3, 0), Some(RED));
    assert_eq!(dest.pixel(0, 1), Some(RED));
    assert_eq!(count(&dest, RED), 2);
}

#[test]
fn linear_bounds_skip_negative_and_past_end_indices() {
    let mut dest = ImageSurface::new(4, 2).unwrap();
    let opts = BlitOpts {
        bounds: BlitBounds::Linear,
    };
    blit(
        &mut dest,
        &solid(2, 1, RED),
        params(-1, 0, 2, 1),
        &ImageResampler::default(),
        &opts,
    )
    .unwrap();
    assert_eq!(count(&dest, RED), 1);
    assert_eq!(dest.pixel(0, 0), Some(RED));

    let mut dest = ImageSurface::new(4, 2).unwrap();
    blit(
        &mut dest,
        &solid(2, 1, RED),
        params(3, 1, 2, 1),
        &ImageResampler::default(),
        &opts,
    )
    .unwrap();
    assert_eq!(count(&dest, RED), 1);
    assert_eq!(dest.pixel(3, 1), Some(RED));
}

#[test]
fn zero_size_is_rejected_without_touching_dest() {
    let mut dest = ImageSurface::new(4, 4).unwrap();
    let err = blit(
        &mut dest,
        &solid(2, 2, RED),
        params(0, 0, 0, 2),
        &ImageResampler::default(),
        &BlitOpts::default(),
    )
    .unwrap_err();
    assert!(matches!(err, FxError::Validation(_)));
    assert_eq!(dest.dirty_generation(), 0);
}

#[test]
fn wrong_resampler_output_size_is_an_error() {
    let mut dest = ImageSurface::new(4, 4).unwrap();
    let err = blit(
        &mut dest,
        &solid(2, 2, RED),
        params(0, 0, 2, 2),
        &FixedSize(1, 1),
        &BlitOpts::default(),
    )
    .unwrap_err();
    assert!(matches!(err, FxError::Resample(_)));
    assert_eq!(count(&dest, CLEAR), 16);
    assert_eq!(dest.dirty_generation(), 0);
}

#[test]
fn fully_offscreen_blit_still_marks_dirty() {
    let mut dest = ImageSurface::new(4, 4).unwrap();
    blit(
        &mut dest,
        &solid(2, 2, RED),
        params(10, 10, 2, 2),
        &ImageResampler::default(),
        &BlitOpts::default(),
    )
    .unwrap();
    assert_eq!(count(&dest, CLEAR), 16);
    assert_eq!(dest.dirty_generation(), 1);
}

#[test]
fn opts_deserialize_with_defaults() {
    let opts: BlitOpts = serde_json::from_str(r#"{"bounds":"linear"}"#).unwrap();
    assert_eq!(opts.bounds, BlitBounds::Linear);

    let opts: BlitOpts = serde_json::from_str("{}").unwrap();
    assert_eq!(opts, BlitOpts::default());
}

#[test]
fn resampler_filter_shapes_the_blitted_pixels() {
    let mut src = image::RgbaImage::new(2, 1);
    src.put_pixel(0, 0, image::Rgba([0, 0, 0, 255]));
    src.put_pixel(1, 0, image::Rgba([255, 255, 255, 255]));
    let place = params(0, 0, 4, 1);

    let mut nearest = ImageSurface::new(4, 1).unwrap();
    let resampler = ImageResampler::new(ResampleFilter::Nearest);
    blit(&mut nearest, &src, place, &resampler, &BlitOpts::default()).unwrap();

    let mut triangle = ImageSurface::new(4, 1).unwrap();
    let resampler = ImageResampler::new(ResampleFilter::Triangle);
    blit(&mut triangle, &src, place, &resampler, &BlitOpts::default()).unwrap();

    for x in 0..4 {
        let [r, _, _, a] = nearest.pixel(x, 0).unwrap();
        assert!(r == 0 || r == 255, "nearest produced {r} at {x}");
        assert_eq!(a, 255);
    }
    assert_ne!(nearest.pixels(), triangle.pixels());
}
