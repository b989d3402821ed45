use image::imageops::FilterType;
use serde::{Deserialize, Serialize};

use crate::foundation::error::{FxError, FxResult};
use crate::surface::image_surface::ImageSurface;

/// Produces a buffer of exactly the requested size from a source image.
///
/// Input and output are straight-alpha RGBA8.
pub trait Resampler {
    fn resample(
        &self,
        source: &image::RgbaImage,
        width: u32,
        height: u32,
    ) -> FxResult<ImageSurface>;
}

/// Resampling kernel used by [`ImageResampler`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResampleFilter {
    Nearest,
    Triangle,
    CatmullRom,
    Gaussian,
    #[default]
    Lanczos3,
}

impl From<ResampleFilter> for FilterType {
    fn from(f: ResampleFilter) -> Self {
        match f {
            ResampleFilter::Nearest => FilterType::Nearest,
            ResampleFilter::Triangle => FilterType::Triangle,
            ResampleFilter::CatmullRom => FilterType::CatmullRom,
            ResampleFilter::Gaussian => FilterType::Gaussian,
            ResampleFilter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

/// [`Resampler`] backed by `image::imageops::resize`.
#[derive(Clone, Copy, Debug, Default)]
pub struct ImageResampler {
    pub filter: ResampleFilter,
}

impl ImageResampler {
    pub fn new(filter: ResampleFilter) -> Self {
        Self { filter }
    }
}

impl Resampler for ImageResampler {
    fn resample(
        &self,
        source: &image::RgbaImage,
        width: u32,
        height: u32,
    ) -> FxResult<ImageSurface> {
        if width == 0 || height == 0 {
            return Err(FxError::resample(format!(
                "cannot resample to {width}x{height}"
            )));
        }
        if source.width() == 0 || source.height() == 0 {
            return Err(FxError::resample("cannot resample an empty source image"));
        }
        // Same size needs no filtering.
        if source.dimensions() == (width, height) {
            return ImageSurface::from_rgba_image(source);
        }
        let resized = image::imageops::resize(source, width, height, self.filter.into());
        ImageSurface::from_rgba_image(&resized)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/resample.rs"]
mod tests;
