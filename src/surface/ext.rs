use crate::assets::resample::Resampler;
use crate::effects::alpha::demultiply;
use crate::effects::blit::{BlitOpts, BlitParams, blit};
use crate::effects::blur::{blur_edge_band, blur_full, clamp_sigma};
use crate::foundation::core::{Rect, pack_rgba8};
use crate::foundation::error::{FxError, FxResult};
use crate::surface::image_surface::Surface;

/// Effects applied to a whole [`Surface`].
///
/// Blurs clamp sigma to what the blurred region can hold, so any finite non-negative sigma
/// succeeds. Every call that changes pixels marks the surface dirty once.
pub trait SurfaceFx: Surface {
    fn blur_full(&mut self, sigma: f64) -> FxResult<()>;

    /// Edge-band blur over the whole surface.
    fn blur_partial(&mut self, sigma: f64, band_width: u32) -> FxResult<()>;

    /// Edge-band blur over `rect`. A zero-area rect or zero band leaves the surface untouched
    /// and clean.
    fn blur_partial_rect(&mut self, sigma: f64, band_width: u32, rect: Rect) -> FxResult<()>;

    /// Convert premultiplied pixels to straight alpha.
    fn demultiply_alpha(&mut self) -> FxResult<()>;

    fn draw_image<R: Resampler + ?Sized>(
        &mut self,
        source: &image::RgbaImage,
        params: BlitParams,
        resampler: &R,
        opts: &BlitOpts,
    ) -> FxResult<()>;

    /// Fill with transparent black.
    fn clear(&mut self);
}

impl<S: Surface + ?Sized> SurfaceFx for S {
    #[tracing::instrument(skip(self), fields(width = self.width(), height = self.height()))]
    fn blur_full(&mut self, sigma: f64) -> FxResult<()> {
        let sigma = clamp_sigma(sigma, self.width(), self.height());
        {
            let mut buf = self.buffer()?;
            blur_full(&mut buf, sigma)?;
        }
        self.mark_dirty();
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    fn blur_partial(&mut self, sigma: f64, band_width: u32) -> FxResult<()> {
        let rect = Rect::full(self.width(), self.height());
        self.blur_partial_rect(sigma, band_width, rect)
    }

    #[tracing::instrument(skip(self))]
    fn blur_partial_rect(&mut self, sigma: f64, band_width: u32, rect: Rect) -> FxResult<()> {
        if rect.x2 < rect.x1 || rect.y2 < rect.y1 {
            return Err(FxError::validation(
                "blur rect requires x2 >= x1 and y2 >= y1",
            ));
        }
        if rect.is_empty() || band_width == 0 {
            tracing::debug!("nothing to blur");
            return Ok(());
        }
        let sigma = clamp_sigma(sigma, rect.width(), rect.height());
        {
            let mut buf = self.buffer()?;
            blur_edge_band(&mut buf, rect, sigma, band_width)?;
        }
        self.mark_dirty();
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    fn demultiply_alpha(&mut self) -> FxResult<()> {
        {
            let mut buf = self.buffer()?;
            demultiply(&mut buf);
        }
        self.mark_dirty();
        Ok(())
    }

    #[tracing::instrument(skip(self, source, resampler))]
    fn draw_image<R: Resampler + ?Sized>(
        &mut self,
        source: &image::RgbaImage,
        params: BlitParams,
        resampler: &R,
        opts: &BlitOpts,
    ) -> FxResult<()> {
        blit(self, source, params, resampler, opts)
    }

    fn clear(&mut self) {
        self.pixels_mut().fill(pack_rgba8([0, 0, 0, 0]));
        self.mark_dirty();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/surface/ext.rs"]
mod tests;
