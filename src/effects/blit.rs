use serde::{Deserialize, Serialize};

use crate::assets::resample::Resampler;
use crate::effects::composite::over_packed;
use crate::foundation::error::{FxError, FxResult};
use crate::surface::image_surface::Surface;

/// How destination coordinates outside the surface are handled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlitBounds {
    /// Skip pixels outside `[0, width) x [0, height)`.
    #[default]
    Clip,
    /// Skip only pixels whose linear index falls outside the buffer. Columns past the right edge
    /// wrap into the next row.
    Linear,
}

/// Options for [`blit`].
///
/// Resampling quality belongs to the [`Resampler`], e.g. [`crate::ImageResampler::new`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlitOpts {
    pub bounds: BlitBounds,
}

/// Placement of the resampled image on the destination.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlitParams {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// Resample `source` to `params.width x params.height` and composite it over `dest` at
/// `(params.x, params.y)` with straight-alpha source-over.
///
/// Marks `dest` dirty once all pixels are written.
pub fn blit<S, R>(
    dest: &mut S,
    source: &image::RgbaImage,
    params: BlitParams,
    resampler: &R,
    opts: &BlitOpts,
) -> FxResult<()>
where
    S: Surface + ?Sized,
    R: Resampler + ?Sized,
{
    let BlitParams {
        x,
        y,
        width,
        height,
    } = params;
    if width == 0 || height == 0 {
        return Err(FxError::validation(format!(
            "blit size must be > 0, got {width}x{height}"
        )));
    }

    let resized = resampler.resample(source, width, height)?;
    if (resized.width(), resized.height()) != (width, height) {
        return Err(FxError::resample(format!(
            "resampler returned {}x{} for a {width}x{height} request",
            resized.width(),
            resized.height()
        )));
    }

    let src_px = resized.pixels();
    let mut skipped = 0usize;
    {
        let mut buf = dest.buffer()?;
        let dest_w = i64::from(buf.width());
        let dest_h = i64::from(buf.height());
        let dst_px = buf.pixels_mut();
        for sy in 0..height {
            for sx in 0..width {
                let dx = i64::from(x) + i64::from(sx);
                let dy = i64::from(y) + i64::from(sy);
                let Some(di) = dest_index(dx, dy, dest_w, dest_h, opts.bounds) else {
                    skipped += 1;
                    continue;
                };
                let si = (sy as usize) * (width as usize) + (sx as usize);
                dst_px[di] = over_packed(dst_px[di], src_px[si]);
            }
        }
    }

    if skipped > 0 {
        tracing::trace!(skipped, bounds = ?opts.bounds, "blit skipped out-of-bounds pixels");
    }
    dest.mark_dirty();
    Ok(())
}

fn dest_index(dx: i64, dy: i64, w: i64, h: i64, bounds: BlitBounds) -> Option<usize> {
    match bounds {
        BlitBounds::Clip => {
            if dx < 0 || dy < 0 || dx >= w || dy >= h {
                return None;
            }
            Some((dy * w + dx) as usize)
        }
        BlitBounds::Linear => {
            let i = dy * w + dx;
            if i < 0 || i >= w * h {
                return None;
            }
            Some(i as usize)
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/blit.rs"]
mod tests;
