//! Three-pass separable box blur approximating a Gaussian.
//!
//! Each pass is a horizontal box step followed by a vertical one. Steps are sliding-window
//! averages with edge replication. Only the color channels are averaged; alpha passes through
//! every step unchanged.

use std::ops::Range;

use crate::foundation::core::{A_SHIFT, B_SHIFT, G_SHIFT, R_SHIFT, Rect, alpha_of};
use crate::foundation::error::{FxError, FxResult};
use crate::surface::buffer::PixelBuffer;

const PASSES: usize = 3;

/// Box widths whose successive application approximates a Gaussian of std-dev `sigma`.
///
/// Widths are odd; the first `m` passes use the lower width `wl`, the rest `wl + 2`.
pub fn box_widths_for_gauss(sigma: f64, passes: usize) -> Vec<usize> {
    let n = passes as f64;
    let w_ideal = (12.0 * sigma * sigma / n + 1.0).sqrt();
    let mut wl = w_ideal.floor() as usize;
    if wl.is_multiple_of(2) {
        wl = wl.saturating_sub(1);
    }
    let wl = wl.max(1);
    let wu = wl + 2;

    let wlf = wl as f64;
    let m_ideal =
        (12.0 * sigma * sigma - n * wlf * wlf - 4.0 * n * wlf - 3.0 * n) / (-4.0 * wlf - 4.0);
    let m = m_ideal.round();

    (0..passes)
        .map(|i| if (i as f64) < m { wl } else { wu })
        .collect()
}

/// Box widths and radii for one blur call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlurPlan {
    widths: [usize; PASSES],
}

impl BlurPlan {
    pub fn for_sigma(sigma: f64) -> Self {
        let mut widths = [1usize; PASSES];
        for (slot, w) in widths.iter_mut().zip(box_widths_for_gauss(sigma, PASSES)) {
            *slot = w;
        }
        Self { widths }
    }

    pub fn widths(&self) -> [usize; PASSES] {
        self.widths
    }

    /// Half-widths `(w - 1) / 2` of the three boxes.
    pub fn radii(&self) -> [usize; PASSES] {
        self.widths.map(|w| (w - 1) / 2)
    }

    pub fn max_radius(&self) -> usize {
        self.radii().into_iter().max().unwrap_or(0)
    }
}

/// Largest sigma a caller should request for a `width x height` region.
///
/// `min(width, height) / 2 - 1.5` with integer halving, floored at zero. Any sigma returned by this
/// function keeps every box radius inside the region. NaN is returned unchanged so the blur still
/// rejects it.
pub fn clamp_sigma(sigma: f64, width: u32, height: u32) -> f64 {
    if sigma.is_nan() {
        return sigma;
    }
    let half = f64::from(width.min(height) / 2);
    sigma.min(half - 1.5).max(0.0)
}

/// Blur the whole buffer in place.
pub fn blur_full(buffer: &mut PixelBuffer<'_>, sigma: f64) -> FxResult<()> {
    let region = Region::new(buffer, Rect::full(buffer.width(), buffer.height()));
    let plan = checked_plan(sigma, region.rect)?;

    let mut scratch = vec![0u32; buffer.len()];
    run_passes(buffer.pixels_mut(), &mut scratch, region, plan.radii(), None);
    Ok(())
}

/// Blur only the pixels of `rect` that lie within `band_width` pixels of one of its edges.
///
/// The rectangle is blurred as if it were an image of its own (edges replicate at the rectangle
/// boundary). Distance counts from 0 at the edge pixel, so a pixel is in the band when its
/// distance to some edge is `< band_width`. Every other pixel of `rect`, and all pixels outside
/// it, keep their value. A zero-area rectangle or a zero band is a no-op.
///
/// The whole rectangle is blurred once `2 * band_width >= min(width, height)`. On an odd shorter
/// side `band_width = min / 2` (integer halving) is not enough: the centre line stays unblurred,
/// e.g. a 5x9 rectangle needs a band of 3 to match [`blur_full`].
pub fn blur_edge_band(
    buffer: &mut PixelBuffer<'_>,
    rect: Rect,
    sigma: f64,
    band_width: u32,
) -> FxResult<()> {
    if rect.x2 < rect.x1 || rect.y2 < rect.y1 {
        return Err(FxError::validation(
            "blur rect requires x2 >= x1 and y2 >= y1",
        ));
    }
    if rect.is_empty() {
        tracing::debug!(?rect, "edge band blur on empty rect is a no-op");
        return Ok(());
    }
    if !rect.fits_within(buffer.width(), buffer.height()) {
        return Err(FxError::precondition(format!(
            "blur rect {rect:?} exceeds {}x{} buffer",
            buffer.width(),
            buffer.height()
        )));
    }

    let region = Region::new(buffer, rect);
    let plan = checked_plan(sigma, rect)?;
    if band_width == 0 {
        tracing::debug!("edge band blur with zero band is a no-op");
        return Ok(());
    }

    let band = band_width as usize;
    let shortest = rect.width().min(rect.height()) as usize;
    if band.saturating_mul(2) >= shortest {
        tracing::debug!(band, shortest, "band covers the whole rect");
        let mut scratch = vec![0u32; buffer.len()];
        run_passes(buffer.pixels_mut(), &mut scratch, region, plan.radii(), None);
        return Ok(());
    }

    let mut front = buffer.pixels().to_vec();
    let mut back = vec![0u32; buffer.len()];
    run_passes(&mut front, &mut back, region, plan.radii(), Some(band));
    write_back_band(buffer.pixels_mut(), &front, region, band);
    Ok(())
}

fn checked_plan(sigma: f64, rect: Rect) -> FxResult<BlurPlan> {
    if !sigma.is_finite() || sigma < 0.0 {
        return Err(FxError::precondition(format!(
            "blur sigma must be finite and >= 0, got {sigma}"
        )));
    }
    let plan = BlurPlan::for_sigma(sigma);
    let shortest = rect.width().min(rect.height()) as usize;
    let r = plan.max_radius();
    if 2 * r + 1 > shortest {
        return Err(FxError::precondition(format!(
            "blur radius {r} (sigma {sigma}) too large for a {}x{} region",
            rect.width(),
            rect.height()
        )));
    }
    tracing::debug!(widths = ?plan.widths(), sigma, "box blur plan");
    Ok(plan)
}

#[derive(Clone, Copy, Debug)]
struct Region {
    stride: usize,
    rect: Rect,
}

impl Region {
    fn new(buffer: &PixelBuffer<'_>, rect: Rect) -> Self {
        Self {
            stride: buffer.width() as usize,
            rect,
        }
    }

    fn origin(self) -> usize {
        (self.rect.y1 as usize) * self.stride + (self.rect.x1 as usize)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Axis {
    Horizontal,
    Vertical,
}

/// One row or column of the blurred region.
#[derive(Clone, Copy, Debug)]
struct Line {
    start: usize,
    stride: usize,
    len: usize,
}

impl Line {
    #[inline]
    fn at(self, i: usize) -> usize {
        self.start + i * self.stride
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct RgbSum {
    r: u32,
    g: u32,
    b: u32,
}

impl RgbSum {
    #[inline]
    fn add(&mut self, px: u32) {
        self.r += (px >> R_SHIFT) & 0xff;
        self.g += (px >> G_SHIFT) & 0xff;
        self.b += (px >> B_SHIFT) & 0xff;
    }

    #[inline]
    fn sub(&mut self, px: u32) {
        self.r -= (px >> R_SHIFT) & 0xff;
        self.g -= (px >> G_SHIFT) & 0xff;
        self.b -= (px >> B_SHIFT) & 0xff;
    }

    /// Averaged color with the alpha of `alpha_src`. Division truncates.
    #[inline]
    fn pack(self, div: u32, alpha_src: u32) -> u32 {
        ((self.r / div) << R_SHIFT)
            | ((self.g / div) << G_SHIFT)
            | ((self.b / div) << B_SHIFT)
            | (alpha_of(alpha_src) << A_SHIFT)
    }
}

/// Frame width each of the six steps must compute so that the last step is exact within `band`.
///
/// A step reading `r` pixels around its output needs its input exact `r` pixels deeper into the
/// rectangle, so frames grow by the radii of all later steps.
fn step_frames(radii: [usize; PASSES], band: Option<usize>) -> [Option<usize>; 2 * PASSES] {
    let mut frames = [None; 2 * PASSES];
    let Some(band) = band else {
        return frames;
    };
    let mut f = band;
    for step in (0..2 * PASSES).rev() {
        frames[step] = Some(f);
        f += radii[step / 2];
    }
    frames
}

fn run_passes(
    front: &mut [u32],
    back: &mut [u32],
    region: Region,
    radii: [usize; PASSES],
    band: Option<usize>,
) {
    let frames = step_frames(radii, band);
    for (pass, &r) in radii.iter().enumerate() {
        box_step(front, back, region, Axis::Horizontal, r, frames[2 * pass]);
        box_step(back, front, region, Axis::Vertical, r, frames[2 * pass + 1]);
    }
}

/// One box step along `axis`, reading `src` and writing `dst`.
///
/// `dst` starts as a copy of `src`, so pixels the step does not compute pass through. With a
/// frame, lines crossing the interior only compute their first and last `frame` pixels.
fn box_step(
    src: &[u32],
    dst: &mut [u32],
    region: Region,
    axis: Axis,
    radius: usize,
    frame: Option<usize>,
) {
    dst.copy_from_slice(src);

    let rect = region.rect;
    let (rw, rh) = (rect.width() as usize, rect.height() as usize);
    let (lines, len) = match axis {
        Axis::Horizontal => (rh, rw),
        Axis::Vertical => (rw, rh),
    };
    let origin = region.origin();

    for j in 0..lines {
        let line = match axis {
            Axis::Horizontal => Line {
                start: origin + j * region.stride,
                stride: 1,
                len,
            },
            Axis::Vertical => Line {
                start: origin + j,
                stride: region.stride,
                len,
            },
        };

        match frame {
            Some(f) if 2 * f < len && j >= f && j + f < lines => {
                box_blur_line(src, dst, line, radius, 0..f);
                box_blur_line(src, dst, line, radius, len - f..len);
            }
            _ => box_blur_line(src, dst, line, radius, 0..len),
        }
    }
}

/// Sliding-window average over `span` of one line. Requires `2 * radius + 1 <= line.len`.
///
/// The running sum is seeded with the window that ends just before `span.start`, using the
/// replicated first value for positions before the line. For `span.start == 0` this is
/// `(r + 1) * v[0] + v[0..r]`.
fn box_blur_line(src: &[u32], dst: &mut [u32], line: Line, radius: usize, span: Range<usize>) {
    if span.is_empty() {
        return;
    }
    let r = radius;
    let len = line.len;
    debug_assert!(2 * r < len);
    debug_assert!(span.end <= len);

    let div = (2 * r + 1) as u32;
    let first = src[line.at(0)];
    let last = src[line.at(len - 1)];

    let mut acc = RgbSum::default();
    let seed_start = span.start as isize - r as isize - 1;
    let seed_end = span.start as isize + r as isize;
    for k in seed_start..seed_end {
        let i = k.clamp(0, len as isize - 1) as usize;
        acc.add(src[line.at(i)]);
    }

    for p in span.start..(r + 1).min(span.end) {
        acc.add(src[line.at(p + r)]);
        acc.sub(first);
        let i = line.at(p);
        dst[i] = acc.pack(div, dst[i]);
    }

    for p in (r + 1).max(span.start)..(len - r).min(span.end) {
        acc.add(src[line.at(p + r)]);
        acc.sub(src[line.at(p - r - 1)]);
        let i = line.at(p);
        dst[i] = acc.pack(div, dst[i]);
    }

    for p in (len - r).max(span.start)..span.end {
        acc.add(last);
        acc.sub(src[line.at(p - r - 1)]);
        let i = line.at(p);
        dst[i] = acc.pack(div, dst[i]);
    }
}

/// Copy the band pixels of `region` from `src` into `dst`. Requires `2 * band` below both sides.
fn write_back_band(dst: &mut [u32], src: &[u32], region: Region, band: usize) {
    let rect = region.rect;
    let (rw, rh) = (rect.width() as usize, rect.height() as usize);
    let origin = region.origin();

    for y in 0..rh {
        let row = origin + y * region.stride;
        if y < band || y + band >= rh {
            dst[row..row + rw].copy_from_slice(&src[row..row + rw]);
        } else {
            dst[row..row + band].copy_from_slice(&src[row..row + band]);
            let right = row + rw - band;
            dst[right..row + rw].copy_from_slice(&src[right..row + rw]);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/blur.rs"]
mod tests;
