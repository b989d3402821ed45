use crate::foundation::core::{Rgba8, pack_rgba8, unpack_rgba8};
use crate::foundation::error::{FxError, FxResult};

/// Borrowed row-major view over `width * height` packed pixels.
///
/// The view is exclusive for as long as it lives; effects take `&mut PixelBuffer` for the
/// duration of one call.
#[derive(Debug)]
pub struct PixelBuffer<'a> {
    width: u32,
    height: u32,
    pixels: &'a mut [u32],
}

impl<'a> PixelBuffer<'a> {
    /// Wrap `pixels` as a `width x height` buffer.
    ///
    /// Fails when either dimension is zero or `pixels.len() != width * height`.
    pub fn new(width: u32, height: u32, pixels: &'a mut [u32]) -> FxResult<Self> {
        if width == 0 || height == 0 {
            return Err(FxError::validation(
                "pixel buffer width and height must be > 0",
            ));
        }
        let expected = pixel_count(width, height)?;
        if pixels.len() != expected {
            return Err(FxError::validation(format!(
                "pixel buffer expects {expected} pixels for {width}x{height}, got {}",
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total pixel count (`width * height`).
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    /// Always `false`; zero-sized buffers are rejected at construction.
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Linear index of `(x, y)`, or `None` outside the buffer.
    pub fn index_of(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn get(&self, x: u32, y: u32) -> Option<Rgba8> {
        self.index_of(x, y).map(|i| unpack_rgba8(self.pixels[i]))
    }

    /// Write `px` at `(x, y)`. Returns `false` when the coordinate is outside the buffer.
    pub fn set(&mut self, x: u32, y: u32, px: Rgba8) -> bool {
        match self.index_of(x, y) {
            Some(i) => {
                self.pixels[i] = pack_rgba8(px);
                true
            }
            None => false,
        }
    }

    pub fn pixels(&self) -> &[u32] {
        &*self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [u32] {
        &mut *self.pixels
    }
}

pub(crate) fn pixel_count(width: u32, height: u32) -> FxResult<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .ok_or_else(|| FxError::validation("pixel buffer size overflow"))
}

#[cfg(test)]
#[path = "../../tests/unit/surface/buffer.rs"]
mod tests;
