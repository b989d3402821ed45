use crate::foundation::core::{Rgba8, pack_rgba8, unpack_rgba8};
use crate::foundation::error::{FxError, FxResult};
use crate::surface::buffer::{PixelBuffer, pixel_count};

/// A pixel surface owned by some external system (window, image, canvas).
///
/// Effects borrow the surface's pixels through [`Surface::buffer`] and report changes through
/// [`Surface::mark_dirty`].
pub trait Surface {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Packed pixels, row-major, `width * height` long.
    fn pixels(&self) -> &[u32];

    fn pixels_mut(&mut self) -> &mut [u32];

    /// Signal that pixel contents changed.
    fn mark_dirty(&mut self);

    /// Borrow the pixels as a validated [`PixelBuffer`].
    fn buffer(&mut self) -> FxResult<PixelBuffer<'_>> {
        let (w, h) = (self.width(), self.height());
        PixelBuffer::new(w, h, self.pixels_mut())
    }
}

/// In-memory surface backed by a `Vec<u32>` of packed pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageSurface {
    width: u32,
    height: u32,
    data: Vec<u32>,
    dirty_generation: u64,
}

impl ImageSurface {
    /// Transparent black surface.
    pub fn new(width: u32, height: u32) -> FxResult<Self> {
        Self::filled(width, height, [0, 0, 0, 0])
    }

    pub fn filled(width: u32, height: u32, px: Rgba8) -> FxResult<Self> {
        if width == 0 || height == 0 {
            return Err(FxError::validation("surface width and height must be > 0"));
        }
        let n = pixel_count(width, height)?;
        Ok(Self {
            width,
            height,
            data: vec![pack_rgba8(px); n],
            dirty_generation: 0,
        })
    }

    /// Take ownership of already packed pixels.
    pub fn from_pixels(width: u32, height: u32, data: Vec<u32>) -> FxResult<Self> {
        let mut data = data;
        PixelBuffer::new(width, height, &mut data)?;
        Ok(Self {
            width,
            height,
            data,
            dirty_generation: 0,
        })
    }

    pub fn from_rgba_image(img: &image::RgbaImage) -> FxResult<Self> {
        let (width, height) = img.dimensions();
        let data = img
            .as_raw()
            .chunks_exact(4)
            .map(|px| pack_rgba8([px[0], px[1], px[2], px[3]]))
            .collect();
        Self::from_pixels(width, height, data)
    }

    pub fn to_rgba_image(&self) -> FxResult<image::RgbaImage> {
        let mut raw = Vec::with_capacity(self.data.len() * 4);
        for &px in &self.data {
            raw.extend_from_slice(&unpack_rgba8(px));
        }
        image::RgbaImage::from_raw(self.width, self.height, raw)
            .ok_or_else(|| FxError::validation("surface byte length does not match dimensions"))
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize) * (self.width as usize) + (x as usize);
        Some(unpack_rgba8(self.data[i]))
    }

    /// Number of times the surface has been marked dirty.
    pub fn dirty_generation(&self) -> u64 {
        self.dirty_generation
    }

    pub fn into_pixels(self) -> Vec<u32> {
        self.data
    }
}

impl Surface for ImageSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn pixels(&self) -> &[u32] {
        &self.data
    }

    fn pixels_mut(&mut self) -> &mut [u32] {
        &mut self.data
    }

    fn mark_dirty(&mut self) {
        self.dirty_generation = self.dirty_generation.saturating_add(1);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/surface/image_surface.rs"]
mod tests;
