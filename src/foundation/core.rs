use crate::foundation::error::{FxError, FxResult};

/// Unpacked straight or premultiplied RGBA8, `[r, g, b, a]`.
pub type Rgba8 = [u8; 4];

// Packed pixels keep `R, G, B, A` in memory order, so the shift of each channel inside the `u32`
// depends on the target endianness.
pub(crate) const R_SHIFT: u32 = if cfg!(target_endian = "little") { 0 } else { 24 };
pub(crate) const G_SHIFT: u32 = if cfg!(target_endian = "little") { 8 } else { 16 };
pub(crate) const B_SHIFT: u32 = if cfg!(target_endian = "little") { 16 } else { 8 };
pub(crate) const A_SHIFT: u32 = if cfg!(target_endian = "little") { 24 } else { 0 };

/// Pack `[r, g, b, a]` into the crate-wide native-endian pixel layout.
#[inline]
pub fn pack_rgba8(px: Rgba8) -> u32 {
    u32::from_ne_bytes(px)
}

/// Inverse of [`pack_rgba8`].
#[inline]
pub fn unpack_rgba8(px: u32) -> Rgba8 {
    px.to_ne_bytes()
}

#[inline]
pub(crate) fn alpha_of(px: u32) -> u32 {
    (px >> A_SHIFT) & 0xff
}

/// Half-open pixel rectangle `[x1, x2) x [y1, y2)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rect {
    /// Left edge (inclusive).
    pub x1: u32,
    /// Top edge (inclusive).
    pub y1: u32,
    /// Right edge (exclusive).
    pub x2: u32,
    /// Bottom edge (exclusive).
    pub y2: u32,
}

impl Rect {
    /// Create a rectangle with `x1 <= x2` and `y1 <= y2`.
    ///
    /// Zero-area rectangles are accepted; operations treat them as no-ops.
    pub fn new(x1: u32, y1: u32, x2: u32, y2: u32) -> FxResult<Self> {
        if x2 < x1 || y2 < y1 {
            return Err(FxError::validation(
                "rect requires x2 >= x1 and y2 >= y1",
            ));
        }
        Ok(Self { x1, y1, x2, y2 })
    }

    /// Rectangle covering a whole `width x height` buffer.
    pub fn full(width: u32, height: u32) -> Self {
        Self {
            x1: 0,
            y1: 0,
            x2: width,
            y2: height,
        }
    }

    pub fn width(self) -> u32 {
        self.x2.saturating_sub(self.x1)
    }

    pub fn height(self) -> u32 {
        self.y2.saturating_sub(self.y1)
    }

    /// `true` when the rectangle covers no pixel.
    pub fn is_empty(self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// `true` when the rectangle lies inside a `width x height` buffer.
    pub fn fits_within(self, width: u32, height: u32) -> bool {
        self.x1 <= self.x2 && self.y1 <= self.y2 && self.x2 <= width && self.y2 <= height
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
