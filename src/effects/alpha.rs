use crate::foundation::core::{pack_rgba8, unpack_rgba8};
use crate::foundation::math::unpremul_channel;
use crate::surface::buffer::PixelBuffer;

/// Convert premultiplied pixels to straight alpha in place.
///
/// Fully transparent pixels become transparent black; alpha is never changed.
pub fn demultiply(buffer: &mut PixelBuffer<'_>) {
    for px in buffer.pixels_mut() {
        *px = pack_rgba8(demultiply_px(unpack_rgba8(*px)));
    }
}

pub(crate) fn demultiply_px([r, g, b, a]: [u8; 4]) -> [u8; 4] {
    match a {
        0 => [0, 0, 0, 0],
        255 => [r, g, b, a],
        _ => [
            unpremul_channel(r, a),
            unpremul_channel(g, a),
            unpremul_channel(b, a),
            a,
        ],
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/alpha.rs"]
mod tests;
