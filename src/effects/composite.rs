use crate::foundation::core::{Rgba8, pack_rgba8, unpack_rgba8};

/// Source-over of two straight-alpha pixels: `overlay` on top of `base`.
///
/// Computed exactly in integers on the 0..=255 alpha scale. Colors are the coverage-weighted mean
/// truncated; the resulting alpha is rounded. When both inputs are fully transparent the result is
/// transparent black.
pub fn over(base: Rgba8, overlay: Rgba8) -> Rgba8 {
    let a_over = u32::from(overlay[3]);
    let base_weight = u32::from(base[3]) * (255 - a_over);
    let over_weight = a_over * 255;

    // 255^2 * aTotal
    let den = over_weight + base_weight;
    if den == 0 {
        return [0, 0, 0, 0];
    }

    let mut out = [0u8; 4];
    for i in 0..3 {
        let num = u32::from(overlay[i]) * over_weight + u32::from(base[i]) * base_weight;
        out[i] = (num / den) as u8;
    }
    out[3] = ((den + 127) / 255) as u8;
    out
}

/// [`over`] on packed pixels.
pub fn over_packed(base: u32, overlay: u32) -> u32 {
    pack_rgba8(over(unpack_rgba8(base), unpack_rgba8(overlay)))
}

#[cfg(test)]
#[path = "../../tests/unit/effects/composite.rs"]
mod tests;
