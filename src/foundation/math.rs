/// `c / (a / 255)` truncated and saturated to a byte. Callers handle `a == 0`.
pub(crate) fn unpremul_channel(c: u8, a: u8) -> u8 {
    debug_assert!(a != 0);
    let v = (u32::from(c) * 255) / u32::from(a);
    v.min(255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
