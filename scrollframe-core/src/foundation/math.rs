pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

/// Premultiplied source-over for one RGBA8 pixel.
pub(crate) fn src_over_px(dst: &mut [u8], src: &[u8]) {
    let sa = u16::from(src[3]);
    if sa == 255 {
        dst.copy_from_slice(src);
        return;
    }
    if sa == 0 {
        return;
    }
    let inv = 255 - sa;
    for c in 0..4 {
        let d = mul_div255_u16(u16::from(dst[c]), inv);
        dst[c] = (u16::from(src[c]) + d).min(255) as u8;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
