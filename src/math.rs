//! Fixed point helpers for 8-bit channels

/// Divide by 255 with rounding, using a multiply-add-shift
///
/// Exact (matches `round(x / 255)`) for every product of two 8-bit
/// values, which is the only range the blend code feeds it.
///
///     use pixcanvas::div255;
///
///     assert_eq!(div255(255 * 255), 255);
///     assert_eq!(div255(128 * 255), 128);
///     assert_eq!(div255(127), 0);
///     assert_eq!(div255(128), 1);
///
pub fn div255(x: u32) -> u32 {
    const K: u64 = (1 << 16) + (1 << 8) + 1;
    ((u64::from(x) * K + (1 << 23)) >> 24) as u32
}

/// Multiply two 8-bit values, result in 8 bits
pub fn mul255(a: u32, b: u32) -> u32 {
    div255(a * b)
}

/// Round to the nearest integer, halves go up
///
/// Used for every float to pixel-row and pixel-column conversion so the
/// convex and general fills agree on shared boundaries.
pub fn round_px(v: f32) -> i32 {
    (v + 0.5).floor() as i32
}

/// Convert a [0,1] value to an 8-bit channel
pub fn unit_to_u8(v: f32) -> u32 {
    (v.max(0.0).min(1.0) * 255.0).round() as u32
}
