//! Colors
//!
//! Two representations live side by side: [Color] is what a paint carries
//! (floating point, unpremultiplied) and [Pixel] is what a [Bitmap] stores
//! (8-bit, premultiplied, packed ARGB).
//!
//! [Bitmap]: ../buffer/struct.Bitmap.html

use crate::math::unit_to_u8;

use std::ops::{Add, Mul, Sub};

/// Color as Red, Green, Blue, and Alpha in [0,1], not premultiplied
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Color {
    /// Red
    pub r: f32,
    /// Green
    pub g: f32,
    /// Blue
    pub b: f32,
    /// Alpha
    pub a: f32,
}

impl Color {
    /// Create a new color from red, green, blue and alpha
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Color { r, g, b, a }
    }
    /// Opaque color from red, green and blue
    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }
    /// Opaque black (0,0,0,1)
    pub fn black() -> Self {
        Self::rgb(0.0, 0.0, 0.0)
    }
    /// Opaque white (1,1,1,1)
    pub fn white() -> Self {
        Self::rgb(1.0, 1.0, 1.0)
    }
    /// Fully transparent (0,0,0,0)
    pub fn transparent() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }
    /// Clamp every component into [0,1]
    pub fn pin(&self) -> Self {
        let p = |v: f32| v.max(0.0).min(1.0);
        Self::new(p(self.r), p(self.g), p(self.b), p(self.a))
    }
    /// Premultiply and quantize to a [Pixel]
    ///
    /// Each color channel becomes `round(channel * alpha * 255)`.
    ///
    ///     use pixcanvas::{Color, Pixel};
    ///
    ///     let half_red = Color::new(1.0, 0.0, 0.0, 0.5);
    ///     assert_eq!(half_red.to_pixel(), Pixel::pack(128, 128, 0, 0));
    ///
    pub fn to_pixel(&self) -> Pixel {
        let c = self.pin();
        let a = unit_to_u8(c.a);
        let r = unit_to_u8(c.r * c.a);
        let g = unit_to_u8(c.g * c.a);
        let b = unit_to_u8(c.b * c.a);
        Pixel::pack(a, r, g, b)
    }
    /// Alpha quantized to 8 bits, as it will land in a pixel
    pub fn alpha8(&self) -> u32 {
        unit_to_u8(self.a)
    }
}

impl From<Color> for Pixel {
    fn from(c: Color) -> Pixel {
        c.to_pixel()
    }
}

impl Add for Color {
    type Output = Color;
    fn add(self, o: Color) -> Color {
        Color::new(self.r + o.r, self.g + o.g, self.b + o.b, self.a + o.a)
    }
}
impl Sub for Color {
    type Output = Color;
    fn sub(self, o: Color) -> Color {
        Color::new(self.r - o.r, self.g - o.g, self.b - o.b, self.a - o.a)
    }
}
impl Mul<f32> for Color {
    type Output = Color;
    fn mul(self, s: f32) -> Color {
        Color::new(self.r * s, self.g * s, self.b * s, self.a * s)
    }
}
impl Mul<Color> for f32 {
    type Output = Color;
    fn mul(self, c: Color) -> Color {
        c * self
    }
}

/// Premultiplied 8-bit ARGB packed into a u32
///
/// Channels are expected to be no larger than alpha.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Pixel(pub u32);

const A_SHIFT: u32 = 24;
const R_SHIFT: u32 = 16;
const G_SHIFT: u32 = 8;
const B_SHIFT: u32 = 0;

impl Pixel {
    /// Fully transparent pixel (0,0,0,0)
    pub const TRANSPARENT: Pixel = Pixel(0);

    /// Pack alpha, red, green and blue, each in [0,255]
    ///
    /// Values above 255 saturate.
    pub fn pack(a: u32, r: u32, g: u32, b: u32) -> Self {
        let c = |v: u32| v.min(255);
        Pixel((c(a) << A_SHIFT) | (c(r) << R_SHIFT) | (c(g) << G_SHIFT) | (c(b) << B_SHIFT))
    }
    /// Alpha
    pub fn a(self) -> u32 {
        (self.0 >> A_SHIFT) & 0xFF
    }
    /// Red
    pub fn r(self) -> u32 {
        (self.0 >> R_SHIFT) & 0xFF
    }
    /// Green
    pub fn g(self) -> u32 {
        (self.0 >> G_SHIFT) & 0xFF
    }
    /// Blue
    pub fn b(self) -> u32 {
        (self.0 >> B_SHIFT) & 0xFF
    }
    /// Build from straight (not premultiplied) 8-bit RGBA
    pub fn from_rgba8(rgba: [u8; 4]) -> Self {
        let a = u32::from(rgba[3]);
        let pre = |v: u8| crate::math::mul255(u32::from(v), a);
        Pixel::pack(a, pre(rgba[0]), pre(rgba[1]), pre(rgba[2]))
    }
    /// Convert to straight (not premultiplied) 8-bit RGBA
    pub fn to_rgba8(self) -> [u8; 4] {
        let a = self.a();
        if a == 0 {
            return [0, 0, 0, 0];
        }
        let un = |v: u32| ((v * 255 + a / 2) / a).min(255) as u8;
        [un(self.r()), un(self.g()), un(self.b()), a as u8]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_unpack() {
        let p = Pixel::pack(200, 10, 20, 30);
        assert_eq!((p.a(), p.r(), p.g(), p.b()), (200, 10, 20, 30));
        assert_eq!(Pixel::pack(300, 0, 0, 0).a(), 255);
    }

    #[test]
    fn premultiply() {
        assert_eq!(Color::white().to_pixel(), Pixel(0xFFFF_FFFF));
        assert_eq!(Color::transparent().to_pixel(), Pixel::TRANSPARENT);
        // 0.5 * 0.5 * 255 = 63.75
        let c = Color::new(0.5, 1.0, 0.0, 0.5);
        assert_eq!(c.to_pixel(), Pixel::pack(128, 64, 128, 0));
        // out of range components are pinned first
        let c = Color::new(1.5, -1.0, 0.0, 2.0);
        assert_eq!(c.to_pixel(), Pixel::pack(255, 255, 0, 0));
    }

    #[test]
    fn straight_rgba_round_trip_when_opaque() {
        let p = Pixel::from_rgba8([12, 34, 56, 255]);
        assert_eq!(p, Pixel::pack(255, 12, 34, 56));
        assert_eq!(p.to_rgba8(), [12, 34, 56, 255]);
        assert_eq!(Pixel::TRANSPARENT.to_rgba8(), [0, 0, 0, 0]);
    }
}
