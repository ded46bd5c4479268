//! Bitmap Shader
//!
//! Nearest neighbor sampling of an image. Image space coordinates are
//! normalized by the image extent, tiled, then scaled back and floored to
//! a source pixel.

use crate::buffer::Bitmap;
use crate::color::Pixel;
use crate::shader::{context_inverse, sample_row, TileMode};
use crate::transform::Matrix;
use crate::Shader;

/// Shader drawing a bitmap placed by a local transform
#[derive(Debug, Clone)]
pub struct BitmapShader {
    bitmap: Bitmap,
    /// Maps image space to local space
    local: Matrix,
    tile: TileMode,
    opaque: bool,
    inv: Option<Matrix>,
}

impl BitmapShader {
    /// Create a new shader drawing `bitmap` placed by `local`
    pub fn new(bitmap: Bitmap, local: Matrix, tile: TileMode) -> Self {
        let opaque = !bitmap.pixels().is_empty() && bitmap.is_opaque();
        Self { bitmap, local, tile, opaque, inv: None }
    }
    /// Source pixel for a point in image space
    fn lookup(&self, x: f32, y: f32) -> Pixel {
        let w = self.bitmap.width();
        let h = self.bitmap.height();
        let u = self.tile.apply(x / w as f32) * w as f32;
        let v = self.tile.apply(y / h as f32) * h as f32;
        let ix = (u.floor() as usize).min(w - 1);
        let iy = (v.floor() as usize).min(h - 1);
        self.bitmap[(ix, iy)]
    }
}

impl Shader for BitmapShader {
    fn is_opaque(&self) -> bool {
        self.opaque
    }
    fn set_context(&mut self, ctm: &Matrix) -> bool {
        self.inv = context_inverse(ctm, &self.local);
        self.inv.is_some()
    }
    fn shade_row(&self, x: i32, y: i32, row: &mut [Pixel]) {
        match self.inv {
            Some(inv) if !self.bitmap.pixels().is_empty() => {
                sample_row(&inv, x, y, row, |p| self.lookup(p.x, p.y))
            }
            _ => row.iter_mut().for_each(|p| *p = Pixel::TRANSPARENT),
        }
    }
}

/// Shader drawing `bitmap` through `local`, tiled with `tile`
///
/// An empty bitmap has nothing to sample; None is returned.
///
///     use pixcanvas::{bitmap_shader, Bitmap, Matrix, Pixel, Shader, TileMode};
///
///     let mut bm = Bitmap::new(2, 1);
///     bm[(0, 0)] = Pixel(0xFFFF_0000);
///     bm[(1, 0)] = Pixel(0xFF00_00FF);
///     let mut s = bitmap_shader(&bm, Matrix::identity(), TileMode::Repeat).unwrap();
///     assert!(s.set_context(&Matrix::identity()));
///     let mut row = [Pixel::TRANSPARENT; 4];
///     s.shade_row(0, 0, &mut row);
///     assert_eq!(row, [bm[(0, 0)], bm[(1, 0)], bm[(0, 0)], bm[(1, 0)]]);
///
pub fn bitmap_shader(bitmap: &Bitmap, local: Matrix, tile: TileMode) -> Option<Box<dyn Shader>> {
    if bitmap.width() == 0 || bitmap.height() == 0 {
        return None;
    }
    Some(Box::new(BitmapShader::new(bitmap.clone(), local, tile)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker() -> Bitmap {
        // 2x2: opaque red, green / blue, white
        let px = vec![Pixel(0xFFFF_0000), Pixel(0xFF00_FF00), Pixel(0xFF00_00FF), Pixel(0xFFFF_FFFF)];
        Bitmap::from_pixels(2, 2, px).unwrap()
    }

    fn row(tile: TileMode, local: Matrix, y: i32) -> Vec<Pixel> {
        let mut s = BitmapShader::new(checker(), local, tile);
        assert!(s.set_context(&Matrix::identity()));
        let mut out = vec![Pixel::TRANSPARENT; 6];
        s.shade_row(-2, y, &mut out);
        out
    }

    #[test]
    fn tiles() {
        let (r, g) = (Pixel(0xFFFF_0000), Pixel(0xFF00_FF00));
        // x = -2 .. 4
        assert_eq!(row(TileMode::Clamp, Matrix::identity(), 0), vec![r, r, r, g, g, g]);
        assert_eq!(row(TileMode::Repeat, Matrix::identity(), 0), vec![r, g, r, g, r, g]);
        assert_eq!(row(TileMode::Mirror, Matrix::identity(), 0), vec![g, r, r, g, g, r]);
    }

    #[test]
    fn scaled_placement() {
        let (b, w) = (Pixel(0xFF00_00FF), Pixel(0xFFFF_FFFF));
        let out = row(TileMode::Clamp, Matrix::scale(2.0, 2.0), 3);
        assert_eq!(out, vec![b, b, b, b, w, w]);
    }

    #[test]
    fn singular_context_fails() {
        let mut s = BitmapShader::new(checker(), Matrix::scale(0.0, 1.0), TileMode::Clamp);
        assert!(!s.set_context(&Matrix::identity()));
        assert!(s.is_opaque());
    }

    #[test]
    fn empty_bitmap_has_no_shader() {
        assert!(bitmap_shader(&Bitmap::new(0, 3), Matrix::identity(), TileMode::Clamp).is_none());
    }
}
