//! Triangle Shaders
//!
//! Shaders parameterized by a triangle `p0, p1, p2`. The affine map
//!
//! ```text
//! (u,v) -> p0 + u (p1 - p0) + v (p2 - p0)
//! ```
//!
//! takes the unit basis triangle onto it; its inverse gives barycentric
//! style coordinates for any device pixel.

use crate::color::{Color, Pixel};
use crate::math::mul255;
use crate::paths::Point;
use crate::shader::context_inverse;
use crate::transform::Matrix;
use crate::Shader;

/// Matrix taking the unit basis triangle onto `pts`
pub fn triangle_matrix(pts: &[Point; 3]) -> Matrix {
    Matrix::from_basis(pts[1] - pts[0], pts[2] - pts[0], pts[0])
}

/// Interpolation of three vertex colors
#[derive(Debug, Clone)]
pub struct TriangleGradient {
    local: Matrix,
    c0: Color,
    dc1: Color,
    dc2: Color,
    opaque: bool,
    inv: Option<Matrix>,
}

impl TriangleGradient {
    pub fn new(pts: &[Point; 3], colors: &[Color; 3]) -> Self {
        Self {
            local: triangle_matrix(pts),
            c0: colors[0],
            dc1: colors[1] - colors[0],
            dc2: colors[2] - colors[0],
            opaque: colors.iter().all(|c| c.a >= 1.0),
            inv: None,
        }
    }
}

impl Shader for TriangleGradient {
    fn is_opaque(&self) -> bool {
        self.opaque
    }
    fn set_context(&mut self, ctm: &Matrix) -> bool {
        self.inv = context_inverse(ctm, &self.local);
        self.inv.is_some()
    }
    fn shade_row(&self, x: i32, y: i32, row: &mut [Pixel]) {
        let inv = match self.inv {
            Some(inv) => inv,
            None => return,
        };
        let p = inv.map_pixel_center(x, y);
        let step = inv.e0();
        let dc = self.dc1 * step.x + self.dc2 * step.y;
        let mut c = self.c0 + self.dc1 * p.x + self.dc2 * p.y;
        for px in row.iter_mut() {
            *px = c.to_pixel();
            c = c + dc;
        }
    }
}

/// Texture mapping of a triangle onto another shader
///
/// The texture coordinates `texs` of the triangle's vertices are in the
/// space of the wrapped shader. The wrapped shader is placed by
/// `P * T^-1`, where `P` and `T` take the unit basis triangle onto the
/// vertices and the texture coordinates.
#[derive(Debug, Clone)]
pub struct TriangleBitmap<S: Shader> {
    inner: S,
    /// None when the texture coordinates are collinear
    local: Option<Matrix>,
}

impl<S: Shader> TriangleBitmap<S> {
    pub fn new(inner: S, pts: &[Point; 3], texs: &[Point; 3]) -> Self {
        let local = triangle_matrix(texs)
            .invert()
            .map(|tinv| triangle_matrix(pts) * tinv);
        Self { inner, local }
    }
}

impl<S: Shader> Shader for TriangleBitmap<S> {
    fn is_opaque(&self) -> bool {
        self.inner.is_opaque()
    }
    fn set_context(&mut self, ctm: &Matrix) -> bool {
        match self.local {
            Some(local) => self.inner.set_context(&(*ctm * local)),
            None => false,
        }
    }
    fn shade_row(&self, x: i32, y: i32, row: &mut [Pixel]) {
        self.inner.shade_row(x, y, row)
    }
}

/// Vertex colors multiplied with a texture
#[derive(Debug, Clone)]
pub struct CompositeTriangle<S: Shader> {
    gradient: TriangleGradient,
    bitmap: TriangleBitmap<S>,
}

/// Pixels shaded per call into the stack buffer
const CHUNK: usize = 64;

impl<S: Shader> CompositeTriangle<S> {
    pub fn new(inner: S, pts: &[Point; 3], texs: &[Point; 3], colors: &[Color; 3]) -> Self {
        Self {
            gradient: TriangleGradient::new(pts, colors),
            bitmap: TriangleBitmap::new(inner, pts, texs),
        }
    }
}

impl<S: Shader> Shader for CompositeTriangle<S> {
    fn is_opaque(&self) -> bool {
        self.gradient.is_opaque() && self.bitmap.is_opaque()
    }
    fn set_context(&mut self, ctm: &Matrix) -> bool {
        self.bitmap.set_context(ctm) && self.gradient.set_context(ctm)
    }
    fn shade_row(&self, x: i32, y: i32, row: &mut [Pixel]) {
        let mut tex = [Pixel::TRANSPARENT; CHUNK];
        for (i, chunk) in row.chunks_mut(CHUNK).enumerate() {
            let x = x + (i * CHUNK) as i32;
            let tex = &mut tex[..chunk.len()];
            self.gradient.shade_row(x, y, chunk);
            self.bitmap.shade_row(x, y, tex);
            for (c, &t) in chunk.iter_mut().zip(tex.iter()) {
                *c = Pixel::pack(mul255(c.a(), t.a()), mul255(c.r(), t.r()),
                                 mul255(c.g(), t.g()), mul255(c.b(), t.b()));
            }
        }
    }
}

/// Shader interpolating `colors` across the triangle `pts`
pub fn triangle_gradient(pts: &[Point; 3], colors: &[Color; 3]) -> Box<dyn Shader> {
    Box::new(TriangleGradient::new(pts, colors))
}

/// Shader mapping `inner` onto the triangle `pts` through texture coordinates `texs`
pub fn triangle_bitmap<S: Shader + 'static>(inner: S, pts: &[Point; 3], texs: &[Point; 3]) -> Box<dyn Shader> {
    Box::new(TriangleBitmap::new(inner, pts, texs))
}

/// Shader multiplying a triangle gradient with a texture mapped triangle
pub fn composite_triangle<S: Shader + 'static>(inner: S, pts: &[Point; 3], texs: &[Point; 3],
                                               colors: &[Color; 3]) -> Box<dyn Shader> {
    Box::new(CompositeTriangle::new(inner, pts, texs, colors))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Bitmap;
    use crate::bitmap_shader::BitmapShader;
    use crate::shader::TileMode;

    fn tri() -> [Point; 3] {
        [Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(0.0, 10.0)]
    }

    #[test]
    fn gradient_hits_vertex_colors() {
        let red = Color::rgb(1.0, 0.0, 0.0);
        let colors = [red, red, Color::rgb(0.0, 0.0, 1.0)];
        let mut g = TriangleGradient::new(&tri(), &colors);
        assert!(g.is_opaque());
        assert!(g.set_context(&Matrix::identity()));
        let mut row = [Pixel::TRANSPARENT; 10];
        g.shade_row(0, 0, &mut row);
        // v = 0.05 on the first row, constant along x
        let expect = (red * 0.95 + Color::rgb(0.0, 0.0, 1.0) * 0.05).to_pixel();
        for p in row.iter() {
            assert_eq!(p.r(), expect.r());
            assert!((p.b() as i32 - expect.b() as i32).abs() <= 1);
        }
    }

    #[test]
    fn translucent_vertex_is_not_opaque() {
        let c = [Color::white(), Color::white(), Color::new(1.0, 1.0, 1.0, 0.5)];
        assert!(!TriangleGradient::new(&tri(), &c).is_opaque());
    }

    #[test]
    fn texture_mapping() {
        let mut bm = Bitmap::new(2, 1);
        bm[(0, 0)] = Pixel(0xFFFF_0000);
        bm[(1, 0)] = Pixel(0xFF00_FF00);
        let inner = BitmapShader::new(bm, Matrix::identity(), TileMode::Clamp);
        // triangle twice as wide as the texture coordinates
        let texs = [Point::new(0.0, 0.0), Point::new(2.0, 0.0), Point::new(0.0, 1.0)];
        let pts = [Point::new(0.0, 0.0), Point::new(4.0, 0.0), Point::new(0.0, 2.0)];
        let mut s = TriangleBitmap::new(inner, &pts, &texs);
        assert!(s.set_context(&Matrix::identity()));
        let mut row = [Pixel::TRANSPARENT; 4];
        s.shade_row(0, 0, &mut row);
        assert_eq!(row, [Pixel(0xFFFF_0000), Pixel(0xFFFF_0000), Pixel(0xFF00_FF00), Pixel(0xFF00_FF00)]);
    }

    #[test]
    fn collinear_texture_fails_context() {
        let inner = BitmapShader::new(Bitmap::new(1, 1), Matrix::identity(), TileMode::Clamp);
        let texs = [Point::new(0.0, 0.0), Point::new(1.0, 1.0), Point::new(2.0, 2.0)];
        let mut s = TriangleBitmap::new(inner, &tri(), &texs);
        assert!(!s.set_context(&Matrix::identity()));
    }

    #[test]
    fn composite_multiplies() {
        let mut bm = Bitmap::new(1, 1);
        bm.fill(Pixel::pack(255, 255, 128, 0));
        let inner = BitmapShader::new(bm, Matrix::identity(), TileMode::Repeat);
        let grey = Color::rgb(0.5, 0.5, 0.5);
        let texs = [Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(0.0, 1.0)];
        let mut s = CompositeTriangle::new(inner, &tri(), &texs, &[grey; 3]);
        assert!(s.is_opaque());
        assert!(s.set_context(&Matrix::identity()));
        // longer than one chunk
        let mut row = vec![Pixel::TRANSPARENT; 150];
        s.shade_row(0, 3, &mut row);
        let g = grey.to_pixel();
        let expect = Pixel::pack(255, mul255(255, g.r()), mul255(128, g.g()), 0);
        assert!(row.iter().all(|&p| p == expect));
    }
}
