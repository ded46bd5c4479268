//! Transformations

use crate::paths::Point;

use std::ops::Mul;

/// Affine transformation
///
/// ```text
/// | sx  shx tx |
/// | shy sy  ty |
/// ```
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Matrix {
    pub sx: f32,
    pub shx: f32,
    pub tx: f32,
    pub shy: f32,
    pub sy: f32,
    pub ty: f32,
}

impl Default for Matrix {
    fn default() -> Self {
        Self::identity()
    }
}

impl Matrix {
    /// Creates a new Matrix from its six entries, row by row
    pub fn new(sx: f32, shx: f32, tx: f32, shy: f32, sy: f32, ty: f32) -> Self {
        Self { sx, shx, tx, shy, sy, ty }
    }
    /// Identity transform
    pub fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0, 0.0, 1.0, 0.0)
    }
    /// Translation by (tx, ty)
    pub fn translate(tx: f32, ty: f32) -> Self {
        Self::new(1.0, 0.0, tx, 0.0, 1.0, ty)
    }
    /// Scaling by (sx, sy)
    pub fn scale(sx: f32, sy: f32) -> Self {
        Self::new(sx, 0.0, 0.0, 0.0, sy, 0.0)
    }
    /// Rotation
    ///
    /// angle is in radians
    pub fn rotate(angle: f32) -> Self {
        let (sa, ca) = angle.sin_cos();
        Self::new(ca, -sa, 0.0, sa, ca, 0.0)
    }
    /// Matrix whose columns are `e0`, `e1` and `origin`
    ///
    /// Maps (1,0) to `origin + e0` and (0,1) to `origin + e1`.
    pub fn from_basis(e0: Point, e1: Point, origin: Point) -> Self {
        Self::new(e0.x, e1.x, origin.x, e0.y, e1.y, origin.y)
    }
    /// Image of the x unit vector, without translation
    pub fn e0(&self) -> Point {
        Point::new(self.sx, self.shy)
    }
    /// Image of the y unit vector, without translation
    pub fn e1(&self) -> Point {
        Point::new(self.shx, self.sy)
    }
    fn determinant(&self) -> f32 {
        self.sx * self.sy - self.shx * self.shy
    }
    /// Inverse transform, None if the matrix is singular
    ///
    ///     use pixcanvas::Matrix;
    ///
    ///     assert!(Matrix::scale(0.0, 1.0).invert().is_none());
    ///     let m = Matrix::translate(3.0, 4.0).invert().unwrap();
    ///     assert_eq!(m, Matrix::translate(-3.0, -4.0));
    ///
    pub fn invert(&self) -> Option<Matrix> {
        let det = self.determinant();
        if det == 0.0 || !det.is_finite() {
            return None;
        }
        let d = 1.0 / det;
        Some(Matrix {
            sx: self.sy * d,
            shx: -self.shx * d,
            tx: (self.shx * self.ty - self.sy * self.tx) * d,
            shy: -self.shy * d,
            sy: self.sx * d,
            ty: (self.shy * self.tx - self.sx * self.ty) * d,
        })
    }
    /// Compose: the result applies `m` first, then `self`
    pub fn concat(&self, m: &Matrix) -> Self {
        Matrix {
            sx: self.sx * m.sx + self.shx * m.shy,
            shx: self.sx * m.shx + self.shx * m.sy,
            tx: self.sx * m.tx + self.shx * m.ty + self.tx,
            shy: self.shy * m.sx + self.sy * m.shy,
            sy: self.shy * m.shx + self.sy * m.sy,
            ty: self.shy * m.tx + self.sy * m.ty + self.ty,
        }
    }
    /// Perform the transform on a point
    pub fn map_point(&self, p: Point) -> Point {
        Point::new(p.x * self.sx + p.y * self.shx + self.tx,
                   p.x * self.shy + p.y * self.sy + self.ty)
    }
    /// Transform every point of `src` into `dst`
    pub fn map_points(&self, dst: &mut [Point], src: &[Point]) {
        for (d, &s) in dst.iter_mut().zip(src.iter()) {
            *d = self.map_point(s);
        }
    }
    /// Map the center of device pixel (x,y); the start of a shaded row
    pub fn map_pixel_center(&self, x: i32, y: i32) -> Point {
        self.map_point(Point::new(x as f32 + 0.5, y as f32 + 0.5))
    }
}

impl Mul<Matrix> for Matrix {
    type Output = Matrix;
    fn mul(self, rhs: Matrix) -> Self {
        self.concat(&rhs)
    }
}
