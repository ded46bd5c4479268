//! Shaders
//!
//! A [Shader] produces the source pixels of a draw call. Before the first
//! row is requested, [set_context](../trait.Shader.html#tymethod.set_context)
//! receives the canvas transform; the shader combines it with its own local
//! transform and keeps the inverse so device pixels can be mapped back into
//! the shader's own space. Every pixel is sampled at its center.
//!
//! [Shader]: ../trait.Shader.html

use crate::color::Pixel;
use crate::paths::Point;
use crate::transform::Matrix;
use crate::Shader;

/// Policy for sample positions outside [0,1]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TileMode {
    /// Saturate to the nearest edge
    Clamp,
    /// Keep the fractional part
    Repeat,
    /// Fold back and forth
    Mirror,
}

impl Default for TileMode {
    fn default() -> TileMode {
        TileMode::Clamp
    }
}

impl TileMode {
    /// Bring `t` back into [0,1]
    pub fn apply(self, t: f32) -> f32 {
        match self {
            TileMode::Clamp => clamp(t),
            TileMode::Repeat => repeat(t),
            TileMode::Mirror => mirror(t),
        }
    }
}

/// Saturate to [0,1]
///
///     assert_eq!(pixcanvas::clamp(1.5), 1.0);
///     assert_eq!(pixcanvas::clamp(-2.0), 0.0);
///
pub fn clamp(t: f32) -> f32 {
    t.max(0.0).min(1.0)
}

/// Fractional part, always in [0,1)
///
///     assert_eq!(pixcanvas::repeat(1.5), 0.5);
///     assert_eq!(pixcanvas::repeat(-0.25), 0.75);
///
pub fn repeat(t: f32) -> f32 {
    t - t.floor()
}

/// Triangle wave: ascending on even integer parts, descending on odd ones
///
///     assert_eq!(pixcanvas::mirror(1.5), 0.5);
///     assert_eq!(pixcanvas::mirror(2.25), 0.25);
///
pub fn mirror(t: f32) -> f32 {
    let f = t.floor();
    let frac = t - f;
    if (f as i64).rem_euclid(2) == 0 {
        frac
    } else {
        1.0 - frac
    }
}

/// Inverse of `ctm * local`, the mapping from device to shader space
pub fn context_inverse(ctm: &Matrix, local: &Matrix) -> Option<Matrix> {
    ctm.concat(local).invert()
}

/// Fill `row` by sampling `f` at the pixel centers of `(x,y) .. (x+n,y)`
///
/// Pixel centers are mapped through `inv` once, then stepped by the image
/// of the unit x vector.
pub fn sample_row<F>(inv: &Matrix, x: i32, y: i32, row: &mut [Pixel], mut f: F)
    where F: FnMut(Point) -> Pixel
{
    let step = inv.e0();
    let mut p = inv.map_pixel_center(x, y);
    for px in row.iter_mut() {
        *px = f(p);
        p = p + step;
    }
}

impl<S: Shader + ?Sized> Shader for &mut S {
    fn is_opaque(&self) -> bool {
        (**self).is_opaque()
    }
    fn set_context(&mut self, ctm: &Matrix) -> bool {
        (**self).set_context(ctm)
    }
    fn shade_row(&self, x: i32, y: i32, row: &mut [Pixel]) {
        (**self).shade_row(x, y, row)
    }
}

impl<S: Shader + ?Sized> Shader for Box<S> {
    fn is_opaque(&self) -> bool {
        (**self).is_opaque()
    }
    fn set_context(&mut self, ctm: &Matrix) -> bool {
        (**self).set_context(ctm)
    }
    fn shade_row(&self, x: i32, y: i32, row: &mut [Pixel]) {
        (**self).shade_row(x, y, row)
    }
}
