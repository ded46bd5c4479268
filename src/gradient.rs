//! Linear Gradients
//!
//! The gradient axis runs from `p0` (t = 0) to `p1` (t = 1). The local
//! transform of a gradient maps the unit x axis onto that segment:
//!
//! ```text
//! | dx -dy p0.x |
//! | dy  dx p0.y |
//! ```
//!
//! so the x coordinate of an inverse mapped pixel center is its position
//! along the axis. Colors are interpolated unpremultiplied and
//! premultiplied afterwards.

use crate::color::{Color, Pixel};
use crate::paths::Point;
use crate::shader::{context_inverse, sample_row, TileMode};
use crate::transform::Matrix;
use crate::Shader;

/// Matrix mapping (0,0) to `p0` and (1,0) to `p1`
fn axis_matrix(p0: Point, p1: Point) -> Matrix {
    let d = p1 - p0;
    Matrix::new(d.x, -d.y, p0.x, d.y, d.x, p0.y)
}

fn all_opaque(colors: &[Color]) -> bool {
    colors.iter().all(|c| c.a >= 1.0)
}

/// Blend between `c0` at t = 0 and `c1` at t = 1
///
/// Written so that both ends reproduce their color exactly.
fn mix(c0: Color, c1: Color, t: f32) -> Color {
    c0 * (1.0 - t) + c1 * t
}

/// Gradient with evenly spaced colors
#[derive(Debug, Clone)]
pub struct LinearGradient {
    colors: Vec<Color>,
    tile: TileMode,
    local: Matrix,
    inv: Option<Matrix>,
}

impl LinearGradient {
    /// Create a new gradient; without colors it shades transparent
    pub fn new(p0: Point, p1: Point, colors: &[Color], tile: TileMode) -> Self {
        Self { colors: colors.to_vec(), tile, local: axis_matrix(p0, p1), inv: None }
    }
    /// Color at axis position `t`, tiled
    pub fn color_at(&self, t: f32) -> Color {
        let t = self.tile.apply(t);
        let n = self.colors.len();
        match n {
            0 => Color::transparent(),
            1 => self.colors[0],
            2 => mix(self.colors[0], self.colors[1], t),
            _ => {
                let s = t * (n - 1) as f32;
                let i = (s.floor() as usize).min(n - 2);
                mix(self.colors[i], self.colors[i + 1], s - i as f32)
            }
        }
    }
}

impl Shader for LinearGradient {
    fn is_opaque(&self) -> bool {
        all_opaque(&self.colors)
    }
    fn set_context(&mut self, ctm: &Matrix) -> bool {
        self.inv = context_inverse(ctm, &self.local);
        self.inv.is_some()
    }
    fn shade_row(&self, x: i32, y: i32, row: &mut [Pixel]) {
        if let Some(inv) = self.inv {
            sample_row(&inv, x, y, row, |p| self.color_at(p.x).to_pixel());
        }
    }
}

/// Gradient with colors at explicit, ascending positions
///
/// Positions before the first stop take the first color, positions past
/// the last stop take the last color.
#[derive(Debug, Clone)]
pub struct PositionalGradient {
    colors: Vec<Color>,
    stops: Vec<f32>,
    local: Matrix,
    inv: Option<Matrix>,
}

impl PositionalGradient {
    /// Create a new gradient pairing each color with a stop
    ///
    /// Unpaired colors or stops are dropped; without any pair the gradient
    /// shades transparent.
    pub fn new(p0: Point, p1: Point, colors: &[Color], stops: &[f32]) -> Self {
        let n = colors.len().min(stops.len());
        Self {
            colors: colors[..n].to_vec(),
            stops: stops[..n].to_vec(),
            local: axis_matrix(p0, p1),
            inv: None,
        }
    }
    /// Color at axis position `t`
    pub fn color_at(&self, t: f32) -> Color {
        let (first, last) = match (self.colors.first(), self.colors.last()) {
            (Some(&f), Some(&l)) => (f, l),
            _ => return Color::transparent(),
        };
        let n = self.stops.len();
        if t <= self.stops[0] {
            return first;
        }
        if t >= self.stops[n - 1] {
            return last;
        }
        for i in 0..n - 1 {
            let (s0, s1) = (self.stops[i], self.stops[i + 1]);
            if t >= s0 && t < s1 {
                return mix(self.colors[i], self.colors[i + 1], (t - s0) / (s1 - s0));
            }
        }
        last
    }
}

impl Shader for PositionalGradient {
    fn is_opaque(&self) -> bool {
        all_opaque(&self.colors)
    }
    fn set_context(&mut self, ctm: &Matrix) -> bool {
        self.inv = context_inverse(ctm, &self.local);
        self.inv.is_some()
    }
    fn shade_row(&self, x: i32, y: i32, row: &mut [Pixel]) {
        if let Some(inv) = self.inv {
            sample_row(&inv, x, y, row, |p| self.color_at(p.x).to_pixel());
        }
    }
}

/// Gradient from `p0` to `p1` through evenly spaced `colors`
///
/// Returns None if there are no colors.
///
///     use pixcanvas::{linear_gradient, Color, Matrix, Pixel, Point, Shader, TileMode};
///
///     let colors = [Color::rgb(1.0, 0.0, 0.0), Color::rgb(0.0, 0.0, 1.0)];
///     let mut g = linear_gradient(Point::new(0.5, 0.0), Point::new(3.5, 0.0),
///                                 &colors, TileMode::Clamp).unwrap();
///     assert!(g.is_opaque());
///     assert!(g.set_context(&Matrix::identity()));
///     let mut row = [Pixel::TRANSPARENT; 4];
///     g.shade_row(0, 0, &mut row);
///     assert_eq!(row[0], colors[0].to_pixel());
///     assert_eq!(row[3], colors[1].to_pixel());
///
pub fn linear_gradient(p0: Point, p1: Point, colors: &[Color], tile: TileMode) -> Option<Box<dyn Shader>> {
    if colors.is_empty() {
        return None;
    }
    Some(Box::new(LinearGradient::new(p0, p1, colors, tile)))
}

/// Gradient from `p0` to `p1` with a color at each position in `stops`
///
/// Returns None if there are no colors or the lengths differ.
pub fn linear_pos_gradient(p0: Point, p1: Point, colors: &[Color], stops: &[f32]) -> Option<Box<dyn Shader>> {
    if colors.is_empty() || colors.len() != stops.len() {
        return None;
    }
    Some(Box::new(PositionalGradient::new(p0, p1, colors, stops)))
}
