//! Voronoi Shader
//!
//! Every pixel takes the color of the nearest site; there is no blending
//! between cells.

use crate::color::{Color, Pixel};
use crate::paths::Point;
use crate::shader::{context_inverse, sample_row};
use crate::transform::Matrix;
use crate::Shader;

/// Nearest site coloring
#[derive(Debug, Clone)]
pub struct VoronoiShader {
    sites: Vec<Point>,
    colors: Vec<Pixel>,
    opaque: bool,
    inv: Option<Matrix>,
}

impl VoronoiShader {
    /// Create a new shader; `sites` and `colors` have the same, non-zero length
    pub fn new(sites: &[Point], colors: &[Color]) -> Self {
        debug_assert!(!sites.is_empty() && sites.len() == colors.len());
        Self {
            sites: sites.to_vec(),
            colors: colors.iter().map(Color::to_pixel).collect(),
            opaque: colors.iter().all(|c| c.a >= 1.0),
            inv: None,
        }
    }
    /// Index of the site closest to `p`; the first one wins ties
    pub fn nearest(&self, p: Point) -> usize {
        let mut best = 0;
        let mut best_d = f32::INFINITY;
        for (i, s) in self.sites.iter().enumerate() {
            let d = *s - p;
            let d = d.x * d.x + d.y * d.y;
            if d < best_d {
                best = i;
                best_d = d;
            }
        }
        best
    }
}

impl Shader for VoronoiShader {
    fn is_opaque(&self) -> bool {
        self.opaque
    }
    fn set_context(&mut self, ctm: &Matrix) -> bool {
        self.inv = context_inverse(ctm, &Matrix::identity());
        self.inv.is_some()
    }
    fn shade_row(&self, x: i32, y: i32, row: &mut [Pixel]) {
        if let Some(inv) = self.inv {
            sample_row(&inv, x, y, row, |p| {
                self.colors.get(self.nearest(p)).copied().unwrap_or(Pixel::TRANSPARENT)
            });
        }
    }
}

/// Shader coloring the plane by the nearest of `sites`
///
/// Returns None if there are no sites or the lengths differ.
pub fn voronoi_shader(sites: &[Point], colors: &[Color]) -> Option<Box<dyn Shader>> {
    if sites.is_empty() || sites.len() != colors.len() {
        return None;
    }
    Some(Box::new(VoronoiShader::new(sites, colors)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearest_site_wins() {
        let sites = [Point::new(0.0, 0.0), Point::new(10.0, 0.0)];
        let colors = [Color::rgb(1.0, 0.0, 0.0), Color::rgb(0.0, 0.0, 1.0)];
        let mut s = VoronoiShader::new(&sites, &colors);
        assert!(s.is_opaque());
        assert!(s.set_context(&Matrix::identity()));
        let mut row = [Pixel::TRANSPARENT; 10];
        s.shade_row(0, 0, &mut row);
        let (r, b) = (colors[0].to_pixel(), colors[1].to_pixel());
        assert_eq!(row, [r, r, r, r, r, b, b, b, b, b]);
        // equidistant: first site
        assert_eq!(s.nearest(Point::new(5.0, 3.0)), 0);
    }

    #[test]
    fn follows_canvas_transform() {
        let sites = [Point::new(0.0, 0.0), Point::new(10.0, 0.0)];
        let colors = [Color::rgb(1.0, 0.0, 0.0), Color::rgb(0.0, 0.0, 1.0)];
        let mut s = VoronoiShader::new(&sites, &colors);
        assert!(s.set_context(&Matrix::scale(0.5, 0.5)));
        let mut row = [Pixel::TRANSPARENT; 2];
        s.shade_row(2, 0, &mut row);
        // device x = 2.5 and 3.5 are local 5, a tie, and 7
        assert_eq!(row, [colors[0].to_pixel(), colors[1].to_pixel()]);
        assert!(!s.set_context(&Matrix::scale(0.0, 1.0)));
    }

    #[test]
    fn mismatched_inputs() {
        assert!(voronoi_shader(&[], &[]).is_none());
        assert!(voronoi_shader(&[Point::new(0.0, 0.0)], &[]).is_none());
    }
}
