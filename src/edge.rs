//! Edges
//!
//! Directed, slope-intercept line records produced from transformed and
//! clipped geometry. An edge covers the half-open row range
//! `top .. bottom`; its x position on a row is sampled at the row center.

use crate::clip::Clip;
use crate::curves;
use crate::math::round_px;
use crate::paths::{Path, Point, Segment};
use crate::transform::Matrix;

use std::cmp::Ordering;

/// Edge of a polygon, valid for rows `top .. bottom`
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Edge {
    /// First row crossed
    pub top: i32,
    /// One past the last row crossed
    pub bottom: i32,
    /// Inverse slope, dx/dy
    pub m: f32,
    /// x at y = 0
    pub b: f32,
    /// Winding contribution, +1 or -1
    pub w: i32,
}

impl Edge {
    /// Build an edge between `p0` and `p1` with winding `w`
    ///
    /// Returns None when both points round to the same row; such an edge
    /// crosses no row center.
    pub fn new(p0: Point, p1: Point, w: i32) -> Option<Edge> {
        let top = round_px(p0.y.min(p1.y));
        let bottom = round_px(p0.y.max(p1.y));
        if top == bottom {
            return None;
        }
        let m = (p1.x - p0.x) / (p1.y - p0.y);
        let b = p0.x - m * p0.y;
        Some(Edge { top, bottom, m, b, w })
    }
    /// x at `y`
    pub fn eval_x(&self, y: f32) -> f32 {
        self.m * y + self.b
    }
    /// x at the center of `row`
    pub fn x_at_row(&self, row: i32) -> f32 {
        self.eval_x(row as f32 + 0.5)
    }
    /// Pixel column where the edge crosses `row`
    pub fn column(&self, row: i32) -> i32 {
        round_px(self.x_at_row(row))
    }
    /// True if `row` is within `top .. bottom`
    pub fn is_active(&self, row: i32) -> bool {
        row >= self.top && row < self.bottom
    }
}

/// Order edges by first row, then by x on that row
pub fn edge_order(e1: &Edge, e2: &Edge) -> Ordering {
    e1.top
        .cmp(&e2.top)
        .then_with(|| e1.x_at_row(e1.top).total_cmp(&e2.x_at_row(e2.top)))
}

/// Sort edges into the seed order of the scan
pub fn sort_edges(edges: &mut [Edge]) {
    edges.sort_by(edge_order);
}

/// Collects the edges of one draw call
///
/// Geometry is mapped through the transform, curves are flattened in device
/// space and every line is clipped to the device rectangle.
#[derive(Debug)]
pub struct EdgeBuilder {
    clip: Clip,
    ctm: Matrix,
    edges: Vec<Edge>,
}

impl EdgeBuilder {
    /// New builder for a `width` x `height` device under `ctm`
    pub fn new(width: usize, height: usize, ctm: Matrix) -> Self {
        EdgeBuilder { clip: Clip::new(width as f32, height as f32), ctm, edges: vec![] }
    }
    /// Add a line given in local coordinates
    pub fn add_line(&mut self, p0: Point, p1: Point) {
        let (p0, p1) = (self.ctm.map_point(p0), self.ctm.map_point(p1));
        self.clip.line(p0, p1, &mut self.edges);
    }
    /// Add a closed polygon, the last point connects back to the first
    pub fn add_polygon(&mut self, pts: &[Point]) {
        let n = pts.len();
        for i in 0..n {
            self.add_line(pts[i], pts[(i + 1) % n]);
        }
    }
    /// Add a quadratic Bezier given in local coordinates
    pub fn add_quad(&mut self, pts: &[Point; 3]) {
        let mut dev = [Point::default(); 3];
        self.ctm.map_points(&mut dev, pts);
        self.add_device_polyline(&curves::flatten_quad(&dev));
    }
    /// Add a cubic Bezier given in local coordinates
    pub fn add_cubic(&mut self, pts: &[Point; 4]) {
        let mut dev = [Point::default(); 4];
        self.ctm.map_points(&mut dev, pts);
        self.add_device_polyline(&curves::flatten_cubic(&dev));
    }
    fn add_device_polyline(&mut self, pts: &[Point]) {
        for w in pts.windows(2) {
            self.clip.line(w[0], w[1], &mut self.edges);
        }
    }
    /// Add every segment of `path`
    pub fn add_path(&mut self, path: &Path) {
        for seg in path.segments() {
            match seg {
                Segment::Line(p) => self.add_line(p[0], p[1]),
                Segment::Quad(p) => self.add_quad(&p),
                Segment::Cubic(p) => self.add_cubic(&p),
            }
        }
    }
    /// Sorted edges
    pub fn finish(mut self) -> Vec<Edge> {
        sort_edges(&mut self.edges);
        self.edges
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horizontal_is_dropped() {
        assert!(Edge::new(Point::new(0.0, 3.0), Point::new(10.0, 3.0), 1).is_none());
        assert!(Edge::new(Point::new(0.0, 3.1), Point::new(10.0, 3.4), 1).is_none());
    }

    #[test]
    fn slope_and_rows() {
        let e = Edge::new(Point::new(0.0, 0.0), Point::new(10.0, 10.0), 1).unwrap();
        assert_eq!((e.top, e.bottom), (0, 10));
        assert_eq!(e.x_at_row(4), 4.5);
        assert!(e.is_active(9));
        assert!(!e.is_active(10));
        let e = Edge::new(Point::new(10.0, 10.0), Point::new(0.0, 0.0), -1).unwrap();
        assert_eq!(e.eval_x(5.0), 5.0);
        assert_eq!(e.w, -1);
    }

    #[test]
    fn seed_order() {
        let a = Edge::new(Point::new(5.0, 2.0), Point::new(5.0, 8.0), 1).unwrap();
        let b = Edge::new(Point::new(1.0, 2.0), Point::new(1.0, 8.0), 1).unwrap();
        let c = Edge::new(Point::new(0.0, 0.0), Point::new(0.0, 8.0), 1).unwrap();
        let mut v = vec![a, b, c];
        sort_edges(&mut v);
        assert_eq!(v, vec![c, b, a]);
    }

    #[test]
    fn builder_closes_polygons() {
        let mut b = EdgeBuilder::new(20, 20, Matrix::identity());
        b.add_polygon(&[Point::new(2.0, 2.0), Point::new(12.0, 2.0), Point::new(12.0, 12.0), Point::new(2.0, 12.0)]);
        let edges = b.finish();
        assert_eq!(edges.len(), 2);
        assert_eq!(edges[0].w, -edges[1].w);
        assert_eq!(edges[0].column(5), 2);
        assert_eq!(edges[1].column(5), 12);
    }
}
