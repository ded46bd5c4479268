//! Rasterizers
//!
//! Turn a sorted list of [Edge]s into [Scanline]s. Every pixel whose center
//! lies inside the shape is covered; there is no partial coverage.
//!
//! [Edge]: ../edge/struct.Edge.html
//! [Scanline]: ../scan/struct.Scanline.html

use crate::edge::Edge;
use crate::math::round_px;
use crate::scan::Scanline;
use crate::Rasterize;

use log::trace;

/// Span between two edges on `row`, half open
fn span_between(e1: &Edge, e2: &Edge, row: i32) -> (i32, i32) {
    let x1 = e1.x_at_row(row);
    let x2 = e2.x_at_row(row);
    (round_px(x1.min(x2)), round_px(x1.max(x2)))
}

/// Rasterizer for convex polygons
///
/// Exactly two edges bound every row. Edges are consumed in sorted order;
/// when one of the current pair ends, the next edge in the queue takes its
/// place.
///
///     use pixcanvas::{ConvexRasterizer, EdgeBuilder, Matrix, Point, Rasterize, Scanline};
///
///     let mut b = EdgeBuilder::new(10, 10, Matrix::identity());
///     b.add_polygon(&[Point::new(1.0, 1.0), Point::new(4.0, 1.0),
///                     Point::new(4.0, 3.0), Point::new(1.0, 3.0)]);
///     let mut ras = ConvexRasterizer::new(b.finish());
///     let mut sl = Scanline::new();
///     let mut rows = vec![];
///     while ras.sweep_scanline(&mut sl) {
///         rows.push((sl.y, sl.spans[0].x, sl.spans[0].len));
///     }
///     assert_eq!(rows, vec![(1, 1, 3), (2, 1, 3)]);
///
#[derive(Debug)]
pub struct ConvexRasterizer {
    edges: Vec<Edge>,
    /// Index of the next edge to take from the queue
    next: usize,
    left: usize,
    right: usize,
    y: i32,
}

impl ConvexRasterizer {
    /// Create a rasterizer over sorted edges
    pub fn new(edges: Vec<Edge>) -> Self {
        let y = edges.first().map(|e| e.top).unwrap_or(0);
        trace!("convex: {} edges from row {}", edges.len(), y);
        Self { edges, next: 2, left: 0, right: 1, y }
    }
    /// Replace `cur` with the next queued edge until it covers row `y`
    fn advance(edges: &[Edge], cur: &mut usize, next: &mut usize, y: i32) -> bool {
        while edges[*cur].bottom <= y {
            if *next >= edges.len() {
                return false;
            }
            *cur = *next;
            *next += 1;
        }
        true
    }
}

impl Rasterize for ConvexRasterizer {
    fn sweep_scanline(&mut self, sl: &mut Scanline) -> bool {
        if self.edges.len() < 2 {
            return false;
        }
        loop {
            let y = self.y;
            if !Self::advance(&self.edges, &mut self.left, &mut self.next, y)
                || !Self::advance(&self.edges, &mut self.right, &mut self.next, y)
            {
                return false;
            }
            self.y += 1;
            let (a, b) = (&self.edges[self.left], &self.edges[self.right]);
            if y < a.top || y < b.top {
                continue;
            }
            let (x1, x2) = span_between(a, b, y);
            sl.reset(y);
            sl.add_span(x1, x2);
            if sl.num_spans() != 0 {
                return true;
            }
        }
    }
}

/// Rasterizer for arbitrary polygons using the non-zero winding rule
///
/// An active edge list is kept in x order. On each row the winding of the
/// active edges is accumulated from left to right; a span opens when the
/// count leaves zero and closes when it returns to zero.
#[derive(Debug)]
pub struct WindingRasterizer {
    edges: Vec<Edge>,
    /// Index of the first edge not yet active
    next: usize,
    active: Vec<Edge>,
    y: i32,
}

impl WindingRasterizer {
    /// Create a rasterizer over sorted edges
    pub fn new(edges: Vec<Edge>) -> Self {
        let y = edges.first().map(|e| e.top).unwrap_or(0);
        trace!("winding: {} edges from row {}", edges.len(), y);
        Self { edges, next: 0, active: vec![], y }
    }
}

impl Rasterize for WindingRasterizer {
    fn sweep_scanline(&mut self, sl: &mut Scanline) -> bool {
        loop {
            if self.active.is_empty() {
                match self.edges.get(self.next) {
                    None => return false,
                    Some(e) => self.y = self.y.max(e.top),
                }
            }
            let y = self.y;
            while let Some(e) = self.edges.get(self.next) {
                if e.top > y {
                    break;
                }
                self.active.push(*e);
                self.next += 1;
            }
            // edges may have crossed since the previous row
            self.active.sort_by(|a, b| a.x_at_row(y).total_cmp(&b.x_at_row(y)));

            sl.reset(y);
            let mut winding = 0;
            let mut left = 0;
            for e in &self.active {
                let x = e.column(y);
                if winding == 0 {
                    left = x;
                }
                winding += e.w;
                if winding == 0 {
                    sl.add_span(left, x);
                }
            }

            self.y += 1;
            let next_row = self.y;
            self.active.retain(|e| e.bottom > next_row);
            if sl.num_spans() != 0 {
                return true;
            }
        }
    }
}
