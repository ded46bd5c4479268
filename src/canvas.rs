//! Canvas
//!
//! Owns the destination [Bitmap] and the transform stack, and runs each
//! draw call through the pipeline:
//!
//! 1. geometry is mapped to device space and curves are flattened,
//! 2. lines are clipped into sorted [Edge]s,
//! 3. a rasterizer turns the edges into spans,
//! 4. the spans are shaded and blended into the bitmap.
//!
//! A draw call with degenerate input paints nothing.
//!
//! [Bitmap]: ../buffer/struct.Bitmap.html
//! [Edge]: ../edge/struct.Edge.html

use crate::blend::BlendMode;
use crate::buffer::Bitmap;
use crate::clip::Rect;
use crate::color::Color;
use crate::edge::{Edge, EdgeBuilder};
use crate::paint::{known_shader_alpha, Paint};
use crate::paths::{Path, Point};
use crate::raster::{ConvexRasterizer, WindingRasterizer};
use crate::render::{render_scanlines, SpanPainter, Source};
use crate::transform::Matrix;
use crate::triangle::{CompositeTriangle, TriangleBitmap, TriangleGradient};
use crate::Shader;

use log::{debug, trace, warn};

use std::ops::{Add, Mul};

/// Scan conversion used for a draw call
#[derive(Debug, Copy, Clone, PartialEq)]
enum Fill {
    /// Two edges bound every row
    Convex,
    /// Non-zero winding over any number of edges
    Winding,
}

/// Drawing surface
///
///     use pixcanvas::{Bitmap, Canvas, Color, Paint, Pixel, Rect};
///
///     let mut canvas = Canvas::new(Bitmap::new(8, 8));
///     let mut paint = Paint::new(Color::rgb(1.0, 0.0, 0.0));
///     canvas.draw_rect(&Rect::from_xywh(2.0, 2.0, 4.0, 3.0), &mut paint);
///     let bm = canvas.bitmap();
///     assert_eq!(bm[(2, 2)], Pixel::pack(255, 255, 0, 0));
///     assert_eq!(bm[(5, 4)], Pixel::pack(255, 255, 0, 0));
///     assert_eq!(bm[(6, 4)], Pixel::TRANSPARENT);
///     assert_eq!(bm[(2, 5)], Pixel::TRANSPARENT);
///
#[derive(Debug)]
pub struct Canvas {
    bitmap: Bitmap,
    /// Transform stack, never empty; the last entry is current
    stack: Vec<Matrix>,
}

impl Canvas {
    /// Create a new canvas drawing into `bitmap`
    pub fn new(bitmap: Bitmap) -> Self {
        Canvas { bitmap, stack: vec![Matrix::identity()] }
    }
    pub fn width(&self) -> usize {
        self.bitmap.width()
    }
    pub fn height(&self) -> usize {
        self.bitmap.height()
    }
    /// Destination bitmap
    pub fn bitmap(&self) -> &Bitmap {
        &self.bitmap
    }
    /// Give back the destination bitmap
    pub fn into_bitmap(self) -> Bitmap {
        self.bitmap
    }

    /// Current transform
    pub fn ctm(&self) -> Matrix {
        self.stack.last().copied().unwrap_or_default()
    }
    /// Push a copy of the current transform
    pub fn save(&mut self) {
        let m = self.ctm();
        self.stack.push(m);
    }
    /// Return to the transform at the matching save
    ///
    /// The base transform is never removed.
    pub fn restore(&mut self) {
        if self.stack.len() > 1 {
            self.stack.pop();
        } else {
            warn!("restore without a matching save, ignored");
        }
    }
    /// Apply `m` before the current transform
    pub fn concat(&mut self, m: &Matrix) {
        if let Some(top) = self.stack.last_mut() {
            *top = *top * *m;
        }
    }

    /// Set every pixel to `color`, ignoring the transform
    pub fn clear(&mut self, color: Color) {
        self.bitmap.fill(color.to_pixel());
    }
    /// Fill a rectangle
    pub fn draw_rect(&mut self, rect: &Rect, paint: &mut Paint) {
        let pts = [
            Point::new(rect.x1, rect.y1),
            Point::new(rect.x2, rect.y1),
            Point::new(rect.x2, rect.y2),
            Point::new(rect.x1, rect.y2),
        ];
        self.draw_convex_polygon(&pts, paint);
    }
    /// Fill a convex polygon; the last point connects back to the first
    pub fn draw_convex_polygon(&mut self, pts: &[Point], paint: &mut Paint) {
        let edges = self.polygon_edges(pts);
        self.fill_paint(edges, Fill::Convex, paint);
    }
    /// Fill a path with the non-zero winding rule
    pub fn draw_path(&mut self, path: &Path, paint: &mut Paint) {
        let device = path.transform(&self.ctm());
        let bounds = device.bounds();
        let area = Rect::from_xywh(0.0, 0.0, self.width() as f32, self.height() as f32);
        if !bounds.intersects(&area) {
            debug!("path bounds {:?} outside the device, draw skipped", bounds);
            return;
        }
        let mut b = EdgeBuilder::new(self.width(), self.height(), Matrix::identity());
        b.add_path(&device);
        self.fill_paint(b.finish(), Fill::Winding, paint);
    }

    /// Draw triangles given by consecutive index triples into `verts`
    ///
    /// Each triangle is shaded by its vertex `colors`, by the paint's shader
    /// mapped through the texture coordinates `texs`, or by both multiplied
    /// together. With neither, nothing is drawn.
    pub fn draw_mesh(&mut self, verts: &[Point], colors: Option<&[Color]>, texs: Option<&[Point]>,
                     indices: &[usize], paint: &mut Paint) {
        if colors.is_none() && texs.is_none() {
            debug!("mesh without colors or texture coordinates, draw skipped");
            return;
        }
        if indices.len() % 3 != 0 {
            warn!("mesh has {} trailing indices, ignored", indices.len() % 3);
        }
        for tri in indices.chunks_exact(3) {
            let idx = [tri[0], tri[1], tri[2]];
            // outer None: an index is out of range
            let cols = match colors {
                Some(c) => gather(c, &idx).map(Some),
                None => Some(None),
            };
            let txs = match texs {
                Some(t) => gather(t, &idx).map(Some),
                None => Some(None),
            };
            match (gather(verts, &idx), cols, txs) {
                (Some(p), Some(c), Some(t)) => self.draw_triangle(&p, c.as_ref(), t.as_ref(), paint),
                _ => warn!("mesh triangle {:?} out of range, skipped", idx),
            }
        }
    }

    /// Draw a bilinear patch with corners `verts`, in order
    ///
    /// The patch is split into `(level + 1)^2` cells, each drawn as two mesh
    /// triangles. Colors and texture coordinates are interpolated over the
    /// patch the same way as the corners.
    pub fn draw_quad(&mut self, verts: &[Point; 4], colors: Option<&[Color; 4]>, texs: Option<&[Point; 4]>,
                     level: usize, paint: &mut Paint) {
        if colors.is_none() && texs.is_none() {
            debug!("quad without colors or texture coordinates, draw skipped");
            return;
        }
        const INDICES: [usize; 6] = [0, 1, 3, 1, 2, 3];
        let n = level + 1;
        let stop = |i: usize| i as f32 / n as f32;
        for v in 0..n {
            let (v1, v2) = (stop(v), stop(v + 1));
            for u in 0..n {
                let (u1, u2) = (stop(u), stop(u + 1));
                let mv = quad_cell(verts, u1, u2, v1, v2);
                let mc = colors.map(|c| quad_cell(c, u1, u2, v1, v2));
                let mt = texs.map(|t| quad_cell(t, u1, u2, v1, v2));
                self.draw_mesh(&mv, mc.as_ref().map(|c| &c[..]), mt.as_ref().map(|t| &t[..]),
                               &INDICES, paint);
            }
        }
    }

    fn draw_triangle(&mut self, pts: &[Point; 3], colors: Option<&[Color; 3]>, texs: Option<&[Point; 3]>,
                     paint: &mut Paint) {
        let edges = self.polygon_edges(pts);
        let (color, mode) = (paint.color, paint.blend_mode);
        let texture = match (texs, paint.shader.as_mut()) {
            (Some(t), Some(s)) => Some((t, s)),
            (Some(_), None) => {
                warn!("texture coordinates without a paint shader, ignored");
                None
            }
            _ => None,
        };
        match (colors, texture) {
            (Some(c), Some((t, inner))) => {
                let mut s = CompositeTriangle::new(&mut **inner, pts, t, c);
                self.fill(edges, Fill::Convex, color, mode, Some(&mut s as &mut dyn Shader));
            }
            (None, Some((t, inner))) => {
                let mut s = TriangleBitmap::new(&mut **inner, pts, t);
                self.fill(edges, Fill::Convex, color, mode, Some(&mut s as &mut dyn Shader));
            }
            (Some(c), None) => {
                let mut s = TriangleGradient::new(pts, c);
                self.fill(edges, Fill::Convex, color, mode, Some(&mut s as &mut dyn Shader));
            }
            (None, None) => {}
        }
    }

    /// Clipped, sorted edges of a closed polygon under the current transform
    fn polygon_edges(&self, pts: &[Point]) -> Vec<Edge> {
        let mut b = EdgeBuilder::new(self.width(), self.height(), self.ctm());
        b.add_polygon(pts);
        b.finish()
    }

    fn fill_paint(&mut self, edges: Vec<Edge>, fill: Fill, paint: &mut Paint) {
        let shader = paint.shader.as_mut().map(|s| &mut **s as &mut dyn Shader);
        self.fill(edges, fill, paint.color, paint.blend_mode, shader);
    }

    fn fill(&mut self, edges: Vec<Edge>, fill: Fill, color: Color, mode: BlendMode,
            shader: Option<&mut dyn Shader>) {
        if edges.len() < 2 {
            debug!("{} edges after clipping, draw skipped", edges.len());
            return;
        }
        let known = match shader {
            Some(ref s) => known_shader_alpha(&**s),
            None => Some(color.alpha8()),
        };
        let mode = mode.optimize(known);
        if mode == BlendMode::Dst {
            debug!("blend leaves the destination unchanged, draw skipped");
            return;
        }
        let ctm = self.ctm();
        let source = match shader {
            Some(s) => {
                if !s.set_context(&ctm) {
                    debug!("shader context is not invertible, draw skipped");
                    return;
                }
                Source::Shaded(&*s)
            }
            None => Source::Solid(color.to_pixel()),
        };
        trace!("{:?} fill: {} edges, rows {} .. {}, {:?}", fill, edges.len(),
               edges[0].top, edges.iter().map(|e| e.bottom).max().unwrap_or(0), mode);
        let mut painter = SpanPainter::new(&mut self.bitmap, source, mode);
        match fill {
            Fill::Convex => render_scanlines(&mut ConvexRasterizer::new(edges), &mut painter),
            Fill::Winding => render_scanlines(&mut WindingRasterizer::new(edges), &mut painter),
        }
    }
}

/// Values of `src` at the three indices
fn gather<T: Copy>(src: &[T], idx: &[usize; 3]) -> Option<[T; 3]> {
    Some([*src.get(idx[0])?, *src.get(idx[1])?, *src.get(idx[2])?])
}

/// Bilinear interpolation over corners in order top left, top right,
/// bottom right, bottom left
fn bilerp<T>(q: &[T; 4], u: f32, v: f32) -> T
    where T: Copy + Add<Output = T> + Mul<f32, Output = T>
{
    q[0] * ((1.0 - u) * (1.0 - v)) + q[1] * (u * (1.0 - v)) + q[3] * ((1.0 - u) * v) + q[2] * (u * v)
}

/// Corners of the cell `u1 .. u2`, `v1 .. v2` of a bilinear patch
fn quad_cell<T>(q: &[T; 4], u1: f32, u2: f32, v1: f32, v2: f32) -> [T; 4]
    where T: Copy + Add<Output = T> + Mul<f32, Output = T>
{
    [bilerp(q, u1, v1), bilerp(q, u2, v1), bilerp(q, u2, v2), bilerp(q, u1, v2)]
}
