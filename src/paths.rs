//! Paths
//!
//! A [Path] is a list of contours built from lines and quadratic or cubic
//! Bezier segments. Contours are always treated as closed: iterating the
//! [segments](struct.Path.html#method.segments) of a path adds the line back
//! to each contour's starting point.

use crate::clip::Rect;
use crate::curves;
use crate::transform::Matrix;

use std::ops::{Add, Mul, Sub};

/// Point in either local or device space
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
    /// Euclidean length of the vector (x,y)
    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }
}

impl Add for Point {
    type Output = Point;
    fn add(self, o: Point) -> Point {
        Point::new(self.x + o.x, self.y + o.y)
    }
}
impl Sub for Point {
    type Output = Point;
    fn sub(self, o: Point) -> Point {
        Point::new(self.x - o.x, self.y - o.y)
    }
}
impl Mul<f32> for Point {
    type Output = Point;
    fn mul(self, s: f32) -> Point {
        Point::new(self.x * s, self.y * s)
    }
}
impl Mul<Point> for f32 {
    type Output = Point;
    fn mul(self, p: Point) -> Point {
        p * self
    }
}

/// Path Commands
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum PathCommand {
    /// Start a new contour, 1 point
    MoveTo,
    /// Line, 1 point
    LineTo,
    /// Quadratic Bezier, control point and end point
    QuadTo,
    /// Cubic Bezier, two control points and end point
    CubicTo,
}

impl PathCommand {
    fn num_points(self) -> usize {
        match self {
            PathCommand::MoveTo | PathCommand::LineTo => 1,
            PathCommand::QuadTo => 2,
            PathCommand::CubicTo => 3,
        }
    }
}

/// Contour direction used by the builder shapes
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum PathDirection {
    Clockwise,
    CounterClockwise,
}

/// A single segment of a path, with its start point included
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Segment {
    Line([Point; 2]),
    Quad([Point; 3]),
    Cubic([Point; 4]),
}

/// Immutable geometry: commands and their points
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Path {
    commands: Vec<PathCommand>,
    points: Vec<Point>,
}

impl Path {
    /// Commands of the path
    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }
    /// Points of the path
    pub fn points(&self) -> &[Point] {
        &self.points
    }
    /// True if the path has no points
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
    /// Iterate over segments, closing every contour
    pub fn segments(&self) -> Segments<'_> {
        Segments { path: self, cmd: 0, pt: 0, start: None, last: Point::default() }
    }
    /// Transform every point of the path
    pub fn transform(&self, m: &Matrix) -> Path {
        Path {
            commands: self.commands.clone(),
            points: self.points.iter().map(|&p| m.map_point(p)).collect(),
        }
    }
    /// Tight bounding box, including curve extrema
    ///
    /// An empty path has an empty rectangle at the origin.
    pub fn bounds(&self) -> Rect {
        let first = match self.points.first() {
            Some(&p) => p,
            None => return Rect::new(0.0, 0.0, 0.0, 0.0),
        };
        let mut r = Rect::new(first.x, first.y, first.x, first.y);
        for seg in self.segments() {
            match seg {
                Segment::Line(pts) => r.expand(pts[1].x, pts[1].y),
                Segment::Quad(pts) => r.expand_rect(&curves::quad_bounds(&pts)),
                Segment::Cubic(pts) => r.expand_rect(&curves::cubic_bounds(&pts)),
            }
        }
        r
    }
}

/// Iterator over the segments of a [Path]
pub struct Segments<'a> {
    path: &'a Path,
    cmd: usize,
    pt: usize,
    start: Option<Point>,
    last: Point,
}

impl<'a> Iterator for Segments<'a> {
    type Item = Segment;
    fn next(&mut self) -> Option<Segment> {
        loop {
            let cmd = match self.path.commands.get(self.cmd) {
                Some(&c) => c,
                None => {
                    // close the final contour
                    let start = self.start.take()?;
                    return Some(Segment::Line([self.last, start]));
                }
            };
            if cmd == PathCommand::MoveTo {
                if let Some(start) = self.start.take() {
                    // close the previous contour, handle the move next time
                    return Some(Segment::Line([self.last, start]));
                }
            }
            let n = cmd.num_points();
            let pts = &self.path.points[self.pt..self.pt + n];
            self.cmd += 1;
            self.pt += n;
            let p0 = self.last;
            self.last = pts[n - 1];
            match cmd {
                PathCommand::MoveTo => {
                    self.start = Some(pts[0]);
                }
                PathCommand::LineTo => return Some(Segment::Line([p0, pts[0]])),
                PathCommand::QuadTo => return Some(Segment::Quad([p0, pts[0], pts[1]])),
                PathCommand::CubicTo => return Some(Segment::Cubic([p0, pts[0], pts[1], pts[2]])),
            }
        }
    }
}

/// Incremental construction of a [Path]
///
///     use pixcanvas::{PathBuilder, PathDirection, Rect, Segment};
///
///     let mut b = PathBuilder::new();
///     b.add_rect(&Rect::from_xywh(0.0, 0.0, 10.0, 5.0), PathDirection::Clockwise);
///     let path = b.build();
///     // three lines plus the closing line
///     assert_eq!(path.segments().count(), 4);
///     assert!(path.segments().all(|s| matches!(s, Segment::Line(_))));
///
#[derive(Debug, Default)]
pub struct PathBuilder {
    path: Path,
}

impl PathBuilder {
    pub fn new() -> Self {
        Self::default()
    }
    fn ensure_started(&mut self) {
        if self.path.commands.is_empty() {
            self.move_to(0.0, 0.0);
        }
    }
    /// Start a new contour at (x,y)
    pub fn move_to(&mut self, x: f32, y: f32) -> &mut Self {
        self.path.commands.push(PathCommand::MoveTo);
        self.path.points.push(Point::new(x, y));
        self
    }
    /// Line to (x,y)
    pub fn line_to(&mut self, x: f32, y: f32) -> &mut Self {
        self.ensure_started();
        self.path.commands.push(PathCommand::LineTo);
        self.path.points.push(Point::new(x, y));
        self
    }
    /// Quadratic Bezier through control point `p1` to `p2`
    pub fn quad_to(&mut self, p1: Point, p2: Point) -> &mut Self {
        self.ensure_started();
        self.path.commands.push(PathCommand::QuadTo);
        self.path.points.extend_from_slice(&[p1, p2]);
        self
    }
    /// Cubic Bezier through control points `p1`, `p2` to `p3`
    pub fn cubic_to(&mut self, p1: Point, p2: Point, p3: Point) -> &mut Self {
        self.ensure_started();
        self.path.commands.push(PathCommand::CubicTo);
        self.path.points.extend_from_slice(&[p1, p2, p3]);
        self
    }
    /// Add a rectangle as a new contour, starting at the top left corner
    pub fn add_rect(&mut self, r: &Rect, dir: PathDirection) -> &mut Self {
        self.move_to(r.x1, r.y1);
        match dir {
            PathDirection::Clockwise => {
                self.line_to(r.x2, r.y1);
                self.line_to(r.x2, r.y2);
                self.line_to(r.x1, r.y2);
            }
            PathDirection::CounterClockwise => {
                self.line_to(r.x1, r.y2);
                self.line_to(r.x2, r.y2);
                self.line_to(r.x2, r.y1);
            }
        }
        self
    }
    /// Add a polygon as a new contour
    pub fn add_polygon(&mut self, pts: &[Point]) -> &mut Self {
        if let Some((first, rest)) = pts.split_first() {
            self.move_to(first.x, first.y);
            for p in rest {
                self.line_to(p.x, p.y);
            }
        }
        self
    }
    /// Add a circle made from four cubic arcs
    pub fn add_circle(&mut self, center: Point, radius: f32, dir: PathDirection) -> &mut Self {
        const K: f32 = 0.551_915;
        let unit = [
            (1.0, 0.0), (1.0, K), (K, 1.0), (0.0, 1.0), (-K, 1.0), (-1.0, K), (-1.0, 0.0),
            (-1.0, -K), (-K, -1.0), (0.0, -1.0), (K, -1.0), (1.0, -K), (1.0, 0.0),
        ];
        let m = Matrix::translate(center.x, center.y) * Matrix::scale(radius, radius);
        let pts: Vec<Point> = unit.iter().map(|&(x, y)| m.map_point(Point::new(x, y))).collect();
        self.move_to(pts[0].x, pts[0].y);
        match dir {
            PathDirection::Clockwise => {
                for i in (1..12).step_by(3) {
                    self.cubic_to(pts[i], pts[i + 1], pts[i + 2]);
                }
            }
            PathDirection::CounterClockwise => {
                for i in (3..=12).rev().step_by(3) {
                    self.cubic_to(pts[i - 1], pts[i - 2], pts[i - 3]);
                }
            }
        }
        self
    }
    /// Take the built path, leaving the builder empty
    pub fn build(&mut self) -> Path {
        std::mem::take(&mut self.path)
    }
}
