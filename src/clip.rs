//! Clipping Region
//!
//! Lines are clipped against the device rectangle before they become
//! [Edge]s. Parts above or below the device are dropped. Parts left or right
//! of the device are not dropped but projected onto the nearest vertical
//! side, so that winding is preserved for the pixels that remain.
//!
//! [Edge]: ../edge/struct.Edge.html

use crate::edge::Edge;
use crate::math::round_px;
use crate::paths::Point;

/// Rectangle
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Rectangle<T: std::cmp::PartialOrd + Copy> {
    /// Minimum x value
    pub x1: T,
    /// Minimum y value
    pub y1: T,
    /// Maximum x value
    pub x2: T,
    /// Maximum y value
    pub y2: T,
}

/// Rectangle in floating point coordinates
pub type Rect = Rectangle<f32>;

impl<T> Rectangle<T> where T: std::cmp::PartialOrd + Copy {
    /// Create a new Rectangle
    ///
    /// Values are sorted before storing
    pub fn new(x1: T, y1: T, x2: T, y2: T) -> Self {
        let (x1, x2) = if x1 > x2 { (x2, x1) } else { (x1, x2) };
        let (y1, y2) = if y1 > y2 { (y2, y1) } else { (y1, y2) };
        Self { x1, y1, x2, y2 }
    }
    /// Get location of point relative to rectangle
    ///
    /// Returned is an a u8 made up of the following bits:
    /// - [INSIDE](constant.INSIDE.html)
    /// - [LEFT](constant.LEFT.html)
    /// - [RIGHT](constant.RIGHT.html)
    /// - [ABOVE](constant.ABOVE.html)
    /// - [BELOW](constant.BELOW.html)
    ///
    pub fn clip_flags(&self, x: T, y: T) -> u8 {
        let mut code = INSIDE;
        if x < self.x1 { code |= LEFT; }
        if x > self.x2 { code |= RIGHT; }
        if y < self.y1 { code |= ABOVE; }
        if y > self.y2 { code |= BELOW; }
        code
    }
    /// Expand if the point (x,y) is outside
    pub fn expand(&mut self, x: T, y: T) {
        if x < self.x1 { self.x1 = x; }
        if x > self.x2 { self.x2 = x; }
        if y < self.y1 { self.y1 = y; }
        if y > self.y2 { self.y2 = y; }
    }
    /// Expand if the rectangle is outside
    pub fn expand_rect(&mut self, r: &Rectangle<T>) {
        self.expand(r.x1, r.y1);
        self.expand(r.x2, r.y2);
    }
    /// True if the two rectangles overlap with a non-empty area
    pub fn intersects(&self, r: &Rectangle<T>) -> bool {
        self.x1 < r.x2 && r.x1 < self.x2 && self.y1 < r.y2 && r.y1 < self.y2
    }
}

impl Rectangle<f32> {
    /// Rectangle from its top left corner and size
    pub fn from_xywh(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self::new(x, y, x + w, y + h)
    }
    /// Rectangle from its left, top, right and bottom sides
    pub fn from_ltrb(l: f32, t: f32, r: f32, b: f32) -> Self {
        Self::new(l, t, r, b)
    }
    pub fn width(&self) -> f32 {
        self.x2 - self.x1
    }
    pub fn height(&self) -> f32 {
        self.y2 - self.y1
    }
    /// Smallest integer rectangle covering this one
    pub fn round_out(&self) -> Rectangle<i32> {
        Rectangle::new(self.x1.floor() as i32, self.y1.floor() as i32,
                       self.x2.ceil() as i32, self.y2.ceil() as i32)
    }
}

/// Inside Region
///
/// See [Cohen Sutherland](https://en.wikipedia.org/wiki/Cohen%E2%80%93Sutherland_algorithm)
pub const INSIDE : u8 = 0b0000;
/// Left of Region
pub const LEFT   : u8 = 0b0000_0001;
/// Right of Region
pub const RIGHT  : u8 = 0b0000_0010;
/// Above Region, smaller y
pub const ABOVE  : u8 = 0b0000_0100;
/// Below Region, larger y
pub const BELOW  : u8 = 0b0000_1000;

/// Point on the line through `p0`, `p1` at height `y`
fn at_y(p0: Point, p1: Point, y: f32) -> Point {
    let x = p0.x + (y - p0.y) * (p1.x - p0.x) / (p1.y - p0.y);
    Point::new(x, y)
}

/// Point on the line through `p0`, `p1` at column `x`
fn at_x(p0: Point, p1: Point, x: f32) -> Point {
    let y = p0.y + (x - p0.x) * (p1.y - p0.y) / (p1.x - p0.x);
    Point::new(x, y)
}

/// Clip Region
///
/// Clipping of device-space lines into edges
#[derive(Debug, Copy, Clone)]
pub struct Clip {
    /// Rectangle to clip on
    clip_box: Rect,
}

impl Clip {
    /// Create new Clipping region covering a width x height device
    pub fn new(width: f32, height: f32) -> Self {
        Self { clip_box: Rect::new(0.0, 0.0, width, height) }
    }
    /// Rectangle being clipped on
    pub fn clip_box(&self) -> &Rect {
        &self.clip_box
    }
    /// Clip the line from `p0` to `p1` and append its edges to `out`
    ///
    /// Up to three edges are produced: a vertical piece on the left side,
    /// the visible diagonal and a vertical piece on the right side. Every
    /// edge keeps the winding of the unclipped line, +1 when it runs
    /// downward.
    ///
    ///     use pixcanvas::{Clip, Point};
    ///
    ///     let clip = Clip::new(10.0, 10.0);
    ///     let mut edges = vec![];
    ///     // starts left of the device
    ///     clip.line(Point::new(-10.0, 0.0), Point::new(10.0, 10.0), &mut edges);
    ///     assert_eq!(edges.len(), 2);
    ///     assert!(edges.iter().all(|e| e.w == 1));
    ///     assert!(edges.iter().all(|e| e.top >= 0 && e.bottom <= 10));
    ///
    pub fn line(&self, p0: Point, p1: Point, out: &mut Vec<Edge>) {
        let b = &self.clip_box;
        if round_px(p0.y) == round_px(p1.y) {
            return;
        }
        let (f0, f1) = (b.clip_flags(p0.x, p0.y), b.clip_flags(p1.x, p1.y));
        // Both points above or below clip box
        let (fy0, fy1) = (f0 & (ABOVE | BELOW), f1 & (ABOVE | BELOW));
        if fy0 != INSIDE && fy0 == fy1 {
            return;
        }
        let w = if p0.y < p1.y { 1 } else { -1 };
        let (mut top, mut bot) = if p0.y < p1.y { (p0, p1) } else { (p1, p0) };
        if top.y < b.y1 {
            top = at_y(top, bot, b.y1);
        }
        if bot.y > b.y2 {
            bot = at_y(top, bot, b.y2);
        }
        if round_px(top.y) == round_px(bot.y) {
            return;
        }
        let mut push = |a: Point, c: Point| {
            if let Some(e) = Edge::new(a, c, w) {
                out.push(e);
            }
        };
        let (mut left, mut right) = if top.x <= bot.x { (top, bot) } else { (bot, top) };
        let fl = b.clip_flags(left.x, left.y) & (LEFT | RIGHT);
        let fr = b.clip_flags(right.x, right.y) & (LEFT | RIGHT);
        match (fl, fr) {
            (_, LEFT) => push(Point::new(b.x1, left.y), Point::new(b.x1, right.y)),
            (RIGHT, _) => push(Point::new(b.x2, left.y), Point::new(b.x2, right.y)),
            (_, _) => {
                if fl == LEFT {
                    let l = at_x(left, right, b.x1);
                    push(Point::new(b.x1, left.y), l);
                    left = l;
                }
                if fr == RIGHT {
                    let r = at_x(left, right, b.x2);
                    push(r, Point::new(b.x2, right.y));
                    right = r;
                }
                push(left, right);
            }
        }
    }
}
