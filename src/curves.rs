//! Bezier curves
//!
//! Evaluation, flattening into line segments and exact bounds.
//!
//! Polynomials are evaluated in Horner form. For a quadratic with control
//! points A, B, C:
//!
//! ```text
//! q(t) = (A - 2B + C) t^2 + 2(B - A) t + A
//! ```
//!
//! and for a cubic with A, B, C, D:
//!
//! ```text
//! c(t) = (D - A + 3(B - C)) t^3 + 3(A - 2B + C) t^2 + 3(B - A) t + A
//! ```

use crate::clip::Rect;
use crate::paths::Point;

/// Linear interpolation between two points
pub fn lerp(p0: Point, p1: Point, t: f32) -> Point {
    p0 + (p1 - p0) * t
}

/// Point on a quadratic Bezier at `t`
pub fn eval_quad(src: &[Point; 3], t: f32) -> Point {
    let a = src[0] - src[1] * 2.0 + src[2];
    let b = (src[1] - src[0]) * 2.0;
    let c = src[0];
    (a * t + b) * t + c
}

/// Point on a cubic Bezier at `t`
pub fn eval_cubic(src: &[Point; 4], t: f32) -> Point {
    let a = src[3] - src[0] + (src[1] - src[2]) * 3.0;
    let b = (src[0] - src[1] * 2.0 + src[2]) * 3.0;
    let c = (src[1] - src[0]) * 3.0;
    let d = src[0];
    ((a * t + b) * t + c) * t + d
}

/// Number of line segments used to flatten a quadratic
///
/// Based on the distance between the curve's midpoint and its chord.
pub fn quad_segments(src: &[Point; 3]) -> usize {
    let e = (src[0] - src[1] * 2.0 + src[2]) * 0.25;
    num_segments(e.length(), 4.0)
}

/// Number of line segments used to flatten a cubic
pub fn cubic_segments(src: &[Point; 4]) -> usize {
    let e0 = src[0] - src[1] * 2.0 + src[2];
    let e1 = src[1] - src[2] * 2.0 + src[3];
    let e = Point::new(e0.x.abs().max(e1.x.abs()), e0.y.abs().max(e1.y.abs()));
    num_segments(e.length(), 3.0)
}

/// Upper bound on the segments of one flattened curve
pub const MAX_SEGMENTS: usize = 1 << 10;

fn num_segments(deviation: f32, k: f32) -> usize {
    let n = (k * deviation).sqrt().ceil();
    if n.is_nan() || n < 1.0 {
        1
    } else if n >= MAX_SEGMENTS as f32 {
        // also taken when the deviation overflowed to infinity
        MAX_SEGMENTS
    } else {
        n as usize
    }
}

/// Flatten a quadratic into `quad_segments() + 1` points
///
/// The first and last points are the curve's endpoints, untouched.
pub fn flatten_quad(src: &[Point; 3]) -> Vec<Point> {
    let n = quad_segments(src);
    flatten(n, src[0], src[2], |t| eval_quad(src, t))
}

/// Flatten a cubic into `cubic_segments() + 1` points
pub fn flatten_cubic(src: &[Point; 4]) -> Vec<Point> {
    let n = cubic_segments(src);
    flatten(n, src[0], src[3], |t| eval_cubic(src, t))
}

fn flatten<F: Fn(f32) -> Point>(n: usize, start: Point, end: Point, eval: F) -> Vec<Point> {
    let dt = 1.0 / n as f32;
    let mut out = Vec::with_capacity(n + 1);
    out.push(start);
    for i in 1..n {
        out.push(eval(i as f32 * dt));
    }
    out.push(end);
    out
}

/// Split a quadratic at `t` into two quadratics sharing dst[2]
pub fn chop_quad_at(src: &[Point; 3], t: f32) -> [Point; 5] {
    [
        src[0],
        lerp(src[0], src[1], t),
        eval_quad(src, t),
        lerp(src[1], src[2], t),
        src[2],
    ]
}

/// Split a cubic at `t` into two cubics sharing dst[3]
pub fn chop_cubic_at(src: &[Point; 4], t: f32) -> [Point; 7] {
    let ab = lerp(src[0], src[1], t);
    let bc = lerp(src[1], src[2], t);
    let cd = lerp(src[2], src[3], t);
    [
        src[0],
        ab,
        lerp(ab, bc, t),
        eval_cubic(src, t),
        lerp(bc, cd, t),
        cd,
        src[3],
    ]
}

fn in_unit(t: f32) -> bool {
    t >= 0.0 && t <= 1.0
}

/// Parameter of the extremum of one quadratic coordinate, if in [0,1]
fn quad_extremum(a: f32, b: f32, c: f32) -> Option<f32> {
    let denom = a - 2.0 * b + c;
    if denom == 0.0 {
        return None;
    }
    Some((a - b) / denom).filter(|&t| in_unit(t))
}

/// Roots in [0,1] of the derivative of one cubic coordinate
fn cubic_extrema(a: f32, b: f32, c: f32, d: f32) -> Vec<f32> {
    // derivative / 3 = qa t^2 + qb t + qc
    let qa = -a + 3.0 * b - 3.0 * c + d;
    let qb = 2.0 * (a - 2.0 * b + c);
    let qc = b - a;
    let mut roots = Vec::with_capacity(2);
    if qa == 0.0 {
        if qb != 0.0 {
            roots.push(-qc / qb);
        }
    } else {
        let disc = qb * qb - 4.0 * qa * qc;
        if disc >= 0.0 {
            let s = disc.sqrt();
            roots.push((-qb - s) / (2.0 * qa));
            roots.push((-qb + s) / (2.0 * qa));
        }
    }
    roots.retain(|&t| in_unit(t));
    roots
}

/// Exact bounding box of a quadratic
pub fn quad_bounds(src: &[Point; 3]) -> Rect {
    let mut r = Rect::new(src[0].x, src[0].y, src[0].x, src[0].y);
    r.expand(src[2].x, src[2].y);
    if let Some(t) = quad_extremum(src[0].x, src[1].x, src[2].x) {
        let p = eval_quad(src, t);
        r.expand(p.x, p.y);
    }
    if let Some(t) = quad_extremum(src[0].y, src[1].y, src[2].y) {
        let p = eval_quad(src, t);
        r.expand(p.x, p.y);
    }
    r
}

/// Exact bounding box of a cubic
pub fn cubic_bounds(src: &[Point; 4]) -> Rect {
    let mut r = Rect::new(src[0].x, src[0].y, src[0].x, src[0].y);
    r.expand(src[3].x, src[3].y);
    let tx = cubic_extrema(src[0].x, src[1].x, src[2].x, src[3].x);
    let ty = cubic_extrema(src[0].y, src[1].y, src[2].y, src[3].y);
    for t in tx.into_iter().chain(ty) {
        let p = eval_cubic(src, t);
        r.expand(p.x, p.y);
    }
    r
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(x: f32, y: f32) -> Point {
        Point::new(x, y)
    }

    fn close(a: Point, b: Point, tol: f32) -> bool {
        (a.x - b.x).abs() <= tol && (a.y - b.y).abs() <= tol
    }

    #[test]
    fn horner_matches_bernstein() {
        let q = [pt(0.0, 0.0), pt(10.0, 20.0), pt(30.0, 0.0)];
        let c = [pt(0.0, 0.0), pt(10.0, 30.0), pt(20.0, -30.0), pt(30.0, 0.0)];
        for i in 0..=10 {
            let t = i as f32 / 10.0;
            let u = 1.0 - t;
            let bq = q[0] * (u * u) + q[1] * (2.0 * u * t) + q[2] * (t * t);
            assert!(close(eval_quad(&q, t), bq, 1e-3));
            let bc = c[0] * (u * u * u) + c[1] * (3.0 * u * u * t) + c[2] * (3.0 * u * t * t) + c[3] * (t * t * t);
            assert!(close(eval_cubic(&c, t), bc, 1e-3));
        }
    }

    #[test]
    fn flatten_keeps_endpoints() {
        let q = [pt(0.3, 0.7), pt(50.0, 80.0), pt(99.1, 3.3)];
        let f = flatten_quad(&q);
        assert_eq!(f[0], q[0]);
        assert_eq!(*f.last().unwrap(), q[2]);
        assert_eq!(f.len(), quad_segments(&q) + 1);

        let c = [pt(1.0, 1.0), pt(40.0, 90.0), pt(60.0, -90.0), pt(99.0, 1.0)];
        let f = flatten_cubic(&c);
        assert_eq!(f[0], c[0]);
        assert_eq!(*f.last().unwrap(), c[3]);
    }

    #[test]
    fn straight_curves_need_one_segment() {
        let q = [pt(0.0, 0.0), pt(5.0, 5.0), pt(10.0, 10.0)];
        assert_eq!(quad_segments(&q), 1);
        let c = [pt(0.0, 0.0), pt(1.0, 1.0), pt(2.0, 2.0), pt(3.0, 3.0)];
        assert_eq!(cubic_segments(&c), 1);
    }

    #[test]
    fn far_control_points_are_capped() {
        let q = [pt(0.0, 0.0), pt(1e18, 5.0), pt(10.0, 10.0)];
        assert_eq!(quad_segments(&q), MAX_SEGMENTS);
        assert_eq!(flatten_quad(&q).len(), MAX_SEGMENTS + 1);
        // deviation overflows f32
        let q = [pt(0.0, 0.0), pt(1e30, 5.0), pt(10.0, 10.0)];
        assert_eq!(quad_segments(&q), MAX_SEGMENTS);
        let c = [pt(0.0, 0.0), pt(-1e30, 1e30), pt(5.0, 5.0), pt(10.0, 10.0)];
        assert_eq!(cubic_segments(&c), MAX_SEGMENTS);
    }

    #[test]
    fn segment_count_formula() {
        // e = (A - 2B + C) / 4 = (0, -10); sqrt(4 * 10) = 6.32 -> 7
        let q = [pt(0.0, 0.0), pt(10.0, 20.0), pt(20.0, 0.0)];
        assert_eq!(quad_segments(&q), 7);
    }

    #[test]
    fn chop_at_ends_keeps_curve() {
        let q = [pt(0.0, 0.0), pt(10.0, 20.0), pt(30.0, 5.0)];
        let d = chop_quad_at(&q, 0.0);
        assert_eq!(d[0], q[0]);
        assert_eq!(d[2], q[0]);
        assert_eq!(d[4], q[2]);
        let d = chop_quad_at(&q, 1.0);
        assert_eq!(d[2], q[2]);

        let c = [pt(0.0, 0.0), pt(10.0, 30.0), pt(20.0, -30.0), pt(30.0, 0.0)];
        let d = chop_cubic_at(&c, 0.0);
        assert_eq!(d[3], c[0]);
        assert_eq!(d[6], c[3]);
        let d = chop_cubic_at(&c, 1.0);
        assert_eq!(d[0], c[0]);
        assert_eq!(d[3], c[3]);
    }

    #[test]
    fn chopped_halves_reproduce_curve() {
        let c = [pt(0.0, 0.0), pt(10.0, 30.0), pt(20.0, -30.0), pt(30.0, 0.0)];
        let d = chop_cubic_at(&c, 0.5);
        let left = [d[0], d[1], d[2], d[3]];
        let right = [d[3], d[4], d[5], d[6]];
        for i in 0..=8 {
            let t = i as f32 / 8.0;
            assert!(close(eval_cubic(&left, t), eval_cubic(&c, t * 0.5), 1e-3));
            assert!(close(eval_cubic(&right, t), eval_cubic(&c, 0.5 + t * 0.5), 1e-3));
        }
        let q = [pt(0.0, 0.0), pt(10.0, 20.0), pt(30.0, 5.0)];
        let d = chop_quad_at(&q, 0.25);
        let left = [d[0], d[1], d[2]];
        for i in 0..=8 {
            let t = i as f32 / 8.0;
            assert!(close(eval_quad(&left, t), eval_quad(&q, t * 0.25), 1e-3));
        }
    }

    #[test]
    fn exact_bounds() {
        // apex of this quad is at t = 0.5, y = 10
        let q = [pt(0.0, 0.0), pt(10.0, 20.0), pt(20.0, 0.0)];
        let r = quad_bounds(&q);
        assert_eq!((r.x1, r.x2), (0.0, 20.0));
        assert!((r.y2 - 10.0).abs() < 1e-4);
        assert_eq!(r.y1, 0.0);

        // symmetric S curve: extrema at t = 0.5 +- sqrt(3)/6
        let c = [pt(0.0, 0.0), pt(10.0, 30.0), pt(20.0, -30.0), pt(30.0, 0.0)];
        let r = cubic_bounds(&c);
        let t = 0.5 - 3f32.sqrt() / 6.0;
        let top = eval_cubic(&c, t).y;
        assert!((r.y2 - top).abs() < 1e-3);
        assert!((r.y1 + top).abs() < 1e-3);
        assert_eq!((r.x1, r.x2), (0.0, 30.0));
        // bounds are inside the control hull
        assert!(r.y2 < 30.0);
    }
}
