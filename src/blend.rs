//! Blending
//!
//! The twelve Porter-Duff operators over premultiplied [Pixel]s. With
//! `Sa`, `Da` the source and destination alpha, each channel `c` of the
//! result is:
//!
//! | Mode     | Result                                |
//! |----------|---------------------------------------|
//! | Clear    | 0                                     |
//! | Src      | S                                     |
//! | Dst      | D                                     |
//! | SrcOver  | S + (1 - Sa) D                        |
//! | DstOver  | D + (1 - Da) S                        |
//! | SrcIn    | Da S                                  |
//! | DstIn    | Sa D                                  |
//! | SrcOut   | (1 - Da) S                            |
//! | DstOut   | (1 - Sa) D                            |
//! | SrcATop  | Da S + (1 - Sa) D                     |
//! | DstATop  | Sa D + (1 - Da) S                     |
//! | Xor      | (1 - Sa) D + (1 - Da) S               |
//!
//! All arithmetic is on 8-bit integers; every product is brought back to
//! 8 bits with [div255](../math/fn.div255.html). Sums of products are
//! divided once, after the sum.
//!
//! [Pixel]: ../color/struct.Pixel.html

use crate::color::Pixel;
use crate::math::div255;

/// Porter-Duff compositing operator
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BlendMode {
    Clear,
    Src,
    Dst,
    SrcOver,
    DstOver,
    SrcIn,
    DstIn,
    SrcOut,
    DstOut,
    SrcATop,
    DstATop,
    Xor,
}

impl Default for BlendMode {
    fn default() -> BlendMode {
        BlendMode::SrcOver
    }
}

/// Blend function, source first then destination
pub type BlendProc = fn(Pixel, Pixel) -> Pixel;

/// Apply `f(source, destination)` to all four channels
fn per_channel<F: Fn(u32, u32) -> u32>(s: Pixel, d: Pixel, f: F) -> Pixel {
    Pixel::pack(f(s.a(), d.a()), f(s.r(), d.r()), f(s.g(), d.g()), f(s.b(), d.b()))
}

fn clear(_: Pixel, _: Pixel) -> Pixel {
    Pixel::TRANSPARENT
}
fn src(s: Pixel, _: Pixel) -> Pixel {
    s
}
fn dst(_: Pixel, d: Pixel) -> Pixel {
    d
}
fn src_over(s: Pixel, d: Pixel) -> Pixel {
    let isa = 255 - s.a();
    per_channel(s, d, |s, d| s + div255(isa * d))
}
fn dst_over(s: Pixel, d: Pixel) -> Pixel {
    let ida = 255 - d.a();
    per_channel(s, d, |s, d| d + div255(ida * s))
}
fn src_in(s: Pixel, d: Pixel) -> Pixel {
    let da = d.a();
    per_channel(s, d, |s, _| div255(da * s))
}
fn dst_in(s: Pixel, d: Pixel) -> Pixel {
    let sa = s.a();
    per_channel(s, d, |_, d| div255(sa * d))
}
fn src_out(s: Pixel, d: Pixel) -> Pixel {
    let ida = 255 - d.a();
    per_channel(s, d, |s, _| div255(ida * s))
}
fn dst_out(s: Pixel, d: Pixel) -> Pixel {
    let isa = 255 - s.a();
    per_channel(s, d, |_, d| div255(isa * d))
}
fn src_atop(s: Pixel, d: Pixel) -> Pixel {
    let (da, isa) = (d.a(), 255 - s.a());
    per_channel(s, d, |s, d| div255(da * s + isa * d))
}
fn dst_atop(s: Pixel, d: Pixel) -> Pixel {
    let (sa, ida) = (s.a(), 255 - d.a());
    per_channel(s, d, |s, d| div255(sa * d + ida * s))
}
fn xor(s: Pixel, d: Pixel) -> Pixel {
    let (isa, ida) = (255 - s.a(), 255 - d.a());
    per_channel(s, d, |s, d| div255(isa * d + ida * s))
}

impl BlendMode {
    /// Every mode, in declaration order
    pub const ALL: [BlendMode; 12] = [
        BlendMode::Clear, BlendMode::Src, BlendMode::Dst,
        BlendMode::SrcOver, BlendMode::DstOver,
        BlendMode::SrcIn, BlendMode::DstIn,
        BlendMode::SrcOut, BlendMode::DstOut,
        BlendMode::SrcATop, BlendMode::DstATop,
        BlendMode::Xor,
    ];

    /// Pixel over pixel function for this mode
    pub fn proc(self) -> BlendProc {
        match self {
            BlendMode::Clear => clear,
            BlendMode::Src => src,
            BlendMode::Dst => dst,
            BlendMode::SrcOver => src_over,
            BlendMode::DstOver => dst_over,
            BlendMode::SrcIn => src_in,
            BlendMode::DstIn => dst_in,
            BlendMode::SrcOut => src_out,
            BlendMode::DstOut => dst_out,
            BlendMode::SrcATop => src_atop,
            BlendMode::DstATop => dst_atop,
            BlendMode::Xor => xor,
        }
    }

    /// Replace the mode with a cheaper one giving identical output
    ///
    /// `src_alpha` is the 8-bit alpha shared by every source pixel, when it
    /// is known ahead of time. Only alphas of 0 and 255 allow a change.
    ///
    ///     use pixcanvas::BlendMode;
    ///
    ///     assert_eq!(BlendMode::SrcOver.optimize(Some(255)), BlendMode::Src);
    ///     assert_eq!(BlendMode::SrcOver.optimize(Some(0)), BlendMode::Dst);
    ///     assert_eq!(BlendMode::SrcOver.optimize(Some(128)), BlendMode::SrcOver);
    ///     assert_eq!(BlendMode::SrcOver.optimize(None), BlendMode::SrcOver);
    ///
    pub fn optimize(self, src_alpha: Option<u32>) -> BlendMode {
        use BlendMode::*;
        match (self, src_alpha) {
            (SrcOver, Some(0)) => Dst,
            (SrcOver, Some(255)) => Src,
            (DstOver, Some(0)) => Dst,
            (SrcIn, Some(0)) => Clear,
            (DstIn, Some(0)) => Clear,
            (DstIn, Some(255)) => Dst,
            (SrcOut, Some(0)) => Clear,
            (DstOut, Some(0)) => Dst,
            (DstOut, Some(255)) => Clear,
            (SrcATop, Some(0)) => Dst,
            (SrcATop, Some(255)) => SrcIn,
            (DstATop, Some(0)) => Clear,
            (Xor, Some(0)) => Dst,
            (Xor, Some(255)) => SrcOut,
            (mode, _) => mode,
        }
    }
}

/// Blend `src` over `dst` with `mode`
///
/// `src` is either a [Pixel] or a [Color]; a color is premultiplied first,
/// so both forms agree for the same effective source.
///
///     use pixcanvas::{blend, BlendMode, Color, Pixel};
///
///     let dst = Pixel::pack(255, 0, 0, 255);
///     let red = Color::new(1.0, 0.0, 0.0, 0.5);
///     let out = blend(BlendMode::SrcOver, red, dst);
///     assert_eq!(out, blend(BlendMode::SrcOver, red.to_pixel(), dst));
///     assert_eq!(out, Pixel::pack(255, 128, 0, 127));
///
/// [Color]: ../color/struct.Color.html
pub fn blend<S: Into<Pixel>>(mode: BlendMode, src: S, dst: Pixel) -> Pixel {
    (mode.proc())(src.into(), dst)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples() -> Vec<Pixel> {
        let mut v = vec![Pixel::TRANSPARENT, Pixel(0xFFFF_FFFF), Pixel(0xFF00_0000)];
        for &a in &[1, 77, 128, 200, 254, 255] {
            v.push(Pixel::pack(a, a, a / 2, 0));
            v.push(Pixel::pack(a, a / 3, a, a / 5));
        }
        v
    }

    #[test]
    fn clear_src_dst() {
        for s in samples() {
            for d in samples() {
                assert_eq!(blend(BlendMode::Clear, s, d), Pixel::TRANSPARENT);
                assert_eq!(blend(BlendMode::Src, s, d), s);
                assert_eq!(blend(BlendMode::Dst, s, d), d);
            }
        }
    }

    #[test]
    fn optimized_modes_match() {
        for &mode in BlendMode::ALL.iter() {
            for &alpha in &[0, 255] {
                let opt = mode.optimize(Some(alpha));
                for s in samples().into_iter().filter(|p| p.a() == alpha) {
                    for d in samples() {
                        assert_eq!(blend(mode, s, d), blend(opt, s, d),
                                   "{:?} -> {:?} s {:x} d {:x}", mode, opt, s.0, d.0);
                    }
                }
            }
        }
    }

    #[test]
    fn results_stay_premultiplied() {
        for &mode in BlendMode::ALL.iter() {
            for s in samples() {
                for d in samples() {
                    let p = blend(mode, s, d);
                    assert!(p.r() <= p.a() && p.g() <= p.a() && p.b() <= p.a(),
                            "{:?} {:x} {:x} -> {:x}", mode, s.0, d.0, p.0);
                }
            }
        }
    }

    #[test]
    fn opaque_over_opaque() {
        let s = Pixel::pack(255, 10, 20, 30);
        let d = Pixel::pack(255, 200, 100, 50);
        assert_eq!(blend(BlendMode::SrcOver, s, d), s);
        assert_eq!(blend(BlendMode::DstOver, s, d), d);
        assert_eq!(blend(BlendMode::SrcATop, s, d), s);
        assert_eq!(blend(BlendMode::Xor, s, d), Pixel::TRANSPARENT);
        assert_eq!(blend(BlendMode::SrcOut, s, d), Pixel::TRANSPARENT);
        assert_eq!(blend(BlendMode::DstIn, s, d), d);
    }
}
