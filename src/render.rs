//! Renderer
//!
//! Writes the spans of each [Scanline] into a [Bitmap], taking source
//! pixels from a solid color or a shader and merging them with a blend
//! function.
//!
//! [Scanline]: ../scan/struct.Scanline.html
//! [Bitmap]: ../buffer/struct.Bitmap.html

use crate::blend::{BlendMode, BlendProc};
use crate::buffer::Bitmap;
use crate::color::Pixel;
use crate::scan::Scanline;
use crate::{Rasterize, Render, Shader};

/// Where source pixels come from
#[derive(Copy, Clone)]
pub enum Source<'a> {
    /// Same premultiplied pixel everywhere
    Solid(Pixel),
    /// Shader with its context already set
    Shaded(&'a dyn Shader),
}

/// Span renderer writing into a bitmap
pub struct SpanPainter<'a> {
    bitmap: &'a mut Bitmap,
    source: Source<'a>,
    blend: BlendProc,
    /// Shaded pixels of the current span
    buf: Vec<Pixel>,
}

impl<'a> SpanPainter<'a> {
    /// Create a new painter blending `source` into `bitmap` with `mode`
    pub fn new(bitmap: &'a mut Bitmap, source: Source<'a>, mode: BlendMode) -> Self {
        Self { bitmap, source, blend: mode.proc(), buf: vec![] }
    }
}

impl<'a> Render for SpanPainter<'a> {
    /// Render a single Scanline Row
    fn render(&mut self, sl: &Scanline) {
        let (w, h) = (self.bitmap.width() as i32, self.bitmap.height() as i32);
        if sl.y < 0 || sl.y >= h {
            return;
        }
        let blend = self.blend;
        for span in &sl.spans {
            let x1 = span.x.max(0);
            let x2 = span.end().min(w);
            if x2 <= x1 {
                continue;
            }
            let dst = &mut self.bitmap.row_mut(sl.y as usize)[x1 as usize..x2 as usize];
            match self.source {
                Source::Solid(src) => {
                    for d in dst.iter_mut() {
                        *d = blend(src, *d);
                    }
                }
                Source::Shaded(shader) => {
                    self.buf.resize(dst.len(), Pixel::TRANSPARENT);
                    shader.shade_row(x1, sl.y, &mut self.buf);
                    for (d, &s) in dst.iter_mut().zip(self.buf.iter()) {
                        *d = blend(s, *d);
                    }
                }
            }
        }
    }
}

/// Render rasterized data to an image
pub fn render_scanlines<RAS, REN>(ras: &mut RAS, ren: &mut REN)
    where RAS: Rasterize,
          REN: Render
{
    let mut sl = Scanline::new();
    while ras.sweep_scanline(&mut sl) {
        ren.render(&sl);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::Matrix;

    struct Ramp;
    impl Shader for Ramp {
        fn is_opaque(&self) -> bool {
            true
        }
        fn set_context(&mut self, _: &Matrix) -> bool {
            true
        }
        fn shade_row(&self, x: i32, y: i32, row: &mut [Pixel]) {
            for (i, p) in row.iter_mut().enumerate() {
                *p = Pixel::pack(255, (x + i as i32) as u32, y as u32, 0);
            }
        }
    }

    fn scanline(y: i32, spans: &[(i32, i32)]) -> Scanline {
        let mut sl = Scanline::new();
        sl.reset(y);
        for &(x1, x2) in spans {
            sl.add_span(x1, x2);
        }
        sl
    }

    #[test]
    fn spans_are_clamped_to_the_bitmap() {
        let mut bm = Bitmap::new(4, 2);
        let red = Pixel::pack(255, 255, 0, 0);
        {
            let mut ren = SpanPainter::new(&mut bm, Source::Solid(red), BlendMode::Src);
            ren.render(&scanline(1, &[(-5, 1), (3, 9)]));
            ren.render(&scanline(2, &[(0, 4)]));
            ren.render(&scanline(-1, &[(0, 4)]));
        }
        assert_eq!(bm.row(0), &[Pixel::TRANSPARENT; 4]);
        assert_eq!(bm.row(1), &[red, Pixel::TRANSPARENT, Pixel::TRANSPARENT, red]);
    }

    #[test]
    fn shader_rows_start_at_the_span() {
        let mut bm = Bitmap::new(6, 3);
        let shader = Ramp;
        {
            let mut ren = SpanPainter::new(&mut bm, Source::Shaded(&shader), BlendMode::SrcOver);
            ren.render(&scanline(2, &[(-2, 2), (4, 5)]));
        }
        assert_eq!(bm[(0, 2)], Pixel::pack(255, 0, 2, 0));
        assert_eq!(bm[(1, 2)], Pixel::pack(255, 1, 2, 0));
        assert_eq!(bm[(2, 2)], Pixel::TRANSPARENT);
        assert_eq!(bm[(4, 2)], Pixel::pack(255, 4, 2, 0));
    }
}
