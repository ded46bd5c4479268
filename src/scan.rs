//! Scanlines
//!
//! Output of a rasterizer for a single row: a list of fully covered
//! horizontal spans.

/// Horizontal run of pixels `x .. x + len`
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Span {
    pub x: i32,
    pub len: i32,
}

impl Span {
    /// One past the last pixel
    pub fn end(&self) -> i32 {
        self.x + self.len
    }
}

/// Spans on row `y`
///
/// Spans are stored as produced, ordered left to right; adjacent spans are
/// not merged.
#[derive(Debug, Default)]
pub struct Scanline {
    pub y: i32,
    pub spans: Vec<Span>,
}

impl Scanline {
    pub fn new() -> Self {
        Self::default()
    }
    /// Remove all spans and move to row `y`
    pub fn reset(&mut self, y: i32) {
        self.y = y;
        self.spans.clear();
    }
    pub fn num_spans(&self) -> usize {
        self.spans.len()
    }
    /// Add the span `x1 .. x2`; empty or inverted spans are ignored
    pub fn add_span(&mut self, x1: i32, x2: i32) {
        if x2 > x1 {
            self.spans.push(Span { x: x1, len: x2 - x1 });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_spans_are_dropped() {
        let mut sl = Scanline::new();
        sl.reset(4);
        sl.add_span(3, 3);
        sl.add_span(5, 2);
        assert_eq!(sl.num_spans(), 0);
        sl.add_span(1, 4);
        sl.add_span(4, 6);
        assert_eq!(sl.spans, vec![Span { x: 1, len: 3 }, Span { x: 4, len: 2 }]);
        assert_eq!(sl.spans[1].end(), 6);
        sl.reset(5);
        assert_eq!((sl.y, sl.num_spans()), (5, 0));
    }
}
