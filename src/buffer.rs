//! Bitmap
//!
//! Pixels are stored as row-major order (C-format)

use crate::color::Pixel;
use crate::error::{Error, Result};

use std::ops::Index;
use std::ops::IndexMut;

/// Bitmap of premultiplied pixels
#[derive(Debug, Clone, PartialEq)]
pub struct Bitmap {
    /// Image Width in pixels
    width: usize,
    /// Image Height in pixels
    height: usize,
    /// Pixel data of the image
    pixels: Vec<Pixel>,
}

impl Bitmap {
    /// Create a new transparent bitmap of width x height
    ///
    ///     use pixcanvas::{Bitmap, Pixel};
    ///
    ///     let bm = Bitmap::new(3, 2);
    ///     assert_eq!(bm.width(), 3);
    ///     assert_eq!(bm.height(), 2);
    ///     assert_eq!(bm[(2, 1)], Pixel::TRANSPARENT);
    ///
    pub fn new(width: usize, height: usize) -> Self {
        Bitmap { width, height, pixels: vec![Pixel::TRANSPARENT; width * height] }
    }
    /// Create a bitmap from existing pixels, in row-major order
    pub fn from_pixels(width: usize, height: usize, pixels: Vec<Pixel>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::EmptyBitmap);
        }
        if pixels.len() != width * height {
            return Err(Error::Dimensions { width, height, len: pixels.len() });
        }
        Ok(Bitmap { width, height, pixels })
    }
    /// Width in pixels
    pub fn width(&self) -> usize {
        self.width
    }
    /// Height in pixels
    pub fn height(&self) -> usize {
        self.height
    }
    /// All pixels, row after row
    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }
    /// Pixels of row `y`
    pub fn row(&self, y: usize) -> &[Pixel] {
        debug_assert!(y < self.height);
        let i = y * self.width;
        &self.pixels[i..i + self.width]
    }
    /// Mutable pixels of row `y`
    pub fn row_mut(&mut self, y: usize) -> &mut [Pixel] {
        debug_assert!(y < self.height);
        let i = y * self.width;
        &mut self.pixels[i..i + self.width]
    }
    /// Pixel at (x,y), None if outside
    pub fn get(&self, x: usize, y: usize) -> Option<Pixel> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y * self.width + x])
    }
    /// Set pixel at (x,y); locations outside the bitmap are ignored
    pub fn set(&mut self, x: usize, y: usize, p: Pixel) {
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x] = p;
        }
    }
    /// Set every pixel to `p`
    pub fn fill(&mut self, p: Pixel) {
        self.pixels.iter_mut().for_each(|v| *v = p);
    }
    /// True if every pixel has an alpha of 255
    pub fn is_opaque(&self) -> bool {
        self.pixels.iter().all(|p| p.a() == 255)
    }
}

impl Index<(usize, usize)> for Bitmap {
    type Output = Pixel;
    fn index(&self, index: (usize, usize)) -> &Pixel {
        assert!(index.0 < self.width, "request {} >= {} width :: index", index.0, self.width);
        assert!(index.1 < self.height, "request {} >= {} height :: index", index.1, self.height);
        &self.pixels[index.1 * self.width + index.0]
    }
}
impl IndexMut<(usize, usize)> for Bitmap {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut Pixel {
        assert!(index.0 < self.width, "request {} >= {} width :: index_mut", index.0, self.width);
        assert!(index.1 < self.height, "request {} >= {} height :: index_mut", index.1, self.height);
        &mut self.pixels[index.1 * self.width + index.0]
    }
}
