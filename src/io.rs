//! Reading and writing of image files
//!
//! Files hold straight (not premultiplied) RGBA; pixels are premultiplied
//! on the way in and unpremultiplied on the way out. Formats are those of
//! the `image` crate, chosen by file extension.

use crate::buffer::Bitmap;
use crate::color::Pixel;
use crate::error::Result;

use log::debug;

use std::path::Path;

/// Decode an image file into a bitmap
pub fn read_bitmap<P: AsRef<Path>>(filename: P) -> Result<Bitmap> {
    let img = image::open(filename)?.to_rgba8();
    let (w, h) = img.dimensions();
    let pixels = img.pixels().map(|p| Pixel::from_rgba8(p.0)).collect();
    Bitmap::from_pixels(w as usize, h as usize, pixels)
}

/// Encode a bitmap into an image file
pub fn write_bitmap<P: AsRef<Path>>(bitmap: &Bitmap, filename: P) -> Result<()> {
    let buf: Vec<u8> = bitmap.pixels().iter().flat_map(|p| p.to_rgba8()).collect();
    image::save_buffer(filename, &buf, bitmap.width() as u32, bitmap.height() as u32,
                       image::ExtendedColorType::Rgba8)?;
    Ok(())
}

/// Compare two image files pixel by pixel
pub fn img_diff<P: AsRef<Path>>(f1: P, f2: P) -> Result<bool> {
    let a = image::open(f1)?.to_rgba8();
    let b = image::open(f2)?.to_rgba8();
    if a.dimensions() != b.dimensions() {
        debug!("image sizes differ: {:?} {:?}", a.dimensions(), b.dimensions());
        return Ok(false);
    }
    let mut same = true;
    for (x, y, p) in a.enumerate_pixels() {
        let q = b.get_pixel(x, y);
        if p != q {
            debug!("({},{}): {:?} {:?}", x, y, p.0, q.0);
            same = false;
        }
    }
    Ok(same)
}
