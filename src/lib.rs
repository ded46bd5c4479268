//! Software rasterizer
//!
//! Fills polygons and paths into a bitmap of premultiplied 8-bit pixels,
//! without anti-aliasing: a pixel is inside a shape when its center is.
//!
//! # How does this work
//!
//! ```text
//! canvas = Canvas( Bitmap )
//! canvas.draw_*(geometry, paint)
//!   EdgeBuilder  -- transform, flatten curves, clip to the device
//!     Clip.line()
//!       Edge::new()     -- drop rows-less lines, keep winding
//!     sort_edges()
//!   render_scanlines(ras, ren)
//!     sweep_scanline()  -- ConvexRasterizer or WindingRasterizer
//!     render()          -- SpanPainter
//!       shade_row()     -- Shader, if the paint has one
//!       blend proc      -- BlendMode::proc()
//! ```
//!
//! # Example
//!
//!     use pixcanvas::*;
//!
//!     let mut canvas = Canvas::new(Bitmap::new(32, 32));
//!     canvas.clear(Color::white());
//!
//!     let mut b = PathBuilder::new();
//!     b.add_circle(Point::new(16.0, 16.0), 10.0, PathDirection::Clockwise);
//!     let colors = [Color::rgb(1.0, 0.0, 0.0), Color::rgb(0.0, 0.0, 1.0)];
//!     let shader = linear_gradient(Point::new(6.0, 0.0), Point::new(26.0, 0.0),
//!                                  &colors, TileMode::Clamp).unwrap();
//!     let mut paint = Paint::from_shader(shader);
//!     canvas.draw_path(&b.build(), &mut paint);
//!
//!     let bm = canvas.bitmap();
//!     assert_eq!(bm[(0, 0)], Pixel(0xFFFF_FFFF));
//!     assert_ne!(bm[(16, 16)], Pixel(0xFFFF_FFFF));
//!

pub mod error;
pub mod math;
pub mod color;
pub mod buffer;
pub mod transform;
pub mod paths;
pub mod curves;
pub mod clip;
pub mod edge;
pub mod scan;
pub mod raster;
pub mod blend;
pub mod render;
pub mod shader;
pub mod bitmap_shader;
pub mod gradient;
pub mod triangle;
pub mod voronoi;
pub mod paint;
pub mod canvas;
pub mod io;

pub use error::{Error, Result};
pub use math::*;
pub use color::*;
pub use buffer::*;
pub use transform::*;
pub use paths::*;
pub use clip::*;
pub use edge::*;
pub use scan::*;
pub use raster::*;
pub use blend::*;
pub use render::*;
pub use shader::*;
pub use bitmap_shader::*;
pub use gradient::*;
pub use triangle::*;
pub use voronoi::*;
pub use paint::*;
pub use canvas::*;
pub use io::{img_diff, read_bitmap, write_bitmap};

/// Source of the pixels of a draw call
///
/// A draw call first calls [set_context](#tymethod.set_context) with the
/// canvas transform, then [shade_row](#tymethod.shade_row) once per span.
pub trait Shader {
    /// True if every pixel the shader produces has an alpha of 255
    fn is_opaque(&self) -> bool;
    /// Prepare for drawing under the canvas transform `ctm`
    ///
    /// Returns false if the combined transform cannot be inverted; the draw
    /// call then paints nothing.
    fn set_context(&mut self, ctm: &Matrix) -> bool;
    /// Shade the pixels `(x,y) .. (x + row.len(), y)` into `row`
    fn shade_row(&self, x: i32, y: i32, row: &mut [Pixel]);
}

/// Produces the scanlines of a shape, top to bottom
pub trait Rasterize {
    /// Fill `sl` with the next row that has spans
    ///
    /// Returns false when there are no rows left.
    fn sweep_scanline(&mut self, sl: &mut Scanline) -> bool;
}

/// Consumes scanlines
pub trait Render {
    /// Render a single Scanline Row
    fn render(&mut self, sl: &Scanline);
}
