//! Errors
//!
//! Drawing itself never fails; degenerate geometry renders nothing.
//! Only building bitmaps and moving them to and from files can fail.

/// Result alias used by the fallible parts of the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Errors from bitmap construction and image files
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Image could not be decoded or encoded
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// Underlying file error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Pixel data does not match the requested size
    #[error("{len} pixels cannot fill a {width}x{height} bitmap")]
    Dimensions {
        width: usize,
        height: usize,
        len: usize,
    },

    /// Zero width or height
    #[error("bitmap must have a non-zero width and height")]
    EmptyBitmap,
}
