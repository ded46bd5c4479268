//! Paint

use crate::blend::BlendMode;
use crate::color::Color;
use crate::Shader;

use std::fmt;

/// How a draw call colors its pixels
///
/// The shader, when present, is the source of every pixel and the color is
/// ignored.
///
///     use pixcanvas::{BlendMode, Color, Paint};
///
///     let p = Paint::new(Color::rgb(0.0, 0.5, 1.0)).with_blend_mode(BlendMode::Xor);
///     assert_eq!(p.blend_mode, BlendMode::Xor);
///     assert!(p.shader.is_none());
///
#[derive(Default)]
pub struct Paint {
    pub color: Color,
    pub blend_mode: BlendMode,
    pub shader: Option<Box<dyn Shader>>,
}

impl Paint {
    /// Solid color paint blended with SrcOver
    pub fn new(color: Color) -> Self {
        Paint { color, blend_mode: BlendMode::SrcOver, shader: None }
    }
    /// Paint sourcing its pixels from `shader`
    pub fn from_shader(shader: Box<dyn Shader>) -> Self {
        Paint::new(Color::black()).with_shader(shader)
    }
    pub fn with_blend_mode(mut self, mode: BlendMode) -> Self {
        self.blend_mode = mode;
        self
    }
    pub fn with_shader(mut self, shader: Box<dyn Shader>) -> Self {
        self.shader = Some(shader);
        self
    }
    /// Alpha shared by every source pixel, if known before drawing
    ///
    /// A solid color always knows its alpha. A shader only knows it is 255
    /// when it reports itself opaque.
    pub fn known_alpha(&self) -> Option<u32> {
        match self.shader {
            Some(ref s) => known_shader_alpha(&**s),
            None => Some(self.color.alpha8()),
        }
    }
}

/// 255 for opaque shaders, unknown otherwise
pub fn known_shader_alpha(s: &dyn Shader) -> Option<u32> {
    if s.is_opaque() {
        Some(255)
    } else {
        None
    }
}

impl fmt::Debug for Paint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Paint")
            .field("color", &self.color)
            .field("blend_mode", &self.blend_mode)
            .field("shader", &self.shader.as_ref().map(|s| if s.is_opaque() { "opaque" } else { "translucent" }))
            .finish()
    }
}
