//! Per-glyph scale and offset.

use pixfont_raster::GlyphOutline;

/// Scale and translation applied to one glyph at export time.
///
/// Scaling happens about the outline's own origin (its bottom-left corner)
/// and strictly before translation, so offsets are never scaled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphTransform {
    pub scale: f64,
    /// Horizontal translation in font units.
    pub x_offset: f64,
    /// Vertical translation in font units relative to the baseline, positive up.
    pub y_offset: f64,
}

impl Default for GlyphTransform {
    fn default() -> Self {
        Self { scale: 1.0, x_offset: 0.0, y_offset: 0.0 }
    }
}

impl GlyphTransform {
    pub fn new(scale: f64, x_offset: f64, y_offset: f64) -> Self {
        Self { scale, x_offset, y_offset }
    }

    pub fn apply(&self, outline: &GlyphOutline) -> GlyphOutline {
        outline.transformed(self.scale, self.x_offset, self.y_offset)
    }

    pub fn advance_width(&self, base: u32) -> u16 {
        scaled_advance_width(base, self.scale)
    }
}

/// `max(1, round(base * scale))`, saturated to the `u16` range.
pub fn scaled_advance_width(base: u32, scale: f64) -> u16 {
    let scaled = (f64::from(base) * scale).round();
    // f64::max ignores NaN, so a degenerate scale still yields 1.
    scaled.max(1.0).min(f64::from(u16::MAX)) as u16
}

/// Advance width of the space glyph when the batch has no space of its own.
pub const fn default_space_advance(units_per_em: u16) -> u16 {
    units_per_em / 3
}
