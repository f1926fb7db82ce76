//! Glyph records: one per character of a batch.

use log::warn;
use pixfont_font_builder::{GlyphTransform, default_space_advance};
use pixfont_raster::{GlyphOutline, TracedGlyph};

use crate::{
    error::{Error, Result},
    status::GlyphStatus,
};

/// The traced result for one character plus its user-editable transform.
///
/// Outline and visual dimensions are fixed once tracing completes; only the
/// offsets, scale and advance width can be edited afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphRecord {
    pub(crate) ch: char,
    pub(crate) outline: GlyphOutline,
    pub(crate) visual_width: u32,
    pub(crate) visual_height: u32,
    pub(crate) max_y: Option<u32>,
    pub(crate) advance_width: u32,
    pub(crate) x_offset: f64,
    pub(crate) y_offset: f64,
    pub(crate) scale: f64,
    pub(crate) status: GlyphStatus,
}

impl GlyphRecord {
    pub fn new(ch: char) -> Self {
        Self {
            ch,
            outline: GlyphOutline::new(),
            visual_width: 0,
            visual_height: 0,
            max_y: None,
            advance_width: 0,
            x_offset: 0.0,
            y_offset: 0.0,
            scale: 1.0,
            status: GlyphStatus::Pending,
        }
    }

    pub fn ch(&self) -> char {
        self.ch
    }

    pub fn status(&self) -> &GlyphStatus {
        &self.status
    }

    /// The traced outline, only available once the record is done.
    pub fn outline(&self) -> Option<&GlyphOutline> {
        self.status.is_done().then_some(&self.outline)
    }

    pub fn visual_width(&self) -> u32 {
        self.visual_width
    }

    pub fn visual_height(&self) -> u32 {
        self.visual_height
    }

    /// Lowest foreground row in the source image, `None` for whitespace.
    pub fn max_y(&self) -> Option<u32> {
        self.max_y
    }

    /// Advance width before scaling.
    pub fn advance_width(&self) -> u32 {
        self.advance_width
    }

    pub fn x_offset(&self) -> f64 {
        self.x_offset
    }

    pub fn y_offset(&self) -> f64 {
        self.y_offset
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn transform(&self) -> GlyphTransform {
        GlyphTransform::new(self.scale, self.x_offset, self.y_offset)
    }

    /// Advance width after scaling, as written to the font.
    pub fn scaled_advance_width(&self) -> u16 {
        self.transform().advance_width(self.advance_width)
    }

    pub fn set_offsets(&mut self, x_offset: f64, y_offset: f64) {
        self.x_offset = x_offset;
        self.y_offset = y_offset;
    }

    pub fn set_scale(&mut self, scale: f64) -> Result<()> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(Error::InvalidScale(scale));
        }
        self.scale = scale;
        Ok(())
    }

    pub fn set_advance_width(&mut self, advance_width: u32) {
        self.advance_width = advance_width;
    }

    pub(crate) fn transition(&mut self, next: GlyphStatus) -> Result<()> {
        self.status.transition(next)
    }

    /// Mark the record failed and drop anything traced before.
    pub(crate) fn fail(&mut self, error: &Error) -> Result<()> {
        warn!("{error}");
        self.transition(GlyphStatus::Error { message: error.to_string() })?;
        self.outline = GlyphOutline::new();
        Ok(())
    }

    /// Store a traced outline and reset the transform to its initial values.
    pub(crate) fn apply_trace(
        &mut self,
        traced: TracedGlyph,
        max_y: Option<u32>,
        units_per_em: u16,
    ) {
        self.advance_width = if traced.width == 0 {
            u32::from(default_space_advance(units_per_em))
        } else {
            traced.width
        };
        self.outline = traced.outline;
        self.visual_width = traced.width;
        self.visual_height = traced.height;
        self.max_y = max_y;
        self.x_offset = 0.0;
        self.y_offset = f64::from(traced.y_offset);
        self.scale = 1.0;
    }
}

#[cfg(test)]
mod tests {
    use pixfont_raster::kurbo::Rect;

    use super::*;

    fn traced(width: u32, height: u32, y_offset: i32) -> TracedGlyph {
        let outline = if width == 0 {
            GlyphOutline::new()
        } else {
            GlyphOutline::from_rects([Rect::new(0.0, 0.0, f64::from(width), f64::from(height))])
        };
        TracedGlyph { outline, width, height, y_offset }
    }

    fn done(record: &mut GlyphRecord) {
        for next in [
            GlyphStatus::Fetching,
            GlyphStatus::Processing,
            GlyphStatus::Converting,
            GlyphStatus::Done,
        ] {
            record.transition(next).unwrap();
        }
    }

    #[test]
    fn test_apply_trace() {
        let mut record = GlyphRecord::new('A');
        record.apply_trace(traced(40, 60, 12), Some(88), 1000);
        done(&mut record);

        assert_eq!((record.visual_width(), record.visual_height()), (40, 60));
        assert_eq!(record.advance_width(), 40);
        assert_eq!(record.y_offset(), 12.0);
        assert_eq!(record.max_y(), Some(88));
        assert_eq!(record.outline().map(GlyphOutline::contour_count), Some(1));
    }

    #[test]
    fn test_empty_trace_gets_space_advance() {
        let mut record = GlyphRecord::new(' ');
        record.apply_trace(traced(0, 0, 0), None, 1000);
        assert_eq!(record.advance_width(), 333);
        assert_eq!(record.y_offset(), 0.0);
    }

    #[test]
    fn test_outline_hidden_until_done() {
        let mut record = GlyphRecord::new('A');
        record.apply_trace(traced(4, 4, 0), Some(3), 1000);
        assert!(record.outline().is_none());
    }

    #[test]
    fn test_fail_clears_outline() {
        let mut record = GlyphRecord::new('A');
        record.transition(GlyphStatus::Fetching).unwrap();
        record.apply_trace(traced(4, 4, 0), Some(3), 1000);
        record.fail(&Error::UnknownCharacter('A')).unwrap();

        assert_eq!(record.status().label(), "error");
        assert!(record.status().error_message().is_some());
        assert!(record.outline.is_empty());
    }

    #[test]
    fn test_set_scale_validation() {
        let mut record = GlyphRecord::new('A');
        assert!(record.set_scale(1.5).is_ok());
        assert!(matches!(record.set_scale(0.0), Err(Error::InvalidScale(_))));
        assert!(matches!(record.set_scale(-2.0), Err(Error::InvalidScale(_))));
        assert!(matches!(record.set_scale(f64::NAN), Err(Error::InvalidScale(_))));
        assert!(matches!(record.set_scale(f64::INFINITY), Err(Error::InvalidScale(_))));
        assert_eq!(record.scale(), 1.5);
    }

    #[test]
    fn test_scaled_advance_width() {
        let mut record = GlyphRecord::new('A');
        record.apply_trace(traced(101, 10, 0), Some(10), 1000);
        record.set_scale(0.5).unwrap();
        assert_eq!(record.scaled_advance_width(), 51);

        record.set_advance_width(0);
        assert_eq!(record.scaled_advance_width(), 1);
    }

    #[test]
    fn test_edits_keep_outline() {
        let mut record = GlyphRecord::new('A');
        record.apply_trace(traced(4, 4, 2), Some(3), 1000);
        done(&mut record);
        let before = record.outline().cloned();

        record.set_offsets(-10.0, 25.0);
        record.set_advance_width(900);

        assert_eq!(record.outline().cloned(), before);
        assert_eq!(record.transform(), GlyphTransform::new(1.0, -10.0, 25.0));
    }
}
