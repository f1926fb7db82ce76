//! Horizontal metrics: hhea and hmtx.

use font_types::{FWord, UfWord};
use write_fonts::tables::{
    hhea::Hhea,
    hmtx::{Hmtx, LongMetric},
};

use super::CompiledGlyph;
use crate::document::FontDocument;

/// Union of all glyph bounding boxes; zero when no glyph has contours.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct FontBounds {
    pub x_min: i16,
    pub y_min: i16,
    pub x_max: i16,
    pub y_max: i16,
}

impl FontBounds {
    pub fn from_glyphs(glyphs: &[CompiledGlyph]) -> Self {
        glyphs
            .iter()
            .filter_map(|g| g.bbox.as_ref())
            .fold(None, |acc: Option<Self>, b| {
                Some(match acc {
                    None => Self { x_min: b.x_min, y_min: b.y_min, x_max: b.x_max, y_max: b.y_max },
                    Some(a) => Self {
                        x_min: a.x_min.min(b.x_min),
                        y_min: a.y_min.min(b.y_min),
                        x_max: a.x_max.max(b.x_max),
                        y_max: a.y_max.max(b.y_max),
                    },
                })
            })
            .unwrap_or_default()
    }
}

pub(crate) fn build_hmtx(glyphs: &[CompiledGlyph]) -> Hmtx {
    let h_metrics = glyphs
        .iter()
        .map(|g| LongMetric { advance: g.advance, side_bearing: g.lsb() })
        .collect();

    Hmtx { h_metrics, left_side_bearings: vec![] }
}

pub(crate) fn build_hhea(document: &FontDocument, glyphs: &[CompiledGlyph]) -> Hhea {
    let advance_width_max = glyphs.iter().map(|g| g.advance).max().unwrap_or(0);

    // Side bearings and extents only consider glyphs with contours.
    let outlined = || glyphs.iter().filter_map(|g| g.bbox.as_ref().map(|b| (g.advance, b)));
    let min_lsb = outlined().map(|(_, b)| b.x_min).min().unwrap_or(0);
    let min_rsb = outlined()
        .map(|(advance, b)| (i32::from(advance) - i32::from(b.x_max)).clamp(-32768, 32767) as i16)
        .min()
        .unwrap_or(0);
    let x_max_extent = outlined().map(|(_, b)| b.x_max).max().unwrap_or(0);

    Hhea {
        ascender: FWord::new(document.ascent()),
        descender: FWord::new(document.descent()),
        line_gap: FWord::new(0),
        advance_width_max: UfWord::new(advance_width_max),
        min_left_side_bearing: FWord::new(min_lsb),
        min_right_side_bearing: FWord::new(min_rsb),
        x_max_extent: FWord::new(x_max_extent),
        caret_slope_rise: 1,
        caret_slope_run: 0,
        caret_offset: 0,
        number_of_h_metrics: glyphs.len() as u16,
    }
}
