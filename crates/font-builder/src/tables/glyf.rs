//! glyf/loca construction from polygonal outlines.

use kurbo::{Point, Rect};
use log::{debug, warn};
use pixfont_raster::GlyphOutline;
use read_fonts::tables::glyf::CurvePoint;
use write_fonts::tables::{
    glyf::{Bbox, Contour, Glyf, GlyfLocaBuilder, Glyph, SimpleGlyph},
    loca::{Loca, LocaFormat},
};

use crate::{
    Result,
    document::{DocumentGlyph, FontDocument},
};

/// A glyph converted to its binary form, in final glyph order.
#[derive(Debug, Clone)]
pub(crate) struct CompiledGlyph {
    pub name: String,
    pub codepoint: Option<char>,
    pub glyph: Glyph,
    pub advance: u16,
    pub bbox: Option<Bbox>,
    pub num_points: usize,
    pub num_contours: usize,
}

impl CompiledGlyph {
    fn empty(name: &str, codepoint: Option<char>, advance: u16) -> Self {
        Self {
            name: name.to_string(),
            codepoint,
            glyph: Glyph::Empty,
            advance,
            bbox: None,
            num_points: 0,
            num_contours: 0,
        }
    }

    /// Left side bearing: the outline's x minimum, 0 for empty glyphs.
    pub fn lsb(&self) -> i16 {
        self.bbox.as_ref().map_or(0, |b| b.x_min)
    }
}

/// Why an outline could not become a glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutlineIssue {
    Empty,
    OutOfRange,
    /// More contours or points than a simple glyph can index.
    TooComplex { contours: usize, points: usize },
}

/// A simple glyph holds fewer than `i16::MAX` contours.
const MAX_CONTOURS: usize = i16::MAX as usize - 1;

/// End point indices are `u16`, so at most `u16::MAX` points.
const MAX_POINTS: usize = u16::MAX as usize;

fn to_font_unit(value: f64) -> Option<i16> {
    let rounded = value.round();
    (rounded >= f64::from(i16::MIN) && rounded <= f64::from(i16::MAX)).then_some(rounded as i16)
}

fn simple_glyph(outline: &GlyphOutline) -> std::result::Result<SimpleGlyph, OutlineIssue> {
    let contours = outline.contours();
    if contours.is_empty() {
        return Err(OutlineIssue::Empty);
    }
    let points: usize = contours.iter().map(Vec::len).sum();
    if contours.len() > MAX_CONTOURS || points > MAX_POINTS {
        return Err(OutlineIssue::TooComplex { contours: contours.len(), points });
    }

    let mut bbox: Option<Bbox> = None;
    let mut converted = Vec::with_capacity(contours.len());

    for contour in &contours {
        let mut points = Vec::with_capacity(contour.len());
        for point in contour {
            let (Some(x), Some(y)) = (to_font_unit(point.x), to_font_unit(point.y)) else {
                return Err(OutlineIssue::OutOfRange);
            };
            bbox = Some(match bbox {
                None => Bbox { x_min: x, y_min: y, x_max: x, y_max: y },
                Some(b) => Bbox {
                    x_min: b.x_min.min(x),
                    y_min: b.y_min.min(y),
                    x_max: b.x_max.max(x),
                    y_max: b.y_max.max(y),
                },
            });
            points.push(CurvePoint::new(x, y, true));
        }
        converted.push(Contour::from(points));
    }

    let Some(bbox) = bbox else {
        return Err(OutlineIssue::Empty);
    };
    Ok(SimpleGlyph { bbox, contours: converted, instructions: vec![] })
}

fn compiled_outline(
    name: String,
    codepoint: Option<char>,
    outline: &GlyphOutline,
    advance: u16,
) -> std::result::Result<CompiledGlyph, OutlineIssue> {
    let simple = simple_glyph(outline)?;
    let num_contours = simple.contours.len();
    let num_points = outline.point_count();
    let bbox = Some(simple.bbox);

    Ok(CompiledGlyph {
        name,
        codepoint,
        glyph: Glyph::Simple(simple),
        advance,
        bbox,
        num_points,
        num_contours,
    })
}

/// Production glyph name for a code point (`uniXXXX` or `uXXXXX`).
pub(crate) fn glyph_name(ch: char) -> String {
    let cp = u32::from(ch);
    if cp <= 0xFFFF { format!("uni{cp:04X}") } else { format!("u{cp:05X}") }
}

/// Compile one document glyph, or `None` (with a warning) if it has to be
/// left out of the font.
pub(crate) fn compile_glyph(ch: char, glyph: &DocumentGlyph) -> Option<CompiledGlyph> {
    if ch.is_control() {
        warn!("Skipping U+{:04X}: control characters have no glyph", u32::from(ch));
        return None;
    }

    match compiled_outline(glyph_name(ch), Some(ch), &glyph.outline, glyph.advance_width) {
        Ok(compiled) => {
            debug!(
                "Compiled {ch:?} with {} contours, advance {}",
                compiled.num_contours, compiled.advance
            );
            Some(compiled)
        }
        Err(OutlineIssue::Empty) => {
            warn!("Skipping {ch:?}: outline is empty");
            None
        }
        Err(OutlineIssue::OutOfRange) => {
            warn!("Skipping {ch:?}: outline coordinates exceed the font coordinate range");
            None
        }
        Err(OutlineIssue::TooComplex { contours, points }) => {
            warn!(
                "Skipping {ch:?}: {contours} contours with {points} points exceed the glyph limits"
            );
            None
        }
    }
}

/// The `.notdef` placeholder: a rectangular frame.
pub(crate) fn notdef_glyph(document: &FontDocument) -> CompiledGlyph {
    let upem = f64::from(document.units_per_em);
    let advance = document.notdef_advance();
    let stroke = (upem / 20.0).round();
    let outer = Rect::new(stroke, 0.0, f64::from(advance) - stroke, (upem * 0.7).round());
    let inner = outer.inset(-stroke);

    let mut outline = GlyphOutline::from_rects([outer]);
    // Counter runs the opposite way so it is not filled.
    outline.push_polygon(&[
        Point::new(inner.x0, inner.y0),
        Point::new(inner.x0, inner.y1),
        Point::new(inner.x1, inner.y1),
        Point::new(inner.x1, inner.y0),
    ]);

    compiled_outline(".notdef".to_string(), None, &outline, advance)
        .unwrap_or_else(|_| CompiledGlyph::empty(".notdef", None, advance))
}

pub(crate) fn space_glyph(document: &FontDocument) -> CompiledGlyph {
    CompiledGlyph::empty("space", Some(' '), document.space_advance())
}

/// Build the glyf and loca tables in glyph order.
pub(crate) fn build_glyf_loca(glyphs: &[CompiledGlyph]) -> Result<(Glyf, Loca, LocaFormat)> {
    let mut builder = GlyfLocaBuilder::new();
    for compiled in glyphs {
        builder.add_glyph(&compiled.glyph)?;
    }
    Ok(builder.build())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glyph_names() {
        assert_eq!(glyph_name('A'), "uni0041");
        assert_eq!(glyph_name('é'), "uni00E9");
        assert_eq!(glyph_name('😀'), "u1F600");
    }

    #[test]
    fn test_compile_rounds_and_bounds() {
        let outline = GlyphOutline::from_rects([Rect::new(0.4, -2.6, 10.5, 7.2)]);
        let glyph = DocumentGlyph { outline, advance_width: 12 };
        let compiled = compile_glyph('A', &glyph).unwrap();

        assert_eq!(compiled.num_contours, 1);
        assert_eq!(compiled.num_points, 4);
        assert_eq!(compiled.bbox, Some(Bbox { x_min: 0, y_min: -3, x_max: 11, y_max: 7 }));
        assert_eq!(compiled.lsb(), 0);
    }

    #[test]
    fn test_compile_skips_empty_outline() {
        let glyph = DocumentGlyph { outline: GlyphOutline::new(), advance_width: 100 };
        assert!(compile_glyph('A', &glyph).is_none());
    }

    #[test]
    fn test_compile_skips_control_characters() {
        let outline = GlyphOutline::from_rects([Rect::new(0.0, 0.0, 1.0, 1.0)]);
        let glyph = DocumentGlyph { outline, advance_width: 100 };
        assert!(compile_glyph('\u{7}', &glyph).is_none());
    }

    #[test]
    fn test_compile_skips_out_of_range() {
        let outline = GlyphOutline::from_rects([Rect::new(0.0, 0.0, 40000.0, 1.0)]);
        let glyph = DocumentGlyph { outline, advance_width: 100 };
        assert!(compile_glyph('A', &glyph).is_none());
    }

    /// `count` separate unit squares on a grid 128 squares wide.
    fn dots(count: usize) -> GlyphOutline {
        GlyphOutline::from_rects((0..count).map(|i| {
            let x = (2 * (i % 128)) as f64;
            let y = (2 * (i / 128)) as f64;
            Rect::new(x, y, x + 1.0, y + 1.0)
        }))
    }

    #[test]
    fn test_compile_accepts_point_limit() {
        let glyph = DocumentGlyph { outline: dots(MAX_POINTS / 4), advance_width: 100 };
        let compiled = compile_glyph('A', &glyph).unwrap();
        assert_eq!(compiled.num_contours, MAX_POINTS / 4);
        assert!(compiled.num_points <= MAX_POINTS);
    }

    #[test]
    fn test_compile_skips_too_many_points() {
        // 16,384 four-point contours is 65,536 points.
        let glyph = DocumentGlyph { outline: dots(16_384), advance_width: 100 };
        assert!(compile_glyph('A', &glyph).is_none());
    }

    #[test]
    fn test_compile_skips_too_many_contours() {
        let glyph = DocumentGlyph { outline: dots(32_767), advance_width: 100 };
        assert!(compile_glyph('A', &glyph).is_none());
    }

    #[test]
    fn test_notdef_frame() {
        let document = FontDocument::new("Test", 1000);
        let notdef = notdef_glyph(&document);

        assert_eq!(notdef.name, ".notdef");
        assert_eq!(notdef.codepoint, None);
        assert_eq!(notdef.advance, 500);
        assert_eq!(notdef.num_contours, 2);
        assert_eq!(notdef.bbox, Some(Bbox { x_min: 50, y_min: 0, x_max: 450, y_max: 700 }));
    }

    #[test]
    fn test_space_is_empty() {
        let mut document = FontDocument::new("Test", 1000);
        document.set_space_advance(280);
        let space = space_glyph(&document);

        assert!(matches!(space.glyph, Glyph::Empty));
        assert_eq!(space.codepoint, Some(' '));
        assert_eq!(space.advance, 280);
        assert_eq!(space.lsb(), 0);
    }
}
