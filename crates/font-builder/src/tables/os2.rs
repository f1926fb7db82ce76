//! OS/2 table construction (version 4).

use font_types::Tag;
use write_fonts::tables::os2::{Os2, SelectionFlags};

use super::{CompiledGlyph, FontBounds};
use crate::document::FontDocument;

/// Average of the nonzero advance widths.
fn average_advance(glyphs: &[CompiledGlyph]) -> i16 {
    let advances: Vec<u32> =
        glyphs.iter().map(|g| u32::from(g.advance)).filter(|&a| a > 0).collect();
    if advances.is_empty() {
        return 0;
    }
    let sum: u32 = advances.iter().sum();
    (f64::from(sum) / advances.len() as f64).round().min(f64::from(i16::MAX)) as i16
}

/// First and last mapped code points, clamped to the BMP as OS/2 requires.
fn char_index_range(glyphs: &[CompiledGlyph]) -> (u16, u16) {
    let mut codepoints = glyphs.iter().filter_map(|g| g.codepoint).map(u32::from);
    let Some(first) = codepoints.next() else {
        return (0, 0);
    };
    let (min, max) = codepoints.fold((first, first), |(lo, hi), cp| (lo.min(cp), hi.max(cp)));
    (min.min(0xFFFF) as u16, max.min(0xFFFF) as u16)
}

pub(crate) fn build_os2(
    document: &FontDocument,
    glyphs: &[CompiledGlyph],
    bounds: &FontBounds,
) -> Os2 {
    let upem = f64::from(document.units_per_em);
    let scaled = |factor: f64| (upem * factor).round() as i16;

    let ascent = document.ascent();
    let descent = document.descent();
    let (first_char, last_char) = char_index_range(glyphs);

    Os2 {
        x_avg_char_width: average_advance(glyphs),
        us_weight_class: 400,
        us_width_class: 5,
        fs_type: 0,
        y_subscript_x_size: scaled(0.65),
        y_subscript_y_size: scaled(0.6),
        y_subscript_x_offset: 0,
        y_subscript_y_offset: scaled(0.075),
        y_superscript_x_size: scaled(0.65),
        y_superscript_y_size: scaled(0.6),
        y_superscript_x_offset: 0,
        y_superscript_y_offset: scaled(0.35),
        y_strikeout_size: scaled(0.05),
        y_strikeout_position: scaled(0.3),
        s_family_class: 0,
        panose_10: [0; 10],
        ul_unicode_range_1: 0,
        ul_unicode_range_2: 0,
        ul_unicode_range_3: 0,
        ul_unicode_range_4: 0,
        ach_vend_id: Tag::new(b"NONE"),
        fs_selection: SelectionFlags::REGULAR | SelectionFlags::USE_TYPO_METRICS,
        us_first_char_index: first_char,
        us_last_char_index: last_char,
        s_typo_ascender: ascent,
        s_typo_descender: descent,
        s_typo_line_gap: 0,
        // Clipping metrics must cover every outline.
        us_win_ascent: ascent.max(bounds.y_max).max(0) as u16,
        us_win_descent: (-i32::from(descent)).max(-i32::from(bounds.y_min)).clamp(0, 0xFFFF) as u16,
        // Version 1+ fields
        ul_code_page_range_1: Some(1), // Latin 1
        ul_code_page_range_2: Some(0),
        // Version 2+ fields (also required for version 4)
        sx_height: Some(scaled(0.5)),
        s_cap_height: Some(scaled(0.7)),
        us_default_char: Some(0),
        us_break_char: Some(0x20),
        us_max_context: Some(0),
        // Version 5+ fields
        us_lower_optical_point_size: None,
        us_upper_optical_point_size: None,
    }
}
