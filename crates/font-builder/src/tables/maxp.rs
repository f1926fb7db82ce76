//! maxp table construction (version 1.0, TrueType outlines).

use write_fonts::tables::maxp::Maxp;

use super::CompiledGlyph;

pub(crate) fn build_maxp(glyphs: &[CompiledGlyph]) -> Maxp {
    let max_points = glyphs.iter().map(|g| g.num_points).max().unwrap_or(0);
    let max_contours = glyphs.iter().map(|g| g.num_contours).max().unwrap_or(0);

    Maxp {
        num_glyphs: glyphs.len() as u16,
        max_points: Some(max_points.min(usize::from(u16::MAX)) as u16),
        max_contours: Some(max_contours.min(usize::from(u16::MAX)) as u16),
        max_composite_points: Some(0),
        max_composite_contours: Some(0),
        max_zones: Some(1),
        max_twilight_points: Some(0),
        max_storage: Some(0),
        max_function_defs: Some(0),
        max_instruction_defs: Some(0),
        max_stack_elements: Some(0),
        max_size_of_instructions: Some(0),
        max_component_elements: Some(0),
        max_component_depth: Some(0),
    }
}
