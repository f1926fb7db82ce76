//! post table construction (version 2.0, with glyph names).

use font_types::FWord;
use write_fonts::tables::post::Post;

use super::CompiledGlyph;
use crate::document::FontDocument;

pub(crate) fn build_post(document: &FontDocument, glyphs: &[CompiledGlyph]) -> Post {
    let upem = f64::from(document.units_per_em);
    let mut post = Post::new_v2(glyphs.iter().map(|g| g.name.as_str()));
    post.underline_position = FWord::new(-((upem * 0.1).round() as i16));
    post.underline_thickness = FWord::new((upem * 0.05).round() as i16);
    post
}
