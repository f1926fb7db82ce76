//! cmap table construction.

use font_types::GlyphId;
use write_fonts::tables::cmap::Cmap;

use super::CompiledGlyph;
use crate::{Error, Result};

/// Map every glyph with a code point to its index in `glyphs`.
pub(crate) fn build_cmap(glyphs: &[CompiledGlyph]) -> Result<Cmap> {
    let mappings = glyphs
        .iter()
        .enumerate()
        .filter_map(|(gid, glyph)| glyph.codepoint.map(|ch| (ch, GlyphId::new(gid as u32))));

    Cmap::from_mappings(mappings).map_err(|_| Error::CmapBuild)
}
