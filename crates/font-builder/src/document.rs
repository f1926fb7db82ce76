//! The in-memory description of a font to export.

use indexmap::IndexMap;
use pixfont_raster::GlyphOutline;

use crate::{
    error::{Error, Result},
    transform::default_space_advance,
    version::FontVersion,
};

/// Style label written to the subfamily name records.
pub const STYLE_NAME: &str = "Regular";

/// PostScript family used when the family name has no usable ASCII.
const FALLBACK_POSTSCRIPT_FAMILY: &str = "PixFont";

/// A glyph ready for assembly: transformed outline plus advance width.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentGlyph {
    pub outline: GlyphOutline,
    pub advance_width: u16,
}

/// Everything needed to build one font binary.
///
/// Glyphs are kept in insertion order, which becomes the glyph order after
/// the mandatory `.notdef` and `space` glyphs.
#[derive(Debug, Clone)]
pub struct FontDocument {
    pub family_name: String,
    pub units_per_em: u16,
    pub version: FontVersion,
    glyphs: IndexMap<char, DocumentGlyph>,
    space_advance: Option<u16>,
}

impl FontDocument {
    pub fn new(family_name: impl Into<String>, units_per_em: u16) -> Self {
        Self {
            family_name: family_name.into(),
            units_per_em,
            version: FontVersion::default(),
            glyphs: IndexMap::new(),
            space_advance: None,
        }
    }

    pub fn with_version(mut self, version: FontVersion) -> Self {
        self.version = version;
        self
    }

    /// `round(0.85 * unitsPerEm)`.
    pub fn ascent(&self) -> i16 {
        (f64::from(self.units_per_em) * 0.85).round() as i16
    }

    /// `-round(0.15 * unitsPerEm)`.
    pub fn descent(&self) -> i16 {
        -((f64::from(self.units_per_em) * 0.15).round() as i16)
    }

    /// Add or replace the glyph for `ch`. Replacing keeps the original position.
    pub fn insert_glyph(&mut self, ch: char, outline: GlyphOutline, advance_width: u16) {
        self.glyphs.insert(ch, DocumentGlyph { outline, advance_width });
    }

    pub fn glyph(&self, ch: char) -> Option<&DocumentGlyph> {
        self.glyphs.get(&ch)
    }

    pub fn glyphs(&self) -> impl Iterator<Item = (char, &DocumentGlyph)> {
        self.glyphs.iter().map(|(ch, glyph)| (*ch, glyph))
    }

    pub fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }

    /// Use an explicit advance width for the synthetic space glyph.
    pub fn set_space_advance(&mut self, advance: u16) {
        self.space_advance = Some(advance);
    }

    /// The explicit space advance if one was set, else `floor(unitsPerEm / 3)`.
    pub fn space_advance(&self) -> u16 {
        self.space_advance.unwrap_or_else(|| default_space_advance(self.units_per_em))
    }

    /// `round(unitsPerEm / 2)`.
    pub fn notdef_advance(&self) -> u16 {
        (f64::from(self.units_per_em) / 2.0).round() as u16
    }

    /// PostScript-safe family name: printable ASCII without spaces or the
    /// characters reserved by the PostScript syntax. Falls back to `PixFont`
    /// when nothing is left.
    pub fn postscript_family(&self) -> String {
        let family: String = self
            .family_name
            .chars()
            .filter(|c| c.is_ascii_graphic() && !"[](){}<>/%".contains(*c))
            .collect();
        if family.is_empty() { FALLBACK_POSTSCRIPT_FAMILY.to_string() } else { family }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if !(16..=16384).contains(&self.units_per_em) {
            return Err(Error::InvalidUnitsPerEm(self.units_per_em));
        }
        if self.family_name.trim().is_empty() {
            return Err(Error::EmptyFamilyName);
        }
        Ok(())
    }
}
