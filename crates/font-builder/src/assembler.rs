//! Font assembly: document glyphs to a TrueType binary.

use std::time::Instant;

use log::{debug, info};
use rayon::prelude::*;
use write_fonts::FontBuilder;

use crate::{
    document::{DocumentGlyph, FontDocument},
    error::{Error, Result},
    options::AssembleOptions,
    tables::{
        CompiledGlyph, FontBounds, build_cmap, build_glyf_loca, build_head, build_hhea,
        build_hmtx, build_maxp, build_name, build_os2, build_post, compile_glyph, notdef_glyph,
        space_glyph,
    },
};

/// Maximum number of glyphs a TrueType font can hold.
const MAX_GLYPHS: usize = u16::MAX as usize;

/// Builds font binaries from [`FontDocument`]s.
///
/// Assembly is a pure function of the document: the same document (including
/// its version) always produces the same bytes.
#[derive(Debug, Clone, Default)]
pub struct Assembler {
    options: AssembleOptions,
}

impl Assembler {
    pub fn new(options: AssembleOptions) -> Self {
        Self { options }
    }

    /// Build the font binary for `document`.
    pub fn assemble(&self, document: &FontDocument) -> Result<Vec<u8>> {
        let start = Instant::now();
        document.validate()?;

        let glyphs = self.compile_glyphs(document)?;
        self.log_step("Compiled glyphs", start);

        let bytes = build_font(document, &glyphs)?;
        info!(
            "Assembled '{}' with {} glyphs ({} bytes) in {:.2?}",
            document.family_name,
            glyphs.len(),
            bytes.len(),
            start.elapsed()
        );
        Ok(bytes)
    }

    /// Final glyph list: `.notdef`, `space`, then every document glyph that
    /// compiles, in document order.
    fn compile_glyphs(&self, document: &FontDocument) -> Result<Vec<CompiledGlyph>> {
        // The space character is always represented by the synthetic glyph.
        let entries: Vec<(char, &DocumentGlyph)> =
            document.glyphs().filter(|(ch, _)| *ch != ' ').collect();

        // collect() on an indexed parallel iterator keeps the input order.
        let compiled: Vec<CompiledGlyph> = if self.options.parallel {
            entries.par_iter().filter_map(|(ch, glyph)| compile_glyph(*ch, glyph)).collect()
        } else {
            entries.iter().filter_map(|(ch, glyph)| compile_glyph(*ch, glyph)).collect()
        };

        if compiled.is_empty() {
            return Err(Error::NoGlyphs);
        }
        debug!("{} of {} document glyphs compiled", compiled.len(), entries.len());

        let mut glyphs = Vec::with_capacity(compiled.len() + 2);
        glyphs.push(notdef_glyph(document));
        glyphs.push(space_glyph(document));
        glyphs.extend(compiled);

        if glyphs.len() > MAX_GLYPHS {
            return Err(Error::TooManyGlyphs(glyphs.len()));
        }
        Ok(glyphs)
    }

    fn log_step(&self, step: &str, start: Instant) {
        if self.options.timing {
            info!("{step}: {:.2?}", start.elapsed());
        }
    }
}

fn build_font(document: &FontDocument, glyphs: &[CompiledGlyph]) -> Result<Vec<u8>> {
    let (glyf, loca, loca_format) = build_glyf_loca(glyphs)?;
    let bounds = FontBounds::from_glyphs(glyphs);

    let head = build_head(document, &bounds, loca_format);
    let hhea = build_hhea(document, glyphs);
    let maxp = build_maxp(glyphs);
    let os2 = build_os2(document, glyphs, &bounds);
    let hmtx = build_hmtx(glyphs);
    let cmap = build_cmap(glyphs)?;
    let name = build_name(document);
    let post = build_post(document, glyphs);

    let mut builder = FontBuilder::new();
    builder.add_table(&head)?;
    builder.add_table(&hhea)?;
    builder.add_table(&maxp)?;
    builder.add_table(&os2)?;
    builder.add_table(&hmtx)?;
    builder.add_table(&cmap)?;
    builder.add_table(&glyf)?;
    builder.add_table(&loca)?;
    builder.add_table(&name)?;
    builder.add_table(&post)?;

    Ok(builder.build())
}

/// Assemble `document` with default options.
pub fn assemble(document: &FontDocument) -> Result<Vec<u8>> {
    Assembler::default().assemble(document)
}
