//! Export: glyph records to a font binary.

use log::{debug, info};
use pixfont_font_builder::{AssembleOptions, Assembler, FontDocument, default_space_advance};

use crate::{error::Result, record::GlyphRecord};

/// Build a font document from records. Records that are not done are left out.
///
/// A done space record only contributes its scaled advance width; every other
/// character contributes its transformed outline.
pub fn build_document<'a>(
    family_name: &str,
    units_per_em: u16,
    records: impl IntoIterator<Item = &'a GlyphRecord>,
) -> FontDocument {
    let mut document = FontDocument::new(family_name, units_per_em);
    for record in records {
        let Some(outline) = record.outline() else {
            debug!("Leaving out {:?} ({})", record.ch, record.status.label());
            continue;
        };
        let transform = record.transform();
        let advance = transform.advance_width(record.advance_width);
        if record.ch == ' ' {
            document.set_space_advance(advance);
        } else {
            document.insert_glyph(record.ch, transform.apply(outline), advance);
        }
    }
    debug!(
        "Document has {} glyphs, space advance {} (default {})",
        document.glyph_count(),
        document.space_advance(),
        default_space_advance(units_per_em)
    );
    document
}

/// Assemble `document` into a font binary.
///
/// Failure leaves nothing behind: the caller only ever sees complete bytes.
pub fn export(document: &FontDocument, options: &AssembleOptions) -> Result<Vec<u8>> {
    let bytes = Assembler::new(options.clone()).assemble(document)?;
    info!("Exported '{}' ({} bytes)", document.family_name, bytes.len());
    Ok(bytes)
}
