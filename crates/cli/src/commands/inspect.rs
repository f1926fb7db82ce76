use std::path::Path;

use anyhow::{Context, Result};
use read_fonts::{FontRef, TableProvider, types::GlyphId};

use crate::io::FontFile;

fn family_name(font: &FontRef) -> Option<String> {
    let name = font.name().ok()?;
    name.name_record()
        .iter()
        .find(|record| record.name_id().to_u16() == 1)
        .and_then(|record| record.string(name.string_data()).ok())
        .map(|s| s.to_string())
}

pub fn inspect(path: &Path) -> Result<()> {
    let data = FontFile::new(path).read()?;
    let font = FontRef::new(&data).context("Failed to parse font")?;

    let head = font.head().context("Missing head table")?;
    let hhea = font.hhea().context("Missing hhea table")?;
    let maxp = font.maxp().context("Missing maxp table")?;
    let hmtx = font.hmtx().context("Missing hmtx table")?;
    let cmap = font.cmap().context("Missing cmap table")?;

    println!("{}", path.display());
    println!("  Family:       {}", family_name(&font).unwrap_or_default());
    println!("  Glyphs:       {}", maxp.num_glyphs());
    println!("  Units per em: {}", head.units_per_em());
    println!("  Ascender:     {}", hhea.ascender().to_i16());
    println!("  Descender:    {}", hhea.descender().to_i16());
    println!(
        "  Bounds:       ({}, {}) - ({}, {})",
        head.x_min(),
        head.y_min(),
        head.x_max(),
        head.y_max()
    );

    let mut mappings: Vec<(u32, GlyphId)> = Vec::new();
    for record in cmap.encoding_records() {
        if let Ok(subtable) = record.subtable(cmap.offset_data()) {
            mappings.extend(subtable.iter());
            break;
        }
    }
    mappings.sort_unstable();

    println!("  Mapped characters: {}", mappings.len());
    for (codepoint, gid) in mappings {
        let ch = char::from_u32(codepoint).map(|c| format!("{c:?}")).unwrap_or_default();
        let advance = hmtx.advance(gid).unwrap_or(0);
        println!("    U+{codepoint:04X} {ch:<6} gid {:<5} advance {advance}", gid.to_u32());
    }
    Ok(())
}
