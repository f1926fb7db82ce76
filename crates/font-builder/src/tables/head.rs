//! head table construction.

use write_fonts::tables::{
    head::{Flags, Head, MacStyle},
    loca::LocaFormat,
};

use super::FontBounds;
use crate::document::FontDocument;

/// Baseline at y=0 and left sidebearing point at x=0.
const HEAD_FLAGS: u16 = 0b11;

/// Smallest readable size in pixels per em.
const LOWEST_REC_PPEM: u16 = 8;

pub(crate) fn build_head(
    document: &FontDocument,
    bounds: &FontBounds,
    loca_format: LocaFormat,
) -> Head {
    let timestamp = document.version.timestamp();

    Head {
        font_revision: document.version.revision(),
        checksum_adjustment: 0, // Will be recomputed on write
        magic_number: 0x5F0F3CF5,
        flags: Flags::from_bits_truncate(HEAD_FLAGS),
        units_per_em: document.units_per_em,
        created: timestamp,
        modified: timestamp,
        x_min: bounds.x_min,
        y_min: bounds.y_min,
        x_max: bounds.x_max,
        y_max: bounds.y_max,
        mac_style: MacStyle::empty(),
        lowest_rec_ppem: LOWEST_REC_PPEM,
        font_direction_hint: 2,
        index_to_loc_format: match loca_format {
            LocaFormat::Short => 0,
            LocaFormat::Long => 1,
        },
    }
}
