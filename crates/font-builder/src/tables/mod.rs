//! sfnt table builders.
//!
//! Every builder works from the same compiled glyph list, whose order is the
//! final glyph order: `.notdef`, `space`, then the document glyphs.

mod cmap;
mod glyf;
mod head;
mod maxp;
mod metrics;
mod name;
mod os2;
mod post;

pub(crate) use cmap::build_cmap;
pub(crate) use glyf::{CompiledGlyph, build_glyf_loca, compile_glyph, notdef_glyph, space_glyph};
pub(crate) use head::build_head;
pub(crate) use maxp::build_maxp;
pub(crate) use metrics::{FontBounds, build_hhea, build_hmtx};
pub(crate) use name::build_name;
pub(crate) use os2::build_os2;
pub(crate) use post::build_post;
