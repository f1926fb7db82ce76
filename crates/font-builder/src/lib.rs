//! Font assembly for pixel-traced glyphs
//!
//! Turns rectilinear glyph outlines into a TrueType font binary with `glyf`,
//! `loca`, `cmap`, horizontal metrics, `head`, `OS/2`, `name` and `post`
//! tables.
//!
//! # Example
//!
//! ```no_run
//! use pixfont_font_builder::{FontDocument, GlyphTransform, assemble};
//! use pixfont_raster::{GlyphOutline, kurbo::Rect};
//!
//! let outline = GlyphOutline::from_rects([Rect::new(0.0, 0.0, 400.0, 700.0)]);
//! let transform = GlyphTransform::new(1.0, 50.0, 0.0);
//!
//! let mut document = FontDocument::new("Blocky", 1000);
//! document.insert_glyph('I', transform.apply(&outline), transform.advance_width(500));
//! let bytes = assemble(&document)?;
//! std::fs::write("Blocky-Regular.ttf", bytes)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod assembler;
mod document;
mod error;
mod options;
mod tables;
mod transform;
mod version;

pub use assembler::{Assembler, assemble};
pub use document::{DocumentGlyph, FontDocument, STYLE_NAME};
pub use error::{Error, Result};
pub use options::AssembleOptions;
pub use transform::{GlyphTransform, default_space_advance, scaled_advance_width};
pub use version::FontVersion;
