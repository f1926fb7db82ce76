//! Error types for font assembly.

use std::result;

use write_fonts::{BuilderError, error};

/// Errors that abort font assembly.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Nothing besides `.notdef` and `space` survived glyph compilation.
    #[error("no usable glyphs to export")]
    NoGlyphs,

    #[error("font would contain {0} glyphs, the format allows at most 65535")]
    TooManyGlyphs(usize),

    #[error("unitsPerEm must be between 16 and 16384, got {0}")]
    InvalidUnitsPerEm(u16),

    #[error("family name must not be empty")]
    EmptyFamilyName,

    #[error("failed to build cmap table")]
    CmapBuild,

    #[error("failed to write font: {0}")]
    Write(#[from] error::Error),

    #[error("failed to build font: {0}")]
    Builder(#[from] BuilderError),

    #[error("invalid version '{0}', expected YYYY-MM-DD or YYYY-MM-DD.N")]
    InvalidVersion(String),
}

pub type Result<T> = result::Result<T, Error>;
