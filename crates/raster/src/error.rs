//! Error types for bitmap processing and outline tracing.

use std::result;

/// Errors that can occur while extracting, tracing or parsing glyph outlines.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The source image has a zero dimension and cannot be scanned.
    #[error("image has no pixels ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },

    /// The bitmap handed to the tracer has a zero dimension.
    #[error("bitmap has no pixels to trace ({width}x{height})")]
    EmptyBitmap { width: u32, height: u32 },

    /// A bitmap is too large for outline coordinates.
    #[error("bitmap of {width}x{height} exceeds the traceable size")]
    BitmapTooLarge { width: u32, height: u32 },

    #[error("invalid path data: {0}")]
    PathSyntax(#[from] kurbo::SvgParseError),

    /// Only polygonal outlines are representable.
    #[error("path contains curve segments")]
    CurvedPath,
}

pub type Result<T> = result::Result<T, Error>;
