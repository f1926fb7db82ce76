//! # Raster glyph processing
//!
//! Turns rendered character bitmaps into rectilinear glyph outlines.
//!
//! The work is split into three steps that mirror how a batch is processed:
//!
//! 1. [`extract_foreground`] strips the background color and crops each bitmap
//!    to the tight bounding box of its foreground pixels.
//! 2. [`calibrate_baseline`] picks one shared baseline row for the whole batch
//!    from the bottom rows of every cropped character.
//! 3. [`trace_character`] scans the cropped bitmap into a [`GlyphOutline`] and
//!    places it vertically against the shared baseline.
//!
//! ## Example
//!
//! ```no_run
//! use pixfont_raster::{
//!     Background, TraceOptions, calibrate_baseline, extract_foreground, trace_character,
//! };
//!
//! let image = image::open("A.png").unwrap().to_rgba8();
//! let character = extract_foreground(image, &Background::WHITE).unwrap();
//! let baseline = calibrate_baseline([&character], 800);
//! let traced = trace_character(&character, baseline, &TraceOptions::default()).unwrap();
//! println!("{}", traced.outline.to_path_string());
//! ```

mod baseline;
mod error;
mod extract;
mod outline;
mod trace;

pub use baseline::{calibrate_baseline, fallback_baseline, mode};
pub use error::{Error, Result};
pub use extract::{Background, BoundingBox, ProcessedCharacter, extract_foreground};
pub use outline::GlyphOutline;
pub use trace::{
    ALPHA_THRESHOLD, TraceOptions, TracedGlyph, is_opaque, trace_character, trace_outline,
    vertical_offset,
};

// Re-exported so callers hand us the same image and geometry types.
pub use image;
pub use kurbo;
