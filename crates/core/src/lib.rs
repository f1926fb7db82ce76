//! pixfont core: rendered character images in, pixel outline font out.
//!
//! A [`Batch`] fetches one bitmap per character from an [`ImageSource`],
//! strips the background, calibrates a shared baseline, and traces every
//! character into a [`GlyphRecord`]. The records can be edited, saved as a
//! [`Project`] and exported to a TrueType binary.

pub mod config;
mod error;
mod export;
mod pipeline;
mod project;
mod record;
mod source;
mod status;

pub use config::BatchConfig;
pub use error::{Error, Result};
pub use export::{build_document, export};
pub use pipeline::{Batch, BatchSummary, Progress, Stage};
pub use pixfont_font_builder::{AssembleOptions, FontDocument, FontVersion};
pub use project::{Project, ProjectGlyph};
pub use record::GlyphRecord;
pub use source::{DirectoryImageSource, HttpImageSource, ImageSource, SourceError};
pub use status::GlyphStatus;
