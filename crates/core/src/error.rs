//! Error types for the batch pipeline.

use std::{io, result};

use crate::source::SourceError;

/// Errors raised by the pipeline, export and project persistence.
///
/// The per-character kinds (`Acquisition`, `Extraction`, `Trace`) never abort
/// a batch: they are logged and their message is stored on the affected
/// glyph record.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to acquire image for {ch:?}: {source}")]
    Acquisition { ch: char, source: SourceError },

    #[error("failed to extract foreground of {ch:?}: {source}")]
    Extraction { ch: char, source: pixfont_raster::Error },

    #[error("failed to trace {ch:?}: {source}")]
    Trace { ch: char, source: pixfont_raster::Error },

    /// Export failed; no font was produced.
    #[error("font assembly failed: {0}")]
    Assembly(#[from] pixfont_font_builder::Error),

    #[error("invalid status transition from {from} to {to}")]
    InvalidTransition { from: &'static str, to: &'static str },

    #[error("character {0:?} is not part of the batch")]
    UnknownCharacter(char),

    #[error("scale must be finite and greater than zero, got {0}")]
    InvalidScale(f64),

    #[error("invalid project file: {0}")]
    Project(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = result::Result<T, Error>;
