//! Scanline tracing of bitmaps into rectilinear outlines.
//!
//! Every horizontal run of opaque pixels becomes one closed rectangle in a
//! coordinate system local to the cropped bitmap: origin at the bottom-left,
//! y increasing upward, one unit per pixel. The conversion is lossless; no
//! curve fitting is attempted.

use std::collections::HashMap;

use image::{Rgba, RgbaImage};
use kurbo::Rect;
use log::debug;

use crate::{
    error::{Error, Result},
    extract::ProcessedCharacter,
    outline::GlyphOutline,
};

/// Pixels with alpha strictly above this value are opaque.
pub const ALPHA_THRESHOLD: u8 = 128;

/// Largest bitmap dimension accepted by the tracer.
const MAX_DIMENSION: u32 = i16::MAX as u32;

/// Options for [`trace_outline`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TraceOptions {
    /// Merge rectangles that cover the same columns in consecutive rows.
    /// Changes the contour count but never the covered area.
    pub merge_vertical_runs: bool,
}

impl TraceOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn merge_vertical_runs(mut self, merge: bool) -> Self {
        self.merge_vertical_runs = merge;
        self
    }
}

/// A traced character: outline, visual size and vertical placement.
#[derive(Debug, Clone, PartialEq)]
pub struct TracedGlyph {
    pub outline: GlyphOutline,
    pub width: u32,
    pub height: u32,
    /// Translation from the outline's bottom edge to the baseline, positive up.
    pub y_offset: i32,
}

pub fn is_opaque(pixel: &Rgba<u8>) -> bool {
    pixel.0[3] > ALPHA_THRESHOLD
}

/// Offset that puts the character's bottom row on the shared baseline.
/// Empty characters are never moved.
pub fn vertical_offset(character: &ProcessedCharacter, baseline: u32) -> i32 {
    match character.max_y() {
        Some(max_y) => baseline as i32 - max_y as i32,
        None => 0,
    }
}

/// A run of opaque pixels spanning `x0..=x1` on rows `top..=bottom`.
#[derive(Debug, Clone, Copy)]
struct Span {
    x0: u32,
    x1: u32,
    top: u32,
    bottom: u32,
}

impl Span {
    fn to_rect(self, height: u32) -> Rect {
        Rect::new(
            f64::from(self.x0),
            f64::from(height - 1 - self.bottom),
            f64::from(self.x1 + 1),
            f64::from(height - self.top),
        )
    }
}

fn row_runs(bitmap: &RgbaImage, row: u32) -> Vec<(u32, u32)> {
    let mut runs = Vec::new();
    let mut start: Option<u32> = None;

    for x in 0..bitmap.width() {
        match (is_opaque(bitmap.get_pixel(x, row)), start) {
            (true, None) => start = Some(x),
            (false, Some(x0)) => {
                runs.push((x0, x - 1));
                start = None;
            }
            _ => {}
        }
    }
    if let Some(x0) = start {
        runs.push((x0, bitmap.width() - 1));
    }

    runs
}

/// Trace the opaque pixels of `bitmap` into a rectilinear outline.
pub fn trace_outline(bitmap: &RgbaImage, options: &TraceOptions) -> Result<GlyphOutline> {
    let (width, height) = bitmap.dimensions();
    if width == 0 || height == 0 {
        return Err(Error::EmptyBitmap { width, height });
    }
    if width > MAX_DIMENSION || height > MAX_DIMENSION {
        return Err(Error::BitmapTooLarge { width, height });
    }

    let mut spans: Vec<Span> = Vec::new();
    // Spans ending on the previous row, keyed by column range.
    let mut open: HashMap<(u32, u32), usize> = HashMap::new();

    for row in 0..height {
        let mut next_open = HashMap::new();
        for (x0, x1) in row_runs(bitmap, row) {
            let continued = options
                .merge_vertical_runs
                .then(|| open.get(&(x0, x1)).copied())
                .flatten();

            let idx = match continued {
                Some(idx) => {
                    spans[idx].bottom = row;
                    idx
                }
                None => {
                    spans.push(Span { x0, x1, top: row, bottom: row });
                    spans.len() - 1
                }
            };
            next_open.insert((x0, x1), idx);
        }
        open = next_open;
    }

    debug!("Traced {width}x{height} bitmap into {} rectangles", spans.len());

    Ok(GlyphOutline::from_rects(spans.into_iter().map(|span| span.to_rect(height))))
}

/// Trace a processed character and place it against `baseline`.
pub fn trace_character(
    character: &ProcessedCharacter,
    baseline: u32,
    options: &TraceOptions,
) -> Result<TracedGlyph> {
    let outline = trace_outline(character.pixels(), options)?;
    let (width, height) =
        if character.is_empty() { (0, 0) } else { (character.width(), character.height()) };

    Ok(TracedGlyph { outline, width, height, y_offset: vertical_offset(character, baseline) })
}
