//! Configuration for pixfont batches.

use pixfont_raster::{Background, TraceOptions, fallback_baseline};

/// Pixel size characters are rendered at by the image source.
pub const RENDER_SIZE: u32 = 1000;

/// Units per em of exported fonts. One source pixel maps to one font unit.
pub const DEFAULT_UNITS_PER_EM: u16 = 1000;

/// Background removed from rendered characters (white, ±15 per channel).
pub const BACKGROUND: Background = Background::WHITE;

pub use pixfont_font_builder::STYLE_NAME;
pub use pixfont_raster::ALPHA_THRESHOLD;

/// Settings shared by every character of a batch.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    pub render_size: u32,
    pub units_per_em: u16,
    pub background: Background,
    pub trace: TraceOptions,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            render_size: RENDER_SIZE,
            units_per_em: DEFAULT_UNITS_PER_EM,
            background: BACKGROUND,
            trace: TraceOptions::default(),
        }
    }
}

impl BatchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render_size(mut self, render_size: u32) -> Self {
        self.render_size = render_size;
        self
    }

    pub fn units_per_em(mut self, units_per_em: u16) -> Self {
        self.units_per_em = units_per_em;
        self
    }

    pub fn background(mut self, background: Background) -> Self {
        self.background = background;
        self
    }

    pub fn merge_vertical_runs(mut self, merge: bool) -> Self {
        self.trace = self.trace.merge_vertical_runs(merge);
        self
    }

    /// Baseline used when no character of the batch has foreground pixels.
    pub fn fallback_baseline(&self) -> u32 {
        fallback_baseline(self.render_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BatchConfig::default();
        assert_eq!(config.render_size, 1000);
        assert_eq!(config.units_per_em, 1000);
        assert_eq!(config.fallback_baseline(), 800);
        assert!(!config.trace.merge_vertical_runs);
    }

    #[test]
    fn test_builder() {
        let config = BatchConfig::new().render_size(64).merge_vertical_runs(true);
        assert_eq!(config.fallback_baseline(), 51);
        assert!(config.trace.merge_vertical_runs);
    }
}
