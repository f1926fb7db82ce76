//! The two-stage batch pipeline.
//!
//! Stage 1 acquires and extracts every character. The shared baseline is then
//! calibrated from all stage 1 results, and only after that does stage 2 trace
//! each character against it. Failures stay local to their character.

use std::time::Instant;

use indexmap::IndexMap;
use log::{debug, info};
use pixfont_font_builder::FontDocument;
use pixfont_raster::{ProcessedCharacter, calibrate_baseline, extract_foreground, trace_character};

use crate::{
    config::BatchConfig,
    error::{Error, Result},
    export::build_document,
    record::GlyphRecord,
    source::ImageSource,
    status::GlyphStatus,
};

/// Pipeline stage a progress report belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Acquisition and foreground extraction (0-50%).
    Acquire,
    /// Outline tracing (50-100%).
    Trace,
}

/// Reported after each character of each stage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progress {
    pub stage: Stage,
    /// Overall completion, 0-100, never decreasing within a run.
    pub percent: f64,
    /// The character that was just handled.
    pub ch: char,
}

impl Progress {
    /// Progress after finishing the `index`-th of `total` characters in `stage`.
    fn after(stage: Stage, index: usize, total: usize, ch: char) -> Self {
        let base = match stage {
            Stage::Acquire => 0.0,
            Stage::Trace => 50.0,
        };
        let percent = base + 50.0 * (index + 1) as f64 / total as f64;
        Self { stage, percent, ch }
    }
}

/// Outcome of [`Batch::run`].
#[derive(Debug, Clone, PartialEq)]
pub struct BatchSummary {
    pub done: usize,
    /// Characters that ended in error, with their messages, in batch order.
    pub failed: Vec<(char, String)>,
    pub baseline: u32,
}

/// An ordered set of glyph records and the pipeline that fills them.
#[derive(Debug, Clone)]
pub struct Batch {
    config: BatchConfig,
    records: IndexMap<char, GlyphRecord>,
    baseline: Option<u32>,
}

impl Batch {
    /// One pending record per distinct character, in first-occurrence order.
    pub fn new(charset: impl IntoIterator<Item = char>, config: BatchConfig) -> Self {
        let mut records = IndexMap::new();
        for ch in charset {
            records.entry(ch).or_insert_with(|| GlyphRecord::new(ch));
        }
        Self { config, records, baseline: None }
    }

    /// Rebuild a batch from previously produced records.
    pub fn from_records(
        records: impl IntoIterator<Item = GlyphRecord>,
        config: BatchConfig,
        baseline: Option<u32>,
    ) -> Self {
        let records = records.into_iter().map(|record| (record.ch, record)).collect();
        Self { config, records, baseline }
    }

    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Baseline of the last run, `None` before the first run.
    pub fn baseline(&self) -> Option<u32> {
        self.baseline
    }

    pub fn charset(&self) -> String {
        self.records.keys().collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> impl Iterator<Item = &GlyphRecord> {
        self.records.values()
    }

    pub fn record(&self, ch: char) -> Option<&GlyphRecord> {
        self.records.get(&ch)
    }

    /// Mutable access for editing offsets, scale and advance width.
    pub fn record_mut(&mut self, ch: char) -> Option<&mut GlyphRecord> {
        self.records.get_mut(&ch)
    }

    /// Process every character of the batch.
    ///
    /// Records left over from a previous run are reset to pending first.
    pub fn run(
        &mut self,
        source: &dyn ImageSource,
        mut progress: impl FnMut(Progress),
    ) -> Result<BatchSummary> {
        let start = Instant::now();
        let total = self.records.len();
        info!("Processing {total} characters");

        // Stage 1: acquire + extract, one character at a time.
        let mut processed: Vec<Option<ProcessedCharacter>> = Vec::with_capacity(total);
        for (index, record) in self.records.values_mut().enumerate() {
            if record.status.is_terminal() {
                record.transition(GlyphStatus::Pending)?;
            }
            processed.push(acquire(record, source, &self.config)?);
            progress(Progress::after(Stage::Acquire, index, total, record.ch));
        }

        // Barrier: the baseline needs every stage 1 result.
        let baseline =
            calibrate_baseline(processed.iter().flatten(), self.config.fallback_baseline());
        self.baseline = Some(baseline);
        info!("Stage 1 finished in {:.2?}, baseline at row {baseline}", start.elapsed());

        // Stage 2: trace against the shared baseline.
        for (index, (record, character)) in
            self.records.values_mut().zip(processed.iter()).enumerate()
        {
            if let Some(character) = character {
                convert(record, character, baseline, &self.config)?;
            }
            progress(Progress::after(Stage::Trace, index, total, record.ch));
        }

        let summary = self.summary(baseline);
        info!(
            "Processed {total} characters in {:.2?}: {} done, {} failed",
            start.elapsed(),
            summary.done,
            summary.failed.len()
        );
        Ok(summary)
    }

    /// Re-run one character against the existing baseline.
    ///
    /// The baseline is not recalibrated; before the first run the fallback
    /// baseline is used.
    pub fn retry(&mut self, ch: char, source: &dyn ImageSource) -> Result<&GlyphRecord> {
        let baseline = self.baseline.unwrap_or_else(|| self.config.fallback_baseline());
        let record = self.records.get_mut(&ch).ok_or(Error::UnknownCharacter(ch))?;

        if record.status.is_terminal() {
            record.transition(GlyphStatus::Pending)?;
        }
        if let Some(character) = acquire(record, source, &self.config)? {
            convert(record, &character, baseline, &self.config)?;
        }
        debug!("Retried {ch:?}: {}", record.status.label());
        Ok(record)
    }

    pub fn summary(&self, baseline: u32) -> BatchSummary {
        let done = self.records.values().filter(|r| r.status.is_done()).count();
        let failed = self
            .records
            .values()
            .filter_map(|r| r.status.error_message().map(|m| (r.ch, m.to_string())))
            .collect();
        BatchSummary { done, failed, baseline }
    }

    /// Build a font document from the done records.
    ///
    /// A done space record only contributes its scaled advance width; other
    /// characters contribute their transformed outline.
    pub fn to_document(&self, family_name: &str) -> FontDocument {
        build_document(family_name, self.config.units_per_em, self.records())
    }
}

/// Stage 1 for one record. Returns `None` if the character failed.
fn acquire(
    record: &mut GlyphRecord,
    source: &dyn ImageSource,
    config: &BatchConfig,
) -> Result<Option<ProcessedCharacter>> {
    let ch = record.ch;
    record.transition(GlyphStatus::Fetching)?;
    let image = match source.fetch(ch) {
        Ok(image) => image,
        Err(source) => {
            record.fail(&Error::Acquisition { ch, source })?;
            return Ok(None);
        }
    };

    record.transition(GlyphStatus::Processing)?;
    match extract_foreground(image, &config.background) {
        Ok(character) => {
            debug!("Extracted {ch:?}: max_y {:?}", character.max_y());
            Ok(Some(character))
        }
        Err(source) => {
            record.fail(&Error::Extraction { ch, source })?;
            Ok(None)
        }
    }
}

/// Stage 2 for one record.
fn convert(
    record: &mut GlyphRecord,
    character: &ProcessedCharacter,
    baseline: u32,
    config: &BatchConfig,
) -> Result<()> {
    let ch = record.ch;
    record.transition(GlyphStatus::Converting)?;
    match trace_character(character, baseline, &config.trace) {
        Ok(traced) => {
            debug!("Traced {ch:?}: {} contours", traced.outline.contour_count());
            record.apply_trace(traced, character.max_y(), config.units_per_em);
            record.transition(GlyphStatus::Done)
        }
        Err(source) => record.fail(&Error::Trace { ch, source }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use image::{Rgba, RgbaImage};

    use super::*;
    use crate::source::SourceError;

    /// Renders every character as a white 20x20 image with a 4x4 black
    /// square whose bottom row is `14 + (code point % 3)`.
    struct Squares {
        failing: HashSet<char>,
    }

    impl Squares {
        fn new(failing: &str) -> Self {
            Self { failing: failing.chars().collect() }
        }
    }

    impl ImageSource for Squares {
        fn fetch(&self, ch: char) -> std::result::Result<RgbaImage, SourceError> {
            if self.failing.contains(&ch) {
                return Err(SourceError::Unrenderable(ch));
            }
            let mut image = RgbaImage::from_pixel(20, 20, Rgba([255, 255, 255, 255]));
            if ch != ' ' {
                let bottom = 14 + u32::from(ch) % 3;
                for y in bottom - 3..=bottom {
                    for x in 5..9 {
                        image.put_pixel(x, y, Rgba([0, 0, 0, 255]));
                    }
                }
            }
            Ok(image)
        }
    }

    fn config() -> BatchConfig {
        BatchConfig::new().render_size(20)
    }

    #[test]
    fn test_duplicates_dropped() {
        let batch = Batch::new("abcab".chars(), config());
        assert_eq!(batch.charset(), "abc");
        assert_eq!(batch.len(), 3);
    }

    #[test]
    fn test_progress_is_monotonic() {
        let mut batch = Batch::new("ABC".chars(), config());
        let mut reports = Vec::new();
        batch.run(&Squares::new("B"), |p| reports.push(p)).unwrap();

        assert_eq!(reports.len(), 6);
        assert!(reports.windows(2).all(|w| w[0].percent <= w[1].percent));
        assert!(reports[..3].iter().all(|p| p.stage == Stage::Acquire && p.percent <= 50.0));
        assert!(reports[3..].iter().all(|p| p.stage == Stage::Trace && p.percent > 50.0));
        assert_eq!(reports[2].percent, 50.0);
        assert_eq!(reports[5].percent, 100.0);
        assert_eq!(reports.iter().map(|p| p.ch).collect::<String>(), "ABCABC");
    }

    #[test]
    fn test_baseline_is_shared_mode() {
        // A (65) -> bottom 16, B (66) -> 14, D (68) -> 16
        let mut batch = Batch::new("ABD".chars(), config());
        let summary = batch.run(&Squares::new(""), |_| {}).unwrap();

        assert_eq!(summary.baseline, 16);
        assert_eq!(batch.record('A').unwrap().y_offset(), 0.0);
        assert_eq!(batch.record('B').unwrap().y_offset(), 2.0);
    }

    #[test]
    fn test_all_empty_uses_fallback_baseline() {
        let mut batch = Batch::new("  ".chars(), config());
        let summary = batch.run(&Squares::new(""), |_| {}).unwrap();
        assert_eq!(summary.baseline, 16);
        assert_eq!(summary.done, 1);
    }

    #[test]
    fn test_failure_is_isolated() {
        let mut batch = Batch::new("ABC".chars(), config());
        let summary = batch.run(&Squares::new("B"), |_| {}).unwrap();

        assert_eq!(summary.done, 2);
        assert_eq!(summary.failed.len(), 1);
        assert_eq!(summary.failed[0].0, 'B');
        assert!(summary.failed[0].1.contains("no image available"));
        assert!(batch.record('B').unwrap().outline().is_none());
    }

    #[test]
    fn test_retry_keeps_baseline() {
        let mut batch = Batch::new("AB".chars(), config());
        batch.run(&Squares::new("A"), |_| {}).unwrap();
        assert_eq!(batch.baseline(), Some(14));

        let record = batch.retry('A', &Squares::new("")).unwrap();
        assert!(record.status().is_done());
        // A's bottom row is 16, traced against the old baseline 14.
        assert_eq!(record.y_offset(), -2.0);
        assert_eq!(batch.baseline(), Some(14));
    }

    #[test]
    fn test_retry_unknown_character() {
        let mut batch = Batch::new("A".chars(), config());
        assert!(matches!(
            batch.retry('Z', &Squares::new("")),
            Err(Error::UnknownCharacter('Z'))
        ));
    }

    #[test]
    fn test_rerun_resets_records() {
        let mut batch = Batch::new("AB".chars(), config());
        batch.run(&Squares::new("B"), |_| {}).unwrap();
        let summary = batch.run(&Squares::new(""), |_| {}).unwrap();
        assert_eq!(summary.done, 2);
        assert!(summary.failed.is_empty());
    }

    #[test]
    fn test_document_uses_done_records() {
        let mut batch = Batch::new("A B".chars(), config());
        batch.run(&Squares::new("B"), |_| {}).unwrap();
        batch.record_mut(' ').unwrap().set_scale(0.75).unwrap();

        let document = batch.to_document("Squares");
        assert_eq!(document.glyph_count(), 1);
        assert!(document.glyph('A').is_some());
        assert!(document.glyph('B').is_none());
        assert_eq!(document.space_advance(), 250);
    }

    #[test]
    fn test_document_applies_transform() {
        let mut batch = Batch::new("A".chars(), config());
        batch.run(&Squares::new(""), |_| {}).unwrap();
        let record = batch.record_mut('A').unwrap();
        record.set_scale(2.0).unwrap();
        record.set_offsets(10.0, 5.0);

        let document = batch.to_document("Squares");
        let glyph = document.glyph('A').unwrap();
        assert_eq!(glyph.advance_width, 8);
        assert_eq!(
            glyph.outline.bounds(),
            Some(pixfont_raster::kurbo::Rect::new(10.0, 5.0, 18.0, 13.0))
        );
    }
}
