//! Saved projects: the batch state as JSON.

use std::{fs, path::Path};

use log::{info, warn};
use pixfont_raster::GlyphOutline;
use serde::{Deserialize, Serialize};

use crate::{
    config::{BatchConfig, DEFAULT_UNITS_PER_EM},
    error::Result,
    pipeline::Batch,
    record::GlyphRecord,
    status::GlyphStatus,
};

fn default_units_per_em() -> u16 {
    DEFAULT_UNITS_PER_EM
}

fn default_scale() -> f64 {
    1.0
}

/// A saved project.
///
/// The rulers are alignment guides for editors and are carried through
/// unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub family_name: String,
    #[serde(default = "default_units_per_em")]
    pub units_per_em: u16,
    pub charset: String,
    #[serde(default)]
    pub global_ruler_x: f64,
    #[serde(default)]
    pub global_ruler_y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub baseline: Option<u32>,
    pub glyphs: Vec<ProjectGlyph>,
}

/// One glyph record as stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectGlyph {
    #[serde(rename = "char")]
    pub ch: char,
    /// Outline as SVG path data; absent unless the glyph was done.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub visual_width: u32,
    pub visual_height: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_y: Option<u32>,
    pub advance_width: u32,
    pub x_offset: f64,
    pub y_offset: f64,
    #[serde(default = "default_scale")]
    pub scale: f64,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<&GlyphRecord> for ProjectGlyph {
    fn from(record: &GlyphRecord) -> Self {
        Self {
            ch: record.ch,
            path: record.outline().map(GlyphOutline::to_path_string),
            visual_width: record.visual_width,
            visual_height: record.visual_height,
            max_y: record.max_y,
            advance_width: record.advance_width,
            x_offset: record.x_offset,
            y_offset: record.y_offset,
            scale: record.scale,
            status: record.status.label().to_string(),
            message: record.status.error_message().map(str::to_string),
        }
    }
}

impl ProjectGlyph {
    /// Rebuild the record.
    ///
    /// A done glyph whose path is missing or unparseable comes back as an
    /// error. Glyphs saved mid-pipeline come back pending.
    pub fn to_record(&self) -> GlyphRecord {
        let mut record = GlyphRecord::new(self.ch);
        record.visual_width = self.visual_width;
        record.visual_height = self.visual_height;
        record.max_y = self.max_y;
        record.advance_width = self.advance_width;
        record.set_offsets(self.x_offset, self.y_offset);
        if record.set_scale(self.scale).is_err() {
            warn!("Resetting invalid scale {} of {:?} to 1", self.scale, self.ch);
        }

        record.status = match (self.status.as_str(), self.path.as_deref()) {
            ("done", Some(path)) => match GlyphOutline::from_path_string(path) {
                Ok(outline) => {
                    record.outline = outline;
                    GlyphStatus::Done
                }
                Err(e) => GlyphStatus::Error { message: format!("invalid outline: {e}") },
            },
            ("done", None) => GlyphStatus::Error { message: "missing outline".to_string() },
            ("error", _) => GlyphStatus::Error {
                message: self.message.clone().unwrap_or_else(|| "unknown error".to_string()),
            },
            _ => GlyphStatus::Pending,
        };

        if let Some(message) = record.status.error_message() {
            warn!("Loaded {:?} as failed: {message}", self.ch);
        }
        record
    }
}

impl Project {
    pub fn from_batch(batch: &Batch, family_name: impl Into<String>) -> Self {
        Self {
            family_name: family_name.into(),
            units_per_em: batch.config().units_per_em,
            charset: batch.charset(),
            global_ruler_x: 0.0,
            global_ruler_y: 0.0,
            baseline: batch.baseline(),
            glyphs: batch.records().map(ProjectGlyph::from).collect(),
        }
    }

    pub fn with_rulers(mut self, x: f64, y: f64) -> Self {
        self.global_ruler_x = x;
        self.global_ruler_y = y;
        self
    }

    pub fn to_records(&self) -> Vec<GlyphRecord> {
        self.glyphs.iter().map(ProjectGlyph::to_record).collect()
    }

    /// Restore the batch, ready for editing, retries or export.
    pub fn to_batch(&self, config: BatchConfig) -> Batch {
        let config = config.units_per_em(self.units_per_em);
        Batch::from_records(self.to_records(), config, self.baseline)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_json()?)?;
        info!("Saved project to {}", path.display());
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let project = Self::from_json(&fs::read_to_string(path)?)?;
        info!("Loaded project '{}' from {}", project.family_name, path.display());
        Ok(project)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glyph(ch: char, status: &str, path: Option<&str>) -> ProjectGlyph {
        ProjectGlyph {
            ch,
            path: path.map(str::to_string),
            visual_width: 2,
            visual_height: 1,
            max_y: Some(10),
            advance_width: 2,
            x_offset: 3.0,
            y_offset: -1.0,
            scale: 1.5,
            status: status.to_string(),
            message: None,
        }
    }

    #[test]
    fn test_done_glyph_restores_outline() {
        let record = glyph('A', "done", Some("M0,0 L2,0 L2,1 L0,1 Z")).to_record();
        assert!(record.status().is_done());
        assert_eq!(record.outline().map(GlyphOutline::point_count), Some(4));
        assert_eq!((record.x_offset(), record.y_offset(), record.scale()), (3.0, -1.0, 1.5));
    }

    #[test]
    fn test_missing_or_bad_path_loads_as_error() {
        let missing = glyph('A', "done", None).to_record();
        assert_eq!(missing.status().error_message(), Some("missing outline"));

        let bad = glyph('B', "done", Some("M0,0 Q1,1 2,0 Z")).to_record();
        assert!(bad.status().error_message().is_some_and(|m| m.starts_with("invalid outline")));

        let garbage = glyph('C', "done", Some("M0,0 L#")).to_record();
        assert_eq!(garbage.status().label(), "error");
    }

    #[test]
    fn test_in_flight_glyph_loads_pending() {
        let record = glyph('A', "converting", None).to_record();
        assert_eq!(record.status(), &GlyphStatus::Pending);
    }

    #[test]
    fn test_invalid_scale_is_reset() {
        let mut stored = glyph('A', "done", Some("M0,0 L2,0 L2,1 L0,1 Z"));
        stored.scale = 0.0;
        assert_eq!(stored.to_record().scale(), 1.0);
    }

    #[test]
    fn test_json_field_names() {
        let project = Project {
            family_name: "Blocks".to_string(),
            units_per_em: 1000,
            charset: "A".to_string(),
            global_ruler_x: 12.0,
            global_ruler_y: 80.0,
            baseline: None,
            glyphs: vec![glyph('A', "error", None)],
        };
        let value: serde_json::Value = serde_json::from_str(&project.to_json().unwrap()).unwrap();

        assert_eq!(value["family_name"], "Blocks");
        assert_eq!(value["global_ruler_y"], 80.0);
        assert_eq!(value["glyphs"][0]["char"], "A");
        assert!(value["glyphs"][0].get("path").is_none());
        assert!(value.get("baseline").is_none());
    }

    #[test]
    fn test_defaults_when_fields_missing() {
        let json = r#"{
            "family_name": "Old",
            "charset": "A",
            "glyphs": [{
                "char": "A",
                "visual_width": 1,
                "visual_height": 1,
                "advance_width": 1,
                "x_offset": 0.0,
                "y_offset": 0.0,
                "status": "error",
                "message": "offline"
            }]
        }"#;
        let project = Project::from_json(json).unwrap();
        assert_eq!(project.units_per_em, 1000);
        assert_eq!(project.glyphs[0].scale, 1.0);
        assert_eq!(project.to_records()[0].status().error_message(), Some("offline"));
    }
}
