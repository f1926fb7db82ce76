use std::path::Path;

use anyhow::{Context, Result};
use pixfont_core::{BatchConfig, FontVersion, Project, export as export_font};

use crate::{cli::FontArgs, io::FontFile};

pub fn export(project_path: &Path, family: Option<&str>, font: &FontArgs) -> Result<()> {
    let version = FontVersion::parse(font.version.as_deref())?;
    let project = Project::load(project_path)
        .with_context(|| format!("Failed to load project: {}", project_path.display()))?;

    let batch = project.to_batch(BatchConfig::default());
    let family = family.unwrap_or(&project.family_name);
    let skipped = batch.records().filter(|r| !r.status().is_done()).count();

    println!("Exporting '{family}' from {}", project_path.display());
    if skipped > 0 {
        println!("  Skipping {skipped} glyphs that are not done");
    }

    let document = batch.to_document(family).with_version(version);
    let bytes = export_font(&document, &font.assemble_options())?;
    FontFile::new(&font.output).write(&bytes)?;

    println!("  ✓ Wrote {} ({} bytes)", font.output.display(), bytes.len());
    Ok(())
}
