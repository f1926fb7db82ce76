use std::time::Instant;

use anyhow::{Context, Result, bail};
use log::{info, warn};
use pixfont_core::{
    Batch, BatchConfig, DirectoryImageSource, FontVersion, HttpImageSource, ImageSource, Progress,
    Project, export,
};

use crate::{cli::BuildArgs, io::FontFile};

fn resolve_source(args: &BuildArgs) -> Result<(Box<dyn ImageSource>, String)> {
    match (&args.url, &args.images) {
        (Some(url), None) => {
            let charset = args.charset.clone().context("--charset is required with --url")?;
            Ok((Box::new(HttpImageSource::new(url.clone(), args.render_size)), charset))
        }
        (None, Some(dir)) => {
            let source = DirectoryImageSource::new(dir);
            let charset = match &args.charset {
                Some(charset) => charset.clone(),
                None => source
                    .charset()
                    .with_context(|| format!("Failed to list images in {}", dir.display()))?
                    .into_iter()
                    .collect(),
            };
            Ok((Box::new(source), charset))
        }
        _ => bail!("Exactly one of --url or --images is required"),
    }
}

/// Log progress every tenth of the way.
fn progress_logger() -> impl FnMut(Progress) {
    let mut last_decile = 0;
    move |progress: Progress| {
        let decile = (progress.percent / 10.0).floor() as u32;
        if decile > last_decile {
            last_decile = decile;
            info!("[{:>3.0}%] {:?} {:?}", progress.percent, progress.stage, progress.ch);
        }
    }
}

pub fn build(args: &BuildArgs) -> Result<()> {
    let start = Instant::now();
    let version = FontVersion::parse(args.font.version.as_deref())?;
    let (source, charset) = resolve_source(args)?;
    if charset.is_empty() {
        bail!("No characters to build");
    }

    let config = BatchConfig::new()
        .render_size(args.render_size)
        .units_per_em(args.units_per_em)
        .merge_vertical_runs(args.merge_rows);
    let mut batch = Batch::new(charset.chars(), config);

    println!("Building '{}' from {} characters", args.family, batch.len());
    let summary = batch.run(source.as_ref(), progress_logger())?;

    println!("  Done:     {}", summary.done);
    println!("  Baseline: row {}", summary.baseline);
    if !summary.failed.is_empty() {
        println!("  Failed:   {}", summary.failed.len());
        for (ch, message) in &summary.failed {
            warn!("{ch:?}: {message}");
        }
    }

    if let Some(path) = &args.project {
        Project::from_batch(&batch, args.family.clone())
            .save(path)
            .with_context(|| format!("Failed to save project: {}", path.display()))?;
        println!("Saved project to {}", path.display());
    }

    let document = batch.to_document(&args.family).with_version(version);
    let bytes = export(&document, &args.font.assemble_options())?;
    FontFile::new(&args.font.output).write(&bytes)?;

    println!(
        "  ✓ Wrote {} ({} bytes, {:.2}s)",
        args.font.output.display(),
        bytes.len(),
        start.elapsed().as_secs_f64()
    );
    Ok(())
}
