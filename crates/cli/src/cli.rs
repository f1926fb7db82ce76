//! CLI definitions and command dispatch.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use pixfont_core::{
    AssembleOptions,
    config::{DEFAULT_UNITS_PER_EM, RENDER_SIZE},
};

use crate::commands::{build, export, inspect};

#[derive(Parser)]
#[command(name = "pixfont")]
#[command(about = "Build pixel outline fonts from rendered character images")]
pub struct Cli {
    /// Log per-glyph detail (overridden by RUST_LOG)
    #[arg(short = 'V', long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every command that writes a font.
#[derive(Debug, Clone, clap::Args)]
pub struct FontArgs {
    /// Output font path
    #[arg(short, long)]
    pub output: PathBuf,
    /// Font version (YYYY-MM-DD or YYYY-MM-DD.N), defaults to today
    #[arg(short, long)]
    pub version: Option<String>,
    /// Compile glyphs in parallel
    #[arg(long)]
    pub parallel: bool,
    /// Log assembly step timings
    #[arg(long)]
    pub timing: bool,
}

impl FontArgs {
    pub fn assemble_options(&self) -> AssembleOptions {
        AssembleOptions::new().parallel(self.parallel).timing(self.timing)
    }
}

#[derive(Debug, Clone, clap::Args)]
pub struct BuildArgs {
    /// Characters to include; defaults to every image found with --images
    #[arg(short, long)]
    pub charset: Option<String>,
    /// Rendering endpoint, queried as <URL>?char=<c>&size=<render size>
    #[arg(long, conflicts_with = "images", required_unless_present = "images")]
    pub url: Option<String>,
    /// Directory of pre-rendered U+XXXX.png images
    #[arg(long)]
    pub images: Option<PathBuf>,
    /// Font family name
    #[arg(short, long)]
    pub family: String,
    #[arg(long, default_value_t = DEFAULT_UNITS_PER_EM)]
    pub units_per_em: u16,
    /// Pixel size characters are rendered at
    #[arg(long, default_value_t = RENDER_SIZE)]
    pub render_size: u32,
    /// Merge identical pixel runs of consecutive rows into one contour
    #[arg(long)]
    pub merge_rows: bool,
    /// Also save the batch as a project file
    #[arg(long)]
    pub project: Option<PathBuf>,
    #[command(flatten)]
    pub font: FontArgs,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render, trace and export a font
    Build {
        #[command(flatten)]
        args: BuildArgs,
    },
    /// Export a font from a saved project
    Export {
        /// Project file written by `build --project`
        #[arg(short, long)]
        project: PathBuf,
        /// Override the project's family name
        #[arg(long)]
        family: Option<String>,
        #[command(flatten)]
        font: FontArgs,
    },
    /// Print the glyphs and metrics of a font
    Inspect { font: PathBuf },
}

impl Commands {
    pub fn run(self) -> Result<()> {
        match self {
            Commands::Build { args } => build(&args)?,
            Commands::Export { project, family, font } => {
                export(&project, family.as_deref(), &font)?;
            }
            Commands::Inspect { font } => inspect(&font)?,
        }
        Ok(())
    }
}
