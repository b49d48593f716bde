use std::path::PathBuf;

use clap::Parser;
use pdffill::ToolConfig;

/// Extract PDF form fields as JSON, or fill a form from JSON read on stdin.
#[derive(Debug, Parser)]
#[command(name = "pdf-fill-form", about, version)]
pub struct Cli {
    /// Path to the PDF form
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Fill the form with a JSON object, or an array of objects, read from stdin
    #[arg(long)]
    pub fill: bool,

    /// Merge even a single record and rasterize the result for printing
    #[arg(long)]
    pub print: bool,

    /// Write the filled PDF to this path instead of stdout
    #[arg(short = 'o', long = "out", value_name = "PATH")]
    pub out: Option<PathBuf>,

    /// Program used to concatenate per-record documents
    #[arg(
        long,
        env = "PDFFILL_PDFUNITE",
        default_value = "pdfunite",
        value_name = "PROGRAM"
    )]
    pub pdfunite: PathBuf,

    /// Program used to rasterize the merged document
    #[arg(
        long,
        env = "PDFFILL_PDFTOCAIRO",
        default_value = "pdftocairo",
        value_name = "PROGRAM"
    )]
    pub pdftocairo: PathBuf,
}

impl Cli {
    pub fn tool_config(&self) -> ToolConfig {
        ToolConfig {
            pdfunite: self.pdfunite.clone(),
            pdftocairo: self.pdftocairo.clone(),
        }
    }
}
