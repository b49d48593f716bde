//! External page tools: concatenation and rasterization.
//!
//! The pipeline only needs two file-to-file operations, captured by
//! [`PageTools`]. [`PopplerTools`] runs the poppler command-line utilities.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use pdffill_core::FillError;
use tracing::info;

/// File-level PDF operations the merge path delegates to.
pub trait PageTools {
    /// Concatenate `inputs`, in order, into one PDF at `output`.
    fn concatenate(&self, inputs: &[PathBuf], output: &Path) -> Result<(), FillError>;

    /// Flatten `input` into a print-ready PDF at `output`.
    fn rasterize(&self, input: &Path, output: &Path) -> Result<(), FillError>;
}

/// Locations of the external programs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolConfig {
    /// Page-merge program, invoked as `pdfunite <in>... <out>`.
    pub pdfunite: PathBuf,
    /// Rasterizer, invoked as `pdftocairo -pdf <in> <out>`.
    pub pdftocairo: PathBuf,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            pdfunite: PathBuf::from("pdfunite"),
            pdftocairo: PathBuf::from("pdftocairo"),
        }
    }
}

/// [`PageTools`] backed by poppler's `pdfunite` and `pdftocairo`.
#[derive(Debug, Clone, Default)]
pub struct PopplerTools {
    config: ToolConfig,
}

impl PopplerTools {
    pub fn new(config: ToolConfig) -> Self {
        Self { config }
    }
}

/// Run a program to completion. Its stdout is discarded so it can never
/// interleave with PDF bytes on our own stdout; stderr is inherited.
fn run_tool<I, S>(program: &Path, args: I) -> Result<(), FillError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let tool = program.display().to_string();
    info!(%tool, "running external tool");

    let status = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .status()
        .map_err(|e| FillError::ExternalTool {
            tool: tool.clone(),
            reason: e.to_string(),
        })?;

    if !status.success() {
        return Err(FillError::ExternalTool {
            tool,
            reason: status.to_string(),
        });
    }
    Ok(())
}

impl PageTools for PopplerTools {
    fn concatenate(&self, inputs: &[PathBuf], output: &Path) -> Result<(), FillError> {
        let args = inputs
            .iter()
            .map(|path| path.as_os_str())
            .chain(std::iter::once(output.as_os_str()));
        run_tool(&self.config.pdfunite, args)
    }

    fn rasterize(&self, input: &Path, output: &Path) -> Result<(), FillError> {
        run_tool(
            &self.config.pdftocairo,
            [OsStr::new("-pdf"), input.as_os_str(), output.as_os_str()],
        )
    }
}
