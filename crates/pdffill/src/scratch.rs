//! Per-invocation scratch files.

use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A private temporary directory handing out uniquely named artifact paths.
///
/// Everything inside is deleted when the value is dropped, whichever way
/// the owning call returns.
pub(crate) struct ScratchSpace {
    dir: TempDir,
    issued: usize,
}

impl ScratchSpace {
    pub(crate) fn new() -> io::Result<Self> {
        let dir = tempfile::Builder::new().prefix("pdffill-").tempdir()?;
        Ok(Self { dir, issued: 0 })
    }

    /// Reserve a fresh `.pdf` path. The file itself is created by whoever
    /// writes it first.
    pub(crate) fn artifact(&mut self, label: &str) -> PathBuf {
        self.issued += 1;
        self.dir
            .path()
            .join(format!("{:04}-{label}.pdf", self.issued))
    }

    pub(crate) fn path(&self) -> &Path {
        self.dir.path()
    }
}
