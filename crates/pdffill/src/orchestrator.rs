//! Multi-record fill orchestration.
//!
//! Decides, from the number of records and the print flag, whether to fill
//! straight into the output or to fill one scratch document per record and
//! merge them through [`PageTools`].

use std::fs::File;
use std::io::{self, BufWriter, Read, Write};

use pdffill_core::{FieldRecord, FillError, FormDocument, extract_fields};
use tracing::{debug, info};

use crate::filler::fill_one;
use crate::scratch::ScratchSpace;
use crate::tools::PageTools;

/// Chunk size used when streaming the merged result to the output.
pub const COPY_CHUNK_SIZE: usize = 16 * 1024;

/// Options for a fill invocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FillOptions {
    /// Force the merge path and rasterize the merged result.
    pub print: bool,
}

/// How a fill invocation produces its output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillStrategy {
    /// No records: nothing is written.
    Empty,
    /// One record, no printing: the document is filled straight into the output.
    Direct,
    /// One scratch document per record, concatenated and optionally rasterized.
    Merge { rasterize: bool },
}

impl FillStrategy {
    pub fn select(record_count: usize, options: &FillOptions) -> Self {
        match (record_count, options.print) {
            (0, _) => Self::Empty,
            (1, false) => Self::Direct,
            (_, print) => Self::Merge { rasterize: print },
        }
    }
}

/// Fill `doc` once per record and write the result to `out`.
///
/// On the merge path each record is first overlaid onto the document's
/// pristine field values, so fields a record omits keep the template's
/// values instead of whatever the previous record set. Scratch files are
/// removed before this function returns, on success and on error.
///
/// # Errors
///
/// Any [`FillError`] from coercion, saving, the external tools or I/O. When
/// an external tool fails nothing is written to `out`.
pub fn fill_records<D, T, W>(
    doc: &mut D,
    records: &[FieldRecord],
    options: &FillOptions,
    tools: &T,
    out: &mut W,
) -> Result<FillStrategy, FillError>
where
    D: FormDocument,
    T: PageTools + ?Sized,
    W: Write,
{
    let strategy = FillStrategy::select(records.len(), options);
    info!(records = records.len(), ?strategy, "filling form");

    match strategy {
        FillStrategy::Empty => {}
        FillStrategy::Direct => fill_one(doc, &records[0], out)?,
        FillStrategy::Merge { rasterize } => merge_records(doc, records, rasterize, tools, out)?,
    }
    Ok(strategy)
}

fn merge_records<D, T, W>(
    doc: &mut D,
    records: &[FieldRecord],
    rasterize: bool,
    tools: &T,
    out: &mut W,
) -> Result<(), FillError>
where
    D: FormDocument,
    T: PageTools + ?Sized,
    W: Write,
{
    // Captured before the first write; every record is overlaid on these.
    let defaults = extract_fields(doc);
    let mut scratch = ScratchSpace::new()?;
    debug!(dir = %scratch.path().display(), "created scratch space");

    let mut parts = Vec::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        let effective = defaults.overlaid_with(record);
        let path = scratch.artifact("record");
        debug!(index, path = %path.display(), "filling record");

        let mut file = BufWriter::new(File::create(&path)?);
        fill_one(doc, &effective, &mut file)?;
        parts.push(path);
    }

    let mut result = scratch.artifact("merged");
    tools.concatenate(&parts, &result)?;

    if rasterize {
        let printed = scratch.artifact("print");
        tools.rasterize(&result, &printed)?;
        result = printed;
    }

    let copied = stream_copy(File::open(&result)?, out)?;
    debug!(bytes = copied, "streamed merged document");
    Ok(())
}

/// Copy `reader` into `out` in [`COPY_CHUNK_SIZE`] chunks.
fn stream_copy<R: Read, W: Write>(mut reader: R, out: &mut W) -> Result<u64, FillError> {
    let mut chunk = vec![0u8; COPY_CHUNK_SIZE];
    let mut total = 0u64;
    loop {
        let n = match reader.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        out.write_all(&chunk[..n])?;
        total += n as u64;
    }
    out.flush()?;
    Ok(total)
}
