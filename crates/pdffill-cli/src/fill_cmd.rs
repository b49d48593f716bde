use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;

use pdffill::{FillOptions, PopplerTools, RecordSet, ToolConfig, fill_records};
use tracing::debug;

use crate::shared::{open_document, report};

pub fn run(file: &Path, out: Option<&Path>, print: bool, tools: ToolConfig) -> Result<(), i32> {
    let mut doc = open_document(file)?;
    let records = RecordSet::from_reader(io::stdin().lock())
        .map_err(report)?
        .into_records();
    let tools = PopplerTools::new(tools);
    let options = FillOptions { print };

    match out {
        Some(path) => {
            let sink = File::create(path).map_err(|e| report(e.into()))?;
            let result = fill_records(&mut doc, &records, &options, &tools, &mut BufWriter::new(sink));
            if let Err(err) = result {
                // Leave no partial output behind.
                if let Err(e) = std::fs::remove_file(path) {
                    debug!(path = %path.display(), error = %e, "could not remove output");
                }
                return Err(report(err));
            }
        }
        None => {
            let mut sink = BufWriter::new(io::stdout().lock());
            fill_records(&mut doc, &records, &options, &tools, &mut sink).map_err(report)?;
        }
    }
    Ok(())
}
