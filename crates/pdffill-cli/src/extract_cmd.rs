use std::io::{self, Write};
use std::path::Path;

use pdffill::{FillError, extract_fields};

use crate::shared::{open_document, report};

pub fn run(file: &Path) -> Result<(), i32> {
    let doc = open_document(file)?;
    let record = extract_fields(&doc);
    let json = record.to_pretty_json().map_err(report)?;

    let mut stdout = io::stdout().lock();
    stdout
        .write_all(json.as_bytes())
        .and_then(|()| stdout.flush())
        .map_err(|e| report(FillError::Io(e)))
}
