use std::path::Path;

use pdffill::{FillError, LopdfDocument};

/// Exit code for unusable input documents, matching clap's usage errors.
pub const EXIT_LOAD_FAILURE: i32 = 2;

/// Exit code for every failure after the document has been loaded.
pub const EXIT_FAILURE: i32 = 1;

/// Open a PDF form with user-friendly error messages.
///
/// Returns `Err(2)` with a message printed to stderr if the file is missing
/// or cannot be parsed as a usable PDF.
pub fn open_document(file: &Path) -> Result<LopdfDocument, i32> {
    if !file.exists() {
        eprintln!("Error: file not found: {}", file.display());
        return Err(EXIT_LOAD_FAILURE);
    }

    LopdfDocument::open_file(file).map_err(|e| {
        eprintln!("Error: failed to open PDF: {e}");
        EXIT_LOAD_FAILURE
    })
}

/// Print a fill or extract failure to stderr and return its exit code.
pub fn report(err: FillError) -> i32 {
    eprintln!("Error: {err}");
    match err {
        FillError::DocumentLoad(_) => EXIT_LOAD_FAILURE,
        _ => EXIT_FAILURE,
    }
}
