//! Output module for writing the export document
//!
//! This module handles:
//! - Serializing the export document to JSON
//! - Writing it to standard output or a file
//! - Logging the end-of-run summary

pub mod stats;

pub use stats::{degraded_records, log_summary};

use crate::model::ExportDocument;
use crate::Result;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Writes the export document as JSON
///
/// # Arguments
///
/// * `document` - The finished export
/// * `path` - Destination file; standard output when `None`
/// * `pretty` - Indent the JSON instead of writing it on one line
pub fn write_export(document: &ExportDocument, path: Option<&Path>, pretty: bool) -> Result<()> {
    match path {
        Some(path) => {
            let mut writer = BufWriter::new(File::create(path)?);
            write_json(&mut writer, document, pretty)?;
            tracing::info!("Export written to {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            write_json(&mut writer, document, pretty)?;
        }
    }
    Ok(())
}

/// Serializes the document into any writer, followed by a newline
pub fn write_json<W: Write>(writer: &mut W, document: &ExportDocument, pretty: bool) -> Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *writer, document)?;
    } else {
        serde_json::to_writer(&mut *writer, document)?;
    }
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
