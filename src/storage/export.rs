//! JSON and CSV writers for a finished [`Corpus`]

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::error::Result;
use crate::models::Corpus;
use crate::storage::OutputFormat;

const CSV_SEPARATOR: char = ',';

/// Write the records as a pretty-printed JSON array
///
/// # Errors
///
/// Returns an error if serialization or the underlying write fails
pub fn write_json<W: Write>(corpus: &Corpus, writer: W) -> Result<()> {
    serde_json::to_writer_pretty(writer, corpus.records())?;
    Ok(())
}

/// Write the records as CSV with a header row
///
/// Columns are `condition`, `url`, then every other key seen in the corpus in
/// alphabetical order. A record without a column gets an empty cell.
///
/// # Errors
///
/// Returns an error if the underlying write fails
pub fn write_csv<W: Write>(corpus: &Corpus, mut writer: W) -> Result<()> {
    let columns = corpus.columns();
    write_row(&mut writer, &columns)?;

    for record in corpus.records() {
        let row: Vec<String> = columns
            .iter()
            .map(|column| record.get(column).unwrap_or_default().to_string())
            .collect();
        write_row(&mut writer, &row)?;
    }

    Ok(())
}

/// Write the corpus to `path`, creating parent directories as needed
///
/// # Errors
///
/// Returns an error if the file cannot be created or written
pub fn save(corpus: &Corpus, path: &Path, format: OutputFormat) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut writer = BufWriter::new(File::create(path)?);
    match format {
        OutputFormat::Json => write_json(corpus, &mut writer)?,
        OutputFormat::Csv => write_csv(corpus, &mut writer)?,
    }
    writer.flush()?;

    tracing::info!(
        path = %path.display(),
        format = %format,
        records = corpus.len(),
        "Corpus saved"
    );

    Ok(())
}

fn needs_quotes(field: &str) -> bool {
    field.contains(CSV_SEPARATOR)
        || field.contains('"')
        || field.contains('\n')
        || field.contains('\r')
}

fn write_row<W: Write>(w: &mut W, row: &[String]) -> io::Result<()> {
    for (i, cell) in row.iter().enumerate() {
        if i > 0 {
            write!(w, "{CSV_SEPARATOR}")?;
        }
        if needs_quotes(cell) {
            write!(w, "\"{}\"", cell.replace('"', "\"\""))?;
        } else {
            write!(w, "{cell}")?;
        }
    }
    writeln!(w)
}
