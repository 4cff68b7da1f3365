use crate::matcher::ResultGrouping;
use crate::model::{Listing, StorageError};
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use tracing::info;

#[derive(Serialize)]
struct GroupLine<'a> {
    product_name: &'a str,
    listings: &'a [Listing],
}

/// Writes one `{"product_name", "listings"}` object per line. Returns the number of lines.
pub fn write_groups<W: Write>(writer: &mut W, grouping: &ResultGrouping) -> Result<usize, StorageError> {
    let mut lines = 0;
    for (product_name, listings) in grouping.iter() {
        serde_json::to_writer(&mut *writer, &GroupLine { product_name, listings })?;
        writer.write_all(b"\n")?;
        lines += 1;
    }
    Ok(lines)
}

/// Destination file for a matching run.
pub struct ResultsFile {
    path: PathBuf,
}

impl ResultsFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Replaces the file with the grouping, creating parent folders first.
    pub fn save(&self, grouping: &ResultGrouping) -> Result<usize, StorageError> {
        if let Some(folder) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(folder)?;
        }
        let mut writer = BufWriter::new(File::create(&self.path)?);
        let lines = write_groups(&mut writer, grouping)?;
        writer.flush()?;
        info!("Saved {} product groups to {}", lines, self.path.display());
        Ok(lines)
    }
}
