//! The output archive: one CSV entry per table.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::tables::csv_table_view::csv_bytes;
use crate::tables::table_view::TableView;

/// Write `tables` as `<table name>.csv` entries of a zip file at
/// `path`.
pub fn write_archive<'t>(
    path: &Path,
    tables: impl IntoIterator<Item = &'t (dyn TableView + 't)>,
) -> Result<()> {
    let file = File::create(path).with_context(|| anyhow!("creating archive {path:?}"))?;
    let mut zip = ZipWriter::new(file);
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);
    for table in tables {
        let name = format!("{}.csv", table.table_name());
        let csv = csv_bytes(table)?;
        zip.start_file(name.as_str(), options)
            .with_context(|| anyhow!("adding {name:?} to {path:?}"))?;
        zip.write_all(&csv)
            .with_context(|| anyhow!("writing {name:?} to {path:?}"))?;
    }
    zip.finish()
        .with_context(|| anyhow!("finishing archive {path:?}"))?;
    Ok(())
}
