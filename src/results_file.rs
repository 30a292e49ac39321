//! Reading the per-run results files (CSV with a header row).

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use itertools::Itertools;
use kstring::KString;

#[derive(thiserror::Error, Debug)]
pub enum ResultsFileError {
    #[error("{0:?} does not exist")]
    Missing(PathBuf),
    #[error("{path:?}: missing column {column:?} (have: {have})")]
    MissingColumn {
        path: PathBuf,
        column: &'static str,
        have: String,
    },
    #[error("{path:?}: expecting exactly one value column besides {key}, have: {have}")]
    AmbiguousValueColumn {
        path: PathBuf,
        key: String,
        have: String,
    },
    #[error("{path:?}:{line}: column {column:?}: not a number: {value:?}")]
    NotANumber {
        path: PathBuf,
        line: u64,
        column: KString,
        value: String,
    },
}

/// Returns `ResultsFileError::Missing` for the first path that does
/// not exist.
pub fn check_exist<'p>(
    paths: impl IntoIterator<Item = &'p PathBuf>,
) -> Result<(), ResultsFileError> {
    for path in paths {
        if !path.exists() {
            return Err(ResultsFileError::Missing(path.clone()));
        }
    }
    Ok(())
}

/// One results file, fully read.
#[derive(Debug)]
pub struct ResultsFile {
    pub path: PathBuf,
    pub headers: Vec<KString>,
    pub records: Vec<csv::StringRecord>,
}

impl ResultsFile {
    pub fn read(path: &Path) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_path(path)
            .with_context(|| anyhow!("opening results file {path:?}"))?;
        let headers = reader
            .headers()
            .with_context(|| anyhow!("reading header of {path:?}"))?
            .iter()
            .map(KString::from_ref)
            .collect();
        let records = reader
            .records()
            .collect::<Result<Vec<_>, _>>()
            .with_context(|| anyhow!("reading records of {path:?}"))?;
        Ok(Self {
            path: path.to_owned(),
            headers,
            records,
        })
    }

    fn headers_string(&self) -> String {
        self.headers.iter().join(", ")
    }

    pub fn column_index(&self, column: &'static str) -> Result<usize, ResultsFileError> {
        self.headers
            .iter()
            .position(|h| h.as_str() == column)
            .ok_or_else(|| ResultsFileError::MissingColumn {
                path: self.path.clone(),
                column,
                have: self.headers_string(),
            })
    }

    /// The index of the only column not named in `key`.
    pub fn sole_other_column(&self, key: &[&str]) -> Result<usize, ResultsFileError> {
        let mut others = self
            .headers
            .iter()
            .enumerate()
            .filter(|(_, h)| !key.contains(&h.as_str()));
        match (others.next(), others.next()) {
            (Some((i, _)), None) => Ok(i),
            _ => Err(ResultsFileError::AmbiguousValueColumn {
                path: self.path.clone(),
                key: key.join(", "),
                have: self.headers_string(),
            }),
        }
    }

    /// Parse the cell at `column` of `record` as a number; `None` for
    /// an empty cell.
    pub fn number(
        &self,
        record: &csv::StringRecord,
        column: usize,
    ) -> Result<Option<f64>, ResultsFileError> {
        let s = record.get(column).unwrap_or("");
        if s.is_empty() {
            return Ok(None);
        }
        s.parse().map(Some).map_err(|_| ResultsFileError::NotANumber {
            path: self.path.clone(),
            line: record.position().map(|p| p.line()).unwrap_or(0),
            column: self.headers[column].clone(),
            value: s.into(),
        })
    }
}
