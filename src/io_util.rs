use std::{
    ffi::OsString,
    fs::{remove_file, rename},
    path::{Path, PathBuf},
};

use anyhow::{anyhow, Context, Result};

use crate::{debug, warn};

pub fn xrename(from: &Path, to: &Path) -> Result<()> {
    rename(from, to).with_context(|| anyhow!("renaming {from:?} to {to:?}"))?;
    Ok(())
}

/// `path` with `.tmp` appended to the file name, for writing output
/// that is renamed into place once complete.
pub fn tmp_path(path: &Path) -> Result<PathBuf> {
    let file_name = path
        .file_name()
        .ok_or_else(|| anyhow!("path misses a filename: {path:?}"))?;
    let mut tmp_name = OsString::from(file_name);
    tmp_name.push(".tmp");
    Ok(path.with_file_name(tmp_name))
}

/// Output files written under their `tmp_path` and renamed into place
/// together by `commit`. Temporary files that were not committed are
/// deleted on drop, so an error leaves none of the outputs behind.
#[derive(Debug, Default)]
pub struct StagedFiles {
    /// (temporary path, final path)
    files: Vec<(PathBuf, PathBuf)>,
}

impl StagedFiles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `path` as an output; returns the path to write it to.
    pub fn stage(&mut self, path: &Path) -> Result<PathBuf> {
        let path_tmp = tmp_path(path)?;
        self.files.push((path_tmp.clone(), path.to_owned()));
        Ok(path_tmp)
    }

    /// Rename all staged files to their final paths.
    pub fn commit(mut self) -> Result<()> {
        while !self.files.is_empty() {
            let (path_tmp, path) = &self.files[0];
            xrename(path_tmp, path)?;
            self.files.remove(0);
        }
        Ok(())
    }
}

impl Drop for StagedFiles {
    fn drop(&mut self) {
        for (path_tmp, _) in &self.files {
            match remove_file(path_tmp) {
                Ok(()) => debug!("deleted temporary file {path_tmp:?}"),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => (),
                Err(e) => warn!("error deleting temporary file {path_tmp:?}: {e:#}"),
            }
        }
    }
}
