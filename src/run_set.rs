//! Named sets of run directories, given on the command line as
//! `name dir dir ... ; name dir ...`. Each directory holds one
//! complete execution of the benchmark suite; all directories of a set
//! are pooled before aggregation.

use std::path::{Path, PathBuf};

use kstring::KString;

use crate::family::Family;
use crate::results_file::{check_exist, ResultsFileError};

/// Ends the directory list of a run set.
pub const SEPARATOR: &str = ";";

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum RunSetParseError {
    #[error("no run sets given, expecting `name dir... [; name dir...]`")]
    Empty,
    #[error("run set {0:?} has no directories")]
    NoDirectories(KString),
    #[error("expecting a run set name at token {0}, got the separator {SEPARATOR:?}")]
    MissingName(usize),
    #[error("run set name {0:?} given more than once")]
    DuplicateName(KString),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunSet {
    pub name: KString,
    pub dirs: Vec<PathBuf>,
}

impl RunSet {
    pub fn new(name: &str, dirs: impl IntoIterator<Item = impl AsRef<Path>>) -> Self {
        Self {
            name: KString::from_ref(name),
            dirs: dirs.into_iter().map(|d| d.as_ref().to_owned()).collect(),
        }
    }

    /// The results file of `family` in each directory.
    pub fn results_files(&self, family: &Family) -> Vec<PathBuf> {
        self.dirs.iter().map(|dir| family.results_file(dir)).collect()
    }

    /// Verify that the results files of all `families` exist, before
    /// anything is read.
    pub fn check_inputs<'f>(
        &self,
        families: impl IntoIterator<Item = &'f Family>,
    ) -> Result<(), ResultsFileError> {
        for family in families {
            check_exist(&self.results_files(family))?;
        }
        Ok(())
    }
}

/// Parse `tokens` into run sets; the first one is the baseline by
/// convention.
pub fn parse_run_sets<S: AsRef<str>>(tokens: &[S]) -> Result<Vec<RunSet>, RunSetParseError> {
    let mut run_sets: Vec<RunSet> = Vec::new();
    let mut i = 0;
    while i < tokens.len() {
        let name = tokens[i].as_ref();
        if name == SEPARATOR {
            return Err(RunSetParseError::MissingName(i));
        }
        let start = i + 1;
        let end = tokens[start..]
            .iter()
            .position(|t| t.as_ref() == SEPARATOR)
            .map_or(tokens.len(), |p| start + p);
        let dirs = &tokens[start..end];
        if dirs.is_empty() {
            return Err(RunSetParseError::NoDirectories(KString::from_ref(name)));
        }
        if run_sets.iter().any(|r| r.name.as_str() == name) {
            return Err(RunSetParseError::DuplicateName(KString::from_ref(name)));
        }
        run_sets.push(RunSet::new(name, dirs.iter().map(|d| d.as_ref())));
        i = end + 1;
    }
    if run_sets.is_empty() {
        return Err(RunSetParseError::Empty);
    }
    Ok(run_sets)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn t_two_run_sets() {
        let sets = parse_run_sets(&["baseline", "/a", "/b", ";", "candidate", "/c"]).unwrap();
        assert_eq!(
            sets,
            vec![
                RunSet::new("baseline", ["/a", "/b"]),
                RunSet::new("candidate", ["/c"])
            ]
        );
    }

    #[test]
    fn t_trailing_separator() {
        let sets = parse_run_sets(&["only", "/x", ";"]).unwrap();
        assert_eq!(sets, vec![RunSet::new("only", ["/x"])]);
    }

    #[test]
    fn t_malformed() {
        let none: &[&str] = &[];
        assert_eq!(parse_run_sets(none), Err(RunSetParseError::Empty));
        assert_eq!(
            parse_run_sets(&["a", ";", "b", "/x"]),
            Err(RunSetParseError::NoDirectories("a".into()))
        );
        assert_eq!(
            parse_run_sets(&["a", "/x", ";", "b"]),
            Err(RunSetParseError::NoDirectories("b".into()))
        );
        assert_eq!(
            parse_run_sets(&["a", "/x", ";", ";", "b", "/y"]),
            Err(RunSetParseError::MissingName(3))
        );
        assert_eq!(
            parse_run_sets(&["a", "/x", ";", "a", "/y"]),
            Err(RunSetParseError::DuplicateName("a".into()))
        );
    }
}
