use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::{anyhow, Context, Result};
use kstring::KString;
use lazy_static::lazy_static;
use regex::Regex;
use walkdir::WalkDir;

use super::GcCauseFilter;
use crate::run_set::RunSet;
use crate::{info, warn};

lazy_static! {
    // e.g. `Pause Young (Normal) (G1 Evacuation Pause) 24M->4M(256M) 3.069ms`
    static ref PAUSE: Regex = Regex::new(
        r"(Pause.*\(.*\))\s*[0-9]+[a-zA-Z]->[0-9]+[a-zA-Z]\s*\([0-9]+[a-zA-Z]\)\s*([0-9]+(\.[0-9]+)?)ms"
    )
    .expect("valid regex");
}

#[derive(Debug, Clone, PartialEq)]
pub struct GcPause {
    pub log_file: Rc<Path>,
    pub cause: KString,
    pub latency_ms: f64,
}

/// All pauses in `text` admitted by `filter`, in order.
pub fn extract_pauses(
    text: &str,
    log_file: &Rc<Path>,
    filter: GcCauseFilter,
) -> Result<Vec<GcPause>> {
    let mut pauses = Vec::new();
    for captures in PAUSE.captures_iter(text) {
        let (Some(cause), Some(latency)) = (captures.get(1), captures.get(2)) else {
            continue;
        };
        let cause = cause.as_str();
        if !filter.admits(cause) {
            continue;
        }
        let latency_ms = latency
            .as_str()
            .parse()
            .with_context(|| anyhow!("{log_file:?}: latency {:?}", latency.as_str()))?;
        pauses.push(GcPause {
            log_file: log_file.clone(),
            cause: KString::from_ref(cause),
            latency_ms,
        });
    }
    Ok(pauses)
}

/// The `*.log` files directly in `<run_dir>/benchmarks/<benchmark>/gc_logs`,
/// sorted. A missing directory gives an empty list.
pub fn locate_gc_logs(run_dir: &Path, benchmark: &str) -> Result<Vec<PathBuf>> {
    let dir = run_dir.join("benchmarks").join(benchmark).join("gc_logs");
    if !dir.is_dir() {
        warn!("no GC logs for {benchmark} in {run_dir:?}: {dir:?} is missing");
        return Ok(Vec::new());
    }
    let mut logs = Vec::new();
    for entry in WalkDir::new(&dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry.with_context(|| anyhow!("listing {dir:?}"))?;
        let path = entry.path();
        if entry.file_type().is_file() && path.extension().is_some_and(|ext| ext == "log") {
            logs.push(path.to_owned());
        }
    }
    Ok(logs)
}

/// The pauses from all GC logs of `benchmark` in all directories of
/// `run_set`.
pub fn load_pauses(
    run_set: &RunSet,
    benchmark: &str,
    filter: GcCauseFilter,
) -> Result<Vec<GcPause>> {
    let mut pauses = Vec::new();
    for dir in &run_set.dirs {
        for log in locate_gc_logs(dir, benchmark)? {
            info!("reading GC log {log:?}");
            let text = fs::read_to_string(&log).with_context(|| anyhow!("reading {log:?}"))?;
            pauses.extend(extract_pauses(&text, &Rc::from(log.as_path()), filter)?);
        }
    }
    Ok(pauses)
}
