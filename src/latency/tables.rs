use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet};

use anyhow::Result;
use kstring::KString;
use strum::IntoEnumIterator;

use super::extract::{load_pauses, GcPause};
use super::{GcCauseFilter, LATENCY_FAMILIES};
use crate::run_set::RunSet;
use crate::stats::{Summary, SummaryField};
use crate::tables::table_view::{
    number_cell, Cell, ColumnFormatting, ColumnHeader, Highlight, TableView, Unit,
};

pub const LATENCIES_TABLE_NAME: &str = "latencies";
pub const CAUSES_TABLE_NAME: &str = "causes";

fn benchmark_header() -> ColumnHeader {
    (
        "Benchmark".into(),
        Unit::None,
        ColumnFormatting::String { width_chars: None },
    )
}

/// Latency statistics per benchmark (rows) and run set.
#[derive(Debug, Clone)]
pub struct LatencyTable {
    /// Command line order
    pub run_names: Vec<KString>,
    /// Per benchmark, one summary per run set
    pub rows: Vec<(&'static str, Vec<Summary>)>,
}

/// Pause counts per benchmark (rows), run set and cause.
#[derive(Debug, Clone)]
pub struct CauseTable {
    /// (run set, cause): the causes of each run set are the union over
    /// its benchmarks, sorted
    pub columns: Vec<(KString, KString)>,
    /// One count per entry in `columns`
    pub rows: Vec<(&'static str, Vec<usize>)>,
}

impl CauseTable {
    pub fn get(&self, benchmark: &str, run_set: &str, cause: &str) -> Option<usize> {
        let i = self
            .columns
            .iter()
            .position(|(r, c)| r.as_str() == run_set && c.as_str() == cause)?;
        let (_, counts) = self.rows.iter().find(|(b, _)| *b == benchmark)?;
        Some(counts[i])
    }
}

/// What one run set contributes to both tables.
struct RunSetLatencies {
    summaries: Vec<Summary>,
    cause_counts: Vec<BTreeMap<KString, usize>>,
}

impl RunSetLatencies {
    fn from_pauses(per_benchmark: Vec<Vec<GcPause>>) -> Self {
        let mut summaries = Vec::new();
        let mut cause_counts = Vec::new();
        for pauses in per_benchmark {
            let latencies: Vec<f64> = pauses.iter().map(|p| p.latency_ms).collect();
            summaries.push(Summary::from_values(&latencies));
            let mut counts = BTreeMap::new();
            for pause in pauses {
                *counts.entry(pause.cause).or_insert(0) += 1;
            }
            cause_counts.push(counts);
        }
        Self {
            summaries,
            cause_counts,
        }
    }
}

fn build(run_names: Vec<KString>, runs: Vec<RunSetLatencies>) -> (LatencyTable, CauseTable) {
    let latency_rows = LATENCY_FAMILIES
        .iter()
        .enumerate()
        .map(|(i, benchmark)| (*benchmark, runs.iter().map(|r| r.summaries[i]).collect()))
        .collect();

    let columns: Vec<(KString, KString)> = run_names
        .iter()
        .zip(&runs)
        .flat_map(|(name, run)| {
            let causes: BTreeSet<&KString> =
                run.cause_counts.iter().flat_map(|c| c.keys()).collect();
            causes
                .into_iter()
                .map(|cause| (name.clone(), cause.clone()))
                .collect::<Vec<_>>()
        })
        .collect();
    let cause_rows = LATENCY_FAMILIES
        .iter()
        .enumerate()
        .map(|(i, benchmark)| {
            let counts = columns
                .iter()
                .map(|(name, cause)| {
                    let run = run_names.iter().position(|n| n == name).map(|j| &runs[j]);
                    run.and_then(|run| run.cause_counts[i].get(cause).copied())
                        .unwrap_or(0)
                })
                .collect();
            (*benchmark, counts)
        })
        .collect();

    (
        LatencyTable {
            run_names,
            rows: latency_rows,
        },
        CauseTable {
            columns,
            rows: cause_rows,
        },
    )
}

/// Extract the GC pauses of all `LATENCY_FAMILIES` for every run set.
pub fn latency_tables(
    run_sets: &[RunSet],
    filter: GcCauseFilter,
) -> Result<(LatencyTable, CauseTable)> {
    let runs = run_sets
        .iter()
        .map(|run_set| -> Result<_> {
            let per_benchmark = LATENCY_FAMILIES
                .iter()
                .map(|benchmark| load_pauses(run_set, benchmark, filter))
                .collect::<Result<_>>()?;
            Ok(RunSetLatencies::from_pauses(per_benchmark))
        })
        .collect::<Result<_>>()?;
    Ok(build(
        run_sets.iter().map(|r| r.name.clone()).collect(),
        runs,
    ))
}

impl TableView for LatencyTable {
    fn table_name(&self) -> Cow<str> {
        LATENCIES_TABLE_NAME.into()
    }

    fn table_view_header(&self) -> Vec<ColumnHeader> {
        let mut header = vec![benchmark_header()];
        for name in &self.run_names {
            header.extend(SummaryField::iter().map(|field| {
                let unit = match field {
                    SummaryField::Count => Unit::Count,
                    _ => Unit::Measured("msec"),
                };
                (
                    Cow::Owned(format!("{name}/{}", field.short_label())),
                    unit,
                    ColumnFormatting::Number,
                )
            }));
        }
        header
    }

    fn table_view_body<'s>(&'s self) -> Box<dyn Iterator<Item = Vec<Cell<'s>>> + 's> {
        Box::new(self.rows.iter().map(|(benchmark, summaries)| {
            let mut cells: Vec<Cell> = vec![((*benchmark).into(), Highlight::Neutral)];
            for summary in summaries {
                cells.extend(SummaryField::iter().map(|field| match field {
                    SummaryField::Count => (summary.count.to_string().into(), Highlight::Neutral),
                    _ => number_cell(Some(summary.get(field))),
                }));
            }
            cells
        }))
    }
}

impl TableView for CauseTable {
    fn table_name(&self) -> Cow<str> {
        CAUSES_TABLE_NAME.into()
    }

    fn table_view_header(&self) -> Vec<ColumnHeader> {
        let mut header = vec![benchmark_header()];
        header.extend(self.columns.iter().map(|(name, cause)| {
            (
                Cow::Owned(format!("{name}/{cause}")),
                Unit::Count,
                ColumnFormatting::Number,
            )
        }));
        header
    }

    fn table_view_body<'s>(&'s self) -> Box<dyn Iterator<Item = Vec<Cell<'s>>> + 's> {
        Box::new(self.rows.iter().map(|(benchmark, counts)| {
            let mut cells: Vec<Cell> = vec![((*benchmark).into(), Highlight::Neutral)];
            cells.extend(
                counts
                    .iter()
                    .map(|n| (n.to_string().into(), Highlight::Neutral)),
            );
            cells
        }))
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use super::*;
    use crate::tables::csv_table_view::csv_bytes;

    fn write_log(run_dir: &Path, benchmark: &str, name: &str, text: &str) -> Result<()> {
        let dir = run_dir.join("benchmarks").join(benchmark).join("gc_logs");
        fs::create_dir_all(&dir)?;
        fs::write(dir.join(name), text)?;
        Ok(())
    }

    const YOUNG: &str = "Pause Young (Normal) (G1 Evacuation Pause) 24M->4M(256M) ";
    const FULL: &str = "Pause Full (System.gc()) 30M->2M(256M) ";

    #[test]
    fn t_tables() -> Result<()> {
        let a = tempfile::tempdir()?;
        write_log(
            a.path(),
            "dacapo",
            "1.log",
            &format!("{YOUNG}2ms\n{YOUNG}4ms\n{FULL}30ms\n"),
        )?;
        write_log(a.path(), "rubykon", "1.log", &format!("{YOUNG}1.5ms\n"))?;
        let b = tempfile::tempdir()?;
        write_log(b.path(), "dacapo", "1.log", &format!("{YOUNG}3ms\n"))?;

        let run_sets = [RunSet::new("a", [a.path()]), RunSet::new("b", [b.path()])];
        let (latencies, causes) = latency_tables(&run_sets, GcCauseFilter::default())?;

        let row = |name: &str| {
            latencies
                .rows
                .iter()
                .find(|(b, _)| *b == name)
                .map(|(_, s)| s.clone())
                .expect("row")
        };
        let dacapo = row("dacapo");
        assert_eq!((dacapo[0].count, dacapo[0].mean, dacapo[0].max), (3, 12., 30.));
        assert_eq!((dacapo[1].count, dacapo[1].mean), (1, 3.));
        let specjvm = row("specjvm2008");
        assert_eq!(specjvm[0].count, 0);
        assert!(specjvm[0].mean.is_nan());

        let young = "Pause Young (Normal) (G1 Evacuation Pause)";
        let full = "Pause Full (System.gc())";
        assert_eq!(causes.get("dacapo", "a", young), Some(2));
        assert_eq!(causes.get("dacapo", "a", full), Some(1));
        assert_eq!(causes.get("rubykon", "a", full), Some(0));
        assert_eq!(causes.get("rubykon", "b", young), Some(0));
        // run set b never saw a full GC
        assert_eq!(causes.get("dacapo", "b", full), None);

        let csv = String::from_utf8(csv_bytes(&causes)?)?;
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some(
                "Benchmark,a/Pause Full (System.gc()),\
                 a/Pause Young (Normal) (G1 Evacuation Pause),\
                 b/Pause Young (Normal) (G1 Evacuation Pause)"
            )
        );
        assert_eq!(lines.next(), Some("BigRamTesterS,0,0,0"));
        assert_eq!(csv.lines().count(), 1 + LATENCY_FAMILIES.len());
        assert!(csv.contains("\ndacapo,1,2,1\n"));

        let csv = String::from_utf8(csv_bytes(&latencies)?)?;
        assert!(csv.starts_with("Benchmark,a/mean,a/min,a/max,a/count,a/std,a/p05,a/p95,b/mean"));
        assert!(csv.contains("\nBigRamTesterS,,,,0,,,,,,,0,,,\n"));
        Ok(())
    }

    #[test]
    fn t_filter_applies() -> Result<()> {
        let a = tempfile::tempdir()?;
        write_log(a.path(), "jbb2005", "x.log", &format!("{FULL}30ms\n{YOUNG}2ms\n"))?;
        let filter = GcCauseFilter {
            exclude_full: true,
            exclude_system_gc: false,
        };
        let (latencies, causes) = latency_tables(&[RunSet::new("a", [a.path()])], filter)?;
        assert_eq!(causes.columns.len(), 1);
        let (_, jbb) = &latencies.rows[6];
        assert_eq!((jbb[0].count, jbb[0].mean), (1, 2.));
        Ok(())
    }
}
