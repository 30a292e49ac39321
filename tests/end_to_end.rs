use std::fs::{self, File};
use std::io::Read;
use std::path::Path;

use anyhow::Result;
use jvm_bench_analysis::config::AnalysisConfig;
use jvm_bench_analysis::report::{aggregate_report, analyze_report, compare_report, latency_report};
use jvm_bench_analysis::run_set::{parse_run_sets, RunSet};
use tempfile::TempDir;
use zip::ZipArchive;

/// A run directory with a results file for every family; DaCapo gets
/// `dacapo_times` for luindex.
fn run_dir(dacapo_times: &[f64]) -> Result<TempDir> {
    let dir = tempfile::tempdir()?;
    let dacapo: String = dacapo_times
        .iter()
        .map(|t| format!("luindex,{t}\n"))
        .collect();
    let files: &[(&str, String)] = &[
        (
            "benchmarks/CompilerSpeed/results.csv",
            "Time limit,Threads,Compiles/Sec\n15,1,100.5\n15,1,99.5\n".into(),
        ),
        (
            "benchmarks/dacapo/results.csv",
            format!("Benchmark,Time (msec)\n{dacapo}"),
        ),
        (
            "benchmarks/dacapo_large/results.csv",
            "Benchmark,Time (msec)\nh2,5000\nh2,5100\n".into(),
        ),
        (
            "benchmarks/dacapo_huge/results.csv",
            "Benchmark,Time (msec)\nh2,15000\n".into(),
        ),
        ("benchmarks/DelayInducer/results.csv", "Time\n1000\n1010\n".into()),
        ("benchmarks/jbb2005/results.csv", "warehouses,score\n1,5000\n2,9000\n".into()),
        (
            "benchmarks/optaplanner/results/summary.csv",
            "solverId,scoreCalculationCount\n0,123456\n".into(),
        ),
        ("benchmarks/pjbb2005/results1.csv", "Operation,time\nTotal,2000\n".into()),
        ("benchmarks/pjbb2005/results2.csv", "warehouses,throughput\n1,3000\n".into()),
        (
            "benchmarks/renaissance/results.csv",
            "benchmark,duration_ns,vm_start_unix_ms\nals,1000,1\nals,1100,1\n".into(),
        ),
        (
            "benchmarks/rubykon/results.csv",
            "Size,Iterations,Type,Performance\n19,100,runtime,3.5\n19,100,warmup,1\n".into(),
        ),
        ("benchmarks/specjvm2008/results.csv", "Benchmark,Score\ncompress,200\n".into()),
    ];
    for (path, content) in files {
        let path = dir.path().join(path);
        fs::create_dir_all(path.parent().expect("has parent"))?;
        fs::write(path, content)?;
    }
    Ok(dir)
}

fn read_entry(archive: &Path, name: &str) -> Result<String> {
    let mut zip = ZipArchive::new(File::open(archive)?)?;
    let mut s = String::new();
    zip.by_name(name)?.read_to_string(&mut s)?;
    Ok(s)
}

fn entry_names(archive: &Path) -> Result<Vec<String>> {
    let zip = ZipArchive::new(File::open(archive)?)?;
    Ok(zip.file_names().map(String::from).collect())
}

const FAMILY_ENTRIES: [&str; 12] = [
    "CompilerSpeed.csv",
    "DaCapo.csv",
    "DaCapo_large.csv",
    "DaCapo_huge.csv",
    "DelayInducer.csv",
    "jbb2005.csv",
    "Optaplanner.csv",
    "pjbb2005_msec.csv",
    "pjbb2005_throughput.csv",
    "Renaissance.csv",
    "Rubykon.csv",
    "specjvm2008.csv",
];

#[test]
fn t_compare_before_after() -> Result<()> {
    let d1 = run_dir(&[100., 102., 98., 101., 99.])?;
    let d2 = run_dir(&[90., 92., 88., 91., 89.])?;
    let d1 = d1.path().to_string_lossy().into_owned();
    let d2 = d2.path().to_string_lossy().into_owned();
    let run_sets = parse_run_sets(&["before", &d1, ";", "after", &d2])?;

    let out = tempfile::tempdir()?;
    let archive = out.path().join("compare.zip");
    compare_report(&run_sets, &AnalysisConfig::default())?.write(&archive, None)?;

    let mut names = entry_names(&archive)?;
    names.sort();
    let mut expected = FAMILY_ENTRIES.to_vec();
    expected.sort();
    assert_eq!(names, expected);

    let dacapo = read_entry(&archive, "DaCapo.csv")?;
    assert_eq!(
        dacapo,
        "Benchmark,after,before,\"Delta(before, after)\",\"Relative(before, after)\"\n\
         luindex,90,100,10,0.1\n"
    );
    // Larger is better, identical runs
    let jbb = read_entry(&archive, "jbb2005.csv")?;
    assert!(jbb.starts_with("warehouses,after,before,\"Delta(after, before)\""), "{jbb}");
    assert!(jbb.contains("\n2,9000,9000,0,0\n"), "{jbb}");
    Ok(())
}

#[test]
fn t_analyze_writes_improvements() -> Result<()> {
    let base = run_dir(&[100., 100.])?;
    let fast = run_dir(&[80., 80.])?;
    let run_sets = vec![
        RunSet::new("base", [base.path()]),
        RunSet::new("fast", [fast.path()]),
    ];
    let out = tempfile::tempdir()?;
    let archive = out.path().join("analyze.zip");
    let excel = out.path().join("analyze.xlsx");
    let report = analyze_report(&run_sets, &AnalysisConfig::default())?;
    assert_eq!(report.table_names().len(), 13);
    report.write(&archive, Some(&excel))?;
    assert!(excel.exists());

    let dacapo = read_entry(&archive, "DaCapo.csv")?;
    let mut lines = dacapo.lines();
    assert_eq!(
        lines.next(),
        Some(
            "Benchmark,base/5th Percentile,base/95th Percentile,base/Improvement,base/Mean,\
             fast/5th Percentile,fast/95th Percentile,fast/Improvement,fast/Mean"
        )
    );
    assert_eq!(lines.next(), Some("luindex,1,1,0,1,0.8,0.8,20,0.8"));

    let improvements = read_entry(&archive, "improvements.csv")?;
    let mut lines = improvements.lines();
    assert_eq!(lines.next(), Some("Benchmark,base,fast"));
    assert_eq!(lines.next(), Some("CompilerSpeed,0,0"));
    // luindex improved by 20, dacapo_large and dacapo_huge by 0
    assert_eq!(lines.next(), Some("DaCapo,0,6.666666666666667"));
    assert_eq!(improvements.lines().count(), 11);
    Ok(())
}

#[test]
fn t_aggregate_pools_directories() -> Result<()> {
    let d1 = run_dir(&[100., 102.])?;
    let d2 = run_dir(&[98.])?;
    let out = tempfile::tempdir()?;
    let archive = out.path().join("aggregate.zip");
    aggregate_report(
        &RunSet::new("all", [d1.path(), d2.path()]),
        &AnalysisConfig::default(),
    )?
    .write(&archive, None)?;

    let dacapo = read_entry(&archive, "DaCapo.csv")?;
    assert!(dacapo.contains("\nluindex,100,98,102,3,2,"), "{dacapo}");
    let delay = read_entry(&archive, "DelayInducer.csv")?;
    assert!(delay.starts_with("Benchmark,Mean,"), "{delay}");
    assert!(delay.contains("\n0,1005,1000,1010,4,"), "{delay}");
    let rubykon = read_entry(&archive, "Rubykon.csv")?;
    assert!(rubykon.contains("\n19,100,3.5,3.5,3.5,2,0,"), "{rubykon}");
    Ok(())
}

#[test]
fn t_missing_file_writes_nothing() -> Result<()> {
    let d1 = run_dir(&[100.])?;
    let d2 = run_dir(&[90.])?;
    fs::remove_file(d2.path().join("benchmarks/specjvm2008/results.csv"))?;
    let run_sets = vec![
        RunSet::new("before", [d1.path()]),
        RunSet::new("after", [d2.path()]),
    ];
    let out = tempfile::tempdir()?;
    let archive = out.path().join("compare.zip");
    let err = compare_report(&run_sets, &AnalysisConfig::default())
        .and_then(|report| report.write(&archive, None))
        .unwrap_err()
        .to_string();
    assert!(err.ends_with("does not exist"), "{err}");
    assert!(err.contains("specjvm2008/results.csv"), "{err}");
    assert!(!archive.exists());
    assert_eq!(fs::read_dir(out.path())?.count(), 0);
    Ok(())
}

#[test]
fn t_failed_workbook_leaves_no_archive() -> Result<()> {
    let d1 = run_dir(&[100.])?;
    let d2 = run_dir(&[90.])?;
    let run_sets = vec![
        RunSet::new("before", [d1.path()]),
        RunSet::new("after", [d2.path()]),
    ];
    let out = tempfile::tempdir()?;
    let archive = out.path().join("compare.zip");
    let excel = out.path().join("no-such-dir").join("compare.xlsx");
    let report = compare_report(&run_sets, &AnalysisConfig::default())?;
    assert!(report.write(&archive, Some(&excel)).is_err());
    assert_eq!(fs::read_dir(out.path())?.count(), 0);
    Ok(())
}

#[test]
fn t_latency() -> Result<()> {
    let d = run_dir(&[1.])?;
    let logs = d.path().join("benchmarks/BigRamTesterS/gc_logs");
    fs::create_dir_all(&logs)?;
    fs::write(
        logs.join("gc.log"),
        "[1s] GC(0) Pause Young (Normal) (G1 Evacuation Pause) 24M->4M(256M) 2.5ms\n\
         [2s] GC(1) Pause Full (System.gc()) 30M->2M(256M) 10ms\n",
    )?;
    let run_sets = vec![RunSet::new("r", [d.path()])];
    let out = tempfile::tempdir()?;
    let archive = out.path().join("latency.zip");
    let config = AnalysisConfig {
        latency_filter_full: true,
        ..Default::default()
    };
    latency_report(&run_sets, &config)?.write(&archive, None)?;

    let latencies = read_entry(&archive, "latencies.csv")?;
    assert!(latencies.contains("\nBigRamTesterS,2.5,2.5,2.5,1,,,\n"), "{latencies}");
    let causes = read_entry(&archive, "causes.csv")?;
    assert_eq!(
        causes.lines().next(),
        Some("Benchmark,r/Pause Young (Normal) (G1 Evacuation Pause)")
    );
    assert!(causes.contains("\nBigRamTesterS,1\nCompilerSpeed,0\n"), "{causes}");
    Ok(())
}
