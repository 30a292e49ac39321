//! The benchmark families of the suite, described as data: where the
//! results file lives, which columns form the key, which column holds
//! the measurement, and whether larger or smaller values are better.

use std::path::{Path, PathBuf};

/// Which direction of change is an improvement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IsBetter {
    /// Throughput, scores: `delta = candidate - baseline`
    Larger,
    /// Times: `delta = baseline - candidate` (the "reverse" sign)
    Smaller,
}

impl IsBetter {
    /// Positive values are always an improvement.
    pub fn delta(self, baseline: f64, candidate: f64) -> f64 {
        match self {
            IsBetter::Larger => candidate - baseline,
            IsBetter::Smaller => baseline - candidate,
        }
    }

    pub fn is_reverse(self) -> bool {
        self == IsBetter::Smaller
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeySpec {
    /// Group by the values of these columns.
    Columns(&'static [&'static str]),
    /// No natural key: all rows form one group, reported under
    /// `label` with key value `value`.
    Constant { label: &'static str, value: i64 },
}

impl KeySpec {
    /// Column titles of the key in output tables.
    pub fn labels(&self) -> &[&'static str] {
        match self {
            KeySpec::Columns(columns) => columns,
            KeySpec::Constant { label, .. } => std::slice::from_ref(label),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValueColumn {
    Named(&'static str),
    /// The one column that is not part of the key (it is an error if
    /// there are more).
    Sole,
}

/// Keep only rows where `column` equals `equals`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowFilter {
    pub column: &'static str,
    pub equals: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Family {
    /// Used for the output file names and worksheet names
    pub name: &'static str,
    /// Path of the results file relative to a run directory
    pub results_path: &'static str,
    pub key: KeySpec,
    pub value: ValueColumn,
    pub filter: Option<RowFilter>,
    /// Whether the configured outlier trimming applies
    pub trim_outliers: bool,
    pub better: IsBetter,
    /// Unit of the value column, for display
    pub unit: &'static str,
}

impl Family {
    pub fn results_file(&self, run_dir: &Path) -> PathBuf {
        run_dir.join(self.results_path)
    }
}

const fn dacapo(name: &'static str, results_path: &'static str) -> Family {
    Family {
        name,
        results_path,
        key: KeySpec::Columns(&["Benchmark"]),
        value: ValueColumn::Named("Time (msec)"),
        filter: None,
        trim_outliers: false,
        better: IsBetter::Smaller,
        unit: "msec",
    }
}

pub const COMPILER_SPEED: Family = Family {
    name: "CompilerSpeed",
    results_path: "benchmarks/CompilerSpeed/results.csv",
    key: KeySpec::Columns(&["Time limit", "Threads"]),
    value: ValueColumn::Named("Compiles/Sec"),
    filter: None,
    trim_outliers: false,
    better: IsBetter::Larger,
    unit: "compiles/sec",
};

pub const DACAPO: Family = dacapo("DaCapo", "benchmarks/dacapo/results.csv");
pub const DACAPO_LARGE: Family = dacapo("DaCapo_large", "benchmarks/dacapo_large/results.csv");
pub const DACAPO_HUGE: Family = dacapo("DaCapo_huge", "benchmarks/dacapo_huge/results.csv");

pub const DELAY_INDUCER: Family = Family {
    name: "DelayInducer",
    results_path: "benchmarks/DelayInducer/results.csv",
    key: KeySpec::Constant {
        label: "Benchmark",
        value: 0,
    },
    value: ValueColumn::Sole,
    filter: None,
    trim_outliers: false,
    better: IsBetter::Smaller,
    unit: "msec",
};

pub const JBB2005: Family = Family {
    name: "jbb2005",
    results_path: "benchmarks/jbb2005/results.csv",
    key: KeySpec::Columns(&["warehouses"]),
    value: ValueColumn::Sole,
    filter: None,
    trim_outliers: false,
    better: IsBetter::Larger,
    unit: "throughput",
};

pub const OPTAPLANNER: Family = Family {
    name: "Optaplanner",
    results_path: "benchmarks/optaplanner/results/summary.csv",
    key: KeySpec::Columns(&["solverId"]),
    value: ValueColumn::Named("scoreCalculationCount"),
    filter: None,
    trim_outliers: false,
    better: IsBetter::Larger,
    unit: "score",
};

pub const PJBB2005_MSEC: Family = Family {
    name: "pjbb2005_msec",
    results_path: "benchmarks/pjbb2005/results1.csv",
    key: KeySpec::Columns(&["Operation"]),
    value: ValueColumn::Sole,
    filter: None,
    trim_outliers: false,
    better: IsBetter::Smaller,
    unit: "msec",
};

pub const PJBB2005_THROUGHPUT: Family = Family {
    name: "pjbb2005_throughput",
    results_path: "benchmarks/pjbb2005/results2.csv",
    key: KeySpec::Columns(&["warehouses"]),
    value: ValueColumn::Sole,
    filter: None,
    trim_outliers: false,
    better: IsBetter::Larger,
    unit: "throughput",
};

pub const RENAISSANCE: Family = Family {
    name: "Renaissance",
    results_path: "benchmarks/renaissance/results.csv",
    key: KeySpec::Columns(&["benchmark"]),
    value: ValueColumn::Named("duration_ns"),
    filter: None,
    trim_outliers: true,
    better: IsBetter::Smaller,
    unit: "ns",
};

pub const RUBYKON: Family = Family {
    name: "Rubykon",
    results_path: "benchmarks/rubykon/results.csv",
    key: KeySpec::Columns(&["Size", "Iterations"]),
    value: ValueColumn::Named("Performance"),
    filter: Some(RowFilter {
        column: "Type",
        equals: "runtime",
    }),
    trim_outliers: false,
    better: IsBetter::Larger,
    unit: "performance",
};

pub const SPECJVM2008: Family = Family {
    name: "specjvm2008",
    results_path: "benchmarks/specjvm2008/results.csv",
    key: KeySpec::Columns(&["Benchmark"]),
    value: ValueColumn::Sole,
    filter: None,
    trim_outliers: false,
    better: IsBetter::Larger,
    unit: "ops/m",
};

/// All families, in report order.
pub const FAMILIES: &[Family] = &[
    COMPILER_SPEED,
    DACAPO,
    DACAPO_LARGE,
    DACAPO_HUGE,
    DELAY_INDUCER,
    JBB2005,
    OPTAPLANNER,
    PJBB2005_MSEC,
    PJBB2005_THROUGHPUT,
    RENAISSANCE,
    RUBYKON,
    SPECJVM2008,
];

pub fn family_by_name(name: &str) -> Option<&'static Family> {
    FAMILIES.iter().find(|family| family.name == name)
}

/// How families are pooled into rows of the improvements summary:
/// (row label, member family names).
pub const IMPROVEMENT_GROUPS: &[(&str, &[&str])] = &[
    ("CompilerSpeed", &["CompilerSpeed"]),
    ("DaCapo", &["DaCapo", "DaCapo_large", "DaCapo_huge"]),
    ("DelayInducer", &["DelayInducer"]),
    ("jbb2005", &["jbb2005"]),
    ("Optaplanner", &["Optaplanner"]),
    ("pjbb2005 [msec]", &["pjbb2005_msec"]),
    ("pjbb2005 [throughput]", &["pjbb2005_throughput"]),
    ("Renaissance", &["Renaissance"]),
    ("Rubykon", &["Rubykon"]),
    ("specjvm2008", &["specjvm2008"]),
];
