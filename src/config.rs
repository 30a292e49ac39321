//! Settings that change how results are aggregated. Read once from
//! the environment (the variable names the benchmark suite's scripts
//! use), possibly overridden from the command line, then passed
//! explicitly to the components that need them.

use anyhow::{bail, Result};

use crate::latency::GcCauseFilter;
use crate::utillib::env_var::{get_env_bool, get_env_parsed};

pub const RENAISSANCE_DROP_OUTLIERS_VAR: &str = "RENAISSANCE_DROP_OUTLIERS";
pub const LATENCY_FILTER_FULL_VAR: &str = "LATENCY_FILTER_FULL";
pub const LATENCY_FILTER_SYSTEM_GC_VAR: &str = "LATENCY_FILTER_SYSTEM_GC";

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AnalysisConfig {
    /// Fraction of samples per group to drop for families that allow
    /// outlier trimming, half of it from each tail. 0 disables.
    pub renaissance_drop_outliers: f64,
    /// Skip GC pauses whose cause contains "Pause Full"
    pub latency_filter_full: bool,
    /// Skip GC pauses whose cause contains "System.gc()"
    pub latency_filter_system_gc: bool,
}

/// Command line overrides for `AnalysisConfig`.
#[derive(Debug, Clone, clap::Args)]
pub struct AnalysisOpts {
    /// Fraction (0 <= f < 1) of Renaissance samples per benchmark to
    /// drop as outliers, half from the low and half from the high
    /// end. Overrides the RENAISSANCE_DROP_OUTLIERS env variable.
    #[clap(long)]
    pub drop_outliers: Option<f64>,

    /// Ignore "Pause Full" GC pauses (also enabled by
    /// LATENCY_FILTER_FULL=yes)
    #[clap(long)]
    pub filter_full_gc: bool,

    /// Ignore GC pauses caused by System.gc() (also enabled by
    /// LATENCY_FILTER_SYSTEM_GC=yes)
    #[clap(long)]
    pub filter_system_gc: bool,
}

impl AnalysisConfig {
    pub fn from_env() -> Result<Self> {
        Self {
            renaissance_drop_outliers: get_env_parsed(RENAISSANCE_DROP_OUTLIERS_VAR, 0.)?,
            latency_filter_full: get_env_bool(LATENCY_FILTER_FULL_VAR, false)?,
            latency_filter_system_gc: get_env_bool(LATENCY_FILTER_SYSTEM_GC_VAR, false)?,
        }
        .checked()
    }

    pub fn with_overrides(self, opts: &AnalysisOpts) -> Result<Self> {
        let AnalysisOpts {
            drop_outliers,
            filter_full_gc,
            filter_system_gc,
        } = opts;
        Self {
            renaissance_drop_outliers: drop_outliers.unwrap_or(self.renaissance_drop_outliers),
            latency_filter_full: self.latency_filter_full || *filter_full_gc,
            latency_filter_system_gc: self.latency_filter_system_gc || *filter_system_gc,
        }
        .checked()
    }

    fn checked(self) -> Result<Self> {
        let f = self.renaissance_drop_outliers;
        if !(f.is_finite() && (0. ..1.).contains(&f)) {
            bail!("outlier drop fraction must be in the range [0, 1), got {f}")
        }
        Ok(self)
    }

    pub fn gc_cause_filter(&self) -> GcCauseFilter {
        GcCauseFilter {
            exclude_full: self.latency_filter_full,
            exclude_system_gc: self.latency_filter_system_gc,
        }
    }
}
