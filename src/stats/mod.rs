//! The summary statistics computed for every group of samples: mean,
//! min, max, count, standard deviation, and the lower/upper confidence
//! bounds of the mean (reported as "5th Percentile" and "95th
//! Percentile", which is what the benchmark reports have always
//! called them).

pub mod confidence;
pub mod outliers;

use strum_macros::EnumIter;

use self::confidence::{p05, p95, sample_std_dev};

/// Selects a field of `Summary`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
pub enum SummaryField {
    Mean,
    Min,
    Max,
    Count,
    StdDev,
    P05,
    P95,
}

impl SummaryField {
    /// Column title in the per-family tables.
    pub fn label(self) -> &'static str {
        match self {
            SummaryField::Mean => "Mean",
            SummaryField::Min => "Min",
            SummaryField::Max => "Max",
            SummaryField::Count => "Count",
            SummaryField::StdDev => "Std. Dev",
            SummaryField::P05 => "5th Percentile",
            SummaryField::P95 => "95th Percentile",
        }
    }

    /// Column title in the latency tables.
    pub fn short_label(self) -> &'static str {
        match self {
            SummaryField::Mean => "mean",
            SummaryField::Min => "min",
            SummaryField::Max => "max",
            SummaryField::Count => "count",
            SummaryField::StdDev => "std",
            SummaryField::P05 => "p05",
            SummaryField::P95 => "p95",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub count: usize,
    /// NaN for fewer than 2 values
    pub std_dev: f64,
    /// NaN for fewer than 2 values
    pub p05: f64,
    /// NaN for fewer than 2 values
    pub p95: f64,
}

impl Summary {
    /// Never fails: degenerate groups (empty, or a single value) give
    /// NaN for the fields that can't be computed.
    pub fn from_values(vals: &[f64]) -> Self {
        let count = vals.len();
        if count == 0 {
            return Summary {
                mean: f64::NAN,
                min: f64::NAN,
                max: f64::NAN,
                count,
                std_dev: f64::NAN,
                p05: f64::NAN,
                p95: f64::NAN,
            };
        }
        let (min, max) = vals
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), v| {
                (min.min(*v), max.max(*v))
            });
        Summary {
            mean: confidence::mean(vals),
            min,
            max,
            count,
            std_dev: sample_std_dev(vals),
            p05: p05(vals).unwrap_or(f64::NAN),
            p95: p95(vals).unwrap_or(f64::NAN),
        }
    }

    pub fn get(&self, field: SummaryField) -> f64 {
        match field {
            SummaryField::Mean => self.mean,
            SummaryField::Min => self.min,
            SummaryField::Max => self.max,
            SummaryField::Count => self.count as f64,
            SummaryField::StdDev => self.std_dev,
            SummaryField::P05 => self.p05,
            SummaryField::P95 => self.p95,
        }
    }
}
