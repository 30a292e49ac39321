//! Many run sets relative to the baseline: for every run set its mean
//! and confidence bounds divided by the baseline mean, plus its
//! improvement over the baseline.

use std::borrow::Cow;
use std::collections::BTreeMap;

use itertools::Itertools;
use kstring::KString;
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

use super::{mean_of, FamilyAggregates};
use crate::aggregate::{key_cells, key_headers, AggregateTable};
use crate::family::Family;
use crate::key::ConfigKey;
use crate::stats::Summary;
use crate::tables::table_view::{
    number_cell, number_string, Cell, ColumnFormatting, ColumnHeader, Highlight, TableView, Unit,
};

/// The per run set columns. Declared in the order of their labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, EnumIter)]
pub enum ExploratoryMetric {
    P05,
    P95,
    /// Difference of the (undivided) means, positive for improvements
    Improvement,
    Mean,
}

impl ExploratoryMetric {
    pub fn label(self) -> &'static str {
        match self {
            ExploratoryMetric::P05 => "5th Percentile",
            ExploratoryMetric::P95 => "95th Percentile",
            ExploratoryMetric::Improvement => "Improvement",
            ExploratoryMetric::Mean => "Mean",
        }
    }

    fn relative_field(self, summary: &Summary) -> Option<f64> {
        match self {
            ExploratoryMetric::P05 => Some(summary.p05),
            ExploratoryMetric::P95 => Some(summary.p95),
            ExploratoryMetric::Mean => Some(summary.mean),
            ExploratoryMetric::Improvement => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ExploratoryTable {
    pub family: &'static Family,
    /// Sorted by (run set name, metric label)
    pub columns: Vec<(KString, ExploratoryMetric)>,
    /// One value per entry in `columns`
    pub rows: BTreeMap<ConfigKey, Vec<Option<f64>>>,
}

impl ExploratoryTable {
    pub fn new(aggregates: &FamilyAggregates) -> Self {
        let family = aggregates.family;
        let baseline = aggregates.baseline();
        let tables = aggregates.sorted_by_name();
        let columns: Vec<(&AggregateTable, ExploratoryMetric)> = tables
            .iter()
            .flat_map(|table| ExploratoryMetric::iter().map(move |metric| (*table, metric)))
            .collect();

        let rows = aggregates
            .keys()
            .into_iter()
            .map(|key| {
                let baseline_mean = mean_of(baseline, key);
                let values = columns
                    .iter()
                    .map(|(table, metric)| {
                        let baseline_mean = baseline_mean?;
                        let summary = table.get(key)?;
                        match metric {
                            ExploratoryMetric::Improvement => {
                                Some(family.better.delta(baseline_mean, summary.mean))
                            }
                            _ => Some(metric.relative_field(summary)? / baseline_mean),
                        }
                    })
                    .collect();
                (key.clone(), values)
            })
            .collect();

        Self {
            family,
            columns: columns
                .into_iter()
                .map(|(table, metric)| (table.run_set.clone(), metric))
                .collect(),
            rows,
        }
    }

    pub fn column_index(&self, run_set: &str, metric: ExploratoryMetric) -> Option<usize> {
        self.columns
            .iter()
            .position(|(name, m)| name.as_str() == run_set && *m == metric)
    }

    /// The run set names, sorted.
    pub fn run_names(&self) -> impl Iterator<Item = &KString> {
        self.columns.iter().map(|(name, _)| name).dedup()
    }

    /// The improvements of `run_set` over all keys, skipping missing
    /// values.
    pub fn improvements<'s>(&'s self, run_set: &str) -> impl Iterator<Item = f64> + 's {
        let column = self.column_index(run_set, ExploratoryMetric::Improvement);
        self.rows
            .values()
            .filter_map(move |values| values[column?])
            .filter(|x| !x.is_nan())
    }
}

impl TableView for ExploratoryTable {
    fn table_name(&self) -> Cow<str> {
        self.family.name.into()
    }

    fn table_view_header(&self) -> Vec<ColumnHeader> {
        let mut header = key_headers(self.family);
        header.extend(self.columns.iter().map(|(name, metric)| {
            let unit = match metric {
                ExploratoryMetric::Improvement => Unit::Measured(self.family.unit),
                _ => Unit::DimensionLess,
            };
            (
                Cow::Owned(format!("{name}/{}", metric.label())),
                unit,
                ColumnFormatting::Number,
            )
        }));
        header
    }

    fn table_view_body<'s>(&'s self) -> Box<dyn Iterator<Item = Vec<Cell<'s>>> + 's> {
        Box::new(self.rows.iter().map(|(key, values)| {
            let mut cells: Vec<Cell> = key_cells(key).collect();
            cells.extend(
                self.columns
                    .iter()
                    .zip(values)
                    .map(|((_, metric), value)| match metric {
                        ExploratoryMetric::Improvement => {
                            (number_string(*value), Highlight::from_signed(*value))
                        }
                        _ => number_cell(*value),
                    }),
            );
            cells
        }))
    }
}
