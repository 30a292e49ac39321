//! Direct before/after comparison: the mean of every run set, plus
//! `Delta` and `Relative` columns for each run set against the
//! baseline.

use std::borrow::Cow;
use std::collections::BTreeMap;

use kstring::KString;

use super::label::{DerivedColumn, DerivedKind};
use super::{mean_of, FamilyAggregates};
use crate::aggregate::{key_cells, key_headers};
use crate::family::Family;
use crate::key::ConfigKey;
use crate::tables::table_view::{
    number_cell, number_string, Cell, ColumnFormatting, ColumnHeader, Highlight, TableView, Unit,
};

#[derive(Debug, Clone, PartialEq)]
pub struct PairwiseRow {
    /// One per entry in `PairwiseTable::run_names`
    pub means: Vec<Option<f64>>,
    /// One per entry in `PairwiseTable::derived`
    pub derived: Vec<Option<f64>>,
}

#[derive(Debug, Clone)]
pub struct PairwiseTable {
    pub family: &'static Family,
    /// Sorted
    pub run_names: Vec<KString>,
    /// `Delta` then `Relative` for each candidate, in command line
    /// order
    pub derived: Vec<DerivedColumn>,
    pub rows: BTreeMap<ConfigKey, PairwiseRow>,
}

impl PairwiseTable {
    pub fn new(aggregates: &FamilyAggregates) -> Self {
        let family = aggregates.family;
        let baseline = aggregates.baseline();
        let by_name = aggregates.sorted_by_name();
        let derived: Vec<(DerivedColumn, usize)> = aggregates
            .candidates()
            .iter()
            .enumerate()
            .flat_map(|(i, candidate)| {
                [DerivedKind::Delta, DerivedKind::Relative].map(|kind| {
                    (
                        DerivedColumn {
                            kind,
                            better: family.better,
                            baseline: baseline.run_set.clone(),
                            candidate: candidate.run_set.clone(),
                        },
                        i + 1,
                    )
                })
            })
            .collect();

        let rows = aggregates
            .keys()
            .into_iter()
            .map(|key| {
                let baseline_mean = mean_of(baseline, key);
                let row = PairwiseRow {
                    means: by_name.iter().map(|t| mean_of(t, key)).collect(),
                    derived: derived
                        .iter()
                        .map(|(column, table_index)| {
                            column.compute(
                                baseline_mean,
                                mean_of(&aggregates.tables()[*table_index], key),
                            )
                        })
                        .collect(),
                };
                (key.clone(), row)
            })
            .collect();

        Self {
            family,
            run_names: by_name.iter().map(|t| t.run_set.clone()).collect(),
            derived: derived.into_iter().map(|(column, _)| column).collect(),
            rows,
        }
    }

    /// Index of the column in `derived` shown as `label`.
    pub fn derived_index(&self, label: &str) -> Option<usize> {
        self.derived.iter().position(|c| c.to_string() == label)
    }
}

impl TableView for PairwiseTable {
    fn table_name(&self) -> Cow<str> {
        self.family.name.into()
    }

    fn table_view_header(&self) -> Vec<ColumnHeader> {
        let mut header = key_headers(self.family);
        header.extend(self.run_names.iter().map(|name| {
            (
                Cow::Owned(name.to_string()),
                Unit::Measured(self.family.unit),
                ColumnFormatting::Number,
            )
        }));
        header.extend(self.derived.iter().map(|column| {
            let unit = match column.kind {
                DerivedKind::Delta => Unit::Measured(self.family.unit),
                DerivedKind::Relative => Unit::DimensionLess,
            };
            (Cow::Owned(column.to_string()), unit, ColumnFormatting::Number)
        }));
        header
    }

    fn table_view_body<'s>(&'s self) -> Box<dyn Iterator<Item = Vec<Cell<'s>>> + 's> {
        Box::new(self.rows.iter().map(|(key, row)| {
            let mut cells: Vec<Cell> = key_cells(key).collect();
            cells.extend(row.means.iter().map(|mean| number_cell(*mean)));
            cells.extend(
                row.derived
                    .iter()
                    .map(|value| (number_string(*value), Highlight::from_signed(*value))),
            );
            cells
        }))
    }
}
