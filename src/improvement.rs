//! One improvement score per benchmark family and run set: the mean,
//! over all configuration keys, of the exploratory `Improvement`
//! column.

use std::borrow::Cow;
use std::collections::BTreeSet;

use kstring::KString;

use crate::compare::exploratory::ExploratoryTable;
use crate::family::IMPROVEMENT_GROUPS;
use crate::tables::table_view::{
    number_string, Cell, ColumnFormatting, ColumnHeader, Highlight, TableView, Unit,
};

pub const IMPROVEMENTS_TABLE_NAME: &str = "improvements";

#[derive(Debug, Clone, PartialEq)]
pub struct ImprovementRow {
    pub label: &'static str,
    /// One per entry in `ImprovementSummary::run_names`; `None` if the
    /// group has no improvement values for that run set
    pub means: Vec<Option<f64>>,
}

#[derive(Debug, Clone)]
pub struct ImprovementSummary {
    /// Sorted
    pub run_names: Vec<KString>,
    pub rows: Vec<ImprovementRow>,
}

fn mean(vals: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, n) = vals.fold((0., 0usize), |(sum, n), x| (sum + x, n + 1));
    (n > 0).then(|| sum / n as f64)
}

impl ImprovementSummary {
    /// Rows follow `IMPROVEMENT_GROUPS`; groups none of whose
    /// families are among `tables` are left out.
    pub fn new(tables: &[ExploratoryTable]) -> Self {
        let run_names: Vec<KString> = tables
            .iter()
            .flat_map(|t| t.run_names())
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let rows = IMPROVEMENT_GROUPS
            .iter()
            .filter_map(|(label, members)| {
                let group: Vec<&ExploratoryTable> = tables
                    .iter()
                    .filter(|t| members.contains(&t.family.name))
                    .collect();
                if group.is_empty() {
                    return None;
                }
                let means = run_names
                    .iter()
                    .map(|run| mean(group.iter().flat_map(|t| t.improvements(run))))
                    .collect();
                Some(ImprovementRow {
                    label: *label,
                    means,
                })
            })
            .collect();

        Self { run_names, rows }
    }

    pub fn get(&self, label: &str, run_set: &str) -> Option<f64> {
        let i = self.run_names.iter().position(|n| n.as_str() == run_set)?;
        self.rows.iter().find(|r| r.label == label)?.means[i]
    }
}

impl TableView for ImprovementSummary {
    fn table_name(&self) -> Cow<str> {
        IMPROVEMENTS_TABLE_NAME.into()
    }

    fn table_view_header(&self) -> Vec<ColumnHeader> {
        let mut header: Vec<ColumnHeader> = vec![(
            "Benchmark".into(),
            Unit::None,
            ColumnFormatting::String { width_chars: None },
        )];
        header.extend(self.run_names.iter().map(|name| {
            (
                Cow::Owned(name.to_string()),
                Unit::DimensionLess,
                ColumnFormatting::Number,
            )
        }));
        header
    }

    fn table_view_body<'s>(&'s self) -> Box<dyn Iterator<Item = Vec<Cell<'s>>> + 's> {
        Box::new(self.rows.iter().map(|row| {
            let mut cells: Vec<Cell> = vec![(row.label.into(), Highlight::Neutral)];
            cells.extend(
                row.means
                    .iter()
                    .map(|x| (number_string(*x), Highlight::from_signed(*x))),
            );
            cells
        }))
    }
}
