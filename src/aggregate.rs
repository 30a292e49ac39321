//! Grouping the raw samples of a family by configuration key and
//! reducing each group to a `Summary`.

use std::borrow::Cow;
use std::collections::BTreeMap;

use anyhow::Result;
use kstring::KString;
use smallvec::smallvec;
use strum::IntoEnumIterator;

use crate::config::AnalysisConfig;
use crate::family::{Family, KeySpec, ValueColumn};
use crate::key::{ConfigKey, KeyCell};
use crate::results_file::{check_exist, ResultsFile};
use crate::run_set::RunSet;
use crate::stats::outliers::{trim_counts, trim_outliers};
use crate::stats::{Summary, SummaryField};
use crate::tables::table_view::{
    number_cell, Cell, ColumnFormatting, ColumnHeader, Highlight, TableView, Unit,
};
use crate::{debug, info};

/// Raw samples of one family, pooled over all files, by key.
pub type Samples = BTreeMap<ConfigKey, Vec<f64>>;

/// Add the samples from `file` to `samples`, applying the family's
/// key selection and row filter.
pub fn collect_samples(family: &Family, file: &ResultsFile, samples: &mut Samples) -> Result<()> {
    let key_columns: Vec<usize> = match family.key {
        KeySpec::Columns(columns) => columns
            .iter()
            .map(|c| file.column_index(c))
            .collect::<Result<_, _>>()?,
        KeySpec::Constant { .. } => Vec::new(),
    };
    let value_column = match family.value {
        ValueColumn::Named(column) => file.column_index(column)?,
        ValueColumn::Sole => file.sole_other_column(family.key.labels())?,
    };
    let filter = family
        .filter
        .map(|filter| -> Result<_> { Ok((file.column_index(filter.column)?, filter.equals)) })
        .transpose()?;

    for record in &file.records {
        if let Some((column, equals)) = filter {
            if record.get(column) != Some(equals) {
                continue;
            }
        }
        let Some(value) = file.number(record, value_column)? else {
            continue;
        };
        let key: ConfigKey = match family.key {
            KeySpec::Columns(_) => key_columns
                .iter()
                .map(|i| KeyCell::parse(record.get(*i).unwrap_or("")))
                .collect(),
            KeySpec::Constant { value, .. } => ConfigKey(smallvec![KeyCell::from(value)]),
        };
        samples.entry(key).or_default().push(value);
    }
    Ok(())
}

/// The summary statistics of one family for one run set.
#[derive(Debug, Clone)]
pub struct AggregateTable {
    pub family: &'static Family,
    /// Name of the run set these statistics are from
    pub run_set: KString,
    pub rows: BTreeMap<ConfigKey, Summary>,
}

impl AggregateTable {
    /// Summarize already collected samples, trimming outliers first
    /// where the family allows it and `config` asks for it.
    pub fn from_samples(
        family: &'static Family,
        run_set: KString,
        samples: Samples,
        config: &AnalysisConfig,
    ) -> Self {
        let drop_fraction = if family.trim_outliers {
            config.renaissance_drop_outliers
        } else {
            0.
        };
        let rows = samples
            .into_iter()
            .map(|(key, vals)| {
                let vals = if drop_fraction > 0. {
                    let (low, high) = trim_counts(vals.len(), drop_fraction);
                    debug!(
                        "{}/{run_set} {key}: dropping {low} low and {high} high of {} samples",
                        family.name,
                        vals.len()
                    );
                    trim_outliers(vals, drop_fraction)
                } else {
                    vals
                };
                (key, Summary::from_values(&vals))
            })
            .collect();
        Self {
            family,
            run_set,
            rows,
        }
    }

    /// Read the family's results file from every directory of
    /// `run_set` and aggregate them. All files are checked for
    /// existence before any is read.
    pub fn load(family: &'static Family, run_set: &RunSet, config: &AnalysisConfig) -> Result<Self> {
        let paths = run_set.results_files(family);
        check_exist(&paths)?;
        let mut samples = Samples::new();
        for path in &paths {
            info!("loading {} results from {path:?}", family.name);
            let file = ResultsFile::read(path)?;
            collect_samples(family, &file, &mut samples)?;
        }
        Ok(Self::from_samples(
            family,
            run_set.name.clone(),
            samples,
            config,
        ))
    }

    pub fn get(&self, key: &ConfigKey) -> Option<&Summary> {
        self.rows.get(key)
    }
}

/// Title columns for the key of `family`, one per key column.
pub fn key_headers(family: &Family) -> Vec<ColumnHeader> {
    family
        .key
        .labels()
        .iter()
        .map(|label| {
            (
                Cow::Borrowed(*label),
                Unit::None,
                ColumnFormatting::String { width_chars: None },
            )
        })
        .collect()
}

pub fn key_cells(key: &ConfigKey) -> impl Iterator<Item = Cell<'static>> + '_ {
    key.cells()
        .iter()
        .map(|cell| (Cow::Owned(cell.to_string()), Highlight::Neutral))
}

impl TableView for AggregateTable {
    fn table_name(&self) -> Cow<str> {
        self.family.name.into()
    }

    fn table_view_header(&self) -> Vec<ColumnHeader> {
        let mut header = key_headers(self.family);
        header.extend(SummaryField::iter().map(|field| {
            let unit = match field {
                SummaryField::Count => Unit::Count,
                _ => Unit::Measured(self.family.unit),
            };
            (field.label().into(), unit, ColumnFormatting::Number)
        }));
        header
    }

    fn table_view_body<'s>(&'s self) -> Box<dyn Iterator<Item = Vec<Cell<'s>>> + 's> {
        Box::new(self.rows.iter().map(|(key, summary)| {
            let mut row: Vec<Cell> = key_cells(key).collect();
            row.extend(SummaryField::iter().map(|field| match field {
                SummaryField::Count => (summary.count.to_string().into(), Highlight::Neutral),
                _ => number_cell(Some(summary.get(field))),
            }));
            row
        }))
    }
}
