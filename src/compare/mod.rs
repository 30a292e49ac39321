//! Comparing the aggregates of several run sets of one family against
//! the first (the baseline). Two shapes: `pairwise` for direct
//! before/after comparison, `exploratory` for many run sets relative
//! to the baseline.

pub mod exploratory;
pub mod label;
pub mod pairwise;

use std::collections::BTreeSet;

use anyhow::{bail, Result};
use kstring::KString;

use crate::aggregate::AggregateTable;
use crate::config::AnalysisConfig;
use crate::family::Family;
use crate::key::ConfigKey;
use crate::run_set::RunSet;
use crate::warn;

/// The aggregates of one family for each run set, in command line
/// order; the first is the baseline.
#[derive(Debug)]
pub struct FamilyAggregates {
    pub family: &'static Family,
    tables: Vec<AggregateTable>,
}

impl FamilyAggregates {
    pub fn new(family: &'static Family, tables: Vec<AggregateTable>) -> Result<Self> {
        if tables.is_empty() {
            bail!("no run sets to compare for {}", family.name)
        }
        if let Some(table) = tables.iter().find(|t| t.family.name != family.name) {
            bail!(
                "aggregate of {} given for comparing {}",
                table.family.name,
                family.name
            )
        }
        let aggregates = Self { family, tables };
        aggregates.warn_missing_keys();
        Ok(aggregates)
    }

    pub fn load(
        family: &'static Family,
        run_sets: &[RunSet],
        config: &AnalysisConfig,
    ) -> Result<Self> {
        let tables = run_sets
            .iter()
            .map(|run_set| AggregateTable::load(family, run_set, config))
            .collect::<Result<_>>()?;
        Self::new(family, tables)
    }

    pub fn baseline(&self) -> &AggregateTable {
        &self.tables[0]
    }

    /// All run sets, baseline first.
    pub fn tables(&self) -> &[AggregateTable] {
        &self.tables
    }

    /// The run sets compared against the baseline.
    pub fn candidates(&self) -> &[AggregateTable] {
        &self.tables[1..]
    }

    /// The union of the keys of all run sets.
    pub fn keys(&self) -> BTreeSet<&ConfigKey> {
        self.tables.iter().flat_map(|t| t.rows.keys()).collect()
    }

    /// The run set tables ordered by run set name.
    pub fn sorted_by_name(&self) -> Vec<&AggregateTable> {
        let mut tables: Vec<&AggregateTable> = self.tables.iter().collect();
        tables.sort_by(|a, b| a.run_set.cmp(&b.run_set));
        tables
    }

    pub fn run_names(&self) -> impl Iterator<Item = &KString> {
        self.tables.iter().map(|t| &t.run_set)
    }

    fn warn_missing_keys(&self) {
        for key in self.keys() {
            for table in &self.tables {
                if !table.rows.contains_key(key) {
                    warn!(
                        "{}: {key} is missing from run set {}",
                        self.family.name, table.run_set
                    );
                }
            }
        }
    }
}

/// The mean of `key` in `table`, if present.
pub fn mean_of(table: &AggregateTable, key: &ConfigKey) -> Option<f64> {
    table.get(key).map(|summary| summary.mean)
}


#[cfg(test)]
mod tests {
    use super::test_util::aggregate;
    use super::*;
    use crate::family::{DACAPO, RUBYKON};

    #[test]
    fn t_keys_union() -> Result<()> {
        let aggs = FamilyAggregates::new(
            &DACAPO,
            vec![
                aggregate(&DACAPO, "b", &[("fop", &[1., 2.]), ("h2", &[3.])]),
                aggregate(&DACAPO, "a", &[("fop", &[1.]), ("pmd", &[4.])]),
            ],
        )?;
        let keys: Vec<String> = aggs.keys().iter().map(|k| k.to_string()).collect();
        assert_eq!(keys, ["fop", "h2", "pmd"]);
        assert_eq!(aggs.baseline().run_set.as_str(), "b");
        let sorted: Vec<&str> = aggs.sorted_by_name().iter().map(|t| t.run_set.as_str()).collect();
        assert_eq!(sorted, ["a", "b"]);
        Ok(())
    }

    #[test]
    fn t_rejects_mixed_families() {
        assert!(FamilyAggregates::new(&DACAPO, vec![]).is_err());
        assert!(FamilyAggregates::new(
            &DACAPO,
            vec![aggregate(&RUBYKON, "a", &[("1", &[1.])])]
        )
        .is_err());
    }
}
