//! The complete pipelines behind the subcommands: check inputs, load
//! and aggregate, compare, and collect the resulting tables for
//! writing.

use std::path::Path;

use anyhow::{bail, Result};

use crate::aggregate::AggregateTable;
use crate::archive::write_archive;
use crate::compare::exploratory::ExploratoryTable;
use crate::compare::pairwise::PairwiseTable;
use crate::compare::FamilyAggregates;
use crate::config::AnalysisConfig;
use crate::family::FAMILIES;
use crate::improvement::ImprovementSummary;
use crate::info;
use crate::io_util::StagedFiles;
use crate::latency::tables::latency_tables;
use crate::run_set::RunSet;
use crate::tables::excel_table_view::excel_file_write;
use crate::tables::table_view::TableView;

/// The tables of one run of a pipeline, in output order.
pub struct Report {
    pub tables: Vec<Box<dyn TableView>>,
}

impl Report {
    pub fn table_views(&self) -> impl Iterator<Item = &dyn TableView> {
        self.tables.iter().map(|t| -> &dyn TableView { t.as_ref() })
    }

    pub fn table_names(&self) -> Vec<String> {
        self.table_views().map(|t| t.table_name().into_owned()).collect()
    }

    /// Write the zip archive, and the Excel workbook if `excel` is
    /// given. Either all outputs appear at their paths, or none.
    pub fn write(&self, archive: &Path, excel: Option<&Path>) -> Result<()> {
        let mut staged = StagedFiles::new();
        write_archive(&staged.stage(archive)?, self.table_views())?;
        if let Some(excel) = excel {
            excel_file_write(self.table_views(), &staged.stage(excel)?)?;
        }
        staged.commit()?;
        info!("wrote {archive:?}");
        if let Some(excel) = excel {
            info!("wrote {excel:?}");
        }
        Ok(())
    }
}

/// Fail on the first results file missing from any run set, before
/// anything is read.
pub fn check_inputs(run_sets: &[RunSet]) -> Result<()> {
    for run_set in run_sets {
        run_set.check_inputs(FAMILIES)?;
    }
    Ok(())
}

fn load_all(run_sets: &[RunSet], config: &AnalysisConfig) -> Result<Vec<FamilyAggregates>> {
    check_inputs(run_sets)?;
    FAMILIES
        .iter()
        .map(|family| FamilyAggregates::load(family, run_sets, config))
        .collect()
}

/// One table of summary statistics per family, with all directories
/// pooled.
pub fn aggregate_report(run_set: &RunSet, config: &AnalysisConfig) -> Result<Report> {
    check_inputs(std::slice::from_ref(run_set))?;
    let mut tables: Vec<Box<dyn TableView>> = Vec::new();
    for family in FAMILIES {
        tables.push(Box::new(AggregateTable::load(family, run_set, config)?));
    }
    Ok(Report { tables })
}

/// Pairwise comparison tables, the first run set being the baseline.
pub fn compare_report(run_sets: &[RunSet], config: &AnalysisConfig) -> Result<Report> {
    if run_sets.len() < 2 {
        bail!("comparing needs a baseline and at least one more run set")
    }
    let tables = load_all(run_sets, config)?
        .iter()
        .map(|aggregates| Box::new(PairwiseTable::new(aggregates)) as Box<dyn TableView>)
        .collect();
    Ok(Report { tables })
}

/// Exploratory comparison tables relative to the first run set, plus
/// the improvements summary.
pub fn analyze_report(run_sets: &[RunSet], config: &AnalysisConfig) -> Result<Report> {
    let exploratory: Vec<ExploratoryTable> = load_all(run_sets, config)?
        .iter()
        .map(ExploratoryTable::new)
        .collect();
    let improvements = ImprovementSummary::new(&exploratory);
    let mut tables: Vec<Box<dyn TableView>> = exploratory
        .into_iter()
        .map(|t| Box::new(t) as Box<dyn TableView>)
        .collect();
    tables.push(Box::new(improvements));
    Ok(Report { tables })
}

/// GC pause latency and cause tables.
pub fn latency_report(run_sets: &[RunSet], config: &AnalysisConfig) -> Result<Report> {
    let (latencies, causes) = latency_tables(run_sets, config.gc_cause_filter())?;
    Ok(Report {
        tables: vec![Box::new(latencies), Box::new(causes)],
    })
}
