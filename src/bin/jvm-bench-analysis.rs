use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser;
use jvm_bench_analysis::config::{AnalysisConfig, AnalysisOpts};
use jvm_bench_analysis::get_terminal_width::get_terminal_width;
use jvm_bench_analysis::report::{
    aggregate_report, analyze_report, compare_report, latency_report, Report,
};
use jvm_bench_analysis::run_set::{parse_run_sets, RunSet};
use jvm_bench_analysis::utillib::logging::{set_log_level, LogLevelOpt};
use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

const PROGRAM_NAME: &str = "jvm-bench-analysis";

#[derive(clap::Parser, Debug)]
#[clap(next_line_help = true)]
#[clap(term_width = get_terminal_width(4))]
/// Summarize and compare the results of JVM benchmark suite runs.
struct Opts {
    #[clap(flatten)]
    log_level: LogLevelOpt,

    /// The subcommand to run. Use `--help` after the sub-command to
    /// get a list of the allowed options there.
    #[clap(subcommand)]
    command: Command,
}

#[derive(clap::Args, Debug)]
struct OutputOpts {
    #[clap(flatten)]
    analysis_opts: AnalysisOpts,

    /// Also write every table as a worksheet of an Excel file at this
    /// path
    #[clap(long)]
    excel: Option<PathBuf>,
}

impl OutputOpts {
    fn config(&self) -> Result<AnalysisConfig> {
        AnalysisConfig::from_env()?.with_overrides(&self.analysis_opts)
    }

    fn write(&self, report: Report, archive: &Path) -> Result<()> {
        report.write(archive, self.excel.as_deref())
    }
}

#[derive(clap::Subcommand, Debug)]
enum Command {
    /// Print version
    Version,

    /// Summary statistics per benchmark family for one set of run
    /// directories (pooled)
    Aggregate {
        #[clap(flatten)]
        output_opts: OutputOpts,

        /// Path of the zip archive to write
        archive: PathBuf,

        /// Run directories, each holding a `benchmarks/` tree
        #[clap(required = true)]
        dirs: Vec<PathBuf>,
    },

    /// Compare run sets directly: the mean of each, and delta and
    /// relative delta against the first (the baseline). Run sets are
    /// given as `name dir... [; name dir...]` (quote the `;`).
    Compare {
        #[clap(flatten)]
        output_opts: OutputOpts,

        /// Path of the zip archive to write
        archive: PathBuf,

        /// `name dir... [; name dir...]`
        #[clap(required = true)]
        run_sets: Vec<String>,
    },

    /// Compare run sets relative to the first (the baseline), with
    /// confidence bounds, plus an improvements summary across all
    /// benchmark families. Run sets are given as for `compare`.
    Analyze {
        #[clap(flatten)]
        output_opts: OutputOpts,

        /// Path of the zip archive to write
        archive: PathBuf,

        /// `name dir... [; name dir...]`
        #[clap(required = true)]
        run_sets: Vec<String>,
    },

    /// GC pause latency statistics and pause counts by cause, from the
    /// GC logs of each run set. Run sets are given as for `compare`.
    Latency {
        #[clap(flatten)]
        output_opts: OutputOpts,

        /// Path of the zip archive to write
        archive: PathBuf,

        /// `name dir... [; name dir...]`
        #[clap(required = true)]
        run_sets: Vec<String>,
    },
}

fn main() -> Result<()> {
    let Opts { log_level, command } = Opts::parse();

    set_log_level(log_level.try_into()?);

    match command {
        Command::Version => println!("{PROGRAM_NAME} version {}", env!("CARGO_PKG_VERSION")),

        Command::Aggregate {
            output_opts,
            archive,
            dirs,
        } => {
            let config = output_opts.config()?;
            let run_set = RunSet::new("aggregate", &dirs);
            output_opts.write(aggregate_report(&run_set, &config)?, &archive)?;
        }

        Command::Compare {
            output_opts,
            archive,
            run_sets,
        } => {
            let config = output_opts.config()?;
            let run_sets = parse_run_sets(&run_sets)?;
            output_opts.write(compare_report(&run_sets, &config)?, &archive)?;
        }

        Command::Analyze {
            output_opts,
            archive,
            run_sets,
        } => {
            let config = output_opts.config()?;
            let run_sets = parse_run_sets(&run_sets)?;
            output_opts.write(analyze_report(&run_sets, &config)?, &archive)?;
        }

        Command::Latency {
            output_opts,
            archive,
            run_sets,
        } => {
            let config = output_opts.config()?;
            let run_sets = parse_run_sets(&run_sets)?;
            output_opts.write(latency_report(&run_sets, &config)?, &archive)?;
        }
    }

    Ok(())
}
