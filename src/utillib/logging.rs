//! Leveled diagnostics on stderr. Every line carries a timestamp, the
//! level and the source location, e.g.
//! `2026-10-17T09:12:01.123+02:00 W src/latency/mod.rs:88\tno gc_logs ...`.

use std::{
    io::{stderr, StderrLock, Write},
    sync::atomic::{AtomicU8, Ordering},
};

use anyhow::{bail, Result};
use chrono::{Local, SecondsFormat};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum LogLevel {
    /// Nothing at all, not even warnings
    Quiet = 0,
    /// Default: anomalies the run tolerates but the user should know
    /// about (missing GC logs, keys absent from a run set)
    Warn = 1,
    /// What is being loaded and written
    Info = 2,
    /// Per-group details, for debugging this program
    Debug = 3,
}

impl LogLevel {
    fn from_u8(level: u8) -> Option<Self> {
        match level {
            0 => Some(LogLevel::Quiet),
            1 => Some(LogLevel::Warn),
            2 => Some(LogLevel::Info),
            3 => Some(LogLevel::Debug),
            _ => None,
        }
    }

    /// Single letter shown in the line prefix.
    pub fn tag(self) -> char {
        match self {
            LogLevel::Quiet => '-',
            LogLevel::Warn => 'W',
            LogLevel::Info => 'I',
            LogLevel::Debug => 'D',
        }
    }
}

// Fields stay private so that the level is only obtainable via
// `TryFrom`, which checks the conflicts.
#[derive(Debug, clap::Args)]
pub struct LogLevelOpt {
    /// Show what is being loaded and written
    #[clap(short, long)]
    verbose: bool,

    /// Show per-group details useful for debugging this program
    /// (implies `--verbose`)
    #[clap(short, long)]
    debug: bool,

    /// Do not even show warnings. Conflicts with `--verbose` and
    /// `--debug`.
    #[clap(short, long)]
    quiet: bool,
}

impl TryFrom<LogLevelOpt> for LogLevel {
    type Error = anyhow::Error;

    fn try_from(opt: LogLevelOpt) -> Result<Self> {
        let LogLevelOpt {
            verbose,
            debug,
            quiet,
        } = opt;
        if quiet {
            if verbose || debug {
                bail!("option `--quiet` conflicts with the options `--verbose` and `--debug`")
            }
            return Ok(LogLevel::Quiet);
        }
        Ok(if debug {
            LogLevel::Debug
        } else if verbose {
            LogLevel::Info
        } else {
            LogLevel::Warn
        })
    }
}

static LOG_LEVEL: AtomicU8 = AtomicU8::new(LogLevel::Warn as u8);

pub fn set_log_level(level: LogLevel) {
    LOG_LEVEL.store(level as u8, Ordering::Relaxed);
}

#[inline]
pub fn log_level() -> LogLevel {
    LogLevel::from_u8(LOG_LEVEL.load(Ordering::Relaxed)).expect("only valid levels are stored")
}

/// Lock stderr and write the line prefix; used by the macros.
pub fn write_prefix(level: LogLevel, file: &str, line: u32) -> StderrLock<'static> {
    let now = Local::now().to_rfc3339_opts(SecondsFormat::Millis, false);
    let mut lock = stderr().lock();
    write!(&mut lock, "{now} {} {file}:{line}\t", level.tag()).expect("stderr must not fail");
    lock
}

#[macro_export]
macro_rules! log_at {
    { $level:expr, $($arg:tt)* } => {
        if $crate::utillib::logging::log_level() >= $level {
            use std::io::Write;
            let mut lock = $crate::utillib::logging::write_prefix($level, file!(), line!());
            writeln!(&mut lock, $($arg)*).expect("stderr must not fail");
        }
    }
}

#[macro_export]
macro_rules! warn {
    { $($arg:tt)* } => {
        $crate::log_at!($crate::utillib::logging::LogLevel::Warn, $($arg)*)
    }
}

#[macro_export]
macro_rules! info {
    { $($arg:tt)* } => {
        $crate::log_at!($crate::utillib::logging::LogLevel::Info, $($arg)*)
    }
}

#[macro_export]
macro_rules! debug {
    { $($arg:tt)* } => {
        $crate::log_at!($crate::utillib::logging::LogLevel::Debug, $($arg)*)
    }
}
